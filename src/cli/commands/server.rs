use clap::Args;
use serde_json::Value;

use crate::cli::{
    utils::{output_error, output_success},
    OutputFormat,
};

#[derive(Debug, Args)]
pub struct HealthArgs {
    #[arg(long, env = "STOREFRONT_URL", default_value = "http://127.0.0.1:5000", help = "Server base URL")]
    pub url: String,
}

pub async fn handle(args: HealthArgs, output_format: OutputFormat) -> anyhow::Result<()> {
    let url = format!("{}/health", args.url.trim_end_matches('/'));
    let response = reqwest::get(&url).await?;
    let status = response.status();
    let body: Value = response.json().await?;

    if status.is_success() {
        output_success(output_format, &format!("{} is healthy", args.url), body["data"].clone())
    } else {
        output_error(output_format, &format!("{} answered {}", args.url, status))?;
        anyhow::bail!("server unhealthy")
    }
}
