use anyhow::Context;
use clap::Args;
use serde_json::json;

use crate::auth::issue_token;
use crate::cli::{utils::output_success, OutputFormat};
use crate::config::AppConfig;

#[derive(Debug, Args)]
pub struct TokenArgs {
    #[arg(long, help = "Email the token vouches for")]
    pub email: String,

    #[arg(long, help = "Subject claim (defaults to the email)")]
    pub subject: Option<String>,

    #[arg(long, help = "Lifetime in hours (defaults to SECURITY_JWT_EXPIRY_HOURS)")]
    pub hours: Option<i64>,
}

pub fn handle(args: TokenArgs, output_format: OutputFormat) -> anyhow::Result<()> {
    let config = AppConfig::from_env();
    let subject = args.subject.unwrap_or_else(|| args.email.clone());

    let token = issue_token(&config.security, &subject, &args.email, args.hours)
        .context("JWT_SECRET must be set to mint tokens")?;

    match output_format {
        OutputFormat::Json => output_success(
            output_format,
            "Token issued",
            json!({ "token": token, "email": args.email, "subject": subject }),
        ),
        OutputFormat::Text => output_success(output_format, &format!("Token issued for {}", args.email), json!(token)),
    }
}
