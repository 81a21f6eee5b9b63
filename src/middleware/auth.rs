use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::app::AppState;
use crate::error::ApiError;

/// Bearer-token guard for caller-scoped routes.
///
/// A missing header, or one without a token after the scheme, answers 401.
/// Any submitted token that does not verify answers 403, including tokens
/// presented under a scheme other than `Bearer`. On success the verified
/// `Identity` is inserted into the request extensions.
pub async fn require_identity(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let credentials = extract_credentials(request.headers()).ok_or_else(|| {
        tracing::warn!("Rejected request without credentials: {}", request.uri());
        ApiError::unauthorized()
    })?;

    if !credentials.is_bearer() {
        tracing::warn!("Rejected unsupported authorization scheme {:?}", credentials.scheme);
        return Err(ApiError::forbidden());
    }

    let identity = state.verifier.verify(&credentials.token).await?;
    tracing::debug!("Authenticated {} ({})", identity.email, identity.subject);

    request.extensions_mut().insert(identity);
    Ok(next.run(request).await)
}

/// `Authorization: <scheme> <token>` as presented by the caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub scheme: String,
    pub token: String,
}

impl Credentials {
    pub fn is_bearer(&self) -> bool {
        self.scheme.eq_ignore_ascii_case("bearer")
    }
}

/// `None` when the header is absent, unreadable, or carries no token after
/// the scheme.
pub fn extract_credentials(headers: &HeaderMap) -> Option<Credentials> {
    let auth_str = headers.get(AUTHORIZATION)?.to_str().ok()?;

    let mut parts = auth_str.trim().splitn(2, char::is_whitespace);
    let scheme = parts.next()?;
    let token = parts.next()?.trim();
    if token.is_empty() {
        return None;
    }

    Some(Credentials {
        scheme: scheme.to_string(),
        token: token.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    fn token(value: &str) -> Option<String> {
        extract_credentials(&headers(value)).map(|c| c.token)
    }

    #[test]
    fn extracts_token_after_scheme() {
        assert_eq!(token("Bearer abc.def"), Some("abc.def".to_string()));
        assert_eq!(token("bearer   abc"), Some("abc".to_string()));
        assert!(extract_credentials(&headers("bEaReR abc")).unwrap().is_bearer());
    }

    #[test]
    fn missing_header_has_no_credentials() {
        assert_eq!(extract_credentials(&HeaderMap::new()), None);
    }

    #[test]
    fn scheme_without_token_has_no_credentials() {
        assert_eq!(extract_credentials(&headers("Bearer")), None);
        assert_eq!(extract_credentials(&headers("Bearer   ")), None);
        assert_eq!(extract_credentials(&headers("abc.def.ghi")), None);
    }

    #[test]
    fn other_schemes_still_submit_a_token() {
        let credentials = extract_credentials(&headers("Token abc.def.ghi")).unwrap();
        assert_eq!(credentials.token, "abc.def.ghi");
        assert!(!credentials.is_bearer());
    }
}
