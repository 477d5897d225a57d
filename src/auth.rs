use axum_extra::headers::Authorization;
use axum_extra::headers::authorization::Bearer;
use tracing::warn;

use crate::error::ApiError;
use crate::settings::Settings;

/// Checks the admin API token. Without a configured `auth_token` the admin
/// API stays open and only the browser-side login gates the dashboard.
pub fn verify_token(
    settings: &Settings,
    auth: Option<Authorization<Bearer>>,
    query_token: Option<&str>,
) -> Result<(), ApiError> {
    let Some(expected) = settings.auth_token.as_deref() else {
        return Ok(());
    };

    // header wins over ?token= when both are present
    let provided = auth.as_ref().map(|a| a.token()).or(query_token);
    if provided == Some(expected) {
        return Ok(());
    }
    warn!("rejected admin request with missing or wrong token");
    Err(ApiError::Unauthorized(
        "Invalid authentication token".into(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(auth_token: Option<&str>) -> Settings {
        Settings {
            database_url: "sqlite::memory:".to_string(),
            max_connections: 1,
            debug: false,
            enable_swagger: false,
            port: 8080,
            admin_password: "tim123yoga".to_string(),
            auth_token: auth_token.map(str::to_string),
            site_title: "Tim's Yoga".to_string(),
            instagram_url: None,
            telegram_url: None,
            location: None,
            timezone: "UTC".to_string(),
            seed_demo_data: false,
        }
    }

    #[test]
    fn test_open_without_configured_token() {
        assert!(verify_token(&settings(None), None, None).is_ok());
    }

    #[test]
    fn test_verify_token_header() {
        let auth = Authorization::bearer("secret").unwrap();
        assert!(verify_token(&settings(Some("secret")), Some(auth), None).is_ok());
        let wrong = Authorization::bearer("nope").unwrap();
        assert!(verify_token(&settings(Some("secret")), Some(wrong), None).is_err());
    }

    #[test]
    fn test_verify_token_query() {
        let settings = settings(Some("secret"));
        assert!(verify_token(&settings, None, Some("secret")).is_ok());
        assert!(verify_token(&settings, None, Some("bad")).is_err());
        assert!(verify_token(&settings, None, None).is_err());
    }
}
