//! Admin gate for room management.
//!
//! Room creation, listing and deletion are protected by a single shared
//! password supplied in the `x-admin-password` header and checked against the
//! `ADMIN_PASSWORD` environment variable. Participant-facing routes are open.

use axum::http::HeaderMap;

use crate::error::{ApiError, ApiResult};

/// Header carrying the admin password on protected routes.
pub const ADMIN_PASSWORD_HEADER: &str = "x-admin-password";

#[derive(Debug, Clone)]
pub struct AdminConfig {
    password: Option<String>,
}

impl AdminConfig {
    pub fn from_env() -> Self {
        Self {
            password: std::env::var("ADMIN_PASSWORD").ok(),
        }
    }

    /// Check a supplied password. An unset ADMIN_PASSWORD fails every check.
    pub fn verify(&self, supplied: &str) -> bool {
        match &self.password {
            Some(expected) => supplied == expected,
            None => {
                tracing::error!("ADMIN_PASSWORD is not set");
                false
            }
        }
    }
}

/// Require a valid admin password header on the request.
pub fn require_admin(headers: &HeaderMap, config: &AdminConfig) -> ApiResult<()> {
    let supplied = headers
        .get(ADMIN_PASSWORD_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| ApiError::unauthorized("Missing admin password"))?;

    if config.verify(supplied) {
        Ok(())
    } else {
        Err(ApiError::unauthorized("Invalid admin password"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> AdminConfig {
        AdminConfig {
            password: Some("letmein".to_string()),
        }
    }

    #[test]
    fn test_correct_password_verifies() {
        assert!(test_config().verify("letmein"));
    }

    #[test]
    fn test_wrong_password_rejected() {
        assert!(!test_config().verify("guessing"));
    }

    #[test]
    fn test_unset_password_rejects_everything() {
        let config = AdminConfig { password: None };
        assert!(!config.verify("letmein"));
        assert!(!config.verify(""));
    }

    #[test]
    fn test_require_admin_reads_header() {
        let mut headers = HeaderMap::new();
        headers.insert(ADMIN_PASSWORD_HEADER, "letmein".parse().unwrap());
        assert!(require_admin(&headers, &test_config()).is_ok());
    }

    #[test]
    fn test_require_admin_missing_header() {
        let headers = HeaderMap::new();
        let result = require_admin(&headers, &test_config());
        assert!(matches!(result, Err(ApiError::Unauthorized(_))));
    }

    #[test]
    fn test_require_admin_wrong_password() {
        let mut headers = HeaderMap::new();
        headers.insert(ADMIN_PASSWORD_HEADER, "guessing".parse().unwrap());
        let result = require_admin(&headers, &test_config());
        assert!(matches!(result, Err(ApiError::Unauthorized(_))));
    }
}
