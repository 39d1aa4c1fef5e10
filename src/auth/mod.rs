pub mod extractors;
pub mod middleware;
pub mod password;
pub mod token;

use serde::{Deserialize, Serialize};

pub use extractors::AuthenticatedUser;
pub use middleware::AuthMiddleware;
pub use password::{hash_password, verify_password};
pub use token::{Claims, TokenService};

/// Represents the payload for a token request.
///
/// Both fields must be present; empty values are left to the credential check.
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response returned after successful authentication.
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    /// The signed bearer token.
    pub access_token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_request_accepts_empty_fields() {
        let login: LoginRequest =
            serde_json::from_value(serde_json::json!({ "email": "", "password": "" })).unwrap();
        assert!(login.email.is_empty());
        assert!(login.password.is_empty());

        let missing = serde_json::json!({ "email": "x@y.com" });
        assert!(serde_json::from_value::<LoginRequest>(missing).is_err());
    }

    #[test]
    fn test_token_response_shape() {
        let json = serde_json::to_value(TokenResponse {
            access_token: "abc".to_string(),
        })
        .unwrap();
        assert_eq!(json, serde_json::json!({ "access_token": "abc" }));
    }
}
