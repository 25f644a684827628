use anyhow::{Context, Result};
use base64::prelude::BASE64_URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, Duration, Utc};
use log::{debug, error};
use reqwest::Client;
use ring::signature::RsaKeyPair;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

use crate::entity::SyncError;

pub const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

/// Google service account key, as downloaded from the cloud console.
#[derive(Clone, Deserialize)]
pub struct ServiceAccount {
    #[serde(default)]
    pub project_id: Option<String>,
    pub client_email: String,
    private_key: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

impl fmt::Debug for ServiceAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceAccount")
            .field("project_id", &self.project_id)
            .field("client_email", &self.client_email)
            .field("token_uri", &self.token_uri)
            .finish_non_exhaustive()
    }
}

#[derive(Serialize)]
struct JwtHeader {
    alg: &'static str,
    typ: &'static str,
}

#[derive(Serialize)]
struct JwtClaims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    exp: i64,
    iat: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AccessToken {
    pub access_token: String,
    #[serde(default)]
    pub expires_in: u64,
}

impl ServiceAccount {
    pub fn try_from_str(input: &str) -> Result<Self> {
        serde_json::from_str(input)
            .map_err(|e| SyncError::Credentials(e.to_string()))
            .context("Failed to deserialize json service account key")
    }

    /// Read and parse the key file at `path`.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| SyncError::Credentials(format!("{}: {}", path.display(), e)))
            .context("Failed to read service account file")?;

        Self::try_from_str(&contents)
    }

    /// Build an RS256-signed JWT asserting this account for `scope`, valid
    /// for one hour from `now`.
    pub fn signed_jwt(&self, scope: &str, now: DateTime<Utc>) -> Result<String> {
        let claims = JwtClaims {
            iss: &self.client_email,
            scope,
            aud: &self.token_uri,
            iat: now.timestamp(),
            exp: (now + Duration::hours(1)).timestamp(),
        };
        let header = JwtHeader {
            alg: "RS256",
            typ: "JWT",
        };

        let header_b64 = BASE64_URL_SAFE_NO_PAD
            .encode(serde_json::to_string(&header).context("Failed to encode jwt header")?);
        let claims_b64 = BASE64_URL_SAFE_NO_PAD
            .encode(serde_json::to_string(&claims).context("Failed to encode jwt claims")?);
        let signing_input = format!("{}.{}", header_b64, claims_b64);

        let key_pair = self.key_pair()?;

        // PKCS#1 v1.5 SHA-256
        let mut signature = vec![0; key_pair.public().modulus_len()];
        key_pair
            .sign(
                &ring::signature::RSA_PKCS1_SHA256,
                &ring::rand::SystemRandom::new(),
                signing_input.as_bytes(),
                &mut signature,
            )
            .map_err(|_| SyncError::Credentials("failed to sign jwt".to_string()))?;

        Ok(format!(
            "{}.{}",
            signing_input,
            BASE64_URL_SAFE_NO_PAD.encode(&signature)
        ))
    }

    fn key_pair(&self) -> Result<RsaKeyPair> {
        let mut reader = std::io::Cursor::new(self.private_key.as_bytes());
        let key = rustls_pemfile::read_one(&mut reader)
            .map_err(|e| SyncError::Credentials(format!("invalid PEM private key: {}", e)))?;

        let key_pair = match key {
            Some(rustls_pemfile::Item::Pkcs8Key(der)) => {
                RsaKeyPair::from_pkcs8(der.secret_pkcs8_der()).map_err(|e| {
                    SyncError::Credentials(format!("bad pkcs8 rsa key: {}", e))
                })?
            }
            Some(rustls_pemfile::Item::Pkcs1Key(der)) => {
                RsaKeyPair::from_der(der.secret_pkcs1_der()).map_err(|e| {
                    SyncError::Credentials(format!("bad pkcs1 rsa key: {}", e))
                })?
            }
            _ => {
                return Err(SyncError::Credentials("missing rsa private key".to_string()).into())
            }
        };

        Ok(key_pair)
    }

    /// Exchange a signed assertion for a bearer access token.
    pub async fn fetch_access_token(&self, client: &Client, scope: &str) -> Result<AccessToken> {
        let jwt = self.signed_jwt(scope, Utc::now())?;
        debug!("Requesting access token for {}", self.client_email);

        let params = [("grant_type", JWT_BEARER_GRANT), ("assertion", jwt.as_str())];
        let response = client
            .post(&self.token_uri)
            .form(&params)
            .send()
            .await
            .map_err(SyncError::Http)?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            error!("Token exchange failed with code {}. {}", status.as_u16(), body);
            return Err(SyncError::Authorization(format!("{}: {}", status, body)).into());
        }

        let token = response
            .json::<AccessToken>()
            .await
            .map_err(|e| SyncError::Authorization(format!("bad token response: {}", e)))?;

        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{service_account_json, test_client, FakeServer, Route};
    use chrono::TimeZone;
    use ring::signature::{UnparsedPublicKey, RSA_PKCS1_2048_8192_SHA256};
    use std::io::Write;

    const TEST_KEY: &str = include_str!("testdata/service_account_key.pem");

    fn key_json() -> String {
        serde_json::json!({
            "type": "service_account",
            "project_id": "token-sheets",
            "private_key_id": "abc123",
            "private_key": TEST_KEY,
            "client_email": "sync@token-sheets.iam.gserviceaccount.com",
            "token_uri": "https://oauth2.googleapis.com/token"
        })
        .to_string()
    }

    #[test]
    fn loads_key_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(key_json().as_bytes()).unwrap();

        let account = ServiceAccount::from_file(file.path()).unwrap();

        assert_eq!(account.client_email, "sync@token-sheets.iam.gserviceaccount.com");
        assert_eq!(account.project_id.as_deref(), Some("token-sheets"));
    }

    #[test]
    fn missing_file_is_credentials_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ServiceAccount::from_file(&dir.path().join("nope.json")).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<SyncError>(),
            Some(SyncError::Credentials(_))
        ));
    }

    #[test]
    fn invalid_json_is_credentials_error() {
        let err = ServiceAccount::try_from_str("{\"client_email\": 1}").unwrap_err();

        assert!(matches!(
            err.downcast_ref::<SyncError>(),
            Some(SyncError::Credentials(_))
        ));
    }

    #[test]
    fn token_uri_defaults() {
        let account = ServiceAccount::try_from_str(
            r#"{"client_email": "a@b.iam.gserviceaccount.com", "private_key": "x"}"#,
        )
        .unwrap();

        assert_eq!(account.token_uri, DEFAULT_TOKEN_URI);
    }

    #[test]
    fn debug_hides_private_key() {
        let account = ServiceAccount::try_from_str(&key_json()).unwrap();

        assert!(!format!("{:?}", account).contains("PRIVATE KEY"));
    }

    #[test]
    fn signs_verifiable_jwt() {
        let account = ServiceAccount::try_from_str(&key_json()).unwrap();
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();

        let jwt = account.signed_jwt("scope-a scope-b", now).unwrap();
        let parts: Vec<&str> = jwt.split('.').collect();
        assert_eq!(parts.len(), 3);

        let header: serde_json::Value =
            serde_json::from_slice(&BASE64_URL_SAFE_NO_PAD.decode(parts[0]).unwrap()).unwrap();
        assert_eq!(header["alg"], "RS256");
        assert_eq!(header["typ"], "JWT");

        let claims: serde_json::Value =
            serde_json::from_slice(&BASE64_URL_SAFE_NO_PAD.decode(parts[1]).unwrap()).unwrap();
        assert_eq!(claims["iss"], "sync@token-sheets.iam.gserviceaccount.com");
        assert_eq!(claims["scope"], "scope-a scope-b");
        assert_eq!(claims["aud"], "https://oauth2.googleapis.com/token");
        assert_eq!(claims["iat"], now.timestamp());
        assert_eq!(claims["exp"], now.timestamp() + 3600);

        let key_pair = account.key_pair().unwrap();
        let public_key = UnparsedPublicKey::new(&RSA_PKCS1_2048_8192_SHA256, key_pair.public().as_ref());
        let signature = BASE64_URL_SAFE_NO_PAD.decode(parts[2]).unwrap();
        public_key
            .verify(format!("{}.{}", parts[0], parts[1]).as_bytes(), &signature)
            .unwrap();
    }

    #[test]
    fn garbage_key_fails_to_sign() {
        let account = ServiceAccount::try_from_str(
            r#"{"client_email": "a@b.iam.gserviceaccount.com", "private_key": "not a key"}"#,
        )
        .unwrap();

        let err = account.signed_jwt("scope", Utc::now()).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<SyncError>(),
            Some(SyncError::Credentials(_))
        ));
    }

    #[tokio::test]
    async fn exchanges_assertion_for_access_token() {
        let server = FakeServer::start(vec![Route::new(
            "POST",
            "/token",
            200,
            r#"{"access_token": "ya29.abc", "expires_in": 3599, "token_type": "Bearer"}"#,
        )])
        .await;
        let account = ServiceAccount::try_from_str(&service_account_json(&server.url_for("/token")))
            .unwrap();

        let token = account
            .fetch_access_token(&test_client(), "scope-a")
            .await
            .unwrap();

        assert_eq!(token.access_token, "ya29.abc");
        assert_eq!(token.expires_in, 3599);

        let requests = server.requests();
        assert_eq!(requests[0].line(), "POST /token");
        assert!(requests[0]
            .body
            .contains("grant_type=urn%3Aietf%3Aparams%3Aoauth%3Agrant-type%3Ajwt-bearer"));
        assert!(requests[0].body.contains("&assertion=ey"));
    }

    #[tokio::test]
    async fn rejected_assertion_is_authorization_error() {
        let server = FakeServer::start(vec![Route::new(
            "POST",
            "/token",
            400,
            r#"{"error": "invalid_grant"}"#,
        )])
        .await;
        let account = ServiceAccount::try_from_str(&service_account_json(&server.url_for("/token")))
            .unwrap();

        let err = account
            .fetch_access_token(&test_client(), "scope-a")
            .await
            .unwrap_err();

        match err.downcast_ref::<SyncError>() {
            Some(SyncError::Authorization(message)) => assert!(message.contains("invalid_grant")),
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
