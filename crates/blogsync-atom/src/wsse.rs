//! WSSE `UsernameToken` request signing

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::{DateTime, Utc};
use rand::RngCore;
use sha1::{Digest, Sha1};

/// Name of the header carrying the token.
pub const HEADER: &str = "X-WSSE";

const NONCE_LEN: usize = 12;

/// Username and password used to sign every request.
#[derive(Clone)]
pub struct WsseCredentials {
    username: String,
    password: String,
}

impl WsseCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// Header value with a fresh random nonce and the current time.
    pub fn header_value(&self) -> String {
        let mut nonce = [0u8; NONCE_LEN];
        rand::thread_rng().fill_bytes(&mut nonce);
        self.header_value_with(&nonce, Utc::now())
    }

    /// Header value for a given nonce and creation time.
    pub fn header_value_with(&self, nonce: &[u8], created: DateTime<Utc>) -> String {
        let created = created.format("%Y-%m-%dT%H:%M:%SZ").to_string();

        let mut digest = Sha1::new();
        digest.update(nonce);
        digest.update(created.as_bytes());
        digest.update(self.password.as_bytes());

        format!(
            r#"UsernameToken Username="{}", PasswordDigest="{}", Nonce="{}", Created="{}""#,
            self.username,
            STANDARD.encode(digest.finalize()),
            STANDARD.encode(nonce),
            created,
        )
    }
}

impl std::fmt::Debug for WsseCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WsseCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}
