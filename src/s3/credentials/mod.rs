use secrecy::{ExposeSecret, SecretString};

#[derive(Clone, Debug)]
pub struct Credentials {
    // AWS_ACCESS_KEY_ID
    key: String,
    // AWS_SECRET_ACCESS_KEY
    secret: SecretString,
    // AWS_SESSION_TOKEN, only for temporary credentials
    token: Option<SecretString>,
}

impl Credentials {
    #[must_use]
    pub fn new(access: &str, secret: &SecretString) -> Self {
        Self {
            key: access.to_string(),
            secret: secret.clone(),
            token: None,
        }
    }

    #[must_use]
    pub fn with_session_token(mut self, token: Option<SecretString>) -> Self {
        self.token = token;
        self
    }

    /// Get a reference to the access key ID.
    #[must_use]
    pub fn aws_access_key_id(&self) -> &str {
        &self.key
    }

    /// Get a reference to the secret access key.
    #[must_use]
    pub fn aws_secret_access_key(&self) -> &str {
        self.secret.expose_secret()
    }

    #[must_use]
    pub fn aws_session_token(&self) -> Option<&str> {
        self.token.as_ref().map(|token| token.expose_secret())
    }
}
