use std::fmt;

/// Bearer token issued by the backend's token endpoint.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    token: String,
}

impl Credential {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn authorization_header(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("token", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn authorization_header_uses_bearer_scheme() {
        let credential = Credential::new("abc123");

        assert_eq!(credential.authorization_header(), "Bearer abc123");
    }

    #[test]
    fn debug_output_hides_token() {
        let credential = Credential::new("super-secret");

        let debug = format!("{:?}", credential);

        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("redacted"));
    }
}
