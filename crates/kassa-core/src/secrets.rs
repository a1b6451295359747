use std::path::{Path, PathBuf};
use thiserror::Error;

pub const CLIENT_ID_ENV: &str = "EXTENDA_CLIENT_ID";
pub const CLIENT_SECRET_ENV: &str = "EXTENDA_CLIENT_SECRET";

#[derive(Error, Debug)]
pub enum SecretsError {
    #[error("no client credentials found for {provider} (set EXTENDA_CLIENT_ID and EXTENDA_CLIENT_SECRET)")]
    NotFound { provider: String },

    #[error("secrets file read error: {source}")]
    Read {
        #[from]
        source: std::io::Error,
    },

    #[error("secrets.toml parse error: {source}")]
    Parse {
        #[from]
        source: toml::de::Error,
    },
}

/// Application identity used for the client-credentials token grant.
#[derive(Clone)]
pub struct ClientCredentials {
    pub client_id: String,
    pub client_secret: String,
}

impl std::fmt::Debug for ClientCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, serde::Deserialize)]
struct SecretsFile {
    extenda: Option<ClientSecrets>,
}

#[derive(Debug, serde::Deserialize)]
struct ClientSecrets {
    client_id: String,
    client_secret: String,
}

pub fn resolve_extenda_credentials() -> Result<ClientCredentials, SecretsError> {
    resolve_credentials(|key| std::env::var(key).ok(), &secrets_path())
}

fn resolve_credentials<F>(
    lookup: F,
    secrets_file: &Path,
) -> Result<ClientCredentials, SecretsError>
where
    F: Fn(&str) -> Option<String>,
{
    let from_environment = (lookup(CLIENT_ID_ENV), lookup(CLIENT_SECRET_ENV));

    if let (Some(client_id), Some(client_secret)) = from_environment {
        if !client_id.is_empty() && !client_secret.is_empty() {
            return Ok(ClientCredentials {
                client_id,
                client_secret,
            });
        }
    }

    load_from_secrets_file(secrets_file)
}

fn load_from_secrets_file(path: &Path) -> Result<ClientCredentials, SecretsError> {
    if !path.exists() {
        return Err(SecretsError::NotFound {
            provider: "extenda".to_string(),
        });
    }

    let content = std::fs::read_to_string(path)?;
    let secrets: SecretsFile = toml::from_str(&content)?;

    secrets
        .extenda
        .map(|secrets| ClientCredentials {
            client_id: secrets.client_id,
            client_secret: secrets.client_secret,
        })
        .ok_or_else(|| SecretsError::NotFound {
            provider: "extenda".to_string(),
        })
}

pub fn secrets_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("kassa")
        .join("secrets.toml")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn missing_file() -> PathBuf {
        std::env::temp_dir().join("kassa-tests-does-not-exist").join("secrets.toml")
    }

    fn write_secrets_file(name: &str, content: &str) -> PathBuf {
        let directory =
            std::env::temp_dir().join(format!("kassa-secrets-{}-{}", name, std::process::id()));
        std::fs::create_dir_all(&directory).unwrap();
        let path = directory.join("secrets.toml");
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn resolve_from_environment() {
        let variables = HashMap::from([
            (CLIENT_ID_ENV, "3eebafa8".to_string()),
            (CLIENT_SECRET_ENV, "s3cret".to_string()),
        ]);

        let credentials =
            resolve_credentials(|key| variables.get(key).cloned(), &missing_file()).unwrap();

        assert_eq!(credentials.client_id, "3eebafa8");
        assert_eq!(credentials.client_secret, "s3cret");
    }

    #[test]
    fn missing_credentials_returns_error() {
        let result = resolve_credentials(|_| None, &missing_file());

        assert!(matches!(result, Err(SecretsError::NotFound { .. })));
    }

    #[test]
    fn partial_environment_falls_back_to_file() {
        let path = write_secrets_file(
            "partial",
            r#"
                [extenda]
                client_id = "from-file"
                client_secret = "file-secret"
            "#,
        );
        let variables = HashMap::from([(CLIENT_ID_ENV, "from-env".to_string())]);

        let credentials = resolve_credentials(|key| variables.get(key).cloned(), &path).unwrap();

        assert_eq!(credentials.client_id, "from-file");
        assert_eq!(credentials.client_secret, "file-secret");
    }

    #[test]
    fn secrets_file_without_extenda_section_is_not_found() {
        let path = write_secrets_file("empty", "");

        let result = resolve_credentials(|_| None, &path);

        assert!(matches!(result, Err(SecretsError::NotFound { .. })));
    }

    #[test]
    fn debug_output_hides_client_secret() {
        let credentials = ClientCredentials {
            client_id: "id".to_string(),
            client_secret: "hunter2".to_string(),
        };

        assert!(!format!("{:?}", credentials).contains("hunter2"));
    }
}
