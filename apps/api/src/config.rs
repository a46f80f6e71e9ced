use anyhow::{Context, Result};

use crate::analysis::contact::NamePolicy;

const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub s3_bucket: String,
    pub s3_endpoint: String,
    pub aws_access_key_id: String,
    pub aws_secret_access_key: String,
    pub ollama_base_url: String,
    pub ollama_api_key: Option<String>,
    pub ollama_model: String,
    pub ollama_vision_model: String,
    pub name_policy: NamePolicy,
    pub max_upload_bytes: usize,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            s3_bucket: require_env("S3_BUCKET")?,
            s3_endpoint: require_env("S3_ENDPOINT")?,
            aws_access_key_id: require_env("AWS_ACCESS_KEY_ID")?,
            aws_secret_access_key: require_env("AWS_SECRET_ACCESS_KEY")?,
            ollama_base_url: env_or("OLLAMA_BASE_URL", "http://localhost:11434"),
            ollama_api_key: std::env::var("OLLAMA_API_KEY")
                .ok()
                .filter(|k| !k.trim().is_empty()),
            ollama_model: env_or("OLLAMA_MODEL", "llama3.1"),
            ollama_vision_model: env_or("OLLAMA_VISION_MODEL", "llava"),
            name_policy: parse_name_policy(&env_or("NAME_POLICY", "strict"))?,
            max_upload_bytes: match std::env::var("MAX_UPLOAD_BYTES") {
                Ok(v) => v
                    .parse::<usize>()
                    .context("MAX_UPLOAD_BYTES must be a positive integer")?,
                Err(_) => DEFAULT_MAX_UPLOAD_BYTES,
            },
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_name_policy(raw: &str) -> Result<NamePolicy> {
    raw.parse::<NamePolicy>()
        .context("NAME_POLICY must be 'strict' or 'lenient'")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_name_policy() {
        assert_eq!(parse_name_policy("strict").unwrap(), NamePolicy::Strict);
        assert_eq!(parse_name_policy(" Lenient ").unwrap(), NamePolicy::Lenient);
    }

    #[test]
    fn test_parse_name_policy_rejects_unknown_value() {
        let err = parse_name_policy("fuzzy").unwrap_err();
        assert_eq!(err.to_string(), "NAME_POLICY must be 'strict' or 'lenient'");
        assert_eq!(err.root_cause().to_string(), "unknown name policy 'fuzzy'");
    }
}
