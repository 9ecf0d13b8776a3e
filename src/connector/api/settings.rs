use crate::connector::{CHROMA_CLOUD_BASE_URL, DEFAULT_EMBEDDING_MODEL, PERPLEXITY_BASE_URL};
use crate::domain::DomainError;

pub const PERPLEXITY_API_KEY: &str = "PERPLEXITY_API_KEY";
pub const CHROMA_CLOUD_API_KEY: &str = "CHROMA_CLOUD_API_KEY";
pub const CHROMA_CLOUD_TENANT: &str = "CHROMA_CLOUD_TENANT";

pub const CHROMA_DATABASE: &str = "HeatX Software";
pub const CHROMA_COLLECTION: &str = "Heatx";

/// Process-wide credentials and endpoints, read once at startup.
///
/// | Variable               | Required | Default                                  |
/// |------------------------|----------|------------------------------------------|
/// | `PERPLEXITY_API_KEY`   | yes      |                                          |
/// | `CHROMA_CLOUD_API_KEY` | yes      |                                          |
/// | `CHROMA_CLOUD_TENANT`  | yes      |                                          |
/// | `PERPLEXITY_BASE_URL`  | no       | `https://api.perplexity.ai`              |
/// | `CHROMA_CLOUD_URL`     | no       | `https://api.trychroma.com`              |
/// | `EMBEDDING_MODEL`      | no       | `sentence-transformers/all-MiniLM-L6-v2` |
#[derive(Debug, Clone)]
pub struct Settings {
    pub perplexity_api_key: String,
    pub perplexity_base_url: String,
    pub chroma_api_key: String,
    pub chroma_tenant: String,
    pub chroma_base_url: String,
    pub chroma_database: String,
    pub chroma_collection: String,
    pub embedding_model: String,
}

impl Settings {
    pub fn from_env() -> Result<Self, DomainError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any key lookup. Empty values count as missing, and
    /// every missing variable is named in the error.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, DomainError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let perplexity_api_key = get(PERPLEXITY_API_KEY);
        let chroma_api_key = get(CHROMA_CLOUD_API_KEY);
        let chroma_tenant = get(CHROMA_CLOUD_TENANT);

        let missing: Vec<&str> = [
            (PERPLEXITY_API_KEY, perplexity_api_key.is_none()),
            (CHROMA_CLOUD_API_KEY, chroma_api_key.is_none()),
            (CHROMA_CLOUD_TENANT, chroma_tenant.is_none()),
        ]
        .into_iter()
        .filter_map(|(key, absent)| absent.then_some(key))
        .collect();

        match (perplexity_api_key, chroma_api_key, chroma_tenant) {
            (Some(perplexity_api_key), Some(chroma_api_key), Some(chroma_tenant)) => Ok(Self {
                perplexity_api_key,
                perplexity_base_url: get("PERPLEXITY_BASE_URL")
                    .unwrap_or_else(|| PERPLEXITY_BASE_URL.to_string()),
                chroma_api_key,
                chroma_tenant,
                chroma_base_url: get("CHROMA_CLOUD_URL")
                    .unwrap_or_else(|| CHROMA_CLOUD_BASE_URL.to_string()),
                chroma_database: CHROMA_DATABASE.to_string(),
                chroma_collection: CHROMA_COLLECTION.to_string(),
                embedding_model: get("EMBEDDING_MODEL")
                    .unwrap_or_else(|| DEFAULT_EMBEDDING_MODEL.to_string()),
            }),
            _ => Err(DomainError::configuration(format!(
                "Missing required environment variables: {}",
                missing.join(", ")
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn loads_required_values_and_defaults() {
        let settings = Settings::from_lookup(lookup(&[
            (PERPLEXITY_API_KEY, "pplx-123"),
            (CHROMA_CLOUD_API_KEY, "ck-456"),
            (CHROMA_CLOUD_TENANT, "tenant-789"),
        ]))
        .unwrap();

        assert_eq!(settings.perplexity_api_key, "pplx-123");
        assert_eq!(settings.chroma_tenant, "tenant-789");
        assert_eq!(settings.chroma_database, "HeatX Software");
        assert_eq!(settings.chroma_collection, "Heatx");
        assert_eq!(settings.perplexity_base_url, "https://api.perplexity.ai");
        assert_eq!(settings.chroma_base_url, "https://api.trychroma.com");
        assert_eq!(
            settings.embedding_model,
            "sentence-transformers/all-MiniLM-L6-v2"
        );
    }

    #[test]
    fn names_every_missing_variable() {
        let err = Settings::from_lookup(lookup(&[(CHROMA_CLOUD_API_KEY, "ck")])).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains(PERPLEXITY_API_KEY));
        assert!(msg.contains(CHROMA_CLOUD_TENANT));
        assert!(!msg.contains(CHROMA_CLOUD_API_KEY));
    }

    #[test]
    fn blank_values_count_as_missing() {
        let err = Settings::from_lookup(lookup(&[
            (PERPLEXITY_API_KEY, "  "),
            (CHROMA_CLOUD_API_KEY, "ck"),
            (CHROMA_CLOUD_TENANT, "t"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains(PERPLEXITY_API_KEY));
    }

    #[test]
    fn base_urls_can_be_overridden() {
        let settings = Settings::from_lookup(lookup(&[
            (PERPLEXITY_API_KEY, "p"),
            (CHROMA_CLOUD_API_KEY, "c"),
            (CHROMA_CLOUD_TENANT, "t"),
            ("PERPLEXITY_BASE_URL", "http://127.0.0.1:9000"),
            ("CHROMA_CLOUD_URL", "http://127.0.0.1:9001"),
        ]))
        .unwrap();
        assert_eq!(settings.perplexity_base_url, "http://127.0.0.1:9000");
        assert_eq!(settings.chroma_base_url, "http://127.0.0.1:9001");
    }
}
