//! Connection configuration for the bucket binding

use std::collections::HashMap;

/// Connection settings for an object-storage bucket.
///
/// Immutable after initialization. Fields not present in the property
/// map stay empty; their absence only surfaces later, when the storage
/// service rejects the call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectionConfig {
    pub endpoint: String,
    pub access_key_id: String,
    pub access_key_secret: String,
    pub bucket: String,
}

impl ConnectionConfig {
    /// Bind the recognized properties field by field.
    ///
    /// Key matching is case-insensitive, unknown properties are ignored,
    /// and no validation is performed.
    pub fn from_properties(properties: &HashMap<String, String>) -> Self {
        let mut config = Self::default();
        for (name, value) in properties {
            if name.eq_ignore_ascii_case("endpoint") {
                config.endpoint = value.clone();
            } else if name.eq_ignore_ascii_case("accessKeyID") {
                config.access_key_id = value.clone();
            } else if name.eq_ignore_ascii_case("accessKey") {
                config.access_key_secret = value.clone();
            } else if name.eq_ignore_ascii_case("bucket") {
                config.bucket = value.clone();
            }
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn properties(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_round_trip_identity() {
        let props = properties(&[
            ("endpoint", "https://oss.example.com"),
            ("accessKeyID", "id"),
            ("accessKey", "secret"),
            ("bucket", "test"),
        ]);

        let config = ConnectionConfig::from_properties(&props);
        assert_eq!(config.endpoint, "https://oss.example.com");
        assert_eq!(config.access_key_id, "id");
        assert_eq!(config.access_key_secret, "secret");
        assert_eq!(config.bucket, "test");
    }

    #[test]
    fn test_keys_match_case_insensitively() {
        let props = properties(&[
            ("Endpoint", "endpoint"),
            ("AccessKeyID", "accessKeyID"),
            ("AccessKey", "key"),
            ("Bucket", "test"),
        ]);

        let config = ConnectionConfig::from_properties(&props);
        assert_eq!(config.endpoint, "endpoint");
        assert_eq!(config.access_key_id, "accessKeyID");
        assert_eq!(config.access_key_secret, "key");
        assert_eq!(config.bucket, "test");
    }

    #[test]
    fn test_unknown_properties_are_ignored() {
        let props = properties(&[("bucket", "test"), ("region", "eu-west-1")]);

        let config = ConnectionConfig::from_properties(&props);
        assert_eq!(config.bucket, "test");
        assert_eq!(config, ConnectionConfig {
            bucket: "test".to_string(),
            ..ConnectionConfig::default()
        });
    }

    #[test]
    fn test_missing_properties_stay_empty() {
        let config = ConnectionConfig::from_properties(&HashMap::new());
        assert_eq!(config, ConnectionConfig::default());
    }
}
