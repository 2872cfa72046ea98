//! Adapter instance read from the host's input file.
//!
//! The host serializes the configured adapter instance as JSON before every call
//! except `adapter_definition`. Identifiers hold plain configuration values such as
//! the ticker; secrets live in the credential fields.
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::AdapterError;
use crate::Result;

/// Key and value of one configured identifier.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Identifier {
    /// Parameter key from the adapter definition.
    pub key: String,
    /// Configured value, always sent as a string.
    pub value: String,
    /// Whether the host uses this identifier to tell instances apart.
    #[serde(default)]
    pub is_part_of_uniqueness: bool,
}

/// Key of the adapter instance object.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InstanceKey {
    /// Display name given to the instance.
    pub name: String,
    /// Adapter kind the instance belongs to.
    pub adapter_kind: String,
    /// Object kind of the instance itself.
    pub object_kind: String,
    /// Configured parameters.
    #[serde(default)]
    pub identifiers: Vec<Identifier>,
}

/// One field of the selected credential.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CredentialField {
    /// Field key from the credential type.
    pub key: String,
    /// Plain-text value, secrets included.
    pub value: String,
    /// Whether the host stores the value as a secret.
    #[serde(default)]
    pub is_password: bool,
}

/// Credential chosen for the adapter instance.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CredentialConfig {
    /// Key of the credential type from the adapter definition.
    pub credential_key: String,
    /// Values of the credential's fields.
    #[serde(default)]
    pub credential_fields: Vec<CredentialField>,
}

/// A certificate the user accepted for one of the adapter's endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Certificate {
    /// PEM encoded certificate.
    pub cert_pem_string: String,
    /// The user accepted it although the hostname does not match.
    #[serde(default)]
    pub is_invalid_hostname: bool,
    /// The user accepted it although it has expired.
    #[serde(default)]
    pub is_expired: bool,
}

/// Certificates section of the input.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CertificateConfig {
    /// Accepted certificates, in no particular order.
    #[serde(default)]
    pub certificates: Vec<Certificate>,
}

/// Time window of the current collection cycle, in milliseconds since the epoch.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CollectionWindow {
    /// Start of the window.
    pub start_time: i64,
    /// End of the window.
    pub end_time: i64,
}

/// Adapter instance as supplied by the host.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AdapterInstance {
    /// Identity and configured parameters of the instance.
    pub adapter_key: InstanceKey,
    /// Selected credential, absent when the instance has none.
    #[serde(default)]
    pub credential_config: Option<CredentialConfig>,
    /// Certificates accepted for the endpoints listed by `endpoint_urls`.
    #[serde(default)]
    pub certificate_config: Option<CertificateConfig>,
    /// Sequence number of the collection cycle.
    #[serde(default)]
    pub collection_number: Option<u64>,
    /// Time window of the collection cycle.
    #[serde(default)]
    pub collection_window: Option<CollectionWindow>,
}

impl AdapterInstance {
    /// Reads the instance from any JSON source.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Reads the instance from the input file passed on the command line.
    pub fn from_path(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Value of the identifier `key`.
    pub fn identifier_value(&self, key: &str) -> Result<&str> {
        self.adapter_key
            .identifiers
            .iter()
            .find(|identifier| identifier.key == key)
            .map(|identifier| identifier.value.as_str())
            .ok_or_else(|| AdapterError::MissingIdentifier(key.to_string()))
    }

    /// Value of the credential field `key`.
    pub fn credential_value(&self, key: &str) -> Result<&str> {
        self.credential_config
            .as_ref()
            .and_then(|config| {
                config
                    .credential_fields
                    .iter()
                    .find(|field| field.key == key)
            })
            .map(|field| field.value.as_str())
            .ok_or_else(|| AdapterError::MissingCredential(key.to_string()))
    }

    /// Certificates accepted by the user, empty when none were supplied.
    pub fn certificates(&self) -> &[Certificate] {
        self.certificate_config
            .as_ref()
            .map(|config| config.certificates.as_slice())
            .unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INPUT: &str = r#"{
        "adapter_key": {
            "name": "quotes",
            "adapter_kind": "StockQuoteAdapter",
            "object_kind": "StockQuoteAdapter_adapter_instance",
            "identifiers": [
                {"key": "ticker", "value": "ABC", "is_part_of_uniqueness": true},
                {"key": "container_memory_limit", "value": "1024"}
            ]
        },
        "credential_config": {
            "credential_key": "credential",
            "credential_fields": [{"key": "apiKey", "value": "s3cret", "is_password": true}]
        },
        "certificate_config": {"certificates": [{"cert_pem_string": "PEM"}]},
        "collection_number": 3,
        "collection_window": {"start_time": 10, "end_time": 20}
    }"#;

    #[test]
    fn reads_identifiers_and_credentials() {
        let instance = AdapterInstance::from_reader(INPUT.as_bytes()).unwrap();
        assert_eq!(instance.identifier_value("ticker").unwrap(), "ABC");
        assert_eq!(instance.credential_value("apiKey").unwrap(), "s3cret");
        assert_eq!(instance.certificates().len(), 1);
        assert_eq!(instance.collection_number, Some(3));
    }

    #[test]
    fn missing_values_name_the_key() {
        let instance = AdapterInstance::from_reader(INPUT.as_bytes()).unwrap();
        let err = instance.identifier_value("host").unwrap_err();
        assert_eq!(err.to_string(), "Missing identifier: host");
        let err = instance.credential_value("token").unwrap_err();
        assert_eq!(err.to_string(), "Missing credential field: token");
    }

    #[test]
    fn optional_sections_may_be_absent() {
        let input = r#"{"adapter_key": {"name": "q", "adapter_kind": "k", "object_kind": "o"}}"#;
        let instance = AdapterInstance::from_reader(input.as_bytes()).unwrap();
        assert!(instance.certificates().is_empty());
        assert!(matches!(
            instance.credential_value("apiKey"),
            Err(AdapterError::MissingCredential(_))
        ));
    }

    #[test]
    fn malformed_json_is_a_serde_error() {
        let err = AdapterInstance::from_reader("{not json".as_bytes()).unwrap_err();
        assert!(matches!(err, AdapterError::SerdeJson(_)));
    }
}
