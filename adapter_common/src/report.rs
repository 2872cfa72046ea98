//! Result payloads written to the host's output file.
//!
//! Each operation produces exactly one of these. A failed operation still yields a
//! payload; the failure travels in its `errorMessage` field so the host can tell an
//! adapter that ran and found a problem from one that could not run at all.
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::Result;

/// Serializes `payload` as JSON into `writer`.
pub fn write_payload<T: Serialize, W: Write>(payload: &T, mut writer: W) -> Result<()> {
    serde_json::to_writer(&mut writer, payload)?;
    writer.flush()?;
    Ok(())
}

/// Serializes `payload` as JSON into the file at `path`, replacing it.
pub fn write_payload_to(payload: &impl Serialize, path: &Path) -> Result<()> {
    let file = File::create(path)?;
    write_payload(payload, BufWriter::new(file))
}

/// Outcome of a connection test.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestResult {
    /// Why the test failed, `None` when it passed.
    pub error_message: Option<String>,
}

impl TestResult {
    /// Marks the test as failed with `message`.
    pub fn with_error(&mut self, message: impl Into<String>) {
        self.error_message = Some(message.into());
    }

    /// Whether the connection test passed.
    pub fn is_success(&self) -> bool {
        self.error_message.is_none()
    }
}

/// Identity of a collected object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectKey {
    /// Object name, the ticker for quotes.
    pub name: String,
    /// Adapter kind that owns the object.
    pub adapter_kind: String,
    /// Object type key from the definition.
    pub object_kind: String,
    /// Identifier values; quotes are identified by name alone.
    #[serde(default)]
    pub identifiers: Vec<serde_json::Value>,
}

/// Numeric sample of one metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metric {
    /// Metric key from the definition.
    pub key: String,
    /// Sampled value.
    pub number_value: f64,
    /// Milliseconds since the UNIX epoch.
    pub timestamp: i64,
}

impl Metric {
    /// Creates a sample of `key` taken at `timestamp` (milliseconds since the epoch).
    pub fn new(key: &str, value: f64, timestamp: i64) -> Self {
        Metric {
            key: String::from(key),
            number_value: value,
            timestamp,
        }
    }
}

/// An object reported by a collection, with the metrics sampled for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataObject {
    /// Identity of the object.
    pub key: ObjectKey,
    /// Samples collected in this run.
    #[serde(default)]
    pub metrics: Vec<Metric>,
    /// Descriptive values; quotes carry none.
    #[serde(default)]
    pub properties: Vec<serde_json::Value>,
    /// Events raised on the object; quotes raise none.
    #[serde(default)]
    pub events: Vec<serde_json::Value>,
}

impl DataObject {
    /// Attaches a sample to the object.
    pub fn add_metric(&mut self, metric: Metric) {
        self.metrics.push(metric);
    }

    /// Value of the metric `key`, if it was sampled.
    pub fn metric(&self, key: &str) -> Option<f64> {
        self.metrics
            .iter()
            .find(|m| m.key == key)
            .map(|m| m.number_value)
    }
}

/// Outcome of a collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectResult {
    /// Collected objects, empty when the collection failed.
    pub result: Vec<DataObject>,
    /// Parent/child links between objects; quotes have none.
    pub relationships: Vec<serde_json::Value>,
    /// Objects the host should mark as gone.
    pub not_existing_objects: Vec<serde_json::Value>,
    /// Why the collection failed, `None` when it succeeded.
    pub error_message: Option<String>,
}

impl CollectResult {
    /// Returns the object of `object_kind` named `name`, creating it when absent.
    pub fn object(&mut self, adapter_kind: &str, object_kind: &str, name: &str) -> &mut DataObject {
        let position = self.result.iter().position(|o| {
            o.key.adapter_kind == adapter_kind && o.key.object_kind == object_kind && o.key.name == name
        });
        let index = match position {
            Some(index) => index,
            None => {
                self.result.push(DataObject {
                    key: ObjectKey {
                        name: String::from(name),
                        adapter_kind: String::from(adapter_kind),
                        object_kind: String::from(object_kind),
                        identifiers: Vec::new(),
                    },
                    metrics: Vec::new(),
                    properties: Vec::new(),
                    events: Vec::new(),
                });
                self.result.len() - 1
            }
        };
        &mut self.result[index]
    }

    /// Marks the collection as failed and drops any partially collected objects.
    pub fn with_error(&mut self, message: impl Into<String>) {
        self.result.clear();
        self.error_message = Some(message.into());
    }

    /// Whether the collection succeeded.
    pub fn is_success(&self) -> bool {
        self.error_message.is_none()
    }
}

/// URLs whose certificates the host should fetch before `test` and `collect`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EndpointResult {
    /// URLs in the order the host should contact them.
    pub endpoint_urls: Vec<String>,
}

impl EndpointResult {
    /// Adds a URL to the list.
    pub fn with_endpoint(&mut self, url: impl Into<String>) {
        self.endpoint_urls.push(url.into());
    }
}
