//! Adapter definition: the configuration surface and object types the adapter
//! declares to the host.
//!
//! The host reads the definition once, when the adapter is installed, to render the
//! instance configuration form and to know which metrics a collection may carry.
//! `AdapterDefinition` is built with `define_*` calls; every key must be unique
//! within its scope and a duplicate is reported as `AdapterError::DuplicateKey`.
use serde::Serialize;

use crate::error::AdapterError;
use crate::Result;

/// Version of the definition layout emitted by this crate.
pub const SCHEMA_VERSION: u32 = 1;

/// Type of a configuration parameter's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterType {
    /// Free text.
    String,
    /// Whole number.
    Integer,
}

/// Type of a metric or property value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    /// Floating point number; every metric declared here is one.
    Float,
    /// Whole number.
    Integer,
    /// Text, for properties.
    String,
}

/// One user-editable parameter of the adapter instance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Parameter {
    /// Key the value is sent under in the input payload.
    pub key: String,
    /// Label shown in the configuration form.
    pub label: String,
    /// Help text shown next to the field.
    pub description: String,
    /// Value type, serialized as `type`.
    #[serde(rename = "type")]
    pub kind: ParameterType,
    /// Whether the form refuses an empty value.
    pub required: bool,
    /// Whether the field sits in the advanced settings section.
    pub advanced: bool,
    /// Value pre-filled in the form.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<serde_json::Value>,
    /// Identifier type; `1` makes the parameter part of the instance identity.
    pub ident_type: u8,
}

/// Field of a credential type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CredentialFieldDefinition {
    /// Key the value is sent under in the credential config.
    pub key: String,
    /// Label shown in the credential form.
    pub label: String,
    /// Whether the value is masked and stored as a secret.
    pub password: bool,
    /// Whether the form refuses an empty value.
    pub required: bool,
}

/// Kind of credential the user picks when configuring the instance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CredentialType {
    /// Credential kind key.
    pub key: String,
    /// Name shown when picking a credential.
    pub label: String,
    /// Fields in declaration order.
    pub fields: Vec<CredentialFieldDefinition>,
}

impl CredentialType {
    /// Declares a secret field, stored by the host in its credential store.
    pub fn define_password_parameter(&mut self, key: &str, label: &str) -> Result<()> {
        if self.fields.iter().any(|f| f.key == key) {
            return Err(AdapterError::DuplicateKey(format!("{}.{}", self.key, key)));
        }
        self.fields.push(CredentialFieldDefinition {
            key: String::from(key),
            label: String::from(label),
            password: true,
            required: true,
        });
        Ok(())
    }
}

/// Metric or property declared on an object type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Attribute {
    /// Key the samples are reported under.
    pub key: String,
    /// Name shown in the host's UI.
    pub label: String,
    /// Unit of the value, `None` for unitless prices.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    /// Whether the value is a rate over time.
    pub is_rate: bool,
    /// Whether the value takes a small set of discrete values.
    pub is_discrete: bool,
    /// Whether the host treats the value as a key performance indicator.
    pub is_kpi: bool,
    /// Properties are descriptive values rather than time series.
    pub is_property: bool,
    /// Position in the host's metric list.
    pub dashboard_order: u32,
    /// Value type.
    pub data_type: DataType,
}

/// Kind of object a collection reports.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObjectType {
    /// Object kind key, matched by the collected objects.
    pub key: String,
    /// Name shown in the host's UI.
    pub label: String,
    /// Metrics and properties in declaration order.
    pub attributes: Vec<Attribute>,
}

impl ObjectType {
    /// Declares a numeric metric on this object type.
    pub fn define_metric(&mut self, key: &str, label: &str, unit: Option<&str>) -> Result<()> {
        if self.attributes.iter().any(|a| a.key == key) {
            return Err(AdapterError::DuplicateKey(format!("{}.{}", self.key, key)));
        }
        let dashboard_order = self.attributes.len() as u32;
        self.attributes.push(Attribute {
            key: String::from(key),
            label: String::from(label),
            unit: unit.map(String::from),
            is_rate: false,
            is_discrete: false,
            is_kpi: false,
            is_property: false,
            dashboard_order,
            data_type: DataType::Float,
        });
        Ok(())
    }

    /// Metrics declared so far, in declaration order.
    pub fn metrics(&self) -> impl Iterator<Item = &Attribute> {
        self.attributes.iter().filter(|a| !a.is_property)
    }
}

/// Adapter instance section of the definition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InstanceDefinition {
    /// Object kind of the adapter instance.
    pub key: String,
    /// Name shown for the instance kind.
    pub label: String,
    /// User-editable parameters in declaration order.
    pub identifiers: Vec<Parameter>,
}

/// Everything the adapter declares to the host.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdapterDefinition {
    /// Adapter kind.
    pub adapter_key: String,
    /// Adapter name shown by the host.
    pub adapter_label: String,
    /// Bumped when the declared content changes.
    pub describe_version: u32,
    /// Layout version, see [`SCHEMA_VERSION`].
    pub schema_version: u32,
    /// Configuration form of an instance.
    pub adapter_instance: InstanceDefinition,
    /// Credential kinds an instance can use.
    pub credential_types: Vec<CredentialType>,
    /// Kinds of objects a collection reports.
    pub object_types: Vec<ObjectType>,
}

impl AdapterDefinition {
    /// Starts an empty definition for adapter kind `key`.
    pub fn new(key: &str, label: &str) -> Self {
        AdapterDefinition {
            adapter_key: String::from(key),
            adapter_label: String::from(label),
            describe_version: 1,
            schema_version: SCHEMA_VERSION,
            adapter_instance: InstanceDefinition {
                key: format!("{}_adapter_instance", key),
                label: format!("{} Adapter Instance", label),
                identifiers: Vec::new(),
            },
            credential_types: Vec::new(),
            object_types: Vec::new(),
        }
    }

    /// Declares a credential type and returns it for adding fields.
    pub fn define_credential_type(&mut self, key: &str, label: &str) -> Result<&mut CredentialType> {
        if self.credential_types.iter().any(|c| c.key == key) {
            return Err(AdapterError::DuplicateKey(String::from(key)));
        }
        let index = self.credential_types.len();
        self.credential_types.push(CredentialType {
            key: String::from(key),
            label: String::from(label),
            fields: Vec::new(),
        });
        Ok(&mut self.credential_types[index])
    }

    /// Declares a string identifier of the adapter instance.
    pub fn define_string_parameter(
        &mut self,
        key: &str,
        label: &str,
        description: &str,
        required: bool,
    ) -> Result<&mut Parameter> {
        self.define_parameter(key, label, description, ParameterType::String, required, None)
    }

    /// Declares an integer identifier of the adapter instance.
    pub fn define_int_parameter(
        &mut self,
        key: &str,
        label: &str,
        description: &str,
        required: bool,
        default: Option<i64>,
    ) -> Result<&mut Parameter> {
        self.define_parameter(
            key,
            label,
            description,
            ParameterType::Integer,
            required,
            default.map(serde_json::Value::from),
        )
    }

    fn define_parameter(
        &mut self,
        key: &str,
        label: &str,
        description: &str,
        kind: ParameterType,
        required: bool,
        default: Option<serde_json::Value>,
    ) -> Result<&mut Parameter> {
        let identifiers = &mut self.adapter_instance.identifiers;
        if identifiers.iter().any(|p| p.key == key) {
            return Err(AdapterError::DuplicateKey(String::from(key)));
        }
        let index = identifiers.len();
        identifiers.push(Parameter {
            key: String::from(key),
            label: String::from(label),
            description: String::from(description),
            kind,
            required,
            advanced: false,
            default,
            ident_type: 1,
        });
        Ok(&mut identifiers[index])
    }

    /// Declares an object type and returns it for adding metrics.
    pub fn define_object_type(&mut self, key: &str, label: &str) -> Result<&mut ObjectType> {
        if self.object_types.iter().any(|o| o.key == key) {
            return Err(AdapterError::DuplicateKey(String::from(key)));
        }
        let index = self.object_types.len();
        self.object_types.push(ObjectType {
            key: String::from(key),
            label: String::from(label),
            attributes: Vec::new(),
        });
        Ok(&mut self.object_types[index])
    }

    /// Parameter declared under `key`, if any.
    pub fn parameter(&self, key: &str) -> Option<&Parameter> {
        self.adapter_instance.identifiers.iter().find(|p| p.key == key)
    }
}

impl Parameter {
    /// Hides the parameter behind the "advanced settings" section of the form.
    pub fn advanced(&mut self) -> &mut Self {
        self.advanced = true;
        self
    }
}
