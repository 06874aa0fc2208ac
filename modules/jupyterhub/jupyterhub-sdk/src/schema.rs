//! Schema descriptions reported to the orchestrator.

use std::collections::BTreeMap;

use serde::Serialize;

/// Attribute value type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeType {
    String,
    Bool,
    /// List of strings.
    StringList,
}

/// One attribute of a provider or data source schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct Attribute {
    #[serde(rename = "type")]
    pub kind: AttributeType,
    pub description: String,
    pub required: bool,
    pub optional: bool,
    pub computed: bool,
    pub sensitive: bool,
}

impl Attribute {
    fn new(kind: AttributeType, description: impl Into<String>) -> Self {
        Self {
            kind,
            description: description.into(),
            required: false,
            optional: false,
            computed: false,
            sensitive: false,
        }
    }

    /// A value the practitioner must set.
    #[must_use]
    pub fn required(kind: AttributeType, description: impl Into<String>) -> Self {
        Self {
            required: true,
            ..Self::new(kind, description)
        }
    }

    /// A value the practitioner may set.
    #[must_use]
    pub fn optional(kind: AttributeType, description: impl Into<String>) -> Self {
        Self {
            optional: true,
            ..Self::new(kind, description)
        }
    }

    /// A value filled in by the plugin.
    #[must_use]
    pub fn computed(kind: AttributeType, description: impl Into<String>) -> Self {
        Self {
            computed: true,
            ..Self::new(kind, description)
        }
    }

    /// Mark the value as secret so the host hides it in output.
    #[must_use]
    pub fn sensitive(mut self) -> Self {
        self.sensitive = true;
        self
    }
}

/// Schema of a provider or data source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Schema {
    pub description: String,
    pub attributes: BTreeMap<String, Attribute>,
}

impl Schema {
    #[must_use]
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            attributes: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, attribute: Attribute) -> Self {
        self.attributes.insert(name.into(), attribute);
        self
    }

    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.get(name)
    }
}
