//! Section-scoped input schemas.
//!
//! Each metadata section of a submission definition is governed by an
//! input schema: the set of field identifiers a client may edit through
//! that section. Schemas are loaded once per step instance and treated as
//! read-only; the dispatcher consults them before any metadata edit reaches
//! a handler.

use crate::{StepError, StepResult};
use dcr_types::{MetadataFieldId, NonEmptyText};
use std::collections::{BTreeSet, HashMap};
use std::path::Path;

/// The allowed field identifiers of one named section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputSchema {
    name: NonEmptyText,
    fields: BTreeSet<String>,
}

impl InputSchema {
    /// Creates a schema from validated field identifiers.
    pub fn new(name: NonEmptyText, fields: impl IntoIterator<Item = MetadataFieldId>) -> Self {
        Self {
            name,
            fields: fields.into_iter().map(MetadataFieldId::into_inner).collect(),
        }
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Whether the section carries the given field.
    pub fn is_field_present(&self, field: &str) -> bool {
        self.fields.contains(field)
    }

    /// The section's field identifiers, in sorted order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(String::as_str)
    }
}

/// Read-only source of input schemas, keyed by section form name.
pub trait SchemaRegistry {
    /// The schema governing the named section.
    ///
    /// # Errors
    ///
    /// Returns `StepError::UnknownSection` if no such section is
    /// configured.
    fn inputs_by_form_name(&self, section: &str) -> StepResult<&InputSchema>;
}

/// Schema registry loaded from a YAML mapping of section name to field
/// list:
///
/// ```yaml
/// bitstream-metadata:
///   - dc.title
///   - dc.description
/// ```
///
/// Field identifiers are validated at load time, so a malformed submission
/// definition fails at startup rather than silently rejecting every edit.
#[derive(Debug, Clone, Default)]
pub struct YamlSchemaRegistry {
    sections: HashMap<String, InputSchema>,
}

impl YamlSchemaRegistry {
    /// Parses a registry from a YAML document.
    ///
    /// # Errors
    ///
    /// Returns `StepError::SchemaParse` for unparseable YAML and
    /// `StepError::InvalidInput` for section names or field identifiers
    /// that fail validation.
    pub fn from_str(document: &str) -> StepResult<Self> {
        let raw: HashMap<String, Vec<String>> =
            serde_yaml::from_str(document).map_err(StepError::SchemaParse)?;

        let mut sections = HashMap::with_capacity(raw.len());
        for (section, fields) in raw {
            let name = NonEmptyText::new(&section)
                .map_err(|e| StepError::InvalidInput(format!("section name {section:?}: {e}")))?;
            let fields = fields
                .iter()
                .map(|f| {
                    MetadataFieldId::new(f).map_err(|e| {
                        StepError::InvalidInput(format!("field {f:?} in section {section:?}: {e}"))
                    })
                })
                .collect::<StepResult<Vec<_>>>()?;
            sections.insert(section, InputSchema::new(name, fields));
        }

        Ok(Self { sections })
    }

    /// Reads and parses a registry from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns `StepError::SchemaRead` if the file cannot be read, plus
    /// everything [`from_str`](Self::from_str) can return.
    pub fn from_path(path: impl AsRef<Path>) -> StepResult<Self> {
        let document = std::fs::read_to_string(path).map_err(StepError::SchemaRead)?;
        Self::from_str(&document)
    }
}

impl SchemaRegistry for YamlSchemaRegistry {
    fn inputs_by_form_name(&self, section: &str) -> StepResult<&InputSchema> {
        self.sections
            .get(section)
            .ok_or_else(|| StepError::UnknownSection(section.to_owned()))
    }
}
