//! JSON Schema export of the on-disk record format.
//!
//! Schemas are generated from the entity structs with [`schemars::schema_for!`],
//! so they always match what the record loader accepts. External tooling
//! (editor plugins, CI validators) consumes them through `curio schema`.

use schemars::schema_for;

use crate::entities::{License, Platform, Software, Tag};
use crate::enums::EntityKind;
use crate::errors::CoreError;

/// JSON Schema describing one record of the given kind.
///
/// # Errors
///
/// Returns [`CoreError::Validation`] if the generated schema cannot be
/// converted to a JSON value.
pub fn record_schema(kind: EntityKind) -> Result<serde_json::Value, CoreError> {
    let schema = match kind {
        EntityKind::Software => schema_for!(Software),
        EntityKind::Tag => schema_for!(Tag),
        EntityKind::Platform => schema_for!(Platform),
        EntityKind::License => schema_for!(License),
    };
    serde_json::to_value(schema).map_err(|e| CoreError::Validation(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_kind_has_a_schema() {
        for kind in EntityKind::ALL {
            let schema = record_schema(kind).unwrap();
            assert!(schema.get("properties").is_some(), "{kind} schema has no properties");
        }
    }

    #[test]
    fn software_schema_requires_only_name() {
        let schema = record_schema(EntityKind::Software).unwrap();
        let required = schema["required"].as_array().unwrap();
        assert_eq!(required.len(), 1);
        assert_eq!(required[0], "name");
    }
}
