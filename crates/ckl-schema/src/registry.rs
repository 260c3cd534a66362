//! Central schema registry for all Checklist++ types.
//!
//! The `SchemaRegistry` builds JSON Schemas from ckl-core types at construction
//! time using [`schemars::schema_for!`] and provides validation via `jsonschema`.

use std::collections::HashMap;

use schemars::schema_for;
use serde_json::Value;

use crate::error::SchemaError;

/// Central store of all JSON Schemas in the Checklist++ system.
#[derive(Debug)]
pub struct SchemaRegistry {
    schemas: HashMap<&'static str, Value>,
}

/// Insert a schema into the map, converting the `schemars` output to a
/// `serde_json::Value`. A conversion failure leaves a `null` schema behind,
/// which then surfaces as `SchemaError::Generation` on first use.
macro_rules! register {
    ($map:expr, $name:expr, $ty:ty) => {
        $map.insert(
            $name,
            serde_json::to_value(schema_for!($ty)).unwrap_or_default(),
        );
    };
}

impl SchemaRegistry {
    /// Build a new registry containing all entity and response schemas.
    #[must_use]
    pub fn new() -> Self {
        let mut schemas = HashMap::new();

        // --- Entities ---
        register!(schemas, "task", ckl_core::entities::Task);
        register!(schemas, "task_list", Vec<ckl_core::entities::Task>);
        register!(schemas, "checklist_file", ckl_core::entities::ChecklistFile);

        // --- CLI responses ---
        register!(
            schemas,
            "checklist_summary",
            ckl_core::responses::ChecklistSummary
        );
        register!(
            schemas,
            "checklist_entry",
            ckl_core::responses::ChecklistEntry
        );
        register!(schemas, "timer_response", ckl_core::responses::TimerResponse);
        register!(schemas, "undo_response", ckl_core::responses::UndoResponse);
        register!(
            schemas,
            "import_response",
            ckl_core::responses::ImportResponse
        );
        register!(
            schemas,
            "export_response",
            ckl_core::responses::ExportResponse
        );

        Self { schemas }
    }

    /// Get a schema by name. Returns `None` if not found.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.schemas.get(name)
    }

    /// Validate a JSON value against a named schema.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::NotFound` if the schema name is unknown, or
    /// `SchemaError::ValidationFailed` if validation produces errors.
    pub fn validate(&self, name: &str, instance: &Value) -> Result<(), SchemaError> {
        let schema = self
            .get(name)
            .ok_or_else(|| SchemaError::NotFound(name.to_string()))?;

        let validator = jsonschema::validator_for(schema)
            .map_err(|e| SchemaError::Generation(format!("{e}")))?;

        let errors: Vec<String> = validator
            .iter_errors(instance)
            .map(|e| format!("{e}"))
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(SchemaError::ValidationFailed { errors })
        }
    }

    /// Validate a checklist document in either accepted shape: a full
    /// checklist file object or a bare array of task records.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::ValidationFailed` for any other top-level shape
    /// or when the document fails its schema.
    pub fn validate_checklist_document(&self, instance: &Value) -> Result<(), SchemaError> {
        match instance {
            Value::Array(_) => self.validate("task_list", instance),
            Value::Object(_) => self.validate("checklist_file", instance),
            _ => Err(SchemaError::ValidationFailed {
                errors: vec![String::from(
                    "expected a checklist object or an array of tasks",
                )],
            }),
        }
    }

    /// List all registered schema names.
    #[must_use]
    pub fn list(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.schemas.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Number of registered schemas.
    #[must_use]
    pub fn schema_count(&self) -> usize {
        self.schemas.len()
    }
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use ckl_core::entities::{ChecklistFile, Task};
    use ckl_core::enums::Priority;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn registry() -> SchemaRegistry {
        SchemaRegistry::new()
    }

    fn task_value(id: u64) -> Value {
        serde_json::to_value(Task::new(id, "Buy milk", Priority::Low, Utc::now()).unwrap())
            .unwrap()
    }

    #[test]
    fn registry_has_expected_count() {
        // 3 entities + 6 responses
        assert_eq!(registry().schema_count(), 9);
    }

    #[test]
    fn registry_list_is_sorted() {
        let names = registry().list();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        assert_eq!(names, sorted);
        assert!(names.contains(&"checklist_file"));
    }

    #[test]
    fn unknown_schema_is_not_found() {
        let err = registry().validate("nope", &json!({})).unwrap_err();
        assert!(matches!(err, SchemaError::NotFound(_)));
    }

    #[test]
    fn accepts_checklist_file_object() {
        let file = ChecklistFile::empty("work");
        let value = serde_json::to_value(file).unwrap();
        assert!(registry().validate_checklist_document(&value).is_ok());
    }

    #[test]
    fn accepts_bare_task_array() {
        let value = json!([task_value(1), task_value(2)]);
        assert!(registry().validate_checklist_document(&value).is_ok());
    }

    #[test]
    fn rejects_scalar_document() {
        let err = registry()
            .validate_checklist_document(&json!("tasks"))
            .unwrap_err();
        assert!(matches!(err, SchemaError::ValidationFailed { .. }));
    }

    #[test]
    fn rejects_task_missing_required_field() {
        let mut task = task_value(1);
        task.as_object_mut().unwrap().remove("priority");
        let err = registry()
            .validate_checklist_document(&json!([task]))
            .unwrap_err();
        assert!(matches!(err, SchemaError::ValidationFailed { .. }));
    }

    #[test]
    fn rejects_bad_priority_value() {
        let mut task = task_value(1);
        task["priority"] = json!("urgent");
        assert!(registry().validate("task", &task).is_err());
    }
}
