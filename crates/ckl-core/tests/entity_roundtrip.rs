//! Serde roundtrip and JsonSchema validation tests for the entity and response types.

use chrono::{TimeZone, Utc};
use schemars::schema_for;
use ckl_core::entities::*;
use ckl_core::enums::*;
use ckl_core::responses::*;

/// Validate a JSON value against a schemars-generated schema.
fn validate_against_schema(
    schema: &serde_json::Value,
    instance: &serde_json::Value,
) -> Vec<String> {
    let validator = jsonschema::validator_for(schema).expect("schema should be valid");
    validator
        .iter_errors(instance)
        .map(|e| format!("{e}"))
        .collect()
}

macro_rules! roundtrip_and_validate {
    ($name:ident, $ty:ty, $instance:expr) => {
        #[test]
        fn $name() {
            let val: $ty = $instance;

            // Serde roundtrip
            let json_str = serde_json::to_string_pretty(&val).unwrap();
            let recovered: $ty = serde_json::from_str(&json_str).unwrap();
            assert_eq!(
                recovered,
                val,
                "serde roundtrip failed for {}",
                stringify!($ty)
            );

            // Schema validation
            let schema = serde_json::to_value(schema_for!($ty)).unwrap();
            let instance = serde_json::to_value(&val).unwrap();
            let errors = validate_against_schema(&schema, &instance);
            assert!(
                errors.is_empty(),
                "Schema validation failed for {}: {:?}",
                stringify!($ty),
                errors
            );
        }
    };
}

fn sample_task(id: u64) -> Task {
    let now = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
    let mut task = Task::new(id, "Write spec", Priority::High, now).unwrap();
    task.set_progress(50, now).unwrap();
    task.elapsed_ms = 90_000;
    task
}

roundtrip_and_validate!(task_roundtrip, Task, sample_task(1));

roundtrip_and_validate!(task_with_running_timer_roundtrip, Task, {
    let mut task = sample_task(2);
    task.start_timer(Utc.with_ymd_and_hms(2026, 3, 1, 13, 0, 0).unwrap())
        .unwrap();
    task
});

roundtrip_and_validate!(
    checklist_file_roundtrip,
    ChecklistFile,
    ChecklistFile::from_tasks("work", vec![sample_task(1), sample_task(4)]).unwrap()
);

roundtrip_and_validate!(
    summary_roundtrip,
    ChecklistSummary,
    ChecklistSummary {
        name: "work".into(),
        total: 4,
        completed: 1,
        in_progress: 2,
        todo: 1,
        percent_complete: 25,
        elapsed_ms: 12_000,
    }
);

roundtrip_and_validate!(
    undo_response_roundtrip,
    UndoResponse,
    UndoResponse {
        checklist: "work".into(),
        undone: Some(Action::Complete),
    }
);

roundtrip_and_validate!(
    import_response_roundtrip,
    ImportResponse,
    ImportResponse {
        name: "groceries".into(),
        tasks: 3,
        source: "/tmp/groceries.json".into(),
    }
);

#[test]
fn task_schema_rejects_progress_above_hundred() {
    let schema = serde_json::to_value(schema_for!(Task)).unwrap();
    let mut instance = serde_json::to_value(sample_task(1)).unwrap();
    instance["progress"] = serde_json::json!(150);
    assert!(!validate_against_schema(&schema, &instance).is_empty());
}

#[test]
fn task_schema_rejects_missing_title() {
    let schema = serde_json::to_value(schema_for!(Task)).unwrap();
    let mut instance = serde_json::to_value(sample_task(1)).unwrap();
    instance.as_object_mut().unwrap().remove("title");
    assert!(!validate_against_schema(&schema, &instance).is_empty());
}

#[test]
fn task_deserialization_rejects_unknown_fields() {
    let mut instance = serde_json::to_value(sample_task(1)).unwrap();
    instance["start_time"] = serde_json::json!(0);
    assert!(serde_json::from_value::<Task>(instance).is_err());
}

#[test]
fn enum_values_are_snake_case_on_disk() {
    let json = serde_json::to_value(sample_task(1)).unwrap();
    assert_eq!(json["priority"], "high");
    assert_eq!(json["status"], "in_progress");
}
