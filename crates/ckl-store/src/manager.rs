//! The set of named checklists in a data directory and which one is active.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use ckl_core::entities::ChecklistFile;
use ckl_core::errors::CoreError;
use ckl_core::responses::{ChecklistEntry, ImportResponse};
use ckl_schema::SchemaRegistry;

use crate::clock::Clock;
use crate::error::{ErrorKind, StoreError};
use crate::import::parse_external;
use crate::persist::set_aside;
use crate::state::ManagerState;
use crate::store::{ChecklistStore, checklist_path};

/// Name of the checklist created when a data directory holds none.
pub const DEFAULT_CHECKLIST: &str = "default";

/// Owns every checklist in a data directory. Exactly one is active at a time.
#[derive(Debug)]
pub struct ChecklistManager {
    data_dir: PathBuf,
    checklists: BTreeMap<String, ChecklistStore>,
    active: String,
    clock: Arc<dyn Clock>,
    schema: SchemaRegistry,
}

impl ChecklistManager {
    /// Load every `*.json` checklist in `data_dir`, creating the directory
    /// and an empty `default` checklist as needed.
    ///
    /// Files that fail to load are skipped with a warning. Files that are not
    /// valid checklists are renamed to `<name>.json.bad` so no later write
    /// replaces them.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if the directory cannot be created or listed.
    pub fn open(data_dir: &Path, clock: Arc<dyn Clock>) -> Result<Self, StoreError> {
        fs::create_dir_all(data_dir).map_err(|e| StoreError::io(data_dir, e))?;

        let mut checklists = BTreeMap::new();
        let entries = fs::read_dir(data_dir).map_err(|e| StoreError::io(data_dir, e))?;
        for entry in entries {
            let path = entry.map_err(|e| StoreError::io(data_dir, e))?.path();
            if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            match ChecklistStore::open(data_dir, name, clock.clone()) {
                Ok(store) => {
                    checklists.insert(name.to_string(), store);
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "skipping unreadable checklist");
                    if e.kind() == ErrorKind::Format {
                        if let Err(err) = set_aside(&path) {
                            tracing::warn!(path = %path.display(), error = %err, "could not set aside checklist");
                        }
                    }
                }
            }
        }

        let state = match ManagerState::load(data_dir) {
            Ok(state) => state,
            Err(e) => {
                tracing::warn!(error = %e, "ignoring unreadable manager state");
                ManagerState::default()
            }
        };

        let mut manager = Self {
            data_dir: data_dir.to_path_buf(),
            checklists,
            active: String::new(),
            clock,
            schema: SchemaRegistry::new(),
        };

        match state.active.filter(|name| manager.checklists.contains_key(name)) {
            Some(name) => manager.active = name,
            None => manager.activate_fallback()?,
        }

        tracing::debug!(
            data_dir = %manager.data_dir.display(),
            checklists = manager.checklists.len(),
            active = %manager.active,
            "opened checklist manager"
        );
        Ok(manager)
    }

    #[must_use]
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Checklist names in sorted order.
    #[must_use]
    pub fn list(&self) -> Vec<String> {
        self.checklists.keys().cloned().collect()
    }

    #[must_use]
    pub fn entries(&self) -> Vec<ChecklistEntry> {
        self.checklists
            .iter()
            .map(|(name, store)| ChecklistEntry {
                name: name.clone(),
                active: *name == self.active,
                total: store.len(),
                completed: store.tasks().iter().filter(|t| t.completed).count(),
            })
            .collect()
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.checklists.contains_key(name)
    }

    #[must_use]
    pub fn active_name(&self) -> &str {
        &self.active
    }

    /// # Errors
    ///
    /// Returns `NotFound` if the active checklist has disappeared, which the
    /// manager never allows.
    pub fn active(&self) -> Result<&ChecklistStore, StoreError> {
        self.get(&self.active)
    }

    /// # Errors
    ///
    /// Same as [`Self::active`].
    pub fn active_mut(&mut self) -> Result<&mut ChecklistStore, StoreError> {
        let name = self.active.clone();
        self.get_mut(&name)
    }

    /// # Errors
    ///
    /// Returns `NotFound` for an unknown name.
    pub fn get(&self, name: &str) -> Result<&ChecklistStore, StoreError> {
        self.checklists
            .get(name)
            .ok_or_else(|| CoreError::checklist_not_found(name).into())
    }

    /// # Errors
    ///
    /// Returns `NotFound` for an unknown name.
    pub fn get_mut(&mut self, name: &str) -> Result<&mut ChecklistStore, StoreError> {
        self.checklists
            .get_mut(name)
            .ok_or_else(|| CoreError::checklist_not_found(name).into())
    }

    /// Create an empty checklist. The active checklist does not change.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an unusable name, `Conflict` if the
    /// name is taken, and `Io` if the file cannot be written.
    pub fn create(&mut self, name: &str) -> Result<&ChecklistStore, StoreError> {
        let name = validate_name(name)?;
        self.ensure_free(name)?;
        let store = ChecklistStore::create(&self.data_dir, name, self.clock.clone())?;
        tracing::info!(name, "created checklist");
        Ok(self.checklists.entry(name.to_string()).or_insert(store))
    }

    /// Make `name` the active checklist.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown name and `Io` if the state file
    /// cannot be written.
    pub fn switch(&mut self, name: &str) -> Result<(), StoreError> {
        if !self.checklists.contains_key(name) {
            return Err(CoreError::checklist_not_found(name).into());
        }
        self.active = name.to_string();
        self.save_state()?;
        tracing::debug!(name, "switched checklist");
        Ok(())
    }

    /// Import an external JSON checklist under its file stem or `name`, and
    /// make it active. On error the set of checklists is unchanged.
    ///
    /// # Errors
    ///
    /// Returns `Io` if the file cannot be read, `Format` if it is not a valid
    /// checklist document, `Conflict` if the name is taken, and a validation
    /// error if no usable name can be derived.
    pub fn import_external(
        &mut self,
        path: &Path,
        name: Option<&str>,
    ) -> Result<ImportResponse, StoreError> {
        let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or_default();
        let name = validate_name(name.unwrap_or(stem))?.to_string();
        self.ensure_free(&name)?;

        let file = parse_external(path, &name, &self.schema)?;
        let tasks = file.tasks.len();
        self.insert_and_activate(file)?;
        tracing::info!(name = %name, tasks, source = %path.display(), "imported checklist");

        Ok(ImportResponse {
            name,
            tasks,
            source: path.display().to_string(),
        })
    }

    /// Delete a checklist's files. If it was active, the first remaining
    /// checklist becomes active, or a fresh `default` when none remain.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown name and `Io` if a file cannot be
    /// removed.
    pub fn delete(&mut self, name: &str) -> Result<(), StoreError> {
        let store = self.get(name)?;
        store.remove_files()?;
        self.checklists.remove(name);
        tracing::info!(name, "deleted checklist");

        if self.active == name {
            self.activate_fallback()?;
        }
        Ok(())
    }

    /// Delete every checklist and start over with an empty `default`.
    /// Returns how many checklists were removed.
    ///
    /// # Errors
    ///
    /// Returns `Io` if a file cannot be removed or the new default cannot be
    /// written.
    pub fn delete_all(&mut self) -> Result<usize, StoreError> {
        let removed = self.checklists.len();
        for store in self.checklists.values() {
            store.remove_files()?;
        }
        self.checklists.clear();
        tracing::info!(removed, "deleted all checklists");
        self.activate_fallback()?;
        Ok(removed)
    }

    /// A name is free when it is neither loaded nor present on disk.
    fn ensure_free(&self, name: &str) -> Result<(), StoreError> {
        if self.checklists.contains_key(name) || checklist_path(&self.data_dir, name).exists() {
            return Err(StoreError::Conflict {
                name: name.to_string(),
            });
        }
        Ok(())
    }

    fn insert_and_activate(&mut self, file: ChecklistFile) -> Result<(), StoreError> {
        let name = file.name.clone();
        let store = ChecklistStore::from_file(&self.data_dir, file, self.clock.clone())?;
        self.checklists.insert(name.clone(), store);
        self.active = name;
        self.save_state()
    }

    /// Activate the first checklist, creating `default` if there is none.
    fn activate_fallback(&mut self) -> Result<(), StoreError> {
        let Some(first) = self.checklists.keys().next().cloned() else {
            tracing::info!("no checklists found, creating {DEFAULT_CHECKLIST}");
            let path = checklist_path(&self.data_dir, DEFAULT_CHECKLIST);
            if path.exists() {
                set_aside(&path)?;
            }
            return self.insert_and_activate(ChecklistFile::empty(DEFAULT_CHECKLIST));
        };
        self.active = first;
        self.save_state()
    }

    fn save_state(&self) -> Result<(), StoreError> {
        ManagerState {
            active: Some(self.active.clone()),
        }
        .save(&self.data_dir)
    }
}

/// Checklist names become file names, so they must be non-empty, must not
/// start with `.`, and must not contain path separators.
fn validate_name(name: &str) -> Result<&str, StoreError> {
    let name = name.trim();
    if name.is_empty() || name.starts_with('.') || name.contains(['/', '\\']) {
        return Err(CoreError::Validation(format!("invalid checklist name '{name}'")).into());
    }
    Ok(name)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use tempfile::TempDir;

    use super::*;
    use crate::clock::SystemClock;

    fn open(dir: &TempDir) -> ChecklistManager {
        ChecklistManager::open(dir.path(), Arc::new(SystemClock)).unwrap()
    }

    #[test]
    fn empty_dir_gets_default_checklist() {
        let dir = TempDir::new().expect("tempdir should create");
        let manager = open(&dir);
        assert_eq!(manager.list(), vec![DEFAULT_CHECKLIST.to_string()]);
        assert_eq!(manager.active_name(), DEFAULT_CHECKLIST);
        assert!(dir.path().join("default.json").exists());
    }

    #[test]
    fn create_then_switch() {
        let dir = TempDir::new().expect("tempdir should create");
        let mut manager = open(&dir);
        manager.create("work").unwrap();
        assert_eq!(manager.active_name(), DEFAULT_CHECKLIST);
        manager.switch("work").unwrap();
        assert_eq!(manager.active().unwrap().name(), "work");
        assert_eq!(manager.list(), vec!["default".to_string(), "work".to_string()]);
    }

    #[test]
    fn create_existing_is_conflict() {
        let dir = TempDir::new().expect("tempdir should create");
        let mut manager = open(&dir);
        let err = manager.create("default").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);
    }

    #[rstest]
    #[case("")]
    #[case(".hidden")]
    #[case("a/b")]
    #[case("..\\up")]
    fn bad_names_are_rejected(#[case] name: &str) {
        let dir = TempDir::new().expect("tempdir should create");
        let mut manager = open(&dir);
        assert_eq!(manager.create(name).unwrap_err().kind(), ErrorKind::Validation);
    }

    #[test]
    fn switch_unknown_is_not_found() {
        let dir = TempDir::new().expect("tempdir should create");
        let mut manager = open(&dir);
        assert_eq!(manager.switch("nope").unwrap_err().kind(), ErrorKind::NotFound);
        assert_eq!(manager.active_name(), DEFAULT_CHECKLIST);
    }

    #[test]
    fn active_checklist_survives_reopen() {
        let dir = TempDir::new().expect("tempdir should create");
        let mut manager = open(&dir);
        manager.create("work").unwrap();
        manager.switch("work").unwrap();
        drop(manager);
        assert_eq!(open(&dir).active_name(), "work");
    }

    #[test]
    fn malformed_files_are_skipped() {
        let dir = TempDir::new().expect("tempdir should create");
        fs::write(dir.path().join("broken.json"), "{").unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();
        let manager = open(&dir);
        assert_eq!(manager.list(), vec![DEFAULT_CHECKLIST.to_string()]);
        assert_eq!(fs::read_to_string(dir.path().join("broken.json.bad")).unwrap(), "{");
        assert!(!dir.path().join("broken.json").exists());
    }

    #[test]
    fn unparseable_default_is_set_aside_not_overwritten() {
        let dir = TempDir::new().expect("tempdir should create");
        let legacy = r#"[{"task":"Buy milk","completed":false}]"#;
        fs::write(dir.path().join("default.json"), legacy).unwrap();

        let manager = open(&dir);
        assert!(manager.active().unwrap().is_empty());
        assert_eq!(fs::read_to_string(dir.path().join("default.json.bad")).unwrap(), legacy);
    }

    #[test]
    fn create_refuses_a_file_already_on_disk() {
        let dir = TempDir::new().expect("tempdir should create");
        let mut manager = open(&dir);
        let path = dir.path().join("work.json");
        fs::write(&path, "{ hand edited").unwrap();

        assert_eq!(manager.create("work").unwrap_err().kind(), ErrorKind::Conflict);
        assert_eq!(fs::read_to_string(&path).unwrap(), "{ hand edited");
        assert!(!manager.contains("work"));
    }

    #[test]
    fn import_refuses_a_file_already_on_disk() {
        let dir = TempDir::new().expect("tempdir should create");
        let mut manager = open(&dir);
        let taken = dir.path().join("work.json");
        fs::write(&taken, "{ hand edited").unwrap();
        let source = dir.path().join("source.json");
        fs::write(&source, "[]").unwrap();

        let err = manager.import_external(&source, Some("work")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert_eq!(fs::read_to_string(&taken).unwrap(), "{ hand edited");
        assert_eq!(manager.active_name(), DEFAULT_CHECKLIST);
    }

    #[test]
    fn fallback_sets_aside_a_foreign_default() {
        let dir = TempDir::new().expect("tempdir should create");
        let mut manager = open(&dir);
        manager.create("work").unwrap();
        manager.switch("work").unwrap();
        manager.delete(DEFAULT_CHECKLIST).unwrap();
        fs::write(dir.path().join("default.json"), "{ hand edited").unwrap();

        manager.delete("work").unwrap();
        assert_eq!(manager.active_name(), DEFAULT_CHECKLIST);
        assert!(manager.active().unwrap().is_empty());
        assert_eq!(
            fs::read_to_string(dir.path().join("default.json.bad")).unwrap(),
            "{ hand edited"
        );
    }

    #[test]
    fn deleting_active_falls_back() {
        let dir = TempDir::new().expect("tempdir should create");
        let mut manager = open(&dir);
        manager.create("work").unwrap();
        manager.switch("work").unwrap();
        manager.delete("work").unwrap();
        assert_eq!(manager.active_name(), DEFAULT_CHECKLIST);
        assert!(!dir.path().join("work.json").exists());

        manager.delete(DEFAULT_CHECKLIST).unwrap();
        assert_eq!(manager.list(), vec![DEFAULT_CHECKLIST.to_string()]);
        assert!(manager.active().unwrap().is_empty());
    }

    #[test]
    fn delete_all_leaves_fresh_default() {
        let dir = TempDir::new().expect("tempdir should create");
        let mut manager = open(&dir);
        manager
            .active_mut()
            .unwrap()
            .add("kept?", ckl_core::enums::Priority::Low)
            .unwrap();
        manager.create("a").unwrap();
        manager.create("b").unwrap();
        assert_eq!(manager.delete_all().unwrap(), 3);
        assert_eq!(manager.list(), vec![DEFAULT_CHECKLIST.to_string()]);
        assert!(manager.active().unwrap().is_empty());
        assert!(!dir.path().join("a.json").exists());
    }

    #[test]
    fn entries_report_counts_and_active_flag() {
        let dir = TempDir::new().expect("tempdir should create");
        let mut manager = open(&dir);
        let store = manager.active_mut().unwrap();
        store.add("one", ckl_core::enums::Priority::Low).unwrap();
        store.complete(1).unwrap();
        manager.create("other").unwrap();

        let entries = manager.entries();
        assert_eq!(
            entries,
            vec![
                ChecklistEntry {
                    name: String::from("default"),
                    active: true,
                    total: 1,
                    completed: 1,
                },
                ChecklistEntry {
                    name: String::from("other"),
                    active: false,
                    total: 0,
                    completed: 0,
                },
            ]
        );
    }
}
