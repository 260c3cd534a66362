use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use ckl_config::CklConfig;
use ckl_store::{ChecklistManager, ChecklistStore, Clock, SystemClock};

use crate::cli::GlobalFlags;

/// Shared application resources initialized once at startup.
#[derive(Debug)]
pub struct AppContext {
    pub manager: ChecklistManager,
    pub config: CklConfig,
    pub data_dir: PathBuf,
}

impl AppContext {
    /// Open the checklist directory named by `--data-dir` or the config.
    pub fn init(config: CklConfig, flags: &GlobalFlags) -> anyhow::Result<Self> {
        Self::with_clock(config, flags, Arc::new(SystemClock))
    }

    pub fn with_clock(
        config: CklConfig,
        flags: &GlobalFlags,
        clock: Arc<dyn Clock>,
    ) -> anyhow::Result<Self> {
        let data_dir = match &flags.data_dir {
            Some(dir) => dir.clone(),
            None => config
                .data_dir()
                .context("failed to resolve the checklist directory")?,
        };
        let manager = ChecklistManager::open(&data_dir, clock).with_context(|| {
            format!("failed to open checklist directory {}", data_dir.display())
        })?;

        Ok(Self {
            manager,
            config,
            data_dir,
        })
    }

    /// Checklist a command operates on: `--checklist` or the active one.
    #[must_use]
    pub fn target_name(&self, flags: &GlobalFlags) -> String {
        flags
            .checklist
            .clone()
            .unwrap_or_else(|| self.manager.active_name().to_string())
    }

    pub fn store(&self, flags: &GlobalFlags) -> anyhow::Result<&ChecklistStore> {
        let name = self.target_name(flags);
        Ok(self.manager.get(&name)?)
    }

    pub fn store_mut(&mut self, flags: &GlobalFlags) -> anyhow::Result<&mut ChecklistStore> {
        let name = self.target_name(flags);
        Ok(self.manager.get_mut(&name)?)
    }

    /// `--dir` when given, else `general.export_dir` resolved against the
    /// data directory.
    #[must_use]
    pub fn export_dir(&self, dir: Option<&Path>) -> PathBuf {
        dir.map_or_else(
            || self.config.general.resolved_export_dir(&self.data_dir),
            Path::to_path_buf,
        )
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::*;
    use crate::cli::{ColorMode, OutputFormat};

    fn flags(dir: &Path, checklist: Option<&str>) -> GlobalFlags {
        GlobalFlags {
            format: OutputFormat::Json,
            quiet: true,
            verbose: false,
            data_dir: Some(dir.to_path_buf()),
            checklist: checklist.map(str::to_string),
            color: ColorMode::Never,
        }
    }

    #[test]
    fn data_dir_flag_wins_over_config() {
        let dir = TempDir::new().unwrap();
        let ctx = AppContext::init(CklConfig::default(), &flags(dir.path(), None)).unwrap();
        assert_eq!(ctx.data_dir, dir.path());
        assert_eq!(ctx.manager.active_name(), "default");
    }

    #[test]
    fn checklist_flag_targets_without_switching() {
        let dir = TempDir::new().unwrap();
        let mut ctx = AppContext::init(CklConfig::default(), &flags(dir.path(), None)).unwrap();
        ctx.manager.create("work").unwrap();

        let flags = flags(dir.path(), Some("work"));
        ctx.store_mut(&flags).unwrap().add("Write spec", ckl_core::enums::Priority::High).unwrap();

        assert_eq!(ctx.manager.active_name(), "default");
        assert_eq!(ctx.store(&flags).unwrap().len(), 1);
        assert!(ctx.manager.active().unwrap().is_empty());
    }

    #[test]
    fn unknown_checklist_flag_is_an_error() {
        let dir = TempDir::new().unwrap();
        let ctx = AppContext::init(CklConfig::default(), &flags(dir.path(), Some("nope"))).unwrap();
        let err = ctx.store(&flags(dir.path(), Some("nope"))).unwrap_err();
        assert!(err.to_string().contains("nope"));
    }

    #[test]
    fn export_dir_defaults_under_data_dir() {
        let dir = TempDir::new().unwrap();
        let ctx = AppContext::init(CklConfig::default(), &flags(dir.path(), None)).unwrap();
        assert_eq!(ctx.export_dir(None), dir.path().join("exports"));
        assert_eq!(
            ctx.export_dir(Some(Path::new("/tmp/out"))),
            PathBuf::from("/tmp/out")
        );
    }
}
