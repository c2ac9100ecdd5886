//! 工作目錄設定與檢查
//!
//! 只會建立目錄，不會刪除或覆寫任何檔案

use rust_i18n::t;
use crate::config::types::WorkspaceConfig;
use crate::error::{ConfigIssue, PipelineError, Result, Step};
use crate::tools::is_directory_empty;
use log::{info, warn};
use std::fs;
use std::path::{Path, PathBuf};

impl WorkspaceConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// 設定工作目錄：不存在則建立，存在則必須是空目錄
    pub fn set_working(&mut self, path: &Path) -> Result<&Path> {
        let path = resolve(path)?;
        match path.try_exists() {
            Ok(false) => {
                info!("建立工作目錄: {}", path.display());
                fs::create_dir_all(&path)
                    .map_err(|e| PipelineError::config(&path, ConfigIssue::Create(e)))?;
            }
            Ok(true) if path.is_dir() => match is_directory_empty(&path) {
                Ok(true) => info!("設定工作目錄: {}", path.display()),
                Ok(false) => {
                    warn!("工作目錄不是空的: {}", path.display());
                    return Err(PipelineError::config(path, ConfigIssue::NotEmpty));
                }
                Err(_) => return Err(PipelineError::config(path, ConfigIssue::Unknown)),
            },
            _ => return Err(PipelineError::config(path, ConfigIssue::Unknown)),
        }

        Ok(self.working.insert(path).as_path())
    }

    /// 設定來源目錄：必須已存在且不是空的
    pub fn set_source(&mut self, path: &Path) -> Result<&Path> {
        let path = resolve(path)?;
        match path.try_exists() {
            Ok(false) => return Err(PipelineError::config(path, ConfigIssue::NotFound)),
            Ok(true) if path.is_dir() => match is_directory_empty(&path) {
                Ok(false) => info!("設定來源目錄: {}", path.display()),
                Ok(true) => return Err(PipelineError::config(path, ConfigIssue::Empty)),
                Err(_) => return Err(PipelineError::config(path, ConfigIssue::Unknown)),
            },
            _ => return Err(PipelineError::config(path, ConfigIssue::Unknown)),
        }

        Ok(self.source.insert(path).as_path())
    }

    /// 設定輸出目錄：不存在則建立，已存在的目錄直接接受
    pub fn set_dest(&mut self, path: &Path) -> Result<&Path> {
        let path = resolve(path)?;
        match path.try_exists() {
            Ok(false) => {
                info!("建立輸出目錄: {}", path.display());
                fs::create_dir_all(&path)
                    .map_err(|e| PipelineError::config(&path, ConfigIssue::Create(e)))?;
            }
            Ok(true) if path.is_dir() => info!("設定輸出目錄: {}", path.display()),
            _ => return Err(PipelineError::config(path, ConfigIssue::Unknown)),
        }

        Ok(self.dest.insert(path).as_path())
    }

    #[must_use]
    pub fn working(&self) -> Option<&Path> {
        self.working.as_deref()
    }

    #[must_use]
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    #[must_use]
    pub fn dest(&self) -> Option<&Path> {
        self.dest.as_deref()
    }

    pub fn require_working(&self) -> Result<&Path> {
        self.working()
            .ok_or_else(|| PipelineError::precondition(Step::Config, t!("detail.working_unset")))
    }

    pub fn require_source(&self) -> Result<&Path> {
        self.source()
            .ok_or_else(|| PipelineError::precondition(Step::Config, t!("detail.source_unset")))
    }
}

fn resolve(path: &Path) -> Result<PathBuf> {
    std::path::absolute(path).map_err(|_| PipelineError::config(path, ConfigIssue::Unknown))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_set_working_creates_missing_directory() {
        let temp_dir = TempDir::new().unwrap();
        let working = temp_dir.path().join("nested/work");

        let mut config = WorkspaceConfig::new();
        let accepted = config.set_working(&working).unwrap().to_path_buf();

        assert!(working.is_dir());
        assert_eq!(accepted, working);
        assert_eq!(config.working(), Some(working.as_path()));
    }

    #[test]
    fn test_set_working_accepts_empty_directory() {
        let temp_dir = TempDir::new().unwrap();

        let mut config = WorkspaceConfig::new();
        config.set_working(temp_dir.path()).unwrap();

        assert_eq!(config.working(), Some(temp_dir.path()));
    }

    #[test]
    fn test_set_working_rejects_non_empty_directory() {
        let temp_dir = TempDir::new().unwrap();
        let marker = temp_dir.path().join("keep.txt");
        fs::write(&marker, "keep").unwrap();

        let mut config = WorkspaceConfig::new();
        let err = config.set_working(temp_dir.path()).unwrap_err();

        assert!(matches!(
            err,
            PipelineError::Config {
                issue: ConfigIssue::NotEmpty,
                ..
            }
        ));
        assert!(config.working().is_none());
        assert_eq!(fs::read_to_string(&marker).unwrap(), "keep");
    }

    #[test]
    fn test_set_working_rejects_file() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("file.txt");
        fs::write(&file, "x").unwrap();

        let mut config = WorkspaceConfig::new();
        let err = config.set_working(&file).unwrap_err();

        assert!(matches!(
            err,
            PipelineError::Config {
                issue: ConfigIssue::Unknown,
                ..
            }
        ));
    }

    #[test]
    fn test_set_source_rules() {
        let temp_dir = TempDir::new().unwrap();
        let mut config = WorkspaceConfig::new();

        let missing = temp_dir.path().join("missing");
        assert!(matches!(
            config.set_source(&missing).unwrap_err(),
            PipelineError::Config {
                issue: ConfigIssue::NotFound,
                ..
            }
        ));
        assert!(!missing.exists());

        let empty = temp_dir.path().join("empty");
        fs::create_dir(&empty).unwrap();
        assert!(matches!(
            config.set_source(&empty).unwrap_err(),
            PipelineError::Config {
                issue: ConfigIssue::Empty,
                ..
            }
        ));

        let full = temp_dir.path().join("full");
        fs::create_dir(&full).unwrap();
        fs::write(full.join("a.jpg"), "a").unwrap();
        config.set_source(&full).unwrap();
        assert_eq!(config.source(), Some(full.as_path()));
    }

    #[test]
    fn test_set_dest_creates_or_accepts() {
        let temp_dir = TempDir::new().unwrap();
        let mut config = WorkspaceConfig::new();

        let dest = temp_dir.path().join("dest");
        config.set_dest(&dest).unwrap();
        assert!(dest.is_dir());

        fs::write(dest.join("existing.jpg"), "x").unwrap();
        config.set_dest(&dest).unwrap();
        assert_eq!(config.dest(), Some(dest.as_path()));
    }

    #[test]
    fn test_require_paths_name_config_step() {
        let config = WorkspaceConfig::new();

        let err = config.require_working().unwrap_err();
        assert!(matches!(
            err,
            PipelineError::Precondition {
                step: Step::Config,
                ..
            }
        ));
        assert!(config.require_source().is_err());
    }
}
