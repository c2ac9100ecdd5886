use crate::error::{ConfigIssue, PipelineError, Result};
use std::fs;
use std::io;
use std::path::Path;

pub fn is_directory_empty(path: &Path) -> io::Result<bool> {
    Ok(fs::read_dir(path)?.next().is_none())
}

/// 要寫入的目錄必須不存在或是空目錄，避免與先前的執行結果混在一起
pub fn ensure_vacant_directory(path: &Path) -> Result<()> {
    if !path.exists() {
        return Ok(());
    }
    if !path.is_dir() {
        return Err(PipelineError::config(path, ConfigIssue::Unknown));
    }
    match is_directory_empty(path) {
        Ok(true) => Ok(()),
        Ok(false) => Err(PipelineError::config(path, ConfigIssue::NotEmpty)),
        Err(e) => Err(PipelineError::io(path, e)),
    }
}

pub fn ensure_directory_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path).map_err(|e| PipelineError::io(path, e))?;
    }
    Ok(())
}
