//! 逐一確認使用者輸入的影片
//!
//! 核心不持有輸入迴圈：前端每取得一個候選路徑就呼叫 `offer`，
//! 被拒絕的候選不會佔用名額，湊滿後呼叫 `finalize`

use rust_i18n::t;
use crate::error::{PipelineError, Result};
use crate::tools::is_video;
use log::{debug, info};
use std::fmt;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryReason {
    NotFound,
    NotAFile,
    NotAVideo,
    AlreadySelected,
    SelectionComplete,
}

impl fmt::Display for RetryReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            Self::NotFound => t!("retry.not_found"),
            Self::NotAFile => t!("retry.not_a_file"),
            Self::NotAVideo => t!("retry.not_a_video"),
            Self::AlreadySelected => t!("retry.already_selected"),
            Self::SelectionComplete => t!("retry.selection_complete"),
        };
        f.write_str(&message)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation {
    Accepted(PathBuf),
    Retry(RetryReason),
}

#[derive(Debug, Clone)]
pub struct VideoSelection {
    source: PathBuf,
    target: usize,
    selected: Vec<PathBuf>,
}

impl VideoSelection {
    pub(super) fn new(source: &Path, target: usize, available: usize) -> Result<Self> {
        if target > available {
            return Err(PipelineError::InvalidCount {
                requested: target,
                max: available,
            });
        }

        Ok(Self {
            source: source.to_path_buf(),
            target,
            selected: Vec::with_capacity(target),
        })
    }

    #[must_use]
    pub const fn target(&self) -> usize {
        self.target
    }

    #[must_use]
    pub fn selected(&self) -> &[PathBuf] {
        &self.selected
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.target - self.selected.len()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.remaining() == 0
    }

    /// 檢查候選路徑（相對路徑以來源目錄為基準），不改變選擇狀態
    #[must_use]
    pub fn validate(&self, candidate: &str) -> Validation {
        if self.is_complete() {
            return Validation::Retry(RetryReason::SelectionComplete);
        }

        let path = self.resolve(candidate);
        if !path.exists() {
            return Validation::Retry(RetryReason::NotFound);
        }
        if !path.is_file() {
            return Validation::Retry(RetryReason::NotAFile);
        }
        if !is_video(&path) {
            return Validation::Retry(RetryReason::NotAVideo);
        }
        if self.selected.contains(&path) {
            return Validation::Retry(RetryReason::AlreadySelected);
        }

        Validation::Accepted(path)
    }

    /// 檢查並在通過時加入選擇
    pub fn offer(&mut self, candidate: &str) -> Validation {
        let validation = self.validate(candidate);
        match &validation {
            Validation::Accepted(path) => {
                debug!("選取影片 {}: {}", self.selected.len(), path.display());
                self.selected.push(path.clone());
            }
            Validation::Retry(reason) => debug!("拒絕候選影片 '{candidate}': {reason}"),
        }
        validation
    }

    /// 取得依選擇順序排列的影片，數量必須剛好等於目標
    pub fn finalize(self) -> Result<Vec<PathBuf>> {
        if !self.is_complete() {
            return Err(PipelineError::IncompleteSelection {
                selected: self.selected.len(),
                expected: self.target,
            });
        }
        info!("已選擇 {} 支影片", self.selected.len());
        Ok(self.selected)
    }

    fn resolve(&self, candidate: &str) -> PathBuf {
        let candidate = Path::new(candidate.trim());
        if candidate.is_absolute() {
            candidate.to_path_buf()
        } else {
            self.source.join(candidate)
        }
    }
}
