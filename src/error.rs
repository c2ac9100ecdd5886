//! 影像擷取流程的錯誤型別
//!
//! 每一種錯誤都帶有造成問題的路徑或步驟名稱，讓前端可以直接顯示給使用者

use rust_i18n::t;
use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// 必須先執行的指令
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Config,
    Setup,
}

impl Step {
    #[must_use]
    pub const fn command_name(self) -> &'static str {
        match self {
            Self::Config => "config",
            Self::Setup => "setup",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.command_name())
    }
}

/// 目錄設定失敗的原因
#[derive(Debug, Error)]
pub enum ConfigIssue {
    NotFound,
    NotEmpty,
    Empty,
    Unknown,
    Create(#[source] io::Error),
}

impl fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => f.write_str(&t!("error.issue.not_found")),
            Self::NotEmpty => f.write_str(&t!("error.issue.not_empty")),
            Self::Empty => f.write_str(&t!("error.issue.empty")),
            Self::Unknown => f.write_str(&t!("error.issue.unknown")),
            Self::Create(e) => f.write_str(&t!("error.issue.create", error = e)),
        }
    }
}

/// 訊息依目前語系產生，見 `locales/`
#[derive(Debug, Error)]
pub enum PipelineError {
    Config { path: PathBuf, issue: ConfigIssue },

    Precondition { step: Step, detail: String },

    Transfer {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },

    Decode { path: PathBuf, message: String },

    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    Pattern { pattern: String, message: String },

    UnitUnavailable { name: String },

    InvalidCount { requested: usize, max: usize },

    IncompleteSelection { selected: usize, expected: usize },

    InvalidStride,
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            Self::Config { path, issue } => {
                t!("error.config", issue = issue, path = path.display())
            }
            Self::Precondition { step, detail } => {
                t!("error.precondition", step = step, detail = detail)
            }
            Self::Transfer { from, to, source } => t!(
                "error.transfer",
                from = from.display(),
                to = to.display(),
                error = source
            ),
            Self::Decode { path, message } => {
                t!("error.decode", path = path.display(), message = message)
            }
            Self::Io { path, source } => t!("error.io", path = path.display(), error = source),
            Self::Pattern { pattern, message } => {
                t!("error.pattern", pattern = pattern, message = message)
            }
            Self::UnitUnavailable { name } => t!("error.unit_unavailable", name = name),
            Self::InvalidCount { requested, max } => {
                t!("error.invalid_count", requested = requested, max = max)
            }
            Self::IncompleteSelection { selected, expected } => t!(
                "error.incomplete_selection",
                selected = selected,
                expected = expected
            ),
            Self::InvalidStride => t!("error.invalid_stride"),
        };
        f.write_str(&message)
    }
}

impl PipelineError {
    pub(crate) fn config(path: impl Into<PathBuf>, issue: ConfigIssue) -> Self {
        Self::Config {
            path: path.into(),
            issue,
        }
    }

    pub(crate) fn precondition(step: Step, detail: impl Into<String>) -> Self {
        Self::Precondition {
            step,
            detail: detail.into(),
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn decode(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Decode {
            path: path.into(),
            message: message.into(),
        }
    }

    /// 互動前端可以重新詢問使用者、不需中止整個指令的錯誤
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::Pattern { .. } | Self::UnitUnavailable { .. } | Self::InvalidCount { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, PipelineError>;
