//! 準備工作區元件
//!
//! 依內容分類來源目錄的檔案，選取照片與影片後放入 `working/input`

mod main;
mod staging_planner;
mod video_selection;

pub use main::SetupCommand;
pub use staging_planner::{SourceInventory, StagingPlan, StagingReport};
pub use video_selection::{RetryReason, Validation, VideoSelection};
