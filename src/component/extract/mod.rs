//! 擷取影像集元件
//!
//! 兩個階段：
//! A. 檢查工作目錄並列出可用的輸入單元
//! B. 逐一把使用者選擇的單元轉成 `output/set{i}`（照片直接複製，影片依間隔取樣）

mod frame_sampler;
mod main;
mod set_extractor;

pub use frame_sampler::{FrameSampler, SampleReport, extract_video};
pub use main::ExtractCommand;
pub use set_extractor::{SetExtractor, SetOutcome};
