use rust_i18n::t;
use serde::Deserialize;
use std::fmt;
use std::path::PathBuf;

pub const DEFAULT_STRIDE: usize = 30;

/// ISO-BMFF `ftyp` 品牌表，用於區分 HEIC/AVIF 等靜態影像與 MP4/MOV 等影片
#[derive(Debug, Clone, Deserialize)]
pub struct FtypBrandTable {
    #[serde(rename = "IMAGE_BRAND")]
    pub image_brand: Vec<String>,
    #[serde(rename = "VIDEO_BRAND")]
    pub video_brand: Vec<String>,
}

impl FtypBrandTable {
    #[must_use]
    pub fn is_image_brand(&self, brand: &[u8]) -> bool {
        self.image_brand.iter().any(|b| b.as_bytes() == brand)
    }

    #[must_use]
    pub fn is_video_brand(&self, brand: &[u8]) -> bool {
        self.video_brand.iter().any(|b| b.as_bytes() == brand)
    }
}

/// 從來源搬到工作目錄時使用的方式，整次 setup 只會用一種
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TransferMode {
    #[default]
    Copy,
    Move,
}

impl fmt::Display for TransferMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Copy => f.write_str(&t!("transfer_mode.copy")),
            Self::Move => f.write_str(&t!("transfer_mode.move")),
        }
    }
}

/// 介面語系，對應 `locales/` 中的檔名
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Language {
    EnUs,
    #[default]
    ZhTw,
}

impl Language {
    pub const ALL: [Self; 2] = [Self::EnUs, Self::ZhTw];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::EnUs => "en-US",
            Self::ZhTw => "zh-TW",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EnUs => write!(f, "English"),
            Self::ZhTw => write!(f, "繁體中文"),
        }
    }
}

/// 工作階段使用的三個目錄
///
/// 只能透過 `set_*` 方法設定，設定時即完成檢查，存放的一律是絕對路徑
#[derive(Debug, Clone, Default)]
pub struct WorkspaceConfig {
    pub(super) source: Option<PathBuf>,
    pub(super) working: Option<PathBuf>,
    /// 保留欄位：目前 extract 一律寫入 `working/output`
    pub(super) dest: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy)]
pub struct ExtractorSettings {
    pub stride: usize,
    pub transfer_mode: TransferMode,
    pub language: Language,
}

impl Default for ExtractorSettings {
    fn default() -> Self {
        Self {
            stride: DEFAULT_STRIDE,
            transfer_mode: TransferMode::default(),
            language: Language::default(),
        }
    }
}

/// 只存在記憶體中的工作階段狀態，明確傳入每個指令
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub workspace: WorkspaceConfig,
    pub settings: ExtractorSettings,
}
