//! 工作目錄的檔案配置
//!
//! ```text
//! working/input/images/*            暫存的照片（平面）
//! working/input/video{i}/<影片>      每個目錄剛好一支影片
//! working/output/set{i}/*            每次選擇產生的影像集
//! ```

use regex::Regex;
use std::cmp::Ordering;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

pub const INPUT_DIR: &str = "input";
pub const OUTPUT_DIR: &str = "output";
pub const IMAGES_UNIT: &str = "images";
pub const VIDEO_UNIT_PREFIX: &str = "video";
pub const SET_PREFIX: &str = "set";
pub const FRAME_EXTENSION: &str = "jpg";

static REGEX_VIDEO_INDEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^video(\d+)$").expect("Invalid regex"));

#[must_use]
pub fn input_dir(working: &Path) -> PathBuf {
    working.join(INPUT_DIR)
}

#[must_use]
pub fn output_dir(working: &Path) -> PathBuf {
    working.join(OUTPUT_DIR)
}

#[must_use]
pub fn video_unit_name(index: usize) -> String {
    format!("{VIDEO_UNIT_PREFIX}{index}")
}

#[must_use]
pub fn set_name(index: usize) -> String {
    format!("{SET_PREFIX}{index}")
}

/// 取樣輸出的檔名：`00000.jpg`、`00001.jpg`…
#[must_use]
pub fn frame_file_name(index: usize) -> String {
    format!("{index:05}.{FRAME_EXTENSION}")
}

/// `input/` 底下的一個暫存單元
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum InputUnit {
    Images,
    Video(String),
}

impl InputUnit {
    /// 只接受 `images` 與 `video{j}`（`j` 為數字）
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        if name == IMAGES_UNIT {
            Some(Self::Images)
        } else if REGEX_VIDEO_INDEX.is_match(name) {
            Some(Self::Video(name.to_string()))
        } else {
            None
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Images => IMAGES_UNIT,
            Self::Video(name) => name,
        }
    }

    #[must_use]
    pub fn dir(&self, working: &Path) -> PathBuf {
        input_dir(working).join(self.name())
    }

    #[must_use]
    pub const fn is_video(&self) -> bool {
        matches!(self, Self::Video(_))
    }

    fn video_index(&self) -> Option<u64> {
        REGEX_VIDEO_INDEX
            .captures(self.name())
            .and_then(|caps| caps[1].parse().ok())
    }
}

impl Ord for InputUnit {
    /// `images` 排最前，影片依編號排序（video2 在 video10 之前）
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Images, Self::Images) => Ordering::Equal,
            (Self::Images, Self::Video(_)) => Ordering::Less,
            (Self::Video(_), Self::Images) => Ordering::Greater,
            (Self::Video(a), Self::Video(b)) => {
                match (self.video_index(), other.video_index()) {
                    (Some(x), Some(y)) => x.cmp(&y).then_with(|| a.cmp(b)),
                    (Some(_), None) => Ordering::Less,
                    (None, Some(_)) => Ordering::Greater,
                    (None, None) => a.cmp(b),
                }
            }
        }
    }
}

impl PartialOrd for InputUnit {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for InputUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
