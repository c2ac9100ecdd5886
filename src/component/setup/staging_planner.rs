use super::video_selection::VideoSelection;
use crate::config::TransferMode;
use crate::error::{PipelineError, Result};
use crate::tools::workspace_layout::{self, IMAGES_UNIT};
use crate::tools::{
    FileInfo, InputUnit, MediaKind, classify, ensure_directory_exists, ensure_vacant_directory,
    is_image, scan_top_level_files, transfer_file,
};
use glob::{MatchOptions, Pattern};
use indicatif::ProgressBar;
use log::{debug, info, warn};
use rust_i18n::t;
use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};

/// `*` 不會選到 `.` 開頭的隱藏檔（例如 macOS 的 `._IMG_0001.JPG`）
const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: false,
    require_literal_leading_dot: true,
};

/// 來源目錄第一層的檔案，依內容分成照片與影片
#[derive(Debug, Clone)]
pub struct SourceInventory {
    source: PathBuf,
    images: Vec<FileInfo>,
    videos: Vec<FileInfo>,
}

impl SourceInventory {
    /// 掃描並分類來源目錄，非影像也非影片的檔案直接忽略
    pub fn scan(source: &Path) -> Result<Self> {
        info!("掃描來源目錄: {}", source.display());

        let mut images = Vec::new();
        let mut videos = Vec::new();
        for file in scan_top_level_files(source)? {
            match classify(&file.path) {
                MediaKind::Image => images.push(file),
                MediaKind::Video => videos.push(file),
                MediaKind::Neither => debug!("略過非媒體檔案: {}", file.path.display()),
            }
        }

        info!("找到 {} 張照片、{} 支影片", images.len(), videos.len());

        Ok(Self {
            source: source.to_path_buf(),
            images,
            videos,
        })
    }

    #[must_use]
    pub fn source(&self) -> &Path {
        &self.source
    }

    #[must_use]
    pub fn images(&self) -> &[FileInfo] {
        &self.images
    }

    #[must_use]
    pub fn videos(&self) -> &[FileInfo] {
        &self.videos
    }

    /// 以 glob 樣式（相對於來源目錄）選取照片
    ///
    /// 符合樣式的檔案還必須屬於照片分類，並再次以內容確認；`None` 代表不選照片
    pub fn select_images(&self, pattern: Option<&str>) -> Result<Vec<PathBuf>> {
        let Some(pattern) = pattern.map(str::trim).filter(|p| !p.is_empty()) else {
            return Ok(Vec::new());
        };

        let full_pattern = if Path::new(pattern).is_absolute() {
            pattern.to_string()
        } else {
            let base = Pattern::escape(&self.source.to_string_lossy());
            format!("{}/{pattern}", base.trim_end_matches('/'))
        };

        let matches = glob::glob_with(&full_pattern, MATCH_OPTIONS).map_err(|e| {
            PipelineError::Pattern {
                pattern: pattern.to_string(),
                message: e.to_string(),
            }
        })?;

        let image_names: HashSet<&str> = self.images.iter().map(|f| f.name.as_str()).collect();
        let mut selected = Vec::new();
        for entry in matches {
            let path = match entry {
                Ok(path) => path,
                Err(e) => {
                    warn!("無法讀取符合樣式的路徑: {e}");
                    continue;
                }
            };
            let Some(name) = self.top_level_name(&path) else {
                continue;
            };
            if image_names.contains(name.as_str()) && is_image(&path) {
                selected.push(self.source.join(name));
            }
        }

        selected.sort();
        selected.dedup();
        info!("樣式 '{pattern}' 選取了 {} 張照片", selected.len());
        Ok(selected)
    }

    /// 開始選擇 `count` 支影片，`count` 必須介於 0 與影片總數之間
    pub fn video_selection(&self, count: usize) -> Result<VideoSelection> {
        VideoSelection::new(&self.source, count, self.videos.len())
    }

    /// 只接受來源目錄第一層的路徑
    fn top_level_name(&self, path: &Path) -> Option<String> {
        let relative = path.strip_prefix(&self.source).ok()?;
        let mut components = relative
            .components()
            .filter(|c| !matches!(c, Component::CurDir));
        match (components.next(), components.next()) {
            (Some(Component::Normal(name)), None) => Some(name.to_string_lossy().into_owned()),
            _ => None,
        }
    }
}

/// 已確認的選擇，等待寫入工作目錄
#[derive(Debug, Clone)]
pub struct StagingPlan {
    images: Vec<PathBuf>,
    videos: Vec<PathBuf>,
    mode: TransferMode,
}

#[derive(Debug, Clone)]
pub struct StagingReport {
    pub images_staged: usize,
    pub videos_staged: usize,
    pub units: Vec<InputUnit>,
    pub mode: TransferMode,
}

impl StagingPlan {
    #[must_use]
    pub const fn new(images: Vec<PathBuf>, videos: Vec<PathBuf>, mode: TransferMode) -> Self {
        Self {
            images,
            videos,
            mode,
        }
    }

    #[must_use]
    pub fn file_count(&self) -> usize {
        self.images.len() + self.videos.len()
    }

    /// 建立 `input/` 與 `output/` 並搬移所有選取的檔案
    ///
    /// 目標單元目錄已有檔案（例如先前執行過 setup）時，在建立任何目錄前就拒絕。
    /// 任一檔案搬移失敗就中止，已經搬移的檔案不會還原
    pub fn materialize(&self, working: &Path, progress: &ProgressBar) -> Result<StagingReport> {
        let input_dir = workspace_layout::input_dir(working);
        let mut units = Vec::new();
        if !self.images.is_empty() {
            units.push(InputUnit::Images);
        }
        units.extend(
            (0..self.videos.len())
                .map(|index| InputUnit::Video(workspace_layout::video_unit_name(index))),
        );

        for unit in &units {
            ensure_vacant_directory(&unit.dir(working))?;
        }
        for unit in &units {
            ensure_directory_exists(&unit.dir(working))?;
        }
        ensure_directory_exists(&workspace_layout::output_dir(working))?;

        progress.set_length(self.file_count() as u64);

        let images_dir = input_dir.join(IMAGES_UNIT);
        for image in &self.images {
            let target = images_dir.join(file_name_of(image)?);
            transfer_file(image, &target, self.mode)?;
            progress.inc(1);
        }
        info!("放入 {} 張照片到工作目錄 ({:?})", self.images.len(), self.mode);

        let video_units = units.iter().filter(|u| u.is_video());
        for (video, unit) in self.videos.iter().zip(video_units) {
            let target = unit.dir(working).join(file_name_of(video)?);
            transfer_file(video, &target, self.mode)?;
            progress.inc(1);
        }
        info!("放入 {} 支影片到工作目錄 ({:?})", self.videos.len(), self.mode);

        Ok(StagingReport {
            images_staged: self.images.len(),
            videos_staged: self.videos.len(),
            units,
            mode: self.mode,
        })
    }
}

fn file_name_of(path: &Path) -> Result<&std::ffi::OsStr> {
    path.file_name().ok_or_else(|| {
        PipelineError::io(
            path,
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                t!("detail.no_file_name").into_owned(),
            ),
        )
    })
}
