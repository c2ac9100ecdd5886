use super::frame_sampler::{FrameSampler, extract_video};
use crate::config::{TransferMode, WorkspaceConfig};
use crate::error::{PipelineError, Result, Step};
use crate::tools::workspace_layout;
use crate::tools::{
    InputUnit, ensure_directory_exists, ensure_vacant_directory, is_directory_empty,
    scan_top_level_dirs, scan_top_level_files, transfer_file,
};
use indicatif::ProgressBar;
use log::info;
use rust_i18n::t;
use std::path::{Path, PathBuf};

/// 一次選擇所產生的影像集
#[derive(Debug, Clone)]
pub struct SetOutcome {
    pub set_name: String,
    pub set_dir: PathBuf,
    pub unit: InputUnit,
    pub files_written: usize,
    /// 影片單元讀取到的總幀數
    pub frames_read: Option<usize>,
}

/// 把 `working/input` 中的暫存單元逐一轉成 `working/output/set{i}`
///
/// 每個單元最多使用一次，選過的單元會從可選清單移除。
/// 第 i 次選擇寫入 `set{i}`，該目錄已有檔案時拒絕，不會與先前的結果混在一起
#[derive(Debug)]
pub struct SetExtractor {
    working: PathBuf,
    available: Vec<InputUnit>,
    max_sets: usize,
    sets_created: usize,
    sampler: FrameSampler,
}

impl SetExtractor {
    /// 依序檢查：已設定工作目錄 → setup 已建立 input/output → input 有素材
    pub fn open(workspace: &WorkspaceConfig, stride: usize) -> Result<Self> {
        let working = workspace.require_working()?;
        let input_dir = workspace_layout::input_dir(working);
        let output_dir = workspace_layout::output_dir(working);

        if !input_dir.is_dir() || !output_dir.is_dir() {
            return Err(PipelineError::precondition(
                Step::Setup,
                t!("detail.layout_missing", path = working.display()),
            ));
        }

        let input_is_empty =
            is_directory_empty(&input_dir).map_err(|e| PipelineError::io(&input_dir, e))?;
        if input_is_empty {
            return Err(PipelineError::precondition(
                Step::Setup,
                t!("detail.input_empty", path = input_dir.display()),
            ));
        }

        let mut available: Vec<InputUnit> = scan_top_level_dirs(&input_dir)?
            .iter()
            .filter_map(|dir| InputUnit::parse(&dir.name))
            .collect();
        available.sort();

        let videos = available.iter().filter(|u| u.is_video()).count();
        let images = usize::from(available.contains(&InputUnit::Images));
        let max_sets = videos + images;
        if max_sets == 0 {
            return Err(PipelineError::precondition(
                Step::Setup,
                t!("detail.no_units", path = input_dir.display()),
            ));
        }

        let sampler = FrameSampler::new(stride)?;

        info!("可擷取 {max_sets} 個影像集");

        Ok(Self {
            working: working.to_path_buf(),
            available,
            max_sets,
            sets_created: 0,
            sampler,
        })
    }

    #[must_use]
    pub const fn max_sets(&self) -> usize {
        self.max_sets
    }

    /// 目前仍可選擇的單元
    #[must_use]
    pub fn available(&self) -> &[InputUnit] {
        &self.available
    }

    #[must_use]
    pub fn available_names(&self) -> Vec<&str> {
        self.available.iter().map(InputUnit::name).collect()
    }

    /// 影像集數量必須介於 0 與 `max_sets` 之間
    pub fn validate_set_count(&self, count: usize) -> Result<usize> {
        if count > self.max_sets {
            return Err(PipelineError::InvalidCount {
                requested: count,
                max: self.max_sets,
            });
        }
        Ok(count)
    }

    /// 使用一個單元產生下一個影像集
    pub fn extract_next(&mut self, choice: &str, progress: &ProgressBar) -> Result<SetOutcome> {
        let choice = choice.trim();
        let position = self
            .available
            .iter()
            .position(|u| u.name() == choice)
            .ok_or_else(|| PipelineError::UnitUnavailable {
                name: choice.to_string(),
            })?;

        let set_name = workspace_layout::set_name(self.sets_created);
        let set_dir = workspace_layout::output_dir(&self.working).join(&set_name);
        ensure_vacant_directory(&set_dir)?;

        let unit = self.available.remove(position);
        self.sets_created += 1;
        ensure_directory_exists(&set_dir)?;
        info!("從 {unit} 建立影像集 {set_name}");

        let unit_dir = unit.dir(&self.working);
        let (files_written, frames_read) = match &unit {
            InputUnit::Images => (copy_images(&unit_dir, &set_dir)?, None),
            InputUnit::Video(_) => {
                let video = single_video(&unit_dir)?;
                let report = extract_video(&video, &set_dir, self.sampler.stride(), progress)?;
                (report.frames_written, Some(report.frames_read))
            }
        };

        Ok(SetOutcome {
            set_name,
            set_dir,
            unit,
            files_written,
            frames_read,
        })
    }
}

fn copy_images(unit_dir: &Path, set_dir: &Path) -> Result<usize> {
    let images = scan_top_level_files(unit_dir)?;
    for image in &images {
        transfer_file(&image.path, &set_dir.join(&image.name), TransferMode::Copy)?;
    }
    Ok(images.len())
}

fn single_video(unit_dir: &Path) -> Result<PathBuf> {
    scan_top_level_files(unit_dir)?
        .into_iter()
        .next()
        .map(|file| file.path)
        .ok_or_else(|| {
            PipelineError::precondition(
                Step::Setup,
                t!("detail.unit_empty", path = unit_dir.display()),
            )
        })
}
