use crate::error::{PipelineError, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Clone)]
pub struct FileInfo {
    pub path: PathBuf,
    pub name: String,
}

/// 列出目錄第一層的檔案（不遞迴），依檔名排序
pub fn scan_top_level_files(directory: &Path) -> Result<Vec<FileInfo>> {
    collect_entries(directory, |entry| entry.file_type().is_file())
}

/// 列出目錄第一層的子目錄，依名稱排序
pub fn scan_top_level_dirs(directory: &Path) -> Result<Vec<FileInfo>> {
    collect_entries(directory, |entry| entry.file_type().is_dir())
}

fn collect_entries(
    directory: &Path,
    keep: impl Fn(&walkdir::DirEntry) -> bool,
) -> Result<Vec<FileInfo>> {
    let mut entries = Vec::new();
    for entry in WalkDir::new(directory)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(directory).to_path_buf();
            PipelineError::io(path, e.into())
        })?;
        if !keep(&entry) {
            continue;
        }
        entries.push(FileInfo {
            name: entry.file_name().to_string_lossy().into_owned(),
            path: entry.into_path(),
        });
    }
    Ok(entries)
}
