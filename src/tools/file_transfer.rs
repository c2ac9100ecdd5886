use crate::config::TransferMode;
use crate::error::{PipelineError, Result};
use log::debug;
use std::fs;
use std::io;
use std::path::Path;

/// 依模式移動或複製單一檔案
pub fn transfer_file(source: &Path, target: &Path, mode: TransferMode) -> Result<()> {
    let result = match mode {
        TransferMode::Copy => fs::copy(source, target).map(|_| ()),
        TransferMode::Move => move_file(source, target),
    };

    result.map_err(|e| PipelineError::Transfer {
        from: source.to_path_buf(),
        to: target.to_path_buf(),
        source: e,
    })?;

    debug!("{mode:?}: {} -> {}", source.display(), target.display());
    Ok(())
}

fn move_file(source: &Path, target: &Path) -> io::Result<()> {
    match fs::rename(source, target) {
        Ok(()) => Ok(()),
        // rename 失敗（可能是跨檔案系統）時改為複製後刪除
        Err(rename_err) => {
            if !source.is_file() {
                return Err(rename_err);
            }
            copy_and_delete(source, target)
        }
    }
}

fn copy_and_delete(source: &Path, target: &Path) -> io::Result<()> {
    fs::copy(source, target)?;
    fs::remove_file(source)
}
