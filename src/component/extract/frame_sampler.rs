use crate::error::{PipelineError, Result};
use crate::tools::workspace_layout::frame_file_name;
use crate::tools::{FfmpegFrameReader, FrameSource};
use image::ImageFormat;
use indicatif::ProgressBar;
use log::{debug, info};
use std::io;
use std::path::Path;

/// 依固定間隔（以解碼幀數計，而非時間）輸出靜態影像
#[derive(Debug, Clone, Copy)]
pub struct FrameSampler {
    stride: usize,
}

/// 取樣結果：讀到的總幀數與實際寫出的影像數
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SampleReport {
    pub frames_read: usize,
    pub frames_written: usize,
}

impl FrameSampler {
    pub fn new(stride: usize) -> Result<Self> {
        if stride == 0 {
            return Err(PipelineError::InvalidStride);
        }
        Ok(Self { stride })
    }

    #[must_use]
    pub const fn stride(&self) -> usize {
        self.stride
    }

    /// 讀到串流結束為止，寫出第 0、stride、2·stride… 幀
    ///
    /// 輸出檔名從 `00000.jpg` 開始連續編號，與間隔無關
    pub fn sample<S: FrameSource + ?Sized>(
        &self,
        source: &mut S,
        output_dir: &Path,
        progress: &ProgressBar,
    ) -> Result<SampleReport> {
        let mut frame_count = 0;
        let mut frame_index = 0;

        while let Some(frame) = source.next_frame()? {
            if frame_count % self.stride == 0 {
                let frame_path = output_dir.join(frame_file_name(frame_index));
                frame
                    .save_with_format(&frame_path, ImageFormat::Jpeg)
                    .map_err(|e| PipelineError::io(&frame_path, io::Error::other(e)))?;
                debug!("寫出第 {frame_count} 幀: {}", frame_path.display());
                frame_index += 1;
            }
            frame_count += 1;
            progress.inc(1);
        }

        Ok(SampleReport {
            frames_read: frame_count,
            frames_written: frame_index,
        })
    }
}

/// 解碼影片並把取樣結果寫入 `output_dir`
///
/// 正常結束時等待解碼器結束並檢查結果；其他離開路徑由 `Drop` 回收解碼器
pub fn extract_video(
    video: &Path,
    output_dir: &Path,
    stride: usize,
    progress: &ProgressBar,
) -> Result<SampleReport> {
    let sampler = FrameSampler::new(stride)?;
    let mut reader = FfmpegFrameReader::open(video)?;

    if let Some(frames) = reader.info().frame_count {
        progress.set_length(frames);
        debug!(
            "預計輸出約 {} 張影像",
            reader.info().estimated_samples(stride).unwrap_or_default()
        );
    }

    let report = sampler.sample(&mut reader, output_dir, progress)?;
    reader.finish()?;

    info!(
        "影片取樣完成 {}: 讀取 {} 幀，輸出 {} 張",
        video.display(),
        report.frames_read,
        report.frames_written
    );
    Ok(report)
}
