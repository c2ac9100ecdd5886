use crate::error::{PipelineError, Result};
use rust_i18n::t;
use serde::Deserialize;
use std::path::Path;
use std::process::Command;

#[derive(Debug, Clone)]
pub struct VideoInfo {
    pub width: u32,
    pub height: u32,
    pub frame_rate: f64,
    /// 容器記錄的總幀數，部分格式不提供
    pub frame_count: Option<u64>,
}

impl VideoInfo {
    /// 單一 RGB24 幀的位元組數
    #[must_use]
    pub fn frame_len(&self) -> usize {
        self.width as usize * self.height as usize * 3
    }

    /// 依取樣間隔估計會輸出幾張影像
    #[must_use]
    pub fn estimated_samples(&self, stride: usize) -> Option<u64> {
        let stride = stride as u64;
        self.frame_count
            .filter(|_| stride > 0)
            .map(|frames| frames.div_ceil(stride))
    }
}

#[derive(Deserialize)]
struct FfprobeOutput {
    streams: Option<Vec<StreamInfo>>,
}

#[derive(Deserialize)]
struct StreamInfo {
    codec_type: Option<String>,
    width: Option<u32>,
    height: Option<u32>,
    r_frame_rate: Option<String>,
    nb_frames: Option<String>,
}

/// 使用 ffprobe 取得第一個視訊串流的資訊
pub fn get_video_info(path: &Path) -> Result<VideoInfo> {
    let output = Command::new("ffprobe")
        .args([
            "-v",
            "error",
            "-select_streams",
            "v:0",
            "-print_format",
            "json",
            "-show_streams",
        ])
        .arg(path)
        .output()
        .map_err(|e| PipelineError::decode(path, t!("detail.ffprobe_spawn", error = e)))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(PipelineError::decode(
            path,
            t!("detail.ffprobe_failed", stderr = stderr.trim()),
        ));
    }

    parse_ffprobe_output(path, &String::from_utf8_lossy(&output.stdout))
}

fn parse_ffprobe_output(path: &Path, stdout: &str) -> Result<VideoInfo> {
    let probe: FfprobeOutput = serde_json::from_str(stdout)
        .map_err(|e| PipelineError::decode(path, t!("detail.ffprobe_parse", error = e)))?;

    // 找到視訊串流
    let video_stream = probe
        .streams
        .as_ref()
        .and_then(|streams| {
            streams
                .iter()
                .find(|s| s.codec_type.as_deref() == Some("video"))
        })
        .ok_or_else(|| PipelineError::decode(path, t!("detail.no_video_stream")))?;

    let (width, height) = match (video_stream.width, video_stream.height) {
        (Some(w), Some(h)) if w > 0 && h > 0 => (w, h),
        _ => return Err(PipelineError::decode(path, t!("detail.no_resolution"))),
    };

    // 解析幀率（格式可能是 "30/1" 或 "30000/1001"）
    let frame_rate = video_stream
        .r_frame_rate
        .as_ref()
        .and_then(|r| parse_frame_rate(r))
        .unwrap_or(30.0);

    let frame_count = video_stream
        .nb_frames
        .as_ref()
        .and_then(|n| n.parse::<u64>().ok())
        .filter(|&n| n > 0);

    Ok(VideoInfo {
        width,
        height,
        frame_rate,
        frame_count,
    })
}

/// 解析幀率字串（例如 "30/1" 或 "30000/1001"）
fn parse_frame_rate(rate: &str) -> Option<f64> {
    if let Some((num_str, den_str)) = rate.split_once('/') {
        let num: f64 = num_str.parse().ok()?;
        let den: f64 = den_str.parse().ok()?;
        if den > 0.0 {
            return Some(num / den);
        }
        return None;
    }
    rate.parse().ok()
}
