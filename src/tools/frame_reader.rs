//! 循序讀取影片解碼後的每一幀
//!
//! 由 ffmpeg 子程序解碼，透過 stdout 輸出 RGB24 原始資料；
//! 子程序就是解碼器資源，任何離開路徑都會被回收

use crate::error::{PipelineError, Result};
use crate::tools::{VideoInfo, get_video_info};
use image::RgbImage;
use log::{debug, warn};
use rust_i18n::t;
use std::collections::VecDeque;
use std::ffi::OsString;
use std::io::{BufReader, ErrorKind, Read};
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStderr, ChildStdout, Command, Stdio};
use std::thread::{self, JoinHandle};

/// stderr 只保留最後這麼多 bytes 作為錯誤訊息
const STDERR_TAIL_LEN: usize = 8 * 1024;

pub trait FrameSource {
    /// 讀取下一幀，串流結束時回傳 `None`
    fn next_frame(&mut self) -> Result<Option<RgbImage>>;
}

pub struct FfmpegFrameReader {
    path: PathBuf,
    info: VideoInfo,
    child: Option<Child>,
    stdout: Option<BufReader<ChildStdout>>,
    stderr_drain: Option<JoinHandle<Vec<u8>>>,
}

impl FfmpegFrameReader {
    pub fn open(path: &Path) -> Result<Self> {
        let info = get_video_info(path)?;
        debug!(
            "開啟影片 {}: {}x{}, {:.2} fps",
            path.display(),
            info.width,
            info.height,
            info.frame_rate
        );

        let mut input = OsString::from("file:");
        input.push(path);

        // passthrough：每個解碼出來的幀只輸出一次，不補幀也不丟幀
        // noautorotate：輸出尺寸與 ffprobe 回報的編碼尺寸一致
        let mut command = Command::new("ffmpeg");
        command
            .args(["-hide_banner", "-nostdin", "-loglevel", "error", "-noautorotate"])
            .arg("-i")
            .arg(&input)
            .args([
                "-map",
                "0:v:0",
                "-an",
                "-sn",
                "-dn",
                "-fps_mode",
                "passthrough",
                "-f",
                "rawvideo",
                "-pix_fmt",
                "rgb24",
                "pipe:1",
            ]);

        Self::spawn(path, info, command)
    }

    /// 啟動已組好參數的解碼程序，stdout 必須輸出 `info` 尺寸的 RGB24 幀
    pub fn spawn(path: &Path, info: VideoInfo, mut command: Command) -> Result<Self> {
        let mut child = command
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| PipelineError::decode(path, t!("detail.ffmpeg_spawn", error = e)))?;

        let stdout = child.stdout.take().map(BufReader::new);
        // stderr 必須持續讀取，否則管線塞滿時 ffmpeg 會卡住，stdout 也就永遠等不到資料
        let stderr_drain = child.stderr.take().map(drain_stderr);

        Ok(Self {
            path: path.to_path_buf(),
            info,
            child: Some(child),
            stdout,
            stderr_drain,
        })
    }

    #[must_use]
    pub fn info(&self) -> &VideoInfo {
        &self.info
    }

    /// 串流結束後等待 ffmpeg 結束，非零結束碼視為解碼錯誤
    pub fn finish(mut self) -> Result<()> {
        self.stdout.take();
        let Some(mut child) = self.child.take() else {
            return Ok(());
        };

        let status = child.wait().map_err(|e| PipelineError::io(&self.path, e))?;
        let stderr = self.collect_stderr();

        if !status.success() {
            warn!("ffmpeg 解碼失敗 {}: {}", self.path.display(), stderr);
            return Err(PipelineError::decode(
                &self.path,
                t!("detail.ffmpeg_failed", status = status, stderr = stderr),
            ));
        }

        Ok(())
    }

    fn collect_stderr(&mut self) -> String {
        self.stderr_drain
            .take()
            .and_then(|handle| handle.join().ok())
            .map(|tail| String::from_utf8_lossy(&tail).trim().to_string())
            .unwrap_or_default()
    }
}

/// 在背景執行緒讀完 stderr，只留下最後 `STDERR_TAIL_LEN` bytes
fn drain_stderr(stderr: ChildStderr) -> JoinHandle<Vec<u8>> {
    thread::spawn(move || {
        let mut reader = BufReader::new(stderr);
        let mut tail = VecDeque::with_capacity(STDERR_TAIL_LEN);
        let mut chunk = [0u8; 4096];
        loop {
            match reader.read(&mut chunk) {
                Ok(0) => break,
                Ok(n) => {
                    tail.extend(&chunk[..n]);
                    let overflow = tail.len().saturating_sub(STDERR_TAIL_LEN);
                    tail.drain(..overflow);
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                Err(_) => break,
            }
        }
        tail.into()
    })
}

impl FrameSource for FfmpegFrameReader {
    fn next_frame(&mut self) -> Result<Option<RgbImage>> {
        let Some(stdout) = self.stdout.as_mut() else {
            return Ok(None);
        };

        let mut buffer = vec![0u8; self.info.frame_len()];
        let mut filled = 0;
        while filled < buffer.len() {
            match stdout.read(&mut buffer[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                Err(e) => {
                    return Err(PipelineError::decode(
                        &self.path,
                        t!("detail.ffmpeg_read", error = e),
                    ));
                }
            }
        }

        if filled == 0 {
            return Ok(None);
        }
        if filled < buffer.len() {
            return Err(PipelineError::decode(
                &self.path,
                t!("detail.partial_frame", filled = filled, expected = buffer.len()),
            ));
        }

        RgbImage::from_raw(self.info.width, self.info.height, buffer)
            .map(Some)
            .ok_or_else(|| PipelineError::decode(&self.path, t!("detail.frame_size_mismatch")))
    }
}

impl Drop for FfmpegFrameReader {
    fn drop(&mut self) {
        self.stdout.take();
        if let Some(mut child) = self.child.take() {
            debug!("結束 ffmpeg 子程序: {}", self.path.display());
            let _ = child.kill();
            let _ = child.wait();
        }
        // 子程序結束後 stderr 會關閉，背景執行緒隨之結束
        if let Some(handle) = self.stderr_drain.take() {
            let _ = handle.join();
        }
    }
}
