//! 整合測試 - 驗證 config → setup → extract 的完整流程
//!
//! 需要影片的測試會用 ffmpeg 產生測試影片，系統沒有 ffmpeg 時跳過

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use image::{Rgb, RgbImage};
use indicatif::ProgressBar;
use picture_extractor::component::extract::SetExtractor;
use picture_extractor::component::setup::{SourceInventory, StagingPlan, Validation};
use picture_extractor::config::{DEFAULT_STRIDE, TransferMode, WorkspaceConfig};
use picture_extractor::tools::{MediaKind, classify};
use picture_extractor::{PipelineError, Step};
use tempfile::TempDir;

fn ffmpeg_available() -> bool {
    ["ffmpeg", "ffprobe"].iter().all(|tool| {
        Command::new(tool)
            .arg("-version")
            .output()
            .is_ok_and(|output| output.status.success())
    })
}

fn write_jpeg(path: &Path, level: u8) {
    RgbImage::from_pixel(32, 24, Rgb([level, 255 - level, 128]))
        .save(path)
        .unwrap();
}

/// 產生 30 fps、指定幀數的測試影片
fn write_test_video(path: &Path, frames: u32) {
    let status = Command::new("ffmpeg")
        .args([
            "-hide_banner",
            "-loglevel",
            "error",
            "-f",
            "lavfi",
            "-i",
            "testsrc=size=64x48:rate=30",
            "-frames:v",
            &frames.to_string(),
            "-c:v",
            "mpeg4",
            "-pix_fmt",
            "yuv420p",
            "-y",
        ])
        .arg(path)
        .status()
        .unwrap();
    assert!(status.success(), "ffmpeg 無法產生測試影片");
}

fn sorted_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<_> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

/// 情境 A：3 張照片 + 1 支 90 幀影片，依序擷取照片與影片
#[test]
fn test_stage_and_extract_images_then_video() {
    if !ffmpeg_available() {
        println!("跳過測試：系統沒有 ffmpeg/ffprobe");
        return;
    }

    let source_dir = TempDir::new().unwrap();
    let working_root = TempDir::new().unwrap();
    let source = source_dir.path();
    let working = working_root.path().join("work");

    for (i, name) in ["p1.jpg", "p2.jpg", "p3.jpg"].iter().enumerate() {
        write_jpeg(&source.join(name), (i * 80) as u8);
    }
    write_test_video(&source.join("clip.mp4"), 90);

    let mut config = WorkspaceConfig::new();
    config.set_source(source).unwrap();
    config.set_working(&working).unwrap();

    // setup
    let inventory = SourceInventory::scan(config.source().unwrap()).unwrap();
    assert_eq!(inventory.images().len(), 3);
    assert_eq!(inventory.videos().len(), 1);

    let images = inventory.select_images(Some("*")).unwrap();
    let mut selection = inventory.video_selection(1).unwrap();
    assert!(matches!(selection.offer("clip.mp4"), Validation::Accepted(_)));
    let videos = selection.finalize().unwrap();

    StagingPlan::new(images, videos, TransferMode::Copy)
        .materialize(config.working().unwrap(), &ProgressBar::hidden())
        .unwrap();

    // extract
    let mut extractor = SetExtractor::open(&config, DEFAULT_STRIDE).unwrap();
    assert_eq!(extractor.max_sets(), 2);
    let set_count = extractor.validate_set_count(2).unwrap();

    let mut outcomes = Vec::new();
    for choice in ["images", "video0"].iter().take(set_count) {
        outcomes.push(
            extractor
                .extract_next(choice, &ProgressBar::hidden())
                .unwrap(),
        );
        assert!(!extractor.available_names().contains(choice));
    }

    let set0 = working.join("output/set0");
    assert_eq!(sorted_names(&set0), vec!["p1.jpg", "p2.jpg", "p3.jpg"]);
    for name in ["p1.jpg", "p2.jpg", "p3.jpg"] {
        assert_eq!(
            fs::read(set0.join(name)).unwrap(),
            fs::read(source.join(name)).unwrap(),
            "{name} 應與來源相同"
        );
    }

    let set1 = working.join("output/set1");
    assert_eq!(
        sorted_names(&set1),
        vec!["00000.jpg", "00001.jpg", "00002.jpg"]
    );
    assert_eq!(outcomes[1].frames_read, Some(90));
    for name in sorted_names(&set1) {
        assert_eq!(classify(&set1.join(name)), MediaKind::Image);
    }

    println!("✓ 情境 A 測試通過");
}

/// 情境 B：工作目錄不是空的時拒絕設定，也不動到裡面的檔案
#[test]
fn test_non_empty_working_directory_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let existing = temp_dir.path().join("existing.txt");
    fs::write(&existing, "do not touch").unwrap();

    let mut config = WorkspaceConfig::new();
    let err = config.set_working(temp_dir.path()).unwrap_err();

    assert!(matches!(err, PipelineError::Config { .. }));
    assert!(config.working().is_none());
    assert_eq!(sorted_names(temp_dir.path()), vec!["existing.txt"]);
    assert_eq!(fs::read_to_string(&existing).unwrap(), "do not touch");

    println!("✓ 情境 B 測試通過");
}

/// 情境 C：設定了工作目錄但還沒執行 setup
#[test]
fn test_extract_before_setup_names_setup_step() {
    let temp_dir = TempDir::new().unwrap();
    let mut config = WorkspaceConfig::new();
    config.set_working(&temp_dir.path().join("work")).unwrap();

    let err = SetExtractor::open(&config, DEFAULT_STRIDE).unwrap_err();

    assert!(matches!(
        err,
        PipelineError::Precondition {
            step: Step::Setup,
            ..
        }
    ));
    assert!(err.to_string().contains("setup"));

    println!("✓ 情境 C 測試通過");
}

/// 影片單元依使用者的選擇順序編號，每個目錄剛好一個檔案
#[test]
fn test_video_units_follow_selection_order() {
    let source_dir = TempDir::new().unwrap();
    let working_dir = TempDir::new().unwrap();
    let source = source_dir.path();

    // 只需要 ftyp 檔頭就能被判斷為影片
    let mut header = 20u32.to_be_bytes().to_vec();
    header.extend_from_slice(b"ftypisom\0\0\0\0isom");
    let names = ["a.mp4", "b.mov", "c.bin"];
    for name in names {
        fs::write(source.join(name), &header).unwrap();
    }
    fs::write(source.join("notes.txt"), "not media").unwrap();

    let mut config = WorkspaceConfig::new();
    config.set_source(source).unwrap();
    config.set_working(working_dir.path()).unwrap();

    let inventory = SourceInventory::scan(source).unwrap();
    assert_eq!(inventory.videos().len(), 3);
    assert!(inventory.images().is_empty());

    let order = ["c.bin", "a.mp4", "b.mov"];
    let mut selection = inventory.video_selection(order.len()).unwrap();
    assert!(matches!(
        selection.offer("notes.txt"),
        Validation::Retry(_)
    ));
    for name in order {
        assert!(matches!(selection.offer(name), Validation::Accepted(_)));
    }

    let report = StagingPlan::new(Vec::new(), selection.finalize().unwrap(), TransferMode::Move)
        .materialize(working_dir.path(), &ProgressBar::hidden())
        .unwrap();
    assert_eq!(report.videos_staged, 3);

    let input = working_dir.path().join("input");
    assert_eq!(sorted_names(&input), vec!["video0", "video1", "video2"]);
    for (index, name) in order.iter().enumerate() {
        let unit: PathBuf = input.join(format!("video{index}"));
        assert_eq!(sorted_names(&unit), vec![name.to_string()]);
        assert!(!source.join(name).exists(), "移動模式應移除來源檔案");
    }
}

/// 同一個工作目錄再執行一次 setup 時拒絕，第一次放進去的影片不受影響
#[test]
fn test_second_setup_keeps_first_video_unit() {
    let source_dir = TempDir::new().unwrap();
    let working_dir = TempDir::new().unwrap();
    let source = source_dir.path();

    let mut header = 20u32.to_be_bytes().to_vec();
    header.extend_from_slice(b"ftypisom\0\0\0\0isom");
    fs::write(source.join("a.mp4"), &header).unwrap();
    fs::write(source.join("b.mp4"), &header).unwrap();

    let inventory = SourceInventory::scan(source).unwrap();
    let stage = |name: &str| {
        let mut selection = inventory.video_selection(1).unwrap();
        assert!(matches!(selection.offer(name), Validation::Accepted(_)));
        StagingPlan::new(Vec::new(), selection.finalize().unwrap(), TransferMode::Copy)
            .materialize(working_dir.path(), &ProgressBar::hidden())
    };

    stage("a.mp4").unwrap();
    let err = stage("b.mp4").unwrap_err();

    assert!(matches!(err, PipelineError::Config { .. }));
    assert!(err.to_string().contains("video0"));
    let unit = working_dir.path().join("input/video0");
    assert_eq!(sorted_names(&unit), vec!["a.mp4"]);
}
