mod ffprobe_info;
mod file_scanner;
mod file_transfer;
mod frame_reader;
mod media_classifier;
mod path_validator;
pub mod workspace_layout;

pub use ffprobe_info::{VideoInfo, get_video_info};
pub use file_scanner::{FileInfo, scan_top_level_dirs, scan_top_level_files};
pub use file_transfer::transfer_file;
pub use frame_reader::{FfmpegFrameReader, FrameSource};
pub use media_classifier::{MediaKind, classify, classify_bytes, is_image, is_video};
pub use path_validator::{ensure_directory_exists, ensure_vacant_directory, is_directory_empty};
pub use workspace_layout::InputUnit;
