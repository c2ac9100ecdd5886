//! 依檔案內容（magic bytes / 容器簽章）判斷媒體類型
//!
//! 不看副檔名：記憶卡裡常有改過名的檔案或 sidecar 檔

use crate::config::FtypBrandTable;
use infer::Infer;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::sync::LazyLock;

/// 判斷時最多讀取的檔頭長度
const HEADER_LEN: usize = 512;

/// MPEG-TS 封包長度，M2TS/MTS 每個封包前多 4 bytes 時間碼
const TS_PACKET_LEN: usize = 188;
const M2TS_PACKET_LEN: usize = 192;

/// `infer` 的內建簽章，再補上相機常見但它不認得的格式
static DETECTOR: LazyLock<Infer> = LazyLock::new(|| {
    let mut detector = Infer::new();
    detector.add("image/x-olympus-orf", "orf", is_olympus_orf);
    detector.add("image/x-panasonic-rw2", "rw2", is_panasonic_rw2);
    detector.add("video/mp2t", "m2ts", is_transport_stream);
    detector.add("video/x-matroska", "mkv", is_ebml);
    detector.add("video/quicktime", "mov", is_legacy_quicktime);
    detector
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaKind {
    Image,
    Video,
    Neither,
}

/// 判斷檔案是影像、影片或兩者皆非，無法讀取的檔案視為 `Neither`
#[must_use]
pub fn classify(path: &Path) -> MediaKind {
    match read_header(path) {
        Some(header) => classify_bytes(&header),
        None => MediaKind::Neither,
    }
}

#[must_use]
pub fn is_image(path: &Path) -> bool {
    classify(path) == MediaKind::Image
}

#[must_use]
pub fn is_video(path: &Path) -> bool {
    classify(path) == MediaKind::Video
}

fn read_header(path: &Path) -> Option<Vec<u8>> {
    if !path.is_file() {
        return None;
    }
    let file = File::open(path).ok()?;
    let mut header = Vec::with_capacity(HEADER_LEN);
    file.take(HEADER_LEN as u64).read_to_end(&mut header).ok()?;
    Some(header)
}

#[must_use]
pub fn classify_bytes(header: &[u8]) -> MediaKind {
    if let Some(kind) = classify_iso_bmff(header) {
        return kind;
    }

    match DETECTOR.get(header).map(|kind| kind.mime_type()) {
        Some(mime) if mime.starts_with("image/") => MediaKind::Image,
        Some(mime) if mime.starts_with("video/") => MediaKind::Video,
        _ => MediaKind::Neither,
    }
}

/// MP4/MOV/HEIC 等 ISO-BMFF 容器，依 `ftyp` 品牌判斷
fn classify_iso_bmff(h: &[u8]) -> Option<MediaKind> {
    if h.len() < 12 || &h[4..8] != b"ftyp" {
        return None;
    }

    let table = FtypBrandTable::embedded();
    let major = &h[8..12];
    if table.is_image_brand(major) {
        return Some(MediaKind::Image);
    }
    if table.is_video_brand(major) {
        return Some(MediaKind::Video);
    }

    let box_len = u32::from_be_bytes([h[0], h[1], h[2], h[3]]) as usize;
    let end = box_len.min(h.len());
    let compatible: Vec<&[u8]> = h
        .get(16..end)
        .unwrap_or_default()
        .chunks_exact(4)
        .collect();

    if compatible.iter().any(|b| table.is_video_brand(b)) {
        Some(MediaKind::Video)
    } else if compatible.iter().any(|b| table.is_image_brand(b)) {
        Some(MediaKind::Image)
    } else {
        Some(MediaKind::Neither)
    }
}

fn is_olympus_orf(h: &[u8]) -> bool {
    h.starts_with(b"IIRO") || h.starts_with(b"IIRS")
}

fn is_panasonic_rw2(h: &[u8]) -> bool {
    h.starts_with(b"IIU\0")
}

fn is_transport_stream(h: &[u8]) -> bool {
    let ts = h.len() > TS_PACKET_LEN && h[0] == 0x47 && h[TS_PACKET_LEN] == 0x47;
    let m2ts = h.len() > M2TS_PACKET_LEN + 4 && h[4] == 0x47 && h[M2TS_PACKET_LEN + 4] == 0x47;
    ts || m2ts
}

/// 文件類型不在檔頭前段的 Matroska
fn is_ebml(h: &[u8]) -> bool {
    h.starts_with(&[0x1A, 0x45, 0xDF, 0xA3])
}

/// 沒有 `ftyp` 的舊式 QuickTime 檔案
fn is_legacy_quicktime(h: &[u8]) -> bool {
    h.len() >= 8 && matches!(&h[4..8], b"moov" | b"mdat" | b"wide")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn jpeg_header() -> Vec<u8> {
        let mut data = vec![0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10];
        data.extend_from_slice(b"JFIF\0");
        data.resize(64, 0);
        data
    }

    fn padded(bytes: &[u8]) -> Vec<u8> {
        let mut data = bytes.to_vec();
        data.resize(64, 0);
        data
    }

    fn ftyp_header(major: &[u8; 4], compatible: &[&[u8; 4]]) -> Vec<u8> {
        let size = 16 + 4 * compatible.len() as u32;
        let mut data = size.to_be_bytes().to_vec();
        data.extend_from_slice(b"ftyp");
        data.extend_from_slice(major);
        data.extend_from_slice(&[0, 0, 0, 0]);
        for brand in compatible {
            data.extend_from_slice(*brand);
        }
        data.extend_from_slice(&8u32.to_be_bytes());
        data.extend_from_slice(b"moov");
        data
    }

    #[test]
    fn test_classify_common_images() {
        assert_eq!(classify_bytes(&jpeg_header()), MediaKind::Image);
        assert_eq!(
            classify_bytes(b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR"),
            MediaKind::Image
        );
        assert_eq!(classify_bytes(&padded(b"GIF89a\x01\0\x01\0")), MediaKind::Image);
        assert_eq!(classify_bytes(&padded(b"II*\0\x08\0\0\0")), MediaKind::Image);
        assert_eq!(classify_bytes(&padded(b"RIFF\0\0\0\0WEBPVP8 ")), MediaKind::Image);
        assert_eq!(classify_bytes(&padded(b"IIRO\x08\0\0\0")), MediaKind::Image);
        assert_eq!(classify_bytes(&padded(b"IIU\0\x18\0\0\0")), MediaKind::Image);
    }

    #[test]
    fn test_classify_iso_bmff_by_brand() {
        assert_eq!(
            classify_bytes(&ftyp_header(b"heic", &[b"mif1", b"heic"])),
            MediaKind::Image
        );
        assert_eq!(
            classify_bytes(&ftyp_header(b"isom", &[b"isom", b"mp41"])),
            MediaKind::Video
        );
        assert_eq!(
            classify_bytes(&ftyp_header(b"qt  ", &[b"qt  "])),
            MediaKind::Video
        );
        // 未知主品牌時看相容品牌
        assert_eq!(
            classify_bytes(&ftyp_header(b"zzzz", &[b"mp42"])),
            MediaKind::Video
        );
        // 音訊 m4a 不算影片
        assert_eq!(
            classify_bytes(&ftyp_header(b"M4A ", &[b"M4A "])),
            MediaKind::Neither
        );
    }

    #[test]
    fn test_classify_other_video_containers() {
        assert_eq!(
            classify_bytes(&[0x1A, 0x45, 0xDF, 0xA3, 0x9F, 0x42, 0x86, 0x81]),
            MediaKind::Video
        );
        assert_eq!(classify_bytes(&padded(b"RIFF\0\0\0\0AVI LIST")), MediaKind::Video);
        assert_eq!(
            classify_bytes(&padded(b"\0\0\0\x08wide\0\0\0\0mdat")),
            MediaKind::Video
        );

        let mut ts = vec![0u8; 400];
        ts[0] = 0x47;
        ts[188] = 0x47;
        assert_eq!(classify_bytes(&ts), MediaKind::Video);

        let mut m2ts = vec![0u8; 400];
        m2ts[4] = 0x47;
        m2ts[196] = 0x47;
        assert_eq!(classify_bytes(&m2ts), MediaKind::Video);
    }

    #[test]
    fn test_classify_neither() {
        assert_eq!(classify_bytes(b""), MediaKind::Neither);
        assert_eq!(classify_bytes(b"plain text content"), MediaKind::Neither);
        assert_eq!(
            classify_bytes(&padded(b"RIFF\0\0\0\0WAVEfmt ")),
            MediaKind::Neither
        );
        assert_eq!(classify_bytes(&padded(b"PK\x03\x04")), MediaKind::Neither);
    }

    #[test]
    fn test_classify_ignores_extension() {
        let temp_dir = TempDir::new().unwrap();

        let renamed_jpeg = temp_dir.path().join("photo.txt");
        fs::write(&renamed_jpeg, jpeg_header()).unwrap();
        assert_eq!(classify(&renamed_jpeg), MediaKind::Image);

        let fake_video = temp_dir.path().join("clip.mp4");
        fs::write(&fake_video, "not a video").unwrap();
        assert_eq!(classify(&fake_video), MediaKind::Neither);

        let renamed_video = temp_dir.path().join("clip.jpg");
        fs::write(&renamed_video, ftyp_header(b"mp42", &[b"isom"])).unwrap();
        assert!(is_video(&renamed_video));
        assert!(!is_image(&renamed_video));
    }

    #[test]
    fn test_unreadable_paths_are_neither() {
        let temp_dir = TempDir::new().unwrap();
        assert_eq!(classify(temp_dir.path()), MediaKind::Neither);
        assert_eq!(
            classify(&temp_dir.path().join("missing.jpg")),
            MediaKind::Neither
        );
    }
}
