//! Creative intake: byte sniffing, dimension decode, and batch application.
//!
//! A batch loads up to two files (one per slot). Each file is read and
//! decoded independently; failures are captured per slot and never block the
//! sibling file. The caller only observes the batch once every slot has
//! settled.

use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::task::JoinSet;
use tracing::{debug, warn};

use crate::error::IntakeError;
use crate::preview::PreviewStore;
use crate::types::{Creative, CreativeKind, Slot};

/// Detect the mime type from file magic, falling back to the extension.
pub fn sniff_mime(bytes: &[u8], path: &Path) -> String {
    if bytes.len() >= 12 {
        if bytes.starts_with(b"\x89PNG\r\n\x1a\n") {
            return "image/png".to_string();
        }
        if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
            return "image/jpeg".to_string();
        }
        if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
            return "image/gif".to_string();
        }
        if &bytes[0..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
            return "image/webp".to_string();
        }
        // ISO base media file format: size + 'ftyp' + major brand
        if &bytes[4..8] == b"ftyp" {
            if &bytes[8..10] == b"qt" {
                return "video/quicktime".to_string();
            }
            return "video/mp4".to_string();
        }
    }

    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("png") => "image/png".to_string(),
        Some("jpg") | Some("jpeg") => "image/jpeg".to_string(),
        Some("gif") => "image/gif".to_string(),
        Some("webp") => "image/webp".to_string(),
        Some("mp4") | Some("m4v") => "video/mp4".to_string(),
        Some("mov") => "video/quicktime".to_string(),
        Some("webm") => "video/webm".to_string(),
        _ => "application/octet-stream".to_string(),
    }
}

/// `image/*` is an image; everything else is treated as video.
pub fn classify_kind(mime: &str) -> CreativeKind {
    if mime.starts_with("image/") {
        CreativeKind::Image
    } else {
        CreativeKind::Video
    }
}

/// Decode intrinsic pixel dimensions from encoded image bytes. Reads the
/// header only; the pixel data is never decoded.
pub fn decode_image_dimensions(bytes: &[u8]) -> Result<(u32, u32), IntakeError> {
    image::io::Reader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| IntakeError::ImageDecode(e.to_string()))?
        .into_dimensions()
        .map_err(|e| IntakeError::ImageDecode(e.to_string()))
}

/// Decode track dimensions from an ISO-BMFF (MP4/MOV) container by walking
/// to the first `trak` whose `tkhd` carries a non-zero size.
pub fn decode_video_dimensions(bytes: &[u8]) -> Result<(u32, u32), IntakeError> {
    let moov = find_box(bytes, b"moov")
        .ok_or_else(|| IntakeError::VideoDecode("no moov box found".to_string()))?;

    for (name, payload) in boxes(moov) {
        if &name != b"trak" {
            continue;
        }
        let Some(tkhd) = find_box(payload, b"tkhd") else {
            continue;
        };
        if let Some((w, h)) = tkhd_dimensions(tkhd) {
            if w > 0 && h > 0 {
                return Ok((w, h));
            }
        }
    }

    Err(IntakeError::VideoDecode(
        "no video track with dimensions".to_string(),
    ))
}

/// Iterate the boxes of one container level as (name, payload) pairs.
fn boxes<'a>(data: &'a [u8]) -> impl Iterator<Item = ([u8; 4], &'a [u8])> + 'a {
    let mut pos = 0usize;
    std::iter::from_fn(move || {
        if pos + 8 > data.len() {
            return None;
        }
        let size32 = u32::from_be_bytes(data[pos..pos + 4].try_into().ok()?);
        let name: [u8; 4] = data[pos + 4..pos + 8].try_into().ok()?;
        let (header, size) = match size32 {
            // size 0: box extends to end of enclosing container
            0 => (8usize, (data.len() - pos) as u64),
            // size 1: 64-bit largesize follows the name
            1 => {
                if pos + 16 > data.len() {
                    return None;
                }
                let large = u64::from_be_bytes(data[pos + 8..pos + 16].try_into().ok()?);
                (16usize, large)
            }
            n => (8usize, n as u64),
        };
        if size < header as u64 {
            return None;
        }
        let end = pos.checked_add(usize::try_from(size).ok()?)?;
        if end > data.len() {
            return None;
        }
        let payload = &data[pos + header..end];
        pos = end;
        Some((name, payload))
    })
}

fn find_box<'a>(data: &'a [u8], name: &[u8; 4]) -> Option<&'a [u8]> {
    boxes(data).find(|(n, _)| n == name).map(|(_, payload)| payload)
}

/// Width/height from a `tkhd` full box, stored as 16.16 fixed point after
/// the version-dependent fixed-size fields.
fn tkhd_dimensions(tkhd: &[u8]) -> Option<(u32, u32)> {
    let version = *tkhd.first()?;
    let offset = match version {
        0 => 76,
        1 => 88,
        _ => return None,
    };
    if tkhd.len() < offset + 8 {
        return None;
    }
    let width = u32::from_be_bytes(tkhd[offset..offset + 4].try_into().ok()?) >> 16;
    let height = u32::from_be_bytes(tkhd[offset + 4..offset + 8].try_into().ok()?) >> 16;
    Some((width, height))
}

/// Files to load, keyed by slot. Either or both may be present.
#[derive(Debug, Clone, Default)]
pub struct IntakeRequest {
    pub square: Option<PathBuf>,
    pub vertical: Option<PathBuf>,
}

impl IntakeRequest {
    pub fn is_empty(&self) -> bool {
        self.square.is_none() && self.vertical.is_none()
    }
}

/// A slot whose file could not be loaded. The batch still settles; the slot
/// simply keeps whatever it held before.
#[derive(Debug)]
pub struct SlotWarning {
    pub slot: Slot,
    pub path: PathBuf,
    pub reason: String,
}

/// Settled outcome of one intake batch: decoded creatives per slot plus the
/// warnings for slots that failed.
#[derive(Debug, Default)]
pub struct IntakeBatch {
    pub square: Option<Creative>,
    pub vertical: Option<Creative>,
    pub warnings: Vec<SlotWarning>,
}

impl IntakeBatch {
    pub fn has_any(&self) -> bool {
        self.square.is_some() || self.vertical.is_some()
    }

    fn set(&mut self, creative: Creative) {
        match creative.slot {
            Slot::Square => self.square = Some(creative),
            Slot::Vertical => self.vertical = Some(creative),
        }
    }
}

/// Load every requested file and wait for all of them to settle.
///
/// Preview handles for failed slots are revoked before the batch returns, so
/// the store only ever holds entries for creatives that made it through.
pub async fn run_batch(store: &Arc<PreviewStore>, request: IntakeRequest) -> IntakeBatch {
    let mut tasks = JoinSet::new();

    if let Some(path) = request.square {
        let store = Arc::clone(store);
        tasks.spawn(async move { load_creative(store, Slot::Square, path).await });
    }
    if let Some(path) = request.vertical {
        let store = Arc::clone(store);
        tasks.spawn(async move { load_creative(store, Slot::Vertical, path).await });
    }

    let mut batch = IntakeBatch::default();
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(Ok(creative)) => {
                debug!(
                    slot = %creative.slot,
                    mime = %creative.mime,
                    width = creative.width,
                    height = creative.height,
                    "creative loaded"
                );
                batch.set(creative);
            }
            Ok(Err(warning)) => {
                warn!(
                    slot = %warning.slot,
                    path = %warning.path.display(),
                    reason = %warning.reason,
                    "creative failed to load"
                );
                batch.warnings.push(warning);
            }
            Err(join_err) => {
                warn!("intake task failed to complete: {join_err}");
            }
        }
    }
    batch
}

async fn load_creative(
    store: Arc<PreviewStore>,
    slot: Slot,
    path: PathBuf,
) -> Result<Creative, SlotWarning> {
    match load_creative_inner(&store, slot, &path).await {
        Ok(creative) => Ok(creative),
        Err(err) => Err(SlotWarning {
            slot,
            path,
            reason: err.to_string(),
        }),
    }
}

async fn load_creative_inner(
    store: &Arc<PreviewStore>,
    slot: Slot,
    path: &Path,
) -> Result<Creative, IntakeError> {
    let bytes = Arc::new(tokio::fs::read(path).await?);
    if bytes.is_empty() {
        return Err(IntakeError::Empty);
    }

    let mime = sniff_mime(&bytes, path);
    let kind = classify_kind(&mime);

    // The preview exists as soon as the bytes do; it is released again below
    // if the dimension decode fails.
    let preview = store.create(&mime, Arc::clone(&bytes));

    let dims = match kind {
        CreativeKind::Image => {
            let decode_bytes = Arc::clone(&bytes);
            tokio::task::spawn_blocking(move || decode_image_dimensions(&decode_bytes))
                .await
                .unwrap_or_else(|e| Err(IntakeError::ImageDecode(e.to_string())))
        }
        CreativeKind::Video => decode_video_dimensions(&bytes),
    };

    let (width, height) = match dims {
        Ok(dims) => dims,
        Err(err) => {
            store.revoke(&preview);
            return Err(err);
        }
    };

    Ok(Creative {
        path: path.to_path_buf(),
        bytes,
        mime,
        kind,
        width,
        height,
        slot,
        preview,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = image::DynamicImage::ImageRgba8(image::RgbaImage::new(width, height));
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, image::ImageFormat::Png).unwrap();
        buf.into_inner()
    }

    fn mp4_box(name: &[u8; 4], payload: &[u8]) -> Vec<u8> {
        let mut b = Vec::with_capacity(payload.len() + 8);
        b.extend_from_slice(&((payload.len() + 8) as u32).to_be_bytes());
        b.extend_from_slice(name);
        b.extend_from_slice(payload);
        b
    }

    fn mp4_bytes(width: u32, height: u32) -> Vec<u8> {
        let mut tkhd = vec![0u8; 84];
        tkhd[76..80].copy_from_slice(&(width << 16).to_be_bytes());
        tkhd[80..84].copy_from_slice(&(height << 16).to_be_bytes());
        let trak = mp4_box(b"trak", &mp4_box(b"tkhd", &tkhd));
        let moov = mp4_box(b"moov", &trak);
        let mut file = mp4_box(b"ftyp", b"isomisom");
        file.extend_from_slice(&moov);
        file
    }

    #[test]
    fn sniffs_common_signatures() {
        let path = Path::new("creative.bin");
        assert_eq!(sniff_mime(&png_bytes(2, 2), path), "image/png");
        assert_eq!(
            sniff_mime(&[0xFF, 0xD8, 0xFF, 0xE0, 0, 0, 0, 0, 0, 0, 0, 0], path),
            "image/jpeg"
        );
        assert_eq!(sniff_mime(b"GIF89a......", path), "image/gif");
        assert_eq!(sniff_mime(b"RIFF\x10\x00\x00\x00WEBPVP8 ", path), "image/webp");
        assert_eq!(sniff_mime(&mp4_bytes(640, 360), path), "video/mp4");
    }

    #[test]
    fn sniff_falls_back_to_extension() {
        assert_eq!(sniff_mime(b"????????????", Path::new("ad.PNG")), "image/png");
        assert_eq!(sniff_mime(b"????????????", Path::new("ad.mov")), "video/quicktime");
        assert_eq!(
            sniff_mime(b"????????????", Path::new("ad.xyz")),
            "application/octet-stream"
        );
    }

    #[test]
    fn classifies_by_mime_prefix() {
        assert_eq!(classify_kind("image/png"), CreativeKind::Image);
        assert_eq!(classify_kind("image/webp"), CreativeKind::Image);
        assert_eq!(classify_kind("video/mp4"), CreativeKind::Video);
        // Anything non-image is treated as video.
        assert_eq!(classify_kind("application/octet-stream"), CreativeKind::Video);
    }

    #[test]
    fn decodes_image_dimensions_from_header() {
        let bytes = png_bytes(4, 5);
        assert_eq!(decode_image_dimensions(&bytes).unwrap(), (4, 5));
    }

    #[test]
    fn rejects_undecodable_image() {
        assert!(decode_image_dimensions(b"not an image at all").is_err());
    }

    #[test]
    fn decodes_mp4_track_dimensions() {
        let bytes = mp4_bytes(1080, 1920);
        assert_eq!(decode_video_dimensions(&bytes).unwrap(), (1080, 1920));
    }

    #[test]
    fn mp4_without_moov_is_rejected() {
        let bytes = mp4_box(b"ftyp", b"isomisom");
        assert!(decode_video_dimensions(&bytes).is_err());
    }

    #[tokio::test]
    async fn batch_loads_both_slots() {
        let dir = tempfile::tempdir().unwrap();
        let square = dir.path().join("square.png");
        let vertical = dir.path().join("vertical.mp4");
        std::fs::write(&square, png_bytes(1080, 1080)).unwrap();
        std::fs::write(&vertical, mp4_bytes(1080, 1920)).unwrap();

        let store = PreviewStore::new();
        let batch = run_batch(
            &store,
            IntakeRequest {
                square: Some(square),
                vertical: Some(vertical),
            },
        )
        .await;

        assert!(batch.warnings.is_empty());
        let sq = batch.square.as_ref().unwrap();
        assert_eq!((sq.width, sq.height), (1080, 1080));
        assert_eq!(sq.kind, CreativeKind::Image);
        let vt = batch.vertical.as_ref().unwrap();
        assert_eq!((vt.width, vt.height), (1080, 1920));
        assert_eq!(vt.kind, CreativeKind::Video);
        assert_eq!(store.live_count(), 2);
    }

    #[tokio::test]
    async fn failed_slot_does_not_block_sibling() {
        let dir = tempfile::tempdir().unwrap();
        let square = dir.path().join("square.png");
        let vertical = dir.path().join("vertical.mp4");
        std::fs::write(&square, png_bytes(600, 600)).unwrap();
        let mut broken = std::fs::File::create(&vertical).unwrap();
        broken.write_all(b"definitely not a container").unwrap();

        let store = PreviewStore::new();
        let batch = run_batch(
            &store,
            IntakeRequest {
                square: Some(square),
                vertical: Some(vertical.clone()),
            },
        )
        .await;

        assert!(batch.square.is_some());
        assert!(batch.vertical.is_none());
        assert_eq!(batch.warnings.len(), 1);
        assert_eq!(batch.warnings[0].slot, Slot::Vertical);
        assert_eq!(batch.warnings[0].path, vertical);
        // The failed slot's preview was released; only the survivor remains.
        assert_eq!(store.live_count(), 1);
    }

    #[tokio::test]
    async fn missing_file_is_a_warning_not_a_panic() {
        let store = PreviewStore::new();
        let batch = run_batch(
            &store,
            IntakeRequest {
                square: Some(PathBuf::from("/nonexistent/creative.png")),
                vertical: None,
            },
        )
        .await;

        assert!(!batch.has_any());
        assert_eq!(batch.warnings.len(), 1);
        assert_eq!(store.live_count(), 0);
    }
}
