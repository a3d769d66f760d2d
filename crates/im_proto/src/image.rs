//! Picture format sniffing and content digests.
//!
//! Only headers are inspected: enough bytes to classify the container and
//! read its pixel dimensions. Nothing is decoded.

use md5::Md5;
use sha1::{Digest, Sha1};

use crate::error::ProtoError;

const PNG_MAGIC: &[u8] = b"\x89PNG\r\n\x1a\n";

/// Picture formats known to the rich media service, with their wire codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    Unknown,
    Jpeg,
    Png,
    Webp,
    Bmp,
    Gif,
    Apng,
}

impl ImageFormat {
    /// `FileType.pic_format` value.
    pub fn code(self) -> u32 {
        match self {
            ImageFormat::Unknown => 0,
            ImageFormat::Jpeg => 1000,
            ImageFormat::Png => 1001,
            ImageFormat::Webp => 1002,
            ImageFormat::Bmp => 1005,
            ImageFormat::Gif => 2000,
            ImageFormat::Apng => 2001,
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "jpg",
            ImageFormat::Png | ImageFormat::Apng => "png",
            ImageFormat::Webp => "webp",
            ImageFormat::Bmp => "bmp",
            ImageFormat::Gif => "gif",
            ImageFormat::Unknown => "dat",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageInfo {
    pub format: ImageFormat,
    pub width: u32,
    pub height: u32,
}

impl ImageInfo {
    fn new(format: ImageFormat, width: u32, height: u32) -> Self {
        Self {
            format,
            width,
            height,
        }
    }
}

/// Classify `data` and read its dimensions.
///
/// Empty, truncated, or unrecognised input fails with `UnsupportedFormat`.
pub fn resolve(data: &[u8]) -> Result<ImageInfo, ProtoError> {
    let info = if data.starts_with(PNG_MAGIC) {
        resolve_png(data)
    } else if data.starts_with(&[0xff, 0xd8]) {
        resolve_jpeg(data)
    } else if data.starts_with(b"GIF87a") || data.starts_with(b"GIF89a") {
        resolve_gif(data)
    } else if data.starts_with(b"BM") {
        resolve_bmp(data)
    } else if data.len() >= 12 && &data[0..4] == b"RIFF" && &data[8..12] == b"WEBP" {
        resolve_webp(data)
    } else {
        None
    };
    info.ok_or(ProtoError::UnsupportedFormat)
}

/// Lowercase hex MD5 of `data`.
pub fn md5_hex(data: &[u8]) -> String {
    hex::encode(Md5::digest(data))
}

/// Lowercase hex SHA-1 of `data`.
pub fn sha1_hex(data: &[u8]) -> String {
    hex::encode(Sha1::digest(data))
}

fn be_u16(data: &[u8], at: usize) -> Option<u16> {
    let b = data.get(at..at + 2)?;
    Some(u16::from_be_bytes([b[0], b[1]]))
}

fn be_u32(data: &[u8], at: usize) -> Option<u32> {
    let b = data.get(at..at + 4)?;
    Some(u32::from_be_bytes([b[0], b[1], b[2], b[3]]))
}

fn le_u16(data: &[u8], at: usize) -> Option<u16> {
    let b = data.get(at..at + 2)?;
    Some(u16::from_le_bytes([b[0], b[1]]))
}

fn le_u24(data: &[u8], at: usize) -> Option<u32> {
    let b = data.get(at..at + 3)?;
    Some(u32::from_le_bytes([b[0], b[1], b[2], 0]))
}

fn le_i32(data: &[u8], at: usize) -> Option<i32> {
    let b = data.get(at..at + 4)?;
    Some(i32::from_le_bytes([b[0], b[1], b[2], b[3]]))
}

fn resolve_png(data: &[u8]) -> Option<ImageInfo> {
    if data.get(12..16)? != b"IHDR" {
        return None;
    }
    let width = be_u32(data, 16)?;
    let height = be_u32(data, 20)?;

    // An animation control chunk before the first IDAT marks an APNG.
    let mut format = ImageFormat::Png;
    let mut offset = PNG_MAGIC.len();
    while let (Some(len), Some(kind)) = (be_u32(data, offset), data.get(offset + 4..offset + 8)) {
        match kind {
            b"acTL" => {
                format = ImageFormat::Apng;
                break;
            }
            b"IDAT" | b"IEND" => break,
            _ => {}
        }
        // length + type + data + crc
        offset = match offset.checked_add(12 + len as usize) {
            Some(next) => next,
            None => break,
        };
    }
    Some(ImageInfo::new(format, width, height))
}

fn resolve_jpeg(data: &[u8]) -> Option<ImageInfo> {
    let mut i = 2;
    loop {
        if *data.get(i)? != 0xff {
            return None;
        }
        let marker = *data.get(i + 1)?;
        match marker {
            // fill byte
            0xff => {
                i += 1;
                continue;
            }
            // standalone markers carry no length
            0x01 | 0xd0..=0xd7 => {
                i += 2;
                continue;
            }
            // start of scan / end of image before any frame header
            0xd9 | 0xda => return None,
            _ => {}
        }
        let len = be_u16(data, i + 2)? as usize;
        let is_frame = matches!(marker, 0xc0..=0xcf) && !matches!(marker, 0xc4 | 0xc8 | 0xcc);
        if is_frame {
            let height = be_u16(data, i + 5)?;
            let width = be_u16(data, i + 7)?;
            return Some(ImageInfo::new(
                ImageFormat::Jpeg,
                u32::from(width),
                u32::from(height),
            ));
        }
        if len < 2 {
            return None;
        }
        i += 2 + len;
    }
}

fn resolve_gif(data: &[u8]) -> Option<ImageInfo> {
    let width = le_u16(data, 6)?;
    let height = le_u16(data, 8)?;
    Some(ImageInfo::new(
        ImageFormat::Gif,
        u32::from(width),
        u32::from(height),
    ))
}

fn resolve_bmp(data: &[u8]) -> Option<ImageInfo> {
    let width = le_i32(data, 18)?;
    // Negative height means a top-down bitmap.
    let height = le_i32(data, 22)?;
    Some(ImageInfo::new(
        ImageFormat::Bmp,
        width.unsigned_abs(),
        height.unsigned_abs(),
    ))
}

fn resolve_webp(data: &[u8]) -> Option<ImageInfo> {
    let (width, height) = match data.get(12..16)? {
        b"VP8 " => {
            if data.get(23..26)? != [0x9d, 0x01, 0x2a] {
                return None;
            }
            let w = le_u16(data, 26)? & 0x3fff;
            let h = le_u16(data, 28)? & 0x3fff;
            (u32::from(w), u32::from(h))
        }
        b"VP8L" => {
            if *data.get(20)? != 0x2f {
                return None;
            }
            let b = data.get(21..25)?;
            let w = 1 + (u32::from(b[0]) | (u32::from(b[1] & 0x3f) << 8));
            let h = 1
                + ((u32::from(b[1]) >> 6) | (u32::from(b[2]) << 2) | (u32::from(b[3] & 0x0f) << 10));
            (w, h)
        }
        b"VP8X" => (1 + le_u24(data, 24)?, 1 + le_u24(data, 27)?),
        _ => return None,
    };
    Some(ImageInfo::new(ImageFormat::Webp, width, height))
}
