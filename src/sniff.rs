//! Content-type sniffing over leading file bytes
//!
//! Every test here operates on a caller-supplied prefix buffer so that
//! classification never pays the cost of reading a whole file. Used to rule
//! out archives, images and binary blobs that carry a `.xml` extension.

/// Portion of a file inspected when deciding whether its content is binary.
const BINARY_SNIFF_BYTES: usize = 1024;

/// Fraction of non-text bytes above which content is considered binary.
const BINARY_THRESHOLD: f64 = 0.30;

/// Gzip member header magic.
const GZIP_MAGIC: &[u8] = &[0x1f, 0x8b];

/// Bzip2 stream header magic ("BZh").
const BZIP2_MAGIC: &[u8] = b"BZh";

/// Zip local file header, plus empty-archive and spanned-archive variants.
const ZIP_MAGICS: &[&[u8]] = &[
    &[0x50, 0x4b, 0x03, 0x04],
    &[0x50, 0x4b, 0x05, 0x06],
    &[0x50, 0x4b, 0x07, 0x08],
];

/// Whether the prefix starts a gzip stream.
pub fn is_gzip(prefix: &[u8]) -> bool {
    prefix.starts_with(GZIP_MAGIC)
}

/// Whether the prefix starts a bzip2 stream.
pub fn is_bzip2(prefix: &[u8]) -> bool {
    prefix.starts_with(BZIP2_MAGIC)
}

/// Whether the prefix starts a zip archive.
pub fn is_zip(prefix: &[u8]) -> bool {
    ZIP_MAGICS.iter().any(|magic| prefix.starts_with(magic))
}

/// Whether the prefix starts a known image format (PNG, JPEG, GIF, BMP, TIFF).
pub fn is_image(prefix: &[u8]) -> bool {
    const PNG: &[u8] = &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];
    const JPEG: &[u8] = &[0xff, 0xd8, 0xff];
    const GIF87: &[u8] = b"GIF87a";
    const GIF89: &[u8] = b"GIF89a";
    const BMP: &[u8] = b"BM";
    const TIFF_LE: &[u8] = b"II\x2a\x00";
    const TIFF_BE: &[u8] = b"MM\x00\x2a";

    prefix.starts_with(PNG)
        || prefix.starts_with(JPEG)
        || prefix.starts_with(GIF87)
        || prefix.starts_with(GIF89)
        || prefix.starts_with(BMP)
        || prefix.starts_with(TIFF_LE)
        || prefix.starts_with(TIFF_BE)
}

/// Whether the prefix looks like binary rather than text content.
///
/// A NUL byte is conclusive. Otherwise the first KiB is scored: if more
/// than 30% of its bytes are neither printable ASCII nor common whitespace
/// nor part of a multi-byte UTF-8 sequence, the content is binary.
pub fn is_binary(prefix: &[u8]) -> bool {
    let window = &prefix[..prefix.len().min(BINARY_SNIFF_BYTES)];
    if window.is_empty() {
        return false;
    }
    if window.contains(&0) {
        return true;
    }

    let suspicious = window
        .iter()
        .filter(|&&b| b < 0x20 && !matches!(b, b'\t' | b'\n' | b'\r' | 0x0c))
        .count();

    (suspicious as f64 / window.len() as f64) > BINARY_THRESHOLD
}
