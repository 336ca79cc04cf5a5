//! Text decoding with a Shift-JIS fallback for legacy Japanese exports.

use encoding_rs::{Encoding, SHIFT_JIS, UTF_8};
use serde::Serialize;
use std::fmt;

/// The encoding a file was successfully decoded with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SourceEncoding {
    Utf8,
    ShiftJis,
}

impl SourceEncoding {
    pub fn encoding(self) -> &'static Encoding {
        match self {
            SourceEncoding::Utf8 => UTF_8,
            SourceEncoding::ShiftJis => SHIFT_JIS,
        }
    }
}

impl fmt::Display for SourceEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.encoding().name())
    }
}

/// Decodes `bytes` as UTF-8, then as cp932 (Windows Shift-JIS).
///
/// Neither attempt substitutes replacement characters: malformed input in both
/// encodings yields `None`.
pub fn decode_with_fallback(bytes: &[u8]) -> Option<(String, SourceEncoding)> {
    let without_bom = match Encoding::for_bom(bytes) {
        Some((encoding, bom_len)) if encoding == UTF_8 => &bytes[bom_len..],
        _ => bytes,
    };

    if let Some(text) = UTF_8.decode_without_bom_handling_and_without_replacement(without_bom) {
        return Some((text.into_owned(), SourceEncoding::Utf8));
    }

    decode_cp932(bytes).map(|text| (text, SourceEncoding::ShiftJis))
}

/// WHATWG Shift_JIS plus the four single bytes cp932 maps into the private use area.
fn decode_cp932(bytes: &[u8]) -> Option<String> {
    let mut text = String::with_capacity(bytes.len());
    let mut segment_start = 0;
    let mut i = 0;

    while i < bytes.len() {
        let byte = bytes[i];
        if is_lead_byte(byte) {
            i += 2;
            continue;
        }
        if let Some(extra) = cp932_single_byte(byte) {
            text.push_str(&decode_shift_jis(&bytes[segment_start..i])?);
            text.push(extra);
            segment_start = i + 1;
        }
        i += 1;
    }

    text.push_str(&decode_shift_jis(&bytes[segment_start..])?);
    Some(text)
}

fn decode_shift_jis(bytes: &[u8]) -> Option<std::borrow::Cow<'_, str>> {
    SHIFT_JIS.decode_without_bom_handling_and_without_replacement(bytes)
}

fn is_lead_byte(byte: u8) -> bool {
    matches!(byte, 0x81..=0x9F | 0xE0..=0xFC)
}

fn cp932_single_byte(byte: u8) -> Option<char> {
    match byte {
        0xA0 => Some('\u{F8F0}'),
        0xFD => Some('\u{F8F1}'),
        0xFE => Some('\u{F8F2}'),
        0xFF => Some('\u{F8F3}'),
        _ => None,
    }
}
