use std::fs;
use std::path::Path;

/// Bytes the Windows-1252 code page leaves unassigned. The WHATWG mapping
/// used by encoding_rs decodes them to C1 controls instead of failing, so
/// they are rejected up front to keep the fallback chain honest.
const CP1252_UNDEFINED: [u8; 5] = [0x81, 0x8D, 0x8F, 0x90, 0x9D];

const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

/// Read a file and decode it with the fallback chain. Returns `None` when
/// the file cannot be read; decoding itself always succeeds because the
/// final Latin-1 step accepts any byte.
pub fn read_text_file(path: &Path) -> Option<String> {
    let bytes = fs::read(path).ok()?;
    Some(decode_with_fallback(&bytes))
}

/// Decode bytes by trying, in order: strict UTF-8, UTF-8 with the byte
/// order mark stripped, Windows-1252, Latin-1. The first success wins.
pub fn decode_with_fallback(bytes: &[u8]) -> String {
    if let Ok(text) = std::str::from_utf8(bytes) {
        return text.to_string();
    }

    if let Some(stripped) = bytes.strip_prefix(&UTF8_BOM) {
        if let Ok(text) = std::str::from_utf8(stripped) {
            return text.to_string();
        }
    }

    if let Some(text) = decode_windows_1252(bytes) {
        return text;
    }

    decode_latin_1(bytes)
}

fn decode_windows_1252(bytes: &[u8]) -> Option<String> {
    if bytes.iter().any(|b| CP1252_UNDEFINED.contains(b)) {
        return None;
    }

    let (text, _) = encoding_rs::WINDOWS_1252.decode_without_bom_handling(bytes);
    Some(text.into_owned())
}

fn decode_latin_1(bytes: &[u8]) -> String {
    // Latin-1 maps every byte to the code point with the same value.
    bytes.iter().map(|&b| char::from(b)).collect()
}
