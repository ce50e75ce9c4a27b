//! Text decoding for the vendored scanner modules.
//!
//! Scanned inputs arrive as arbitrary bytes: mixed encodings, stray null
//! bytes, sometimes binary junk. These helpers turn them into Unicode text
//! lines the tokenizers can work with. Decoding is per line and cannot
//! fail — strict UTF-8 first, then charset detection with replacement for
//! whatever is left.

use std::fs;
use std::io;
use std::path::Path;

use chardetng::EncodingDetector;
use encoding_rs::Encoding;

/// Replace every null byte with a space.
#[must_use]
pub fn remove_null_bytes(text: &str) -> String {
    text.replace('\0', " ")
}

/// Decode arbitrary bytes to Unicode text. Null bytes come out as spaces in
/// every path.
///
/// Strict UTF-8 is tried first since nearly all inputs are ASCII or UTF-8.
/// Anything else goes through the detector, which picks the closest legacy
/// encoding and decodes with replacement characters where bytes make no
/// sense in it.
#[must_use]
pub fn as_unicode(line: &[u8]) -> String {
    if let Ok(text) = std::str::from_utf8(line) {
        return remove_null_bytes(text);
    }
    let (decoded, _, _) = detect_encoding(line).decode(line);
    remove_null_bytes(&decoded)
}

fn detect_encoding(line: &[u8]) -> &'static Encoding {
    let mut detector = EncodingDetector::new();
    detector.feed(line, true);
    detector.guess(None, true)
}

/// Replace verbatim two-character `\r`, `\n` and `\t` escapes with spaces.
///
/// Some scanned texts carry these escapes as literal characters; they are
/// never real line structure, only noise between tokens.
#[must_use]
pub fn remove_verbatim_cr_lf_tab_chars(text: &str) -> String {
    text.replace("\\r", " ").replace("\\n", " ").replace("\\t", " ")
}

/// Read a file as bytes and decode it into Unicode lines.
///
/// `\n`, `\r\n` and lone `\r` all end a line, so classic-Mac files still
/// split. Lines keep their terminators, and each line is decoded on its own
/// so a file mixing encodings still comes out readable. With `decrlf` set,
/// verbatim `\r`/`\n`/`\t` escapes are also stripped per line.
///
/// # Errors
///
/// Returns the underlying I/O error when the file cannot be read.
pub fn unicode_text_lines(location: &Path, decrlf: bool) -> io::Result<Vec<String>> {
    let bytes = fs::read(location)?;
    let mut lines: Vec<String> = split_lines_keepends(&bytes)
        .into_iter()
        .map(as_unicode)
        .collect();
    if decrlf {
        for line in &mut lines {
            *line = remove_verbatim_cr_lf_tab_chars(line);
        }
    }
    Ok(lines)
}

// `\r\n` is one terminator, not two.
fn split_lines_keepends(bytes: &[u8]) -> Vec<&[u8]> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut i = 0;
    while i < bytes.len() {
        let end = match bytes[i] {
            b'\n' => i + 1,
            b'\r' if bytes.get(i + 1) == Some(&b'\n') => i + 2,
            b'\r' => i + 1,
            _ => {
                i += 1;
                continue;
            }
        };
        lines.push(&bytes[start..end]);
        start = end;
        i = end;
    }
    if start < bytes.len() {
        lines.push(&bytes[start..]);
    }
    lines
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
