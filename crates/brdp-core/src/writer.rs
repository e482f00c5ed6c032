//! UTF-16LE profile file writer.
//!
//! The RDP client expects `.rdp` files encoded as UTF-16 little-endian with
//! a leading byte-order mark. Output must be byte-identical to what a
//! conforming UTF-16LE text writer produces: BOM first, then each line's
//! code units, one `\n` per directive.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::BrdpResult;
use crate::profile::Directive;

/// UTF-16 byte-order mark, written before the profile text.
const BOM: u16 = 0xFEFF;

/// Render directives to profile text, one line each with a trailing newline.
pub fn render(directives: &[Directive]) -> String {
    let mut text = String::new();
    for directive in directives {
        text.push_str(&directive.to_string());
        text.push('\n');
    }
    text
}

/// Encode text as UTF-16LE preceded by the byte-order mark.
pub fn encode_utf16le(text: &str) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(2 + text.len() * 2);
    bytes.extend_from_slice(&BOM.to_le_bytes());
    for unit in text.encode_utf16() {
        bytes.extend_from_slice(&unit.to_le_bytes());
    }
    bytes
}

/// Write the profile to `path`, creating or truncating the file.
///
/// The handle is closed on all exit paths; a failure mid-write leaves a
/// truncated file and is propagated as an I/O error without retry.
pub fn write_profile(path: impl AsRef<Path>, directives: &[Directive]) -> BrdpResult<()> {
    let mut out = BufWriter::new(File::create(path)?);
    out.write_all(&encode_utf16le(&render(directives)))?;
    out.flush()?;
    Ok(())
}
