//! Hex dump of compiled output, for diagnostics.

use std::fmt::Write as _;
use std::io::{self, Write};

const BYTES_PER_LINE: usize = 16;

/// Format one line: offset, hex bytes padded to a full line, printable ASCII.
fn format_line(offset: usize, chunk: &[u8]) -> String {
    let mut hex = String::with_capacity(BYTES_PER_LINE * 3);
    for (i, b) in chunk.iter().enumerate() {
        if i > 0 {
            hex.push(' ');
        }
        let _ = write!(hex, "{b:02x}");
    }

    let ascii: String = chunk
        .iter()
        .map(|&b| if (0x20..0x7f).contains(&b) { b as char } else { '.' })
        .collect();

    format!("{offset:08x}  {hex:<width$}  {ascii}", width = BYTES_PER_LINE * 3 - 1)
}

/// Write a hex dump of `bytes` to `out`, 16 bytes per line.
pub fn hex_dump<W: Write>(bytes: &[u8], out: &mut W) -> io::Result<()> {
    if bytes.is_empty() {
        return writeln!(out, "{}", format_line(0, &[]));
    }
    for (i, chunk) in bytes.chunks(BYTES_PER_LINE).enumerate() {
        writeln!(out, "{}", format_line(i * BYTES_PER_LINE, chunk))?;
    }
    Ok(())
}
