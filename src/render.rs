//! Renders an encoded image as a brace-delimited C array initializer.
//!
//! The header `(width, height)` comes first, followed by each code as a
//! lowercase, zero-padded `0xwwww` literal.

use std::io::{self, Write};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Values per line in the pretty layout.
pub const VALUES_PER_LINE: usize = 9;

/// The layout of the rendered array.
#[derive(Serialize, Deserialize, ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// `{w,h,0x0000,...};` on a single line.
    #[default]
    #[value(name = "oneline")]
    OneLine,
    /// A `{w, h,` header line, tab-indented rows of nine values, and `};`.
    #[value(name = "pretty")]
    Pretty,
}

fn hex_list(codes: &[u16]) -> String {
    codes
        .iter()
        .map(|code| format!("0x{:04x}", code))
        .collect::<Vec<_>>()
        .join(",")
}

/// Writes the array for `(width, height, codes)` to `out`, ending with a newline.
pub fn write_array<W: Write>(
    out: &mut W,
    width: u32,
    height: u32,
    codes: &[u16],
    format: OutputFormat,
) -> io::Result<()> {
    match format {
        OutputFormat::OneLine => {
            writeln!(out, "{{{},{},{}}};", width, height, hex_list(codes))
        }
        OutputFormat::Pretty => {
            writeln!(out, "{{{}, {},", width, height)?;
            let rows: Vec<String> = codes
                .chunks(VALUES_PER_LINE)
                .map(|row| format!("\t{}", hex_list(row)))
                .collect();
            writeln!(out, "{}", rows.join(",\n"))?;
            writeln!(out, "}};")
        }
    }
}

/// Renders the array into a `String`.
pub fn render_array(width: u32, height: u32, codes: &[u16], format: OutputFormat) -> String {
    let mut buf = Vec::new();
    write_array(&mut buf, width, height, codes, format).expect("writing to a Vec cannot fail");
    String::from_utf8(buf).expect("rendered array is ASCII")
}
