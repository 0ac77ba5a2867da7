//! Validation, measurement and transcoding of UTF-8, UTF-16 and UTF-32 code units.
//!
//! Each encoding is an uninhabited marker implementing [`Encoding`], which works on one encoded
//! sequence at a time. A [`View`] borrows a whole buffer of units and composes those primitives:
//!
//! ```
//! use utfview::{Utf16, Utf32, Utf8, View};
//!
//! let view = View::<Utf8>::new(&[0x41, 0xC3, 0xA9, 0xE2, 0x82, 0xAC]);
//! assert!(view.validate());
//! assert_eq!(view.codepoints(), 3);
//! assert_eq!(view.codeunits_in::<Utf32>(), 3);
//!
//! let units = view.to::<Utf16, _>(Vec::new());
//! assert_eq!(units, [0x41, 0xE9, 0x20AC]);
//! ```
//!
//! Only [`View::validate`] and [`View::check`] guard against malformed input. Validate
//! untrusted buffers before counting or transcoding them.

mod utf;
mod view;

pub use utf::{
    is_valid_scalar_value, Codepoint, Encoding, EncodingKind, Sink, SliceSink, Utf16, Utf32, Utf8,
};
pub use view::any::AnyView;
pub use view::{ValidateError, ValidateErrorKind, View};

use std::ffi::OsString;
use std::fmt;
use std::path::Path;

use itertools::Itertools;

/// Reports, for every path in `argv`, which Unicode encoding the file holds.
pub fn utfview<I>(argv: I) -> Result<(), Box<dyn std::error::Error>>
where
    I: IntoIterator<Item = OsString>,
{
    let argv: Vec<OsString> = argv.into_iter().collect();
    if argv.is_empty() {
        if let Ok(exe) = std::env::current_exe() {
            eprintln!("Not enough arguments. Usage: {} [files]", exe.display());
        } else {
            eprintln!("Not enough arguments. Usage: utfview [files]");
        }
        return Err(std::io::Error::from(std::io::ErrorKind::InvalidInput).into());
    }
    for argument in argv.iter() {
        println!("{}: {}", argument.to_string_lossy(), describe(Path::new(argument)));
    }
    Ok(())
}

/// One report line for `path`: its classification, or the error reading it.
fn describe(path: &Path) -> String {
    match std::fs::read(path) {
        Ok(file) => classify_file(&file).to_string(),
        Err(error) => error.to_string(),
    }
}

#[derive(Copy, Clone)]
enum Endianness {
    BigEndian,
    LittleEndian,
}

/// Codepoint count and the size of the text in each encoding.
#[derive(Debug, PartialEq, Eq)]
struct Summary {
    codepoints: usize,
    bytes: [usize; 3],
}

impl Summary {
    fn of(view: AnyView<'_>) -> Option<Self> {
        view.validate().then(|| Self {
            codepoints: view.codepoints(),
            bytes: EncodingKind::ALL.map(|kind| view.bytes_as(kind)),
        })
    }
}

#[derive(Debug, PartialEq, Eq)]
enum FileClassifications {
    Empty,
    Ascii,
    Text {
        label: &'static str,
        summary: Summary,
    },
    Data,
}

impl fmt::Display for FileClassifications {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileClassifications::Empty => write!(f, "empty"),
            FileClassifications::Ascii => write!(f, "ASCII text"),
            FileClassifications::Text { label, summary } => {
                write!(f, "{label} text, {} codepoints (", summary.codepoints)?;
                for (kind, bytes) in EncodingKind::ALL.iter().zip(summary.bytes) {
                    if *kind != EncodingKind::Utf8 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{kind}: {bytes} bytes")?;
                }
                write!(f, ")")
            }
            FileClassifications::Data => write!(f, "data"),
        }
    }
}

/// Byte order marks, longest first so UTF-32LE wins over UTF-16LE.
const BYTE_ORDER_MARKS: [(&[u8], &str, EncodingKind, Endianness); 5] = [
    (&[0xFF, 0xFE, 0x00, 0x00], "UTF-32LE", EncodingKind::Utf32, Endianness::LittleEndian),
    (&[0x00, 0x00, 0xFE, 0xFF], "UTF-32BE", EncodingKind::Utf32, Endianness::BigEndian),
    (&[0xEF, 0xBB, 0xBF], "UTF-8 (with BOM)", EncodingKind::Utf8, Endianness::BigEndian),
    (&[0xFF, 0xFE], "UTF-16LE", EncodingKind::Utf16, Endianness::LittleEndian),
    (&[0xFE, 0xFF], "UTF-16BE", EncodingKind::Utf16, Endianness::BigEndian),
];

fn classify_file(file: &[u8]) -> FileClassifications {
    if file.is_empty() {
        return FileClassifications::Empty;
    }
    if file.is_ascii() {
        return FileClassifications::Ascii;
    }
    for (mark, label, kind, endianness) in BYTE_ORDER_MARKS {
        let Some(body) = file.strip_prefix(mark) else {
            continue;
        };
        if let Some(summary) = summarize(body, kind, endianness) {
            return FileClassifications::Text { label, summary };
        }
    }
    if let Some(summary) = Summary::of(View::<Utf8>::new(file).into()) {
        return FileClassifications::Text {
            label: "UTF-8",
            summary,
        };
    }
    FileClassifications::Data
}

fn summarize(body: &[u8], kind: EncodingKind, endianness: Endianness) -> Option<Summary> {
    match kind {
        EncodingKind::Utf8 => Summary::of(View::<Utf8>::new(body).into()),
        EncodingKind::Utf16 => {
            let units = utf16_units(body, endianness)?;
            Summary::of(View::<Utf16>::new(&units).into())
        }
        EncodingKind::Utf32 => {
            let units = utf32_units(body, endianness)?;
            Summary::of(View::<Utf32>::new(&units).into())
        }
    }
}

fn utf16_units(bytes: &[u8], endianness: Endianness) -> Option<Vec<u16>> {
    if bytes.len() % 2 != 0 {
        return None;
    }
    let from_bytes: fn([u8; 2]) -> u16 = match endianness {
        Endianness::BigEndian => u16::from_be_bytes,
        Endianness::LittleEndian => u16::from_le_bytes,
    };
    Some(
        bytes
            .iter()
            .copied()
            .tuples()
            .map(|(a, b)| from_bytes([a, b]))
            .collect(),
    )
}

fn utf32_units(bytes: &[u8], endianness: Endianness) -> Option<Vec<u32>> {
    if bytes.len() % 4 != 0 {
        return None;
    }
    let from_bytes: fn([u8; 4]) -> u32 = match endianness {
        Endianness::BigEndian => u32::from_be_bytes,
        Endianness::LittleEndian => u32::from_le_bytes,
    };
    Some(
        bytes
            .iter()
            .copied()
            .tuples()
            .map(|(a, b, c, d)| from_bytes([a, b, c, d]))
            .collect(),
    )
}
