pub(crate) mod sink;
pub(crate) mod utf16;
pub(crate) mod utf32;
pub(crate) mod utf8;

pub use sink::{Sink, SliceSink};
pub use utf16::Utf16;
pub use utf32::Utf32;
pub use utf8::Utf8;

/// A Unicode code point. Not validated on construction; see [`is_valid_scalar_value`].
pub type Codepoint = u32;

/// Returns `true` if `codepoint` is a Unicode scalar value: anything up to `0x10FFFF`
/// outside the surrogate range `0xD800..=0xDFFF`.
#[inline]
pub const fn is_valid_scalar_value(codepoint: Codepoint) -> bool {
    codepoint < 0xD800 || (codepoint >= 0xE000 && codepoint < 0x110000)
}

mod sealed {
    pub trait Sealed {}
}
pub(crate) use sealed::Sealed;

/// One of the three Unicode encoding forms.
///
/// Implemented by the uninhabited markers [`Utf8`], [`Utf16`] and [`Utf32`]; the trait is
/// sealed. Every function here works on a single encoded sequence and never touches state.
///
/// `decode` and `encode` are unchecked in the Unicode sense: feed `decode` only sequences that
/// passed [`Encoding::validate`], and `encode` only codepoints whose
/// [`Encoding::write_length`] is non-zero.
pub trait Encoding: Sealed + 'static {
    /// The storage atom of the encoding.
    type Unit: Copy + Eq + core::fmt::Debug;

    /// Runtime tag for this encoding.
    const KIND: EncodingKind;
    /// Width of one [`Encoding::Unit`] in bytes.
    const UNIT_BYTES: usize = core::mem::size_of::<Self::Unit>();
    /// Longest sequence any codepoint needs.
    const MAX_LEN: usize;

    /// Length in units of the sequence starting with `lead`, judged from `lead` alone.
    ///
    /// Units that cannot start a sequence report 1; [`Encoding::validate`] rejects them.
    fn read_length(lead: Self::Unit) -> usize;

    /// Units needed to encode `codepoint`, or 0 if it cannot be encoded at all.
    fn write_length(codepoint: Codepoint) -> usize;

    /// Structural check of exactly one sequence. Does not check the decoded value.
    fn validate(sequence: &[Self::Unit]) -> bool;

    /// Decodes the sequence starting at `sequence[0]`.
    ///
    /// # Panics
    ///
    /// May panic if `sequence` is shorter than `read_length(sequence[0])`.
    fn decode(sequence: &[Self::Unit]) -> Codepoint;

    /// Writes the encoding of `codepoint` into `sink` and hands the sink back.
    ///
    /// # Panics
    ///
    /// Panics if `write_length(codepoint) == 0`.
    fn encode<S: Sink<Self::Unit>>(codepoint: Codepoint, sink: S) -> S;
}

/// Runtime tag naming an [`Encoding`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum EncodingKind {
    Utf8,
    Utf16,
    Utf32,
}

impl EncodingKind {
    pub const ALL: [EncodingKind; 3] = [
        EncodingKind::Utf8,
        EncodingKind::Utf16,
        EncodingKind::Utf32,
    ];

    pub const fn unit_bytes(self) -> usize {
        match self {
            EncodingKind::Utf8 => Utf8::UNIT_BYTES,
            EncodingKind::Utf16 => Utf16::UNIT_BYTES,
            EncodingKind::Utf32 => Utf32::UNIT_BYTES,
        }
    }

    pub const fn max_len(self) -> usize {
        match self {
            EncodingKind::Utf8 => Utf8::MAX_LEN,
            EncodingKind::Utf16 => Utf16::MAX_LEN,
            EncodingKind::Utf32 => Utf32::MAX_LEN,
        }
    }

    /// Units needed to encode `codepoint` in this encoding, 0 if unencodable.
    pub fn write_length(self, codepoint: Codepoint) -> usize {
        match self {
            EncodingKind::Utf8 => Utf8::write_length(codepoint),
            EncodingKind::Utf16 => Utf16::write_length(codepoint),
            EncodingKind::Utf32 => Utf32::write_length(codepoint),
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            EncodingKind::Utf8 => "UTF-8",
            EncodingKind::Utf16 => "UTF-16",
            EncodingKind::Utf32 => "UTF-32",
        }
    }
}

impl core::fmt::Display for EncodingKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}
