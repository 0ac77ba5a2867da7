pub(crate) mod any;

use core::fmt;
use core::marker::PhantomData;

use crate::utf::*;

/// Why [`View::check`] rejected a buffer.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ValidateErrorKind {
    /// The lead unit announces more units than the window has left.
    Truncated,
    /// Bad lead or continuation unit, overlong form, or unpaired surrogate.
    Malformed,
    /// Well-formed, but decodes to a surrogate or to a value above `0x10FFFF`.
    InvalidScalar,
}

impl fmt::Display for ValidateErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Truncated => write!(f, "truncated sequence"),
            Self::Malformed => write!(f, "malformed sequence"),
            Self::InvalidScalar => write!(f, "sequence is not a Unicode scalar value"),
        }
    }
}

/// The first invalid sequence found in a [`View`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidateError {
    encoding: EncodingKind,
    valid_up_to: usize,
    kind: ValidateErrorKind,
}

impl ValidateError {
    /// Offset, in units, of the first unit of the offending sequence. Everything before it is
    /// valid.
    pub const fn valid_up_to(&self) -> usize {
        self.valid_up_to
    }

    pub const fn kind(&self) -> ValidateErrorKind {
        self.kind
    }

    pub const fn encoding(&self) -> EncodingKind {
        self.encoding
    }
}

impl fmt::Display for ValidateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid {}: {} at unit {}",
            self.encoding, self.kind, self.valid_up_to
        )
    }
}

impl std::error::Error for ValidateError {}

/// A read-only window over units of encoding `E`.
///
/// The view borrows its buffer for `'a` and never changes its bounds. Only [`View::validate`]
/// and [`View::check`] defend against malformed input; the other queries expect a window that
/// validated, and on anything else return results that are memory-safe but meaningless.
pub struct View<'a, E: Encoding> {
    units: &'a [E::Unit],
    encoding: PhantomData<E>,
}

impl<E: Encoding> Clone for View<'_, E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E: Encoding> Copy for View<'_, E> {}

impl<E: Encoding> fmt::Debug for View<'_, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("View")
            .field("encoding", &E::KIND)
            .field("units", &self.units)
            .finish()
    }
}

impl<'a, E: Encoding> View<'a, E> {
    pub const fn new(units: &'a [E::Unit]) -> Self {
        Self {
            units,
            encoding: PhantomData,
        }
    }

    pub const fn units(&self) -> &'a [E::Unit] {
        self.units
    }

    pub const fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Splits the window into sequences by lead unit alone. A truncated tail comes out short.
    fn sequences(&self) -> Sequences<'a, E> {
        Sequences { rest: self.units }
    }

    /// Codepoints of every complete sequence.
    fn decoded(&self) -> impl Iterator<Item = Codepoint> + 'a {
        self.sequences()
            .filter(|sequence| sequence.len() == E::read_length(sequence[0]))
            .map(E::decode)
    }

    /// Like [`View::validate`], but says where and why validation failed.
    pub fn check(&self) -> Result<(), ValidateError> {
        let error = |valid_up_to, kind| ValidateError {
            encoding: E::KIND,
            valid_up_to,
            kind,
        };
        let mut position = 0;
        while position < self.units.len() {
            let len = E::read_length(self.units[position]);
            let Some(sequence) = self.units.get(position..position + len) else {
                return Err(error(position, ValidateErrorKind::Truncated));
            };
            if !E::validate(sequence) {
                return Err(error(position, ValidateErrorKind::Malformed));
            }
            if !is_valid_scalar_value(E::decode(sequence)) {
                return Err(error(position, ValidateErrorKind::InvalidScalar));
            }
            position += len;
        }
        Ok(())
    }

    /// Returns `true` if the whole window is well-formed `E` encoding only Unicode scalar
    /// values. The empty window is valid.
    pub fn validate(&self) -> bool {
        self.check().is_ok()
    }

    /// Number of encoded sequences. A truncated tail counts as one.
    pub fn codepoints(&self) -> usize {
        self.sequences().count()
    }

    /// Length of the window in units of `E`.
    pub const fn codeunits(&self) -> usize {
        self.units.len()
    }

    /// Units of `D` needed to hold the window after [`View::to`].
    pub fn codeunits_in<D: Encoding>(&self) -> usize {
        self.decoded().map(D::write_length).sum()
    }

    pub const fn bytes(&self) -> usize {
        self.codeunits() * E::UNIT_BYTES
    }

    pub fn bytes_in<D: Encoding>(&self) -> usize {
        self.codeunits_in::<D>() * D::UNIT_BYTES
    }

    /// Transcodes the window into `sink` as `D` and hands the sink back.
    ///
    /// Writes exactly [`View::codeunits_in`] units. Codepoints `D` cannot encode, which only a
    /// window that fails validation can produce, are dropped.
    pub fn to<D: Encoding, S: Sink<D::Unit>>(&self, sink: S) -> S {
        self.decoded().fold(sink, |sink, codepoint| {
            if D::write_length(codepoint) == 0 {
                sink
            } else {
                D::encode(codepoint, sink)
            }
        })
    }
}

impl<'a, E: Encoding> From<&'a [E::Unit]> for View<'a, E> {
    fn from(units: &'a [E::Unit]) -> Self {
        Self::new(units)
    }
}

impl<'a> From<&'a str> for View<'a, Utf8> {
    fn from(text: &'a str) -> Self {
        Self::new(text.as_bytes())
    }
}

struct Sequences<'a, E: Encoding> {
    rest: &'a [E::Unit],
}

impl<'a, E: Encoding> Iterator for Sequences<'a, E> {
    type Item = &'a [E::Unit];

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let &lead = self.rest.first()?;
        let len = E::read_length(lead).min(self.rest.len());
        let (sequence, rest) = self.rest.split_at(len);
        self.rest = rest;
        Some(sequence)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utf8(bytes: &[u8]) -> View<'_, Utf8> {
        View::new(bytes)
    }

    fn utf16(units: &[u16]) -> View<'_, Utf16> {
        View::new(units)
    }

    fn utf32(units: &[u32]) -> View<'_, Utf32> {
        View::new(units)
    }

    #[test]
    fn empty_window() {
        let view = utf8(&[]);
        assert!(view.validate());
        assert!(view.is_empty());
        assert_eq!(view.codepoints(), 0);
        assert_eq!(view.codeunits_in::<Utf16>(), 0);
        assert!(view.to::<Utf32, _>(Vec::new()).is_empty());
    }

    #[test]
    fn ascii() {
        let view = View::from("The quick brown fox");
        assert!(view.validate());
        assert_eq!(view.codepoints(), 19);
        assert_eq!(view.bytes(), 19);
        assert_eq!(view.bytes_in::<Utf16>(), 38);
        assert_eq!(view.bytes_in::<Utf32>(), 76);
    }

    #[test]
    fn mixed_widths() {
        let bytes = [0x41, 0xC3, 0xA9, 0xE2, 0x82, 0xAC];
        let view = utf8(&bytes);
        assert!(view.validate());
        assert_eq!(view.codepoints(), 3);
        assert_eq!(view.codeunits(), 6);
        assert_eq!(view.codeunits_in::<Utf8>(), 6);
        assert_eq!(view.codeunits_in::<Utf16>(), 3);
        assert_eq!(view.codeunits_in::<Utf32>(), 3);
        assert_eq!(view.to::<Utf32, _>(Vec::new()), [0x41, 0xE9, 0x20AC]);
    }

    #[test]
    fn boundary_codepoints_validate() {
        let text = "\u{7F}\u{80}\u{7FF}\u{800}\u{FFFF}\u{10000}\u{10FFFF}";
        let as_utf16: Vec<u16> = text.encode_utf16().collect();
        let as_utf32: Vec<u32> = text.chars().map(u32::from).collect();
        assert!(View::from(text).validate());
        assert!(utf16(&as_utf16).validate());
        assert!(utf32(&as_utf32).validate());
        assert_eq!(View::from(text).codepoints(), 7);
        assert_eq!(utf16(&as_utf16).codepoints(), 7);
    }

    #[test]
    fn utf8_overlong_rejected() {
        assert!(!utf8(&[0xC0, 0x80]).validate());
        assert!(!utf8(&[0xC1, 0xBF]).validate());
        assert!(!utf8(&[0xE0, 0x80, 0xAF]).validate());
        assert!(!utf8(&[0xF0, 0x80, 0x80, 0xAF]).validate());
    }

    #[test]
    fn utf8_truncated_rejected() {
        let view = utf8(&[0x41, 0xF0, 0x90]);
        assert!(!view.validate());
        let error = view.check().unwrap_err();
        assert_eq!(error.kind(), ValidateErrorKind::Truncated);
        assert_eq!(error.valid_up_to(), 1);
        assert_eq!(view.codepoints(), 2);
    }

    #[test]
    fn utf8_scalar_values_checked() {
        // encoded surrogate
        let error = utf8(&[0xED, 0xA0, 0x80]).check().unwrap_err();
        assert_eq!(error.kind(), ValidateErrorKind::InvalidScalar);
        // 0x110000
        let error = utf8(&[0x41, 0xF4, 0x90, 0x80, 0x80]).check().unwrap_err();
        assert_eq!(error.kind(), ValidateErrorKind::InvalidScalar);
        assert_eq!(error.valid_up_to(), 1);
    }

    #[test]
    fn utf8_stray_continuation() {
        let error = utf8(b"ab\x80c").check().unwrap_err();
        assert_eq!(error.kind(), ValidateErrorKind::Malformed);
        assert_eq!(error.valid_up_to(), 2);
        assert_eq!(error.encoding(), EncodingKind::Utf8);
    }

    #[test]
    fn utf16_lone_surrogates() {
        assert!(!utf16(&[0xD800]).validate());
        assert!(!utf16(&[0x0041, 0xD800, 0x0041]).validate());
        assert!(!utf16(&[0xDC00, 0x0041]).validate());
        let error = utf16(&[0x0041, 0xD800]).check().unwrap_err();
        assert_eq!(error.kind(), ValidateErrorKind::Truncated);
        let error = utf16(&[0xD800, 0x0041]).check().unwrap_err();
        assert_eq!(error.kind(), ValidateErrorKind::Malformed);
        assert_eq!(error.valid_up_to(), 0);
    }

    #[test]
    fn utf32_out_of_range() {
        assert!(!utf32(&[0xD800]).validate());
        assert!(!utf32(&[0x110000]).validate());
        assert!(utf32(&[0x10FFFF]).validate());
    }

    #[test]
    fn emoji_across_encodings() {
        let view = utf32(&[0x1F600]);
        assert_eq!(view.to::<Utf8, _>(Vec::new()), [0xF0, 0x9F, 0x98, 0x80]);
        assert_eq!(view.to::<Utf16, _>(Vec::new()), [0xD83D, 0xDE00]);
        assert_eq!(utf16(&[0xD83D, 0xDE00]).to::<Utf32, _>(Vec::new()), [0x1F600]);
        assert_eq!(utf8(&[0xF0, 0x9F, 0x98, 0x80]).codeunits_in::<Utf16>(), 2);
    }

    #[test]
    fn transcode_into_slice() {
        let text = "naïve 😀";
        let mut buffer = [0u16; 16];
        let sink = View::from(text).to::<Utf16, _>(SliceSink::new(&mut buffer));
        let expected: Vec<u16> = text.encode_utf16().collect();
        assert_eq!(sink.written(), expected);
        assert_eq!(sink.position(), View::from(text).codeunits_in::<Utf16>());
    }

    #[test]
    fn transcode_into_borrowed_sink() {
        let mut out = vec![0xFEFFu32];
        View::from("hé").to::<Utf32, _>(&mut out);
        View::from("!").to::<Utf32, _>(&mut out);
        assert_eq!(out, [0xFEFF, 0x68, 0xE9, 0x21]);
    }

    #[test]
    fn invalid_input_stays_in_bounds() {
        let view = utf16(&[0x0041, 0xDC00, 0xD83D]);
        assert_eq!(view.codepoints(), 3);
        let out = view.to::<Utf8, _>(Vec::new());
        assert_eq!(out.len(), view.codeunits_in::<Utf8>());
        assert_eq!(out, b"A");

        let view = utf16(&[0xD800, 0x0041, 0x0042]);
        assert!(!view.validate());
        assert_eq!(view.codepoints(), 2);
        let out = view.to::<Utf8, _>(Vec::new());
        assert_eq!(out.len(), view.codeunits_in::<Utf8>());
        assert_eq!(view.to::<Utf32, _>(Vec::new()).len(), view.codeunits_in::<Utf32>());
    }

    #[test]
    fn error_display() {
        let error = utf8(&[0xC0, 0x80]).check().unwrap_err();
        assert_eq!(error.to_string(), "invalid UTF-8: malformed sequence at unit 0");
    }
}
