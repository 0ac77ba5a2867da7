use crate::utf::*;

/// UTF-32: every codepoint is a single `u32`.
#[derive(Copy, Clone, Debug)]
pub enum Utf32 {}

impl Sealed for Utf32 {}

impl Encoding for Utf32 {
    type Unit = u32;

    const KIND: EncodingKind = EncodingKind::Utf32;
    const MAX_LEN: usize = 1;

    #[inline]
    fn read_length(_lead: u32) -> usize {
        1
    }

    #[inline]
    fn write_length(codepoint: Codepoint) -> usize {
        usize::from(is_valid_scalar_value(codepoint))
    }

    /// The value itself is checked by [`is_valid_scalar_value`], not here.
    #[inline]
    fn validate(sequence: &[u32]) -> bool {
        sequence.len() == 1
    }

    #[inline]
    fn decode(sequence: &[u32]) -> Codepoint {
        sequence[0]
    }

    fn encode<S: Sink<u32>>(codepoint: Codepoint, mut sink: S) -> S {
        assert!(
            is_valid_scalar_value(codepoint),
            "codepoint {codepoint:#X} cannot be encoded as UTF-32"
        );
        sink.put(codepoint);
        sink
    }
}
