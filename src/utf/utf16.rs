use crate::utf::*;

/// UTF-16 in native `u16` units: one unit, or a surrogate pair above the BMP.
#[derive(Copy, Clone, Debug)]
pub enum Utf16 {}

impl Sealed for Utf16 {}

impl Utf16 {
    #[inline]
    const fn is_high_surrogate(unit: u16) -> bool {
        matches!(unit, 0xD800..=0xDBFF)
    }

    #[inline]
    const fn is_low_surrogate(unit: u16) -> bool {
        matches!(unit, 0xDC00..=0xDFFF)
    }
}

impl Encoding for Utf16 {
    type Unit = u16;

    const KIND: EncodingKind = EncodingKind::Utf16;
    const MAX_LEN: usize = 2;

    #[inline]
    fn read_length(lead: u16) -> usize {
        if Self::is_high_surrogate(lead) {
            2
        } else {
            1
        }
    }

    #[inline]
    fn write_length(codepoint: Codepoint) -> usize {
        match codepoint {
            0xD800..=0xDFFF => 0,
            0x0000..=0xFFFF => 1,
            0x10000..=0x10FFFF => 2,
            _ => 0,
        }
    }

    #[inline]
    fn validate(sequence: &[u16]) -> bool {
        match *sequence {
            [unit] => !matches!(unit, 0xD800..=0xDFFF),
            [high, low] => Self::is_high_surrogate(high) && Self::is_low_surrogate(low),
            _ => false,
        }
    }

    #[inline]
    fn decode(sequence: &[u16]) -> Codepoint {
        let high = sequence[0];
        if !Self::is_high_surrogate(high) {
            return high as Codepoint;
        }
        let low = sequence[1];
        // payload bits only, so an unpaired high surrogate cannot underflow
        ((((high & 0x3FF) as Codepoint) << 10) | (low & 0x3FF) as Codepoint) + 0x10000
    }

    fn encode<S: Sink<u16>>(codepoint: Codepoint, mut sink: S) -> S {
        match Self::write_length(codepoint) {
            1 => sink.put(codepoint as u16),
            2 => {
                let offset = codepoint - 0x10000;
                sink.put(((offset >> 10) + 0xD800) as u16);
                sink.put(((offset & 0x3FF) + 0xDC00) as u16);
            }
            _ => panic!("codepoint {codepoint:#X} cannot be encoded as UTF-16"),
        }
        sink
    }
}
