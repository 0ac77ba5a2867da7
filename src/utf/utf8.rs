use crate::utf::*;

/// UTF-8: one to four bytes per codepoint.
#[derive(Copy, Clone, Debug)]
pub enum Utf8 {}

impl Sealed for Utf8 {}

impl Utf8 {
    #[inline]
    const fn is_continuation(byte: u8) -> bool {
        byte & 0b1100_0000 == 0b1000_0000
    }

    /// Lead byte pattern required for a sequence of `len` bytes, as `(mask, marker)`.
    #[inline]
    const fn lead_pattern(len: usize) -> Option<(u8, u8)> {
        match len {
            1 => Some((0b1000_0000, 0b0000_0000)),
            2 => Some((0b1110_0000, 0b1100_0000)),
            3 => Some((0b1111_0000, 0b1110_0000)),
            4 => Some((0b1111_1000, 0b1111_0000)),
            _ => None,
        }
    }

    #[inline]
    const fn is_overlong(sequence: &[u8]) -> bool {
        match sequence.len() {
            2 => sequence[0] <= 0xC1,
            3 => sequence[0] == 0xE0 && sequence[1] < 0xA0,
            4 => sequence[0] == 0xF0 && sequence[1] < 0x90,
            _ => false,
        }
    }
}

impl Encoding for Utf8 {
    type Unit = u8;

    const KIND: EncodingKind = EncodingKind::Utf8;
    const MAX_LEN: usize = 4;

    #[inline]
    fn read_length(lead: u8) -> usize {
        match lead.leading_ones() {
            0 => 1,
            n @ 2..=4 => n as usize,
            _ => 1,
        }
    }

    #[inline]
    fn write_length(codepoint: Codepoint) -> usize {
        match codepoint {
            0..=0x7F => 1,
            0x80..=0x7FF => 2,
            0x800..=0xD7FF => 3,
            0xD800..=0xDFFF => 0,
            0xE000..=0xFFFF => 3,
            0x10000..=0x10FFFF => 4,
            _ => 0,
        }
    }

    fn validate(sequence: &[u8]) -> bool {
        let Some((mask, marker)) = Self::lead_pattern(sequence.len()) else {
            return false;
        };
        if sequence[0] & mask != marker {
            return false;
        }
        if !sequence[1..].iter().all(|&byte| Self::is_continuation(byte)) {
            return false;
        }
        !Self::is_overlong(sequence)
    }

    #[inline]
    fn decode(sequence: &[u8]) -> Codepoint {
        let lead = sequence[0];
        let len = Self::read_length(lead);
        let mut codepoint = match len {
            1 => return lead as Codepoint,
            2 => lead & 0b0001_1111,
            3 => lead & 0b0000_1111,
            _ => lead & 0b0000_0111,
        } as Codepoint;
        for &byte in &sequence[1..len] {
            codepoint = (codepoint << 6) | (byte & 0b0011_1111) as Codepoint;
        }
        codepoint
    }

    fn encode<S: Sink<u8>>(codepoint: Codepoint, mut sink: S) -> S {
        let len = Self::write_length(codepoint);
        assert!(len != 0, "codepoint {codepoint:#X} cannot be encoded as UTF-8");
        let mut bytes = [0u8; 4];
        let mut value = codepoint;
        for byte in bytes[1..len].iter_mut().rev() {
            *byte = (value & 0b0011_1111) as u8 | 0b1000_0000;
            value >>= 6;
        }
        bytes[0] = match len {
            1 => value as u8,
            2 => value as u8 | 0b1100_0000,
            3 => value as u8 | 0b1110_0000,
            _ => value as u8 | 0b1111_0000,
        };
        for &byte in &bytes[..len] {
            sink.put(byte);
        }
        sink
    }
}
