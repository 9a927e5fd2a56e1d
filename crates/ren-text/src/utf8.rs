//! Lenient UTF-8 codepoint decoding
//!
//! The lead byte alone decides how many continuation bytes are read.
//! Nothing is validated: overlong forms, surrogates and stray
//! continuation bytes all decode to *some* value instead of failing.
//! Reads never leave the input slice; a continuation byte that is
//! missing or NUL contributes zero bits and is left unconsumed.

/// Decode one codepoint from the start of `bytes`.
///
/// Returns the codepoint and the number of bytes consumed. Empty input
/// decodes to `(0, 0)`.
pub fn decode(bytes: &[u8]) -> (u32, usize) {
    let Some(&lead) = bytes.first() else {
        return (0, 0);
    };

    let (mut codepoint, continuation) = match lead & 0xf0 {
        0xf0 => ((lead & 0x07) as u32, 3),
        0xe0 => ((lead & 0x0f) as u32, 2),
        0xc0 | 0xd0 => ((lead & 0x1f) as u32, 1),
        _ => (lead as u32, 0),
    };

    let mut consumed = 1;
    for _ in 0..continuation {
        let byte = match bytes.get(consumed) {
            Some(&b) if b != 0 => {
                consumed += 1;
                b
            }
            _ => 0,
        };
        codepoint = (codepoint << 6) | (byte & 0x3f) as u32;
    }

    (codepoint, consumed)
}

/// Decode the first codepoint of `text`
pub fn first_codepoint<T: AsRef<[u8]> + ?Sized>(text: &T) -> u32 {
    decode(text.as_ref()).0
}

/// Iterate the codepoints of `text` up to its end or the first NUL byte
pub fn codepoints<T: AsRef<[u8]> + ?Sized>(text: &T) -> Codepoints<'_> {
    Codepoints { bytes: text.as_ref() }
}

/// Iterator over leniently decoded codepoints
#[derive(Debug, Clone)]
pub struct Codepoints<'a> {
    bytes: &'a [u8],
}

impl<'a> Codepoints<'a> {
    /// Bytes not yet decoded
    pub fn remaining(&self) -> &'a [u8] {
        self.bytes
    }
}

impl Iterator for Codepoints<'_> {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        match self.bytes.first() {
            None | Some(0) => None,
            Some(_) => {
                let (codepoint, consumed) = decode(self.bytes);
                self.bytes = &self.bytes[consumed..];
                Some(codepoint)
            }
        }
    }
}
