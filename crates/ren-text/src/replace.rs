//! Codepoint replacement tables
//!
//! A replacement swaps the glyph drawn for a codepoint while the text
//! still advances by the original glyph's width. Editors use this to
//! make whitespace or control characters visible.

use crate::{Result, TextError, utf8};

/// Storage grows by this many entries at a time
pub const REPLACEMENT_CHUNK_SIZE: usize = 8;

/// A single `src -> dst` codepoint pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Replacement {
    pub src: u32,
    pub dst: u32,
}

/// Ordered list of replacements; the first matching entry wins
#[derive(Debug, Clone, Default)]
pub struct ReplacementTable {
    replacements: Vec<Replacement>,
}

impl ReplacementTable {
    /// Create an empty table (does not allocate)
    pub fn new() -> Self {
        Self {
            replacements: Vec::new(),
        }
    }

    /// Append a replacement from the first character of `src` to the
    /// first character of `dst`.
    ///
    /// On allocation failure the table is left unchanged.
    pub fn add(&mut self, src: &str, dst: &str) -> Result<()> {
        let len = self.replacements.len();
        if len % REPLACEMENT_CHUNK_SIZE == 0 {
            self.replacements
                .try_reserve_exact(REPLACEMENT_CHUNK_SIZE)
                .map_err(|e| TextError::OutOfMemory(format!("replacement table: {e}")))?;
        }
        self.replacements.push(Replacement {
            src: utf8::first_codepoint(src),
            dst: utf8::first_codepoint(dst),
        });
        Ok(())
    }

    /// Find the replacement for `codepoint`, if any
    pub fn lookup(&self, codepoint: u32) -> Option<u32> {
        self.replacements
            .iter()
            .find(|rep| rep.src == codepoint)
            .map(|rep| rep.dst)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.replacements.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.replacements.is_empty()
    }

    #[cfg(test)]
    fn capacity(&self) -> usize {
        self.replacements.capacity()
    }
}
