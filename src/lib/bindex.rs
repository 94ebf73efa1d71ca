//! In-memory block index mapping uncompressed offsets to compressed offsets.
//!
//! The writer appends one entry per uncompressed input block; the reader
//! reconstructs the same sequence from the BI subfield chain. Entries are
//! strictly increasing in both coordinates, which makes random access by
//! uncompressed offset a binary search.

/// One block boundary: where a block starts in each stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BindexEntry {
    /// Byte offset of the block start in the compressed stream.
    pub zoffset: u64,
    /// Byte offset of the block start in the uncompressed stream.
    pub uoffset: u64,
}

/// Ordered sequence of block boundaries.
#[derive(Debug, Clone, Default)]
pub struct BlockIndex {
    entries: Vec<BindexEntry>,
}

impl BlockIndex {
    /// Create an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Append a block boundary. Callers append in stream order.
    pub fn push(&mut self, zoffset: u64, uoffset: u64) {
        debug_assert!(
            self.entries.last().is_none_or(|last| zoffset > last.zoffset),
            "block index zoffsets must be strictly increasing"
        );
        self.entries.push(BindexEntry { zoffset, uoffset });
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if no entries have been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries in stream order.
    #[must_use]
    pub fn entries(&self) -> &[BindexEntry] {
        &self.entries
    }

    /// Find the block containing the uncompressed offset `uoffset`: the
    /// greatest entry whose `uoffset` is `<=` the target. An offset exactly
    /// on a block boundary belongs to the block that starts there.
    ///
    /// Returns `None` only when the index is empty.
    #[must_use]
    pub fn lookup(&self, uoffset: u64) -> Option<&BindexEntry> {
        let idx = self.entries.partition_point(|e| e.uoffset <= uoffset);
        if idx == 0 { None } else { Some(&self.entries[idx - 1]) }
    }
}
