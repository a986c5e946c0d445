//! Source buffers and the offset space shared by all of them.
//!
//! Every cooked buffer occupies a disjoint slice of one global offset space, so
//! a bare [`TextRange`] is enough to identify both the text and the buffer it
//! came from. Compiler-generated names live in the same space but belong to no
//! buffer; those are *placeholders*.

use std::fmt;

use text_size::{TextRange, TextSize};

/// Identity of a cooked source buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BufferId(u32);

impl BufferId {
    pub fn new(index: usize) -> Self {
        Self(index as u32)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A range resolved back to the file it was read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    pub path: String,
    /// Offset relative to the start of the file.
    pub offset: u32,
    pub len: u32,
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' at {} for {}", self.path, self.offset, self.len)
    }
}

/// What the scope tree needs from source management.
pub trait SourceProvider {
    /// The buffer owning every byte of `range`, if any.
    fn find_buffer(&self, range: TextRange) -> Option<BufferId>;

    /// True for ranges of synthesized names that have no backing buffer.
    fn is_placeholder(&self, range: TextRange) -> bool;

    /// File path, offset and length of `range`, for diagnosis.
    fn locate(&self, range: TextRange) -> Option<SourceLocation>;

    /// Minimal range covering both `a` and `b` (same buffer).
    fn cover(&self, a: TextRange, b: TextRange) -> TextRange {
        a.cover(b)
    }
}

#[derive(Debug, Clone)]
struct Buffer {
    path: String,
    range: TextRange,
}

/// Default [`SourceProvider`]: allocates buffers and placeholders back to back.
#[derive(Debug, Clone, Default)]
pub struct SourceMap {
    buffers: Vec<Buffer>,
    placeholders: Vec<TextRange>,
    next: TextSize,
}

impl SourceMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve `len` bytes for the file at `path`; returns the buffer and its
    /// range in the global offset space.
    pub fn add_buffer(&mut self, path: impl Into<String>, len: u32) -> (BufferId, TextRange) {
        let range = self.reserve(len);
        let id = BufferId::new(self.buffers.len());
        self.buffers.push(Buffer {
            path: path.into(),
            range,
        });
        (id, range)
    }

    /// Reserve `len` bytes for a compiler-generated name.
    pub fn add_placeholder(&mut self, len: u32) -> TextRange {
        let range = self.reserve(len);
        self.placeholders.push(range);
        range
    }

    /// Full range of a buffer.
    pub fn buffer_range(&self, id: BufferId) -> Option<TextRange> {
        self.buffers.get(id.index()).map(|b| b.range)
    }

    pub fn buffer_path(&self, id: BufferId) -> Option<&str> {
        self.buffers.get(id.index()).map(|b| b.path.as_str())
    }

    pub fn buffer_count(&self) -> usize {
        self.buffers.len()
    }

    fn reserve(&mut self, len: u32) -> TextRange {
        let range = TextRange::at(self.next, TextSize::from(len));
        // Keep one byte of separation so adjacent buffers never touch.
        self.next = range.end() + TextSize::from(1);
        range
    }
}

impl SourceProvider for SourceMap {
    fn find_buffer(&self, range: TextRange) -> Option<BufferId> {
        // Buffers are allocated in increasing offset order.
        let idx = self
            .buffers
            .partition_point(|b| b.range.start() <= range.start());
        let idx = idx.checked_sub(1)?;
        self.buffers[idx]
            .range
            .contains_range(range)
            .then(|| BufferId::new(idx))
    }

    fn is_placeholder(&self, range: TextRange) -> bool {
        self.placeholders.iter().any(|p| p.contains_range(range))
    }

    fn locate(&self, range: TextRange) -> Option<SourceLocation> {
        let buffer = &self.buffers[self.find_buffer(range)?.index()];
        Some(SourceLocation {
            path: buffer.path.clone(),
            offset: u32::from(range.start() - buffer.range.start()),
            len: u32::from(range.len()),
        })
    }
}
