//! Span-based source edit buffer.
//!
//! Rewrites are recorded against the original source text and rendered in a
//! single forward pass, so untouched code keeps its formatting and comments.
//!
//! An edit whose range lies strictly inside a replaced range is subsumed by the
//! replacement. A [`Piece::Source`] reference renders a range of the original
//! source *with* the edits recorded inside it, which is how a node is moved
//! elsewhere while keeping its own rewrites.

use smallvec::SmallVec;

/// One piece of replacement content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Piece {
    /// Literal text.
    Text(String),
    /// A range of the original source, rendered with its inner edits applied.
    Source(u32, u32),
}

/// Replacement content made of literal text and source references.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fragment {
    pieces: SmallVec<[Piece; 3]>,
}

impl Fragment {
    /// Create an empty fragment.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append literal text.
    #[inline]
    pub fn text(mut self, text: impl Into<String>) -> Self {
        let text = text.into();
        if !text.is_empty() {
            self.pieces.push(Piece::Text(text));
        }
        self
    }

    /// Append a reference to `start..end` of the original source.
    #[inline]
    pub fn source(mut self, start: u32, end: u32) -> Self {
        self.pieces.push(Piece::Source(start, end));
        self
    }

    #[inline]
    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }
}

impl From<&str> for Fragment {
    fn from(text: &str) -> Self {
        Fragment::new().text(text)
    }
}

impl From<String> for Fragment {
    fn from(text: String) -> Self {
        Fragment::new().text(text)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EditKind {
    Prepend,
    Append,
    Overwrite,
}

#[derive(Debug, Clone)]
struct Edit {
    start: u32,
    end: u32,
    kind: EditKind,
    seq: u32,
    content: Fragment,
}

impl Edit {
    /// Whether this edit belongs to the rendering of `lo..hi`.
    ///
    /// Insertions on the boundary of a nested range belong to the enclosing code.
    fn is_within(&self, lo: u32, hi: u32, nested: bool) -> bool {
        match self.kind {
            EditKind::Overwrite => lo <= self.start && self.end <= hi,
            EditKind::Prepend | EditKind::Append => {
                if nested {
                    lo < self.start && self.start < hi
                } else {
                    lo <= self.start && self.start <= hi
                }
            }
        }
    }

    fn order(&self, other: &Edit) -> std::cmp::Ordering {
        use std::cmp::Ordering;

        fn rank(kind: EditKind) -> u8 {
            match kind {
                EditKind::Prepend => 0,
                EditKind::Append => 1,
                EditKind::Overwrite => 2,
            }
        }

        self.start
            .cmp(&other.start)
            .then_with(|| rank(self.kind).cmp(&rank(other.kind)))
            .then_with(|| match self.kind {
                // Later prepends render first.
                EditKind::Prepend => other.seq.cmp(&self.seq),
                EditKind::Append => self.seq.cmp(&other.seq),
                // Outer replacement first, inner ones are subsumed.
                EditKind::Overwrite => other.end.cmp(&self.end).then(self.seq.cmp(&other.seq)),
            })
            .then(Ordering::Equal)
    }
}

/// Edit buffer over an immutable source string.
#[derive(Debug)]
pub struct SourceEdits<'s> {
    source: &'s str,
    edits: Vec<Edit>,
    next_seq: u32,
}

impl<'s> SourceEdits<'s> {
    pub fn new(source: &'s str) -> Self {
        Self {
            source,
            edits: Vec::new(),
            next_seq: 0,
        }
    }

    /// The original source text.
    #[inline]
    pub fn source(&self) -> &'s str {
        self.source
    }

    /// Original source text of `start..end`.
    #[inline]
    pub fn slice(&self, start: u32, end: u32) -> &'s str {
        &self.source[start as usize..end as usize]
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    /// Insert content at `pos`. Later prepends at the same position render before
    /// earlier ones.
    pub fn prepend(&mut self, pos: u32, content: impl Into<Fragment>) {
        self.push(pos, pos, EditKind::Prepend, content.into());
    }

    /// Insert content at `pos`. Later appends at the same position render after
    /// earlier ones.
    pub fn append(&mut self, pos: u32, content: impl Into<Fragment>) {
        self.push(pos, pos, EditKind::Append, content.into());
    }

    /// Replace `start..end` with content.
    pub fn overwrite(&mut self, start: u32, end: u32, content: impl Into<Fragment>) {
        debug_assert!(start <= end, "inverted edit range {start}..{end}");
        self.push(start, end, EditKind::Overwrite, content.into());
    }

    /// Remove `start..end`.
    pub fn remove(&mut self, start: u32, end: u32) {
        self.overwrite(start, end, Fragment::new());
    }

    fn push(&mut self, start: u32, end: u32, kind: EditKind, content: Fragment) {
        let seq = self.next_seq;
        let edit = Edit {
            start,
            end,
            kind,
            seq,
            content,
        };
        // Rendering a reference that selects its own edit never terminates.
        let self_referencing = edit.content.pieces().iter().any(|piece| match piece {
            Piece::Text(_) => false,
            Piece::Source(lo, hi) => edit.is_within(*lo, *hi, true),
        });
        if self_referencing {
            tracing::warn!(start, end, "refusing edit that references its own range");
            return;
        }
        self.next_seq += 1;
        self.edits.push(edit);
    }

    /// Render the whole source with every edit applied.
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(self.source.len() + self.source.len() / 8);
        self.render_into(0, self.source.len() as u32, false, &mut out);
        out
    }

    /// Render `start..end` of the source with the edits strictly inside it applied.
    #[cfg(test)]
    fn render_range(&self, start: u32, end: u32) -> String {
        let mut out = String::with_capacity((end - start) as usize);
        self.render_into(start, end, true, &mut out);
        out
    }

    fn render_into(&self, lo: u32, hi: u32, nested: bool, out: &mut String) {
        let mut edits: Vec<&Edit> = self
            .edits
            .iter()
            .filter(|edit| edit.is_within(lo, hi, nested))
            .collect();
        edits.sort_by(|a, b| a.order(b));

        let mut cursor = lo;
        for edit in edits {
            if edit.start < cursor {
                if edit.end > cursor {
                    tracing::warn!(
                        start = edit.start,
                        end = edit.end,
                        cursor,
                        "dropping edit overlapping a previous replacement"
                    );
                    debug_assert!(false, "overlapping edits at {}..{}", edit.start, edit.end);
                }
                continue;
            }

            out.push_str(&self.source[cursor as usize..edit.start as usize]);
            for piece in edit.content.pieces() {
                match piece {
                    Piece::Text(text) => out.push_str(text),
                    Piece::Source(start, end) => self.render_into(*start, *end, true, out),
                }
            }
            cursor = edit.end;
        }

        out.push_str(&self.source[cursor as usize..hi as usize]);
    }
}
