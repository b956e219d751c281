/// Sorted character offsets at which each line begins.
///
/// `starts[0]` is always 0 and every later entry is the offset just past a
/// `'\n'`, so there is always at least one line, even for an empty document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    starts: Vec<usize>,
}

impl LineIndex {
    /// Build an index by scanning `chars` once for newlines.
    pub fn from_chars<I>(chars: I) -> Self
    where
        I: IntoIterator<Item = char>,
    {
        let mut index = Self { starts: vec![0] };
        index.rebuild(chars);
        index
    }

    /// Recompute every entry from scratch.
    pub fn rebuild<I>(&mut self, chars: I)
    where
        I: IntoIterator<Item = char>,
    {
        self.starts.clear();
        self.starts.push(0);
        self.starts.extend(
            chars
                .into_iter()
                .enumerate()
                .filter(|&(_, ch)| ch == '\n')
                .map(|(i, _)| i + 1),
        );
    }

    pub fn line_count(&self) -> usize {
        self.starts.len()
    }

    /// Offset of the first character of `line`, if the line exists.
    pub fn line_start(&self, line: usize) -> Option<usize> {
        self.starts.get(line).copied()
    }

    /// Line containing `offset`: the last line whose start is `<= offset`.
    ///
    /// Offsets past the end of the document resolve to the last line; callers
    /// bound-check against the document length.
    pub fn line_of(&self, offset: usize) -> usize {
        // starts[0] == 0, so at least one entry satisfies the predicate.
        self.starts.partition_point(|&start| start <= offset) - 1
    }

    /// Patch the index after `text` was inserted at `offset`.
    pub fn apply_insert(&mut self, offset: usize, text: &str) {
        let line = self.line_of(offset);
        let mut inserted = 0;
        let mut new_starts = Vec::new();
        for (i, ch) in text.chars().enumerate() {
            inserted = i + 1;
            if ch == '\n' {
                new_starts.push(offset + i + 1);
            }
        }

        for start in &mut self.starts[line + 1..] {
            *start += inserted;
        }
        self.starts.splice(line + 1..line + 1, new_starts);
    }

    /// Patch the index after `len` characters were removed at `offset`.
    pub fn apply_delete(&mut self, offset: usize, len: usize) {
        let end = offset + len;
        // Lines starting inside (offset, end] lost the newline before them.
        let first = self.starts.partition_point(|&start| start <= offset);
        let last = self.starts.partition_point(|&start| start <= end);
        self.starts.drain(first..last);
        for start in &mut self.starts[first..] {
            *start -= len;
        }
    }

    #[cfg(test)]
    pub(crate) fn starts(&self) -> &[usize] {
        &self.starts
    }
}

impl Default for LineIndex {
    fn default() -> Self {
        Self { starts: vec![0] }
    }
}
