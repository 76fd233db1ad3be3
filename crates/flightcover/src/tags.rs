//! Ordered text-token editor.
//!
//! Holds the passenger wallet addresses while the form is being edited.
//! Tokens are committed by typing a delimiter (comma or enter by default)
//! or through an explicit add. Nothing is validated or de-duplicated here;
//! that happens when the form is submitted.

use tracing::trace;

/// Default delimiters: the comma and enter keys.
pub const DEFAULT_DELIMITERS: &[char] = &[',', '\n'];

/// A single token paired with its generated identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    /// Identifier unique within the editor that created the tag.
    pub id: u64,
    /// The token text.
    pub text: String,
}

/// An ordered collection of [`Tag`]s with add/remove editing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagEditor {
    tags: Vec<Tag>,
    delimiters: Vec<char>,
    pending: String,
    next_id: u64,
}

impl Default for TagEditor {
    fn default() -> Self {
        Self::with_delimiters(DEFAULT_DELIMITERS.iter().copied())
    }
}

impl TagEditor {
    /// Create an empty editor with the default delimiters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty editor that commits on the given delimiters.
    #[must_use]
    pub fn with_delimiters(delimiters: impl IntoIterator<Item = char>) -> Self {
        Self {
            tags: Vec::new(),
            delimiters: delimiters.into_iter().collect(),
            pending: String::new(),
            next_id: 0,
        }
    }

    /// Create an editor pre-filled with `tokens`, in order.
    #[must_use]
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut editor = Self::default();
        for token in tokens {
            editor.add(token.as_ref());
        }
        editor
    }

    /// Append a tag for `token`.
    ///
    /// Surrounding whitespace is trimmed and blank tokens are ignored.
    /// Returns the id of the new tag.
    pub fn add(&mut self, token: &str) -> Option<u64> {
        let text = token.trim();
        if text.is_empty() {
            return None;
        }

        let id = self.next_id;
        self.next_id += 1;
        self.tags.push(Tag {
            id,
            text: text.to_string(),
        });
        trace!(id, text, "tag added");
        Some(id)
    }

    /// Remove the tag at `index`, keeping the order of the rest.
    ///
    /// Out-of-range indices are a no-op and return `None`.
    pub fn remove_at(&mut self, index: usize) -> Option<Tag> {
        if index >= self.tags.len() {
            trace!(index, len = self.tags.len(), "remove out of range ignored");
            return None;
        }
        let tag = self.tags.remove(index);
        trace!(id = tag.id, index, "tag removed");
        Some(tag)
    }

    /// Feed typed text into the editor.
    ///
    /// Every delimiter commits the text typed before it as one tag. Text
    /// after the last delimiter stays pending until the next delimiter or
    /// [`commit`](Self::commit). Returns the ids of the tags added.
    pub fn input(&mut self, text: &str) -> Vec<u64> {
        let mut added = Vec::new();
        for ch in text.chars() {
            if self.delimiters.contains(&ch) {
                added.extend(self.commit());
            } else {
                self.pending.push(ch);
            }
        }
        added
    }

    /// Commit the pending text as a tag (the explicit "add" action).
    pub fn commit(&mut self) -> Option<u64> {
        let pending = std::mem::take(&mut self.pending);
        self.add(&pending)
    }

    /// Text typed but not yet committed.
    #[must_use]
    pub fn pending(&self) -> &str {
        &self.pending
    }

    /// The delimiters that commit a tag.
    #[must_use]
    pub fn delimiters(&self) -> &[char] {
        &self.delimiters
    }

    /// All tags, in insertion order.
    #[must_use]
    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    /// Tag texts, in insertion order.
    pub fn texts(&self) -> impl Iterator<Item = &str> + '_ {
        self.tags.iter().map(|t| t.text.as_str())
    }

    /// Number of committed tags.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// Check if no tags are committed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}
