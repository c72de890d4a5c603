//! Bounded text buffer echoed on screen.

/// Result of appending one character to a [`DisplayString`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PushOutcome {
    /// Character appended, buffer still below the bound.
    Appended,
    /// Character appended and the buffer is now exactly at the bound.
    Filled,
    /// Buffer already full; nothing changed.
    Rejected,
}

/// The current text buffer. Length is counted in `char`s and never exceeds
/// `max_chars`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DisplayString {
    text: String,
    len: usize,
    max_chars: usize,
}

impl DisplayString {
    pub fn new(max_chars: usize) -> Self {
        Self {
            text: String::new(),
            len: 0,
            max_chars,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn max_chars(&self) -> usize {
        self.max_chars
    }

    pub fn is_full(&self) -> bool {
        self.len >= self.max_chars
    }

    pub fn last(&self) -> Option<char> {
        self.text.chars().last()
    }

    pub fn push(&mut self, c: char) -> PushOutcome {
        if self.is_full() {
            return PushOutcome::Rejected;
        }
        self.text.push(c);
        self.len += 1;
        if self.len == self.max_chars {
            PushOutcome::Filled
        } else {
            PushOutcome::Appended
        }
    }

    pub fn pop(&mut self) -> Option<char> {
        let c = self.text.pop()?;
        self.len -= 1;
        Some(c)
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.len = 0;
    }

    /// Replace the whole buffer, truncating to the bound.
    pub fn replace(&mut self, s: &str) {
        self.text.clear();
        self.text.extend(s.chars().take(self.max_chars));
        self.len = self.text.chars().count();
    }
}
