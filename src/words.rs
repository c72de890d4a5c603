//! Random word source for the F1 action.

use rand::Rng;

/// A fixed list of words to pick from.
#[derive(Clone, Copy, Debug)]
pub struct Dictionary {
    words: &'static [&'static str],
}

impl Dictionary {
    pub const fn new(words: &'static [&'static str]) -> Self {
        Self { words }
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&'static str> {
        if self.words.is_empty() {
            return None;
        }
        Some(self.words[rng.gen_range(0..self.words.len())])
    }
}

impl Default for Dictionary {
    fn default() -> Self {
        Self::new(crate::WORDS)
    }
}
