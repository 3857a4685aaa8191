//! Daily affirmations with a wrapping cursor.

/// Built-in affirmations, in display order
pub const AFFIRMATIONS: [&str; 8] = [
    "I am capable of handling whatever comes my way.",
    "This feeling is temporary, and I will get through it.",
    "I choose peace over worry.",
    "I am worthy of love and respect.",
    "Every breath I take calms my mind and body.",
    "I trust in my ability to navigate challenges.",
    "I am present, grounded, and safe.",
    "My thoughts do not define me; I am in control.",
];

/// Cursor over [`AFFIRMATIONS`] that wraps in both directions
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AffirmationDeck {
    index: usize,
}

impl AffirmationDeck {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deck positioned at `index`, taken modulo the deck size
    pub fn at(index: usize) -> Self {
        Self {
            index: index % AFFIRMATIONS.len(),
        }
    }

    pub fn current(&self) -> &'static str {
        AFFIRMATIONS[self.index]
    }

    pub fn next(&mut self) -> &'static str {
        self.index = (self.index + 1) % AFFIRMATIONS.len();
        self.current()
    }

    pub fn previous(&mut self) -> &'static str {
        self.index = self.index.checked_sub(1).unwrap_or(AFFIRMATIONS.len() - 1);
        self.current()
    }

    /// 1-based position and deck size, e.g. `(3, 8)`
    pub fn position(&self) -> (usize, usize) {
        (self.index + 1, AFFIRMATIONS.len())
    }
}
