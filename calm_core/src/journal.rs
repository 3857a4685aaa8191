//! In-memory journal.
//!
//! Entries live for the lifetime of the [`Journal`] value; nothing is
//! written to disk. A reflection is a fixed, supportive prompt attached on
//! request, not an analysis of the text.

use crate::{Error, JournalEntry, Mood, Result};
use chrono::Utc;
use uuid::Uuid;

/// Prompt offered when the user asks for a reflection
pub const REFLECTION: &str = "I notice you're processing some challenging feelings. The way you described your day shows self-awareness, which is a strength. Consider: what would you tell a friend experiencing this situation?";

/// Reflection for `content`; blank text gets none
pub fn reflect(content: &str) -> Result<&'static str> {
    if content.trim().is_empty() {
        return Err(Error::EmptyEntry);
    }
    Ok(REFLECTION)
}

#[derive(Clone, Debug, Default)]
pub struct Journal {
    entries: Vec<JournalEntry>,
}

impl Journal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Entries in the order they were written
    pub fn entries(&self) -> &[JournalEntry] {
        &self.entries
    }

    /// Save a new entry
    ///
    /// Blank content is rejected and nothing is stored.
    pub fn write(&mut self, content: &str, mood: Option<Mood>) -> Result<&JournalEntry> {
        if content.trim().is_empty() {
            return Err(Error::EmptyEntry);
        }

        let entry = JournalEntry {
            id: Uuid::new_v4(),
            content: content.to_string(),
            mood,
            reflection: None,
            written_at: Utc::now(),
        };
        tracing::debug!(
            "Journal entry {} saved ({})",
            entry.id,
            mood.map_or("no mood", Mood::label)
        );
        self.entries.push(entry);
        Ok(&self.entries[self.entries.len() - 1])
    }

    /// Attach a reflection to the newest entry
    ///
    /// An entry keeps the first reflection it was given. Returns `None`
    /// when the journal is empty.
    pub fn reflect_on_latest(&mut self) -> Option<&JournalEntry> {
        let entry = self.entries.last_mut()?;
        if entry.reflection.is_none() {
            entry.reflection = reflect(&entry.content).ok().map(str::to_string);
        }
        Some(entry)
    }

    /// How often each mood was recorded, in picker order, skipping moods
    /// that never appear
    pub fn mood_counts(&self) -> Vec<(Mood, usize)> {
        Mood::ALL
            .into_iter()
            .map(|mood| {
                let count = self.entries.iter().filter(|e| e.mood == Some(mood)).count();
                (mood, count)
            })
            .filter(|(_, count)| *count > 0)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_keeps_order_and_mood() {
        let mut journal = Journal::new();
        journal.write("Long day at work", Some(Mood::Tired)).unwrap();
        journal.write("Walked by the river", None).unwrap();

        let entries = journal.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].content, "Long day at work");
        assert_eq!(entries[0].mood, Some(Mood::Tired));
        assert_eq!(entries[1].mood, None);
        assert_ne!(entries[0].id, entries[1].id);
        assert!(entries.iter().all(|e| e.reflection.is_none()));
    }

    #[test]
    fn test_blank_entry_rejected() {
        let mut journal = Journal::new();
        assert!(matches!(journal.write("  \n\t", Some(Mood::Sad)), Err(Error::EmptyEntry)));
        assert!(journal.entries().is_empty());
        assert!(matches!(reflect(""), Err(Error::EmptyEntry)));
    }

    #[test]
    fn test_reflection_attaches_once() {
        let mut journal = Journal::new();
        assert!(journal.reflect_on_latest().is_none());

        journal.write("I snapped at a friend", Some(Mood::Angry)).unwrap();
        let entry = journal.reflect_on_latest().unwrap();
        assert_eq!(entry.reflection.as_deref(), Some(REFLECTION));

        journal.entries[0].reflection = Some("earlier".into());
        let entry = journal.reflect_on_latest().unwrap();
        assert_eq!(entry.reflection.as_deref(), Some("earlier"));
    }

    #[test]
    fn test_mood_counts_in_picker_order() {
        let mut journal = Journal::new();
        journal.write("a", Some(Mood::Calm)).unwrap();
        journal.write("b", Some(Mood::Happy)).unwrap();
        journal.write("c", Some(Mood::Calm)).unwrap();
        journal.write("d", None).unwrap();

        assert_eq!(
            journal.mood_counts(),
            vec![(Mood::Happy, 1), (Mood::Calm, 2)]
        );
    }
}
