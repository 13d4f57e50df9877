//! Newest-first history of generated results.

use uuid::Uuid;

use super::model::GeneratedResult;

/// In-memory, newest-first list of results.
///
/// Results only ever arrive in batches of two (one per prompt variant). A new
/// batch goes in front of everything already present and keeps its own
/// internal order. Nothing is persisted.
#[derive(Debug, Clone, Default)]
pub struct ResultHistory {
    entries: Vec<GeneratedResult>,
}

impl ResultHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Puts both results of a batch in front of all earlier results.
    pub fn prepend_batch(&mut self, batch: [GeneratedResult; 2]) {
        self.entries.splice(0..0, batch);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates newest first.
    pub fn iter(&self) -> impl Iterator<Item = &GeneratedResult> {
        self.entries.iter()
    }

    pub fn find(&self, id: &Uuid) -> Option<&GeneratedResult> {
        self.entries.iter().find(|result| &result.id == id)
    }

    /// Result at a 1-based display position (1 = newest).
    pub fn at_position(&self, position: usize) -> Option<&GeneratedResult> {
        position.checked_sub(1).and_then(|index| self.entries.get(index))
    }

    /// Fallback heading for entries without a view label.
    ///
    /// Options are numbered oldest-first, so the newest entry carries the
    /// highest number.
    pub fn heading_at(&self, position: usize) -> Option<String> {
        let result = self.at_position(position)?;
        Some(match &result.view_label {
            Some(label) => label.clone(),
            None => format!("Opção #{}", self.len() + 1 - position),
        })
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
