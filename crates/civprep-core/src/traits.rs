//! Read-only access to curriculum and question data.
//!
//! The planner and score calculator take plain slices; this trait is the
//! seam the CLI and report layers use to fetch those slices from whatever
//! bank is loaded.

use crate::model::{ContentBank, Question, Topic};

/// Source of the fixed curriculum and question bank.
pub trait ContentRepository {
    /// Every topic, in curriculum order.
    fn topics(&self) -> &[Topic];

    /// All questions, in bank order.
    fn questions(&self) -> &[Question];

    /// Look up a topic by identifier.
    fn topic(&self, id: &str) -> Option<&Topic> {
        self.topics().iter().find(|t| t.id == id)
    }

    /// Questions belonging to `topic`, in bank order.
    fn questions_for(&self, topic: &str) -> Vec<Question> {
        self.questions()
            .iter()
            .filter(|q| q.topic == topic)
            .cloned()
            .collect()
    }
}

impl ContentRepository for ContentBank {
    fn topics(&self) -> &[Topic] {
        &self.topics
    }

    fn questions(&self) -> &[Question] {
        &self.questions
    }
}
