use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Global usage counters. A single record shared by every guild.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BotStats {
    pub questions_answered: u64,
    pub code_fixed: u64,
    pub concepts_explained: u64,
    pub last_updated: DateTime<Utc>,
}

impl BotStats {
    pub fn zeroed() -> Self {
        Self {
            questions_answered: 0,
            code_fixed: 0,
            concepts_explained: 0,
            last_updated: Utc::now(),
        }
    }

    pub fn get(&self, kind: StatKind) -> u64 {
        match kind {
            StatKind::QuestionsAnswered => self.questions_answered,
            StatKind::CodeFixed => self.code_fixed,
            StatKind::ConceptsExplained => self.concepts_explained,
        }
    }

    /// Bump one counter and stamp the update time.
    pub fn increment(&mut self, kind: StatKind) {
        let counter = match kind {
            StatKind::QuestionsAnswered => &mut self.questions_answered,
            StatKind::CodeFixed => &mut self.code_fixed,
            StatKind::ConceptsExplained => &mut self.concepts_explained,
        };
        *counter = counter.saturating_add(1);
        self.last_updated = Utc::now();
    }
}

/// The counters the bot tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatKind {
    /// Automatic answers to a detected question.
    QuestionsAnswered,
    /// Code corrections, automatic or via `fix`.
    CodeFixed,
    /// Explanations requested with `explain`.
    ConceptsExplained,
}

impl StatKind {
    /// Column name used by the SQL store.
    pub fn column(&self) -> &'static str {
        match self {
            StatKind::QuestionsAnswered => "questions_answered",
            StatKind::CodeFixed => "code_fixed",
            StatKind::ConceptsExplained => "concepts_explained",
        }
    }
}

impl std::fmt::Display for StatKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatKind::QuestionsAnswered => write!(f, "Questions Answered"),
            StatKind::CodeFixed => write!(f, "Code Fixed"),
            StatKind::ConceptsExplained => write!(f, "Concepts Explained"),
        }
    }
}
