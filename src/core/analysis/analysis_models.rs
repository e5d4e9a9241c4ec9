// Analysis domain models - plain data produced by the extractor, detector and
// classifier. No Discord types in here.

use serde::Serialize;

/// A code region found in a message.
///
/// `start_offset`/`end_offset` are byte offsets into the original text and cover
/// the whole match, delimiters included, so callers can splice replacements in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodeBlock {
    /// Trimmed body. Never empty.
    pub code: String,
    /// Language tag the author wrote on the opening fence, if any.
    pub language: Option<String>,
    pub start_offset: usize,
    pub end_offset: usize,
}

/// Which parts of the classifier fired for a message.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ClassificationSignals {
    /// How many vocabulary keywords appear in the message.
    pub keyword_hits: usize,
    /// Locale group whose question indicator matched first.
    pub question_locale: Option<&'static str>,
    /// First failure phrase that matched.
    pub problem_indicator: Option<&'static str>,
    /// The raw text contains a literal `?`.
    pub question_mark: bool,
}

impl ClassificationSignals {
    pub fn has_question(&self) -> bool {
        self.question_locale.is_some() || self.question_mark
    }

    pub fn has_problem(&self) -> bool {
        self.problem_indicator.is_some()
    }
}

/// Outcome of classifying one message.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub is_programming_question: bool,
    /// Normalized score in `[0, 1]`.
    pub confidence: f32,
    /// Short phrase around the first programming keyword, original casing.
    pub concept: Option<String>,
    pub signals: ClassificationSignals,
}

/// One entry of the language detection table.
///
/// Patterns use `regex` syntax; put `(?i)` / `(?m)` flags inline where needed.
#[derive(Debug, Clone, Copy)]
pub struct LanguageSignature {
    pub language: &'static str,
    pub patterns: &'static [&'static str],
    pub file_extensions: &'static [&'static str],
    pub keywords: &'static [&'static str],
}
