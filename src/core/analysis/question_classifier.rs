// =============================================================================
// QUESTION CLASSIFIER
// =============================================================================
//
// Cheap keyword scoring that decides whether a chat message is a programming
// question worth an automatic reply. It gates an expensive completion call, so
// it leans towards saying "no".
//
// Score contributions:
// 1. +1 per vocabulary keyword found (capped at KEYWORD_SCORE_CAP)
// 2. +2 once if any locale group has a question indicator
// 3. +2 once if any problem phrase matches
// 4. +1 if the raw text has a literal `?`
//
// Confidence is the score divided by the largest score the message could reach.

use super::analysis_models::{AnalysisResult, ClassificationSignals};

/// Default confidence a message must exceed.
pub const DEFAULT_THRESHOLD: f32 = 0.3;

/// Keyword hits stop adding to the score after this many.
pub const KEYWORD_SCORE_CAP: usize = 3;
const QUESTION_WEIGHT: usize = 2;
const PROBLEM_WEIGHT: usize = 2;
const QUESTION_MARK_WEIGHT: usize = 1;
const MAX_SCORE: usize = KEYWORD_SCORE_CAP + QUESTION_WEIGHT + PROBLEM_WEIGHT + QUESTION_MARK_WEIGHT;

/// Characters of context kept on each side of the concept keyword.
const CONCEPT_WINDOW_CHARS: usize = 20;

/// Programming vocabulary. Order matters: the first hit names the concept.
pub const PROGRAMMING_KEYWORDS: &[&str] = &[
    "code", "function", "error", "bug", "debug", "syntax", "compiler", "variable", "array",
    "object", "class", "method", "property", "javascript", "python", "java", "c++",
    "typescript", "ruby", "php", "golang", "rust", "swift", "kotlin", "c#", ".net", "react",
    "angular", "vue", "node", "express", "django", "flask", "spring", "api", "rest", "graphql",
    "sql", "database", "query", "json", "xml", "html", "css", "http", "request", "response",
    "exception", "try", "catch", "throw", "async", "await", "promise", "callback", "frontend",
    "backend", "fullstack", "algorithm", "data structure", "github", "git", "commit", "branch",
    "merge", "pull request", "docker", "kubernetes", "deploy", "server", "client", "framework",
    "library",
];

/// Interrogatives per locale, scanned in this order.
pub const QUESTION_INDICATORS: &[(&str, &[&str])] = &[
    (
        "en",
        &["how", "why", "what", "when", "where", "who", "which", "can", "could", "help", "?"],
    ),
    (
        "es",
        &["cómo", "por qué", "qué", "cuándo", "dónde", "quién", "cuál", "puedo", "podría", "ayuda"],
    ),
    (
        "pt",
        &["como", "por que", "o que", "quando", "onde", "quem", "qual", "posso", "poderia", "ajuda"],
    ),
    (
        "fr",
        &["comment", "pourquoi", "quoi", "quand", "où", "qui", "quel", "puis-je", "pourrait", "aide"],
    ),
    (
        "de",
        &["wie", "warum", "was", "wann", "wo", "wer", "welche", "kann", "könnte", "hilfe"],
    ),
];

/// Phrases people use when something is broken.
pub const PROBLEM_INDICATORS: &[&str] = &[
    "not working", "doesn't work", "error", "exception", "bug", "issue", "problem", "wrong",
    "incorrect", "fail", "failing", "crashed", "stuck", "help", "fix", "debug", "trouble",
    "struggling", "confused",
];

#[derive(Debug, Clone)]
pub struct QuestionClassifier {
    threshold: f32,
}

impl Default for QuestionClassifier {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl QuestionClassifier {
    /// Classifier with a custom confidence threshold (clamped to `[0, 1]`).
    pub fn with_threshold(threshold: f32) -> Self {
        Self {
            threshold: threshold.clamp(0.0, 1.0),
        }
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Score a message. Never fails; empty input is simply not a question.
    pub fn classify(&self, text: &str) -> AnalysisResult {
        let lowered = fold_case(text);
        let mut signals = ClassificationSignals::default();
        let mut concept = None;

        for keyword in PROGRAMMING_KEYWORDS {
            if let Some(index) = lowered.find(keyword) {
                signals.keyword_hits += 1;
                if concept.is_none() {
                    concept = concept_window(text, index, keyword.len());
                }
            }
        }

        // First locale with any hit wins; the weight is added once.
        signals.question_locale = QUESTION_INDICATORS
            .iter()
            .find(|(_, indicators)| indicators.iter().any(|i| lowered.contains(i)))
            .map(|(locale, _)| *locale);

        signals.problem_indicator = PROBLEM_INDICATORS
            .iter()
            .find(|indicator| lowered.contains(*indicator))
            .copied();

        signals.question_mark = text.contains('?');

        let mut score = signals.keyword_hits.min(KEYWORD_SCORE_CAP);
        if signals.question_locale.is_some() {
            score += QUESTION_WEIGHT;
        }
        if signals.has_problem() {
            score += PROBLEM_WEIGHT;
        }
        if signals.question_mark {
            score += QUESTION_MARK_WEIGHT;
        }

        let confidence = score as f32 / MAX_SCORE as f32;

        let is_programming_question = signals.keyword_hits > 0
            && (signals.has_question() || signals.has_problem())
            && confidence > self.threshold;

        AnalysisResult {
            is_programming_question,
            confidence,
            concept,
            signals,
        }
    }
}

/// Lower-case char by char, keeping every byte offset aligned with `text`.
///
/// Characters whose lowercase form has a different UTF-8 length are left alone,
/// which lets offsets found in the folded string slice the original directly.
fn fold_case(text: &str) -> String {
    text.chars()
        .map(|c| {
            let mut lower = c.to_lowercase();
            match (lower.next(), lower.next()) {
                (Some(l), None) if l.len_utf8() == c.len_utf8() => l,
                _ => c,
            }
        })
        .collect()
}

/// Phrase around a keyword hit: back to the previous whitespace and up to 20
/// more chars, forward to the next whitespace and up to 20 more chars.
fn concept_window(text: &str, start: usize, len: usize) -> Option<String> {
    let end = start + len;

    let word_start = text[..start]
        .rfind(char::is_whitespace)
        .unwrap_or(0);
    let window_start = text[..word_start]
        .char_indices()
        .rev()
        .nth(CONCEPT_WINDOW_CHARS - 1)
        .map(|(i, _)| i)
        .unwrap_or(0);

    let word_end = text[end..]
        .find(char::is_whitespace)
        .map(|offset| end + offset)
        .unwrap_or(text.len());
    let window_end = text[word_end..]
        .char_indices()
        .nth(CONCEPT_WINDOW_CHARS)
        .map(|(i, _)| word_end + i)
        .unwrap_or(text.len());

    let phrase = text[window_start..window_end].trim();
    (!phrase.is_empty()).then(|| phrase.to_string())
}
