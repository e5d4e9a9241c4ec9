// Message analysis: the pure, synchronous half of the auto-responder.
//
// Nothing in here touches Discord, storage, or the network. Every function is
// total over its input, so callers never have to handle an error from it.

pub mod analysis_models;
pub mod code_extractor;
pub mod language_detector;
pub mod question_classifier;

pub use analysis_models::{AnalysisResult, ClassificationSignals, CodeBlock, LanguageSignature};
pub use code_extractor::{extract_code_blocks, format_code_block};
pub use language_detector::{detect_language, extension_for, LanguageDetector, PLAINTEXT};
pub use question_classifier::QuestionClassifier;
