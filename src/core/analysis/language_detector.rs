//! Guesses the programming language of a code snippet.
//!
//! Snippets pasted into chat are usually fragments, so instead of parsing we
//! score the snippet against a table of per-language signatures:
//!
//! - +2 for every signature pattern that matches somewhere in the snippet
//! - +1 for every signature keyword found as a case-insensitive substring
//!
//! The highest total wins. Ties go to the language listed first in the table,
//! so the order of `DEFAULT_SIGNATURES` is part of the contract. A best score of
//! zero (or an empty snippet) gives [`PLAINTEXT`].

use super::analysis_models::LanguageSignature;
use regex::Regex;
use std::sync::LazyLock;

/// Label used when nothing matches.
pub const PLAINTEXT: &str = "plaintext";

const PATTERN_WEIGHT: u32 = 2;
const KEYWORD_WEIGHT: u32 = 1;

/// Detection knowledge base, in tie-break order.
pub const DEFAULT_SIGNATURES: &[LanguageSignature] = &[
    LanguageSignature {
        language: "javascript",
        patterns: &[
            r"(?i)\bconst\b|\blet\b|\bvar\b|\bfunction\b|\breturn\b|\bconsole\.log\b|\bdocument\b|\bwindow\b|\brequire\b|\bmodule\.exports\b",
            r"(?i)\$\(.*\)|\bawait\b|\basync\b|\bnew Promise\b",
        ],
        file_extensions: &[".js", ".jsx", ".mjs"],
        keywords: &["javascript", "js", "node", "nodejs", "react", "vue", "angular"],
    },
    LanguageSignature {
        language: "typescript",
        patterns: &[
            r"(?i)\binterface\b|\btype\b|\bnamespace\b|\bclass\b.*\bimplements\b|\bas\b|\benum\b",
            r"(?i):\s*(string|number|boolean|any|unknown|void|never)",
        ],
        file_extensions: &[".ts", ".tsx"],
        keywords: &["typescript", "ts"],
    },
    LanguageSignature {
        language: "python",
        patterns: &[
            r"(?i)\bdef\b|\bclass\b|\bimport\b|\bfrom\b.*\bimport\b|\bprint\b\(",
            r"(?m)\bif\b.*:|\bfor\b.*:|\bwhile\b.*:|\btry\b:|^\s*#\s",
            // A def/class header that ends the line with a colon.
            r"(?m)^\s*(def|class)\s+\w+.*:\s*$",
        ],
        file_extensions: &[".py"],
        keywords: &["python", "py", "django", "flask"],
    },
    LanguageSignature {
        language: "java",
        patterns: &[
            r"(?i)\bpublic\b|\bprivate\b|\bprotected\b|\bclass\b|\binterface\b|\benum\b",
            r"(?i)\bextends\b|\bimplements\b|\bSystem\.out\b|\bthrows\b|\bnew \w+\(",
        ],
        file_extensions: &[".java"],
        keywords: &["java", "spring", "android"],
    },
    LanguageSignature {
        language: "csharp",
        patterns: &[
            r"(?i)\busing\b.*?;|\bnamespace\b|\bclass\b|\bpublic\b|\bprivate\b|\bprotected\b",
            r"(?i)\bConsole\.Write",
        ],
        file_extensions: &[".cs"],
        keywords: &["c#", "csharp", ".net", "dotnet", "asp.net"],
    },
    LanguageSignature {
        language: "php",
        patterns: &[
            r"(?i)<\?php|\bfunction\b|\becho\b|\bforeach\b|\b\$[a-zA-Z_]",
            r"->|::",
        ],
        file_extensions: &[".php"],
        keywords: &["php", "laravel", "symfony"],
    },
    LanguageSignature {
        language: "html",
        patterns: &[
            r"(?i)<!DOCTYPE\s+html>|<html>|<head>|<body>|<div>|<span>|<a\s+href",
            r"(?i)</\w+>",
        ],
        file_extensions: &[".html", ".htm"],
        keywords: &["html", "markup"],
    },
    LanguageSignature {
        language: "css",
        patterns: &[
            r"(?i)[.#\w]+\s*\{[\s\S]*?\}",
            r"(?i)\b(margin|padding|border|font|background|color|display|position)\s*:",
        ],
        file_extensions: &[".css"],
        keywords: &["css", "styles", "stylesheet"],
    },
    LanguageSignature {
        language: "sql",
        patterns: &[
            r"(?i)\bSELECT\b.*\bFROM\b|\bINSERT INTO\b|\bUPDATE\b.*\bSET\b|\bDELETE FROM\b",
            r"(?i)\bWHERE\b|\bGROUP BY\b|\bORDER BY\b|\bJOIN\b",
        ],
        file_extensions: &[".sql"],
        keywords: &["sql", "mysql", "postgresql", "postgres", "database", "query"],
    },
    LanguageSignature {
        language: "go",
        patterns: &[
            r"(?i)\bpackage\b|\bfunc\b|\bimport\b\s*\(|\bstruct\b|\binterface\b",
            r"(?i)\bgo\b|\bchan\b|\bdefer\b",
        ],
        file_extensions: &[".go"],
        keywords: &["golang", "go"],
    },
    LanguageSignature {
        language: "ruby",
        patterns: &[
            r"(?i)\bdef\b|\bclass\b|\bmodule\b|\brequire\b|\binclude\b",
            r"(?i)\bend\b|\bdo\b|\|.*\|",
        ],
        file_extensions: &[".rb"],
        keywords: &["ruby", "rails"],
    },
    LanguageSignature {
        language: "rust",
        patterns: &[
            r"(?i)\bfn\b|\blet\b|\bmut\b|\bstruct\b|\benum\b|\bimpl\b|\bpub\b",
            r"(?i)\bmatch\b|\buse\b|\bmod\b",
        ],
        file_extensions: &[".rs"],
        keywords: &["rust", "cargo"],
    },
    LanguageSignature {
        language: "kotlin",
        patterns: &[
            r"(?i)\bfun\b|\bval\b|\bvar\b|\bclass\b|\binterface\b|\bobject\b",
            r"(?i)\bunion\b|\bdata class\b",
        ],
        file_extensions: &[".kt", ".kts"],
        keywords: &["kotlin", "android"],
    },
    LanguageSignature {
        language: "swift",
        patterns: &[
            r"(?i)\bfunc\b|\bvar\b|\blet\b|\bclass\b|\bstruct\b|\benum\b|\bprotocol\b",
            r"(?i)\bguard\b|\bif let\b|\bUIKit\b|\bSwiftUI\b",
        ],
        file_extensions: &[".swift"],
        keywords: &["swift", "ios", "macos"],
    },
    LanguageSignature {
        language: "bash",
        patterns: &[
            r"(?i)\becho\b|\bmkdir\b|\bchmod\b|\bgrep\b|\bsed\b|\bawk\b",
            r"(?i)\bif\b.*\bthen\b|\bfor\b.*\bdo\b|\bwhile\b.*\bdo\b",
        ],
        file_extensions: &[".sh", ".bash"],
        keywords: &["bash", "shell", "sh", "command", "terminal"],
    },
];

/// Extensions for languages that may not have a signature.
const FALLBACK_EXTENSIONS: &[(&str, &str)] = &[
    ("javascript", ".js"),
    ("typescript", ".ts"),
    ("python", ".py"),
    ("java", ".java"),
    ("csharp", ".cs"),
    ("php", ".php"),
    ("html", ".html"),
    ("css", ".css"),
    ("sql", ".sql"),
    ("go", ".go"),
    ("ruby", ".rb"),
    ("rust", ".rs"),
    ("kotlin", ".kt"),
    ("swift", ".swift"),
    ("bash", ".sh"),
    ("c", ".c"),
    ("cpp", ".cpp"),
    ("json", ".json"),
    ("yaml", ".yml"),
    (PLAINTEXT, ".txt"),
];

static DEFAULT_DETECTOR: LazyLock<LanguageDetector> = LazyLock::new(|| {
    // Static table; a bad pattern is a programming error caught by the tests below.
    #[allow(clippy::expect_used)]
    LanguageDetector::new(DEFAULT_SIGNATURES).expect("default language signatures compile")
});

struct CompiledSignature {
    signature: LanguageSignature,
    patterns: Vec<Regex>,
    keywords: Vec<String>,
}

/// A compiled signature table.
pub struct LanguageDetector {
    signatures: Vec<CompiledSignature>,
}

impl LanguageDetector {
    /// Compile a signature table. Table order decides ties.
    pub fn new(signatures: &[LanguageSignature]) -> Result<Self, regex::Error> {
        let signatures = signatures
            .iter()
            .map(|signature| -> Result<CompiledSignature, regex::Error> {
                let patterns = signature
                    .patterns
                    .iter()
                    .map(|pattern| Regex::new(pattern))
                    .collect::<Result<Vec<_>, _>>()?;
                let keywords = signature
                    .keywords
                    .iter()
                    .map(|keyword| keyword.to_lowercase())
                    .collect();

                Ok(CompiledSignature {
                    signature: *signature,
                    patterns,
                    keywords,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { signatures })
    }

    /// Best-scoring language for `code`, or [`PLAINTEXT`].
    pub fn detect(&self, code: &str) -> &'static str {
        let code = code.trim();
        if code.is_empty() {
            return PLAINTEXT;
        }

        let lowered = code.to_lowercase();
        let mut best = PLAINTEXT;
        let mut best_score = 0;

        for compiled in &self.signatures {
            let score = compiled.score(code, &lowered);
            // Strictly greater: the earlier entry keeps a tie.
            if score > best_score {
                best_score = score;
                best = compiled.signature.language;
            }
        }

        best
    }

    /// Per-language scores in table order. Handy when debugging a misdetection.
    pub fn scores(&self, code: &str) -> Vec<(&'static str, u32)> {
        let code = code.trim();
        let lowered = code.to_lowercase();
        self.signatures
            .iter()
            .map(|compiled| (compiled.signature.language, compiled.score(code, &lowered)))
            .collect()
    }

    /// Preferred file extension for a language id, `.txt` if unknown.
    pub fn extension_for(&self, language: &str) -> &'static str {
        self.signatures
            .iter()
            .find(|compiled| compiled.signature.language == language)
            .and_then(|compiled| compiled.signature.file_extensions.first().copied())
            .or_else(|| {
                FALLBACK_EXTENSIONS
                    .iter()
                    .find(|(name, _)| *name == language)
                    .map(|(_, ext)| *ext)
            })
            .unwrap_or(".txt")
    }
}

impl CompiledSignature {
    fn score(&self, code: &str, lowered: &str) -> u32 {
        let pattern_hits = self.patterns.iter().filter(|re| re.is_match(code)).count() as u32;
        let keyword_hits = self
            .keywords
            .iter()
            .filter(|keyword| lowered.contains(keyword.as_str()))
            .count() as u32;

        pattern_hits * PATTERN_WEIGHT + keyword_hits * KEYWORD_WEIGHT
    }
}

/// Detect with the built-in signature table.
pub fn detect_language(code: &str) -> &'static str {
    DEFAULT_DETECTOR.detect(code)
}

/// Extension lookup with the built-in signature table.
pub fn extension_for(language: &str) -> &'static str {
    DEFAULT_DETECTOR.extension_for(language)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_compiles() {
        assert!(LanguageDetector::new(DEFAULT_SIGNATURES).is_ok());
    }

    #[test]
    fn detects_python_function() {
        assert_eq!(detect_language("def add(a, b):\n    return a+b"), "python");
    }

    #[test]
    fn detects_sql_in_any_case() {
        assert_eq!(detect_language("SELECT name FROM users WHERE id = 1"), "sql");
        assert_eq!(detect_language("select name from users where id = 1"), "sql");
    }

    #[test]
    fn detects_rust() {
        assert_eq!(
            detect_language("use std::io;\nfn main() { let mut x = 5; }"),
            "rust"
        );
    }

    #[test]
    fn empty_and_blank_are_plaintext() {
        assert_eq!(detect_language(""), PLAINTEXT);
        assert_eq!(detect_language("   \n\t"), PLAINTEXT);
    }

    #[test]
    fn prose_is_plaintext() {
        assert_eq!(detect_language("hello world"), PLAINTEXT);
    }

    #[test]
    fn ties_go_to_first_registered_language() {
        // javascript, rust and swift all score 2 on a bare `let`.
        let scores = DEFAULT_DETECTOR.scores("let x = 5");
        let top = scores.iter().map(|(_, s)| *s).max().unwrap();
        let tied: Vec<_> = scores.iter().filter(|(_, s)| *s == top).map(|(l, _)| *l).collect();
        assert!(tied.len() > 1);
        assert_eq!(detect_language("let x = 5"), tied[0]);
        assert_eq!(detect_language("let x = 5"), "javascript");
    }

    #[test]
    fn custom_table_changes_result() {
        const TABLE: &[LanguageSignature] = &[LanguageSignature {
            language: "lua",
            patterns: &[r"\blocal\b"],
            file_extensions: &[".lua"],
            keywords: &["lua"],
        }];
        let detector = LanguageDetector::new(TABLE).unwrap();
        assert_eq!(detector.detect("local x = 1"), "lua");
        assert_eq!(detector.detect("def add(a, b):"), PLAINTEXT);
        assert_eq!(detector.extension_for("lua"), ".lua");
    }

    #[test]
    fn invalid_pattern_is_reported() {
        const TABLE: &[LanguageSignature] = &[LanguageSignature {
            language: "broken",
            patterns: &[r"(unclosed"],
            file_extensions: &[],
            keywords: &[],
        }];
        assert!(LanguageDetector::new(TABLE).is_err());
    }

    #[test]
    fn detection_is_repeatable() {
        let code = "const x = await fetch(url);";
        assert_eq!(detect_language(code), detect_language(code));
    }

    #[test]
    fn extension_lookup() {
        assert_eq!(extension_for("python"), ".py");
        assert_eq!(extension_for("kotlin"), ".kt");
        assert_eq!(extension_for("cpp"), ".cpp");
        assert_eq!(extension_for(PLAINTEXT), ".txt");
        assert_eq!(extension_for("brainfuck"), ".txt");
    }
}
