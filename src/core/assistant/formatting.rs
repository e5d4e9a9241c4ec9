//! Post-processing for generated corrections.
//!
//! Models usually answer with a fenced block, but not always. When the fence is
//! missing we assume the shape we asked for: explanation, blank line, code.

use crate::core::analysis::format_code_block;

/// Make sure a correction contains a fenced code block.
///
/// Content that already has a fence is returned untouched. Otherwise the text is
/// split at the first blank line: everything before is the explanation,
/// everything after is wrapped in a block tagged with `language`.
pub fn ensure_code_block(content: &str, language: &str) -> String {
    if content.contains("```") {
        return content.to_string();
    }

    let mut explanation_lines = Vec::new();
    let mut code_lines = Vec::new();
    let mut in_explanation = true;

    for line in content.lines() {
        if in_explanation && line.trim().is_empty() {
            in_explanation = false;
            continue;
        }

        if in_explanation {
            explanation_lines.push(line);
        } else {
            code_lines.push(line);
        }
    }

    let explanation = explanation_lines.join("\n");
    let code = code_lines.join("\n");

    format!(
        "{}\n\n{}",
        explanation.trim(),
        format_code_block(code.trim(), Some(language))
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fenced_content_is_untouched() {
        let content = "Missing colon.\n\n```python\ndef f():\n    pass\n```";
        assert_eq!(ensure_code_block(content, "python"), content);
    }

    #[test]
    fn trailing_code_gets_wrapped() {
        let content = "You forgot the colon.\n\ndef f():\n    pass";
        assert_eq!(
            ensure_code_block(content, "python"),
            "You forgot the colon.\n\n```python\ndef f():\n    pass\n```"
        );
    }

    #[test]
    fn only_first_blank_line_splits() {
        let content = "Fixed it.\n\nlet a = 1;\n\nlet b = 2;";
        let wrapped = ensure_code_block(content, "rust");
        assert!(wrapped.starts_with("Fixed it.\n\n```rust\n"));
        assert!(wrapped.contains("let a = 1;\n\nlet b = 2;"));
    }

    #[test]
    fn no_blank_line_means_empty_block() {
        let wrapped = ensure_code_block("Looks fine to me.", "go");
        assert_eq!(wrapped, "Looks fine to me.\n\n```go\n\n```");
    }
}
