//! Finds code the author pasted into a chat message.
//!
//! Discord renders ```` ```lang\ncode``` ```` as a fenced block and `` `code` ``
//! as inline code. Fenced blocks win: inline spans are only collected when the
//! message has no usable fenced block at all.

use super::analysis_models::CodeBlock;
use regex::Regex;
use std::sync::LazyLock;

/// Opening fence, optional language tag followed by a newline, lazy body, closing fence.
static FENCED_BLOCK_RE: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"```(?:([\w+#.-]+)?\n)?([\s\S]*?)```").expect("fenced block regex")
});

/// Single-backtick span. Kept on one line so a dangling fence can't pair up
/// with a stray backtick further down the message.
static INLINE_SPAN_RE: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"`([^`\n]+)`").expect("inline span regex")
});

/// Extract code blocks in order of appearance.
///
/// Returns an empty vector when the text holds no code.
pub fn extract_code_blocks(text: &str) -> Vec<CodeBlock> {
    let fenced: Vec<CodeBlock> = FENCED_BLOCK_RE
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let code = caps.get(2)?.as_str().trim();
            if code.is_empty() {
                return None;
            }

            let language = caps
                .get(1)
                .map(|tag| tag.as_str().trim())
                .filter(|tag| !tag.is_empty())
                .map(str::to_string);

            Some(CodeBlock {
                code: code.to_string(),
                language,
                start_offset: whole.start(),
                end_offset: whole.end(),
            })
        })
        .collect();

    if !fenced.is_empty() {
        return fenced;
    }

    INLINE_SPAN_RE
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let code = caps.get(1)?.as_str().trim();
            if code.is_empty() {
                return None;
            }

            Some(CodeBlock {
                code: code.to_string(),
                language: None,
                start_offset: whole.start(),
                end_offset: whole.end(),
            })
        })
        .collect()
}

/// Render code as a Discord fenced block with syntax highlighting.
pub fn format_code_block(code: &str, language: Option<&str>) -> String {
    format!("```{}\n{}\n```", language.unwrap_or(""), code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_has_no_code() {
        assert!(extract_code_blocks("plain text, no code").is_empty());
        assert!(extract_code_blocks("").is_empty());
    }

    #[test]
    fn fenced_block_with_language_tag() {
        let text = "```js\nconsole.log(1)\n```";
        let blocks = extract_code_blocks(text);

        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].code, "console.log(1)");
        assert_eq!(blocks[0].language.as_deref(), Some("js"));
        assert_eq!(blocks[0].start_offset, 0);
        assert_eq!(blocks[0].end_offset, text.len());
    }

    #[test]
    fn fenced_block_without_tag() {
        let blocks = extract_code_blocks("look:\n```\nx = 1\n```");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].code, "x = 1");
        assert_eq!(blocks[0].language, None);
    }

    #[test]
    fn tags_with_symbols_are_kept() {
        let blocks = extract_code_blocks("```c++\nint main() {}\n```\n```c#\nvar x = 1;\n```");
        let tags: Vec<_> = blocks.iter().map(|b| b.language.as_deref()).collect();
        assert_eq!(tags, vec![Some("c++"), Some("c#")]);
    }

    #[test]
    fn blocks_come_back_in_source_order() {
        let text = "first\n```py\na = 1\n```\nthen\n```rs\nlet b = 2;\n```";
        let blocks = extract_code_blocks(text);

        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].code, "a = 1");
        assert_eq!(blocks[1].code, "let b = 2;");
        assert!(blocks[0].end_offset <= blocks[1].start_offset);
        assert_eq!(&text[blocks[1].start_offset..blocks[1].end_offset], "```rs\nlet b = 2;\n```");
    }

    #[test]
    fn whitespace_only_fence_is_discarded() {
        assert!(extract_code_blocks("```\n   \n```").is_empty());
        assert!(extract_code_blocks("```   ```").is_empty());
    }

    #[test]
    fn unterminated_fence_yields_nothing() {
        assert!(extract_code_blocks("```python\nprint('hi')\n").is_empty());
    }

    #[test]
    fn inline_code_is_a_fallback() {
        let blocks = extract_code_blocks("use `foo()` here");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].code, "foo()");
        assert_eq!(blocks[0].language, None);
        assert_eq!(blocks[0].start_offset, 4);
        assert_eq!(blocks[0].end_offset, 11);
    }

    #[test]
    fn inline_code_ignored_when_fenced_block_exists() {
        let blocks = extract_code_blocks("call `bar()` like\n```\nbar()\n```");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].code, "bar()");
        assert_eq!(blocks[0].start_offset, 18);
    }

    #[test]
    fn extraction_is_repeatable() {
        let text = "```go\nfunc main() {}\n``` and `x`";
        assert_eq!(extract_code_blocks(text), extract_code_blocks(text));
    }

    #[test]
    fn format_code_block_renders_fence() {
        assert_eq!(format_code_block("x = 1", Some("python")), "```python\nx = 1\n```");
        assert_eq!(format_code_block("x = 1", None), "```\nx = 1\n```");
    }
}
