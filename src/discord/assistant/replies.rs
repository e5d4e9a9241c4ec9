//! Shapes generated text into something Discord will accept.
//!
//! Messages are capped at 2000 characters. Long replies are split on line
//! breaks where possible, and an oversized correction moves its code into a
//! file attachment so the block isn't cut in half.

use crate::core::analysis::{extract_code_blocks, extension_for};

pub const DISCORD_MESSAGE_LIMIT: usize = 2000;

const ATTACHED_NOTE: &str = "*(Corrected code attached, it was too long for one message.)*";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeAttachment {
    pub filename: String,
    pub code: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyPlan {
    pub chunks: Vec<String>,
    pub attachment: Option<CodeAttachment>,
}

/// Split `text` into pieces of at most `limit` characters, cutting at the last
/// newline inside each window when there is one.
pub fn split_message(text: &str, limit: usize) -> Vec<String> {
    let limit = limit.max(1);
    let mut chunks = Vec::new();
    let mut rest = text;

    while !rest.is_empty() {
        let hard_end = rest
            .char_indices()
            .nth(limit)
            .map(|(i, _)| i)
            .unwrap_or(rest.len());

        if hard_end == rest.len() {
            chunks.push(rest.to_string());
            break;
        }

        let cut = rest[..hard_end]
            .rfind('\n')
            .filter(|&i| i > 0)
            .unwrap_or(hard_end);

        chunks.push(rest[..cut].to_string());
        rest = rest[cut..].trim_start_matches('\n');
    }

    chunks
}

/// Decide how to deliver a reply.
///
/// `language` is set for corrections; only those get the attachment treatment.
pub fn plan_reply(text: &str, language: Option<&str>) -> ReplyPlan {
    if text.chars().count() <= DISCORD_MESSAGE_LIMIT {
        return ReplyPlan {
            chunks: vec![text.to_string()],
            attachment: None,
        };
    }

    if let Some(language) = language.filter(|_| text.contains("```")) {
        if let Some(block) = extract_code_blocks(text).into_iter().next() {
            let prose = format!(
                "{}\n\n{}\n\n{}",
                text[..block.start_offset].trim_end(),
                ATTACHED_NOTE,
                text[block.end_offset..].trim_start()
            );
            let language = block.language.as_deref().unwrap_or(language);

            return ReplyPlan {
                chunks: split_message(prose.trim(), DISCORD_MESSAGE_LIMIT),
                attachment: Some(CodeAttachment {
                    filename: format!("fixed{}", extension_for(language)),
                    code: block.code,
                }),
            };
        }
    }

    ReplyPlan {
        chunks: split_message(text, DISCORD_MESSAGE_LIMIT),
        attachment: None,
    }
}
