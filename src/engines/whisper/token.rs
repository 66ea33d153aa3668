use anyhow::{Context, Result};
use whisper_rs::WhisperSegment;

use crate::transcript::Word;

/// A single sub-word token with its timing, as whisper reports it.
#[derive(Debug, Clone)]
pub(super) struct Token {
    pub start_seconds: f32,
    pub end_seconds: f32,
    pub text: String,
}

/// Convert whisper's centisecond timestamps to seconds.
///
/// whisper uses -1 for unknown; clamp to 0 so consumers don't see -0.01s.
pub(super) fn centiseconds_to_seconds(value: i64) -> f32 {
    if value < 0 { 0.0 } else { value as f32 / 100.0 }
}

pub(super) fn tokens_from_segment(segment: &WhisperSegment) -> Result<Vec<Token>> {
    let token_count = segment.n_tokens();
    let token_count_usize = usize::try_from(token_count)
        .with_context(|| format!("segment reported negative token count: {token_count}"))?;
    let mut tokens = Vec::with_capacity(token_count_usize);

    for token_idx in 0..token_count_usize {
        let token = segment
            .get_token(token_idx as i32)
            .context("failed to get token from segment")?;

        let data = token.token_data();
        let text = token
            .to_str()
            .with_context(|| format!("failed to get token text at index {token_idx}"))?
            .to_owned();

        tokens.push(Token {
            start_seconds: centiseconds_to_seconds(data.t0),
            end_seconds: centiseconds_to_seconds(data.t1),
            text,
        });
    }

    Ok(tokens)
}

/// Group sub-word tokens into whole words.
///
/// whisper emits BPE pieces: a piece with a leading space begins a new word,
/// anything else (including punctuation) is appended to the current word.
/// Special/control tokens (formatted like `[_BEG_]`, `[_TT_50]`) are dropped.
pub(super) fn words_from_tokens(tokens: &[Token]) -> Vec<Word> {
    let mut words: Vec<Word> = Vec::new();

    for token in tokens {
        if is_special_token(&token.text) {
            continue;
        }

        let continues_word = !token.text.starts_with(' ') && !words.is_empty();
        match words.last_mut() {
            Some(last) if continues_word => {
                last.word.push_str(&token.text);
                if token.end_seconds > last.end_seconds {
                    last.end_seconds = token.end_seconds;
                }
            }
            _ => words.push(Word {
                word: token.text.trim_start().to_owned(),
                start_seconds: token.start_seconds,
                end_seconds: token.end_seconds,
            }),
        }
    }

    words
}

fn is_special_token(text: &str) -> bool {
    text.starts_with("[_") && text.ends_with("_]")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tok(start: f32, end: f32, text: &str) -> Token {
        Token {
            start_seconds: start,
            end_seconds: end,
            text: text.to_string(),
        }
    }

    #[test]
    fn centiseconds_clamp_negative_to_zero() {
        assert_eq!(centiseconds_to_seconds(-1), 0.0);
        assert_eq!(centiseconds_to_seconds(150), 1.5);
    }

    #[test]
    fn leading_space_tokens_start_new_words() {
        let words = words_from_tokens(&[
            tok(0.0, 0.3, " Tre"),
            tok(0.3, 0.5, "at"),
            tok(0.5, 1.0, " yourself"),
        ]);

        assert_eq!(words.len(), 2);
        assert_eq!(words[0].word, "Treat");
        assert_eq!(words[0].start_seconds, 0.0);
        assert_eq!(words[0].end_seconds, 0.5);
        assert_eq!(words[1].word, "yourself");
    }

    #[test]
    fn punctuation_attaches_to_the_previous_word() {
        let words = words_from_tokens(&[tok(0.0, 0.4, " Done"), tok(0.4, 0.45, ".")]);
        assert_eq!(words.len(), 1);
        assert_eq!(words[0].word, "Done.");
        assert_eq!(words[0].end_seconds, 0.45);
    }

    #[test]
    fn special_tokens_are_dropped() {
        let words = words_from_tokens(&[
            tok(0.0, 0.0, "[_BEG_]"),
            tok(0.0, 0.5, " hi"),
            tok(0.5, 0.5, "[_TT_50]"),
        ]);
        assert_eq!(words.len(), 1);
        assert_eq!(words[0].word, "hi");
    }

    #[test]
    fn first_token_without_space_still_starts_a_word() {
        let words = words_from_tokens(&[tok(0.0, 0.2, "Hi")]);
        assert_eq!(words.len(), 1);
        assert_eq!(words[0].word, "Hi");
    }
}
