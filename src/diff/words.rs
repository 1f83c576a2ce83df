// SPDX-License-Identifier: MIT

use lazy_static::lazy_static;
use regex::Regex;

use crate::diff::{build_change_script, match_sequences, DiffItem};
use crate::utils::{CancelToken, Cancelled, Progress};

lazy_static! {
    static ref WORD_BOUNDARY: Regex = Regex::new(r"\b").unwrap();
}

/// Split `text` into alternating word and separator tokens.
///
/// Splitting at word boundaries keeps whole words intact when the tokens are
/// matched, so the word-level diff never highlights half an identifier.
/// Concatenating the tokens reproduces `text` exactly.
pub fn tokenize_words(text: &str) -> Vec<String> {
    WORD_BOUNDARY
        .split(text)
        .filter(|token| !token.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Run the whole diff pipeline a second time over the word tokens of two
/// text blocks, typically the joined deletion and addition lines of a single
/// `Changed` segment.
pub fn word_diff(
    left: &str,
    right: &str,
    cancel: &CancelToken,
    progress: &mut Progress,
) -> Result<Vec<DiffItem<String>>, Cancelled> {
    let left_tokens = tokenize_words(left);
    let right_tokens = tokenize_words(right);
    let matches = match_sequences(
        &left_tokens,
        &right_tokens,
        |token: &String| token.clone(),
        cancel,
        progress,
    )?;
    Ok(build_change_script(&left_tokens, &right_tokens, &matches))
}

#[cfg(test)]
mod test {
    use crate::diff::{tokenize_words, word_diff, DiffItem};
    use crate::utils::{CancelToken, Progress};

    #[test]
    fn tokenization_is_lossless() {
        let text = "let total = count + 1; // trailing\n";
        assert_eq!(tokenize_words(text).concat(), text);
    }

    #[test]
    fn tokens_alternate_words_and_separators() {
        assert_eq!(
            tokenize_words("foo bar(baz)"),
            vec!["foo", " ", "bar", "(", "baz", ")"]
        );
    }

    #[test]
    fn changed_word_is_isolated() {
        let script = word_diff(
            "let total = old_count + 1;",
            "let total = new_count + 1;",
            &CancelToken::new(),
            &mut Progress::none(),
        )
        .unwrap();

        assert_eq!(
            script,
            vec![
                DiffItem::Matched {
                    content: vec!["let", " ", "total", " = "]
                        .into_iter()
                        .map(str::to_owned)
                        .collect(),
                },
                DiffItem::Changed {
                    deletions: vec!["old_count".to_owned()],
                    additions: vec!["new_count".to_owned()],
                },
                DiffItem::Matched {
                    content: vec![" + ", "1", ";"]
                        .into_iter()
                        .map(str::to_owned)
                        .collect(),
                },
            ]
        );
    }
}
