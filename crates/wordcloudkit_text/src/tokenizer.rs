//! Word-run tokenizer.
//!
//! A token is a maximal run of `\w` characters. Everything else (punctuation,
//! symbols, whitespace) separates tokens and is discarded. Tokens keep their
//! original case and form.

use std::sync::LazyLock;

use regex::Regex;

use crate::conf::C_PATTERN_WORD;
use crate::spec::EnumTokenizeMode;

static RE_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(C_PATTERN_WORD).expect("word pattern must compile"));

/// Delete every whitespace character.
pub fn strip_whitespace(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Call `f` for each token of `text`, in order.
pub fn visit_tokens<F>(text: &str, rule_tokenize: EnumTokenizeMode, mut f: F)
where
    F: FnMut(&str),
{
    match rule_tokenize {
        EnumTokenizeMode::Split => {
            for m in RE_WORD.find_iter(text) {
                f(m.as_str());
            }
        }
        EnumTokenizeMode::StripWhitespace => {
            let c_text_stripped = strip_whitespace(text);
            for m in RE_WORD.find_iter(&c_text_stripped) {
                f(m.as_str());
            }
        }
    }
}

/// Split `text` into tokens. Total: any input, including empty, is accepted.
pub fn tokenize(text: &str, rule_tokenize: EnumTokenizeMode) -> Vec<String> {
    let mut l_tokens = Vec::new();
    visit_tokens(text, rule_tokenize, |token| l_tokens.push(token.to_string()));
    l_tokens
}
