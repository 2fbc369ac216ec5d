//! Splitting raw text into candidate link tokens.

use regex::Regex;
use std::sync::OnceLock;

/// How candidate tokens are cut out of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tokenizer {
    /// Substrings starting with `http://` or `https://`, ending at whitespace,
    /// a quote or an angle bracket.
    Schemed,
    /// Every token delimited by whitespace, a quote or a comma.
    Whitespace,
}

fn schemed_link_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"(?i)https?://[^\s"'<>]+"#).expect("link regex is valid"))
}

fn is_list_separator(c: char) -> bool {
    c.is_whitespace() || matches!(c, '"' | '\'' | ',')
}

impl Tokenizer {
    pub fn tokens<'a>(&self, text: &'a str) -> Box<dyn Iterator<Item = &'a str> + 'a> {
        match self {
            Tokenizer::Schemed => Box::new(schemed_link_regex().find_iter(text).map(|m| m.as_str())),
            Tokenizer::Whitespace => Box::new(
                text.split(is_list_separator)
                    .filter(|token| !token.is_empty()),
            ),
        }
    }
}
