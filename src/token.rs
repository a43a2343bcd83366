//! Splitting a curl command line into tokens.
//!
//! The command line is not run through a shell grammar. It is split on single
//! spaces, and chunks that open a quote keep absorbing the following chunks
//! until the quote is closed. Every chunk that starts with a dash is a flag
//! and takes the next chunk as its value; everything else is a bare value
//! (in practice, the URL).

use crate::grammar::Grammar;
use std::collections::VecDeque;

const PROGRAM: &str = "curl";
const QUOTES: [char; 2] = ['\'', '"'];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// A positional argument, or the value swallowed by a no-value flag.
    Bare(String),
    /// A flag with its leading dashes stripped, and its unquoted value.
    Flagged { name: String, value: String },
}

/// A set of flag names. A single `&str` is the singleton set.
pub trait FlagNames {
    fn contains_flag(&self, name: &str) -> bool;
}

impl FlagNames for str {
    fn contains_flag(&self, name: &str) -> bool {
        self == name
    }
}

impl FlagNames for [&str] {
    fn contains_flag(&self, name: &str) -> bool {
        self.iter().any(|flag| *flag == name)
    }
}

impl<const N: usize> FlagNames for [&str; N] {
    fn contains_flag(&self, name: &str) -> bool {
        self.iter().any(|flag| *flag == name)
    }
}

impl FlagNames for [String] {
    fn contains_flag(&self, name: &str) -> bool {
        self.iter().any(|flag| flag == name)
    }
}

pub fn tokenize(input: &str, grammar: &Grammar) -> Vec<Token> {
    let input = input.replace("\\\r\n", " ").replace("\\\n", " ");
    let mut chunks: VecDeque<&str> = input.split(' ').collect();
    let mut tokens = Vec::new();

    while let Some(chunk) = chunks.pop_front() {
        let chunk = chunk.trim();
        if chunk.is_empty() || chunk == PROGRAM {
            continue;
        }

        let (name, mut value) = match chunk.strip_prefix('-') {
            Some(rest) => {
                let name = rest.strip_prefix('-').unwrap_or(rest);
                (Some(name), chunks.pop_front().unwrap_or_default().to_owned())
            }
            None => (None, chunk.to_owned()),
        };

        while !is_quote_closed(&value) {
            let Some(next) = chunks.pop_front() else {
                break;
            };
            value.push(' ');
            value.push_str(next);
        }

        let value = unquote(value.trim()).to_owned();
        let token = match name {
            Some(name) if !grammar.is_single_flag(name) => Token::Flagged {
                name: name.to_owned(),
                value,
            },
            _ => Token::Bare(value),
        };
        tracing::trace!(?token, "token");
        tokens.push(token);
    }

    tokens
}

/// Whether the quoting of `text` is complete, or it was never quoted.
pub fn is_quote_closed(text: &str) -> bool {
    let text = text.trim();
    let mut chars = text.chars();
    let (Some(open), Some(close)) = (chars.next(), chars.next_back()) else {
        return true;
    };
    if !QUOTES.contains(&open) {
        return true;
    }
    if close != open {
        return false;
    }
    chars.next_back() != Some('\\')
}

/// Matching `Flagged` tokens as `(name, value)` pairs, in input order.
pub fn filter<'a, N>(tokens: &'a [Token], names: &'a N) -> impl Iterator<Item = (&'a str, &'a str)>
where
    N: FlagNames + ?Sized,
{
    tokens.iter().filter_map(move |token| match token {
        Token::Flagged { name, value } if names.contains_flag(name) => {
            Some((name.as_str(), value.as_str()))
        }
        _ => None,
    })
}

// Drops the first and last character once the value opens with a quote.
fn unquote(s: &str) -> &str {
    let mut chars = s.chars();
    match (chars.next(), chars.next_back()) {
        (Some(open), Some(_)) if QUOTES.contains(&open) => chars.as_str(),
        _ => s,
    }
}
