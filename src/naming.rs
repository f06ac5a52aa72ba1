//! Naming Rules
//!
//! Token-based patterns used to name backup artifacts, for example
//! `backup-{YYYY}-{MM}-{DD}_{HH}-{mm}-{SS}`. Tokens are case-sensitive;
//! unknown `{...}` text is kept verbatim.

use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};

/// A named group of tokens, as offered by the naming rule editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenGroup {
    pub category: &'static str,
    pub tokens: &'static [&'static str],
}

/// All tokens understood by [`translate_pattern`].
pub const AVAILABLE_TOKENS: &[TokenGroup] = &[
    TokenGroup {
        category: "Date/Time",
        tokens: &["{YYYY}", "{YY}", "{MM}", "{DD}", "{HH}", "{mm}", "{SS}"],
    },
    TokenGroup {
        category: "Special",
        tokens: &["{TIMESTAMP}", "{date}", "{time}"],
    },
    TokenGroup {
        category: "Server/Database",
        tokens: &["{SERVER_NAME}", "{SERVER_HOST}", "{profile}"],
    },
];

/// Values substituted for the server and profile tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamingContext {
    pub server_name: String,
    pub server_host: String,
    pub profile_name: String,
}

/// Stored naming rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamingRule {
    #[serde(default)]
    pub id: u64,
    pub name: String,
    pub pattern: String,
}

impl NamingRule {
    /// Tokens in the pattern that [`translate_pattern`] does not know.
    pub fn unknown_tokens(&self) -> Vec<String> {
        scan(&self.pattern)
            .filter_map(|piece| match piece {
                Piece::Token(t) if !is_known(t) => Some(t.to_string()),
                _ => None,
            })
            .collect()
    }
}

fn is_known(token: &str) -> bool {
    AVAILABLE_TOKENS
        .iter()
        .any(|group| group.tokens.contains(&token))
}

enum Piece<'a> {
    Text(&'a str),
    Token(&'a str),
}

/// Split a pattern into literal text and `{...}` tokens.
fn scan(pattern: &str) -> impl Iterator<Item = Piece<'_>> {
    let mut rest = pattern;
    std::iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }
        if rest.starts_with('{') {
            let close = rest.find('}');
            let reopen = rest[1..].find('{').map(|i| i + 1);
            if let (Some(end), Some(next)) = (close, reopen) {
                if next < end {
                    let (text, tail) = rest.split_at(next);
                    rest = tail;
                    return Some(Piece::Text(text));
                }
            }
            if let Some(end) = close {
                let (token, tail) = rest.split_at(end + 1);
                rest = tail;
                return Some(Piece::Token(token));
            }
            let text = rest;
            rest = "";
            return Some(Piece::Text(text));
        }
        let end = rest.find('{').unwrap_or(rest.len());
        let (text, tail) = rest.split_at(end);
        rest = tail;
        Some(Piece::Text(text))
    })
}

/// Replace every known token in `pattern` using `ctx` and the time `now`.
pub fn translate_pattern<Tz>(pattern: &str, ctx: &NamingContext, now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let mut out = String::with_capacity(pattern.len() + 16);
    for piece in scan(pattern) {
        match piece {
            Piece::Text(text) => out.push_str(text),
            Piece::Token(token) => match token {
                "{date}" => out.push_str(&now.format("%Y-%m-%d").to_string()),
                "{time}" => out.push_str(&now.format("%H-%M-%S").to_string()),
                "{profile}" => out.push_str(&ctx.profile_name),
                "{YYYY}" => out.push_str(&now.format("%Y").to_string()),
                "{YY}" => out.push_str(&now.format("%y").to_string()),
                "{MM}" => out.push_str(&now.format("%m").to_string()),
                "{DD}" => out.push_str(&now.format("%d").to_string()),
                "{HH}" => out.push_str(&now.format("%H").to_string()),
                "{mm}" => out.push_str(&now.format("%M").to_string()),
                "{SS}" => out.push_str(&now.format("%S").to_string()),
                "{TIMESTAMP}" => out.push_str(&now.timestamp().to_string()),
                "{SERVER_NAME}" => out.push_str(&ctx.server_name),
                "{SERVER_HOST}" => out.push_str(&ctx.server_host),
                other => out.push_str(other),
            },
        }
    }
    out
}

/// Preview a pattern with placeholder server and profile values.
///
/// An empty pattern previews as an empty string.
pub fn preview_pattern<Tz>(pattern: &str, ctx: &NamingContext, now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    if pattern.is_empty() {
        return String::new();
    }
    translate_pattern(pattern, ctx, now)
}

/// Append a token to a pattern, as clicking a token chip does.
pub fn insert_token(pattern: &str, token: &str) -> String {
    format!("{}{}", pattern, token)
}
