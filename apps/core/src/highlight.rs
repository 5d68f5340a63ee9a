//! JSON syntax highlighting
//!
//! A single regex pass classifies quoted strings (keys when followed by a
//! colon), literals and numbers. The HTML renderer wraps each match in a
//! `<span class="...">`, the terminal colours the same tokens directly.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Value;

static TOKEN_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"("(\\u[a-zA-Z0-9]{4}|\\[^u]|[^\\"])*"(\s*:)?|\b(true|false|null)\b|-?\d+(?:\.\d*)?(?:[eE][+\-]?\d+)?)"#,
    )
    .expect("JSON token pattern is valid")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Plain,
    Key,
    String,
    Number,
    Boolean,
    Null,
}

impl TokenKind {
    /// CSS class of the `<span>` wrapping the token
    pub const fn class(self) -> Option<&'static str> {
        match self {
            Self::Plain => None,
            Self::Key => Some("key"),
            Self::String => Some("string"),
            Self::Number => Some("number"),
            Self::Boolean => Some("boolean"),
            Self::Null => Some("null"),
        }
    }

    fn classify(token: &str) -> Self {
        if token.starts_with('"') {
            if token.ends_with(':') {
                Self::Key
            } else {
                Self::String
            }
        } else if token.contains("true") || token.contains("false") {
            Self::Boolean
        } else if token.contains("null") {
            Self::Null
        } else {
            Self::Number
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
}

/// Four-space indented JSON. A string value is assumed to be formatted already.
pub fn pretty_json(value: &Value) -> String {
    if let Value::String(text) = value {
        return text.clone();
    }

    let mut buffer = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(b"    "));
    if value.serialize(&mut serializer).is_err() {
        return value.to_string();
    }
    String::from_utf8(buffer).unwrap_or_else(|_| value.to_string())
}

/// Splits `text` into classified tokens; the gaps between matches are `Plain`
pub fn tokenize(text: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut last = 0;

    for found in TOKEN_PATTERN.find_iter(text) {
        if found.start() > last {
            tokens.push(Token {
                kind: TokenKind::Plain,
                text: &text[last..found.start()],
            });
        }
        tokens.push(Token {
            kind: TokenKind::classify(found.as_str()),
            text: found.as_str(),
        });
        last = found.end();
    }

    if last < text.len() {
        tokens.push(Token {
            kind: TokenKind::Plain,
            text: &text[last..],
        });
    }

    tokens
}

/// Escapes `& < >` and wraps every token in a classed `<span>`
pub fn highlight_html(text: &str) -> String {
    let escaped = text
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;");

    let mut html = String::with_capacity(escaped.len() * 2);
    for token in tokenize(&escaped) {
        match token.kind.class() {
            Some(class) => {
                html.push_str("<span class=\"");
                html.push_str(class);
                html.push_str("\">");
                html.push_str(token.text);
                html.push_str("</span>");
            }
            None => html.push_str(token.text),
        }
    }
    html
}

pub fn syntax_highlight(value: &Value) -> String {
    highlight_html(&pretty_json(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn pretty_json_uses_four_spaces_and_keeps_key_order() {
        let value = json!({ "zeta": 1, "alpha": [true] });
        assert_eq!(
            pretty_json(&value),
            "{\n    \"zeta\": 1,\n    \"alpha\": [\n        true\n    ]\n}"
        );
    }

    #[test]
    fn string_values_pass_through() {
        assert_eq!(pretty_json(&json!("already text")), "already text");
    }

    #[test]
    fn classifies_each_kind() {
        let kinds: Vec<TokenKind> = tokenize(r#"{"a": "b", "n": -1.5e3, "t": false, "z": null}"#)
            .into_iter()
            .filter(|token| token.kind != TokenKind::Plain)
            .map(|token| token.kind)
            .collect();

        assert_eq!(
            kinds,
            vec![
                TokenKind::Key,
                TokenKind::String,
                TokenKind::Key,
                TokenKind::Number,
                TokenKind::Key,
                TokenKind::Boolean,
                TokenKind::Key,
                TokenKind::Null,
            ]
        );
    }

    #[test]
    fn tokens_cover_the_whole_input() {
        let text = "{\n    \"map\": \"i1\"\n}";
        let joined: String = tokenize(text).iter().map(|token| token.text).collect();
        assert_eq!(joined, text);
    }

    #[test]
    fn html_output_wraps_tokens_and_escapes_markup() {
        let html = syntax_highlight(&json!({ "tag": "<b>", "ok": true }));
        assert_eq!(
            html,
            "{\n    <span class=\"key\">\"tag\":</span> <span class=\"string\">\"&lt;b&gt;\"</span>,\n    <span class=\"key\">\"ok\":</span> <span class=\"boolean\">true</span>\n}"
        );
    }
}
