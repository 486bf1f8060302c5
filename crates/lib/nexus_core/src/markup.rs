// @awa-component: CHAT-Markup
//
//! Inline markup for bot replies.
//!
//! Four conversions are recognized and nothing else:
//!
//! | Source      | Span               |
//! |-------------|--------------------|
//! | `**text**`  | [`Span::Bold`]     |
//! | `*text*`    | [`Span::Italic`]   |
//! | `` `text` `` | [`Span::Code`]    |
//! | newline     | [`Span::LineBreak`] |
//!
//! Markers never span lines and never need to close: an unmatched marker is
//! kept as literal text. Bold and italic content may not start or end with
//! whitespace, so arithmetic like `2 * 3 * 4` stays untouched.

/// A rendered fragment of a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Span {
    Text(String),
    Bold(String),
    Italic(String),
    Code(String),
    LineBreak,
}

/// Split `input` into display spans. Never fails.
pub fn parse(input: &str) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut text = String::new();
    let mut rest = input;

    while let Some(c) = rest.chars().next() {
        match c {
            '\r' if rest[1..].starts_with('\n') => rest = &rest[1..],
            '\n' => {
                flush(&mut spans, &mut text);
                spans.push(Span::LineBreak);
                rest = &rest[1..];
            }
            '`' => match enclosed(&rest[1..], "`", false) {
                Some((inner, after)) => {
                    flush(&mut spans, &mut text);
                    spans.push(Span::Code(inner.to_string()));
                    rest = after;
                }
                None => {
                    text.push('`');
                    rest = &rest[1..];
                }
            },
            '*' if rest.starts_with("**") => match enclosed(&rest[2..], "**", true) {
                Some((inner, after)) => {
                    flush(&mut spans, &mut text);
                    spans.push(Span::Bold(inner.to_string()));
                    rest = after;
                }
                None => {
                    text.push_str("**");
                    rest = &rest[2..];
                }
            },
            '*' => match enclosed(&rest[1..], "*", true) {
                Some((inner, after)) => {
                    flush(&mut spans, &mut text);
                    spans.push(Span::Italic(inner.to_string()));
                    rest = after;
                }
                None => {
                    text.push('*');
                    rest = &rest[1..];
                }
            },
            _ => {
                text.push(c);
                rest = &rest[c.len_utf8()..];
            }
        }
    }

    flush(&mut spans, &mut text);
    spans
}

/// Find the closing `marker` on the current line of `s`.
///
/// Returns the enclosed text and whatever follows the closing marker.
fn enclosed<'a>(s: &'a str, marker: &str, tight: bool) -> Option<(&'a str, &'a str)> {
    let line = s.find('\n').map_or(s, |end| &s[..end]);
    let close = line.find(marker)?;
    let inner = &s[..close];
    if inner.is_empty() {
        return None;
    }
    if tight && (inner.starts_with(char::is_whitespace) || inner.ends_with(char::is_whitespace)) {
        return None;
    }
    Some((inner, &s[close + marker.len()..]))
}

fn flush(spans: &mut Vec<Span>, text: &mut String) {
    if !text.is_empty() {
        spans.push(Span::Text(std::mem::take(text)));
    }
}

/// Render spans as HTML. All text is escaped; the only tags emitted are
/// `<strong>`, `<em>`, `<code>` and `<br>`.
pub fn to_html(spans: &[Span]) -> String {
    let mut out = String::new();
    for span in spans {
        match span {
            Span::Text(t) => escape_into(&mut out, t),
            Span::Bold(t) => wrap(&mut out, "strong", t),
            Span::Italic(t) => wrap(&mut out, "em", t),
            Span::Code(t) => wrap(&mut out, "code", t),
            Span::LineBreak => out.push_str("<br>"),
        }
    }
    out
}

/// [`parse`] followed by [`to_html`].
pub fn render_html(input: &str) -> String {
    to_html(&parse(input))
}

fn wrap(out: &mut String, tag: &str, text: &str) {
    out.push('<');
    out.push_str(tag);
    out.push('>');
    escape_into(out, text);
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}

fn escape_into(out: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
}
