//! Terminal rendering of transcript messages.

use nexus_core::markup::Span;
use nexus_core::session::Message;
use nexus_core::turn::Sender;

const BOLD: &str = "\x1b[1m";
const ITALIC: &str = "\x1b[3m";
const CODE: &str = "\x1b[36m";
const RESET: &str = "\x1b[0m";

/// ANSI-styled text for a list of spans. Line breaks keep the indent of
/// the message body.
pub fn spans_to_ansi(spans: &[Span]) -> String {
    let mut out = String::new();
    for span in spans {
        match span {
            Span::Text(t) => out.push_str(t),
            Span::Bold(t) => styled(&mut out, BOLD, t),
            Span::Italic(t) => styled(&mut out, ITALIC, t),
            Span::Code(t) => styled(&mut out, CODE, t),
            Span::LineBreak => out.push_str("\n  "),
        }
    }
    out
}

fn styled(out: &mut String, style: &str, text: &str) {
    out.push_str(style);
    out.push_str(text);
    out.push_str(RESET);
}

/// `<name>: <body>` with the body's markup applied for bot messages.
pub fn message_line(message: &Message, persona_name: &str) -> String {
    let who = match message.sender {
        Sender::User => "You",
        Sender::Bot => persona_name,
    };
    format!("{BOLD}{who}{RESET}: {}", spans_to_ansi(&message.spans()))
}
