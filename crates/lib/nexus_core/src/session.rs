// @awa-component: CHAT-ClientSession
//
//! Client-side conversation state.
//!
//! [`ChatSession`] owns the visible transcript and input field and builds
//! relay requests. It never performs I/O: a front-end driver sends the
//! [`PendingTurn`] it hands out, waits out the typing delay, and reports
//! back through [`ChatSession::reply_arrived`], [`ChatSession::deliver_reply`]
//! or [`ChatSession::deliver_error`].

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::markup::{self, Span};
use crate::persona::{Mode, PersonaRegistry};
use crate::turn::{Sender, provider_role};
use crate::wire::{ChatRequest, HistoryEntry};

/// Bot message appended when a request fails for any reason.
pub const ERROR_REPLY: &str = "Oops! Something went wrong. Please try again.";

/// One transcript entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    pub sender: Sender,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    fn now(sender: Sender, text: impl Into<String>) -> Self {
        Self {
            sender,
            text: text.into(),
            timestamp: Utc::now(),
        }
    }

    /// Display spans. Markup applies to bot messages only.
    pub fn spans(&self) -> Vec<Span> {
        match self.sender {
            Sender::Bot => markup::parse(&self.text),
            Sender::User => vec![Span::Text(self.text.clone())],
        }
    }
}

/// A request handed to the driver, tagged with the conversation it
/// belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingTurn {
    epoch: u64,
    pub request: ChatRequest,
}

/// Transcript, input field and request state for one chat window.
#[derive(Debug, Clone)]
pub struct ChatSession {
    registry: PersonaRegistry,
    mode: Mode,
    messages: Vec<Message>,
    input: String,
    in_flight: bool,
    typing: bool,
    epoch: u64,
}

impl ChatSession {
    pub fn new(mode: Mode) -> Self {
        let mut session = Self {
            registry: PersonaRegistry::standard(),
            mode,
            messages: Vec::new(),
            input: String::new(),
            in_flight: false,
            typing: false,
            epoch: 0,
        };
        session.reset();
        session
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Display name of the active persona.
    pub fn persona_name(&self) -> &'static str {
        self.registry.get(self.mode).name
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn is_typing(&self) -> bool {
        self.typing
    }

    /// Switch persona. A different mode discards the transcript and starts
    /// over with a fresh greeting; replies still pending for the old
    /// conversation will be ignored.
    pub fn set_mode(&mut self, mode: Mode) {
        if mode == self.mode {
            return;
        }
        self.mode = mode;
        self.epoch += 1;
        self.reset();
    }

    pub fn toggle_mode(&mut self) {
        self.set_mode(self.mode.toggled());
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    /// Whether the send control is enabled.
    pub fn can_send(&self) -> bool {
        !self.in_flight && !self.input.trim().is_empty()
    }

    /// Enter key handling. A modified Enter inserts a newline; a plain
    /// Enter submits.
    pub fn press_enter(&mut self, modified: bool) -> Option<PendingTurn> {
        if modified {
            self.input.push('\n');
            return None;
        }
        self.submit()
    }

    /// Append the user's message and build the relay request.
    ///
    /// The request history is the transcript as it stood before this
    /// message; the message itself travels in `request.message`.
    pub fn submit(&mut self) -> Option<PendingTurn> {
        if !self.can_send() {
            return None;
        }

        let message = std::mem::take(&mut self.input);
        let history = self
            .messages
            .iter()
            .map(|m| HistoryEntry::new(provider_role(m.sender), m.text.clone()))
            .collect();

        self.messages.push(Message::now(Sender::User, message.clone()));
        self.in_flight = true;

        Some(PendingTurn {
            epoch: self.epoch,
            request: ChatRequest {
                message,
                mode: self.mode.to_string(),
                history,
            },
        })
    }

    /// The relay answered; show the typing indicator until delivery.
    ///
    /// Returns `false` if the reply belongs to an abandoned conversation.
    pub fn reply_arrived(&mut self, pending: &PendingTurn) -> bool {
        if !self.is_current(pending) {
            return false;
        }
        self.typing = true;
        true
    }

    /// Append the bot's reply. Returns `false` for stale replies.
    pub fn deliver_reply(&mut self, pending: &PendingTurn, reply: impl Into<String>) -> bool {
        if !self.is_current(pending) {
            return false;
        }
        self.messages.push(Message::now(Sender::Bot, reply));
        self.finish();
        true
    }

    /// Append the fallback error message. Returns `false` for stale requests.
    pub fn deliver_error(&mut self, pending: &PendingTurn) -> bool {
        self.deliver_reply(pending, ERROR_REPLY)
    }

    fn is_current(&self, pending: &PendingTurn) -> bool {
        pending.epoch == self.epoch
    }

    fn finish(&mut self) {
        self.in_flight = false;
        self.typing = false;
    }

    fn reset(&mut self) {
        let greeting = self.registry.get(self.mode).greeting();
        self.messages = vec![Message::now(Sender::Bot, greeting)];
        self.finish();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::turn::Role;

    fn submit(session: &mut ChatSession, text: &str) -> PendingTurn {
        session.set_input(text);
        session.submit().expect("submit accepted")
    }

    #[test]
    fn starts_with_a_greeting() {
        let session = ChatSession::new(Mode::Blue);
        assert_eq!(session.messages().len(), 1);
        assert_eq!(session.messages()[0].sender, Sender::Bot);
        assert!(session.messages()[0].text.contains("Cipher"));
    }

    #[test]
    fn submit_appends_optimistically_and_clears_input() {
        let mut session = ChatSession::new(Mode::Blue);
        let pending = submit(&mut session, "hi");

        assert_eq!(session.input(), "");
        assert!(session.is_in_flight());
        assert_eq!(session.messages().len(), 2);
        assert_eq!(session.messages()[1].sender, Sender::User);
        assert_eq!(session.messages()[1].text, "hi");

        assert_eq!(pending.request.message, "hi");
        assert_eq!(pending.request.mode, "blue");
        // History is the greeting only, tagged with the provider's role.
        assert_eq!(pending.request.history.len(), 1);
        assert_eq!(pending.request.history[0].role, Role::Model);
    }

    #[test]
    fn history_maps_senders_to_roles() {
        let mut session = ChatSession::new(Mode::Blue);
        let first = submit(&mut session, "one");
        session.deliver_reply(&first, "reply one");
        let second = submit(&mut session, "two");

        let roles: Vec<Role> = second.request.history.iter().map(|h| h.role).collect();
        assert_eq!(roles, vec![Role::Model, Role::User, Role::Model]);
        assert_eq!(second.request.history[1].text(), "one");
    }

    #[test]
    fn send_is_disabled_while_in_flight_or_blank() {
        let mut session = ChatSession::new(Mode::Red);
        session.set_input("   ");
        assert!(!session.can_send());
        assert!(session.submit().is_none());

        let pending = submit(&mut session, "first");
        session.set_input("second");
        assert!(!session.can_send());
        assert!(session.submit().is_none());

        session.deliver_reply(&pending, "ok");
        assert!(session.can_send());
    }

    #[test]
    fn reply_goes_through_typing_then_delivery() {
        let mut session = ChatSession::new(Mode::Blue);
        let pending = submit(&mut session, "hi");

        assert!(session.reply_arrived(&pending));
        assert!(session.is_typing());
        assert!(session.is_in_flight());

        assert!(session.deliver_reply(&pending, "Hello there"));
        assert!(!session.is_typing());
        assert!(!session.is_in_flight());
        let last = session.messages().last().expect("message");
        assert_eq!(last.sender, Sender::Bot);
        assert_eq!(last.text, "Hello there");
    }

    #[test]
    fn failure_appends_the_fallback_message() {
        let mut session = ChatSession::new(Mode::Blue);
        let pending = submit(&mut session, "hi");
        session.deliver_error(&pending);

        let texts: Vec<&str> = session.messages().iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts[1], "hi");
        assert_eq!(texts[2], ERROR_REPLY);
        assert!(!session.is_in_flight());
    }

    #[test]
    fn switching_mode_resets_to_a_fresh_greeting() {
        let mut session = ChatSession::new(Mode::Blue);
        let pending = submit(&mut session, "hi");
        session.deliver_reply(&pending, "hello");

        session.toggle_mode();
        assert_eq!(session.mode(), Mode::Red);
        assert_eq!(session.messages().len(), 1);
        assert!(session.messages()[0].text.contains("Phantom"));
        assert!(!session.messages()[0].text.contains("Cipher"));
    }

    #[test]
    fn same_mode_is_a_no_op() {
        let mut session = ChatSession::new(Mode::Blue);
        let pending = submit(&mut session, "hi");
        session.set_mode(Mode::Blue);
        assert_eq!(session.messages().len(), 2);
        assert!(session.deliver_reply(&pending, "still here"));
    }

    #[test]
    fn stale_replies_are_dropped_after_a_switch() {
        let mut session = ChatSession::new(Mode::Blue);
        let pending = submit(&mut session, "hi");
        session.set_mode(Mode::Red);

        assert!(!session.is_in_flight());
        assert!(!session.reply_arrived(&pending));
        assert!(!session.deliver_reply(&pending, "late"));
        assert!(!session.deliver_error(&pending));
        assert_eq!(session.messages().len(), 1);
    }

    #[test]
    fn modified_enter_inserts_newline() {
        let mut session = ChatSession::new(Mode::Blue);
        session.set_input("line one");
        assert!(session.press_enter(true).is_none());
        assert_eq!(session.input(), "line one\n");

        session.set_input(format!("{}line two", session.input()));
        let pending = session.press_enter(false).expect("submitted");
        assert_eq!(pending.request.message, "line one\nline two");
    }

    #[test]
    fn markup_applies_to_bot_messages_only() {
        let mut session = ChatSession::new(Mode::Blue);
        let pending = submit(&mut session, "**not bold**");
        session.deliver_reply(&pending, "**bold**");

        let user = &session.messages()[1];
        let bot = &session.messages()[2];
        assert_eq!(user.spans(), vec![Span::Text("**not bold**".into())]);
        assert_eq!(bot.spans(), vec![Span::Bold("bold".into())]);
    }
}
