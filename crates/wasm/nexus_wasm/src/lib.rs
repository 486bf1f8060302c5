//! Browser bindings for the Nexus chat UI.
//!
//! The UI keeps all conversation state in a [`Session`]; JavaScript only
//! performs the `fetch`, the typing-delay `setTimeout` and `localStorage`
//! access for the disclaimer flag.

use nexus_core::disclaimer::DISCLAIMER_TEXT;
use nexus_core::markup;
use nexus_core::persona::Mode;
use nexus_core::session::{ChatSession, PendingTurn};
use nexus_core::turn::{Sender, provider_role};
use nexus_core::typing::typing_delay;
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// Returns the version of the nexus_wasm package.
#[wasm_bindgen]
pub fn version() -> String {
    nexus_core::version().to_string()
}

/// Bot markup → safe HTML (`<strong>`, `<em>`, `<code>`, `<br>` only).
#[wasm_bindgen(js_name = renderMarkup)]
pub fn render_markup(text: &str) -> String {
    markup::render_html(text)
}

/// Provider role (`user` / `model`) for a client sender tag (`user` / `bot`).
#[wasm_bindgen(js_name = providerRole)]
pub fn provider_role_js(sender: &str) -> Result<String, JsError> {
    role_for(sender).map_err(|e| JsError::new(&e))
}

/// Typing pause in ms for a `Math.random()` sample.
#[wasm_bindgen(js_name = typingDelayMs)]
pub fn typing_delay_ms(sample: f64) -> u32 {
    typing_delay(sample).as_millis() as u32
}

#[wasm_bindgen(js_name = disclaimerText)]
pub fn disclaimer_text() -> String {
    DISCLAIMER_TEXT.to_string()
}

fn role_for(sender: &str) -> Result<String, String> {
    let sender = match sender {
        "user" => Sender::User,
        "bot" => Sender::Bot,
        other => return Err(format!("Unknown sender: '{other}'")),
    };
    Ok(provider_role(sender).as_str().to_string())
}

/// Message as handed to the renderer.
#[derive(Serialize)]
struct MessageView<'a> {
    sender: Sender,
    text: &'a str,
    /// Milliseconds since the Unix epoch.
    timestamp: i64,
    html: String,
}

/// An in-flight request created by [`Session::submit`].
#[wasm_bindgen]
pub struct Pending {
    inner: PendingTurn,
}

#[wasm_bindgen]
impl Pending {
    /// JSON body for `POST /api/chat`.
    pub fn body(&self) -> Result<String, JsError> {
        serde_json::to_string(&self.inner.request).map_err(|e| JsError::new(&e.to_string()))
    }
}

/// One chat window.
#[wasm_bindgen]
pub struct Session {
    inner: ChatSession,
}

#[wasm_bindgen]
impl Session {
    #[wasm_bindgen(constructor)]
    pub fn new(mode: &str) -> Result<Session, JsError> {
        let mode = mode.parse::<Mode>().map_err(|e| JsError::new(&e.to_string()))?;
        Ok(Self {
            inner: ChatSession::new(mode),
        })
    }

    pub fn mode(&self) -> String {
        self.inner.mode().to_string()
    }

    #[wasm_bindgen(js_name = personaName)]
    pub fn persona_name(&self) -> String {
        self.inner.persona_name().to_string()
    }

    /// Switch persona; clears the conversation.
    #[wasm_bindgen(js_name = toggleMode)]
    pub fn toggle_mode(&mut self) {
        self.inner.toggle_mode();
    }

    #[wasm_bindgen(js_name = setInput)]
    pub fn set_input(&mut self, text: String) {
        self.inner.set_input(text);
    }

    pub fn input(&self) -> String {
        self.inner.input().to_string()
    }

    #[wasm_bindgen(js_name = canSend)]
    pub fn can_send(&self) -> bool {
        self.inner.can_send()
    }

    #[wasm_bindgen(js_name = isInFlight)]
    pub fn is_in_flight(&self) -> bool {
        self.inner.is_in_flight()
    }

    #[wasm_bindgen(js_name = isTyping)]
    pub fn is_typing(&self) -> bool {
        self.inner.is_typing()
    }

    /// Enter key: `modified` (Shift+Enter) inserts a newline, otherwise
    /// submits.
    #[wasm_bindgen(js_name = pressEnter)]
    pub fn press_enter(&mut self, modified: bool) -> Option<Pending> {
        self.inner.press_enter(modified).map(|inner| Pending { inner })
    }

    pub fn submit(&mut self) -> Option<Pending> {
        self.inner.submit().map(|inner| Pending { inner })
    }

    #[wasm_bindgen(js_name = replyArrived)]
    pub fn reply_arrived(&mut self, pending: &Pending) -> bool {
        self.inner.reply_arrived(&pending.inner)
    }

    #[wasm_bindgen(js_name = deliverReply)]
    pub fn deliver_reply(&mut self, pending: &Pending, reply: String) -> bool {
        self.inner.deliver_reply(&pending.inner, reply)
    }

    #[wasm_bindgen(js_name = deliverError)]
    pub fn deliver_error(&mut self, pending: &Pending) -> bool {
        self.inner.deliver_error(&pending.inner)
    }

    /// Transcript as JSON: `[{sender, text, timestamp, html}]`.
    #[wasm_bindgen(js_name = messagesJson)]
    pub fn messages_json(&self) -> String {
        messages_json(&self.inner)
    }
}

fn messages_json(session: &ChatSession) -> String {
    let views: Vec<MessageView<'_>> = session
        .messages()
        .iter()
        .map(|m| MessageView {
            sender: m.sender,
            text: &m.text,
            timestamp: m.timestamp.timestamp_millis(),
            html: markup::to_html(&m.spans()),
        })
        .collect();
    serde_json::to_string(&views).unwrap_or_else(|_| "[]".to_string())
}
