//! Interactive chat loop.
//!
//! Reads stdin line by line. A trailing `\` continues the message on the
//! next line; `/switch`, `/dismiss`, `/help` and `/quit` are commands when
//! typed at the start of a message.

use nexus_core::disclaimer::Disclaimer;
use nexus_core::session::{ChatSession, PendingTurn};
use nexus_core::typing::typing_delay;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::Result;
use crate::cli::ChatArgs;
use crate::disclaimer_store::FileDisclaimerStore;
use crate::relay_client::RelayClient;
use crate::render;

const HELP: &str = "Commands: /switch (change persona, clears chat), /dismiss (hide notice), /quit\n\
End a line with \\ to continue typing on the next line.";

/// One line of user input, interpreted.
#[derive(Debug, PartialEq, Eq)]
enum Input<'a> {
    Quit,
    Switch,
    Dismiss,
    Help,
    /// Message text; `true` when the line asks for a continuation.
    Text(&'a str, bool),
}

/// Commands only count when no message is being composed.
fn parse_line(line: &str, composing: bool) -> Input<'_> {
    if !composing {
        match line.trim() {
            "/quit" | "/exit" => return Input::Quit,
            "/switch" => return Input::Switch,
            "/dismiss" => return Input::Dismiss,
            "/help" => return Input::Help,
            _ => {}
        }
    }
    match line.strip_suffix('\\') {
        Some(head) => Input::Text(head, true),
        None => Input::Text(line, false),
    }
}

pub async fn run(args: ChatArgs) -> Result<()> {
    let relay = RelayClient::new(&args.relay_url)?;
    log::info!("using relay at {}", relay.chat_url());

    let state_dir = args.state_dir.unwrap_or_else(FileDisclaimerStore::default_dir);
    let mut disclaimer = Disclaimer::new(FileDisclaimerStore::new(&state_dir));
    let mut session = ChatSession::new(args.mode);

    if disclaimer.is_visible() {
        println!("! {}\n  (type /dismiss to stop showing this notice)\n", disclaimer.text());
    }
    println!("{HELP}\n");
    print_last(&session);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match parse_line(&line, is_composing(&session)) {
            Input::Quit => break,
            Input::Help => println!("{HELP}"),
            Input::Switch => {
                session.toggle_mode();
                println!("-- switched to {} --", session.persona_name());
                print_last(&session);
            }
            Input::Dismiss => {
                if let Err(e) = disclaimer.dismiss() {
                    log::warn!("could not persist disclaimer flag: {e}");
                }
            }
            Input::Text(text, continued) => {
                session.set_input(format!("{}{text}", session.input()));
                if let Some(pending) = session.press_enter(continued) {
                    exchange(&relay, &mut session, pending).await;
                }
            }
        }
    }

    Ok(())
}

/// A message is being composed once any non-blank text has been continued.
fn is_composing(session: &ChatSession) -> bool {
    !session.input().trim().is_empty()
}

/// Send one turn, pause for the typing delay, then show the reply.
async fn exchange(relay: &RelayClient, session: &mut ChatSession, pending: PendingTurn) {
    match relay.send(&pending.request).await {
        Ok(reply) => {
            if session.reply_arrived(&pending) {
                println!("{} is typing...", session.persona_name());
                tokio::time::sleep(typing_delay(rand::random::<f64>())).await;
                session.deliver_reply(&pending, reply);
            }
        }
        Err(e) => {
            log::warn!("chat request failed: {e}");
            session.deliver_error(&pending);
        }
    }
    print_last(session);
}

fn print_last(session: &ChatSession) {
    if let Some(message) = session.messages().last() {
        println!("{}\n", render::message_line(message, session.persona_name()));
    }
}
