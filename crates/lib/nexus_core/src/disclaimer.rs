//! One-time knowledge-cutoff notice.
//!
//! Whether the notice was already dismissed lives in a [`DisclaimerStore`]
//! supplied by the front-end (a marker file for the CLI, `localStorage` in
//! the browser).

use std::io;

/// Text of the notice.
pub const DISCLAIMER_TEXT: &str = "Heads up: replies come from a language model whose knowledge \
stops at its training cutoff. Recent events may be missing or out of date.";

/// Persistence for the "already seen" flag.
pub trait DisclaimerStore {
    fn seen(&self) -> bool;
    fn mark_seen(&mut self) -> io::Result<()>;
}

/// Process-local store. Forgets the flag on exit.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    seen: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DisclaimerStore for MemoryStore {
    fn seen(&self) -> bool {
        self.seen
    }

    fn mark_seen(&mut self) -> io::Result<()> {
        self.seen = true;
        Ok(())
    }
}

/// The notice and its visibility on this device.
#[derive(Debug)]
pub struct Disclaimer<S> {
    store: S,
    visible: bool,
}

impl<S: DisclaimerStore> Disclaimer<S> {
    pub fn new(store: S) -> Self {
        let visible = !store.seen();
        Self { store, visible }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn text(&self) -> &'static str {
        DISCLAIMER_TEXT
    }

    /// Hide the notice and persist the flag.
    ///
    /// The notice is hidden even when persisting fails; the error is
    /// returned so the caller can report it.
    pub fn dismiss(&mut self) -> io::Result<()> {
        if !self.visible {
            return Ok(());
        }
        self.visible = false;
        self.store.mark_seen()
    }

    pub fn into_store(self) -> S {
        self.store
    }
}
