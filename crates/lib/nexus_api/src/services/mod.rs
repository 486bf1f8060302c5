//! Outbound service clients.

pub mod gemini;
