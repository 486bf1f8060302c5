//! Route paths served by the relay.

pub const POST_API_CHAT: &str = "/api/chat";
pub const GET_HEALTH: &str = "/health";

/// Human-readable listing returned with 404 responses.
pub const ENDPOINTS: [&str; 2] = ["POST /api/chat", "GET /health"];
