//! Conversation turns and the client ↔ provider role vocabularies.

use serde::{Deserialize, Serialize};

/// Role vocabulary understood by the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Model => "model",
        }
    }
}

/// Sender tag used by the client transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

/// Maps a client sender tag onto the provider's role vocabulary.
pub fn provider_role(sender: Sender) -> Role {
    match sender {
        Sender::User => Role::User,
        Sender::Bot => Role::Model,
    }
}

/// One provider-facing utterance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub role: Role,
    pub text: String,
}

impl Turn {
    pub fn new(role: Role, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Role::User, text)
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self::new(Role::Model, text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sender_maps_to_provider_role() {
        assert_eq!(provider_role(Sender::User), Role::User);
        assert_eq!(provider_role(Sender::Bot), Role::Model);
    }

    #[test]
    fn wire_spelling_matches_as_str() {
        for role in [Role::User, Role::Model] {
            let json = serde_json::to_value(role).expect("serialize");
            assert_eq!(json, role.as_str());
        }
        assert_eq!(serde_json::to_value(Sender::Bot).expect("serialize"), "bot");
    }

    #[test]
    fn unknown_role_fails_to_decode() {
        assert!(serde_json::from_str::<Role>(r#""assistant""#).is_err());
    }
}
