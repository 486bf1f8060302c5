// @awa-component: CHAT-PersonaRegistry
//
//! Persona registry: the fixed set of AI personas a conversation can use.
//!
//! A persona is a display name, a system prompt and the generation
//! parameters sent with every provider request. The registry is built once
//! at startup and never mutated afterwards.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

const BLUE_PROMPT: &str = include_str!("prompts/blue.md");
const RED_PROMPT: &str = include_str!("prompts/red.md");

/// Output-length cap shared by every persona.
pub const MAX_OUTPUT_TOKENS: u32 = 1000;
/// Nucleus-sampling cumulative probability cutoff.
pub const TOP_P: f64 = 0.95;
/// Candidate restriction for top-k sampling.
pub const TOP_K: u32 = 40;

/// Persona selector carried on every chat request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Blue,
    Red,
}

impl Mode {
    /// Every mode, in the order they are advertised.
    pub const ALL: [Mode; 2] = [Mode::Blue, Mode::Red];

    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Blue => "blue",
            Mode::Red => "red",
        }
    }

    /// The opposite persona.
    pub fn toggled(self) -> Mode {
        match self {
            Mode::Blue => Mode::Red,
            Mode::Red => Mode::Blue,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a mode identifier matches no registered persona.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown mode: '{0}' (expected one of: blue, red)")]
pub struct UnknownMode(pub String);

impl FromStr for Mode {
    type Err = UnknownMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "blue" => Ok(Mode::Blue),
            "red" => Ok(Mode::Red),
            other => Err(UnknownMode(other.to_string())),
        }
    }
}

/// Sampling parameters attached to a provider request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GenerationParams {
    pub temperature: f64,
    pub max_output_tokens: u32,
    pub top_p: f64,
    pub top_k: u32,
}

impl GenerationParams {
    /// Shared defaults with a persona-specific temperature.
    pub const fn with_temperature(temperature: f64) -> Self {
        Self {
            temperature,
            max_output_tokens: MAX_OUTPUT_TOKENS,
            top_p: TOP_P,
            top_k: TOP_K,
        }
    }
}

/// A named behavioral profile.
#[derive(Debug, Clone, PartialEq)]
pub struct Persona {
    pub mode: Mode,
    /// Display name shown in the UI and used in the greeting.
    pub name: &'static str,
    /// System prompt injected as the first provider turn.
    pub prompt: &'static str,
    pub generation: GenerationParams,
}

impl Persona {
    /// Greeting seeded into a fresh client transcript.
    pub fn greeting(&self) -> String {
        format!(
            "Welcome to the nexus. I'm {}, your AI companion. What reality shall we explore today?",
            self.name
        )
    }
}

/// Immutable mode → persona table.
#[derive(Debug, Clone)]
pub struct PersonaRegistry {
    blue: Persona,
    red: Persona,
}

impl PersonaRegistry {
    /// The two built-in personas: Cipher (blue) and Phantom (red).
    pub fn standard() -> Self {
        Self {
            blue: Persona {
                mode: Mode::Blue,
                name: "Cipher",
                prompt: BLUE_PROMPT,
                generation: GenerationParams::with_temperature(0.7),
            },
            red: Persona {
                mode: Mode::Red,
                name: "Phantom",
                prompt: RED_PROMPT,
                // Higher variance for the antagonist.
                generation: GenerationParams::with_temperature(0.9),
            },
        }
    }

    pub fn get(&self, mode: Mode) -> &Persona {
        match mode {
            Mode::Blue => &self.blue,
            Mode::Red => &self.red,
        }
    }

    /// Look up a persona by its wire identifier.
    pub fn resolve(&self, mode: &str) -> Result<&Persona, UnknownMode> {
        mode.parse::<Mode>().map(|m| self.get(m))
    }

    /// Registered modes, in advertised order.
    pub fn modes(&self) -> Vec<Mode> {
        Mode::ALL.to_vec()
    }
}

impl Default for PersonaRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_mode_resolves_to_a_non_empty_prompt() {
        let registry = PersonaRegistry::standard();
        for mode in Mode::ALL {
            let persona = registry.resolve(mode.as_str()).expect("registered mode");
            assert_eq!(persona.mode, mode);
            assert!(!persona.prompt.trim().is_empty());
        }
    }

    #[test]
    fn personas_are_named() {
        let registry = PersonaRegistry::standard();
        assert_eq!(registry.get(Mode::Blue).name, "Cipher");
        assert_eq!(registry.get(Mode::Red).name, "Phantom");
        assert!(registry.get(Mode::Blue).prompt.contains("Cipher"));
        assert!(registry.get(Mode::Red).prompt.contains("Phantom"));
    }

    #[test]
    fn generation_parameters_per_persona() {
        let registry = PersonaRegistry::standard();
        let blue = registry.get(Mode::Blue).generation;
        let red = registry.get(Mode::Red).generation;
        assert_eq!(blue.temperature, 0.7);
        assert_eq!(red.temperature, 0.9);
        for params in [blue, red] {
            assert_eq!(params.max_output_tokens, 1000);
            assert_eq!(params.top_p, 0.95);
            assert_eq!(params.top_k, 40);
        }
    }

    #[test]
    fn unknown_modes_are_rejected() {
        let registry = PersonaRegistry::standard();
        assert_eq!(
            registry.resolve("green").unwrap_err(),
            UnknownMode("green".into())
        );
        assert!(registry.resolve("").is_err());
        assert!(registry.resolve("Blue").is_err());
    }

    #[test]
    fn toggling_flips_between_the_two_modes() {
        assert_eq!(Mode::Blue.toggled(), Mode::Red);
        assert_eq!(Mode::Red.toggled(), Mode::Blue);
    }

    #[test]
    fn mode_serializes_lowercase() {
        let json = serde_json::to_string(&Mode::ALL).expect("serialize");
        assert_eq!(json, r#"["blue","red"]"#);
    }

    #[test]
    fn greeting_names_the_persona() {
        let registry = PersonaRegistry::standard();
        assert!(registry.get(Mode::Red).greeting().contains("Phantom"));
        assert_eq!(
            registry.get(Mode::Blue).greeting(),
            "Welcome to the nexus. I'm Cipher, your AI companion. \
             What reality shall we explore today?"
        );
    }
}
