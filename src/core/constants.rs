//! Shared constants used across the application

/// Default model for plain chat and image-description turns.
pub const FLASH_MODEL: &str = "gemini-2.5-flash";

/// Heavier model used for presentation generation.
pub const PRO_MODEL: &str = "gemini-2.5-pro";

/// Base URL of the generative-language endpoint. Individual requests append
/// `/models/{model}:generateContent`.
pub const API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Environment variable consulted first when resolving the API key.
pub const KEY_ENV_VAR: &str = "GEMINI_API_KEY";

/// Keys equal to this sentinel were never filled in and must not be sent.
pub const KEY_PLACEHOLDER_SENTINEL: &str = "YOUR_GEMINI_API_KEY_HERE";

/// Real keys are longer than this; anything shorter is treated as absent.
pub const KEY_MIN_LEN: usize = 20;

/// Width at which auto-derived session titles are clipped.
pub const TITLE_CLIP_GRAPHEMES: usize = 20;

/// Title of the placeholder session seeded into an empty store.
pub const SEED_SESSION_TITLE: &str = "Initial Session";
