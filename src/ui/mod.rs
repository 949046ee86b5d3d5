//! Terminal view layer for interactive chat sessions.
//!
//! The view is deliberately thin: it projects the session store and the
//! active transcript as lines of text, and reacts to the redraw signal the
//! core raises after every state-changing operation.
//!
//! - [`render`]: line composition for the session list, transcript, and
//!   status notices.
//! - [`repl`]: the interaction loop that dispatches user input to
//!   [`crate::commands`] and coordinates in-flight sends via
//!   [`crate::core::dispatch`].
//!
//! Ownership boundary: this layer presents and captures interaction state,
//! while [`crate::core`] owns domain logic and backend coordination.

pub mod render;
pub mod repl;
