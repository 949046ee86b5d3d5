//! Prompt composition: how one line of user input becomes an outbound
//! request, depending on the active tool mode.
//!
//! Composition is invisible to the transcript. The stored user message is
//! always the raw trimmed text; only the outgoing request text differs.

use crate::core::constants::{FLASH_MODEL, PRO_MODEL};
use crate::core::tools::ToolMode;

/// Fixed instruction template prepended to the user's title in presentation
/// mode. The user's input is concatenated directly to the end.
pub const PRESENTATION_TEMPLATE: &str = "Generate a single-file HTML presentation named \
[TITLE].html (replace [TITLE] with the user's input) and deliver it as a downloadable file \
attachment (do not display the code inline or ask the user to copy/paste)—the file must be the \
complete HTML document with content-type text/html; the first slide must be a blue–black \
gradient title slide showing the exact heading [TITLE], subtitle “Powered by PKP.ai”, and \
today’s date; include full-screen white content slides for Introduction, History and Evolution, \
Key Features and Characteristics, Importance in Human Society, Challenges or Concerns, Future \
Outlook, and Conclusion; every slide must be exactly 100vh, centered vertically and \
horizontally, use a fixed .deck container navigated only by updating transform: \
translateY(-index * 100vh) (no wheel/touch/swipe), set html, body { height:100%; margin:0; \
overflow:hidden; } so there are no scrollbars, ensure text fits the viewport by responsive \
sizing (clamp()) or auto-splitting overflow into extra slides (so no internal scrolling), \
include keyboard navigation (ArrowRight/ArrowLeft and Space for next), a bottom-right footer \
“PKP.ai Presentation – Use ← → to navigate”, minimal accessible CSS/semantics, and attach the \
ready-to-download file named [TITLE].html in the chat response with no other text or \
explanation and the tittle is";

/// Instruction prefix applied in image mode.
pub const IMAGE_PREFIX: &str = "Generate an image based on this description: ";

pub const DEFAULT_INPUT_HINT: &str = "Start typing your message...";
pub const PRESENTATION_INPUT_HINT: &str =
    "Enter title of project (e.g., 'Future of AI in Healthcare')";

/// The outbound request text and the model it is addressed to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedPrompt {
    pub request_text: String,
    pub model: &'static str,
}

/// Build the request payload for one user turn.
pub fn compose(raw: &str, mode: ToolMode) -> ComposedPrompt {
    match mode {
        ToolMode::None => ComposedPrompt {
            request_text: raw.to_string(),
            model: FLASH_MODEL,
        },
        ToolMode::Image => ComposedPrompt {
            request_text: format!("{IMAGE_PREFIX}{raw}"),
            model: FLASH_MODEL,
        },
        ToolMode::Presentation => ComposedPrompt {
            request_text: format!("{PRESENTATION_TEMPLATE}{raw}"),
            model: PRO_MODEL,
        },
        // the send path rejects reports before composing; composing anyway
        // must not invent a transform
        ToolMode::Reports => ComposedPrompt {
            request_text: raw.to_string(),
            model: FLASH_MODEL,
        },
    }
}

/// Placeholder text shown in the input affordance for the active mode.
pub fn input_hint(mode: ToolMode) -> &'static str {
    match mode {
        ToolMode::Presentation => PRESENTATION_INPUT_HINT,
        _ => DEFAULT_INPUT_HINT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_chat_passes_text_through_on_flash() {
        let prompt = compose("Hello", ToolMode::None);
        assert_eq!(prompt.request_text, "Hello");
        assert_eq!(prompt.model, FLASH_MODEL);
    }

    #[test]
    fn image_mode_prepends_the_instruction() {
        let prompt = compose("a red fox", ToolMode::Image);
        assert_eq!(
            prompt.request_text,
            "Generate an image based on this description: a red fox"
        );
        assert_eq!(prompt.model, FLASH_MODEL);
    }

    #[test]
    fn presentation_mode_wraps_the_title_on_pro() {
        let prompt = compose("AI in Healthcare", ToolMode::Presentation);
        assert!(prompt.request_text.starts_with(PRESENTATION_TEMPLATE));
        assert!(prompt.request_text.ends_with("AI in Healthcare"));
        assert_eq!(prompt.model, PRO_MODEL);
    }

    #[test]
    fn presentation_mode_swaps_the_input_hint() {
        assert_eq!(input_hint(ToolMode::Presentation), PRESENTATION_INPUT_HINT);
        assert_eq!(input_hint(ToolMode::None), DEFAULT_INPUT_HINT);
        assert_eq!(input_hint(ToolMode::Image), DEFAULT_INPUT_HINT);
    }
}
