//! Payloads for the generateContent endpoint.
//!
//! The remote service answers with one of three well-formed shapes: a
//! candidate list, an error object, or (rarely) something else entirely.
//! The response type keeps all fields optional so that interpretation stays
//! a data question for the dispatch layer instead of a parse failure.

use serde::{Deserialize, Serialize};

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Content {
    pub parts: Vec<Part>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Part {
    pub text: String,
}

impl GenerateContentRequest {
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part { text: text.into() }],
            }],
        }
    }
}

#[derive(Deserialize, Debug, Default)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    pub error: Option<ApiErrorBody>,
}

#[derive(Deserialize, Debug, Default)]
pub struct Candidate {
    #[serde(default)]
    pub content: CandidateContent,
}

#[derive(Deserialize, Debug, Default)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Deserialize, Debug)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub message: String,
}

impl GenerateContentResponse {
    /// Text of the first candidate's first part, when the response carries
    /// one.
    pub fn first_candidate_text(&self) -> Option<&str> {
        self.candidates
            .first()
            .and_then(|candidate| candidate.content.parts.first())
            .map(|part| part.text.as_str())
    }
}

pub mod client;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_wraps_text_in_contents_and_parts() {
        let request = GenerateContentRequest::from_text("hello");
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["contents"][0]["parts"][0]["text"], "hello");
    }

    #[test]
    fn success_shape_exposes_candidate_text() {
        let body = r#"{"candidates":[{"content":{"parts":[{"text":"Hi there"}]}}]}"#;
        let response: GenerateContentResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.first_candidate_text(), Some("Hi there"));
        assert!(response.error.is_none());
    }

    #[test]
    fn error_shape_exposes_the_message() {
        let body = r#"{"error":{"message":"quota exceeded"}}"#;
        let response: GenerateContentResponse = serde_json::from_str(body).unwrap();
        assert!(response.first_candidate_text().is_none());
        assert_eq!(response.error.unwrap().message, "quota exceeded");
    }

    #[test]
    fn unrelated_shape_parses_but_carries_nothing() {
        let response: GenerateContentResponse =
            serde_json::from_str(r#"{"unexpected":true}"#).unwrap();
        assert!(response.first_candidate_text().is_none());
        assert!(response.error.is_none());
    }

    #[test]
    fn candidate_without_parts_yields_no_text() {
        let body = r#"{"candidates":[{"content":{"parts":[]}}]}"#;
        let response: GenerateContentResponse = serde_json::from_str(body).unwrap();
        assert!(response.first_candidate_text().is_none());
    }
}
