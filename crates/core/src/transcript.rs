//! Transcript Model
//!
//! The ordered history of an interview and the structured `Content` shape the
//! dialogue service consumes. Stored turn text always carries its speaker tag so
//! the transcript stays self-describing once flattened into role/text pairs.

use serde::{Deserialize, Serialize};

/// Tag prefixed to every applicant-authored turn.
pub const APPLICANT_TAG: &str = "[applicant] ";
/// Tag prefixed to every interviewer-authored turn.
pub const INTERVIEWER_TAG: &str = "[interviewer] ";

/// Who authored a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    Applicant,
    Interviewer,
}

impl Speaker {
    pub fn tag(self) -> &'static str {
        match self {
            Speaker::Applicant => APPLICANT_TAG,
            Speaker::Interviewer => INTERVIEWER_TAG,
        }
    }

    /// The wire role the dialogue service expects for this speaker.
    pub fn role(self) -> Role {
        match self {
            Speaker::Applicant => Role::User,
            Speaker::Interviewer => Role::Model,
        }
    }
}

/// One speaker's contribution to the transcript, stored with its tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    speaker: Speaker,
    text: String,
}

impl Turn {
    /// Creates an applicant turn, prefixing `[applicant] `.
    pub fn applicant(text: &str) -> Self {
        Self::tagged(Speaker::Applicant, text)
    }

    /// Creates an interviewer turn, prefixing `[interviewer] `.
    pub fn interviewer(text: &str) -> Self {
        Self::tagged(Speaker::Interviewer, text)
    }

    fn tagged(speaker: Speaker, text: &str) -> Self {
        Self {
            speaker,
            text: format!("{}{}", speaker.tag(), text),
        }
    }

    pub fn speaker(&self) -> Speaker {
        self.speaker
    }

    /// The stored, tagged text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Converts the turn into request content. The text is handed over as a
    /// bare part; `Content::normalized` wraps it before anything is sent.
    pub fn to_content(&self) -> Content {
        Content {
            role: self.speaker.role(),
            parts: vec![Part::PlainText(self.text.clone())],
        }
    }
}

/// The append-only history of one session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transcript {
    turns: Vec<Turn>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }

    /// Every turn as request content, in order.
    pub fn to_contents(&self) -> Vec<Content> {
        self.turns.iter().map(Turn::to_content).collect()
    }
}

/// Conversation role as understood by the dialogue service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

/// A single piece of turn content.
///
/// Earlier stages may hand over either a bare string or an object with a `text`
/// field; both deserialize into this union.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Part {
    PlainText(String),
    StructuredText { text: String },
}

impl Part {
    /// Maps either variant onto the structured form.
    pub fn normalized(self) -> Part {
        match self {
            Part::PlainText(text) | Part::StructuredText { text } => Part::StructuredText { text },
        }
    }

    pub fn text(&self) -> &str {
        match self {
            Part::PlainText(text) | Part::StructuredText { text } => text,
        }
    }
}

/// One turn in the shape the dialogue service consumes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Content {
    pub role: Role,
    pub parts: Vec<Part>,
}

impl Content {
    /// Returns the content with every part in structured form.
    pub fn normalized(self) -> Content {
        Content {
            role: self.role,
            parts: self.parts.into_iter().map(Part::normalized).collect(),
        }
    }

    /// Concatenated text of all parts.
    pub fn text(&self) -> String {
        self.parts.iter().map(Part::text).collect()
    }
}

/// Normalizes a whole request history.
pub fn normalize(contents: Vec<Content>) -> Vec<Content> {
    contents.into_iter().map(Content::normalized).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turns_are_tagged_by_speaker() {
        let applicant = Turn::applicant("I have 5 years of experience.");
        let interviewer = Turn::interviewer("What challenges have you faced?");

        assert_eq!(applicant.text(), "[applicant] I have 5 years of experience.");
        assert_eq!(applicant.speaker(), Speaker::Applicant);
        assert_eq!(
            interviewer.text(),
            "[interviewer] What challenges have you faced?"
        );
        assert_eq!(interviewer.speaker(), Speaker::Interviewer);
    }

    #[test]
    fn test_empty_text_still_carries_tag() {
        assert_eq!(Turn::interviewer("").text(), "[interviewer] ");
        assert_eq!(Turn::applicant("").text(), "[applicant] ");
    }

    #[test]
    fn test_turn_to_content_uses_wire_role() {
        let content = Turn::interviewer("Why Rust?").to_content();
        assert_eq!(content.role, Role::Model);
        assert_eq!(
            content.parts,
            vec![Part::PlainText("[interviewer] Why Rust?".to_string())]
        );
        assert_eq!(Turn::applicant("x").to_content().role, Role::User);
    }

    #[test]
    fn test_normalize_wraps_bare_strings_and_keeps_structured_parts() {
        let raw = r#"[
            {"role": "user", "parts": ["[applicant] hello", {"text": "[applicant] again"}]},
            {"role": "model", "parts": [{"text": "[interviewer] Tell me about yourself."}]}
        ]"#;
        let contents: Vec<Content> = serde_json::from_str(raw).unwrap();
        assert_eq!(
            contents[0].parts[0],
            Part::PlainText("[applicant] hello".to_string())
        );

        let normalized = normalize(contents);
        for content in &normalized {
            for part in &content.parts {
                assert!(matches!(part, Part::StructuredText { .. }));
            }
        }
        assert_eq!(normalized[0].text(), "[applicant] hello[applicant] again");

        let json = serde_json::to_value(&normalized[1]).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "role": "model",
                "parts": [{"text": "[interviewer] Tell me about yourself."}]
            })
        );
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let mut transcript = Transcript::new();
        transcript.push(Turn::applicant("context"));
        transcript.push(Turn::interviewer("Tell me about yourself."));
        transcript.push(Turn::applicant(""));

        let once = normalize(transcript.to_contents());
        let twice = normalize(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_transcript_preserves_order() {
        let mut transcript = Transcript::new();
        assert!(transcript.is_empty());
        transcript.push(Turn::applicant("a"));
        transcript.push(Turn::interviewer("b"));

        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript.turns()[0].text(), "[applicant] a");
        assert_eq!(transcript.last().map(Turn::text), Some("[interviewer] b"));
    }
}
