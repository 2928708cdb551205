//! Prompt templates — turn a content-type tag plus request fields into an
//! instruction prompt.
//!
//! Every template asks for a heading line (`Subject:` or `Title:`), a `---`
//! delimiter, and then the body, so callers can split the output if they
//! want to. Scribe itself relays it verbatim.

use serde_json::{Map, Value};

use crate::types::{field_text, ContentType};

/// Build the instruction prompt for `content_type`.
///
/// Unrecognized content types use the email template.
pub fn build_prompt(content_type: &str, fields: &Map<String, Value>) -> String {
    build_prompt_for(ContentType::resolve(content_type), fields)
}

/// Build the instruction prompt for an already-parsed content type.
pub fn build_prompt_for(kind: ContentType, fields: &Map<String, Value>) -> String {
    let f = |key: &str| field_text(fields, key);
    let persona = kind.persona();

    match kind {
        ContentType::Email => format!(
            "[INST]\n\
             {persona} Your task is to generate a professional email.\n\
             Generate a subject line and an email body based on these requirements:\n\
             - **Goal:** {goal}\n\
             - **Recipient:** {recipient}\n\
             - **Tone:** {tone}\n\
             - **Key Points to Include:** {points}\n\
             \n\
             **Output Format:**\n\
             Subject: [Your generated subject line]\n\
             ---\n\
             Body:\n\
             [Your generated email body]\n\
             [/INST]\n",
            goal = f("goal"),
            recipient = f("recipient"),
            tone = f("tone"),
            points = f("points"),
        ),
        ContentType::Essay => format!(
            "[INST]\n\
             {persona} Your task is to write a well-structured essay.\n\
             Generate a title and an essay based on these requirements:\n\
             - **Topic:** {topic}\n\
             - **Tone:** {tone}\n\
             - **Target Length (words):** {length}\n\
             - **Key Points to Cover:** {points}\n\
             \n\
             **Output Format:**\n\
             Title: [Your generated essay title]\n\
             ---\n\
             Essay:\n\
             [Your generated essay]\n\
             [/INST]\n",
            topic = f("topic"),
            tone = f("tone"),
            length = f("length_words"),
            points = f("points"),
        ),
        ContentType::Story => format!(
            "[INST]\n\
             {persona} Your task is to write an engaging short story.\n\
             Generate a title and a story based on these requirements:\n\
             - **Genre:** {genre}\n\
             - **Setting:** {setting}\n\
             - **Characters:** {characters}\n\
             - **Tone:** {tone}\n\
             - **Target Length (words):** {length}\n\
             - **Plot Points to Include:** {points}\n\
             \n\
             **Output Format:**\n\
             Title: [Your generated story title]\n\
             ---\n\
             Story:\n\
             [Your generated story]\n\
             [/INST]\n",
            genre = f("genre"),
            setting = f("setting"),
            characters = f("characters"),
            tone = f("tone"),
            length = f("length_words"),
            points = f("points"),
        ),
        ContentType::Speech => format!(
            "[INST]\n\
             {persona} Your task is to write a speech ready to be delivered aloud.\n\
             Generate a title and a speech based on these requirements:\n\
             - **Occasion:** {occasion}\n\
             - **Audience:** {audience}\n\
             - **Tone:** {tone}\n\
             - **Duration (minutes):** {duration}\n\
             - **Key Messages:** {points}\n\
             \n\
             **Output Format:**\n\
             Title: [Your generated speech title]\n\
             ---\n\
             Speech:\n\
             [Your generated speech]\n\
             [/INST]\n",
            occasion = f("occasion"),
            audience = f("audience"),
            tone = f("tone"),
            duration = f("duration_minutes"),
            points = f("points"),
        ),
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_email_prompt_contains_fields() {
        let f = fields(json!({
            "goal": "  Ask for a meeting ",
            "recipient": "Dr. Smith",
            "tone": "formal",
            "points": "availability next week"
        }));
        let prompt = build_prompt("email", &f);

        assert!(prompt.starts_with("[INST]\n"));
        assert!(prompt.contains("- **Goal:** Ask for a meeting\n"));
        assert!(prompt.contains("- **Recipient:** Dr. Smith\n"));
        assert!(prompt.contains("- **Tone:** formal\n"));
        assert!(prompt.contains("availability next week"));
        assert!(prompt.contains("Subject: [Your generated subject line]\n---\nBody:"));
        assert!(prompt.trim_end().ends_with("[/INST]"));
    }

    #[test]
    fn test_every_type_includes_every_field() {
        for kind in ContentType::ALL {
            let mut map = Map::new();
            for key in kind.fields() {
                map.insert(key.to_string(), json!(format!("  value-of-{key}  ")));
            }
            let prompt = build_prompt(kind.as_str(), &map);
            for key in kind.fields() {
                let expected = format!("value-of-{key}");
                assert!(
                    prompt.contains(&expected),
                    "{kind} prompt missing {expected}"
                );
                assert!(!prompt.contains(&format!("  {expected}")));
            }
            assert!(prompt.contains(kind.persona()));
            assert!(prompt.contains("\n---\n"));
        }
    }

    #[test]
    fn test_missing_fields_become_empty() {
        for kind in ContentType::ALL {
            let prompt = build_prompt(kind.as_str(), &Map::new());
            assert!(prompt.contains("- **Tone:** \n"));
            assert!(!prompt.contains("null"));
        }
    }

    #[test]
    fn test_numeric_fields_rendered() {
        let f = fields(json!({ "topic": "climate policy", "length_words": 400 }));
        let prompt = build_prompt("essay", &f);
        assert!(prompt.contains("- **Target Length (words):** 400\n"));

        let f = fields(json!({ "occasion": "graduation", "duration_minutes": 5 }));
        let prompt = build_prompt("speech", &f);
        assert!(prompt.contains("- **Duration (minutes):** 5\n"));
    }

    #[test]
    fn test_type_is_case_insensitive() {
        let f = fields(json!({ "genre": "noir", "setting": "Lisbon" }));
        assert_eq!(build_prompt("Story", &f), build_prompt("story", &f));
        assert!(build_prompt("STORY", &f).contains("Story:\n"));
    }

    #[test]
    fn test_unknown_type_falls_back_to_email() {
        let f = fields(json!({
            "goal": "follow up",
            "recipient": "team",
            "topic": "ignored"
        }));
        assert_eq!(build_prompt("limerick", &f), build_prompt("email", &f));
        assert_eq!(build_prompt("", &f), build_prompt("email", &f));
    }

    #[test]
    fn test_deterministic() {
        let f = fields(json!({ "occasion": "wedding", "audience": "guests" }));
        assert_eq!(build_prompt("speech", &f), build_prompt("speech", &f));
    }
}
