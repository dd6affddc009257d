//! Translation bundle: the complete translated content for one language.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Prompt strings read from `system.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemPrompts {
    /// System prompt for the chat assistant
    pub chatbot_prompt: String,

    /// System prompt for code feedback requests
    pub code_analysis_prompt: String,

    /// Instruction prefixed to the submitted source code
    pub code_analysis_instruction: String,

    /// Signature appended to assistant replies
    pub signature: String,
}

/// Motivational texts read from `motivational.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MotivationalTexts {
    pub texts: Vec<String>,
}

/// Nested message mapping read from `messages.json`.
///
/// Every leaf must be a string; any other JSON type fails deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageTree {
    Text(String),
    Map(BTreeMap<String, MessageTree>),
}

impl MessageTree {
    /// Walk a dot-separated key path (`"errors.invalidMessage"`).
    ///
    /// Returns `None` as soon as a segment is missing or the current node is
    /// a string that cannot be descended into.
    pub fn lookup(&self, key_path: &str) -> Option<&MessageTree> {
        self.lookup_segments(key_path.split('.'))
    }

    /// Walk an explicit list of segments. Segments may contain dots.
    pub fn lookup_segments<'a, I>(&self, segments: I) -> Option<&MessageTree>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut node = self;
        for segment in segments {
            node = match node {
                MessageTree::Map(children) => children.get(segment)?,
                MessageTree::Text(_) => return None,
            };
        }
        Some(node)
    }

    /// The string at this node, if it is a leaf.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            MessageTree::Text(text) => Some(text),
            MessageTree::Map(_) => None,
        }
    }
}

/// Immutable translated content for one language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationBundle {
    pub system: SystemPrompts,
    pub messages: MessageTree,
    pub motivational: MotivationalTexts,
}

impl TranslationBundle {
    /// Topic-keyed fallback text under the reserved `fallback` map.
    pub fn fallback_text(&self, topic: &str) -> Option<&str> {
        self.messages
            .lookup_segments(["fallback", topic])
            .and_then(MessageTree::as_text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_messages() -> MessageTree {
        serde_json::from_str(
            r#"{
                "errors": { "invalidMessage": "Mensagem inválida", "nested": { "deep": "fundo" } },
                "greeting": "Olá",
                "fallback": { "html": "HTML...", "apiConnectionError": "Sem conexão" }
            }"#,
        )
        .expect("Should deserialize")
    }

    #[test]
    fn test_lookup_nested_leaf() {
        let messages = sample_messages();
        assert_eq!(
            messages.lookup("errors.invalidMessage").and_then(MessageTree::as_text),
            Some("Mensagem inválida")
        );
        assert_eq!(
            messages.lookup("errors.nested.deep").and_then(MessageTree::as_text),
            Some("fundo")
        );
    }

    #[test]
    fn test_lookup_missing_segment() {
        let messages = sample_messages();
        assert!(messages.lookup("errors.unknown").is_none());
        assert!(messages.lookup("missing.path").is_none());
    }

    #[test]
    fn test_lookup_through_leaf_fails() {
        let messages = sample_messages();
        assert!(messages.lookup("greeting.more").is_none());
    }

    #[test]
    fn test_lookup_intermediate_node_is_not_text() {
        let messages = sample_messages();
        let node = messages.lookup("errors").expect("Should exist");
        assert!(node.as_text().is_none());
    }

    #[test]
    fn test_non_string_leaf_is_rejected() {
        let result: Result<MessageTree, _> = serde_json::from_str(r#"{ "count": 3 }"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_system_prompts_camel_case() {
        let system: SystemPrompts = serde_json::from_str(
            r#"{
                "chatbotPrompt": "a",
                "codeAnalysisPrompt": "b",
                "codeAnalysisInstruction": "c",
                "signature": "d"
            }"#,
        )
        .expect("Should deserialize");
        assert_eq!(system.code_analysis_instruction, "c");
        assert_eq!(system.signature, "d");
    }

    #[test]
    fn test_fallback_text() {
        let bundle = TranslationBundle {
            system: SystemPrompts {
                chatbot_prompt: String::new(),
                code_analysis_prompt: String::new(),
                code_analysis_instruction: String::new(),
                signature: String::new(),
            },
            messages: sample_messages(),
            motivational: MotivationalTexts { texts: vec![] },
        };
        assert_eq!(bundle.fallback_text("html"), Some("HTML..."));
        assert_eq!(bundle.fallback_text("css"), None);
    }
}
