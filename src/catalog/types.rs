//! Wire types for the catalog protocol.
//!
//! Both catalog endpoints return a JSON envelope `{success, data}` where
//! `data` is a fixed array. Field names on the wire are camelCase.

use serde::{Deserialize, Serialize};

/// The `{success, data}` envelope wrapping every catalog response.
///
/// No error variant is currently produced by either endpoint, but consumers
/// must still check `success` so a future error envelope stays compatible.
#[derive(Serialize, Deserialize, Debug)]
pub struct Envelope<T> {
    pub success: bool,
    pub data: T,
}

/// A selectable model, as served by the model catalog.
///
/// Immutable reference data: the client never creates or mutates these.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ModelDescriptor {
    pub id: String,
    pub name: String,
    pub provider: String,
    pub description: String,
    pub max_tokens: u32,
    pub supported_features: Vec<String>,
}

/// Parameter preset carried by a prompt template.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GenerationDefaults {
    pub temperature: f32,
    pub max_tokens: u32,
    pub top_p: f32,
}

/// A reusable prompt template, as served by the template catalog.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PromptTemplate {
    pub id: String,
    pub name: String,
    pub category: String,
    pub description: String,
    pub prompt: String,
    pub parameters: GenerationDefaults,
    pub tags: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_envelope_deserializes_camel_case() {
        let json = r#"{
            "success": true,
            "data": [{
                "id": "gpt-4",
                "name": "GPT-4",
                "provider": "OpenAI",
                "description": "Most capable GPT model",
                "maxTokens": 8192,
                "supportedFeatures": ["chat", "code"]
            }]
        }"#;
        let envelope: Envelope<Vec<ModelDescriptor>> = serde_json::from_str(json).unwrap();
        assert!(envelope.success);
        assert_eq!(envelope.data.len(), 1);
        assert_eq!(envelope.data[0].id, "gpt-4");
        assert_eq!(envelope.data[0].max_tokens, 8192);
        assert_eq!(envelope.data[0].supported_features, vec!["chat", "code"]);
    }

    #[test]
    fn test_template_envelope_deserializes_nested_parameters() {
        let json = r#"{
            "success": true,
            "data": [{
                "id": "code-reviewer",
                "name": "Code Reviewer",
                "category": "Development",
                "description": "Review code",
                "prompt": "You are an experienced code reviewer.",
                "parameters": {"temperature": 0.3, "maxTokens": 1500, "topP": 0.8},
                "tags": ["code", "review"]
            }]
        }"#;
        let envelope: Envelope<Vec<PromptTemplate>> = serde_json::from_str(json).unwrap();
        let template = &envelope.data[0];
        assert_eq!(template.parameters.max_tokens, 1500);
        assert_eq!(template.parameters.temperature, 0.3);
        assert_eq!(template.category, "Development");
    }

    #[test]
    fn test_envelope_round_trips_success_flag() {
        let envelope = Envelope {
            success: false,
            data: Vec::<ModelDescriptor>::new(),
        };
        let json = serde_json::to_string(&envelope).unwrap();
        let back: Envelope<Vec<ModelDescriptor>> = serde_json::from_str(&json).unwrap();
        assert!(!back.success);
        assert!(back.data.is_empty());
    }
}
