//! # Built-in Catalog
//!
//! The default catalog source: fixed model and template lists compiled into
//! the binary, served after a short artificial delay so the UI's loading
//! states stay observable. This provider never fails.

use std::time::Duration;

use async_trait::async_trait;

use super::provider::{CatalogError, CatalogProvider};
use super::types::{GenerationDefaults, ModelDescriptor, PromptTemplate};

/// Simulated latency for the model catalog.
pub const MODELS_DELAY: Duration = Duration::from_millis(500);
/// Simulated latency for the template catalog.
pub const TEMPLATES_DELAY: Duration = Duration::from_millis(300);

pub struct BuiltinCatalogProvider {
    /// When false, fetches resolve immediately (used by tests).
    simulate_latency: bool,
}

impl Default for BuiltinCatalogProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl BuiltinCatalogProvider {
    pub fn new() -> Self {
        Self {
            simulate_latency: true,
        }
    }

    /// A provider that skips the artificial delay.
    pub fn instant() -> Self {
        Self {
            simulate_latency: false,
        }
    }
}

#[async_trait]
impl CatalogProvider for BuiltinCatalogProvider {
    fn name(&self) -> &str {
        "builtin"
    }

    async fn fetch_models(&self) -> Result<Vec<ModelDescriptor>, CatalogError> {
        if self.simulate_latency {
            tokio::time::sleep(MODELS_DELAY).await;
        }
        Ok(builtin_models())
    }

    async fn fetch_templates(&self) -> Result<Vec<PromptTemplate>, CatalogError> {
        if self.simulate_latency {
            tokio::time::sleep(TEMPLATES_DELAY).await;
        }
        Ok(builtin_templates())
    }
}

fn model(
    id: &str,
    name: &str,
    provider: &str,
    description: &str,
    max_tokens: u32,
    features: &[&str],
) -> ModelDescriptor {
    ModelDescriptor {
        id: id.to_string(),
        name: name.to_string(),
        provider: provider.to_string(),
        description: description.to_string(),
        max_tokens,
        supported_features: features.iter().map(|f| f.to_string()).collect(),
    }
}

/// The fixed model list.
pub fn builtin_models() -> Vec<ModelDescriptor> {
    vec![
        model(
            "gpt-4",
            "GPT-4",
            "OpenAI",
            "Most capable GPT model, great for complex tasks",
            8192,
            &["chat", "completion", "code"],
        ),
        model(
            "gpt-3.5-turbo",
            "GPT-3.5 Turbo",
            "OpenAI",
            "Fast and efficient model for most tasks",
            4096,
            &["chat", "completion"],
        ),
        model(
            "claude-3-sonnet",
            "Claude 3 Sonnet",
            "Anthropic",
            "Balanced model with strong reasoning capabilities",
            200_000,
            &["chat", "analysis", "code"],
        ),
        model(
            "claude-3-haiku",
            "Claude 3 Haiku",
            "Anthropic",
            "Fastest Claude model for simple tasks",
            200_000,
            &["chat", "completion"],
        ),
        model(
            "gemini-pro",
            "Gemini Pro",
            "Google",
            "Google's most capable AI model",
            32_768,
            &["chat", "multimodal", "code"],
        ),
    ]
}

fn template(
    id: &str,
    name: &str,
    category: &str,
    description: &str,
    prompt: &str,
    parameters: GenerationDefaults,
    tags: &[&str],
) -> PromptTemplate {
    PromptTemplate {
        id: id.to_string(),
        name: name.to_string(),
        category: category.to_string(),
        description: description.to_string(),
        prompt: prompt.to_string(),
        parameters,
        tags: tags.iter().map(|t| t.to_string()).collect(),
    }
}

/// The fixed template list.
pub fn builtin_templates() -> Vec<PromptTemplate> {
    vec![
        template(
            "creative-writing",
            "Creative Writing Assistant",
            "Writing",
            "Help with creative writing and storytelling",
            "You are a creative writing assistant. Help the user craft compelling stories, \
             develop characters, and improve their writing style. Be encouraging and provide \
             specific, actionable feedback.",
            GenerationDefaults {
                temperature: 0.8,
                max_tokens: 1000,
                top_p: 0.9,
            },
            &["writing", "creative", "storytelling"],
        ),
        template(
            "code-reviewer",
            "Code Reviewer",
            "Development",
            "Review code for best practices and improvements",
            "You are an experienced code reviewer. Analyze the provided code for:\n\
             - Code quality and readability\n\
             - Performance optimization opportunities\n\
             - Security vulnerabilities\n\
             - Best practices adherence\n\
             - Potential bugs or edge cases\n\n\
             Provide constructive feedback with specific suggestions for improvement.",
            GenerationDefaults {
                temperature: 0.3,
                max_tokens: 1500,
                top_p: 0.8,
            },
            &["code", "review", "development", "best-practices"],
        ),
        template(
            "data-analyst",
            "Data Analysis Helper",
            "Analytics",
            "Assist with data analysis and interpretation",
            "You are a data analysis expert. Help the user understand their data by:\n\
             - Identifying patterns and trends\n\
             - Suggesting appropriate visualizations\n\
             - Explaining statistical concepts\n\
             - Recommending analysis approaches\n\
             - Interpreting results in business context",
            GenerationDefaults {
                temperature: 0.4,
                max_tokens: 1200,
                top_p: 0.85,
            },
            &["data", "analysis", "statistics", "business"],
        ),
        template(
            "teacher",
            "Patient Teacher",
            "Education",
            "Explain complex topics in simple terms",
            "You are a patient and knowledgeable teacher. Break down complex topics into \
             easy-to-understand explanations. Use analogies, examples, and step-by-step \
             reasoning. Encourage questions and provide additional context when needed.",
            GenerationDefaults {
                temperature: 0.6,
                max_tokens: 800,
                top_p: 0.9,
            },
            &["education", "teaching", "explanation", "learning"],
        ),
        template(
            "brainstorm-partner",
            "Brainstorming Partner",
            "Creativity",
            "Generate creative ideas and solutions",
            "You are an enthusiastic brainstorming partner. Help generate creative ideas, \
             explore different perspectives, and think outside the box. Ask probing questions \
             to spark new thinking and build upon the user's ideas.",
            GenerationDefaults {
                temperature: 0.9,
                max_tokens: 600,
                top_p: 0.95,
            },
            &["creativity", "brainstorming", "ideas", "innovation"],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_builtin_models_are_served() {
        let provider = BuiltinCatalogProvider::instant();
        let models = provider.fetch_models().await.unwrap();
        assert_eq!(models.len(), 5);
        assert_eq!(models[0].id, "gpt-4");
        assert_eq!(models[4].provider, "Google");
    }

    #[tokio::test]
    async fn test_builtin_templates_carry_parameter_presets() {
        let provider = BuiltinCatalogProvider::instant();
        let templates = provider.fetch_templates().await.unwrap();
        assert_eq!(templates.len(), 5);
        let reviewer = templates
            .iter()
            .find(|t| t.id == "code-reviewer")
            .expect("code-reviewer template present");
        assert_eq!(reviewer.parameters.temperature, 0.3);
        assert_eq!(reviewer.parameters.max_tokens, 1500);
    }

    #[test]
    fn test_model_ids_are_unique() {
        let models = builtin_models();
        let mut ids: Vec<&str> = models.iter().map(|m| m.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), models.len());
    }
}
