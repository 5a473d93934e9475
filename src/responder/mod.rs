//! # Mock Responder
//!
//! Produces one canned reply per submitted prompt. Reply text is a pure
//! function of `(model_id, prompt)`: a fixed per-model template with minor
//! cosmetic variation driven by simple predicates on the prompt, and an
//! explicit fallback for unknown model ids. The artificial delay simulates
//! variable inference latency and is deliberately non-deterministic; tests
//! exercise `reply_for` directly and never assert on timing.

use std::time::Duration;

use rand::Rng;

/// Inclusive lower bound of the simulated reply delay.
pub const MIN_REPLY_DELAY_MS: u64 = 1000;
/// Exclusive upper bound of the simulated reply delay.
pub const MAX_REPLY_DELAY_MS: u64 = 2000;

/// Draw a reply delay uniformly from `[1000ms, 2000ms)`.
pub fn reply_delay() -> Duration {
    let ms = rand::thread_rng().gen_range(MIN_REPLY_DELAY_MS..MAX_REPLY_DELAY_MS);
    Duration::from_millis(ms)
}

/// The canned reply for `prompt` as produced by `model_id`.
///
/// Dispatch is a tagged lookup over the known model ids; anything else gets
/// the generic fallback string.
pub fn reply_for(model_id: &str, prompt: &str) -> String {
    match model_id {
        "gpt-4" => format!(
            "I'm GPT-4, and I'll help you with that! {} This is a simulated response \
             showcasing the capabilities of GPT-4.",
            if prompt.contains("code") {
                "Here's a code solution:"
            } else {
                "Let me provide a detailed response:"
            }
        ),
        "gpt-3.5-turbo" => format!(
            "As GPT-3.5 Turbo, I can quickly assist you! {} This demonstrates the fast \
             and efficient nature of GPT-3.5 Turbo.",
            if prompt.contains("question") {
                "Great question!"
            } else {
                "Here's my response:"
            }
        ),
        "claude-3-sonnet" => format!(
            "Hello! I'm Claude 3 Sonnet. {} This response simulates Claude's thoughtful \
             and balanced approach.",
            if prompt.contains("help") {
                "I'd be delighted to help!"
            } else {
                "Thank you for your message."
            }
        ),
        "claude-3-haiku" => format!(
            "Hi! Claude 3 Haiku here - quick and concise! {} Fast response as expected \
             from Haiku.",
            if prompt.len() > 50 {
                "I see you have a detailed question."
            } else {
                "Short and sweet!"
            }
        ),
        "gemini-pro" => format!(
            "Greetings! I'm Gemini Pro from Google. {} This showcases Gemini's \
             analytical capabilities.",
            if prompt.contains("analyze") {
                "Let me analyze this for you:"
            } else {
                "Here's my comprehensive response:"
            }
        ),
        _ => "This is a simulated response from the AI model.".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gpt4_branches_on_code_substring() {
        let plain = reply_for("gpt-4", "hello");
        assert!(plain.contains("Let me provide a detailed response:"));

        let code = reply_for("gpt-4", "write some code for me");
        assert!(code.contains("Here's a code solution:"));
    }

    #[test]
    fn test_haiku_branches_on_prompt_length() {
        let short = reply_for("claude-3-haiku", "hi");
        assert!(short.contains("Short and sweet!"));

        let long = reply_for(
            "claude-3-haiku",
            "this prompt is definitely longer than fifty characters in total",
        );
        assert!(long.contains("I see you have a detailed question."));
    }

    #[test]
    fn test_sonnet_branches_on_help_substring() {
        assert!(reply_for("claude-3-sonnet", "please help me").contains("delighted to help"));
        assert!(reply_for("claude-3-sonnet", "hello").contains("Thank you for your message."));
    }

    #[test]
    fn test_unknown_model_gets_fallback() {
        assert_eq!(
            reply_for("llama-unknown", "anything"),
            "This is a simulated response from the AI model."
        );
    }

    #[test]
    fn test_delay_bounds() {
        // Distribution is random; only the bounds are contractual.
        for _ in 0..100 {
            let d = reply_delay();
            assert!(d >= Duration::from_millis(MIN_REPLY_DELAY_MS));
            assert!(d < Duration::from_millis(MAX_REPLY_DELAY_MS));
        }
    }
}
