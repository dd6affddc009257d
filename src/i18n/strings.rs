//! Hardcoded strings used when no bundle can be loaded at all.
//!
//! These keep requests answerable when even the default language's files are
//! missing or malformed.

/// Last-resort strings for degraded mode
#[derive(Debug, Clone)]
pub struct DegradedStrings {
    pub system_prompt: &'static str,
    pub code_analysis_prompt: &'static str,
    pub code_analysis_instruction: &'static str,
    pub signature: &'static str,
    pub motivational_text: &'static str,
    pub fallback_response: &'static str,
}

pub const DEGRADED_STRINGS: DegradedStrings = DegradedStrings {
    system_prompt: "System prompt not available",
    code_analysis_prompt: "Code analysis prompt not available",
    code_analysis_instruction: "Please analyze this code:\n\n",
    signature: "Giovanna 👩‍💻",
    motivational_text: "Keep learning and coding!",
    fallback_response: "Service temporarily unavailable.",
};
