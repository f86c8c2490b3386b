//! Prompt templates for the remote chat model

use std::collections::HashMap;

use crate::kb::Language;

/// Display name of the assistant, also returned by the chat endpoint
pub const ASSISTANT_NAME: &str = "KhetGuru";

const SYSTEM_TEMPLATE: &str = "You are {{assistant}}, a concise helpful agriculture assistant for \
Indian farmers. Keep answers short and actionable. Reply in {{language}}.";

/// Template for generating prompts
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    template: String,
    variables: Vec<String>,
}

impl PromptTemplate {
    /// Create a new prompt template
    pub fn new(template: impl Into<String>) -> Self {
        let template = template.into();
        let variables = extract_variables(&template);
        Self {
            template,
            variables,
        }
    }

    /// Fill in the template; unknown variables are left in place
    ///
    /// `{{name}}` and `{{ name }}` are the same placeholder.
    #[must_use]
    pub fn render(&self, values: &HashMap<&str, String>) -> String {
        let mut result = String::with_capacity(self.template.len());
        let mut rest = self.template.as_str();

        while let Some(start) = rest.find("{{") {
            let after = &rest[start + 2..];
            let Some(end) = after.find("}}") else {
                break;
            };
            result.push_str(&rest[..start]);
            match values.get(after[..end].trim()) {
                Some(value) => result.push_str(value),
                None => result.push_str(&rest[start..start + 2 + end + 2]),
            }
            rest = &after[end + 2..];
        }

        result.push_str(rest);
        result
    }

    #[must_use]
    pub fn variables(&self) -> &[String] {
        &self.variables
    }
}

/// Extract `{{name}}` variable names in order of first appearance
fn extract_variables(template: &str) -> Vec<String> {
    let mut variables = Vec::new();
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        let after = &rest[start + 2..];
        let Some(end) = after.find("}}") else {
            break;
        };
        let name = after[..end].trim();
        if !name.is_empty() && !variables.iter().any(|v| v == name) {
            variables.push(name.to_string());
        }
        rest = &after[end + 2..];
    }

    variables
}

/// System prompt for a conversation in `language`
pub fn system_prompt(language: Language) -> String {
    let mut values = HashMap::new();
    values.insert("assistant", ASSISTANT_NAME.to_string());
    values.insert("language", language.to_string());
    PromptTemplate::new(SYSTEM_TEMPLATE).render(&values)
}
