//! Prompt templates for the analysis actions.
//!
//! The document itself is attached separately as inline data; these prompts
//! only carry the instruction and the user's input.

use docsage_core::AgentError;
use minijinja::{Environment, context};

/// System instruction sent with every request.
pub const SYSTEM_INSTRUCTION: &str = "You are a careful document analyst. \
Answer only from the attached document. If the document does not contain the \
answer, say so plainly instead of guessing.";

const SUMMARY_TEMPLATE: &str = r#"Summarize the attached document "{{ document_name }}".

Requirements:
- Start with one sentence stating what kind of document it is
- List the key points, obligations and dates as short bullet points
- Keep it under 200 words

Output Markdown only."#;

const ANSWER_TEMPLATE: &str = r#"Answer the following question about the attached document:

{{ question }}

Quote the relevant passage when it helps, and mark each quote with a citation such as [1]."#;

const RISKS_TEMPLATE: &str = r###"Identify the risks in the attached document for the party receiving it.

For each risk provide:
- A short title in bold
- Severity (Low/Medium/High)
- The clause it comes from, quoted, with a citation such as [1]
- A one-line suggestion to mitigate it

Output Markdown only, as a bulleted list under a "## Risks" heading."###;

const DEFINITION_TEMPLATE: &str = r#"Define the term "{{ term }}" as it is used in the attached document.

Give a plain-language definition in two or three sentences, then explain what it means for the reader of this document specifically."#;

/// Renders the prompt for each action.
pub struct PromptLibrary {
    env: Environment<'static>,
}

impl PromptLibrary {
    pub fn new() -> Self {
        let mut env = Environment::new();
        for (name, source) in [
            ("summary", SUMMARY_TEMPLATE),
            ("answer", ANSWER_TEMPLATE),
            ("risks", RISKS_TEMPLATE),
            ("definition", DEFINITION_TEMPLATE),
        ] {
            if let Err(err) = env.add_template(name, source) {
                tracing::error!("Invalid built-in prompt template '{}': {}", name, err);
            }
        }
        Self { env }
    }

    pub fn summary(&self, document_name: &str) -> Result<String, AgentError> {
        self.render("summary", context! { document_name })
    }

    pub fn answer(&self, question: &str) -> Result<String, AgentError> {
        self.render("answer", context! { question })
    }

    pub fn risks(&self) -> Result<String, AgentError> {
        self.render("risks", context! {})
    }

    pub fn definition(&self, term: &str) -> Result<String, AgentError> {
        self.render("definition", context! { term })
    }

    fn render(&self, name: &str, ctx: minijinja::Value) -> Result<String, AgentError> {
        self.env
            .get_template(name)
            .and_then(|template| template.render(ctx))
            .map_err(|err| AgentError::Configuration(format!("prompt '{name}' failed: {err}")))
    }
}

impl Default for PromptLibrary {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_templates_render() {
        let prompts = PromptLibrary::new();
        assert!(prompts.summary("lease.pdf").unwrap().contains("\"lease.pdf\""));
        assert!(
            prompts
                .answer("What is the term length?")
                .unwrap()
                .contains("What is the term length?")
        );
        assert!(prompts.risks().unwrap().contains("## Risks"));
        assert!(prompts.definition("escrow").unwrap().contains("\"escrow\""));
    }

    #[test]
    fn test_user_input_is_not_interpreted() {
        let prompts = PromptLibrary::new();
        let rendered = prompts.answer("{{ term }} and {% raw %}").unwrap();
        assert!(rendered.contains("{{ term }} and {% raw %}"));
    }
}
