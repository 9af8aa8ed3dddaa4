use super::kind::ActionKind;
use crate::error::{DocsageError, Result};

/// An action as requested by the user, before it runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionRequest {
    Summary,
    Answer { question: String },
    RiskAnalysis,
    Definition { term: String },
}

impl ActionRequest {
    /// Builds a question request, trimming the input.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if nothing is left after trimming.
    pub fn answer(question: &str) -> Result<Self> {
        let question = question.trim();
        if question.is_empty() {
            return Err(DocsageError::invalid_input("question must not be empty"));
        }
        Ok(Self::Answer {
            question: question.to_string(),
        })
    }

    /// Builds a definition request, trimming the term.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if nothing is left after trimming.
    pub fn definition(term: &str) -> Result<Self> {
        let term = term.trim();
        if term.is_empty() {
            return Err(DocsageError::invalid_input("term must not be empty"));
        }
        Ok(Self::Definition {
            term: term.to_string(),
        })
    }

    pub fn kind(&self) -> ActionKind {
        match self {
            Self::Summary => ActionKind::Summary,
            Self::Answer { .. } => ActionKind::Qna,
            Self::RiskAnalysis => ActionKind::Risks,
            Self::Definition { .. } => ActionKind::Jargon,
        }
    }

    /// The user-supplied text, for `qna` and `jargon`.
    pub fn input(&self) -> Option<&str> {
        match self {
            Self::Answer { question } => Some(question),
            Self::Definition { term } => Some(term),
            Self::Summary | Self::RiskAnalysis => None,
        }
    }

    /// The `user` entry appended before the collaborator is called, if any.
    pub fn user_message(&self) -> Option<String> {
        match self {
            Self::Answer { question } => Some(question.clone()),
            Self::Definition { term } => Some(format!("Define: \"{term}\"")),
            Self::Summary | Self::RiskAnalysis => None,
        }
    }

    /// Frames a successful collaborator result as an `ai` entry.
    pub fn success_text(&self, document_name: &str, output: &str) -> String {
        match self {
            Self::Summary => format!("### Summary of {document_name}\n\n{output}"),
            Self::Answer { .. } | Self::RiskAnalysis | Self::Definition { .. } => {
                output.to_string()
            }
        }
    }

    /// Fixed user-facing text for a failed collaborator call.
    pub fn apology_text(&self, document_name: &str) -> String {
        match self {
            Self::Summary => format!(
                "Sorry, I couldn't generate a summary for \"{document_name}\". Please try again."
            ),
            Self::Answer { .. } => {
                "Sorry, I couldn't answer your question. Please try again.".to_string()
            }
            Self::RiskAnalysis => {
                "Sorry, I couldn't complete the risk analysis. Please try again.".to_string()
            }
            Self::Definition { term } => {
                format!("Sorry, I couldn't define \"{term}\". Please try again.")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_definition_trims_and_rejects_blank() {
        assert!(ActionRequest::definition("").unwrap_err().is_invalid_input());
        assert!(ActionRequest::definition("   ").unwrap_err().is_invalid_input());

        let request = ActionRequest::definition("  force majeure ").unwrap();
        assert_eq!(request.input(), Some("force majeure"));
        assert_eq!(
            request.user_message().as_deref(),
            Some("Define: \"force majeure\"")
        );
    }

    #[test]
    fn test_answer_rejects_blank_question() {
        assert!(ActionRequest::answer(" \n\t").unwrap_err().is_invalid_input());
        assert_eq!(ActionRequest::answer(" Why? ").unwrap().input(), Some("Why?"));
    }

    #[test]
    fn test_only_qna_and_jargon_prepend_user_message() {
        assert_eq!(ActionRequest::Summary.user_message(), None);
        assert_eq!(ActionRequest::RiskAnalysis.user_message(), None);
    }

    #[test]
    fn test_summary_framing_names_document() {
        let text = ActionRequest::Summary.success_text("lease.pdf", "Tenant pays rent monthly.");
        assert!(text.contains("lease.pdf"));
        assert!(text.contains("Tenant pays rent monthly."));

        let apology = ActionRequest::Summary.apology_text("lease.pdf");
        assert!(apology.contains("lease.pdf"));
    }

    #[test]
    fn test_risk_output_is_verbatim() {
        let markup = "## Risks\n- **Late fees** [1]";
        assert_eq!(ActionRequest::RiskAnalysis.success_text("x", markup), markup);
    }

    #[test]
    fn test_definition_apology_names_term() {
        let request = ActionRequest::definition("escrow").unwrap();
        assert!(request.apology_text("lease.pdf").contains("\"escrow\""));
    }
}
