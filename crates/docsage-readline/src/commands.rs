//! Parsing of REPL input lines.

use std::path::PathBuf;

/// Slash commands offered for completion.
pub const COMMANDS: &[&str] = &[
    "/open", "/docs", "/select", "/summary", "/risks", "/define", "/cite", "/state", "/help",
];

/// A parsed REPL line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Upload a file and open it.
    Open(PathBuf),
    Docs,
    Select(u64),
    Summary,
    Risks,
    /// Define a term; the term may be blank, the session rejects that.
    Define(String),
    Cite,
    State,
    Help,
    Quit,
    /// Plain text is a question about the selected document.
    Ask(String),
    /// A slash command that is unknown or missing its argument.
    Invalid(String),
}

/// Parses a line; returns `None` for blank input.
pub fn parse(line: &str) -> Option<Command> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    if line == "quit" || line == "exit" {
        return Some(Command::Quit);
    }
    if !line.starts_with('/') {
        return Some(Command::Ask(line.to_string()));
    }

    let (name, arg) = match line.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (line, ""),
    };

    let command = match name {
        "/open" if !arg.is_empty() => Command::Open(PathBuf::from(arg)),
        "/open" => Command::Invalid("usage: /open <path>".to_string()),
        "/docs" => Command::Docs,
        "/select" => match arg.parse::<u64>() {
            Ok(id) => Command::Select(id),
            Err(_) => Command::Invalid("usage: /select <document id>".to_string()),
        },
        "/summary" => Command::Summary,
        "/risks" => Command::Risks,
        "/define" => Command::Define(arg.to_string()),
        "/cite" => Command::Cite,
        "/state" => Command::State,
        "/help" => Command::Help,
        other => Command::Invalid(format!("Unknown command: {other}")),
    };
    Some(command)
}

pub const HELP: &str = "\
/open <path>     upload a .txt or .pdf file and summarize it
/docs            list uploaded documents
/select <id>     switch to another document (clears the conversation)
/summary         summarize the selected document
/risks           analyse risks in the selected document
/define <term>   explain a term as used in the document
/cite            highlight the source document
/state           print the session state as JSON
quit             exit
anything else    ask a question about the selected document";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_a_question() {
        assert_eq!(
            parse("  What is the term length? "),
            Some(Command::Ask("What is the term length?".to_string()))
        );
        assert_eq!(parse("   "), None);
    }

    #[test]
    fn test_commands_with_arguments() {
        assert_eq!(
            parse("/open ~/docs/lease agreement.pdf"),
            Some(Command::Open(PathBuf::from("~/docs/lease agreement.pdf")))
        );
        assert_eq!(parse("/select 3"), Some(Command::Select(3)));
        assert_eq!(
            parse("/define  force majeure"),
            Some(Command::Define("force majeure".to_string()))
        );
        assert_eq!(parse("/define"), Some(Command::Define(String::new())));
    }

    #[test]
    fn test_invalid_commands() {
        assert!(matches!(parse("/select abc"), Some(Command::Invalid(_))));
        assert!(matches!(parse("/open"), Some(Command::Invalid(_))));
        assert!(matches!(parse("/plan"), Some(Command::Invalid(_))));
        assert_eq!(parse("quit"), Some(Command::Quit));
    }
}
