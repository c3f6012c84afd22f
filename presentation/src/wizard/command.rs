//! Wizard REPL commands
//!
//! One line of user input maps to one [`WizardCommand`]. An empty line is
//! shorthand for `next`.

use ekyc_domain::{DocumentType, FieldId};
use std::path::PathBuf;
use thiserror::Error;

/// A parsed REPL command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardCommand {
    /// Set a text field; an empty value clears it
    Set { field: FieldId, value: String },
    /// Attach a file to a document slot
    Attach { document: DocumentType, path: PathBuf },
    /// Empty a document slot
    Remove(DocumentType),
    Next,
    Back,
    Submit,
    /// Redraw the current step
    Show,
    /// Show extraction panels for all document slots
    Status,
    /// Discard the saved draft and start over
    Reset,
    Help,
    Quit,
}

/// Errors from parsing a command line
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("Unknown command: {0} (type 'help' for a list)")]
    UnknownCommand(String),

    #[error("Usage: {0}")]
    Usage(&'static str),

    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("Unknown document: {0} (expected pan, aadhaar or voterid)")]
    UnknownDocument(String),

    #[error("{0} is a document; use 'attach {1} <path>' instead")]
    DocumentField(FieldId, DocumentType),
}

const SET_USAGE: &str = "set <field> <value>";
const ATTACH_USAGE: &str = "attach <pan|aadhaar|voterid> <path>";
const REMOVE_USAGE: &str = "remove <pan|aadhaar|voterid>";

impl WizardCommand {
    /// Parse one line of input
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(WizardCommand::Next);
        }

        let (command, rest) = match line.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim()),
            None => (line, ""),
        };

        match command.to_lowercase().as_str() {
            "set" => Self::parse_set(rest),
            "attach" | "upload" => Self::parse_attach(rest),
            "remove" | "rm" => {
                if rest.is_empty() {
                    return Err(CommandError::Usage(REMOVE_USAGE));
                }
                Ok(WizardCommand::Remove(parse_document(rest)?))
            }
            "next" | "n" => Ok(WizardCommand::Next),
            "back" | "b" | "prev" | "previous" => Ok(WizardCommand::Back),
            "submit" => Ok(WizardCommand::Submit),
            "show" | "s" => Ok(WizardCommand::Show),
            "status" => Ok(WizardCommand::Status),
            "reset" => Ok(WizardCommand::Reset),
            "help" | "h" | "?" => Ok(WizardCommand::Help),
            "quit" | "exit" | "q" => Ok(WizardCommand::Quit),
            other => Err(CommandError::UnknownCommand(other.to_string())),
        }
    }

    fn parse_set(rest: &str) -> Result<Self, CommandError> {
        if rest.is_empty() {
            return Err(CommandError::Usage(SET_USAGE));
        }
        let (name, value) = match rest.split_once(char::is_whitespace) {
            Some((name, value)) => (name, value.trim()),
            None => (rest, ""),
        };

        let field: FieldId = name
            .parse()
            .map_err(|_| CommandError::UnknownField(name.to_string()))?;
        if let FieldId::Document(document) = field {
            return Err(CommandError::DocumentField(field, document));
        }

        Ok(WizardCommand::Set {
            field,
            value: value.to_string(),
        })
    }

    fn parse_attach(rest: &str) -> Result<Self, CommandError> {
        let Some((name, path)) = rest.split_once(char::is_whitespace) else {
            return Err(CommandError::Usage(ATTACH_USAGE));
        };
        let path = path.trim().trim_matches(|c| c == '"' || c == '\'');
        if path.is_empty() {
            return Err(CommandError::Usage(ATTACH_USAGE));
        }

        Ok(WizardCommand::Attach {
            document: parse_document(name)?,
            path: PathBuf::from(path),
        })
    }
}

/// Accept either a document name or its slot id (`panFile`, `aadharFile`, ...)
fn parse_document(name: &str) -> Result<DocumentType, CommandError> {
    if let Ok(document) = name.parse::<DocumentType>() {
        return Ok(document);
    }
    match name.parse::<FieldId>() {
        Ok(FieldId::Document(document)) => Ok(document),
        _ => Err(CommandError::UnknownDocument(name.to_string())),
    }
}

/// Command reference printed by `help`
pub fn help_text() -> &'static str {
    r#"Commands:
  set <field> <value>        Fill in a field (empty value clears it)
  attach <document> <path>   Attach a document image (pan, aadhaar, voterid)
  remove <document>          Remove an attached document
  next | <enter>             Save this step and continue
  back                       Go to the previous step
  submit                     Verify your details (review step only)
  show                       Show the current step again
  status                     Show document extraction results
  reset                      Discard everything and start over
  help                       Show this help
  quit                       Exit (progress is kept)

Fields:
  Step 1: firstName, lastName, email, phone, dob (YYYY-MM-DD)
  Step 2: pan, aadhar, accountNumber, ifsc, bankName"#
}
