//! The errors that the lexer and the parser report. Every error carries the
//! 1-based line and column of the offending character or token.

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("{line}:{column}: unexpected character '{ch}'")]
    UnexpectedChar { ch: char, line: usize, column: usize },

    #[error("{line}:{column}: unterminated string")]
    UnterminatedString { line: usize, column: usize },

    #[error("{line}:{column}: unterminated html string")]
    UnterminatedHtml { line: usize, column: usize },

    #[error("{line}:{column}: {message}")]
    Syntax {
        message: String,
        line: usize,
        column: usize,
    },
}

impl ParseError {
    pub fn syntax(message: &str, line: usize, column: usize) -> Self {
        ParseError::Syntax {
            message: message.to_string(),
            line,
            column,
        }
    }

    pub fn line(&self) -> usize {
        match self {
            ParseError::UnexpectedChar { line, .. }
            | ParseError::UnterminatedString { line, .. }
            | ParseError::UnterminatedHtml { line, .. }
            | ParseError::Syntax { line, .. } => *line,
        }
    }

    pub fn column(&self) -> usize {
        match self {
            ParseError::UnexpectedChar { column, .. }
            | ParseError::UnterminatedString { column, .. }
            | ParseError::UnterminatedHtml { column, .. }
            | ParseError::Syntax { column, .. } => *column,
        }
    }

    /// \returns true if the error was found by the lexer (as opposed to the
    /// grammar).
    pub fn is_lexical(&self) -> bool {
        !matches!(self, ParseError::Syntax { .. })
    }
}

pub type Result<T> = std::result::Result<T, ParseError>;
