use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by parsing, generation, and output.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// No parse strategy found any candidate field expression.
    #[error("Unable to parse SQL: no SELECT clause or field list found")]
    UnparsableSql,

    /// Candidate expressions were found but none of them yielded a field.
    #[error("No fields recognized in SQL")]
    NoFieldsRecognized,

    /// A field list did not close every parenthesis it opened.
    #[error("Unbalanced parentheses in field list: {0}")]
    UnbalancedParentheses(String),

    /// The request carried no SQL text.
    #[error("SQL input must not be empty")]
    EmptySql,

    /// The caller-supplied rule JSON could not be decoded.
    #[error("Invalid rules JSON: {0}")]
    InvalidRules(String),

    /// The request JSON could not be decoded.
    #[error("Invalid request JSON: {0}")]
    InvalidRequest(String),

    /// Writing generated files failed.
    #[error("{0}")]
    Output(String),

    /// Generated DDL was rejected by the dialect parser.
    #[error("{dialect} DDL failed syntax check: {message}")]
    Syntax {
        /// Dialect identifier the DDL was generated for.
        dialect: String,
        /// Parser error message.
        message: String,
    },
}

impl Error {
    /// True for errors caused by the SQL text itself, which the caller can fix by
    /// resubmitting corrected input.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Error::UnparsableSql
                | Error::NoFieldsRecognized
                | Error::UnbalancedParentheses(_)
                | Error::EmptySql
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_failures_are_input_errors() {
        assert!(Error::UnparsableSql.is_input_error());
        assert!(Error::NoFieldsRecognized.is_input_error());
        assert!(Error::UnbalancedParentheses("a)".to_string()).is_input_error());
        assert!(!Error::Output("disk full".to_string()).is_input_error());
    }

    #[test]
    fn syntax_error_message_names_dialect() {
        let err = Error::Syntax {
            dialect: "mysql".to_string(),
            message: "Expected ), found: EOF".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "mysql DDL failed syntax check: Expected ), found: EOF"
        );
    }
}
