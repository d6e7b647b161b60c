use thiserror::Error;

/// Errors raised by the augmentation toolkit.
///
/// Every failure is surfaced synchronously at the point of detection and
/// propagates unchanged to the caller of the failing operation. Nothing is
/// retried internally and no partial results are returned.
#[derive(Debug, Error)]
pub enum AugmentError {
    /// Invalid construction-time parameters (token length or case, column
    /// names, quota target structure, field spans, SQL generator config).
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// A rule with this name is already registered.
    #[error("rule '{0}' is already registered")]
    DuplicateRule(String),

    /// A rule failed to produce its fields.
    #[error("rule '{rule}' failed: {message}")]
    RuleExecution { rule: String, message: String },

    /// A declared required column is absent from the augmented result.
    #[error("required field '{0}' does not exist in augmented data")]
    MissingColumn(String),

    /// The augmented result contains a field that was not declared.
    #[error("augmented data contains undeclared field '{0}'")]
    UnexpectedColumn(String),

    /// Required columns and the column output order disagree on the field set.
    #[error("required columns and column output order disagree on the field set")]
    SpecificationConflict,

    /// A quota lookup addressed a path with no declared target.
    #[error("undefined key '{0}'")]
    UndefinedKey(String),

    /// The token issuer ran out of candidates or supplied tokens.
    #[error("{0}")]
    TokenExhaustion(String),

    /// A column name lookup failed in a context where -1 is not acceptable.
    #[error("name '{0}' not found")]
    NameNotFound(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// A delimited-file parse or write failure, carried as text so the
    /// model crate stays free of I/O dependencies.
    #[error("csv error: {0}")]
    Csv(String),
}

impl AugmentError {
    /// Shorthand for a [`AugmentError::RuleExecution`] naming the failing rule.
    pub fn rule_execution(rule: impl Into<String>, message: impl Into<String>) -> Self {
        Self::RuleExecution {
            rule: rule.into(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AugmentError>;
