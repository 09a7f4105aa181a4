//! User-friendly error reporting.
//!
//! [`CascadeError`] values are precise but terse; the embedding application
//! surfaces them to developers during template compilation, where a hint about
//! *how* to fix the template is worth more than the bare failure. This module
//! wraps an error with an optional suggestion and details, and renders them
//! with terminal colors.

use colored::Colorize;
use std::fmt;

use super::error::CascadeError;

/// A [`CascadeError`] wrapped with user-facing guidance.
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying cascade error
    pub error: CascadeError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context with no additional suggestions or details.
    #[must_use]
    pub const fn new(error: CascadeError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add an actionable suggestion, displayed in green in the terminal.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add details explaining why the error occurred, displayed in yellow.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Display the error context to stderr with terminal colors.
    ///
    /// - Error message: Red and bold
    /// - Details: Yellow
    /// - Suggestion: Green
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert a [`CascadeError`] into a context with variant-specific guidance.
///
/// The directive-rewrite wrapper is unwrapped first so the guidance always
/// targets the root resolution failure.
pub fn user_friendly_error(error: CascadeError) -> ErrorContext {
    let (suggestion, details) = match error.root() {
        CascadeError::UnknownIdentifier { identifier, suggestion } => (
            match suggestion {
                Some(known) => format!("Did you mean '{known}'?"),
                None => format!(
                    "Register a template for '{identifier}' in the application, a theme, or a package"
                ),
            },
            "No application, theme, or package layer defines this template".to_string(),
        ),
        CascadeError::ChainExhausted { identifier, .. } => (
            format!(
                "Remove the extends/use directive or register a fallback '{identifier}' template in a package"
            ),
            "This template is the least-specific definition; there is no further link to delegate to"
                .to_string(),
        ),
        CascadeError::InheritanceCycle { .. } => (
            "Break the cycle by pointing one template at a concrete namespaced reference instead of the dynamic marker"
                .to_string(),
            "Dynamic resolution revisited a reference it had already chosen for this identifier"
                .to_string(),
        ),
        CascadeError::DirectiveRewrite { .. } => unreachable!("root() never returns a wrapper"),
    };

    ErrorContext::new(error).with_suggestion(suggestion).with_details(details)
}
