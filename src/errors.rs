//! Unified diagnostics for the converter.
//!
//! All failure modes of a conversion run are represented by [`ConvertError`].
//! Recoverable errors abort only the directive that raised them; the file
//! loop reports them and continues. Only I/O failures are fatal. Errors carry
//! an [`ErrorContext`] pointing into the input file so miette can render the
//! offending line and column.

use std::sync::Arc;

use miette::{Diagnostic, LabeledSpan, NamedSource, Severity, SourceCode, SourceSpan};
use thiserror::Error;

/// Shared handle to the input source for span-bearing diagnostics.
pub type SourceArc = Arc<NamedSource<String>>;

/// Minimal, composable error context: where the error happened and how to
/// help.
#[derive(Debug, Default)]
pub struct ErrorContext {
    /// The input source this error points into (if any).
    pub source: Option<SourceArc>,
    /// The primary span for this error (if any).
    pub span: Option<SourceSpan>,
    /// An optional help message.
    pub help: Option<String>,
}

impl ErrorContext {
    /// An empty context (no source, span, or help).
    pub fn none() -> Self {
        Self::default()
    }

    /// A context with both source and span.
    pub fn with_source_and_span(source: SourceArc, span: SourceSpan) -> Self {
        Self {
            source: Some(source),
            span: Some(span),
            help: None,
        }
    }

    /// Attaches a help message.
    pub fn help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }
}

/// Unified error type for every converter failure mode.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// A non-blank, non-comment line that is not an `mdefine` directive, or
    /// a directive too malformed to split into name and expression.
    #[error("unrecognized line: {message}")]
    UnrecognizedLine { message: String, ctx: ErrorContext },

    /// Bracket scanning reached end of text before depth returned to zero.
    /// Aborts the current directive only.
    #[error("unbalanced parentheses: {message}")]
    UnbalancedBrackets { message: String, ctx: ErrorContext },

    /// A directive's trailing `: <type>` was not one of `add`, `mul`, `con`.
    #[error("unknown model type: {message}")]
    UnknownModelType { message: String, ctx: ErrorContext },

    /// A model name redefined an already-registered additive function. Both
    /// definitions are emitted; this is a warning, not a failure.
    #[error("duplicate model registration: {message}")]
    DuplicateRegistration { message: String, ctx: ErrorContext },

    /// Failure opening, reading, or writing a file. Fatal: aborts the run.
    #[error("i/o error on '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl ConvertError {
    fn get_ctx(&self) -> Option<&ErrorContext> {
        match self {
            ConvertError::UnrecognizedLine { ctx, .. }
            | ConvertError::UnbalancedBrackets { ctx, .. }
            | ConvertError::UnknownModelType { ctx, .. }
            | ConvertError::DuplicateRegistration { ctx, .. } => Some(ctx),
            ConvertError::Io { .. } => None,
        }
    }

    fn primary_label(&self) -> &'static str {
        match self {
            ConvertError::UnrecognizedLine { .. } => "not an mdefine directive",
            ConvertError::UnbalancedBrackets { .. } => "bracket never closed",
            ConvertError::UnknownModelType { .. } => "unknown model type",
            ConvertError::DuplicateRegistration { .. } => "redefined here",
            ConvertError::Io { .. } => "i/o failure",
        }
    }

    const fn code_str(&self) -> &'static str {
        match self {
            ConvertError::UnrecognizedLine { .. } => "xcm2sl::convert::unrecognized_line",
            ConvertError::UnbalancedBrackets { .. } => "xcm2sl::convert::unbalanced_brackets",
            ConvertError::UnknownModelType { .. } => "xcm2sl::convert::unknown_model_type",
            ConvertError::DuplicateRegistration { .. } => {
                "xcm2sl::convert::duplicate_registration"
            }
            ConvertError::Io { .. } => "xcm2sl::io",
        }
    }

    /// True for errors that must abort the whole run rather than a single
    /// directive.
    pub fn is_fatal(&self) -> bool {
        matches!(self, ConvertError::Io { .. })
    }

    /// True for diagnostics reported without failing the directive.
    pub fn is_warning(&self) -> bool {
        matches!(self, ConvertError::DuplicateRegistration { .. })
    }
}

impl Diagnostic for ConvertError {
    fn code<'a>(&'a self) -> Option<Box<dyn std::fmt::Display + 'a>> {
        Some(Box::new(self.code_str()))
    }

    fn severity(&self) -> Option<Severity> {
        if self.is_warning() {
            Some(Severity::Warning)
        } else {
            Some(Severity::Error)
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn std::fmt::Display + 'a>> {
        self.get_ctx()?
            .help
            .as_ref()
            .map(|h| Box::new(h) as Box<dyn std::fmt::Display + 'a>)
    }

    fn source_code(&self) -> Option<&dyn SourceCode> {
        self.get_ctx()?
            .source
            .as_ref()
            .map(|s| s.as_ref() as &dyn SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let span = self.get_ctx()?.span?;
        let label = LabeledSpan::new_with_span(Some(self.primary_label().to_string()), span);
        Some(Box::new(std::iter::once(label)))
    }
}

/// Wraps input file content in a shared `NamedSource` for error contexts.
pub fn to_error_source(name: impl AsRef<str>, content: impl Into<String>) -> SourceArc {
    Arc::new(NamedSource::new(name.as_ref(), content.into()))
}

/// Prints a `ConvertError` with full miette diagnostics to stderr.
///
/// Rich formatting with source spans and help text; use this for all
/// user-facing error display in the CLI.
pub fn print_error(error: ConvertError) {
    let report = miette::Report::new(error);
    eprintln!("{report:?}");
}
