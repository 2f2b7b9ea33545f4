use proc_macro2::Span;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Warning,
    Error,
}

/// A problem found while resolving or synthesizing a projection.
///
/// Errors exclude the affected field, or the whole record when the record
/// itself cannot be read. Warnings never stop generation.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub severity: Severity,

    pub message: String,

    /// Target record the diagnostic was reported against
    pub record: Option<String>,

    /// Target field the diagnostic was reported against
    pub field: Option<String>,

    pub span: Span,
}

impl Diagnostic {
    pub fn warning(span: Span, message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, span, message.into())
    }

    pub fn error(span: Span, message: impl Into<String>) -> Self {
        Self::new(Severity::Error, span, message.into())
    }

    fn new(severity: Severity, span: Span, message: String) -> Self {
        Self {
            severity,
            message,
            record: None,
            field: None,
            span,
        }
    }

    pub(crate) fn on_field(mut self, field: impl fmt::Display) -> Self {
        self.field = Some(field.to_string());
        self
    }

    pub(crate) fn in_record(mut self, record: impl fmt::Display) -> Self {
        self.record.get_or_insert_with(|| record.to_string());
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    pub fn to_syn_error(&self) -> syn::Error {
        syn::Error::new(self.span, self.to_string())
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.record, &self.field) {
            (Some(record), Some(field)) => write!(f, "{record}.{field}: {}", self.message),
            (Some(record), None) => write!(f, "{record}: {}", self.message),
            (None, Some(field)) => write!(f, "{field}: {}", self.message),
            (None, None) => f.write_str(&self.message),
        }
    }
}

/// Diagnostic stream of one generation pass.
#[derive(Debug, Default, Clone)]
pub struct Diagnostics {
    list: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        match diagnostic.severity {
            Severity::Warning => tracing::debug!(%diagnostic, "warning"),
            Severity::Error => tracing::debug!(%diagnostic, "error"),
        }

        self.list.push(diagnostic);
    }

    /// Splits a combined `syn::Error` into one error diagnostic per message.
    pub(crate) fn push_syn(&mut self, err: syn::Error, record: &syn::Ident) {
        for err in err {
            self.push(Diagnostic::error(err.span(), err.to_string()).in_record(record));
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.list.iter()
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.list.iter().filter(|d| d.is_error())
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.list.iter().filter(|d| !d.is_error())
    }

    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    /// All errors combined into one `syn::Error`, for `compile_error!`.
    pub fn to_syn_error(&self) -> Option<syn::Error> {
        self.errors().map(Diagnostic::to_syn_error).reduce(|mut acc, err| {
            acc.combine(err);
            acc
        })
    }
}

impl Extend<Diagnostic> for Diagnostics {
    fn extend<I: IntoIterator<Item = Diagnostic>>(&mut self, iter: I) {
        for diagnostic in iter {
            self.push(diagnostic);
        }
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.list.into_iter()
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.list.iter()
    }
}
