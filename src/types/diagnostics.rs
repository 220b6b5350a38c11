use super::error::{CompileError, CompileWarning};

/// Receives validation diagnostics as they are found.
///
/// The unit type `()` is the no-op sink: diagnostics are dropped and only
/// the result of [`GrammarBuilder::generate()`](super::GrammarBuilder::generate)
/// reflects them.
pub trait DiagnosticSink {
    fn error(&mut self, error: &CompileError);
    fn warning(&mut self, warning: &CompileWarning);
}

impl DiagnosticSink for () {
    fn error(&mut self, _error: &CompileError) {}
    fn warning(&mut self, _warning: &CompileWarning) {}
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for &mut S {
    fn error(&mut self, error: &CompileError) {
        (**self).error(error);
    }

    fn warning(&mut self, warning: &CompileWarning) {
        (**self).warning(warning);
    }
}

/// Collects every diagnostic in the order it was reported.
#[derive(Debug, Default, Clone)]
pub struct Diagnostics {
    pub errors: Vec<CompileError>,
    pub warnings: Vec<CompileWarning>,
}

impl Diagnostics {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }
}

impl DiagnosticSink for Diagnostics {
    fn error(&mut self, error: &CompileError) {
        self.errors.push(error.clone());
    }

    fn warning(&mut self, warning: &CompileWarning) {
        self.warnings.push(warning.clone());
    }
}

/// Forwards errors to `tracing::error!` and warnings to `tracing::warn!`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn error(&mut self, error: &CompileError) {
        tracing::error!("{error}");
    }

    fn warning(&mut self, warning: &CompileWarning) {
        tracing::warn!("{warning}");
    }
}

type Callback<'a, T> = Box<dyn FnMut(&T) + 'a>;

/// A sink built from two independently optional closures.
///
/// ```
/// use ugen::{Callbacks, GrammarBuilder, strings};
///
/// let mut warnings = Vec::new();
/// let mut sink = Callbacks::new().on_warning(|w| warnings.push(w.to_string()));
/// let _ = GrammarBuilder::new()
///     .rule("unused", strings(["hello"]))
///     .generate(&mut sink);
/// drop(sink);
/// assert_eq!(warnings.len(), 1);
/// ```
#[derive(Default)]
pub struct Callbacks<'a> {
    on_error: Option<Callback<'a, CompileError>>,
    on_warning: Option<Callback<'a, CompileWarning>>,
}

impl<'a> Callbacks<'a> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn on_error(mut self, f: impl FnMut(&CompileError) + 'a) -> Self {
        self.on_error = Some(Box::new(f));
        self
    }

    #[must_use]
    pub fn on_warning(mut self, f: impl FnMut(&CompileWarning) + 'a) -> Self {
        self.on_warning = Some(Box::new(f));
        self
    }
}

impl DiagnosticSink for Callbacks<'_> {
    fn error(&mut self, error: &CompileError) {
        if let Some(f) = self.on_error.as_mut() {
            f(error);
        }
    }

    fn warning(&mut self, warning: &CompileWarning) {
        if let Some(f) = self.on_warning.as_mut() {
            f(warning);
        }
    }
}
