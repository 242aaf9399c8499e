//! Option merger.
//!
//! Folds form-control state into a copy of the baseline mapping. Keys the form does not
//! address survive untouched and in place; addressed keys are overwritten in place or
//! appended in application order.

use crate::options::{FALSE_LITERAL, OptionMap, TRUE_LITERAL};

/// A three-state checkbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TriState {
    /// Checked: writes `TRUE`.
    Checked,
    /// Unchecked: writes `FALSE`.
    Unchecked,
    /// Mixed/unknown: leaves the option alone.
    #[default]
    Indeterminate,
}

impl TriState {
    /// The literal to write, or `None` when indeterminate.
    pub fn literal(self) -> Option<&'static str> {
        match self {
            Self::Checked => Some(TRUE_LITERAL),
            Self::Unchecked => Some(FALSE_LITERAL),
            Self::Indeterminate => None,
        }
    }
}

impl From<bool> for TriState {
    fn from(value: bool) -> Self {
        if value { Self::Checked } else { Self::Unchecked }
    }
}

impl From<Option<bool>> for TriState {
    fn from(value: Option<bool>) -> Self {
        value.map_or(Self::Indeterminate, Self::from)
    }
}

/// State of every recognized form control.
///
/// Defaults address nothing: merging [`EditDirectives::default`] returns the baseline as is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditDirectives {
    /// `echo`, written when set.
    pub echo: Option<String>,
    /// `eval`, written when set.
    pub eval: Option<String>,
    /// `include`, written when set.
    pub include: Option<String>,
    /// `message` checkbox.
    pub message: TriState,
    /// `warning` checkbox.
    pub warning: TriState,
    /// `fig.height` text box, written when non-empty.
    pub fig_height: String,
    /// `fig.width` text box, written when non-empty.
    pub fig_width: String,
}

impl EditDirectives {
    /// Directives that change nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `echo`.
    pub fn echo(mut self, value: impl Into<String>) -> Self {
        self.echo = Some(value.into());
        self
    }

    /// Set `eval`.
    pub fn eval(mut self, value: impl Into<String>) -> Self {
        self.eval = Some(value.into());
        self
    }

    /// Set `include`.
    pub fn include(mut self, value: impl Into<String>) -> Self {
        self.include = Some(value.into());
        self
    }

    /// Set the `message` checkbox.
    pub fn message(mut self, state: impl Into<TriState>) -> Self {
        self.message = state.into();
        self
    }

    /// Set the `warning` checkbox.
    pub fn warning(mut self, state: impl Into<TriState>) -> Self {
        self.warning = state.into();
        self
    }

    /// Set the `fig.height` text.
    pub fn fig_height(mut self, text: impl Into<String>) -> Self {
        self.fig_height = text.into();
        self
    }

    /// Set the `fig.width` text.
    pub fn fig_width(mut self, text: impl Into<String>) -> Self {
        self.fig_width = text.into();
        self
    }

    fn passthrough(&self) -> [(&'static str, Option<&str>); 3] {
        [
            ("echo", self.echo.as_deref()),
            ("eval", self.eval.as_deref()),
            ("include", self.include.as_deref()),
        ]
    }

    fn checkboxes(&self) -> [(&'static str, TriState); 2] {
        [("message", self.message), ("warning", self.warning)]
    }

    fn text_boxes(&self) -> [(&'static str, &str); 2] {
        [
            ("fig.height", self.fig_height.as_str()),
            ("fig.width", self.fig_width.as_str()),
        ]
    }
}

/// Merge `edits` into a copy of `baseline`.
///
/// Application order is passthrough keys, then checkboxes, then text boxes. Unset
/// passthrough values, indeterminate checkboxes and empty text boxes never delete anything.
pub fn merge_options(baseline: &OptionMap, edits: &EditDirectives) -> OptionMap {
    let mut options = baseline.clone();

    for (key, value) in edits.passthrough() {
        if let Some(value) = value {
            options.insert(key, value);
        }
    }

    for (key, state) in edits.checkboxes() {
        let Some(literal) = state.literal() else {
            continue;
        };
        options.insert(key, literal);
    }

    for (key, text) in edits.text_boxes() {
        if !text.is_empty() {
            options.insert(key, text);
        }
    }

    options
}
