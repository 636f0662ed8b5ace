//! Rule definitions and their typed checks.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use nbi_model::{EntityKind, Severity};

use crate::context::RuleContext;
use crate::input::RuleInput;

/// Hand-written predicate. Returns `false` when the rule fires.
pub type Predicate = fn(&RuleInput<'_>, &RuleContext<'_>) -> bool;

/// What a rule checks. The engine dispatches on the variant.
///
/// Every variant except [`Check::Required`] and [`Check::Custom`] passes a
/// blank value; presence is a separate rule.
#[derive(Clone, Copy)]
pub enum Check {
    /// The field is populated.
    Required,
    /// The value matches a regular expression.
    Pattern(&'static LazyLock<Regex>),
    /// Every pipe-delimited part is in the named code list.
    Lookup(&'static str),
    /// A known state code.
    State,
    /// A known county of the owning record's state.
    County,
    /// Fits the field's declared character or digit capacity.
    Length,
    /// Parses as a number of the field's declared kind.
    Digits,
    /// No more decimal places than the field's budget.
    Precision,
    /// Numeric value within an inclusive range.
    Range { min: f64, max: f64 },
    /// A real calendar day in `YYYYMMDD` form.
    Date,
    Custom(Predicate),
}

impl Check {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::Pattern(_) => "pattern",
            Self::Lookup(_) => "lookup",
            Self::State => "state",
            Self::County => "county",
            Self::Length => "length",
            Self::Digits => "digits",
            Self::Precision => "precision",
            Self::Range { .. } => "range",
            Self::Date => "date",
            Self::Custom(_) => "custom",
        }
    }
}

impl std::fmt::Debug for Check {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pattern(re) => write!(f, "Pattern({})", re.as_str()),
            Self::Lookup(list) => write!(f, "Lookup({list})"),
            Self::Range { min, max } => write!(f, "Range({min}..={max})"),
            other => f.write_str(other.label()),
        }
    }
}

/// Which default bundles a rule joins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Scope {
    All,
    Ordinary,
    Border,
}

impl Scope {
    pub fn includes(self, border: bool) -> bool {
        match self {
            Self::All => true,
            Self::Ordinary => !border,
            Self::Border => border,
        }
    }
}

/// A named check plus its default metadata.
#[derive(Debug, Clone)]
pub struct Rule {
    pub name: String,
    pub kind: EntityKind,
    /// Field identifier the rule reports against.
    pub item: &'static str,
    pub field_name: &'static str,
    pub severity: Severity,
    pub fatal: bool,
    pub scope: Scope,
    pub description: String,
    pub check: Check,
}

impl Rule {
    /// A non-fatal Error rule for every bundle of `kind`.
    pub fn new(
        name: impl Into<String>,
        kind: EntityKind,
        item: &'static str,
        check: Check,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            item,
            field_name: kind.spec(item).map_or(item, |spec| spec.name),
            severity: Severity::Error,
            fatal: false,
            scope: Scope::All,
            description: String::new(),
            check,
        }
    }

    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    #[must_use]
    pub fn fatal(mut self) -> Self {
        self.fatal = true;
        self
    }

    #[must_use]
    pub fn scope(mut self, scope: Scope) -> Self {
        self.scope = scope;
        self
    }

    #[must_use]
    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Critical and fatal: identity rules.
    #[must_use]
    pub fn identity(self) -> Self {
        self.severity(Severity::Critical).fatal()
    }
}
