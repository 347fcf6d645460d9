//! Declarative request validation for inbound HTTP adapters.
//!
//! Rules are evaluated against the incoming payload one by one — never
//! short-circuiting — and every violation is collected before the request
//! is rejected, so clients see the full list in a single response.

use crate::domain::Error;

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub(crate) const fn as_str(&self) -> &str {
        self.0
    }
}

/// Constraint a single rule places on its field.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Constraint {
    /// The field must be present with a non-empty value.
    Present,
    /// The value, when present, must not exceed this many characters.
    MaxLength(usize),
}

/// One declarative validation rule: a field, a constraint, and the message
/// reported when the constraint is violated.
#[derive(Debug, Clone, Copy)]
pub(crate) struct FieldRule {
    field: FieldName,
    constraint: Constraint,
    violation: &'static str,
}

impl FieldRule {
    pub(crate) const fn new(
        field: FieldName,
        constraint: Constraint,
        violation: &'static str,
    ) -> Self {
        Self {
            field,
            constraint,
            violation,
        }
    }

    pub(crate) const fn field(&self) -> FieldName {
        self.field
    }

    fn violated_by(&self, value: Option<&str>) -> bool {
        match self.constraint {
            Constraint::Present => value.map_or(true, str::is_empty),
            Constraint::MaxLength(limit) => {
                value.is_some_and(|text| text.chars().count() > limit)
            }
        }
    }
}

/// Evaluate every rule and aggregate all violations.
///
/// `lookup` resolves a field name to its raw value in the request body.
/// Violation messages keep rule declaration order. A non-empty collection
/// becomes a single validation [`Error`]; otherwise the request proceeds
/// unchanged.
pub(crate) fn check_rules<'v>(
    rules: &[FieldRule],
    lookup: impl Fn(FieldName) -> Option<&'v str>,
) -> Result<(), Error> {
    let violations: Vec<String> = rules
        .iter()
        .filter(|rule| rule.violated_by(lookup(rule.field())))
        .map(|rule| rule.violation.to_owned())
        .collect();

    if violations.is_empty() {
        Ok(())
    } else {
        Err(Error::validation(violations))
    }
}
