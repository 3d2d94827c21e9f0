//! # Application Payload
//!
//! Trailing `args`/`kwargs` fields. Kinds differ in how they treat a missing
//! payload on the wire:
//!
//! | Kinds | Missing args/kwargs | Rust shape |
//! |-------|---------------------|------------|
//! | Abort, Error, Call, Result, Invocation, Yield | absent (`None`) | [`Payload`] |
//! | Publish, Event | empty list / empty dict | `List` + `Dict` fields |
//!
//! Either way `kwargs` can only appear after `args`, so a message that has
//! kwargs but no args puts an empty list in the args slot.

use crate::errors::ValidationError;
use crate::validation::{validate_args, validate_kwargs, CollectErrors};
use crate::value::{Dict, List, Value};

/// Optional positional and keyword arguments.
///
/// Having kwargs implies having args: constructing a payload with kwargs and
/// no args stores an empty args list, matching what the wire carries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Payload {
    args: Option<List>,
    kwargs: Option<Dict>,
}

impl Payload {
    #[must_use]
    pub fn new(args: Option<List>, kwargs: Option<Dict>) -> Self {
        let args = match (args, &kwargs) {
            (None, Some(_)) => Some(List::new()),
            (args, _) => args,
        };
        Self { args, kwargs }
    }

    #[must_use]
    pub fn args(&self) -> Option<&List> {
        self.args.as_ref()
    }

    #[must_use]
    pub fn kwargs(&self) -> Option<&Dict> {
        self.kwargs.as_ref()
    }

    #[must_use]
    pub fn with_args(self, args: List) -> Self {
        Self::new(Some(args), self.kwargs)
    }

    #[must_use]
    pub fn with_kwargs(self, kwargs: Dict) -> Self {
        Self::new(self.args, Some(kwargs))
    }

    /// Parses `fields[at]` as args and `fields[at + 1]` as kwargs.
    pub(crate) fn parse(
        fields: &[Value],
        at: usize,
        message: &'static str,
    ) -> Result<Self, ValidationError> {
        let (args, kwargs) = (
            validate_args(fields.get(at), message),
            validate_kwargs(fields.get(at + 1), message),
        )
            .collect_errors()?;
        Ok(Self::new(args, kwargs))
    }

    pub(crate) fn marshal_into(&self, out: &mut Vec<Value>) {
        if let Some(args) = &self.args {
            out.push(Value::List(args.clone()));
        }
        if let Some(kwargs) = &self.kwargs {
            out.push(Value::from(kwargs.clone()));
        }
    }
}

/// Parses a payload for kinds that default missing args/kwargs to empty.
pub(crate) fn parse_defaulted(
    fields: &[Value],
    at: usize,
    message: &'static str,
) -> Result<(List, Dict), ValidationError> {
    let (args, kwargs) = (
        validate_args(fields.get(at), message),
        validate_kwargs(fields.get(at + 1), message),
    )
        .collect_errors()?;
    Ok((args.unwrap_or_default(), kwargs.unwrap_or_default()))
}

/// Emits a defaulted payload, trimming trailing empty fields.
pub(crate) fn marshal_defaulted(args: &List, kwargs: &Dict, out: &mut Vec<Value>) {
    if args.is_empty() && kwargs.is_empty() {
        return;
    }
    out.push(Value::List(args.clone()));
    if !kwargs.is_empty() {
        out.push(Value::from(kwargs.clone()));
    }
}
