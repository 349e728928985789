//! Ways of pointing at one application from the command line.

use applytrack_core::{RecordId, ValidationError};
use std::str::FromStr;

/// `#n` or `@n` addresses the n-th row of the listing; anything else is an
/// identifier.
///
/// `@n` exists because an unquoted `#` starts a shell comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordRef {
    Position(usize),
    Id(RecordId),
}

impl FromStr for RecordRef {
    type Err = ValidationError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyField("Application reference"));
        }

        match trimmed
            .strip_prefix('#')
            .or_else(|| trimmed.strip_prefix('@'))
        {
            Some(number) => number
                .parse::<usize>()
                .ok()
                .filter(|n| *n > 0)
                .map(RecordRef::Position)
                .ok_or_else(|| ValidationError::UnknownRecord(trimmed.to_string())),
            None => Ok(RecordRef::Id(RecordId::new(trimmed))),
        }
    }
}
