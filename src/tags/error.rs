#![expect(clippy::module_name_repetitions, reason = "error prefix is necessary")]

use std::fmt;

use super::TagKey;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Errors of a single user-supplied tag.
pub enum ParseTagError {
    EmptyKey,
    KeyTooLong { key: TagKey },
    ValueTooLong { key: TagKey },
    /// Keys starting with `aws:` belong to AWS and cannot be set by users.
    ReservedKey { key: TagKey },
}

impl std::error::Error for ParseTagError {}

impl fmt::Display for ParseTagError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::EmptyKey => write!(f, "tag key must not be empty"),
            Self::KeyTooLong { ref key } => {
                write!(f, "tag key \"{key}\" exceeds {} characters", super::MAX_KEY_LENGTH)
            }
            Self::ValueTooLong { ref key } => write!(
                f,
                "value of tag \"{key}\" exceeds {} characters",
                super::MAX_VALUE_LENGTH
            ),
            Self::ReservedKey { ref key } => write!(
                f,
                "tag key \"{key}\" uses the reserved prefix \"{}\"",
                super::RESERVED_PREFIX
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Errors that can happen when validating a set of tags.
pub enum ParseTagsError {
    /// The same key appears more than once
    DuplicateKey { key: TagKey },
    /// A single tag is invalid
    ParseTag(ParseTagError),
}

impl std::error::Error for ParseTagsError {}

impl fmt::Display for ParseTagsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::DuplicateKey { ref key } => write!(f, "tag \"{key}\" given more than once"),
            Self::ParseTag(ref err) => write!(f, "invalid tag: {err}"),
        }
    }
}

impl From<ParseTagError> for ParseTagsError {
    fn from(value: ParseTagError) -> Self {
        Self::ParseTag(value)
    }
}
