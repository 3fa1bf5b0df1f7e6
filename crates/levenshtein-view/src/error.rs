use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Origin,
    Destiny,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Origin => f.write_str("origin"),
            Side::Destiny => f.write_str("destiny"),
        }
    }
}

/// A delta list that does not describe a walk from the start of both
/// documents to their ends.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum PathError {
    #[error("line {line} is out of range in the {side} document")]
    LineOutOfRange { side: Side, line: usize },

    #[error("delta starts at origin offset {origin_offset}, behind the path cursor at {cursor}")]
    OutOfOrder { origin_offset: usize, cursor: usize },

    #[error("delta expects destiny offset {expected}, but the path reached {found}")]
    Misaligned { expected: usize, found: usize },

    #[error("nested delta anchored at {anchor} overlaps the previous edit ending at {cursor}")]
    NestedOutOfOrder { anchor: usize, cursor: usize },

    #[error("unchanged run is {origin} characters in origin but {destiny} in destiny")]
    UnbalancedSpan { origin: usize, destiny: usize },
}

pub type Result<T> = std::result::Result<T, PathError>;
