use serde::{Deserialize, Serialize};

/// Contiguous range in one document: lines for top-level deltas,
/// characters (relative to the changed span) for nested ones.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    pub anchor: usize,
    pub size: usize,
}

impl Chunk {
    pub fn new(anchor: usize, size: usize) -> Self {
        Self { anchor, size }
    }

    pub fn end(&self) -> usize {
        self.anchor + self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Delta {
    Equal {
        original: Chunk,
        revised: Chunk,
    },
    Insert {
        original: Chunk,
        revised: Chunk,
    },
    Delete {
        original: Chunk,
        revised: Chunk,
    },
    Change {
        original: Chunk,
        revised: Chunk,
        nested: Vec<Delta>,
    },
}

impl Delta {
    pub fn original(&self) -> Chunk {
        match self {
            Delta::Equal { original, .. }
            | Delta::Insert { original, .. }
            | Delta::Delete { original, .. }
            | Delta::Change { original, .. } => *original,
        }
    }

    pub fn revised(&self) -> Chunk {
        match self {
            Delta::Equal { revised, .. }
            | Delta::Insert { revised, .. }
            | Delta::Delete { revised, .. }
            | Delta::Change { revised, .. } => *revised,
        }
    }

    pub fn nested(&self) -> &[Delta] {
        match self {
            Delta::Change { nested, .. } => nested,
            _ => &[],
        }
    }

    pub fn kind(&self) -> DeltaKind {
        match self {
            Delta::Equal { .. } => DeltaKind::Equal,
            Delta::Insert { .. } => DeltaKind::Insert,
            Delta::Delete { .. } => DeltaKind::Delete,
            Delta::Change { .. } => DeltaKind::Change,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DeltaKind {
    Equal,
    Insert,
    Delete,
    Change,
}

/// Ordered, non-overlapping deltas between two documents.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Revision {
    pub deltas: Vec<Delta>,
}

impl Revision {
    pub fn new(deltas: Vec<Delta>) -> Self {
        Self { deltas }
    }

    pub fn is_identity(&self) -> bool {
        self.deltas
            .iter()
            .all(|delta| delta.kind() == DeltaKind::Equal)
    }

    pub fn edit_count(&self) -> usize {
        self.deltas
            .iter()
            .filter(|delta| delta.kind() != DeltaKind::Equal)
            .count()
    }
}
