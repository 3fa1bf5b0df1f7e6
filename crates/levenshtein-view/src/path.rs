//! Places a line-level revision onto the distance matrix as an edit path.
//!
//! The path starts at `(0, 0)` and every step consumes characters: an equal
//! character moves diagonally, a deleted one moves down a row and an added
//! one moves right a column. Each step is recorded at the cell it lands on,
//! so annotations share the matrix's `(row, col)` index space.

use std::collections::BTreeMap;
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::delta::{Chunk, Delta};
use crate::document::LineSource;
use crate::error::{PathError, Result, Side};

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Coordinate {
    pub row: usize,
    pub col: usize,
}

impl Coordinate {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Classification {
    Equal,
    Added,
    Deleted,
}

/// Edges of a cell that lie on the outline of an edit block.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Border {
    pub top: bool,
    pub left: bool,
    pub bottom: bool,
    pub right: bool,
}

impl Border {
    pub fn union(self, other: Border) -> Border {
        Border {
            top: self.top || other.top,
            left: self.left || other.left,
            bottom: self.bottom || other.bottom,
            right: self.right || other.right,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EditPath {
    pub cells: BTreeMap<Coordinate, Classification>,
    pub borders: BTreeMap<Coordinate, Border>,
    /// Cells in the order the walk reached them.
    pub trace: Vec<Coordinate>,
}

impl EditPath {
    pub fn classification(&self, row: usize, col: usize) -> Option<Classification> {
        self.cells.get(&Coordinate::new(row, col)).copied()
    }

    pub fn border(&self, row: usize, col: usize) -> Option<Border> {
        self.borders.get(&Coordinate::new(row, col)).copied()
    }

    pub fn end(&self) -> Coordinate {
        self.trace.last().copied().unwrap_or_default()
    }

    pub fn count(&self, classification: Classification) -> usize {
        self.cells
            .values()
            .filter(|value| **value == classification)
            .count()
    }

    /// Whether rows and columns never decrease along the trace.
    pub fn is_monotonic(&self) -> bool {
        self.trace
            .windows(2)
            .all(|pair| pair[0].row <= pair[1].row && pair[0].col <= pair[1].col)
    }
}

/// Walks `deltas` in order and records the path they describe between the
/// `origin` and `destiny` documents.
///
/// Deltas must be sorted and non-overlapping on both sides, and every
/// stretch they leave out must be identical text; any violation is reported
/// instead of producing a broken path.
pub fn build_path<O, D>(deltas: &[Delta], origin: &O, destiny: &D) -> Result<EditPath>
where
    O: LineSource + ?Sized,
    D: LineSource + ?Sized,
{
    log::debug!(
        "building edit path: {} deltas, origin {} chars, destiny {} chars",
        deltas.len(),
        origin.total_len(),
        destiny.total_len()
    );

    let mut walker = PathWalker::default();

    for delta in deltas {
        let original = delta.original();
        let revised = delta.revised();
        let origin_start = line_offset(origin, Side::Origin, original.anchor)?;
        let destiny_start = line_offset(destiny, Side::Destiny, revised.anchor)?;
        walker.walk_to(origin_start, destiny_start)?;

        log::trace!(
            "{:?} delta at origin {} / destiny {}",
            delta.kind(),
            origin_start,
            destiny_start
        );

        match delta {
            Delta::Equal { .. } => {
                let origin_len = span_end(origin, Side::Origin, original)? - origin_start;
                let destiny_len = span_end(destiny, Side::Destiny, revised)? - destiny_start;
                walker.equal(balanced(origin_len, destiny_len)?);
            }
            Delta::Insert { .. } => {
                let added = span_end(destiny, Side::Destiny, revised)? - destiny_start;
                walker.replace_block(0, added);
            }
            Delta::Delete { .. } => {
                let removed = span_end(origin, Side::Origin, original)? - origin_start;
                walker.replace_block(removed, 0);
            }
            Delta::Change { nested, .. } => {
                let origin_len = span_end(origin, Side::Origin, original)? - origin_start;
                let destiny_len = span_end(destiny, Side::Destiny, revised)? - destiny_start;
                walker.change(nested, origin_len, destiny_len)?;
            }
        }
    }

    walker.walk_to(origin.total_len(), destiny.total_len())?;

    let path = walker.path;
    log::debug!(
        "edit path ends at {:?}: {} equal, {} deleted, {} added",
        path.end(),
        path.count(Classification::Equal),
        path.count(Classification::Deleted),
        path.count(Classification::Added)
    );
    Ok(path)
}

#[derive(Default)]
struct PathWalker {
    path: EditPath,
    row: usize,
    col: usize,
}

impl PathWalker {
    /// Walks the unchanged run up to the given offsets.
    fn walk_to(&mut self, origin_offset: usize, destiny_offset: usize) -> Result<()> {
        if origin_offset < self.row {
            return Err(PathError::OutOfOrder {
                origin_offset,
                cursor: self.row,
            });
        }
        let run = origin_offset - self.row;
        if self.col + run != destiny_offset {
            return Err(PathError::Misaligned {
                expected: destiny_offset,
                found: self.col + run,
            });
        }
        self.equal(run);
        Ok(())
    }

    /// Applies character-level deltas relative to the current position,
    /// then walks the unchanged tail of the changed span.
    fn change(&mut self, nested: &[Delta], origin_len: usize, destiny_len: usize) -> Result<()> {
        let (base_row, base_col) = (self.row, self.col);

        for delta in nested {
            let original = delta.original();
            let revised = delta.revised();
            let consumed = self.row - base_row;
            if original.anchor < consumed {
                return Err(PathError::NestedOutOfOrder {
                    anchor: original.anchor,
                    cursor: consumed,
                });
            }

            let run = original.anchor - consumed;
            let found = self.col + run;
            if found != base_col + revised.anchor {
                return Err(PathError::Misaligned {
                    expected: base_col + revised.anchor,
                    found,
                });
            }
            self.equal(run);

            match delta {
                Delta::Equal { .. } => self.equal(balanced(original.size, revised.size)?),
                Delta::Insert { .. } | Delta::Delete { .. } | Delta::Change { .. } => {
                    self.replace_block(original.size, revised.size)
                }
            }
        }

        let consumed_origin = self.row - base_row;
        let consumed_destiny = self.col - base_col;
        if consumed_origin > origin_len || consumed_destiny > destiny_len {
            return Err(PathError::NestedOutOfOrder {
                anchor: origin_len,
                cursor: consumed_origin,
            });
        }
        self.equal(balanced(
            origin_len - consumed_origin,
            destiny_len - consumed_destiny,
        )?);
        Ok(())
    }

    fn equal(&mut self, len: usize) {
        for _ in 0..len {
            self.row += 1;
            self.col += 1;
            self.mark(Classification::Equal);
        }
    }

    /// Removes `removed` origin characters then adds `added` destiny
    /// characters, outlining both as one block.
    fn replace_block(&mut self, removed: usize, added: usize) {
        if removed == 0 && added == 0 {
            return;
        }
        let (row, col) = (self.row, self.col);

        for _ in 0..removed {
            self.row += 1;
            self.mark(Classification::Deleted);
        }
        for _ in 0..added {
            self.col += 1;
            self.mark(Classification::Added);
        }

        let top = if removed > 0 { row + 1 } else { row };
        let left = if removed > 0 { col } else { col + 1 };
        self.frame(top..=row + removed, left..=col + added);
    }

    fn mark(&mut self, classification: Classification) {
        let at = Coordinate::new(self.row, self.col);
        self.path.cells.insert(at, classification);
        self.path.trace.push(at);
    }

    fn frame(&mut self, rows: RangeInclusive<usize>, cols: RangeInclusive<usize>) {
        let (top, bottom) = (*rows.start(), *rows.end());
        let (left, right) = (*cols.start(), *cols.end());

        let mut outline = |row: usize, col: usize| {
            let edges = Border {
                top: row == top,
                left: col == left,
                bottom: row == bottom,
                right: col == right,
            };
            let entry = self
                .path
                .borders
                .entry(Coordinate::new(row, col))
                .or_default();
            *entry = entry.union(edges);
        };

        for col in cols {
            outline(top, col);
            outline(bottom, col);
        }
        for row in rows {
            outline(row, left);
            outline(row, right);
        }
    }
}

fn balanced(origin: usize, destiny: usize) -> Result<usize> {
    if origin != destiny {
        return Err(PathError::UnbalancedSpan { origin, destiny });
    }
    Ok(origin)
}

fn line_offset<S: LineSource + ?Sized>(source: &S, side: Side, line: usize) -> Result<usize> {
    source
        .offset_for_line(line)
        .ok_or(PathError::LineOutOfRange { side, line })
}

/// Character offset just past the last line of `chunk`.
fn span_end<S: LineSource + ?Sized>(source: &S, side: Side, chunk: Chunk) -> Result<usize> {
    if chunk.is_empty() {
        return line_offset(source, side, chunk.anchor);
    }
    let last = chunk.end() - 1;
    source
        .line_end_offset(last)
        .ok_or(PathError::LineOutOfRange { side, line: last })
}
