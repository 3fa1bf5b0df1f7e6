pub mod delta;
pub mod diff;
pub mod document;
pub mod error;
pub mod matrix;
pub mod model;
pub mod path;

pub use delta::{Chunk, Delta, DeltaKind, Revision};
pub use diff::{DiffOptions, char_deltas, diff_documents};
pub use document::{Document, LineSource};
pub use error::{PathError, Side};
pub use matrix::DistanceMatrix;
pub use model::{CellView, LevenshteinModel, ModelInputs};
pub use path::{Border, Classification, Coordinate, EditPath, build_path};
