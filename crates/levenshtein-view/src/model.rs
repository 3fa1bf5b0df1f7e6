use crate::delta::Revision;
use crate::diff::{DiffOptions, diff_documents};
use crate::document::Document;
use crate::error::Result;
use crate::matrix::DistanceMatrix;
use crate::path::{Border, Classification, EditPath, build_path};

/// Everything a renderer needs to paint one matrix cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellView {
    pub distance: u32,
    pub origin_char: Option<char>,
    pub destiny_char: Option<char>,
    pub is_match: bool,
    pub classification: Option<Classification>,
    pub border: Option<Border>,
}

/// Distance matrix and edit path for one origin/destiny pair.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LevenshteinModel {
    pub matrix: DistanceMatrix,
    pub path: EditPath,
    pub show_path: bool,
}

impl LevenshteinModel {
    pub fn build(origin: &Document, destiny: &Document, revision: &Revision) -> Result<Self> {
        let path = build_path(&revision.deltas, origin, destiny)?;
        let matrix = DistanceMatrix::build(&origin.chars(), &destiny.chars());
        Ok(Self {
            matrix,
            path,
            show_path: true,
        })
    }

    /// Diffs the documents first, then builds the model from that revision.
    pub fn from_documents(
        origin: &Document,
        destiny: &Document,
        options: DiffOptions,
    ) -> Result<Self> {
        let revision = diff_documents(origin, destiny, options);
        Self::build(origin, destiny, &revision)
    }

    pub fn rows(&self) -> usize {
        self.matrix.rows()
    }

    pub fn cols(&self) -> usize {
        self.matrix.cols()
    }

    /// Path classification is hidden while `show_path` is off; borders stay.
    pub fn cell(&self, row: usize, col: usize) -> Option<CellView> {
        let distance = self.matrix.get(row, col)?;
        let classification = if self.show_path {
            self.path.classification(row, col)
        } else {
            None
        };

        Some(CellView {
            distance,
            origin_char: self.matrix.origin_label(row),
            destiny_char: self.matrix.destiny_label(col),
            is_match: self.matrix.is_match(row, col),
            classification,
            border: self.path.border(row, col),
        })
    }
}

/// Inputs that arrive one at a time; a model exists once all are present.
#[derive(Clone, Debug, Default)]
pub struct ModelInputs {
    pub origin: Option<Document>,
    pub destiny: Option<Document>,
    pub revision: Option<Revision>,
}

impl ModelInputs {
    pub fn with_origin(mut self, origin: Document) -> Self {
        self.origin = Some(origin);
        self
    }

    pub fn with_destiny(mut self, destiny: Document) -> Self {
        self.destiny = Some(destiny);
        self
    }

    pub fn with_revision(mut self, revision: Revision) -> Self {
        self.revision = Some(revision);
        self
    }

    pub fn is_ready(&self) -> bool {
        self.origin.is_some() && self.destiny.is_some() && self.revision.is_some()
    }

    /// `Ok(None)` while any input is missing.
    pub fn build(&self) -> Result<Option<LevenshteinModel>> {
        let (Some(origin), Some(destiny), Some(revision)) =
            (&self.origin, &self.destiny, &self.revision)
        else {
            log::warn!(
                "skipping model build: origin={} destiny={} revision={}",
                self.origin.is_some(),
                self.destiny.is_some(),
                self.revision.is_some()
            );
            return Ok(None);
        };

        LevenshteinModel::build(origin, destiny, revision).map(Some)
    }
}
