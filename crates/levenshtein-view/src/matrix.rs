//! Dense Levenshtein table between every prefix of two character sequences.
//!
//! Cell `(row, col)` holds the edit distance between the first `row`
//! characters of the origin and the first `col` characters of the destiny,
//! so row 0 and column 0 are the empty-prefix boundaries.

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DistanceMatrix {
    origin: Vec<char>,
    destiny: Vec<char>,
    cells: Vec<u32>,
}

impl DistanceMatrix {
    pub fn build(origin: &[char], destiny: &[char]) -> Self {
        let rows = origin.len() + 1;
        let cols = destiny.len() + 1;
        let mut cells = vec![0u32; rows * cols];

        for (col, cell) in cells.iter_mut().take(cols).enumerate() {
            *cell = col as u32;
        }

        for row in 1..rows {
            let base = row * cols;
            let above = base - cols;
            cells[base] = row as u32;

            for col in 1..cols {
                let cost = u32::from(origin[row - 1] != destiny[col - 1]);
                let substitute = cells[above + col - 1] + cost;
                let delete = cells[above + col] + 1;
                let insert = cells[base + col - 1] + 1;
                cells[base + col] = substitute.min(delete).min(insert);
            }
        }

        log::debug!(
            "built {}x{} distance matrix, distance {}",
            rows,
            cols,
            cells[rows * cols - 1]
        );

        Self {
            origin: origin.to_vec(),
            destiny: destiny.to_vec(),
            cells,
        }
    }

    pub fn from_strs(origin: &str, destiny: &str) -> Self {
        let origin = origin.chars().collect::<Vec<_>>();
        let destiny = destiny.chars().collect::<Vec<_>>();
        Self::build(&origin, &destiny)
    }

    pub fn rows(&self) -> usize {
        self.origin.len() + 1
    }

    pub fn cols(&self) -> usize {
        self.destiny.len() + 1
    }

    pub fn get(&self, row: usize, col: usize) -> Option<u32> {
        if row >= self.rows() || col >= self.cols() {
            return None;
        }
        self.cells.get(row * self.cols() + col).copied()
    }

    pub fn row(&self, row: usize) -> Option<&[u32]> {
        if row >= self.rows() {
            return None;
        }
        let cols = self.cols();
        Some(&self.cells[row * cols..(row + 1) * cols])
    }

    /// Edit distance between the full origin and destiny.
    pub fn distance(&self) -> u32 {
        self.cells[self.cells.len() - 1]
    }

    /// Origin character consumed on the way into `row`; `None` for row 0.
    pub fn origin_label(&self, row: usize) -> Option<char> {
        row.checked_sub(1)
            .and_then(|index| self.origin.get(index).copied())
    }

    /// Destiny character consumed on the way into `col`; `None` for column 0.
    pub fn destiny_label(&self, col: usize) -> Option<char> {
        col.checked_sub(1)
            .and_then(|index| self.destiny.get(index).copied())
    }

    /// Whether the characters labelling `row` and `col` are the same.
    pub fn is_match(&self, row: usize, col: usize) -> bool {
        match (self.origin_label(row), self.destiny_label(col)) {
            (Some(origin), Some(destiny)) => origin == destiny,
            _ => false,
        }
    }
}
