use std::ops::Range;

use similar::{Algorithm, DiffOp, DiffTag, TextDiff};

use crate::delta::{Chunk, Delta, Revision};
use crate::document::Document;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DiffOptions {
    pub algorithm: Algorithm,
}

impl Default for DiffOptions {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::Myers,
        }
    }
}

/// Line-level revision between two documents.
///
/// Replaced line runs become [`Delta::Change`] carrying a character diff of
/// the two spans, anchored relative to the start of each span.
pub fn diff_documents(origin: &Document, destiny: &Document, options: DiffOptions) -> Revision {
    let old_lines = origin.raw_lines();
    let new_lines = destiny.raw_lines();
    let old_refs: Vec<&str> = old_lines.iter().map(|line| line.as_str()).collect();
    let new_refs: Vec<&str> = new_lines.iter().map(|line| line.as_str()).collect();

    let diff = TextDiff::configure()
        .algorithm(options.algorithm)
        .diff_slices(&old_refs, &new_refs);

    let mut cursor = OpCursor::default();
    let deltas = diff
        .ops()
        .iter()
        .map(|op| {
            let (old_range, new_range) = cursor.advance(op);
            delta_for_op(op.tag(), old_range, new_range, &old_lines, &new_lines, options)
        })
        .collect::<Vec<_>>();

    log::debug!(
        "diffed {} against {} lines into {} deltas",
        old_lines.len(),
        new_lines.len(),
        deltas.len()
    );

    Revision { deltas }
}

fn delta_for_op(
    tag: DiffTag,
    old_range: Range<usize>,
    new_range: Range<usize>,
    old_lines: &[String],
    new_lines: &[String],
    options: DiffOptions,
) -> Delta {
    let original = chunk(old_range.clone());
    let revised = chunk(new_range.clone());

    match tag {
        DiffTag::Equal => Delta::Equal { original, revised },
        DiffTag::Delete => Delta::Delete { original, revised },
        DiffTag::Insert => Delta::Insert { original, revised },
        DiffTag::Replace => {
            let old_text = old_lines[old_range].concat();
            let new_text = new_lines[new_range].concat();
            Delta::Change {
                original,
                revised,
                nested: char_deltas(&old_text, &new_text, options),
            }
        }
    }
}

/// Character edits between two spans; unchanged runs are left implicit.
pub fn char_deltas(old_text: &str, new_text: &str, options: DiffOptions) -> Vec<Delta> {
    let diff = TextDiff::configure()
        .algorithm(options.algorithm)
        .diff_chars(old_text, new_text);

    let mut cursor = OpCursor::default();
    diff.ops()
        .iter()
        .filter_map(|op| {
            let (old_range, new_range) = cursor.advance(op);
            let original = chunk(old_range);
            let revised = chunk(new_range);
            match op.tag() {
                DiffTag::Equal => None,
                DiffTag::Delete => Some(Delta::Delete { original, revised }),
                DiffTag::Insert => Some(Delta::Insert { original, revised }),
                DiffTag::Replace => Some(Delta::Change {
                    original,
                    revised,
                    nested: Vec::new(),
                }),
            }
        })
        .collect()
}

/// Running position in both sequences while walking diff ops.
///
/// Ops are laid end to end from the cursors; the side indices `similar`
/// reports for the empty half of an insert or delete are not used.
#[derive(Default)]
struct OpCursor {
    old: usize,
    new: usize,
}

impl OpCursor {
    fn advance(&mut self, op: &DiffOp) -> (Range<usize>, Range<usize>) {
        let old = self.old..self.old + op.old_range().len();
        let new = self.new..self.new + op.new_range().len();
        self.old = old.end;
        self.new = new.end;
        (old, new)
    }
}

fn chunk(range: Range<usize>) -> Chunk {
    Chunk::new(range.start, range.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::delta::DeltaKind;
    use crate::model::LevenshteinModel;
    use crate::path::{Classification, build_path};
    use proptest::prelude::*;

    fn revision(origin: &str, destiny: &str) -> Revision {
        diff_documents(
            &Document::from_str(origin),
            &Document::from_str(destiny),
            DiffOptions::default(),
        )
    }

    fn kinds(revision: &Revision) -> Vec<DeltaKind> {
        revision.deltas.iter().map(Delta::kind).collect()
    }

    #[test]
    fn identical_documents_give_one_equal_delta() -> anyhow::Result<()> {
        let text = "fn main() {\n    run();\n}\n";
        let revision = revision(text, text);
        assert_eq!(kinds(&revision), vec![DeltaKind::Equal]);
        assert!(revision.is_identity());

        let doc = Document::from_str(text);
        let path = build_path(&revision.deltas, &doc, &doc)?;
        let len = text.chars().count();
        assert_eq!(path.count(Classification::Equal), len);
        assert_eq!(path.cells.len(), len);
        assert!(path.borders.is_empty());
        assert!(
            path.trace
                .iter()
                .enumerate()
                .all(|(i, at)| at.row == i + 1 && at.col == i + 1)
        );
        Ok(())
    }

    #[test]
    fn inserted_line_is_an_insert_delta() {
        let revision = revision("a\nc\n", "a\nb\nc\n");
        assert_eq!(
            kinds(&revision),
            vec![DeltaKind::Equal, DeltaKind::Insert, DeltaKind::Equal]
        );
        assert_eq!(revision.deltas[1].original(), Chunk::new(1, 0));
        assert_eq!(revision.deltas[1].revised(), Chunk::new(1, 1));
    }

    #[test]
    fn deleted_line_is_a_delete_delta() {
        let revision = revision("a\nb\nc\n", "a\nc\n");
        assert_eq!(
            kinds(&revision),
            vec![DeltaKind::Equal, DeltaKind::Delete, DeltaKind::Equal]
        );
        assert_eq!(revision.deltas[1].original(), Chunk::new(1, 1));
        assert_eq!(revision.deltas[1].revised(), Chunk::new(1, 0));
    }

    #[test]
    fn changed_line_carries_character_deltas() {
        let revision = revision("ab", "b");
        assert_eq!(kinds(&revision), vec![DeltaKind::Change]);
        assert_eq!(
            revision.deltas[0].nested(),
            &[Delta::Delete {
                original: Chunk::new(0, 1),
                revised: Chunk::new(0, 0),
            }]
        );
    }

    #[test]
    fn single_character_change_marks_row_and_column() -> anyhow::Result<()> {
        let revision = revision("cat", "cut");
        assert_eq!(kinds(&revision), vec![DeltaKind::Change]);

        let path = build_path(
            &revision.deltas,
            &Document::from_str("cat"),
            &Document::from_str("cut"),
        )?;
        assert_eq!(path.count(Classification::Deleted), 1);
        assert_eq!(path.count(Classification::Added), 1);
        assert!(
            path.cells
                .iter()
                .any(|(at, kind)| *kind == Classification::Deleted && at.row == 2)
        );
        assert!(
            path.cells
                .iter()
                .any(|(at, kind)| *kind == Classification::Added && at.col == 2)
        );
        assert!(!path.borders.is_empty());
        assert_eq!(path.end().row, 3);
        assert_eq!(path.end().col, 3);
        Ok(())
    }

    #[test]
    fn nested_anchors_are_relative_to_the_span() {
        let revision = revision("keep\nold line\n", "keep\nnew line\n");
        assert_eq!(kinds(&revision), vec![DeltaKind::Equal, DeltaKind::Change]);
        let nested = revision.deltas[1].nested();
        assert!(!nested.is_empty());
        assert!(nested.iter().all(|delta| delta.original().end() <= 9));
    }

    #[test]
    fn empty_documents_give_no_deltas() {
        assert!(revision("", "").deltas.is_empty());
    }

    const ALGORITHMS: [Algorithm; 3] = [Algorithm::Myers, Algorithm::Patience, Algorithm::Lcs];

    /// Diffs `a` against `b` and checks the resulting path steps one
    /// character at a time from `(0, 0)` to the end of both texts.
    fn assert_path_walks(a: &str, b: &str, algorithm: Algorithm) {
        let origin = Document::from_str(a);
        let destiny = Document::from_str(b);
        let revision = diff_documents(&origin, &destiny, DiffOptions { algorithm });
        let path = build_path(&revision.deltas, &origin, &destiny)
            .unwrap_or_else(|err| panic!("{algorithm:?} on {a:?} -> {b:?}: {err}"));

        let origin_chars = a.chars().collect::<Vec<_>>();
        let destiny_chars = b.chars().collect::<Vec<_>>();
        let (mut row, mut col) = (0, 0);
        for at in &path.trace {
            assert!(at.row >= row && at.col >= col);
            let step = (at.row - row, at.col - col);
            assert!(step == (1, 1) || step == (1, 0) || step == (0, 1));
            if path.classification(at.row, at.col) == Some(Classification::Equal) {
                assert_eq!(step, (1, 1));
                assert_eq!(origin_chars[at.row - 1], destiny_chars[at.col - 1]);
            }
            row = at.row;
            col = at.col;
        }
        assert_eq!((row, col), (origin_chars.len(), destiny_chars.len()));
        assert!(path.is_monotonic());

        let again = build_path(&revision.deltas, &origin, &destiny).expect("valid path");
        assert_eq!(again, path);
    }

    #[test]
    fn delete_anchors_follow_the_destiny_cursor() {
        let nested = char_deltas("a\n", "\n\n", DiffOptions::default());
        let mut revised_end = 0;
        for delta in &nested {
            assert!(delta.revised().anchor >= revised_end);
            revised_end = delta.revised().end();
        }
        for algorithm in ALGORITHMS {
            assert_path_walks("a\n", "\n\n", algorithm);
        }
    }

    #[test]
    fn uneven_character_edits_build_a_model() -> anyhow::Result<()> {
        let cases = [
            ("a\n", "\n\n"),
            ("aacaaaaaa", "bbbbacbcbaabbbbbbbb"),
            ("a\nabaa", "aaa\nbbaa"),
            ("éé aa\raaéa\r\n\ra", "éé bb é b\r\réa\r"),
        ];
        for (a, b) in cases {
            for algorithm in ALGORITHMS {
                assert_path_walks(a, b, algorithm);
                let model = LevenshteinModel::from_documents(
                    &Document::from_str(a),
                    &Document::from_str(b),
                    DiffOptions { algorithm },
                )?;
                assert_eq!(model.path.end().row, a.chars().count());
                assert_eq!(model.path.end().col, b.chars().count());
            }
        }
        Ok(())
    }

    proptest! {
        #[test]
        fn diff_paths_step_from_start_to_end(a in "[ab\n]{0,12}", b in "[ab\n]{0,12}") {
            for algorithm in ALGORITHMS {
                assert_path_walks(&a, &b, algorithm);
            }
        }

        #[test]
        fn character_heavy_paths_step_from_start_to_end(
            a in "[abcé \r\n]{0,20}",
            b in "[abcé \r\n]{0,20}"
        ) {
            for algorithm in ALGORITHMS {
                assert_path_walks(&a, &b, algorithm);
            }
        }
    }
}
