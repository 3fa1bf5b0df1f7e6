use levenshtein_view::{
    Classification, DeltaKind, DiffOptions, Document, LevenshteinModel, diff_documents,
};

fn main() -> anyhow::Result<()> {
    let old = "let x = 1;\nprint(x);\n";
    let new = "let y = 1;\nprint(y);\ndone();\n";

    let old_doc = Document::from_str(old);
    let new_doc = Document::from_str(new);

    let revision = diff_documents(&old_doc, &new_doc, DiffOptions::default());
    println!("== deltas ==");
    for delta in &revision.deltas {
        let original = delta.original();
        let revised = delta.revised();
        println!(
            "{:?} -{},{} +{},{}",
            delta.kind(),
            original.anchor + 1,
            original.size,
            revised.anchor + 1,
            revised.size
        );
        if delta.kind() == DeltaKind::Change {
            for nested in delta.nested() {
                println!(
                    "    {:?} chars -{},{} +{},{}",
                    nested.kind(),
                    nested.original().anchor,
                    nested.original().size,
                    nested.revised().anchor,
                    nested.revised().size
                );
            }
        }
    }

    let model = LevenshteinModel::build(&old_doc, &new_doc, &revision)?;
    println!();
    println!("== distance {} ==", model.matrix.distance());

    let mut header = String::from("      ");
    for col in 0..model.cols() {
        header.push_str(&format!("{:>4}", label(model.matrix.destiny_label(col))));
    }
    println!("{header}");

    for row in 0..model.rows() {
        let mut line = format!("{:>4}  ", label(model.matrix.origin_label(row)));
        for col in 0..model.cols() {
            let Some(cell) = model.cell(row, col) else {
                continue;
            };
            let marker = match cell.classification {
                Some(Classification::Equal) => '=',
                Some(Classification::Added) => '+',
                Some(Classification::Deleted) => '-',
                None if cell.border.is_some() => '.',
                None => ' ',
            };
            line.push_str(&format!("{:>3}{marker}", cell.distance));
        }
        println!("{line}");
    }

    Ok(())
}

fn label(ch: Option<char>) -> String {
    match ch {
        Some('\n') => "\\n".to_string(),
        Some(ch) => ch.to_string(),
        None => String::new(),
    }
}
