//! Load a sheet, infer its formulas and save it again.

use pretty_assertions::assert_eq;
use reformula_core::{CellRef, Config, Document};

const REPORT: &str = "\
Quarterly report,,
Item,Q1,Q2
Sales,\"$1,200\",100
Refunds,(200),50
Fees,,30
Net,\"**1,000.00**\",**80**
";

#[test]
fn test_csv_report_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("report.csv");
    let output = dir.path().join("report.transformed.csv");
    std::fs::write(&input, REPORT).unwrap();

    let mut doc = Document::open(&input).unwrap();
    let resolution = doc.infer_formulas(&Config::default());
    assert_eq!(resolution.formulas.len(), 2);
    assert!(resolution.unresolved.is_empty());

    doc.save_as(&output).unwrap();
    let written = std::fs::read_to_string(&output).unwrap();
    assert_eq!(
        written,
        "\
Quarterly report,,
Item,Q1,Q2
Sales,\"$1,200\",100
Refunds,(200),50
Fees,,30
Net,**=B3+B4**,**=C4+C5**
"
    );
}

#[test]
fn test_grd_output_from_csv_input() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("column.csv");
    let output = dir.path().join("column.grd");
    std::fs::write(&input, ",\n,\n,100\n,50\n,30\n,**80**\n").unwrap();

    let mut doc = Document::open(&input).unwrap();
    doc.infer_formulas(&Config::default());
    doc.save_as(&output).unwrap();

    let written = std::fs::read_to_string(&output).unwrap();
    assert!(written.contains("B6: **=B4+B5**"), "{written}");
    assert_eq!(doc.sheet.display(&CellRef::new(2, 3)), "100");
}

#[test]
fn test_unresolved_cells_keep_literal_values() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("odd.csv");
    std::fs::write(&input, "a,b\nx,y\nr,1\ns,2\nt,**17**\n").unwrap();

    let mut doc = Document::open(&input).unwrap();
    let resolution = doc.infer_formulas(&Config::default());
    assert_eq!(resolution.unresolved, vec![CellRef::new(2, 5)]);
    assert!(!doc.modified);

    doc.save_file().unwrap();
    let written = std::fs::read_to_string(&input).unwrap();
    assert_eq!(written, "a,b\nx,y\nr,1\ns,2\nt,**17**\n");
}

#[test]
fn test_grd_with_distant_cell_stays_fast() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("sparse.grd");
    std::fs::write(&input, "B3: 1\nB4: 2\nB5: **3**\nZZ40000: \"note\"\n").unwrap();

    let mut doc = Document::open(&input).unwrap();
    let resolution = doc.infer_formulas(&Config::default());
    assert_eq!(doc.sheet.display(&CellRef::new(2, 5)), "=B3+B4");
    assert!(resolution.table.len() <= 4);
}
