use super::Document;
use crate::config::Config;
use reformula_engine::engine::{Region, Resolution, resolve};
use tracing::info;

impl Document {
    /// Rebuild formulas for every computed cell of the configured region and
    /// write them into the sheet. Unresolved cells keep their literal values.
    pub fn infer_formulas(&mut self, config: &Config) -> Resolution {
        let region = Region::of_reader(
            &self.sheet,
            config.region.start_row,
            config.region.start_col,
        );
        let resolution = resolve(&self.sheet, region, &config.search);
        resolution.apply(&mut self.sheet);

        if !resolution.formulas.is_empty() {
            self.modified = true;
        }
        info!(
            inferred = resolution.formulas.len(),
            unresolved = resolution.unresolved.len(),
            "formulas written to sheet"
        );
        resolution
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RegionConfig;
    use crate::document::SheetCell;
    use pretty_assertions::assert_eq;
    use reformula_engine::engine::CellRef;

    fn doc_from_column(col: usize, start_row: usize, inputs: &[&str]) -> Document {
        let mut doc = Document::new();
        for (i, input) in inputs.iter().enumerate() {
            doc.sheet
                .set(CellRef::new(col, start_row + i), SheetCell::from_input(input));
        }
        doc
    }

    #[test]
    fn test_infer_formulas_writes_subtotal() {
        let mut doc = doc_from_column(2, 3, &["100", "50", "30", "**80**"]);
        let resolution = doc.infer_formulas(&Config::default());

        assert_eq!(resolution.formulas.len(), 1);
        assert_eq!(doc.sheet.display(&CellRef::new(2, 6)), "=B4+B5");
        assert!(doc.sheet.get(&CellRef::new(2, 6)).unwrap().computed);
        assert!(doc.modified);
    }

    #[test]
    fn test_infer_formulas_respects_region() {
        // The same column starting at row 1 would pick up the header row.
        let mut doc = doc_from_column(1, 1, &["5", "5", "**10**"]);
        let config = Config {
            region: RegionConfig { start_row: 2, start_col: 1 },
            ..Config::default()
        };
        let resolution = doc.infer_formulas(&config);
        assert!(resolution.formulas.is_empty());
        assert_eq!(resolution.unresolved, vec![CellRef::new(1, 3)]);
        assert_eq!(doc.sheet.display(&CellRef::new(1, 3)), "10");
        assert!(!doc.modified);
    }

    #[test]
    fn test_formatted_numbers_resolve() {
        let mut doc = doc_from_column(2, 3, &["$1,200", "(200)", "**1,000.00**"]);
        doc.infer_formulas(&Config::default());
        assert_eq!(doc.sheet.display(&CellRef::new(2, 5)), "=B3+B4");
        // Inputs keep their original formatting.
        assert_eq!(doc.sheet.display(&CellRef::new(2, 3)), "$1,200");
    }
}
