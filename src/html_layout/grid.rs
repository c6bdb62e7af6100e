//! Grid (table) layout
//!
//! Splits the raw content into an optional header row and body rows and
//! decides which cells carry the feature-column and alternate-row markers.

use crate::models::GridElement;

pub const FEATURE_COLUMN_CLASS: &str = "feature-column";
pub const ALTERNATE_ROW_CLASS: &str = "alt-row";

#[derive(Clone, Debug, PartialEq)]
pub struct GridCell {
    /// Trimmed cell text
    pub text: String,
    pub feature: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GridRow {
    pub cells: Vec<GridCell>,
    /// Odd body row (0-indexed from the first body row) with alternation on
    pub alternate: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GridTable {
    pub header: Option<GridRow>,
    pub body: Vec<GridRow>,
}

impl GridTable {
    pub fn from_element(element: &GridElement) -> Self {
        let feature = element
            .feature_column
            .and_then(|col| usize::try_from(col).ok());

        let build_row = |row: &Vec<String>, alternate: bool| GridRow {
            cells: row
                .iter()
                .enumerate()
                .map(|(col, text)| GridCell {
                    text: text.trim().to_string(),
                    feature: feature == Some(col),
                })
                .collect(),
            alternate,
        };

        let mut rows = element.content.iter();
        let header = if element.is_first_row_header {
            rows.next().map(|row| build_row(row, false))
        } else {
            None
        };

        let body = rows
            .enumerate()
            .map(|(i, row)| build_row(row, element.alternate_row_color && i % 2 == 1))
            .collect();

        Self { header, body }
    }
}

impl GridCell {
    pub fn class_name(&self) -> Option<&'static str> {
        self.feature.then_some(FEATURE_COLUMN_CLASS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(content: &[&[&str]], header: bool, alternate: bool, feature: Option<i64>) -> GridElement {
        GridElement {
            content: content
                .iter()
                .map(|row| row.iter().map(|c| c.to_string()).collect())
                .collect(),
            is_first_row_header: header,
            alternate_row_color: alternate,
            feature_column: feature,
        }
    }

    #[test]
    fn test_header_feature_and_alternate_markers() {
        let table = GridTable::from_element(&grid(
            &[&["H1", "H2"], &["a", "b"], &["c", "d"]],
            true,
            true,
            Some(1),
        ));

        let header = table.header.expect("header row");
        assert_eq!(header.cells.len(), 2);
        assert_eq!(header.cells[0].text, "H1");
        assert!(!header.cells[0].feature);
        assert!(header.cells[1].feature);

        assert_eq!(table.body.len(), 2);
        assert!(!table.body[0].alternate);
        assert!(table.body[1].alternate);
        assert_eq!(table.body[1].cells[0].text, "c");
        assert!(table.body.iter().all(|row| row.cells[1].feature && !row.cells[0].feature));
    }

    #[test]
    fn test_without_header_all_rows_are_body() {
        let table = GridTable::from_element(&grid(&[&["a"], &["b"], &["c"]], false, true, None));
        assert!(table.header.is_none());
        assert_eq!(table.body.len(), 3);
        let alternates: Vec<bool> = table.body.iter().map(|r| r.alternate).collect();
        assert_eq!(alternates, vec![false, true, false]);
    }

    #[test]
    fn test_cells_are_trimmed() {
        let table = GridTable::from_element(&grid(&[&["  padded  ", "\tx\n"]], false, false, None));
        assert_eq!(table.body[0].cells[0].text, "padded");
        assert_eq!(table.body[0].cells[1].text, "x");
    }

    #[test]
    fn test_negative_feature_column_marks_nothing() {
        let table = GridTable::from_element(&grid(&[&["a", "b"]], false, false, Some(-1)));
        assert!(table.body[0].cells.iter().all(|c| c.class_name().is_none()));
    }

    #[test]
    fn test_header_only_grid() {
        let table = GridTable::from_element(&grid(&[&["only"]], true, true, Some(0)));
        assert!(table.header.is_some());
        assert!(table.body.is_empty());
    }
}
