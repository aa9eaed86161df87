//! Column definitions and the local row filter.

use ratatui::layout::Constraint;

/// One table column. The accessor renders a row's cell as text; both
/// display and filtering go through it.
pub struct Column<R> {
    pub id: String,
    pub header: String,
    pub width: Constraint,
    accessor: Box<dyn Fn(&R) -> String>,
}

impl<R> Column<R> {
    pub fn new(
        id: impl Into<String>,
        header: impl Into<String>,
        width: Constraint,
        accessor: impl Fn(&R) -> String + 'static,
    ) -> Self {
        Self {
            id: id.into(),
            header: header.into(),
            width,
            accessor: Box::new(accessor),
        }
    }

    pub fn cell(&self, row: &R) -> String {
        (self.accessor)(row)
    }
}

impl<R> std::fmt::Debug for Column<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Column")
            .field("id", &self.id)
            .field("header", &self.header)
            .field("width", &self.width)
            .finish_non_exhaustive()
    }
}

/// Single predicate on one column, set from the search box when the table
/// has a search column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnFilter {
    pub column: String,
    pub value: String,
}

pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    needle.is_empty() || haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Indices of the rows passing both the global text and the column filter.
///
/// A filter naming a column that does not exist is ignored.
pub fn visible_rows<R>(
    rows: &[R],
    columns: &[Column<R>],
    global: &str,
    column_filter: Option<&ColumnFilter>,
) -> Vec<usize> {
    let filter_column = column_filter.and_then(|filter| {
        columns
            .iter()
            .find(|column| column.id == filter.column)
            .map(|column| (column, filter.value.as_str()))
    });

    rows.iter()
        .enumerate()
        .filter(|(_, row)| {
            global.is_empty()
                || columns
                    .iter()
                    .any(|column| contains_ignore_case(&column.cell(row), global))
        })
        .filter(|(_, row)| match filter_column {
            Some((column, value)) => contains_ignore_case(&column.cell(row), value),
            None => true,
        })
        .map(|(index, _)| index)
        .collect()
}
