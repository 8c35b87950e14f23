//! Read-only table views: filter, sort, paginate.

use std::cmp::Ordering;

use tabview_model::{CellValue, Row, Table};
use tabview_profile::coerce::to_number;

/// Rows per page when the caller does not choose.
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Page sizes offered to interactive callers.
pub const PAGE_SIZE_OPTIONS: [usize; 6] = [15, 20, 25, 30, 50, 100];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

/// Single-column sort order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    pub column: String,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn ascending(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            direction: SortDirection::Ascending,
        }
    }

    pub fn descending(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            direction: SortDirection::Descending,
        }
    }
}

/// Zero-based page index and page size. The size is always at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub index: usize,
    size: usize,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            index: 0,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageRequest {
    pub fn new(index: usize, size: usize) -> Self {
        Self {
            index,
            size: size.max(1),
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    #[must_use]
    pub fn with_index(mut self, index: usize) -> Self {
        self.index = index;
        self
    }

    #[must_use]
    pub fn with_size(mut self, size: usize) -> Self {
        self.size = size.max(1);
        self
    }
}

/// A view request over the current rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    /// Case-insensitive substring matched against every column's display value.
    pub filter: Option<String>,
    pub sort: Option<SortSpec>,
    pub page: PageRequest,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    #[must_use]
    pub fn with_sort(mut self, sort: SortSpec) -> Self {
        self.sort = Some(sort);
        self
    }

    #[must_use]
    pub fn with_page(mut self, page: PageRequest) -> Self {
        self.page = page;
        self
    }
}

/// A row in a view, tagged with its current position in the table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndexedRow<'a> {
    pub index: usize,
    pub row: &'a Row,
}

/// One page of a filtered, sorted view.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryResult<'a> {
    pub rows: Vec<IndexedRow<'a>>,
    /// Rows that passed the filter, across all pages.
    pub matched: usize,
    /// Rows in the table.
    pub total: usize,
    pub page: PageRequest,
    pub page_count: usize,
}

impl QueryResult<'_> {
    /// Table positions of the rows on this page.
    pub fn indices(&self) -> Vec<usize> {
        self.rows.iter().map(|entry| entry.index).collect()
    }
}

pub(crate) fn run<'a>(table: &'a Table, query: &Query) -> QueryResult<'a> {
    let needle = query
        .filter
        .as_deref()
        .filter(|filter| !filter.is_empty())
        .map(str::to_lowercase);

    let mut matched: Vec<usize> = (0..table.rows.len())
        .filter(|&index| match &needle {
            Some(needle) => row_matches(table, &table.rows[index], needle),
            None => true,
        })
        .collect();

    if let Some(sort) = &query.sort {
        if table.columns.contains(&sort.column) {
            matched.sort_by(|&a, &b| {
                compare_cells(
                    table.rows[a].value(&sort.column),
                    table.rows[b].value(&sort.column),
                    sort.direction,
                )
            });
        } else {
            tracing::debug!(column = %sort.column, "sort column not in table, ignoring");
        }
    }

    let page = query.page;
    let matched_count = matched.len();
    let rows = matched
        .into_iter()
        .skip(page.index.saturating_mul(page.size()))
        .take(page.size())
        .map(|index| IndexedRow {
            index,
            row: &table.rows[index],
        })
        .collect();

    QueryResult {
        rows,
        matched: matched_count,
        total: table.rows.len(),
        page,
        page_count: matched_count.div_ceil(page.size()),
    }
}

fn row_matches(table: &Table, row: &Row, needle: &str) -> bool {
    table.columns.iter().any(|column| {
        let value = row.value(column);
        !value.is_empty() && value.to_string().to_lowercase().contains(needle)
    })
}

/// Orders two cells for a sort. Empty cells go last in either direction.
fn compare_cells(a: &CellValue, b: &CellValue, direction: SortDirection) -> Ordering {
    match (a.is_empty(), b.is_empty()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => {
            let ord = compare_values(a, b);
            match direction {
                SortDirection::Ascending => ord,
                SortDirection::Descending => ord.reverse(),
            }
        }
    }
}

fn compare_values(a: &CellValue, b: &CellValue) -> Ordering {
    if let (Some(x), Some(y)) = (to_number(a), to_number(b)) {
        return x.partial_cmp(&y).unwrap_or(Ordering::Equal);
    }
    natural_cmp(&a.to_string(), &b.to_string())
}

/// Case-insensitive natural ordering: digit runs compare by numeric value,
/// so `item2` sorts before `item10`.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let left = chunks(a);
    let right = chunks(b);
    for (x, y) in left.iter().zip(&right) {
        let ord = compare_chunk(x, y);
        if ord != Ordering::Equal {
            return ord;
        }
    }
    left.len().cmp(&right.len())
}

/// Splits text into maximal runs of ASCII digits and non-digits.
fn chunks(text: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut start = 0;
    let mut in_digits: Option<bool> = None;
    for (pos, ch) in text.char_indices() {
        let digit = ch.is_ascii_digit();
        match in_digits {
            Some(previous) if previous != digit => {
                out.push(&text[start..pos]);
                start = pos;
            }
            _ => {}
        }
        in_digits = Some(digit);
    }
    if start < text.len() {
        out.push(&text[start..]);
    }
    out
}

fn compare_chunk(a: &str, b: &str) -> Ordering {
    let a_digits = a.starts_with(|c: char| c.is_ascii_digit());
    let b_digits = b.starts_with(|c: char| c.is_ascii_digit());
    match (a_digits, b_digits) {
        (true, true) => {
            let a = a.trim_start_matches('0');
            let b = b.trim_start_matches('0');
            a.len().cmp(&b.len()).then_with(|| a.cmp(b))
        }
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => a.to_lowercase().cmp(&b.to_lowercase()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_natural_cmp() {
        assert_eq!(natural_cmp("item2", "item10"), Ordering::Less);
        assert_eq!(natural_cmp("Apple", "apple"), Ordering::Equal);
        assert_eq!(natural_cmp("apple", "Banana"), Ordering::Less);
        assert_eq!(natural_cmp("a", "ab"), Ordering::Less);
        assert_eq!(natural_cmp("007", "7"), Ordering::Equal);
        assert_eq!(natural_cmp("9", "x"), Ordering::Less);
    }

    #[test]
    fn test_chunks() {
        assert_eq!(chunks("ab12cd3"), ["ab", "12", "cd", "3"]);
        assert_eq!(chunks("42"), ["42"]);
        assert!(chunks("").is_empty());
    }

    #[test]
    fn test_empty_cells_sort_last_both_ways() {
        let empty = CellValue::text("");
        let one = CellValue::text("1");
        assert_eq!(
            compare_cells(&empty, &one, SortDirection::Ascending),
            Ordering::Greater
        );
        assert_eq!(
            compare_cells(&empty, &one, SortDirection::Descending),
            Ordering::Greater
        );
    }

    #[test]
    fn test_numeric_comparison_for_numeric_text() {
        assert_eq!(
            compare_values(&CellValue::text("9.5"), &CellValue::text("10")),
            Ordering::Less
        );
        assert_eq!(
            compare_values(&CellValue::Number(-1.0), &CellValue::text("0x10")),
            Ordering::Less
        );
    }

    #[test]
    fn test_page_size_clamped() {
        assert_eq!(PageRequest::new(0, 0).size(), 1);
        assert_eq!(PageRequest::default().with_size(0).size(), 1);
        assert_eq!(PageRequest::default().size(), DEFAULT_PAGE_SIZE);
    }
}
