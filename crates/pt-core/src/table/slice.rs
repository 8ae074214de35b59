use std::cmp::Ordering;

use super::field::TableRecord;
use super::page::PageWindow;
use super::sort::SortDirective;

/// Natural ascending comparison of the named attribute.
pub fn default_compare<R: TableRecord>(a: &R, b: &R, field: &str) -> Ordering {
    a.field(field).compare(&b.field(field))
}

/// Sort a copy of `records` by the directive and cut out the page window.
///
/// 对记录副本排序并截取当前页。
///
/// The caller's collection is left untouched. A window past the end yields an
/// empty result.
pub fn visible_slice<R>(records: &[R], sort: &SortDirective, window: PageWindow) -> Vec<R>
where
    R: TableRecord + Clone,
{
    visible_slice_by(records, sort, window, default_compare::<R>)
}

/// [`visible_slice`] with a caller-supplied ascending comparator.
///
/// `compare(a, b, field)` must describe ascending order; descending sorts call
/// it with the arguments swapped. Rows the comparator reports as equal keep
/// their input order, but callers should not rely on that.
pub fn visible_slice_by<R, F>(
    records: &[R],
    sort: &SortDirective,
    window: PageWindow,
    compare: F,
) -> Vec<R>
where
    R: Clone,
    F: Fn(&R, &R, &str) -> Ordering,
{
    let mut rows: Vec<&R> = records.iter().collect();
    rows.sort_by(|a, b| sort.order(*a, *b, |x, y, field| compare(x, y, field)));

    let range = window.bounds(rows.len());
    rows[range].iter().map(|row| (*row).clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::field::FieldValue;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        id: i64,
        name: Option<&'static str>,
    }

    impl TableRecord for Row {
        type Id = i64;

        fn id(&self) -> i64 {
            self.id
        }

        fn field(&self, name: &str) -> FieldValue<'_> {
            match name {
                "id" => FieldValue::from(self.id),
                "name" => FieldValue::text(self.name),
                _ => FieldValue::Missing,
            }
        }
    }

    fn row(id: i64, name: &'static str) -> Row {
        Row { id, name: Some(name) }
    }

    #[test]
    fn test_sort_then_page() {
        let records = vec![row(1, "Z"), row(2, "A")];
        let window = PageWindow::new(0, 1).unwrap();

        let visible = visible_slice(&records, &SortDirective::ascending("name"), window);

        assert_eq!(visible, vec![row(2, "A")]);
        assert_eq!(records, vec![row(1, "Z"), row(2, "A")], "input must not be reordered");
    }

    #[test]
    fn test_descending_reverses_order() {
        let records = vec![row(1, "b"), row(2, "c"), row(3, "a")];
        let visible = visible_slice(
            &records,
            &SortDirective::descending("name"),
            PageWindow::default(),
        );
        let ids: Vec<i64> = visible.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![2, 1, 3]);
    }

    #[test]
    fn test_page_past_end_is_empty() {
        let records: Vec<Row> = (0..5).map(|i| row(i, "x")).collect();
        let window = PageWindow::new(100, 10).unwrap();
        assert!(visible_slice(&records, &SortDirective::ascending("id"), window).is_empty());
    }

    #[test]
    fn test_empty_input() {
        let records: Vec<Row> = Vec::new();
        assert!(visible_slice(&records, &SortDirective::ascending("id"), PageWindow::default())
            .is_empty());
    }

    #[test]
    fn test_missing_values_sort_first_ascending_and_last_descending() {
        let records = vec![
            row(1, "m"),
            Row { id: 2, name: None },
            row(3, "a"),
        ];

        let asc = visible_slice(&records, &SortDirective::ascending("name"), PageWindow::default());
        assert_eq!(asc.iter().map(|r| r.id).collect::<Vec<_>>(), vec![2, 3, 1]);

        let desc =
            visible_slice(&records, &SortDirective::descending("name"), PageWindow::default());
        assert_eq!(desc.iter().map(|r| r.id).collect::<Vec<_>>(), vec![1, 3, 2]);
    }

    #[test]
    fn test_unknown_field_keeps_input_order() {
        let records = vec![row(3, "c"), row(1, "a"), row(2, "b")];
        let visible =
            visible_slice(&records, &SortDirective::ascending("nope"), PageWindow::default());
        assert_eq!(visible, records);
    }

    #[test]
    fn test_custom_comparator() {
        let records = vec![row(1, "bb"), row(2, "a"), row(3, "ccc")];
        let by_len = |a: &Row, b: &Row, _field: &str| {
            a.name.map(str::len).cmp(&b.name.map(str::len))
        };

        let visible = visible_slice_by(
            &records,
            &SortDirective::descending("name"),
            PageWindow::new(0, 2).unwrap(),
            by_len,
        );
        assert_eq!(visible.iter().map(|r| r.id).collect::<Vec<_>>(), vec![3, 1]);
    }

    #[test]
    fn test_second_page() {
        let records: Vec<Row> = (1..=7).map(|i| Row { id: i, name: None }).collect();
        let visible = visible_slice(
            &records,
            &SortDirective::ascending("id"),
            PageWindow::new(1, 3).unwrap(),
        );
        assert_eq!(visible.iter().map(|r| r.id).collect::<Vec<_>>(), vec![4, 5, 6]);
    }
}
