//! Attribute access for table rows.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};

/// A single attribute value read off a record for sorting.
///
/// 用于排序的记录属性值。
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    /// The record has no value for this attribute (or the attribute is unknown).
    Missing,
    Number(f64),
    Text(&'a str),
    Time(DateTime<Utc>),
}

impl<'a> FieldValue<'a> {
    pub fn text(value: Option<&'a str>) -> Self {
        value.map_or(FieldValue::Missing, FieldValue::Text)
    }

    pub fn number(value: Option<f64>) -> Self {
        value.map_or(FieldValue::Missing, FieldValue::Number)
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, FieldValue::Missing)
    }

    fn rank(&self) -> u8 {
        match self {
            FieldValue::Missing => 0,
            FieldValue::Number(_) => 1,
            FieldValue::Text(_) => 2,
            FieldValue::Time(_) => 3,
        }
    }

    /// Natural ascending order.
    ///
    /// `Missing` sorts before every present value; values of different kinds
    /// order as `Missing < Number < Text < Time`. Numbers use the IEEE total
    /// order, text compares bytewise without case folding.
    pub fn compare(&self, other: &FieldValue<'_>) -> Ordering {
        match (self, other) {
            (FieldValue::Number(a), FieldValue::Number(b)) => a.total_cmp(b),
            (FieldValue::Text(a), FieldValue::Text(b)) => a.cmp(b),
            (FieldValue::Time(a), FieldValue::Time(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl From<f64> for FieldValue<'_> {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<i64> for FieldValue<'_> {
    fn from(value: i64) -> Self {
        FieldValue::Number(value as f64)
    }
}

impl<'a> From<&'a str> for FieldValue<'a> {
    fn from(value: &'a str) -> Self {
        FieldValue::Text(value)
    }
}

impl From<DateTime<Utc>> for FieldValue<'_> {
    fn from(value: DateTime<Utc>) -> Self {
        FieldValue::Time(value)
    }
}

/// A row that can be shown in a sortable, selectable table.
///
/// 可在表格中排序、分页、选择的记录。
pub trait TableRecord {
    type Id: Clone + PartialEq;

    /// Stable unique identifier of the row.
    fn id(&self) -> Self::Id;

    /// Read an attribute by name. Unknown names yield [`FieldValue::Missing`].
    fn field(&self, name: &str) -> FieldValue<'_>;
}
