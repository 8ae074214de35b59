use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// Single active sort column and its direction.
///
/// 当前排序字段与方向（同一时间只有一个字段）。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortDirective {
    pub field: String,
    pub direction: SortDirection,
}

impl SortDirective {
    pub fn ascending(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Ascending,
        }
    }

    pub fn descending(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Descending,
        }
    }

    /// Apply the direction to a natural ascending comparison of `a` and `b`.
    pub(crate) fn order<T, F>(&self, a: &T, b: &T, compare: F) -> Ordering
    where
        F: Fn(&T, &T, &str) -> Ordering,
    {
        match self.direction {
            SortDirection::Ascending => compare(a, b, &self.field),
            SortDirection::Descending => compare(b, a, &self.field),
        }
    }
}

/// React to a user clicking a column header.
///
/// Clicking the active column flips its direction; clicking another column
/// makes it active in ascending order.
pub fn request_sort(current: &SortDirective, field: &str) -> SortDirective {
    if current.field == field {
        SortDirective {
            field: current.field.clone(),
            direction: current.direction.flipped(),
        }
    } else {
        SortDirective::ascending(field)
    }
}
