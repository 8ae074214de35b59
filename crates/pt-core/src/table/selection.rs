use super::field::TableRecord;

/// Checked row identifiers, in click order.
///
/// 已勾选的行 ID（按点击顺序）。
///
/// Every operation returns a new selection; an existing value is never
/// modified in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection<Id> {
    ids: Vec<Id>,
}

impl<Id> Default for Selection<Id> {
    fn default() -> Self {
        Self { ids: Vec::new() }
    }
}

impl<Id: Clone + PartialEq> Selection<Id> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a selection from ids, keeping the first occurrence of duplicates.
    pub fn from_ids(ids: impl IntoIterator<Item = Id>) -> Self {
        let mut unique: Vec<Id> = Vec::new();
        for id in ids {
            if !unique.contains(&id) {
                unique.push(id);
            }
        }
        Self { ids: unique }
    }

    /// Append `id` if absent, otherwise remove it by value.
    pub fn toggle(&self, id: Id) -> Self {
        let mut ids = self.ids.clone();
        match ids.iter().position(|existing| *existing == id) {
            Some(index) => {
                ids.remove(index);
            }
            None => ids.push(id),
        }
        Self { ids }
    }

    pub fn contains(&self, id: &Id) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// The earliest selected id still checked.
    pub fn first(&self) -> Option<&Id> {
        self.ids.first()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Id> {
        self.ids.iter()
    }

    pub fn as_slice(&self) -> &[Id] {
        &self.ids
    }
}

/// Header checkbox presentation for a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectAllState {
    Unchecked,
    Indeterminate,
    Checked,
}

pub fn toggle_selection<Id: Clone + PartialEq>(id: Id, current: &Selection<Id>) -> Selection<Id> {
    current.toggle(id)
}

/// Select every record of the collection, not only the visible page.
pub fn select_all<R: TableRecord>(records: &[R]) -> Selection<R::Id> {
    select_all_by(records, R::id)
}

/// Like [`select_all`], reading the identifier through `id_of`.
pub fn select_all_by<R, Id, F>(records: &[R], id_of: F) -> Selection<Id>
where
    Id: Clone + PartialEq,
    F: Fn(&R) -> Id,
{
    Selection {
        ids: records.iter().map(id_of).collect(),
    }
}

pub fn select_none<Id: Clone + PartialEq>() -> Selection<Id> {
    Selection::new()
}

/// Header checkbox change: checked selects the whole collection, unchecked clears.
pub fn toggle_select_all<R: TableRecord>(checked: bool, records: &[R]) -> Selection<R::Id> {
    if checked {
        select_all(records)
    } else {
        select_none()
    }
}

pub fn select_all_state(selected: usize, rows: usize) -> SelectAllState {
    if rows > 0 && selected == rows {
        SelectAllState::Checked
    } else if selected > 0 && selected < rows {
        SelectAllState::Indeterminate
    } else {
        SelectAllState::Unchecked
    }
}
