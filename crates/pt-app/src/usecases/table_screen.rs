//! Per-screen list state: records, sort, page window and selection.
//!
//! 列表页状态：记录、排序、分页与选择，由各页面各自持有。

use std::cmp::Ordering;

use pt_core::food::Page;
use pt_core::table::{
    request_sort, select_all_state, toggle_select_all, visible_slice, visible_slice_by,
    PageWindow, PageWindowError, SelectAllState, Selection, SortDirective, TableRecord,
};

/// Holds the state a list screen threads through the row-set controller.
///
/// Created when the screen mounts and dropped with it. A server-paged screen
/// holds one backend page at a time and only sorts it locally.
pub struct TableScreen<R: TableRecord> {
    records: Vec<R>,
    sort: SortDirective,
    window: PageWindow,
    selection: Selection<R::Id>,
    server_total: Option<u64>,
}

impl<R> TableScreen<R>
where
    R: TableRecord + Clone,
{
    pub fn new(sort: SortDirective, page_size: usize) -> Result<Self, PageWindowError> {
        Ok(Self {
            records: Vec::new(),
            sort,
            window: PageWindow::new(0, page_size)?,
            selection: Selection::new(),
            server_total: None,
        })
    }

    /// Screen whose rows arrive one backend page at a time.
    pub fn server_paged(sort: SortDirective, page_size: usize) -> Result<Self, PageWindowError> {
        let mut screen = Self::new(sort, page_size)?;
        screen.server_total = Some(0);
        Ok(screen)
    }

    pub fn is_server_paged(&self) -> bool {
        self.server_total.is_some()
    }

    /// Install the backend page for the current window.
    pub fn replace_page(&mut self, page: Page<R>) {
        self.records = page.content;
        self.server_total = Some(page.total_elements);
    }

    /// Size of the whole collection, including rows on other backend pages.
    pub fn total(&self) -> usize {
        match self.server_total {
            Some(total) => usize::try_from(total).unwrap_or(usize::MAX),
            None => self.records.len(),
        }
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }

    /// Swap in a freshly fetched collection.
    ///
    /// The page resets to the first one when the current window no longer
    /// overlaps the collection. Selection is left to the caller.
    pub fn replace_records(&mut self, records: Vec<R>) {
        self.records = records;
        if self.window.page_index() > 0 && self.window.is_past_end(self.total()) {
            self.window = self.window.first_page();
        }
    }

    pub fn sort(&self) -> &SortDirective {
        &self.sort
    }

    /// Header click: same column flips direction, another column sorts ascending.
    pub fn request_sort(&mut self, field: &str) {
        self.sort = request_sort(&self.sort, field);
    }

    pub fn window(&self) -> PageWindow {
        self.window
    }

    pub fn set_page(&mut self, page_index: usize) {
        self.window = self.window.with_page(page_index);
    }

    /// Changing rows-per-page always returns to the first page.
    pub fn set_page_size(&mut self, page_size: usize) -> Result<(), PageWindowError> {
        self.window = PageWindow::new(0, page_size)?;
        Ok(())
    }

    pub fn first_page(&mut self) {
        self.window = self.window.first_page();
    }

    pub fn page_count(&self) -> usize {
        self.window.page_count(self.total())
    }

    pub fn selection(&self) -> &Selection<R::Id> {
        &self.selection
    }

    /// The loaded row an edit opens on: the earliest still-checked id.
    pub fn selected_record(&self) -> Option<&R> {
        let id = self.selection.first()?;
        self.records.iter().find(|record| record.id() == *id)
    }

    pub fn toggle(&mut self, id: R::Id) {
        self.selection = self.selection.toggle(id);
    }

    /// Header checkbox: selects across the whole collection, not just the page.
    pub fn toggle_all(&mut self, checked: bool) {
        self.selection = toggle_select_all(checked, &self.records);
    }

    pub fn clear_selection(&mut self) {
        self.selection = Selection::new();
    }

    pub fn select_all_state(&self) -> SelectAllState {
        select_all_state(self.selection.len(), self.records.len())
    }

    pub fn visible(&self) -> Vec<R> {
        visible_slice(&self.records, &self.sort, self.local_window())
    }

    pub fn visible_by<F>(&self, compare: F) -> Vec<R>
    where
        F: Fn(&R, &R, &str) -> Ordering,
    {
        visible_slice_by(&self.records, &self.sort, self.local_window(), compare)
    }

    // A backend page is already windowed; only its first local page applies.
    fn local_window(&self) -> PageWindow {
        if self.server_total.is_some() {
            self.window.first_page()
        } else {
            self.window
        }
    }
}
