//! Row-set controller shared by every list screen.
//!
//! 列表页共享的行集合控制器：排序、分页、选择。
//!
//! Everything here is a pure function of its inputs. The current sort, page
//! and selection are owned by the calling screen and threaded through.

mod field;
mod page;
mod selection;
mod slice;
mod sort;

pub use field::{FieldValue, TableRecord};
pub use page::{PageWindow, PageWindowError};
pub use selection::{
    select_all, select_all_by, select_all_state, select_none, toggle_select_all,
    toggle_selection, SelectAllState, Selection,
};
pub use slice::{default_compare, visible_slice, visible_slice_by};
pub use sort::{request_sort, SortDirection, SortDirective};
