pub mod filter;
pub mod paging;
pub mod schedule;
pub mod sort;

pub use filter::{filter_by_status, status_counts};
pub use paging::{pagination_range, PaginationState, DEFAULT_SIBLING_COUNT};
pub use schedule::ScheduleService;
pub use sort::{sort_appointments, sort_by_key};
