//! Utility modules shared by the fetchers and the pages
//!
//! - Dates: timestamp normalization and report-date handling
//! - Text: title casing and accent stripping
//! - Format: digit grouping for displayed counts

pub mod dates;
pub mod format;
pub mod text;

// Re-export commonly used helpers
pub use dates::{local_date, parse_report_date, should_use_yesterday, ts_to_date, NO_INFORMATION};
pub use format::group_thousands;
pub use text::{first_letter, strip_accents, title_case};
