// Job catalog: posting, listing and lookup. The matching pipeline reads a job's
// required-skills text from here when the caller does not supply it.

pub mod catalog;
pub mod handlers;
