// Application pipeline: score a (resume, skills) pair with the matching engine and
// persist one immutable application record per apply.

pub mod handlers;
pub mod pipeline;
pub mod store;
