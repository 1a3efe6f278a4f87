pub mod walker;

pub use walker::{WalkOptions, WalkSummary, Walker};
