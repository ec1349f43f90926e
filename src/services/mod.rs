pub mod companion;
pub mod completion;
pub mod crisis;
pub mod fallback;
pub mod reporting;
