pub mod import;
pub mod list;
pub mod recap;
pub mod stats;
