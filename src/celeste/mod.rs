pub mod bucket;
pub mod difficulty;
pub mod error;
pub mod list;
pub mod model;
pub mod recap;
pub mod sort;
pub mod stats;
