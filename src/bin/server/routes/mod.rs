pub mod stats;
pub mod top_golden_list;
