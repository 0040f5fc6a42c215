pub mod celeste;
pub mod context;
pub mod logs;
pub mod time;
