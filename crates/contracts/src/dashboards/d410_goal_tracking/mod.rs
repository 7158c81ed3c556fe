pub mod dto;
pub mod rows;

pub use dto::*;
pub use rows::build_metric_rows;
