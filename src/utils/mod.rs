pub mod paths;
pub mod timestamps;

pub use paths::{discover_log_files, validate_file_size};
pub use timestamps::{format_duration, format_log_time};
