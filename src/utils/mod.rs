pub mod error;
pub mod formats;
pub mod fs;

pub use error::{PrepError, PrepResult, UsageError};
pub use formats::{ImageFormat, format_from_path};
pub use fs::{ensure_dir, get_file_size, human_size};
