pub mod loader;
pub mod normalize;
pub mod readers;

pub use loader::{load_bytes, load_default, load_path, DEFAULT_DATA_FILE};
pub use normalize::{normalize, normalize_row};
pub use readers::{CellValue, RawRow, TabularReader};

pub mod prelude {
    pub use super::readers::{CellValue, RawRow, TabularReader};
    pub use ci_core::{Dataset, Error, Result};
}
