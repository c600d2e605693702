pub mod error;
pub mod query;
pub mod storage;
pub mod types;
pub mod views;

pub use error::Error;
pub use query::{FilterCriteria, SortSpec};
pub use storage::{DatasetStore, SessionId};
pub use types::{ArticleRecord, Dataset};

pub type Result<T> = std::result::Result<T, Error>;

pub mod prelude {
    pub use crate::query::{self, FilterCriteria, SortSpec};
    pub use crate::types::{ArticleRecord, Dataset};
    pub use crate::{Error, Result};
}
