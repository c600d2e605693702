pub mod backends;

pub use backends::*;

pub mod prelude {
    pub use super::backends::*;
    pub use ci_core::{DatasetStore, SessionId};
}
