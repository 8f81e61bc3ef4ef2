pub mod dates;
pub mod error;
pub mod types;

pub use error::Error;
pub use types::{dedup_by_link, Digest, Item, Lang};

pub type Result<T> = std::result::Result<T, Error>;

pub mod prelude {
    pub use super::types::{Digest, Item, Lang};
    pub use super::{Error, Result};
}
