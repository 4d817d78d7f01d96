pub mod cast;
pub mod error;
pub mod metadata;

pub use cast::*;
pub use error::*;
pub use metadata::*;
