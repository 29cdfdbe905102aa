pub mod detector;
pub mod error;
pub mod snapshot;

pub use detector::*;
pub use error::*;
pub use snapshot::*;
