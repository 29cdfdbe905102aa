pub mod error;
pub mod factory;
pub mod registry;

pub use error::*;
pub use factory::*;
pub use registry::*;
