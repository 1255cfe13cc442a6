pub mod cleaner;
pub mod common;
pub mod mapping;
pub mod params;
pub mod template;

pub use cleaner::*;
pub use common::*;
pub use mapping::*;
pub use params::*;
pub use template::*;
