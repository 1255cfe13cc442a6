pub mod assignments;
pub mod bulk;
pub mod context;
pub mod operations;
pub mod upsert;

pub use assignments::*;
pub use bulk::*;
pub use context::*;
pub use operations::*;
pub use upsert::*;
