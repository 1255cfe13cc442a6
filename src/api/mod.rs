pub mod ocapi;
pub mod request;
pub mod response;
pub mod token;
pub mod traits;

pub use ocapi::*;
pub use response::*;
pub use traits::*;
