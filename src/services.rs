mod arguments;
mod constructible;
mod service;

pub use arguments::*;
pub use constructible::*;
pub use service::*;
