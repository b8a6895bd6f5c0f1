mod dependency;
mod instance;
mod parameter;
mod validate;

pub use dependency::*;
pub use instance::*;
pub use parameter::*;
pub use validate::*;
