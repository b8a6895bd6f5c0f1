mod container;
mod entry;

pub use container::*;
