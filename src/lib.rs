//! Keyed runtime dependency injection.
//!
//! By default, instances held by the [`Container`] use thread-safe pointers.
//! This is because [`Arc<T>`](std::sync::Arc) is used to hold instances of
//! the services. This can be changed to [`Rc<T>`](std::rc::Rc) by disabling
//! default features and enabling the "rc" feature:
//!
//! ```text
//! [dependencies.keyed_injector]
//! version = "*" # Replace with the version you want to use
//! default-features = false
//! features = ["rc"]
//! ```
//!
//! # Wiring by key (rather than by type)
//!
//! Entries in the container are registered under string keys and refer to
//! each other by those keys. This means the whole dependency graph can be
//! driven by configuration assembled at runtime: read a config when your
//! application starts, decide which constructibles to register under which
//! keys, and let the container wire them together. The container never
//! inspects a constructible beyond invoking it, so what it produces is
//! entirely up to the host.
//!
//! Each entry declares its constructor arguments as a list of dependencies.
//! A dependency is either *concrete* (a literal value injected verbatim) or
//! *internal* (a reference to another registered key, resolved recursively).
//! How the resolved values are handed to the constructible is the entry's
//! *inject type*:
//!
//! - **Positional** ([`InjectType::Parameter`]): arguments form an ordered
//!   list; each dependency fills the slot matching its declaration index.
//! - **Destructuring** ([`InjectType::Destructuring`]): arguments form a set
//!   of named fields; each dependency names the field it fills.
//!
//! # Instance lifetimes
//!
//! Every instance is a singleton per key. It is created only the first time
//! its key is requested, then that single instance is reused for each future
//! request. [`Container::destroy_instance`] clears one cached instance so
//! the next request rebuilds it, and [`Container::destroy_all_instances`]
//! clears them all. Re-registering a key replaces the whole entry, dropping
//! any cached instance along with it.
//!
//! # Validation
//!
//! Registration validates a whole batch of options before storing any of
//! them, so a malformed configuration is rejected up front with a
//! [`ConfigError`] describing the offending dependency, and a single bad
//! option rejects the entire batch. Dependency cycles are not a
//! registration error (the referenced key may legitimately be registered
//! later); they are detected during resolution instead, which fails fast
//! with the chain of keys involved.
//!
//! # Example
//!
//! ```
//! use keyed_injector::{
//!     Arguments, Constructible, Container, Dependency, InjectResult,
//!     InstanceOption, ParameterOption, Svc,
//! };
//! use std::error::Error;
//!
//! struct Engine {
//!     power: i32,
//! }
//!
//! impl Engine {
//!     // A constructible is just a function from resolved arguments to an
//!     // instance. This one takes its power rating positionally.
//!     fn build(arguments: Arguments) -> InjectResult<Self> {
//!         Ok(Engine {
//!             power: arguments.positional_cloned(0)?,
//!         })
//!     }
//! }
//!
//! struct Car {
//!     engine: Svc<Engine>,
//!     door_count: i32,
//! }
//!
//! impl Car {
//!     // This one asks for its arguments by field name instead.
//!     fn build(arguments: Arguments) -> InjectResult<Self> {
//!         Ok(Car {
//!             engine: arguments.named("engine")?,
//!             door_count: arguments.named_cloned("doorCount")?,
//!         })
//!     }
//! }
//!
//! fn main() -> Result<(), Box<dyn Error>> {
//!     let mut container = Container::with_options(vec![
//!         InstanceOption::new(Constructible::new(Engine::build))
//!             .with_key("Engine")
//!             .with_parameter(ParameterOption::positional(vec![
//!                 Dependency::concrete(120i32),
//!             ])),
//!         InstanceOption::new(Constructible::new(Car::build))
//!             .with_key("Car")
//!             .with_parameter(ParameterOption::destructuring(vec![
//!                 Dependency::internal("Engine").named("engine"),
//!                 Dependency::concrete(4i32).named("doorCount"),
//!             ])),
//!     ])?;
//!
//!     // The car is built on first request, constructing its engine on the
//!     // way.
//!     let car: Svc<Car> = container.get("Car")?;
//!     assert_eq!(4, car.door_count);
//!     assert_eq!(120, car.engine.power);
//!
//!     // Instances are singletons: the same pointer is returned each time.
//!     let same: Svc<Car> = container.get("Car")?;
//!     assert!(Svc::ptr_eq(&car, &same));
//!
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::needless_pass_by_value
)]

#[cfg(not(any(feature = "arc", feature = "rc")))]
compile_error!(
    "Either the 'arc' or 'rc' feature must be enabled (but not both)."
);

#[cfg(all(feature = "arc", feature = "rc"))]
compile_error!(
    "The 'arc' and 'rc' features are mutually exclusive and cannot be enabled together."
);

mod container;
mod options;
mod services;

pub use container::*;
pub use options::*;
pub use services::*;

#[cfg(test)]
mod tests;
