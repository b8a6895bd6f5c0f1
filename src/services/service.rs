#![allow(clippy::used_underscore_binding)]

use crate::ArgumentId;
use derive_more::{Display, Error};
use std::any::{Any, TypeId};

#[cfg(feature = "arc")]
mod types {
    use crate::InjectError;
    use std::{any::Any, sync::Arc};

    /// A reference-counted pointer holding a service. The pointer type is
    /// determined by the feature flags passed to this crate.
    pub type Svc<T> = Arc<T>;

    /// A reference-counted service pointer holding an instance of `dyn Any`.
    pub type DynSvc = Arc<dyn Any + Send + Sync>;

    /// A result from attempting to resolve a registered instance.
    pub type InjectResult<T> = Result<T, InjectError>;

    /// Implemented automatically on types that are capable of being a service.
    pub trait Service: Any + Send + Sync {}
    impl<T: ?Sized + Any + Send + Sync> Service for T {}
}

#[cfg(feature = "rc")]
mod types {
    use crate::InjectError;
    use std::{any::Any, rc::Rc};

    /// A reference-counted pointer holding a service. The pointer type is
    /// determined by the feature flags passed to this crate.
    pub type Svc<T> = Rc<T>;

    /// A reference-counted service pointer holding an instance of `dyn Any`.
    pub type DynSvc = Rc<dyn Any>;

    /// A result from attempting to resolve a registered instance.
    pub type InjectResult<T> = Result<T, InjectError>;

    /// Implemented automatically on types that are capable of being a service.
    pub trait Service: Any {}
    impl<T: ?Sized + Any> Service for T {}
}

pub use types::*;

/// Type information about the service a constructible produces.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub struct ServiceInfo {
    id: TypeId,
    name: &'static str,
}

impl ServiceInfo {
    #[must_use]
    pub fn of<T: ?Sized + Any>() -> Self {
        ServiceInfo {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    #[must_use]
    pub fn id(&self) -> TypeId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }
}

/// An error that occurred while resolving or destroying a registered
/// instance.
#[derive(Debug, Display, Error)]
pub enum InjectError {
    /// No entry is registered under the requested key.
    #[display(fmt = "`{}` instance not found", key)]
    KeyNotFound { key: String },

    /// A dependency cycle was detected while constructing an instance.
    #[display(
        fmt = "a dependency cycle was detected while constructing `{}` [{}]",
        key,
        "fmt_cycle(cycle)"
    )]
    CycleDetected {
        key: String,
        /// The chain of keys that were visited while constructing this
        /// instance.
        cycle: Vec<String>,
    },

    /// A constructible requested an argument its wiring does not supply.
    #[display(fmt = "no argument was supplied at {}", id)]
    MissingArgument { id: ArgumentId },

    /// A constructible requested an argument as the wrong type.
    #[display(
        fmt = "the argument at {} is not a `{}`",
        id,
        "requested.name()"
    )]
    ArgumentTypeMismatch {
        id: ArgumentId,
        requested: ServiceInfo,
    },

    /// The instance stored under a key is not of the requested type.
    #[display(
        fmt = "the instance stored for `{}` is not a `{}`",
        key,
        "requested.name()"
    )]
    InvalidInstanceType {
        key: String,
        requested: ServiceInfo,
    },

    /// An unexpected error has occurred. This is usually caused by a bug in
    /// the library itself.
    #[display(
        fmt = "an unexpected error occurred (please report this): {}",
        _0
    )]
    InternalError(#[error(ignore)] String),
}

fn fmt_cycle(cycle: &[String]) -> String {
    let mut joined = String::new();
    for item in cycle.iter().rev() {
        if !joined.is_empty() {
            joined.push_str(" -> ");
        }
        joined.push_str(item);
    }
    joined
}
