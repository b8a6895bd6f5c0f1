use crate::{DynSvc, InjectError, InjectResult, Service, ServiceInfo, Svc};
use derive_more::Display;

/// Identifies one requested constructor argument in error messages.
#[derive(Clone, Debug, Display, PartialEq, Eq)]
pub enum ArgumentId {
    /// A positional argument, identified by its declaration index.
    #[display(fmt = "position {}", _0)]
    Position(usize),

    /// A destructured argument, identified by its field name.
    #[display(fmt = "name `{}`", _0)]
    Name(String),
}

/// The resolved arguments handed to a constructible.
///
/// The variant mirrors the inject type of the entry being constructed:
/// positional injection produces an ordered list, destructuring injection
/// produces a set of named fields. Field order follows declaration order so
/// construction is deterministic.
///
/// # Example
///
/// ```
/// use keyed_injector::{Arguments, InjectResult, Svc};
///
/// struct Engine;
///
/// struct Car {
///     engine: Svc<Engine>,
///     door_count: i32,
/// }
///
/// fn build_car(arguments: Arguments) -> InjectResult<Car> {
///     Ok(Car {
///         engine: arguments.named("engine")?,
///         door_count: arguments.named_cloned("doorCount")?,
///     })
/// }
/// ```
pub enum Arguments {
    /// Ordered argument values for positional injection.
    Positional(Vec<DynSvc>),

    /// Name/value pairs for destructuring injection, in declaration order.
    Named(Vec<(String, DynSvc)>),
}

impl Arguments {
    /// Gets the argument at the given declaration index as a service
    /// pointer. Fails if the arguments are named rather than positional, if
    /// no argument exists at that index, or if the argument is not of the
    /// requested type.
    pub fn positional<T: Service>(&self, index: usize) -> InjectResult<Svc<T>> {
        let value = match self {
            Arguments::Positional(values) => values.get(index).cloned(),
            Arguments::Named(_) => None,
        };
        Self::downcast(value, ArgumentId::Position(index))
    }

    /// Gets the argument with the given field name as a service pointer.
    /// Fails if the arguments are positional rather than named, if no field
    /// with that name exists, or if the argument is not of the requested
    /// type.
    pub fn named<T: Service>(&self, name: &str) -> InjectResult<Svc<T>> {
        let value = match self {
            Arguments::Positional(_) => None,
            Arguments::Named(fields) => fields
                .iter()
                .find(|(field, _)| field == name)
                .map(|(_, value)| value.clone()),
        };
        Self::downcast(value, ArgumentId::Name(name.to_owned()))
    }

    /// Like [`Arguments::positional`], but clones the value out of its
    /// service pointer. Convenient for plain data arguments.
    pub fn positional_cloned<T: Service + Clone>(
        &self,
        index: usize,
    ) -> InjectResult<T> {
        self.positional::<T>(index).map(|value| (*value).clone())
    }

    /// Like [`Arguments::named`], but clones the value out of its service
    /// pointer.
    pub fn named_cloned<T: Service + Clone>(
        &self,
        name: &str,
    ) -> InjectResult<T> {
        self.named::<T>(name).map(|value| (*value).clone())
    }

    /// The number of arguments supplied.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Arguments::Positional(values) => values.len(),
            Arguments::Named(fields) => fields.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn downcast<T: Service>(
        value: Option<DynSvc>,
        id: ArgumentId,
    ) -> InjectResult<Svc<T>> {
        let value = match value {
            Some(value) => value,
            None => return Err(InjectError::MissingArgument { id }),
        };
        value
            .downcast()
            .map_err(|_| InjectError::ArgumentTypeMismatch {
                id,
                requested: ServiceInfo::of::<T>(),
            })
    }
}
