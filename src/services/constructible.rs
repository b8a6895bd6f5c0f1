use crate::{Arguments, DynSvc, InjectResult, Service, ServiceInfo, Svc};
use std::fmt::{Debug, Formatter};

#[cfg(feature = "arc")]
type BoxedFactory = Box<dyn Fn(Arguments) -> InjectResult<DynSvc> + Send + Sync>;

#[cfg(feature = "rc")]
type BoxedFactory = Box<dyn Fn(Arguments) -> InjectResult<DynSvc>>;

/// An opaque factory for one service type. The container does not inspect a
/// constructible beyond invoking it with the [`Arguments`] its wiring
/// resolves to; the produced type's name doubles as the default registration
/// key.
///
/// # Example
///
/// ```
/// use keyed_injector::{Arguments, Constructible, InjectResult};
///
/// struct Engine {
///     power: i32,
/// }
///
/// impl Engine {
///     fn build(arguments: Arguments) -> InjectResult<Self> {
///         Ok(Engine {
///             power: arguments.positional_cloned(0)?,
///         })
///     }
/// }
///
/// let constructible = Constructible::new(Engine::build);
/// assert_eq!(
///     std::any::type_name::<Engine>(),
///     constructible.info().name()
/// );
/// ```
pub struct Constructible {
    info: ServiceInfo,
    factory: BoxedFactory,
}

impl Constructible {
    /// Creates a constructible from a factory function. The factory receives
    /// the resolved arguments and may fail, for instance when an argument is
    /// missing or of the wrong type.
    #[must_use]
    pub fn new<T, F>(factory: F) -> Self
    where
        T: Service,
        F: Service + Fn(Arguments) -> InjectResult<T>,
    {
        Constructible {
            info: ServiceInfo::of::<T>(),
            factory: Box::new(move |arguments| {
                let instance = Svc::new(factory(arguments)?);
                Ok(instance as DynSvc)
            }),
        }
    }

    /// Type information about the service this constructible produces.
    #[must_use]
    pub fn info(&self) -> ServiceInfo {
        self.info
    }

    pub(crate) fn construct(
        &self,
        arguments: Arguments,
    ) -> InjectResult<DynSvc> {
        (self.factory)(arguments)
    }
}

impl Debug for Constructible {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Constructible")
            .field("info", &self.info)
            .finish()
    }
}

/// Defines a conversion into a [`Constructible`]. This trait is
/// automatically implemented for all matching factory functions.
pub trait IntoConstructible<T>
where
    T: Service,
{
    /// Wraps this factory into a [`Constructible`].
    ///
    /// # Example
    ///
    /// ```
    /// use keyed_injector::{Arguments, InjectResult, IntoConstructible};
    ///
    /// struct Oil;
    ///
    /// let constructible =
    ///     (|_: Arguments| -> InjectResult<Oil> { Ok(Oil) }).constructible();
    /// assert_eq!(
    ///     std::any::type_name::<Oil>(),
    ///     constructible.info().name()
    /// );
    /// ```
    #[must_use]
    fn constructible(self) -> Constructible;
}

impl<T, F> IntoConstructible<T> for F
where
    T: Service,
    F: Service + Fn(Arguments) -> InjectResult<T>,
{
    fn constructible(self) -> Constructible {
        Constructible::new(self)
    }
}
