use crate::{ConfigResult, Constructible, ParameterOption};

/// One registration input: a constructible plus the key and wiring it is
/// stored under.
///
/// # Example
///
/// ```
/// use keyed_injector::{
///     Arguments, Constructible, Dependency, InjectResult, InstanceOption,
///     ParameterOption,
/// };
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
/// let option = InstanceOption::new(Constructible::new(Engine::build))
///     .with_key("Engine")
///     .with_parameter(ParameterOption::positional(vec![
///         Dependency::concrete(120i32),
///     ]));
/// assert!(option.validate().is_ok());
/// ```
pub struct InstanceOption {
    /// The key the entry is stored under. Defaults to the constructible's
    /// declared name.
    pub key: Option<String>,

    /// The factory invoked to produce the instance.
    pub constructible: Constructible,

    /// The wiring descriptor. Defaults to positional injection with no
    /// dependencies.
    pub parameter: Option<ParameterOption>,
}

impl InstanceOption {
    /// Creates an option with no explicit key and no wiring; both are
    /// filled with their defaults at registration time.
    #[must_use]
    pub fn new(constructible: Constructible) -> Self {
        InstanceOption {
            key: None,
            constructible,
            parameter: None,
        }
    }

    /// Stores the entry under an explicit key instead of the
    /// constructible's declared name.
    #[must_use]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Sets the wiring descriptor for the constructible.
    #[must_use]
    pub fn with_parameter(mut self, parameter: ParameterOption) -> Self {
        self.parameter = Some(parameter);
        self
    }

    /// Checks the dynamic shape invariants of this option. Called for every
    /// option in a batch before any entry is stored; hosts can also call it
    /// directly to validate a configuration tree up front.
    pub fn validate(&self) -> ConfigResult<()> {
        if let Some(parameter) = &self.parameter {
            parameter.validate(self.resolved_key())?;
        }
        Ok(())
    }

    /// The key this option will be stored under: the explicit key if one
    /// was supplied, otherwise the constructible's declared name.
    #[must_use]
    pub fn resolved_key(&self) -> &str {
        self.key
            .as_deref()
            .unwrap_or_else(|| self.constructible.info().name())
    }
}

/// A conversion into a batch of instance options. Registration accepts a
/// single option, a vector, or an array through this trait, mirroring the
/// shapes a host configuration naturally produces.
pub trait IntoInstanceOptions {
    /// Converts this value into the batch of options it represents.
    fn into_options(self) -> Vec<InstanceOption>;
}

impl IntoInstanceOptions for InstanceOption {
    fn into_options(self) -> Vec<InstanceOption> {
        vec![self]
    }
}

impl IntoInstanceOptions for Vec<InstanceOption> {
    fn into_options(self) -> Vec<InstanceOption> {
        self
    }
}

impl<const N: usize> IntoInstanceOptions for [InstanceOption; N] {
    fn into_options(self) -> Vec<InstanceOption> {
        self.into_iter().collect()
    }
}
