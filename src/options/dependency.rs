use crate::{ConfigError, ConfigResult, DynSvc, InjectType, Service, Svc};

/// The wiring for one constructor argument.
///
/// A dependency supplies its value from exactly one of two sources: a
/// `concrete` value injected verbatim, or an `internal` reference to another
/// registry key whose resolved instance is injected. Supplying both or
/// neither is rejected at registration time. Presence is what counts, not
/// the value itself: `0`, `false` and `""` are legitimate concrete values.
///
/// The fields are public so a configuration tree can be assembled
/// dynamically and validated as a whole; the constructors below cover the
/// common cases.
///
/// # Example
///
/// ```
/// use keyed_injector::Dependency;
///
/// // A literal value for a positional argument.
/// let door_count = Dependency::concrete(4i32);
///
/// // A reference to another registered entry, destructured into the
/// // `engine` field.
/// let engine = Dependency::internal("Engine").named("engine");
/// ```
pub struct Dependency {
    /// The destructured field name. Mandatory for destructuring injection,
    /// forbidden for positional injection.
    pub name: Option<String>,

    /// A literal value to inject verbatim.
    pub concrete: Option<DynSvc>,

    /// A registry key whose resolved instance should be injected.
    pub internal: Option<String>,
}

impl Dependency {
    /// Creates an unnamed dependency on a literal value.
    #[must_use]
    pub fn concrete<T: Service>(value: T) -> Self {
        Dependency {
            name: None,
            concrete: Some(Svc::new(value) as DynSvc),
            internal: None,
        }
    }

    /// Creates an unnamed dependency on another registry key.
    #[must_use]
    pub fn internal(key: impl Into<String>) -> Self {
        Dependency {
            name: None,
            concrete: None,
            internal: Some(key.into()),
        }
    }

    /// Assigns the field name this dependency is destructured into.
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub(crate) fn validate(
        &self,
        inject_type: InjectType,
        key: &str,
        index: usize,
    ) -> ConfigResult<()> {
        match inject_type {
            InjectType::Destructuring => match &self.name {
                None => {
                    return Err(ConfigError::MissingDependencyName {
                        key: key.to_owned(),
                        index,
                    })
                }
                Some(name) if name.is_empty() => {
                    return Err(ConfigError::EmptyDependencyName {
                        key: key.to_owned(),
                        index,
                    })
                }
                Some(_) => {}
            },
            InjectType::Parameter => {
                if let Some(name) = &self.name {
                    return Err(ConfigError::UnexpectedDependencyName {
                        key: key.to_owned(),
                        index,
                        name: name.clone(),
                    });
                }
            }
        }

        match (&self.concrete, &self.internal) {
            (Some(_), Some(_)) => {
                Err(ConfigError::ConflictingDependencySource {
                    key: key.to_owned(),
                    index,
                })
            }
            (None, None) => Err(ConfigError::MissingDependencySource {
                key: key.to_owned(),
                index,
            }),
            _ => Ok(()),
        }
    }
}
