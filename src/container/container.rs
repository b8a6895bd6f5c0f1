use super::entry::RegistryEntry;
use crate::{
    validate_options, Arguments, ConfigResult, Dependency, DynSvc,
    InjectError, InjectResult, InjectType, InstanceOption,
    IntoInstanceOptions, ParameterOption, Service, ServiceInfo, Svc,
};
use std::collections::HashMap;

/// A keyed dependency injection container. This holds all the bindings
/// between string keys and the constructibles that produce their instances,
/// along with the wiring used to resolve each constructible's arguments.
///
/// Instances are singletons per key: they are created lazily on the first
/// request and reused for every request after that, until they are
/// destroyed or their entry is replaced. Resolution takes `&mut self`, so a
/// container shared across threads needs external synchronization.
///
/// An entry's slot is vacated while its instance is being constructed;
/// re-entering a vacated slot through an `internal` reference means the
/// wiring is cyclic, and resolution fails fast with the chain of keys
/// involved rather than recursing without bound.
pub struct Container {
    entries: HashMap<String, Option<RegistryEntry>>,
}

impl Container {
    /// Creates an empty container.
    #[must_use]
    pub fn new() -> Self {
        Container {
            entries: HashMap::new(),
        }
    }

    /// Creates a container and registers a batch of options. Accepts a
    /// single option, a vector, or an array.
    pub fn with_options(
        options: impl IntoInstanceOptions,
    ) -> ConfigResult<Self> {
        let mut container = Container::new();
        container.register(options)?;
        Ok(container)
    }

    /// Validates and stores a batch of options. The whole batch is
    /// validated before any entry is stored, so a single malformed option
    /// rejects the entire call. Registering a key that already exists
    /// silently replaces the prior entry, dropping any cached instance
    /// along with it.
    pub fn register(
        &mut self,
        options: impl IntoInstanceOptions,
    ) -> ConfigResult<()> {
        let options = options.into_options();
        validate_options(&options)?;
        for option in options {
            self.insert(option);
        }
        Ok(())
    }

    /// Gets the instance stored under a key, constructing it and its
    /// transitive dependencies if it has not been built yet.
    ///
    /// # Example
    ///
    /// ```
    /// use keyed_injector::{
    ///     Arguments, Constructible, Container, InjectResult, InstanceOption,
    ///     Svc,
    /// };
    ///
    /// struct Engine;
    ///
    /// let mut container = Container::with_options(
    ///     InstanceOption::new(Constructible::new(
    ///         |_: Arguments| -> InjectResult<Engine> { Ok(Engine) },
    ///     ))
    ///     .with_key("Engine"),
    /// )
    /// .unwrap();
    ///
    /// let first: Svc<Engine> = container.get("Engine").unwrap();
    /// let second: Svc<Engine> = container.get("Engine").unwrap();
    /// assert!(Svc::ptr_eq(&first, &second));
    /// ```
    pub fn get<T: Service>(&mut self, key: &str) -> InjectResult<Svc<T>> {
        let service_info = ServiceInfo::of::<T>();
        self.get_dyn(key)?.downcast().map_err(|_| {
            InjectError::InvalidInstanceType {
                key: key.to_owned(),
                requested: service_info,
            }
        })
    }

    /// Similar to [`Container::get`], but returns the type-erased service
    /// pointer the entry caches internally.
    pub fn get_dyn(&mut self, key: &str) -> InjectResult<DynSvc> {
        let slot = self.entries.get_mut(key).ok_or_else(|| {
            InjectError::KeyNotFound {
                key: key.to_owned(),
            }
        })?;

        // A vacated slot means this key is already being constructed
        // further up the stack.
        let mut entry =
            slot.take().ok_or_else(|| InjectError::CycleDetected {
                key: key.to_owned(),
                cycle: vec![key.to_owned()],
            })?;

        if let Some(instance) = entry.instance.clone() {
            *slot = Some(entry);
            tracing::trace!(key, "reusing cached instance");
            return Ok(instance);
        }

        let result = self.construct(&mut entry);

        // The entry is restored on every path so a failed construction
        // doesn't poison the container.
        let slot = self.entries.get_mut(key).ok_or_else(|| {
            InjectError::InternalError(format!(
                "the entry for `{key}` disappeared during construction"
            ))
        })?;
        *slot = Some(entry);

        match result {
            Err(InjectError::CycleDetected { mut cycle, .. }) => {
                cycle.push(key.to_owned());
                Err(InjectError::CycleDetected {
                    key: key.to_owned(),
                    cycle,
                })
            }
            result => result,
        }
    }

    /// Clears the cached instance under a key so the next request rebuilds
    /// it. Fails if the key is not registered.
    pub fn destroy_instance(&mut self, key: &str) -> InjectResult<()> {
        let entry = self
            .entries
            .get_mut(key)
            .and_then(Option::as_mut)
            .ok_or_else(|| InjectError::KeyNotFound {
                key: key.to_owned(),
            })?;
        entry.instance = None;
        tracing::debug!(key, "destroyed cached instance");
        Ok(())
    }

    /// Clears the cached instance on every entry.
    pub fn destroy_all_instances(&mut self) {
        for entry in self.entries.values_mut().flatten() {
            entry.instance = None;
        }
        tracing::debug!("destroyed all cached instances");
    }

    fn insert(&mut self, option: InstanceOption) {
        let InstanceOption {
            key,
            constructible,
            parameter,
        } = option;
        let key = key
            .unwrap_or_else(|| constructible.info().name().to_owned());
        let parameter = parameter.unwrap_or_default();
        tracing::debug!(
            key = %key,
            service = constructible.info().name(),
            "registered constructible"
        );

        let entry = RegistryEntry {
            key,
            constructible,
            parameter,
            instance: None,
        };
        let replaced =
            self.entries.insert(entry.key.clone(), Some(entry));
        if replaced.is_some() {
            tracing::debug!("replaced a previously registered entry");
        }
    }

    fn construct(
        &mut self,
        entry: &mut RegistryEntry,
    ) -> InjectResult<DynSvc> {
        let arguments = self.build_arguments(&entry.parameter)?;
        let instance = entry.constructible.construct(arguments)?;
        entry.instance = Some(instance.clone());
        tracing::debug!(key = %entry.key, "constructed instance");
        Ok(instance)
    }

    fn build_arguments(
        &mut self,
        parameter: &ParameterOption,
    ) -> InjectResult<Arguments> {
        match parameter.inject_type {
            InjectType::Parameter => {
                let mut values =
                    Vec::with_capacity(parameter.dependencies.len());
                for dependency in &parameter.dependencies {
                    values.push(self.resolve_dependency(dependency)?);
                }
                Ok(Arguments::Positional(values))
            }
            InjectType::Destructuring => {
                let mut fields =
                    Vec::with_capacity(parameter.dependencies.len());
                for dependency in &parameter.dependencies {
                    // Validation rejects unnamed destructuring dependencies
                    // before they are stored.
                    let name =
                        dependency.name.clone().ok_or_else(|| {
                            InjectError::InternalError(
                                "a stored destructuring dependency has no \
                                 field name"
                                    .to_owned(),
                            )
                        })?;
                    fields
                        .push((name, self.resolve_dependency(dependency)?));
                }
                Ok(Arguments::Named(fields))
            }
        }
    }

    fn resolve_dependency(
        &mut self,
        dependency: &Dependency,
    ) -> InjectResult<DynSvc> {
        if let Some(value) = &dependency.concrete {
            return Ok(value.clone());
        }

        match &dependency.internal {
            Some(key) => self.get_dyn(key),
            None => Err(InjectError::InternalError(
                "a stored dependency has neither a concrete value nor an \
                 internal key"
                    .to_owned(),
            )),
        }
    }
}

impl Default for Container {
    fn default() -> Self {
        Container::new()
    }
}
