use crate::{ConfigResult, Dependency};

/// Selects how resolved dependencies are handed to a constructible.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum InjectType {
    /// Arguments are passed as an ordered positional list; position is
    /// implicit from declaration order.
    Parameter,

    /// Arguments are passed as a set of named fields; each dependency names
    /// the field it is destructured into.
    Destructuring,
}

impl Default for InjectType {
    fn default() -> Self {
        InjectType::Parameter
    }
}

/// The wiring descriptor for a constructible: an inject type plus the
/// dependencies it applies to, one per constructor argument.
///
/// Both fields default independently, so a partially specified descriptor
/// can be completed with struct update syntax:
///
/// ```
/// use keyed_injector::{InjectType, ParameterOption};
///
/// let parameter = ParameterOption {
///     inject_type: InjectType::Destructuring,
///     ..ParameterOption::default()
/// };
/// assert!(parameter.dependencies.is_empty());
/// ```
#[derive(Default)]
pub struct ParameterOption {
    pub inject_type: InjectType,
    pub dependencies: Vec<Dependency>,
}

impl ParameterOption {
    /// Creates a positional wiring descriptor; each dependency fills the
    /// argument slot matching its declaration index.
    #[must_use]
    pub fn positional(dependencies: Vec<Dependency>) -> Self {
        ParameterOption {
            inject_type: InjectType::Parameter,
            dependencies,
        }
    }

    /// Creates a destructuring wiring descriptor; each dependency must name
    /// the field it fills.
    #[must_use]
    pub fn destructuring(dependencies: Vec<Dependency>) -> Self {
        ParameterOption {
            inject_type: InjectType::Destructuring,
            dependencies,
        }
    }

    pub(crate) fn validate(&self, key: &str) -> ConfigResult<()> {
        for (index, dependency) in self.dependencies.iter().enumerate() {
            dependency.validate(self.inject_type, key, index)?;
        }
        Ok(())
    }
}
