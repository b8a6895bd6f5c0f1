use crate::InstanceOption;
use derive_more::{Display, Error};

/// A result from validating instance options.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// An error describing a malformed instance option. Raised at registration
/// time, before any entry is stored, so a whole configuration tree can be
/// checked up front.
///
/// Shape constraints the type system already enforces (a missing
/// constructible, an unknown field, a non-list dependency sequence) have no
/// runtime variant here; what remains are the cross-field invariants a
/// dynamically assembled configuration can still get wrong.
#[derive(Debug, Display, Error)]
pub enum ConfigError {
    /// A dependency supplies neither a concrete value nor an internal key.
    #[display(
        fmt = "dependency {} of `{}` must supply a concrete value or an internal key",
        index,
        key
    )]
    MissingDependencySource { key: String, index: usize },

    /// A dependency supplies both a concrete value and an internal key.
    #[display(
        fmt = "dependency {} of `{}` cannot supply both a concrete value and an internal key",
        index,
        key
    )]
    ConflictingDependencySource { key: String, index: usize },

    /// A destructuring dependency does not name the field it fills.
    #[display(
        fmt = "dependency {} of `{}` must be named when it is injected by destructuring",
        index,
        key
    )]
    MissingDependencyName { key: String, index: usize },

    /// A destructuring dependency names an empty field.
    #[display(
        fmt = "dependency {} of `{}` has an empty field name",
        index,
        key
    )]
    EmptyDependencyName { key: String, index: usize },

    /// A positional dependency carries a field name.
    #[display(
        fmt = "dependency {} of `{}` must not be named when it is injected positionally (found `{}`)",
        index,
        key,
        name
    )]
    UnexpectedDependencyName {
        key: String,
        index: usize,
        name: String,
    },
}

/// Validates a whole batch of options. The batch is rejected as a unit: a
/// single malformed option means nothing from the batch is stored.
pub fn validate_options(options: &[InstanceOption]) -> ConfigResult<()> {
    for option in options {
        option.validate()?;
    }
    Ok(())
}
