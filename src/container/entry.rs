use crate::{Constructible, DynSvc, ParameterOption};

/// The stored record for one key: the constructible, its normalized wiring,
/// and the lazily populated instance cache.
pub(crate) struct RegistryEntry {
    pub(crate) key: String,
    pub(crate) constructible: Constructible,
    pub(crate) parameter: ParameterOption,
    pub(crate) instance: Option<DynSvc>,
}
