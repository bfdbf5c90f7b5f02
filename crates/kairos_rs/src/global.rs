//! Process-wide [`Kairos`] instance for the free functions in
//! [`convenience`](crate::convenience).

use std::sync::OnceLock;

use kairos_config::KairosConfig;

use crate::error::KairosError;
use crate::facade::Kairos;

static KAIROS: OnceLock<Kairos> = OnceLock::new();

/// Initialize the global instance. Fails if it already exists.
pub fn init(config: KairosConfig) -> Result<(), KairosError> {
    if KAIROS.get().is_some() {
        return Err(KairosError::AlreadyInitialized);
    }
    let kairos = Kairos::new(config)?;
    KAIROS
        .set(kairos)
        .map_err(|_| KairosError::AlreadyInitialized)
}

pub fn is_initialized() -> bool {
    KAIROS.get().is_some()
}

pub(crate) fn kairos() -> Result<&'static Kairos, KairosError> {
    KAIROS.get().ok_or(KairosError::NotInitialized)
}
