use thiserror::Error;

use super::Address;

/// Errors raised by registry mutations. Reads never fail.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("unauthorized: {caller} is not the registry owner")]
    Unauthorized { caller: Address },
}

pub type RegistryResult<T> = Result<T, RegistryError>;
