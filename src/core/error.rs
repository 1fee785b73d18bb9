use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Connection attempts exhausted after {attempts} tries, can't connect: {last_error}")]
    ConnectionExhausted { attempts: usize, last_error: String },

    #[error("Error parsing '{0}': invalid xname format.")]
    InvalidXname(String),

    #[error("Key {0} does not exist")]
    NotFound(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("Backend error: {0}")]
    Backend(String),

    #[error("Lock error: {0}")]
    LockError(String),
}

impl StoreError {
    /// `true` when the requested key was absent, as opposed to an I/O or codec failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;

impl<T> From<std::sync::PoisonError<T>> for StoreError {
    fn from(err: std::sync::PoisonError<T>) -> Self {
        Self::LockError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_is_distinguishable() {
        assert!(StoreError::NotFound("/pcs/powerstate/x0".into()).is_not_found());
        assert!(!StoreError::Backend("connection reset".into()).is_not_found());
    }

    #[test]
    fn test_messages() {
        let err = StoreError::InvalidXname("bogus".into());
        assert_eq!(err.to_string(), "Error parsing 'bogus': invalid xname format.");

        let err = StoreError::NotFound("/powerstate/x0c0s1b0n0".into());
        assert_eq!(err.to_string(), "Key /powerstate/x0c0s1b0n0 does not exist");
    }
}
