use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("pedestrians must be a non-negative count (got {0})")]
    NegativePedestrians(i64),
    #[error("vehicles must be a non-negative count (got {0})")]
    NegativeVehicles(i64),
    #[error("green time must be a non-negative duration (got {0})")]
    NegativeGreenTime(i64),
    #[error("{0}")]
    ConfigIo(String),
    #[error("{0}")]
    ConfigParse(String),
    #[error("unsupported scenario format '{0}'")]
    UnsupportedConfigFormat(String),
    #[error("history store failure: {0}")]
    Storage(String),
    #[error("{0}")]
    Cli(String),
    #[error("internal error: {0}")]
    Internal(String),
}

/// Coarse classification mirroring the HTTP status a transport would
/// map each failure to (400 / 500).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Storage,
    Internal,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::NegativePedestrians(_)
            | Error::NegativeVehicles(_)
            | Error::NegativeGreenTime(_)
            | Error::ConfigIo(_)
            | Error::ConfigParse(_)
            | Error::UnsupportedConfigFormat(_)
            | Error::Cli(_) => ErrorKind::Validation,
            Error::Storage(_) => ErrorKind::Storage,
            Error::Internal(_) => ErrorKind::Internal,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_classify_as_validation() {
        assert_eq!(Error::NegativePedestrians(-1).kind(), ErrorKind::Validation);
        assert_eq!(Error::NegativeVehicles(-3).kind(), ErrorKind::Validation);
        assert_eq!(
            Error::Cli("missing flag".to_string()).kind(),
            ErrorKind::Validation
        );
    }

    #[test]
    fn storage_errors_classify_as_storage() {
        assert_eq!(
            Error::Storage("disk gone".to_string()).kind(),
            ErrorKind::Storage
        );
    }

    #[test]
    fn messages_name_the_violated_constraint() {
        assert_eq!(
            Error::NegativePedestrians(-5).to_string(),
            "pedestrians must be a non-negative count (got -5)"
        );
        assert_eq!(
            Error::NegativeGreenTime(-2).to_string(),
            "green time must be a non-negative duration (got -2)"
        );
    }
}
