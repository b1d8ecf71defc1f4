use ark_mem::CapacityError;

#[derive(Debug)]
pub enum LogError {
    Io(std::io::Error),
    Capacity(CapacityError),
}

impl core::fmt::Display for LogError {

    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "failed to write log record: {}", err),
            Self::Capacity(err) => write!(f, "failed to store log format: {}", err),
        }
    }
}

impl core::error::Error for LogError {

    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Capacity(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for LogError {

    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<CapacityError> for LogError {

    fn from(value: CapacityError) -> Self {
        Self::Capacity(value)
    }
}
