use autumn_inject::result::AutumnError;

#[derive(Debug, thiserror::Error)]
pub enum FunctionError {
    #[error("Function {0} does not exist")]
    FunctionNotFound(String),
    #[error("Function {0} already exists")]
    FunctionAlreadyExist(String),
    #[error("Invalid input for function {function}: {reason}")]
    InvalidInput {
        function: String,
        reason: String,
    },
    #[error("Function {function} returned [{actual}] where [{expected}] was expected")]
    OutputTypeMismatch {
        function: String,
        expected: String,
        actual: &'static str,
    },
    #[error(transparent)]
    Method(#[from] AutumnError),
    #[error("Invalid function configuration: {0}")]
    Config(#[from] serde_yaml::Error),
}

pub type FunctionResult<T> = Result<T, FunctionError>;
