use std::borrow::Cow;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AutumnError {
    #[error("Wrong number of arguments to method: {method}")]
    InvalidArgumentCount {
        method: Cow<'static, str>,
    },
    #[error("Invalid type [{actual}] for argument [{argument}] of method: {method}")]
    InvalidArgumentType {
        argument: String,
        actual: Cow<'static, str>,
        method: Cow<'static, str>,
    },
    #[error("Instance is not a {declaring_type} for method: {method}")]
    InvalidInstance {
        declaring_type: &'static str,
        method: Cow<'static, str>,
    },
    #[error("Method {0} already exists")]
    MethodAlreadyExist(String),
    #[error("Method {0} does not exist")]
    MethodNotExist(String),
    #[error("{0}")]
    Dispatch(String),
}

pub type AutumnResult<T> = Result<T, AutumnError>;
