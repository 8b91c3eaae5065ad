mod vars;

pub use vars::EnvVars;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EnvError {
    #[error("Invalid variable name: {0:?}")]
    InvalidName(String),
    #[error("Invalid value: {0}")]
    InvalidValue(&'static str),
}
