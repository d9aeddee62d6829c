//! Function-level error type.

use thiserror::Error;

/// Errors returned when invoking a registered function.
#[derive(Debug, Error)]
pub enum FunctionError {
    /// No function is registered under the requested name.
    #[error("unknown function: '{0}'")]
    UnknownFunction(String),

    /// The function's connection alias has no provider bound to it.
    #[error("function '{function}' needs connection '{alias}', which is not bound")]
    UnboundConnection {
        function: String,
        alias: String,
    },

    /// The JSON arguments do not match the function's parameter list.
    #[error("invalid arguments for '{function}': {source}")]
    InvalidArguments {
        function: String,
        #[source]
        source: serde_json::Error,
    },

    /// The result could not be encoded as JSON.
    #[error("cannot encode result: {0}")]
    Encode(#[from] serde_json::Error),

    /// Failure from the gateway operation itself.
    #[error("database error: {0}")]
    Database(#[from] db::DbError),
}
