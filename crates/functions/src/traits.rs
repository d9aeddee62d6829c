//! The `UserDataFunction` trait — the contract every callable function fulfils.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use db::ConnectionProvider;

use crate::FunctionError;

/// Shape of a declared parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterKind {
    Text,
    TextList,
}

/// A named, typed parameter as callers see it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Parameter {
    pub name: &'static str,
    pub kind: ParameterKind,
}

impl Parameter {
    pub const fn text(name: &'static str) -> Self {
        Self { name, kind: ParameterKind::Text }
    }

    pub const fn text_list(name: &'static str) -> Self {
        Self { name, kind: ParameterKind::TextList }
    }
}

/// A remotely callable function.
///
/// The registry resolves [`connection_alias`](Self::connection_alias) to a
/// provider and passes it to [`invoke`](Self::invoke) together with the
/// caller's JSON arguments (an object keyed by parameter name).
#[async_trait]
pub trait UserDataFunction: Send + Sync {
    fn name(&self) -> &'static str;

    /// Alias of the connection this function is bound to.
    fn connection_alias(&self) -> &'static str;

    fn parameters(&self) -> &'static [Parameter];

    async fn invoke(
        &self,
        provider: &dyn ConnectionProvider,
        args: Value,
    ) -> Result<Value, FunctionError>;
}
