//! Function registry and connection-alias bindings.
//!
//! Functions are registered by name; connection providers are bound by alias.
//! `invoke` resolves both and hands the provider to the function for that one
//! call.  The registry holds no per-call state.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use db::ConnectionProvider;

use crate::{FunctionError, Parameter, UserDataFunction};

/// Public description of a registered function.
#[derive(Debug, Clone, Serialize)]
pub struct FunctionDescriptor {
    pub name: &'static str,
    pub connection_alias: &'static str,
    pub parameters: &'static [Parameter],
    /// Whether a provider is currently bound to `connection_alias`.
    pub bound: bool,
}

/// Maps function names to implementations and aliases to providers.
#[derive(Default)]
pub struct FunctionRegistry {
    functions: BTreeMap<&'static str, Arc<dyn UserDataFunction>>,
    connections: HashMap<String, Arc<dyn ConnectionProvider>>,
}

impl FunctionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `function` under its own name, replacing any previous entry.
    pub fn register(&mut self, function: Arc<dyn UserDataFunction>) {
        if self.functions.insert(function.name(), Arc::clone(&function)).is_some() {
            warn!("function '{}' registered twice; keeping the latest", function.name());
        }
    }

    /// Bind `provider` to `alias`.
    pub fn bind_connection(&mut self, alias: impl Into<String>, provider: Arc<dyn ConnectionProvider>) {
        self.connections.insert(alias.into(), provider);
    }

    /// Registered functions, sorted by name.
    pub fn list(&self) -> Vec<FunctionDescriptor> {
        self.functions
            .values()
            .map(|f| FunctionDescriptor {
                name: f.name(),
                connection_alias: f.connection_alias(),
                parameters: f.parameters(),
                bound: self.connections.contains_key(f.connection_alias()),
            })
            .collect()
    }

    /// Run the function registered as `name` with JSON `args`.
    ///
    /// # Errors
    /// [`FunctionError::UnknownFunction`], [`FunctionError::UnboundConnection`],
    /// or whatever the function itself returns.
    #[instrument(skip(self, args))]
    pub async fn invoke(&self, name: &str, args: Value) -> Result<Value, FunctionError> {
        let function = self
            .functions
            .get(name)
            .ok_or_else(|| FunctionError::UnknownFunction(name.to_owned()))?;

        let alias = function.connection_alias();
        let provider = self.connections.get(alias).ok_or_else(|| {
            FunctionError::UnboundConnection {
                function: name.to_owned(),
                alias: alias.to_owned(),
            }
        })?;

        let output = function.invoke(provider.as_ref(), args).await?;
        debug!("function '{}' invoked via connection '{}'", name, alias);
        Ok(output)
    }
}
