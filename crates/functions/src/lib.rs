//! `functions` crate — the invocation contract for the gateway operations.
//!
//! Every remotely callable function implements [`UserDataFunction`]: it
//! declares its parameters and the alias of the connection it needs, decodes
//! JSON arguments, and runs one `db` repository function.  The
//! [`FunctionRegistry`] resolves aliases to injected connection providers.

pub mod error;
pub mod registry;
pub mod saq;
pub mod traits;

pub use error::FunctionError;
pub use registry::{FunctionDescriptor, FunctionRegistry};
pub use saq::{register_saq_functions, SAQ_CONNECTION_ALIAS};
pub use traits::{Parameter, ParameterKind, UserDataFunction};
