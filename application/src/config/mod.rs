//! Application-level configuration.
//!
//! - [`ExecutionParams`] — request handling control (tool rounds, deadline, defaults)

pub mod execution_params;

pub use execution_params::ExecutionParams;
