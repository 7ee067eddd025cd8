//! Tool domain
//!
//! Schemas of the operations the language model may request, the catalog that
//! holds them, and validation of requested invocations.

pub mod catalog;
pub mod invocation;
pub mod scheduling;
pub mod schema;
pub mod validation;
