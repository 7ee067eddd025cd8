//! Configuration validation vocabulary shared by the config adapters.

pub mod validation;

pub use validation::{ConfigIssue, ConfigIssueCode, Severity};
