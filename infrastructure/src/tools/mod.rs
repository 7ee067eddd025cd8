//! Tool executor adapters
//!
//! [`SimulatedToolExecutor`] answers every scheduling tool with canned data;
//! real calendar and spreadsheet backends plug in behind the same
//! [`ToolExecutorPort`](agendai_application::ToolExecutorPort).

mod simulated;

pub use simulated::SimulatedToolExecutor;
