mod error;
mod executor;
mod report;
mod runtime;

pub use self::{
    error::SimulationError,
    executor::{Executor, Outcome, RejectReason},
    report::{SimulationReport, WorkerSummary},
    runtime::{run_simulation_mode, SimulationRuntime},
};

pub mod prelude {
    pub use super::{
        run_simulation_mode, Executor, Outcome, RejectReason, SimulationError, SimulationReport,
        SimulationRuntime, WorkerSummary,
    };
}
