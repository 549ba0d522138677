pub mod engine;

// Re-export the runtime entry point so frontends can simply do:
pub use engine::{
    run_simulation_mode, Executor, Outcome, RejectReason, SimulationError, SimulationReport,
    SimulationRuntime, WorkerSummary,
};
