pub mod extraction;
pub mod structuring;
pub mod export;
pub mod processor; // Document orchestrator: pages → records → sinks
