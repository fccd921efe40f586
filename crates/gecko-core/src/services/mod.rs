//! Core services - the update checker's orchestration layer.
//!
//! Services orchestrate between ports and domain logic. They don't know
//! about concrete implementations; adapters are injected as `Arc<dyn Port>`.

mod update_flow;
mod update_resolver;

pub use update_flow::{FlowOutcome, UpdateFlow, UpdateFlowDeps};
pub use update_resolver::{ResolutionError, SkipReason, UpdateCheck, UpdateResolver};
