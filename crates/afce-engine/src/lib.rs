//! # afce-engine
//!
//! Owned application state for AFCE-M.
//!
//! - [`Dashboard`]: the single owner of the patient state, with one in-flight
//!   slot per asynchronous operation and the chat session bound to the
//!   current patient
//! - [`scheduler`]: the latency-delayed, single-slot perturbation scheduler
//! - [`ingest`]: image attachment loading

pub mod dashboard;
pub mod error;
pub mod ingest;
pub mod scheduler;

pub use dashboard::{AssessmentRequest, CHAT_EMPTY_REPLY, CHAT_FAILURE_REPLY, ChatRequest, Dashboard};
pub use error::{EngineError, IngestError, Operation};
pub use scheduler::PerturbationScheduler;
