//! Service layer of the intake pipeline: the boolean-boundary record
//! store, batch processing reports, and the end-to-end facade composing
//! authentication, parsing, validation, and persistence.

pub mod pipeline;
pub mod report;
pub mod store;

pub use pipeline::{IntakePipeline, ProcessOutcome};
pub use report::IntakeReport;
pub use store::RecordStore;
