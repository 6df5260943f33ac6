//! Core of the operator data intake pipeline: the canonical value model
//! every parser converges on, multi-format parsing, and per-field record
//! validation/normalization.
//!
//! This crate is pure (no I/O); authentication lives in `intake-auth` and
//! persistence in `intake-db` / `intake-services`.

pub mod config;
pub mod parse;
pub mod validate;
pub mod value;

pub use parse::{parse, ParseError, RawInput};
pub use validate::{NormalizedRecord, ValidationError, ValidationOutcome};
pub use value::{Mapping, Value};
