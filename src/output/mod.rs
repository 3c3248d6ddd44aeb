//! Output routing for extracted text

pub mod cleanup;
pub mod router;

pub use cleanup::sweep_stale_extracts;
pub use router::{OutputPayload, OutputRouter, DEFAULT_INLINE_MAX_BYTES};
