//! Application Layer
//!
//! Lookup orchestration and response shaping.

pub mod lookup;
pub mod response;

pub use lookup::{LenientLookup, LenientOutcome, StrictLookup, StrictOutcome};
pub use response::Rendered;
