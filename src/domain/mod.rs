//! Domain Layer - Core lookup types
//!
//! Pure types and logic with no I/O:
//! - `mint`: mint address validation
//! - `fields`: ordered candidate-key extraction from upstream payloads
//! - `snapshot`: the monotonic merge target for one lookup

pub mod fields;
pub mod mint;
pub mod snapshot;

pub use mint::{Mint, MintError};
pub use snapshot::{ProviderFields, Reason, SourceRecord, Stage, TokenSnapshot};
