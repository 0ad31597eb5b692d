//! Output sinks for pipeline results.
//!
//! - [`json`]: writes the envelope of a one-shot run to a dated JSON file
//!
//! The HTTP endpoint in [`crate::server`] is the other consumer of envelopes.

pub mod json;
