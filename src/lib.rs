//! Validation and repair core for visual workflow graphs.
//!
//! Takes the node/edge graph produced by the canvas editor and runs it
//! through auto-fix → normalize → validate → input validation before a
//! save or run request is accepted. All passes are pure: they take a
//! graph value and return a new graph value plus diagnostics.

pub mod error;
pub mod fix;
pub mod inputs;
pub mod normalize;
pub mod parse;
pub mod pipeline;
pub mod validate;
pub mod wasm;
