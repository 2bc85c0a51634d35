//! Cybermaint Toolkit (workspace facade crate).
//!
//! Re-exports the member crates under `cybermaint::{core,input,term,runtime,types}`
//! and hosts the interactive [`playground`] shared by the binaries and tests.

pub use cybermaint_core as core;
pub use cybermaint_input as input;
pub use cybermaint_runtime as runtime;
pub use cybermaint_term as term;
pub use cybermaint_types as types;

pub mod playground;
