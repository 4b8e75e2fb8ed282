//! DOGS palette: greedy, Welsh-Powell, DSATUR and genetic graph colorers

// #![warn(clippy::all, clippy::pedantic)]
// useful additional warnings if docs are missing, or crates imported but unused, etc.
#![warn(missing_debug_implementations)]
#![warn(missing_docs)]
#![warn(trivial_casts, trivial_numeric_casts)]
#![warn(unsafe_code)]
#![warn(unused_extern_crates)]
#![warn(variant_size_differences)]

// not sure if already by default in clippy
#![warn(clippy::similar_names)]
#![warn(clippy::shadow_unrelated)]
#![warn(clippy::shadow_same)]
#![warn(clippy::shadow_reuse)]


/// error type of the crate
pub mod error;

/// graph model, coloring results and checker
pub mod color;

/// adjacency-list instance (built once per coloring)
pub mod compact_instance;

/// full edge scan instance (reference for the adjacency-list instance)
pub mod scan_instance;

/// stopping criteria and cancellation
pub mod stopping;

/// graph colorers
pub mod search;

/// algorithm selection and side-by-side comparison
pub mod algorithm;

/// read DIMACS formats
pub mod dimacs;

/// helper and utility methods for executables
pub mod util;
