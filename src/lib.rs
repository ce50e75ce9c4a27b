//! regraft — keeps locally forked sources in step with their upstream.
//!
//! The fork this repo maintains vendors a handful of Python modules from an
//! upstream license-scanning toolkit. `regraft` rewrites each forked file
//! from its upstream counterpart using one of two strategies: replace
//! tracked top-level constructs by identity ([`strategy::merge_by_name`]),
//! or keep the local import block and take everything after upstream's
//! ([`strategy::replace_after_imports`]). The binary drives a fixed update
//! matrix; this library exposes the engine so tests can drive synthetic
//! matrices directly.
//!
//! Alongside the engine live the Rust ports of the fork's text utilities —
//! byte decoding ([`analysis`]) and n-gram windows ([`tokenize`]) — which
//! the scanner side of the fork consumes.

pub mod analysis;
pub mod error;
pub mod extract;
pub mod strategy;
pub mod testing;
pub mod tokenize;
pub mod update;


// telemetry is private to the binary — see src/main.rs.
