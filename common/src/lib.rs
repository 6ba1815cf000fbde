//! # Flowtag Common
//!
//! Data model, error taxonomy and run configuration shared by the
//! `flowtag-core` pipeline and the `flowtag` binary.
//!
//! * **[`model`]**: protocol table, lookup table, flow records and the two counters.
//! * **[`error`]**: [`error::FlowTagError`] and the per-row [`error::ParseError`].
//! * **[`config`]**: the file paths of one run and its [`config::MalformedPolicy`].

pub mod config;
pub mod error;
pub mod model;
