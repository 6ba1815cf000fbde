//! # Flowtag Core
//!
//! The three-stage batch pipeline behind `flowtag`:
//!
//! 1. **[`protocols`]**: protocol numbers to keywords, single values or ranges.
//! 2. **[`lookup`]**: (protocol keyword, destination port) to tag.
//! 3. **[`aggregator`]**: classifies each flow-log record and counts tags and
//!    port/protocol combinations.
//!
//! [`report`] renders the counts and [`pipeline::run`] wires everything together.

pub mod aggregator;
pub mod lookup;
pub mod pipeline;
pub mod protocols;
pub mod report;

mod source;
