//! NSF document handling.
//!
//! This module exposes the NSF header and document types, the builder, and
//! the routine emitter used to produce fixture code.
mod document;
pub mod header;
pub mod routine;

pub use document::{NsfBuilder, NsfDocument, RoutineKind};
pub use header::{NsfHeader, NsfHeaderField, NsfText, Region};
pub use routine::{ListingLine, Routine};
