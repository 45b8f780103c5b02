#![doc = include_str!("../README.md")]
//! nsfgen: builder for fixed-layout NSF (NES Sound Format) test fixtures
//!
//! `nsfgen` assembles NSF files from constants: a 128-byte header followed
//! by a small 6502 code payload. It is meant for producing test data for
//! NSF players, not for reading or validating NSF files.
//!
//! Key features:
//! - `NsfHeader` with an explicit on-disk field map (`NsfHeaderField`).
//! - `NsfBuilder`, which places the init and play routines and derives
//!   their header addresses from the layout, rejecting layouts that leave
//!   `$8000-$FFFF`.
//! - `Routine`, an emitter for the few instructions fixture code uses,
//!   with a printable listing.
//! - Ready-made fixtures (`Fixture::MinimalTest`, `Fixture::ContinuousTone`).
//! - Output helpers that keep serialization separate from file I/O.
//!
//! Example: building the minimal fixture
//!
//! ```rust
//! use nsfgen::Fixture;
//!
//! let bytes = Fixture::MinimalTest.build().expect("fixture layout fits");
//! assert_eq!(bytes.len(), 135);
//! assert_eq!(&bytes[0..5], b"NESM\x1A");
//! assert_eq!(&bytes[128..], &[0xEA, 0xEA, 0xEA, 0x60, 0xEA, 0xEA, 0x60]);
//! ```
//!
//! Example: a custom document written to an in-memory sink
//!
//! ```rust
//! use nsfgen::{NsfBuilder, NsfText, Routine};
//! use nsfgen::output::write_to;
//!
//! let mut init = Routine::new();
//! init.store(0x4015, 0x01).rts();
//! let mut play = Routine::new();
//! play.rts();
//!
//! let mut builder = NsfBuilder::new();
//! builder
//!     .set_title(NsfText::try_from("Pulse only").expect("title fits"))
//!     .set_init_routine(init)
//!     .set_play_routine(play);
//! let document = builder.finalize().expect("payload fits above $8000");
//! assert_eq!(document.header.play_address, 0x8006);
//!
//! let mut sink: Vec<u8> = Vec::new();
//! write_to(&document.to_bytes(), &mut sink).expect("vec sink never fails");
//! assert_eq!(sink.len(), 128 + 7);
//! ```
mod binutil;
pub mod fixture;
pub mod nsf;
pub mod output;

pub use binutil::{BuildError, hex_bytes};
pub use fixture::Fixture;
pub use nsf::{NsfBuilder, NsfDocument, NsfHeader, NsfHeaderField, NsfText, Region, Routine};
