//! Relation readers for bestpath.
//!
//! The engine hands a reader positional [`RelationRequest`]s made of raw
//! caller-supplied names. This crate is where those names are interpreted:
//!
//! - every relation and column name must be a plain identifier (allow-listed
//!   by pattern, case-folded), optionally restricted to an explicit set of
//!   relations
//! - column names are resolved to positions against the table's header
//! - values are narrowed to 32-bit integers; nulls pass through untouched
//!
//! Two readers are provided: [`JsonDirReader`] (one JSON table per relation
//! in a directory) and [`MemoryReader`].
//!
//! [`RelationRequest`]: bestpath_engine::RelationRequest

mod error;
pub mod identifier;
pub mod json_reader;
pub mod memory;
pub mod table;

pub use error::{IngestError, Result};
pub use identifier::{AllowList, Identifier, ValidatedRequest};
pub use json_reader::JsonDirReader;
pub use memory::MemoryReader;
pub use table::Table;
