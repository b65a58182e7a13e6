//! # jsv-core: Foundational Types for jsv
//!
//! This crate is the leaf of the jsv workspace. It defines the data model
//! that schemas validate and the small, dependency-light helpers the
//! validator relies on. Every other crate in the workspace depends on
//! `jsv-core`; it depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **One value model.** [`Value`] is the single representation of data
//!    under validation. JSON and YAML documents are converted into it once,
//!    at the edge, through [`convert`].
//!
//! 2. **Keys carry their encoding.** [`Key::Symbol`] and [`Key::String`]
//!    are distinct so that the validator can detect a map holding the same
//!    name twice.
//!
//! 3. **Numbers keep their subtype.** [`Number`] distinguishes integers from
//!    floats; comparisons are by mathematical value.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `jsv-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod convert;
pub mod error;
pub mod number;
pub mod pointer;
pub mod uri;
pub mod value;

pub use convert::{from_json, from_yaml, parse_yaml};
pub use error::CoreError;
pub use number::Number;
pub use pointer::{escape_segment, parse_index, parse_pointer, to_pointer};
pub use uri::{join_uri, normalize_uri, parse_absolute, split_fragment};
pub use value::{Key, Value};
