//! Test infrastructure for field types.
//!
//! Fixtures describe field definitions and stored records; the harness owns
//! the collaborators a field needs and hands out [`FieldServices`].
//!
//! [`FieldServices`]: datafield::fields::FieldServices

#![allow(dead_code)]

pub mod fixtures;
pub mod harness;

pub use fixtures::*;
pub use harness::*;
