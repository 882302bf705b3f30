//! Domain types and pure logic for the JualPutus buyback service.
//!
//! Nothing in this crate performs I/O: the submission record and its
//! assembler, ticket numbers, the admin message formatter, form validation,
//! and the static device catalog.

pub mod catalog;
pub mod error;
pub mod labels;
pub mod message;
pub mod submission;
pub mod ticket;
pub mod types;
pub mod validation;
