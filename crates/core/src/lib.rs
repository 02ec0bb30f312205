//! Core library for devtools
//!
//! This crate implements the **Functional Core** of the devtools application,
//! following the Functional Core - Imperative Shell architectural pattern.
//!
//! # Architecture Overview
//!
//! The devtools project uses a two-crate architecture to enforce separation of concerns:
//!
//! - **`devtools_core`** (this crate): Pure transformation functions with zero I/O
//! - **`devtools`**: I/O operations and orchestration (the Imperative Shell)
//!
//! Every converter in this crate is a synchronous, stateless function over an
//! in-memory string or value: same input, same output, no external state. The
//! one deliberate exception is [`prefs`], which owns the tiny preferences file
//! the same way the shell's tools own their other I/O boundaries.
//!
//! # Module Organization
//!
//! The core crate is organized by tool:
//!
//! - [`jsoncsv`]: structural JSON <-> CSV conversion (flattening, CSV quoting)
//! - [`jsonxml`]: structural JSON <-> XML conversion (attributes, text nodes)
//! - [`codegen`]: typed-class generation from example JSON (TypeScript, Python, Pydantic)
//! - [`units`]: the generic unit-conversion widget and its unit families
//! - [`diff`]: chunk planning and per-chunk line diffing for the text-diff tool
//! - [`encode`]: Base64 and URL percent-encoding helpers
//! - [`prefs`]: the persisted theme / last-used-tool preferences
//!
//! Each module contains its transformation functions and a `#[cfg(test)]`
//! module exercising them with fixture data, no mocking required.

pub mod codegen;
pub mod diff;
pub mod encode;
pub mod error;
pub mod jsoncsv;
pub mod jsonxml;
pub mod prefs;
pub mod units;

pub use error::Error;
