//! Shared foundation types for the AHB condition expression engine.
//!
//! This crate has no knowledge of lexing, parsing, or evaluation -- it only
//! provides the value types every other crate in the workspace builds on:
//! source [`span::Span`]s, condition-[`key`] classification, EDIFACT
//! [`edifact`] identity types, and input [`sanitize`]ation.

pub mod edifact;
pub mod fulfillment;
pub mod key;
pub mod sanitize;
pub mod span;

pub use edifact::{EdifactFormat, EdifactFormatVersion, PruefidentifikatorError};
pub use fulfillment::Fulfillment;
pub use key::{classify, Category, InvalidKeyRange, TimeCondition};
pub use sanitize::sanitize_expression;
pub use span::Span;
