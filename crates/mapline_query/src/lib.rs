//! Query derivation from repository method names for Mapline.
//!
//! This crate provides:
//! - [`PartTree`] - Subject, predicate, and order clause of a method name
//! - [`Part`] / [`OrPart`] - Single comparisons and their `And` groups
//! - [`PartType`] - The comparison keyword table
//! - [`Sort`] / [`Order`] - Ordering produced by `OrderBy` clauses
//! - [`ParserConfig`] - Length limits and strictness switches

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod keyword;
pub mod order_by;
pub mod part;
pub mod sort;
pub mod subject;
pub mod tokenizer;
pub mod tree;


pub use config::ParserConfig;
pub use keyword::PartType;
pub use part::{IgnoreCaseType, OrPart, Part};
pub use sort::{Direction, NullHandling, Order, Sort};
pub use subject::Subject;
pub use tree::PartTree;
