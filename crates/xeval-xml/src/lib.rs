//! # xeval-xml
//!
//! XML documents for xeval formulas.
//!
//! [`XmlDocument`] reads a document into memory with `quick-xml` and
//! answers the `//path` terms of a formula through the
//! [`XmlLookup`](xeval_core::XmlLookup) trait. Only location paths are
//! supported (see the `path` module docs); predicates and functions are
//! rejected with [`LookupError::Query`](xeval_core::LookupError::Query).

pub mod error;

mod document;
mod path;

pub use document::XmlDocument;
pub use error::{XmlError, XmlResult};
