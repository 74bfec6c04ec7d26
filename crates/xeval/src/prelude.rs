//! Prelude module - common imports for xeval users
//!
//! ```rust
//! use xeval::prelude::*;
//! ```

pub use crate::{
    // Entry point
    Calculator,
    Constant,
    // Errors
    Error,
    EvaluationContext,
    EvaluationOptions,
    Formula,
    FormulaValue,
    Result,
    // Values
    ScalarType,
    VariableStore,
    Variables,
    // Documents
    XmlDocument,
    XmlLookup,
};
