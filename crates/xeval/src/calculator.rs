//! Formula calculation against a variable table and an optional document
//!
//! # Example
//!
//! ```rust
//! use xeval::prelude::*;
//!
//! let mut vars = Variables::new();
//! vars.insert("par:refPeriodEnd", "2000-06-30", ScalarType::Date);
//!
//! let calculator = Calculator::with_variables(vars);
//! let value = calculator
//!     .evaluate("$par:refPeriodEnd - xsd:yearMonthDuration('P3M')")
//!     .unwrap();
//! assert_eq!(value.to_text(), "2000-03-30 00:00:00");
//! ```

use std::path::Path;

use xeval_core::Variables;
use xeval_formula::{EvaluationContext, EvaluationOptions, Formula, FormulaValue, ParseOptions};
use xeval_xml::XmlDocument;

use crate::error::Result;

/// Evaluates formulas against owned variables and an optional XML document
#[derive(Debug, Clone, Default)]
pub struct Calculator {
    variables: Variables,
    document: Option<XmlDocument>,
    options: EvaluationOptions,
}

impl Calculator {
    /// A calculator with no variables and no document
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_variables(variables: Variables) -> Self {
        Self {
            variables,
            ..Self::default()
        }
    }

    pub fn with_document(document: XmlDocument) -> Self {
        Self {
            document: Some(document),
            ..Self::default()
        }
    }

    pub fn with_variables_and_document(variables: Variables, document: XmlDocument) -> Self {
        Self {
            variables,
            document: Some(document),
            ..Self::default()
        }
    }

    /// Set the nesting limit used for both parsing and evaluation
    pub fn with_options(mut self, options: EvaluationOptions) -> Self {
        self.options = options;
        self
    }

    /// Read the document from a file, replacing any current one
    pub fn load_document<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let path = path.as_ref();
        let document = XmlDocument::open(path)?;
        log::debug!("loaded document {} (root <{}>)", path.display(), document.root_name());
        self.document = Some(document);
        Ok(())
    }

    pub fn variables(&self) -> &Variables {
        &self.variables
    }

    pub fn variables_mut(&mut self) -> &mut Variables {
        &mut self.variables
    }

    pub fn document(&self) -> Option<&XmlDocument> {
        self.document.as_ref()
    }

    pub fn set_document(&mut self, document: Option<XmlDocument>) {
        self.document = document;
    }

    /// An evaluation context borrowing this calculator's state
    pub fn context(&self) -> EvaluationContext<'_> {
        let ctx = EvaluationContext::new(&self.variables).with_options(self.options.clone());
        match &self.document {
            Some(document) => ctx.with_document(document),
            None => ctx,
        }
    }

    /// Parse and evaluate formula text
    pub fn evaluate(&self, text: &str) -> Result<FormulaValue> {
        let options = ParseOptions {
            max_depth: self.options.max_depth,
        };
        let formula = Formula::parse_with_options(text, &options)?;
        self.evaluate_formula(&formula)
    }

    /// Evaluate an already parsed formula
    pub fn evaluate_formula(&self, formula: &Formula) -> Result<FormulaValue> {
        Ok(formula.evaluate(&self.context())?)
    }
}
