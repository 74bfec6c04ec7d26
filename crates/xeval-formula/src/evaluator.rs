//! Formula evaluator
//!
//! Reduces a parsed tree to a single [`Constant`]. Sequences are folded by
//! repeatedly applying the operator with the lowest priority (leftmost on
//! ties) to its neighbours; variables and paths are resolved only when an
//! operator consumes them, and only the taken branch of a conditional is
//! ever evaluated.

use std::fmt;

use chrono::NaiveDateTime;
use log::{debug, trace};
use xeval_core::{format_date, format_double, Constant, ScalarType, VariableStore, XmlLookup};

use crate::ast::{Node, OperatorKind};
use crate::error::{EvalError, EvalResult};
use crate::operators;
use crate::parser::DEFAULT_MAX_DEPTH;

/// Options for evaluation
#[derive(Debug, Clone)]
pub struct EvaluationOptions {
    /// Maximum recursion depth while evaluating nested nodes (default: 128)
    pub max_depth: usize,
}

impl Default for EvaluationOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Variable store with no entries, backing [`EvaluationContext::simple`]
struct NoVariables;

impl VariableStore for NoVariables {
    fn lookup(&self, _name: &str) -> Option<Constant> {
        None
    }
}

static NO_VARIABLES: NoVariables = NoVariables;

/// Context for formula evaluation
pub struct EvaluationContext<'a> {
    variables: &'a dyn VariableStore,
    document: Option<&'a dyn XmlLookup>,
    options: EvaluationOptions,
}

impl<'a> EvaluationContext<'a> {
    /// Create a context resolving `$name` references against `variables`
    pub fn new(variables: &'a dyn VariableStore) -> Self {
        Self {
            variables,
            document: None,
            options: EvaluationOptions::default(),
        }
    }

    /// Create a context without variables or document (for testing)
    pub fn simple() -> Self {
        Self::new(&NO_VARIABLES)
    }

    /// Resolve `//path` terms against `document`
    pub fn with_document(mut self, document: &'a dyn XmlLookup) -> Self {
        self.document = Some(document);
        self
    }

    pub fn with_options(mut self, options: EvaluationOptions) -> Self {
        self.options = options;
        self
    }

    pub fn variables(&self) -> &'a dyn VariableStore {
        self.variables
    }

    pub fn document(&self) -> Option<&'a dyn XmlLookup> {
        self.document
    }

    pub fn options(&self) -> &EvaluationOptions {
        &self.options
    }
}

/// Final, decoded result of a formula
#[derive(Debug, Clone, PartialEq)]
pub enum FormulaValue {
    Integer(i64),
    Double(f64),
    String(String),
    Date(NaiveDateTime),
    /// Colon-joined period components, e.g. `0:3:0:0:0:0`
    Period(String),
}

impl FormulaValue {
    /// Decode a constant according to its declared type
    pub fn from_constant(constant: &Constant) -> EvalResult<Self> {
        Ok(match constant.ty() {
            ScalarType::Integer => FormulaValue::Integer(constant.as_integer()?),
            ScalarType::Double => FormulaValue::Double(constant.as_double()?),
            ScalarType::String => FormulaValue::String(constant.value().to_string()),
            ScalarType::Date => FormulaValue::Date(constant.as_date()?),
            ScalarType::Period => FormulaValue::Period(constant.value().to_string()),
        })
    }

    pub fn scalar_type(&self) -> ScalarType {
        match self {
            FormulaValue::Integer(_) => ScalarType::Integer,
            FormulaValue::Double(_) => ScalarType::Double,
            FormulaValue::String(_) => ScalarType::String,
            FormulaValue::Date(_) => ScalarType::Date,
            FormulaValue::Period(_) => ScalarType::Period,
        }
    }

    /// Canonical textual form, as a [`Constant`] of the same type would hold it
    pub fn to_text(&self) -> String {
        match self {
            FormulaValue::Integer(n) => n.to_string(),
            FormulaValue::Double(n) => format_double(*n),
            FormulaValue::String(s) | FormulaValue::Period(s) => s.clone(),
            FormulaValue::Date(d) => format_date(d),
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            FormulaValue::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// Numeric value, widening integers
    pub fn as_double(&self) -> Option<f64> {
        match self {
            FormulaValue::Integer(n) => Some(*n as f64),
            FormulaValue::Double(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FormulaValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDateTime> {
        match self {
            FormulaValue::Date(d) => Some(*d),
            _ => None,
        }
    }
}

impl fmt::Display for FormulaValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

/// Evaluate a node
///
/// Constants are returned as-is, variables and paths are resolved, and
/// sequences are reduced. A sequence that still holds several elements
/// once no operators remain (an argument list) is returned as a Sequence.
pub fn evaluate(node: &Node, ctx: &EvaluationContext) -> EvalResult<Node> {
    Evaluator { ctx }.evaluate(node, 0)
}

/// Evaluate an optional node; an absent node is Integer 0
pub fn evaluate_optional(node: Option<&Node>, ctx: &EvaluationContext) -> EvalResult<Node> {
    match node {
        Some(node) => evaluate(node, ctx),
        None => Ok(Node::default()),
    }
}

/// Evaluate a whole formula tree down to a single decoded value
///
/// Fails with `IncorrectExpression` when the tree does not reduce to one
/// constant.
pub fn evaluate_to_value(node: &Node, ctx: &EvaluationContext) -> EvalResult<FormulaValue> {
    match evaluate(node, ctx)? {
        Node::Constant(constant) => {
            let value = FormulaValue::from_constant(&constant)?;
            debug!("formula '{}' evaluated to {} '{}'", node, constant.ty(), value);
            Ok(value)
        }
        other => Err(EvalError::IncorrectExpression(other.to_string())),
    }
}

/// Reduce a list of nodes until no operators remain
pub fn reduce(items: &[Node], ctx: &EvaluationContext) -> EvalResult<Vec<Node>> {
    Evaluator { ctx }.reduce(items, 0)
}

/// Index of the operator reduced next: lowest priority, leftmost on ties
pub fn next_operation_index(nodes: &[Node]) -> Option<usize> {
    next_operation(nodes).map(|(index, _)| index)
}

/// Index of the operator reduced last: highest priority, rightmost on ties
pub fn last_operation_index(nodes: &[Node]) -> Option<usize> {
    nodes
        .iter()
        .enumerate()
        .filter_map(|(index, node)| node.as_operator().map(|kind| (index, kind)))
        .max_by_key(|(_, kind)| kind.priority())
        .map(|(index, _)| index)
}

fn next_operation(nodes: &[Node]) -> Option<(usize, OperatorKind)> {
    nodes
        .iter()
        .enumerate()
        .filter_map(|(index, node)| node.as_operator().map(|kind| (index, kind)))
        .min_by_key(|(_, kind)| kind.priority())
}

struct Evaluator<'c, 'a> {
    ctx: &'c EvaluationContext<'a>,
}

impl Evaluator<'_, '_> {
    fn evaluate(&self, node: &Node, depth: usize) -> EvalResult<Node> {
        let limit = self.ctx.options.max_depth;
        if depth > limit {
            return Err(EvalError::NestingTooDeep { limit });
        }

        match node {
            Node::Constant(_) => Ok(node.clone()),
            Node::Variable(name) => self
                .ctx
                .variables
                .lookup(name)
                .map(Node::Constant)
                .ok_or_else(|| EvalError::VariableNotFound(name.clone())),
            Node::XPath(path) => {
                let document = self.ctx.document.ok_or(EvalError::NoDocument)?;
                let text = document
                    .text_at(path)
                    .map_err(|source| EvalError::XPathFailure {
                        path: path.clone(),
                        source,
                    })?;
                Ok(Node::Constant(Constant::string(text)))
            }
            Node::Condition(cond) => {
                let test = self.evaluate(&cond.test, depth + 1)?;
                let taken = match &test {
                    Node::Constant(c) if c.ty() == ScalarType::Integer => c.as_integer()? == 1,
                    other => return Err(EvalError::InvalidCondition(other.describe())),
                };
                trace!("condition {} took the {} branch", cond.test, if taken { "then" } else { "else" });
                if taken {
                    self.evaluate(&cond.then_branch, depth + 1)
                } else {
                    self.evaluate(&cond.else_branch, depth + 1)
                }
            }
            Node::Sequence(items) if items.len() == 1 => self.evaluate(&items[0], depth + 1),
            Node::Sequence(items) if !items.is_empty() => {
                let mut reduced = self.reduce(items, depth + 1)?;
                if reduced.len() == 1 {
                    let single = reduced.swap_remove(0);
                    return self.evaluate(&single, depth + 1);
                }
                Ok(Node::Sequence(reduced))
            }
            Node::Sequence(_) | Node::Operator(_) => Err(EvalError::CannotEvaluate(node.describe())),
        }
    }

    fn reduce(&self, items: &[Node], depth: usize) -> EvalResult<Vec<Node>> {
        // Nested groups are evaluated up front; atoms wait for their operator.
        // The operand of `exists` is left for `try_resolve`.
        let mut current = items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                let exists_operand = index
                    .checked_sub(1)
                    .and_then(|prev| items[prev].as_operator())
                    == Some(OperatorKind::Exists);
                if item.has_children() && !exists_operand {
                    self.evaluate(item, depth + 1)
                } else {
                    Ok(item.clone())
                }
            })
            .collect::<EvalResult<Vec<_>>>()?;

        while let Some((index, kind)) = next_operation(&current) {
            trace!(
                "reducing '{}' at {} of {} node(s)",
                kind,
                index,
                current.len()
            );
            let missing = || EvalError::MissingOperand {
                operator: kind.token(),
            };
            let right_node = current.get(index + 1).ok_or_else(missing)?;

            if kind.is_binary() {
                let start = index.checked_sub(1).ok_or_else(missing)?;
                let left = self.evaluate(&current[start], depth + 1)?;
                let right = self.evaluate(right_node, depth + 1)?;
                let result = operators::apply(kind, Some(&left), Some(&right))?;
                current.splice(start..index + 2, [Node::Constant(result)]);
            } else {
                let right = if kind == OperatorKind::Exists {
                    self.try_resolve(right_node, depth + 1)?
                } else {
                    Some(self.evaluate(right_node, depth + 1)?)
                };
                let result = operators::apply(kind, None, right.as_ref())?;
                // The left neighbour is not an operand of a prefix function
                current.splice(index..index + 2, [Node::Constant(result)]);
            }
        }

        Ok(current)
    }

    /// Evaluate `node`, mapping an absent variable or document node to `None`
    fn try_resolve(&self, node: &Node, depth: usize) -> EvalResult<Option<Node>> {
        match self.evaluate(node, depth) {
            Ok(resolved) => Ok(Some(resolved)),
            Err(EvalError::VariableNotFound(name)) => {
                debug!("exists: variable ${} is not defined", name);
                Ok(None)
            }
            Err(EvalError::XPathFailure { path, source }) => {
                debug!("exists: {}: {}", path, source);
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }
}
