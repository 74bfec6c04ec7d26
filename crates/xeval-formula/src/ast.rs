//! Formula expression tree types

use std::fmt;

use xeval_core::{Constant, ScalarType};

/// An element of a parsed formula
///
/// A formula parses into a flat [`Node::Sequence`] of terms and operators;
/// parenthesized groups nest further sequences. Operators carry no operands
/// of their own: they consume their neighbours positionally during reduction.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Typed terminal value
    Constant(Constant),
    /// `$name` reference, resolved at evaluation time
    Variable(String),
    /// Operator or built-in function token
    Operator(OperatorKind),
    /// `if ... then ... else ...`
    Condition(Box<Condition>),
    /// `//path` reference into the XML document
    XPath(String),
    /// Ordered list of nodes
    Sequence(Vec<Node>),
}

/// The three branches of a conditional
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub test: Node,
    pub then_branch: Node,
    pub else_branch: Node,
}

impl Node {
    /// Build a Sequence, flattening a single element to that element
    pub fn sequence(mut items: Vec<Node>) -> Node {
        if items.len() == 1 {
            items.swap_remove(0)
        } else {
            Node::Sequence(items)
        }
    }

    pub fn constant<S: Into<String>>(value: S, ty: ScalarType) -> Node {
        Node::Constant(Constant::new(value, ty))
    }

    pub fn condition(test: Node, then_branch: Node, else_branch: Node) -> Node {
        Node::Condition(Box::new(Condition {
            test,
            then_branch,
            else_branch,
        }))
    }

    /// Child elements of a Sequence; every other node is an atom
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Sequence(items) => items,
            _ => &[],
        }
    }

    pub fn has_children(&self) -> bool {
        !self.children().is_empty()
    }

    pub fn as_constant(&self) -> Option<&Constant> {
        match self {
            Node::Constant(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_operator(&self) -> Option<OperatorKind> {
        match self {
            Node::Operator(kind) => Some(*kind),
            _ => None,
        }
    }

    /// Short description used in error messages
    pub fn describe(&self) -> String {
        match self {
            Node::Constant(c) => format!("{} '{}'", c.ty(), c.value()),
            Node::Variable(name) => format!("variable ${}", name),
            Node::Operator(kind) => format!("operator '{}'", kind.token()),
            Node::Condition(_) => "condition".to_string(),
            Node::XPath(path) => format!("path {}", path),
            Node::Sequence(items) => format!("sequence of {} elements", items.len()),
        }
    }
}

impl Default for Node {
    /// The value of an absent expression: Integer 0
    fn default() -> Self {
        Node::Constant(Constant::integer(0))
    }
}

impl From<Constant> for Node {
    fn from(c: Constant) -> Self {
        Node::Constant(c)
    }
}

impl From<OperatorKind> for Node {
    fn from(kind: OperatorKind) -> Self {
        Node::Operator(kind)
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Constant(c) => match c.ty() {
                ScalarType::Integer | ScalarType::Double => write!(f, "{}", c.value()),
                _ => write!(f, "'{}'", c.value()),
            },
            Node::Variable(name) => write!(f, "${}", name),
            Node::Operator(kind) => f.write_str(kind.token()),
            Node::Condition(cond) => write!(
                f,
                "if ({}) then ({}) else ({})",
                cond.test, cond.then_branch, cond.else_branch
            ),
            Node::XPath(path) => f.write_str(path),
            Node::Sequence(items) => {
                f.write_str("(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str(")")
            }
        }
    }
}

/// Operators and built-in functions
///
/// Each kind has a fixed token, a reduction priority (lower reduces first)
/// and an arity: binary operators consume both neighbours, the rest are
/// prefix functions applied to the node on their right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorKind {
    // Arithmetic
    Add,
    Subtract,
    Multiply,
    Divide,

    // Comparison and logic
    Eq,
    Equal,
    NotEqual,
    And,
    Or,

    // Functions
    Exists,
    Max,
    Min,
    DayFromDate,
    MonthFromDate,
    YearFromDate,
    Concat,
    XsdDate,
    XsdString,
    DayTimeDuration,
    YearMonthDuration,
}

impl OperatorKind {
    /// Every operator, in token-table order
    pub const ALL: [OperatorKind; 20] = [
        OperatorKind::Add,
        OperatorKind::Subtract,
        OperatorKind::Multiply,
        OperatorKind::Divide,
        OperatorKind::Exists,
        OperatorKind::And,
        OperatorKind::Or,
        OperatorKind::Eq,
        OperatorKind::Equal,
        OperatorKind::NotEqual,
        OperatorKind::Max,
        OperatorKind::Min,
        OperatorKind::DayFromDate,
        OperatorKind::MonthFromDate,
        OperatorKind::YearFromDate,
        OperatorKind::Concat,
        OperatorKind::XsdDate,
        OperatorKind::DayTimeDuration,
        OperatorKind::YearMonthDuration,
        OperatorKind::XsdString,
    ];

    /// The literal token as written in formulas
    pub fn token(self) -> &'static str {
        match self {
            OperatorKind::Add => "+",
            OperatorKind::Subtract => "-",
            OperatorKind::Multiply => "*",
            OperatorKind::Divide => "/",
            OperatorKind::Eq => "eq",
            OperatorKind::Equal => "=",
            OperatorKind::NotEqual => "!=",
            OperatorKind::And => "and",
            OperatorKind::Or => "or",
            OperatorKind::Exists => "exists",
            OperatorKind::Max => "max",
            OperatorKind::Min => "min",
            OperatorKind::DayFromDate => "fn:day-from-date",
            OperatorKind::MonthFromDate => "fn:month-from-date",
            OperatorKind::YearFromDate => "fn:year-from-date",
            OperatorKind::Concat => "fn:concat",
            OperatorKind::XsdDate => "xsd:date",
            OperatorKind::XsdString => "xsd:string",
            OperatorKind::DayTimeDuration => "xsd:dayTimeDuration",
            OperatorKind::YearMonthDuration => "xsd:yearMonthDuration",
        }
    }

    /// Reduction priority: the lowest value present is folded first
    pub fn priority(self) -> u8 {
        match self {
            OperatorKind::Multiply | OperatorKind::Divide => 1,
            OperatorKind::Add | OperatorKind::Subtract => 2,
            OperatorKind::Eq | OperatorKind::Equal | OperatorKind::NotEqual => 3,
            OperatorKind::And => 4,
            OperatorKind::Or => 5,
            _ => 0,
        }
    }

    /// Binary operators take both neighbours; the rest only the right one
    pub fn is_binary(self) -> bool {
        self.priority() > 0
    }

    /// Look up an operator by its exact token
    pub fn from_token(token: &str) -> Option<OperatorKind> {
        Self::ALL.iter().copied().find(|kind| kind.token() == token)
    }
}

impl fmt::Display for OperatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_token_table_round_trips() {
        for kind in OperatorKind::ALL {
            assert_eq!(OperatorKind::from_token(kind.token()), Some(kind));
        }
        assert_eq!(OperatorKind::from_token("sum"), None);
        assert_eq!(OperatorKind::from_token("EQ"), None);
    }

    #[test]
    fn test_priorities() {
        assert_eq!(OperatorKind::Multiply.priority(), 1);
        assert_eq!(OperatorKind::Subtract.priority(), 2);
        assert_eq!(OperatorKind::NotEqual.priority(), 3);
        assert_eq!(OperatorKind::And.priority(), 4);
        assert_eq!(OperatorKind::Or.priority(), 5);
        assert_eq!(OperatorKind::XsdDate.priority(), 0);
        assert!(OperatorKind::Or.is_binary());
        assert!(!OperatorKind::Max.is_binary());
        assert!(!OperatorKind::Exists.is_binary());
    }

    #[test]
    fn test_sequence_flattening() {
        let single = Node::sequence(vec![Node::constant("1", ScalarType::Integer)]);
        assert_eq!(single, Node::constant("1", ScalarType::Integer));

        let pair = Node::sequence(vec![Node::default(), Node::default()]);
        assert!(matches!(pair, Node::Sequence(ref items) if items.len() == 2));
    }

    #[test]
    fn test_display() {
        let node = Node::Sequence(vec![
            Node::Operator(OperatorKind::XsdDate),
            Node::Variable("d".into()),
            Node::Operator(OperatorKind::Add),
            Node::constant("2.5", ScalarType::Double),
        ]);
        assert_eq!(node.to_string(), "(xsd:date $d + 2.5)");
    }
}
