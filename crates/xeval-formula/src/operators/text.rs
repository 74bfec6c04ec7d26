//! String functions

use xeval_core::Constant;

use super::argument_list;
use crate::ast::{Node, OperatorKind};
use crate::error::EvalResult;

/// `fn:concat(a, b, ...)`: joins the textual values of every argument
///
/// Arguments of any type are accepted; the result is always a String.
pub fn concat(_left: Option<&Node>, right: Option<&Node>) -> EvalResult<Constant> {
    let args = argument_list(OperatorKind::Concat, right)?;
    let joined: String = args.iter().map(|arg| arg.value()).collect();
    Ok(Constant::string(joined))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EvalError;
    use pretty_assertions::assert_eq;
    use xeval_core::ScalarType;

    #[test]
    fn test_concat_strings() {
        let args = Node::Sequence(vec![
            Node::constant("1999", ScalarType::String),
            Node::constant("-12-31", ScalarType::String),
        ]);
        assert_eq!(concat(None, Some(&args)), Ok(Constant::string("1999-12-31")));
    }

    #[test]
    fn test_concat_mixed_types() {
        let args = Node::Sequence(vec![
            Node::constant("a", ScalarType::String),
            Node::Constant(Constant::integer(1)),
            Node::Constant(Constant::double(2.5)),
        ]);
        assert_eq!(concat(None, Some(&args)), Ok(Constant::string("a12.5")));
    }

    #[test]
    fn test_concat_single_argument() {
        let single = Node::Constant(Constant::integer(42));
        let result = concat(None, Some(&single)).unwrap();
        assert_eq!(result.ty(), ScalarType::String);
        assert_eq!(result.value(), "42");
    }

    #[test]
    fn test_concat_missing_arguments() {
        assert_eq!(
            concat(None, None),
            Err(EvalError::MissingOperand {
                operator: "fn:concat"
            })
        );
    }
}
