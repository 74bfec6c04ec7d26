//! Formula parser
//!
//! A single left-to-right scanner that turns formula text into a flat
//! [`Node::Sequence`], recursing into parenthesized groups and into the three
//! parts of an `if ... then ... else ...` conditional. Operator precedence is
//! not resolved here; the evaluator folds operators by priority.
//!
//! At each position the first matching rule wins:
//!
//! 1. space and `,` are separators
//! 2. `(` opens a group that runs to its matching `)`
//! 3. `$` starts a variable name (letters, digits, `:`)
//! 4. `'` starts a string literal that runs to the next `'`
//! 5. `//` starts a path that runs to the end of the current scope
//! 6. `+ - * / =` and `!=` are operator symbols
//! 7. `if` starts a conditional that runs to the end of the current scope
//! 8. anything else is read up to the next ` ,+*/()=` and classified as a
//!    number or a named operator

use xeval_core::ScalarType;

use crate::ast::{Node, OperatorKind};
use crate::error::{ParseError, ParseResult};

/// Characters that end a bare token
const BOUNDARY_CHARS: &[u8] = b" ,+*/()=";

/// Single-character operator symbols
const SYMBOL_CHARS: &[u8] = b"+-*/=";

/// Default nesting limit for groups and conditionals
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Options for parsing
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Maximum nesting of groups and conditionals (default: 128)
    pub max_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Parse formula text into an expression tree
///
/// # Example
/// ```rust
/// use xeval_formula::{parse, Node, OperatorKind};
///
/// let tree = parse("1 + 2").unwrap();
/// assert_eq!(tree.children().len(), 3);
/// assert_eq!(tree.children()[1], Node::Operator(OperatorKind::Add));
/// ```
pub fn parse(text: &str) -> ParseResult<Node> {
    parse_with_options(text, &ParseOptions::default())
}

/// Parse formula text with explicit options
pub fn parse_with_options(text: &str, options: &ParseOptions) -> ParseResult<Node> {
    let parser = Parser {
        source: text,
        max_depth: options.max_depth,
    };
    let node = parser.parse_scope(0, text.len(), 0)?;
    log::debug!(
        "parsed formula '{}' into {} top-level node(s)",
        text,
        node.children().len().max(1)
    );
    Ok(node)
}

/// Classify a bare token as a number literal
///
/// A number is an optional leading `-` followed by digits containing at most
/// one `.`. Returns the literal's type, or `None` if the token is not a number.
pub fn classify_number(token: &str) -> Option<ScalarType> {
    let digits = token.strip_prefix('-').unwrap_or(token);
    let mut seen_dot = false;
    for c in digits.chars() {
        match c {
            '0'..='9' => {}
            '.' if !seen_dot => seen_dot = true,
            _ => return None,
        }
    }
    Some(if seen_dot {
        ScalarType::Double
    } else {
        ScalarType::Integer
    })
}

fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || c == ':'
}

/// Formula parser
struct Parser<'a> {
    source: &'a str,
    max_depth: usize,
}

impl<'a> Parser<'a> {
    /// Parse `source[start..end]` into a (flattened) sequence
    fn parse_scope(&self, start: usize, end: usize, depth: usize) -> ParseResult<Node> {
        if depth > self.max_depth {
            return Err(ParseError::NestingTooDeep {
                limit: self.max_depth,
            });
        }

        let scope = &self.source[start..end];
        let bytes = scope.as_bytes();
        let mut items = Vec::new();
        let mut pos = 0;

        while pos < bytes.len() {
            let c = bytes[pos];
            match c {
                b' ' | b',' => {
                    pos += 1;
                }

                b'(' => {
                    let close = find_closing_bracket(bytes, pos).ok_or(
                        ParseError::UnmatchedBracket {
                            position: start + pos,
                        },
                    )?;
                    if close == pos + 1 {
                        return Err(ParseError::EmptyGroup {
                            position: start + pos,
                        });
                    }
                    items.push(self.parse_scope(start + pos + 1, start + close, depth + 1)?);
                    pos = close + 1;
                }

                b'$' => {
                    let name_start = pos + 1;
                    let name_end = scope[name_start..]
                        .char_indices()
                        .find(|&(_, ch)| !is_name_char(ch))
                        .map_or(scope.len(), |(i, _)| name_start + i);
                    if name_end == name_start {
                        return Err(ParseError::InvalidVariableName {
                            position: start + pos,
                        });
                    }
                    items.push(Node::Variable(scope[name_start..name_end].to_string()));
                    pos = name_end;
                }

                b'\'' => {
                    let close = scope[pos + 1..]
                        .find('\'')
                        .map(|i| pos + 1 + i)
                        .ok_or(ParseError::UnterminatedString {
                            position: start + pos,
                        })?;
                    items.push(Node::constant(&scope[pos + 1..close], ScalarType::String));
                    pos = close + 1;
                }

                // A path has no terminator: it takes the rest of the scope
                b'/' if bytes.get(pos + 1) == Some(&b'/') => {
                    items.push(Node::XPath(scope[pos..].to_string()));
                    pos = bytes.len();
                }

                b'!' if bytes.get(pos + 1) == Some(&b'=') => {
                    items.push(Node::Operator(OperatorKind::NotEqual));
                    pos += 2;
                }

                _ if SYMBOL_CHARS.contains(&c) => {
                    let token = &scope[pos..pos + 1];
                    let kind =
                        OperatorKind::from_token(token).ok_or_else(|| ParseError::UnknownOperator {
                            token: token.to_string(),
                            position: start + pos,
                        })?;
                    items.push(Node::Operator(kind));
                    pos += 1;
                }

                // The conditional takes the rest of the scope
                _ if scope[pos..].starts_with("if") => {
                    items.push(self.parse_condition(start, scope, pos, depth)?);
                    pos = bytes.len();
                }

                _ => {
                    let mut token_end = pos + 1;
                    while token_end < bytes.len() && !BOUNDARY_CHARS.contains(&bytes[token_end]) {
                        token_end += 1;
                    }
                    let token = &scope[pos..token_end];
                    items.push(self.classify_token(token, start + pos)?);
                    pos = token_end;
                }
            }
        }

        Ok(Node::sequence(items))
    }

    /// Parse `if <test> then <a> else <b>` starting at `if_pos` within `scope`
    fn parse_condition(
        &self,
        start: usize,
        scope: &str,
        if_pos: usize,
        depth: usize,
    ) -> ParseResult<Node> {
        let then_pos = scope[if_pos..]
            .find("then")
            .map(|i| if_pos + i)
            .ok_or(ParseError::MissingThen {
                position: start + if_pos,
            })?;
        let else_pos = scope[then_pos + 1..]
            .find("else")
            .map(|i| then_pos + 1 + i)
            .ok_or(ParseError::MissingElse {
                position: start + then_pos,
            })?;

        let test = self.parse_scope(start + if_pos + 2, start + then_pos, depth + 1)?;
        let then_branch = self.parse_scope(start + then_pos + 4, start + else_pos, depth + 1)?;
        let else_branch = self.parse_scope(start + else_pos + 4, start + scope.len(), depth + 1)?;

        Ok(Node::condition(test, then_branch, else_branch))
    }

    fn classify_token(&self, token: &str, position: usize) -> ParseResult<Node> {
        if let Some(ty) = classify_number(token) {
            return Ok(Node::constant(token, ty));
        }
        OperatorKind::from_token(token)
            .map(Node::Operator)
            .ok_or_else(|| ParseError::UnknownOperator {
                token: token.to_string(),
                position,
            })
    }
}

/// Index of the `)` matching the `(` at `open`, by depth counting
fn find_closing_bracket(bytes: &[u8], open: usize) -> Option<usize> {
    let mut balance = 1usize;
    for (i, &b) in bytes.iter().enumerate().skip(open + 1) {
        match b {
            b'(' => balance += 1,
            b')' => {
                balance -= 1;
                if balance == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}
