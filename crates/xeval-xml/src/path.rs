//! Location paths
//!
//! A small subset of XPath location paths: `/`-separated element name
//! tests with the child (`/`) and descendant (`//`) axes, the `*` wildcard,
//! and an optional final `@attribute` step. A path without a leading slash
//! starts at the document node, like an absolute one. Name tests without a
//! prefix also match prefixed names by their local part.

use xeval_core::LookupError;

use crate::document::{Element, XmlDocument, DOCUMENT_NODE};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    Child,
    Descendant,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum NameTest {
    Any,
    Name(String),
}

impl NameTest {
    fn parse(step: &str, path: &str) -> Result<Self, LookupError> {
        if step == "*" {
            return Ok(NameTest::Any);
        }
        let valid = step
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, ':' | '_' | '-' | '.'));
        if !valid || step.starts_with(':') || step == "." || step == ".." {
            return Err(LookupError::Query {
                path: path.to_string(),
                reason: format!("unsupported step '{}'", step),
            });
        }
        Ok(NameTest::Name(step.to_string()))
    }

    fn matches(&self, name: &str) -> bool {
        match self {
            NameTest::Any => true,
            NameTest::Name(test) if test.contains(':') => name == test,
            NameTest::Name(test) => name == test || local_part(name) == test,
        }
    }
}

fn local_part(name: &str) -> &str {
    name.rsplit(':').next().unwrap_or(name)
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Step {
    axis: Axis,
    test: NameTest,
}

/// A parsed location path
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PathExpr {
    steps: Vec<Step>,
    attribute: Option<NameTest>,
}

impl PathExpr {
    pub(crate) fn parse(path: &str) -> Result<Self, LookupError> {
        let path = path.trim();
        let query = |reason: &str| LookupError::Query {
            path: path.to_string(),
            reason: reason.to_string(),
        };

        let (mut axis, mut rest) = if let Some(rest) = path.strip_prefix("//") {
            (Axis::Descendant, rest)
        } else if let Some(rest) = path.strip_prefix('/') {
            (Axis::Child, rest)
        } else {
            (Axis::Child, path)
        };

        let mut steps = Vec::new();
        let mut attribute = None;
        loop {
            let (step, remainder) = match rest.find('/') {
                Some(i) => (&rest[..i], Some(&rest[i..])),
                None => (rest, None),
            };
            if step.is_empty() {
                return Err(query("empty step"));
            }

            if let Some(name) = step.strip_prefix('@') {
                if remainder.is_some() {
                    return Err(query("attribute step must be last"));
                }
                if axis == Axis::Descendant {
                    return Err(query("attribute step must follow '/'"));
                }
                attribute = Some(NameTest::parse(name, path)?);
                break;
            }

            steps.push(Step {
                axis,
                test: NameTest::parse(step, path)?,
            });

            match remainder {
                None => break,
                Some(r) => {
                    if let Some(r) = r.strip_prefix("//") {
                        axis = Axis::Descendant;
                        rest = r;
                    } else {
                        axis = Axis::Child;
                        rest = &r[1..];
                    }
                }
            }
        }

        Ok(Self { steps, attribute })
    }

    /// Text of every selected node, in document order
    pub(crate) fn select(&self, doc: &XmlDocument) -> Vec<String> {
        let mut context = vec![DOCUMENT_NODE];
        for step in &self.steps {
            let mut next = Vec::new();
            for &node in &context {
                let candidates = match step.axis {
                    Axis::Child => doc.elements[node].child_elements().collect(),
                    Axis::Descendant => descendants(doc, node),
                };
                next.extend(
                    candidates
                        .into_iter()
                        .filter(|&id| step.test.matches(&doc.elements[id].name)),
                );
            }
            // Arena indices follow document order
            next.sort_unstable();
            next.dedup();
            context = next;
        }

        match &self.attribute {
            None => context.iter().map(|&id| doc.text_content(id)).collect(),
            Some(test) => context
                .iter()
                .flat_map(|&id| attribute_values(&doc.elements[id], test))
                .collect(),
        }
    }
}

fn descendants(doc: &XmlDocument, node: usize) -> Vec<usize> {
    let mut found = Vec::new();
    let mut stack: Vec<usize> = doc.elements[node].child_elements().collect();
    while let Some(id) = stack.pop() {
        found.push(id);
        stack.extend(doc.elements[id].child_elements());
    }
    found
}

fn attribute_values(element: &Element, test: &NameTest) -> Vec<String> {
    match test {
        NameTest::Name(name) if name.contains(':') => element
            .attribute(name)
            .map(str::to_string)
            .into_iter()
            .collect(),
        _ => element
            .attributes
            .iter()
            .filter(|(key, _)| test.matches(key))
            .map(|(_, value)| value.clone())
            .collect(),
    }
}
