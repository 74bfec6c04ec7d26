//! In-memory XML document

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use xeval_core::{LookupError, XmlLookup};

use crate::error::{XmlError, XmlResult};
use crate::path::PathExpr;

/// Index of the synthetic document node that owns the root element
pub(crate) const DOCUMENT_NODE: usize = 0;

/// A piece of element content, in document order
#[derive(Debug, Clone)]
pub(crate) enum Content {
    Text(String),
    Element(usize),
}

#[derive(Debug, Clone)]
pub(crate) struct Element {
    pub(crate) name: String,
    pub(crate) attributes: Vec<(String, String)>,
    pub(crate) content: Vec<Content>,
}

impl Element {
    fn new(name: String) -> Self {
        Self {
            name,
            attributes: Vec::new(),
            content: Vec::new(),
        }
    }

    pub(crate) fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub(crate) fn child_elements(&self) -> impl Iterator<Item = usize> + '_ {
        self.content.iter().filter_map(|c| match c {
            Content::Element(id) => Some(*id),
            Content::Text(_) => None,
        })
    }
}

/// A parsed XML document answering text-at-path queries
///
/// Elements are stored in an arena in document order; index 0 is a
/// synthetic document node whose only child is the root element.
///
/// # Example
/// ```rust
/// use xeval_core::XmlLookup;
/// use xeval_xml::XmlDocument;
///
/// let doc = XmlDocument::parse_str("<report><end>2000-06-30</end></report>").unwrap();
/// assert_eq!(doc.text_at("//report/end").unwrap(), "2000-06-30");
/// ```
#[derive(Debug, Clone)]
pub struct XmlDocument {
    pub(crate) elements: Vec<Element>,
}

impl XmlDocument {
    /// Parse a document held in memory
    pub fn parse_str(xml: &str) -> XmlResult<Self> {
        Self::from_reader(xml.as_bytes())
    }

    /// Open and parse a document file
    pub fn open<P: AsRef<Path>>(path: P) -> XmlResult<Self> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    /// Parse a document from any reader
    pub fn from_reader<R: Read>(reader: R) -> XmlResult<Self> {
        let mut xml_reader = Reader::from_reader(BufReader::new(reader));
        xml_reader.trim_text(true);

        let mut elements = vec![Element::new(String::new())];
        let mut open = vec![DOCUMENT_NODE];
        let mut buf = Vec::new();

        loop {
            match xml_reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => {
                    let id = push_element(&mut elements, &open, &e)?;
                    open.push(id);
                }
                Ok(Event::Empty(e)) => {
                    push_element(&mut elements, &open, &e)?;
                }
                Ok(Event::End(_)) => {
                    open.pop();
                }
                Ok(Event::Text(e)) => match e.unescape() {
                    Ok(text) => push_text(&mut elements, &open, &text),
                    Err(err) => log::warn!("skipping undecodable text: {}", err),
                },
                Ok(Event::CData(e)) => {
                    let bytes = e.into_inner();
                    match std::str::from_utf8(&bytes) {
                        Ok(text) => push_text(&mut elements, &open, text),
                        Err(err) => log::warn!("skipping undecodable CDATA: {}", err),
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(XmlError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        if open.len() > 1 {
            return Err(XmlError::InvalidFormat(format!(
                "{} element(s) not closed",
                open.len() - 1
            )));
        }
        if elements[DOCUMENT_NODE].child_elements().next().is_none() {
            return Err(XmlError::InvalidFormat("no root element".into()));
        }

        log::debug!("parsed XML document with {} element(s)", elements.len() - 1);
        Ok(Self { elements })
    }

    /// Name of the root element
    pub fn root_name(&self) -> &str {
        self.elements[DOCUMENT_NODE]
            .child_elements()
            .next()
            .map_or("", |id| self.elements[id].name.as_str())
    }

    /// Number of elements in the document
    pub fn element_count(&self) -> usize {
        self.elements.len() - 1
    }

    /// Concatenated text of an element and all its descendants
    pub(crate) fn text_content(&self, id: usize) -> String {
        let mut text = String::new();
        let mut stack: Vec<&[Content]> = vec![self.elements[id].content.as_slice()];
        while let Some(contents) = stack.pop() {
            let Some((first, rest)) = contents.split_first() else {
                continue;
            };
            stack.push(rest);
            match first {
                Content::Text(piece) => text.push_str(piece),
                Content::Element(child) => stack.push(&self.elements[*child].content),
            }
        }
        text
    }
}

impl XmlLookup for XmlDocument {
    fn text_at(&self, path: &str) -> Result<String, LookupError> {
        let expr = PathExpr::parse(path)?;
        let mut matches = expr.select(self);
        match matches.len() {
            0 => Err(LookupError::NotFound(path.trim().to_string())),
            1 => Ok(matches.swap_remove(0)),
            count => Err(LookupError::MultipleMatches {
                path: path.trim().to_string(),
                count,
            }),
        }
    }
}

fn push_element(elements: &mut Vec<Element>, open: &[usize], start: &BytesStart) -> XmlResult<usize> {
    let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
    let mut element = Element::new(name);
    for attr in start.attributes() {
        let attr = attr.map_err(quick_xml::Error::from)?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr.unescape_value()?.into_owned();
        element.attributes.push((key, value));
    }

    let parent = open.last().copied().unwrap_or(DOCUMENT_NODE);
    if parent == DOCUMENT_NODE && elements[DOCUMENT_NODE].child_elements().next().is_some() {
        return Err(XmlError::InvalidFormat(format!(
            "second root element <{}>",
            element.name
        )));
    }

    let id = elements.len();
    elements.push(element);
    elements[parent].content.push(Content::Element(id));
    Ok(id)
}

fn push_text(elements: &mut [Element], open: &[usize], text: &str) {
    // Text outside the root element is not part of any node
    match open.last() {
        Some(&parent) if parent != DOCUMENT_NODE => {
            elements[parent].content.push(Content::Text(text.to_string()))
        }
        _ => {}
    }
}
