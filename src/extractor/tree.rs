//! Light XML tree with namespace-agnostic element lookup.
//!
//! CT-e/NF-e documents vary in namespace declarations across schema
//! versions while the local field names stay stable, so lookups here match
//! only the local part of a tag (the text after any `prefix:`) and walk the
//! whole tree in document order. This is intentional; do not add
//! namespace-aware filtering.

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::error::{Error, Result};

/// One element of a parsed document.
#[derive(Debug, Clone, Default)]
pub struct XmlNode {
    /// Local tag name, namespace prefix stripped
    name: String,
    /// Direct text content, entity-decoded, segments concatenated
    text: String,
    /// Child elements in document order
    children: Vec<XmlNode>,
}

impl XmlNode {
    fn with_name(name: String) -> Self {
        Self {
            name,
            text: String::new(),
            children: Vec::new(),
        }
    }

    /// Local tag name of this element.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Direct text content of this element, trimmed.
    pub fn text(&self) -> &str {
        self.text.trim()
    }

    /// Child elements in document order.
    pub fn children(&self) -> &[XmlNode] {
        &self.children
    }

    /// First descendant whose local name matches one of `names`, searching
    /// in pre-order (document order). The node itself is not considered.
    pub fn first(&self, names: &[&str]) -> Option<&XmlNode> {
        for child in &self.children {
            if names.contains(&child.name.as_str()) {
                return Some(child);
            }
            if let Some(found) = child.first(names) {
                return Some(found);
            }
        }
        None
    }

    /// All descendants whose local name matches one of `names`, in document
    /// order. Matching wrappers and the blocks nested inside them are both
    /// reported, outermost first.
    pub fn matches<'a>(&'a self, names: &[&str]) -> Vec<&'a XmlNode> {
        let mut found = Vec::new();
        self.collect_matches(names, &mut found);
        found
    }

    fn collect_matches<'a>(&'a self, names: &[&str], found: &mut Vec<&'a XmlNode>) {
        for child in &self.children {
            if names.contains(&child.name.as_str()) {
                found.push(child);
            }
            child.collect_matches(names, found);
        }
    }

    /// Trimmed text of the first matching descendant, or `""` when absent.
    pub fn text_of(&self, names: &[&str]) -> &str {
        self.first(names).map(|n| n.text()).unwrap_or("")
    }

    /// All text in this element's subtree, segments joined with one space.
    pub fn deep_text(&self) -> String {
        let mut parts = Vec::new();
        self.collect_text(&mut parts);
        parts.join(" ")
    }

    fn collect_text(&self, parts: &mut Vec<String>) {
        let own = self.text();
        if !own.is_empty() {
            parts.push(own.to_string());
        }
        for child in &self.children {
            child.collect_text(parts);
        }
    }
}

/// Decode a local (prefix-stripped) tag name.
fn local_name(raw: &[u8]) -> String {
    String::from_utf8_lossy(raw).to_string()
}

/// Parse an XML document into a tree rooted at a synthetic node.
///
/// Malformed input is a hard error; no partial tree is returned.
pub fn parse(xml: &str) -> Result<XmlNode> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    // stack[0] is the synthetic root; real elements are pushed above it.
    let mut stack: Vec<XmlNode> = vec![XmlNode::default()];

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => {
                stack.push(XmlNode::with_name(local_name(e.local_name().as_ref())));
            },
            Ok(Event::Empty(ref e)) => {
                let node = XmlNode::with_name(local_name(e.local_name().as_ref()));
                if let Some(parent) = stack.last_mut() {
                    parent.children.push(node);
                }
            },
            Ok(Event::Text(e)) => {
                let text = e
                    .unescape()
                    .map_err(|err| Error::Parse(err.to_string()))?;
                if let Some(node) = stack.last_mut() {
                    node.text.push_str(&text);
                }
            },
            Ok(Event::CData(e)) => {
                let text = String::from_utf8_lossy(&e.into_inner()).to_string();
                if let Some(node) = stack.last_mut() {
                    node.text.push_str(&text);
                }
            },
            Ok(Event::End(_)) => {
                // quick-xml has already checked that the end tag matches.
                if stack.len() <= 1 {
                    return Err(Error::Parse("unexpected closing tag".to_string()));
                }
                let node = stack.pop().unwrap_or_default();
                if let Some(parent) = stack.last_mut() {
                    parent.children.push(node);
                }
            },
            Ok(Event::Eof) => break,
            Ok(_) => {},
            Err(e) => return Err(Error::Parse(e.to_string())),
        }
    }

    if stack.len() != 1 {
        return Err(Error::Parse(format!(
            "{} element(s) left unclosed at end of input",
            stack.len() - 1
        )));
    }

    let root = stack.pop().unwrap_or_default();
    if root.children.is_empty() {
        return Err(Error::Parse("document has no root element".to_string()));
    }
    Ok(root)
}
