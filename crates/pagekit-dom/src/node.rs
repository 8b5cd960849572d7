//! DOM Node
//!
//! Links are stored as `NodeId`s into the owning arena, with `NodeId::NONE`
//! marking a missing parent, child or sibling.

use crate::{ClassList, InlineStyle, NodeId};

/// DOM Node - Core structure
#[derive(Debug, Clone)]
pub struct Node {
    /// Parent node (NONE if root or detached)
    pub parent: NodeId,
    /// First child
    pub first_child: NodeId,
    /// Last child (for O(1) append)
    pub last_child: NodeId,
    /// Previous sibling
    pub prev_sibling: NodeId,
    /// Next sibling
    pub next_sibling: NodeId,
    /// Node-specific data
    pub data: NodeData,
}

impl Node {
    fn with_data(data: NodeData) -> Self {
        Self {
            parent: NodeId::NONE,
            first_child: NodeId::NONE,
            last_child: NodeId::NONE,
            prev_sibling: NodeId::NONE,
            next_sibling: NodeId::NONE,
            data,
        }
    }

    /// Create a new element node
    pub fn element(tag: &str) -> Self {
        Self::with_data(NodeData::Element(ElementData::new(tag)))
    }

    /// Create a new text node
    pub fn text(content: impl Into<String>) -> Self {
        Self::with_data(NodeData::Text(content.into()))
    }

    /// Create a new comment node
    pub fn comment(content: impl Into<String>) -> Self {
        Self::with_data(NodeData::Comment(content.into()))
    }

    /// Create a document node
    pub fn document() -> Self {
        Self::with_data(NodeData::Document)
    }

    /// Check if this is an element
    #[inline]
    pub fn is_element(&self) -> bool {
        matches!(self.data, NodeData::Element(_))
    }

    /// Get element data if this is an element
    #[inline]
    pub fn as_element(&self) -> Option<&ElementData> {
        match &self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Get mutable element data
    #[inline]
    pub fn as_element_mut(&mut self) -> Option<&mut ElementData> {
        match &mut self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Get text content if this is a text node
    #[inline]
    pub fn as_text(&self) -> Option<&str> {
        match &self.data {
            NodeData::Text(t) => Some(t),
            _ => None,
        }
    }
}

/// Node-specific data
#[derive(Debug, Clone)]
pub enum NodeData {
    /// Document root
    Document,
    /// Element
    Element(ElementData),
    /// Text content
    Text(String),
    /// Comment
    Comment(String),
}

/// Element-specific data
#[derive(Debug, Clone)]
pub struct ElementData {
    /// Tag name, lowercased
    pub tag: String,
    /// Attributes other than `class` and `style`
    pub attrs: Vec<Attribute>,
    /// Class list
    pub classes: ClassList,
    /// Inline style
    pub style: InlineStyle,
    /// Current value of a form control (input, textarea)
    pub value: String,
}

impl ElementData {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            attrs: Vec::new(),
            classes: ClassList::new(),
            style: InlineStyle::new(),
            value: String::new(),
        }
    }

    /// Get an attribute value
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|a| a.name.eq_ignore_ascii_case(name))
            .map(|a| a.value.as_str())
    }

    /// Set an attribute. `class` and `style` are parsed into the class list
    /// and inline style; `value` also seeds the control's current value.
    pub fn set_attr(&mut self, name: &str, value: &str) {
        let name = name.to_ascii_lowercase();
        match name.as_str() {
            "class" => {
                self.classes.set_value(value);
                return;
            }
            "style" => {
                self.style = InlineStyle::parse(value);
                return;
            }
            "value" => self.value = value.to_string(),
            _ => {}
        }

        if let Some(attr) = self.attrs.iter_mut().find(|a| a.name == name) {
            attr.value = value.to_string();
        } else {
            self.attrs.push(Attribute {
                name,
                value: value.to_string(),
            });
        }
    }

    /// Element id attribute
    pub fn id(&self) -> Option<&str> {
        self.attr("id")
    }

    /// Check tag name (case-insensitive)
    pub fn is(&self, tag: &str) -> bool {
        self.tag.eq_ignore_ascii_case(tag)
    }
}

/// Attribute
#[derive(Debug, Clone)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_attribute_feeds_class_list() {
        let mut elem = ElementData::new("DIV");
        elem.set_attr("class", "toggle closed");
        assert_eq!(elem.tag, "div");
        assert!(elem.classes.contains("closed"));
        assert_eq!(elem.attr("class"), None);
    }

    #[test]
    fn test_set_attr_overwrites() {
        let mut elem = ElementData::new("input");
        elem.set_attr("type", "text");
        elem.set_attr("TYPE", "hidden");
        assert_eq!(elem.attr("type"), Some("hidden"));
        assert_eq!(elem.attrs.len(), 1);
    }

    #[test]
    fn test_value_attribute_seeds_value() {
        let mut elem = ElementData::new("input");
        elem.set_attr("value", "hello");
        assert_eq!(elem.value, "hello");
    }
}
