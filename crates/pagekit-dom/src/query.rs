//! Element queries
//!
//! Compound simple selectors (`div`, `#main`, `.slide`, `a.trigger`,
//! `div#panel.slide.open`, `*`). Combinators are not supported.

use crate::{DomError, DomResult, DomTree, NodeId};

/// Parsed compound selector
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Selector {
    pub tag: Option<String>,
    pub id: Option<String>,
    pub classes: Vec<String>,
}

impl Selector {
    /// Parse a compound selector
    pub fn parse(s: &str) -> DomResult<Self> {
        let s = s.trim();
        let unsupported = || DomError::UnsupportedSelector(s.to_string());
        if s.is_empty() || s.contains(|c: char| c.is_whitespace() || ">+~,[]:".contains(c)) {
            return Err(unsupported());
        }

        let mut selector = Self::default();
        let (head, rest) = match s.find(['#', '.']) {
            Some(pos) => s.split_at(pos),
            None => (s, ""),
        };
        if head != "*" && !head.is_empty() {
            selector.tag = Some(head.to_ascii_lowercase());
        }

        let mut rest = rest;
        while let Some(marker) = rest.chars().next() {
            let body = &rest[1..];
            let end = body.find(['#', '.']).unwrap_or(body.len());
            let name = &body[..end];
            if name.is_empty() {
                return Err(unsupported());
            }
            match marker {
                '#' if selector.id.is_none() => selector.id = Some(name.to_string()),
                '.' => selector.classes.push(name.to_string()),
                _ => return Err(unsupported()),
            }
            rest = &body[end..];
        }

        Ok(selector)
    }

    /// Check if an element matches
    pub fn matches(&self, tree: &DomTree, node: NodeId) -> bool {
        let Some(elem) = tree.element(node) else { return false };
        if let Some(tag) = &self.tag {
            if !elem.is(tag) {
                return false;
            }
        }
        if let Some(id) = &self.id {
            if elem.id() != Some(id.as_str()) {
                return false;
            }
        }
        self.classes.iter().all(|c| elem.classes.contains(c))
    }
}

impl DomTree {
    /// First descendant of `root` matching the selector
    pub fn query_selector(&self, root: NodeId, selector: &str) -> DomResult<Option<NodeId>> {
        let selector = Selector::parse(selector)?;
        Ok(self.descendants(root).find(|&n| selector.matches(self, n)))
    }

    /// All descendants of `root` matching the selector
    pub fn query_selector_all(&self, root: NodeId, selector: &str) -> DomResult<Vec<NodeId>> {
        let selector = Selector::parse(selector)?;
        Ok(self
            .descendants(root)
            .filter(|&n| selector.matches(self, n))
            .collect())
    }

    /// Closest inclusive ancestor matching the selector
    pub fn closest(&self, node: NodeId, selector: &str) -> DomResult<Option<NodeId>> {
        let selector = Selector::parse(selector)?;
        Ok(self
            .ancestors_inclusive(node)
            .into_iter()
            .find(|&n| selector.matches(self, n)))
    }

    /// Check if element matches selector
    pub fn matches(&self, node: NodeId, selector: &str) -> DomResult<bool> {
        Ok(Selector::parse(selector)?.matches(self, node))
    }

    /// Find an element by id anywhere in the document
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.descendants(self.root())
            .find(|&n| self.element(n).is_some_and(|e| e.id() == Some(id)))
    }
}
