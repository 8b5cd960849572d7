//! Toggle crawler
//!
//! One pre-order pass binds every trigger to the element after it. A click
//! then flips two independent markers: the trigger's collapsed token and the
//! target's hidden token. The second flip reads only the target, so the two
//! can drift apart if other code edits either class list directly.

use std::rc::Rc;

use crate::{ClickHandler, ToggleConfig, ToggleTree};

/// A trigger and the target it was bound to during the crawl
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriggerBinding<N> {
    pub trigger: N,
    pub target: N,
}

/// What a crawl did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlReport<N> {
    /// Nodes popped off the crawl stack. Text and comment siblings skipped
    /// while looking for the next element are not counted.
    pub visited: usize,
    /// Triggers bound, in document order
    pub bindings: Vec<TriggerBinding<N>>,
}

impl<N> CrawlReport<N> {
    fn new() -> Self {
        Self {
            visited: 0,
            bindings: Vec::new(),
        }
    }
}

/// Binds triggers and flips their state on click
#[derive(Debug, Clone)]
pub struct ToggleCrawler {
    config: Rc<ToggleConfig>,
}

/// Crawl `tree` from its crawl root with a fresh crawler.
///
/// Running this twice attaches a second handler to every trigger.
pub fn init<T: ToggleTree + 'static>(tree: &mut T, config: ToggleConfig) -> CrawlReport<T::Node> {
    ToggleCrawler::new(config).run(tree)
}

impl ToggleCrawler {
    pub fn new(config: ToggleConfig) -> Self {
        if let Err(err) = config.validate() {
            tracing::warn!(%err, "Toggle configuration is degraded");
        }
        Self {
            config: Rc::new(config),
        }
    }

    pub fn config(&self) -> &ToggleConfig {
        &self.config
    }

    /// Crawl from the tree's crawl root
    pub fn run<T: ToggleTree + 'static>(&self, tree: &mut T) -> CrawlReport<T::Node> {
        let report = match tree.crawl_root() {
            Some(root) => self.crawl(tree, root),
            None => CrawlReport::new(),
        };
        tracing::info!(
            visited = report.visited,
            bound = report.bindings.len(),
            trigger = %self.config.trigger,
            "Toggle crawl complete"
        );
        report
    }

    /// Visit `start`, its descendants, and its following siblings (and
    /// theirs), binding every trigger along the way.
    pub fn crawl<T: ToggleTree + 'static>(&self, tree: &mut T, start: T::Node) -> CrawlReport<T::Node> {
        let mut report = CrawlReport::new();
        if !self.config.is_enabled() {
            return report;
        }

        // Pushing the sibling before the child keeps pre-order.
        let mut stack = vec![start];
        while let Some(node) = stack.pop() {
            report.visited += 1;
            let next = self.get_next_sibling(tree, node);

            if let Some(target) = next {
                if tree.has_class(node, &self.config.trigger) {
                    self.bind(tree, node, target);
                    report.bindings.push(TriggerBinding { trigger: node, target });
                }
                stack.push(target);
            }
            if let Some(child) = tree.first_child(node) {
                stack.push(child);
            }
        }

        report
    }

    fn bind<T: ToggleTree + 'static>(&self, tree: &mut T, trigger: T::Node, target: T::Node) {
        let crawler = self.clone();
        let handler: ClickHandler<T> =
            Rc::new(move |tree: &mut T, node: T::Node| crawler.toggle_state(tree, node));
        tree.on_click(trigger, handler);

        let config = &self.config;
        if tree.has_class(trigger, &config.closed_state) && !tree.has_class(target, &config.hidden_state) {
            tree.add_class(target, &config.hidden_state);
        }
        tracing::debug!(?trigger, ?target, "Bound toggle trigger");
    }

    /// The next sibling that is an element, if any
    pub fn get_next_sibling<T: ToggleTree>(&self, tree: &T, node: T::Node) -> Option<T::Node> {
        let mut sibling = tree.next_sibling(node);
        while let Some(sib) = sibling {
            if tree.is_element(sib) {
                return Some(sib);
            }
            sibling = tree.next_sibling(sib);
        }
        None
    }

    /// Flip the trigger's collapsed token, then flip the hidden token of
    /// whatever element currently follows it. A missing target is ignored.
    pub fn toggle_state<T: ToggleTree>(&self, tree: &mut T, trigger: T::Node) {
        let config = &self.config;
        if tree.has_class(trigger, &config.closed_state) {
            tree.remove_class(trigger, &config.closed_state);
        } else {
            tree.add_class(trigger, &config.closed_state);
        }

        let Some(target) = self.get_next_sibling(tree, trigger) else {
            tracing::debug!(?trigger, "Toggle target is gone");
            return;
        };

        if tree.has_class(target, &config.hidden_state) {
            tree.remove_class(target, &config.hidden_state);
        } else {
            tree.add_class(target, &config.hidden_state);
        }
    }
}
