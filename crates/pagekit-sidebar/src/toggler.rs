//! Sidebar toggler
//!
//! Inserts a trigger link in front of the sidebar panel and runs a show or
//! hide animation when the trigger is activated.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use pagekit_dom::{Document, DomTree, EventType, NodeId, StyleProp, TimerId};

use crate::animations::{COLLAPSED, build, hidden_margin};
use crate::{AnimationKind, Animator, SidebarError, SidebarOptions};

const TRIGGER_SELECTOR: &str = "a.trigger";

/// Nodes and measurements one sidebar works with
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SidebarParts {
    pub container: NodeId,
    pub trigger: NodeId,
    pub panel: NodeId,
    pub main: NodeId,
    /// Panel width
    pub pw: f32,
    /// Trigger outer width
    pub tw: f32,
}

/// One installed sidebar
pub struct SidebarToggler {
    parts: SidebarParts,
    options: SidebarOptions,
    animator: Rc<dyn Animator>,
    pending: Cell<Option<TimerId>>,
}

impl fmt::Debug for SidebarToggler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SidebarToggler")
            .field("parts", &self.parts)
            .field("options", &self.options)
            .field("pending", &self.pending.get())
            .finish()
    }
}

/// Inline width of an element, 0 when unset
fn width_of(tree: &DomTree, node: NodeId) -> f32 {
    tree.element(node)
        .and_then(|e| e.style.get(StyleProp::Width))
        .unwrap_or(0.0)
}

fn set_style(doc: &mut Document, node: NodeId, prop: StyleProp, value: f32) {
    if let Some(elem) = doc.tree.element_mut(node) {
        elem.style.set(prop, value);
    }
}

impl SidebarToggler {
    /// Install a sidebar on `container`.
    ///
    /// Nothing in the document changes unless every part is found.
    pub fn apply(
        doc: &mut Document,
        container: NodeId,
        options: SidebarOptions,
        animator: Rc<dyn Animator>,
    ) -> Result<Rc<Self>, SidebarError> {
        let tree = doc.tree();
        if !tree.is_element(container) {
            return Err(SidebarError::NotAnElement(container));
        }

        let panel = tree
            .query_selector(container, &options.sidebar)?
            .ok_or_else(|| SidebarError::PanelNotFound(options.sidebar.clone()))?;
        let panel_parent = tree
            .parent(panel)
            .ok_or(SidebarError::PanelNotFound(options.sidebar.clone()))?;
        let wrapper = tree
            .closest(container, &options.wrapper)?
            .ok_or_else(|| SidebarError::WrapperNotFound(options.wrapper.clone()))?;
        let main = tree
            .query_selector(wrapper, &options.main_content)?
            .ok_or_else(|| SidebarError::MainContentNotFound(options.main_content.clone()))?;
        let pw = width_of(tree, panel);
        if pw == 0.0 {
            tracing::debug!(?panel, "Sidebar panel has no width");
        }

        let label = if options.starts_hidden() {
            &options.trigger_show
        } else {
            &options.trigger_hide
        };
        let trigger = doc
            .tree
            .create_element_with("a", &[("class", "trigger"), ("href", "#")]);
        doc.tree.set_text_content(trigger, label)?;
        doc.tree.insert_before(panel_parent, trigger, Some(panel))?;

        let parts = SidebarParts {
            container,
            trigger,
            panel,
            main,
            pw,
            tw: options.trigger_width,
        };
        let toggler = Rc::new(Self {
            parts,
            options,
            animator,
            pending: Cell::new(None),
        });

        toggler.init_positions(doc);
        toggler.listen(doc);

        tracing::info!(
            ?container,
            hidden = toggler.options.starts_hidden(),
            animation = toggler.options.animation.name(),
            "Sidebar installed"
        );
        Ok(toggler)
    }

    pub fn parts(&self) -> &SidebarParts {
        &self.parts
    }

    pub fn options(&self) -> &SidebarOptions {
        &self.options
    }

    /// Whether the sidebar is currently shown, judged by the trigger text
    pub fn is_shown(&self, tree: &DomTree) -> bool {
        tree.text_content(self.parts.trigger) != self.options.trigger_show
    }

    /// Whether a hover activation is waiting for its delay
    pub fn has_pending(&self) -> bool {
        self.pending.get().is_some()
    }

    /// Move a sidebar that starts hidden out of view
    pub fn init_positions(&self, doc: &mut Document) {
        if !self.options.starts_hidden() {
            return;
        }
        let position = self.options.position;
        set_style(doc, self.parts.panel, position.offset_prop(), -(self.parts.pw + 1.0));
        set_style(
            doc,
            self.parts.main,
            position.margin_prop(),
            hidden_margin(&self.parts, &self.options),
        );
        doc.tree.add_class(self.parts.trigger, COLLAPSED);
    }

    /// Animation for a trigger: the one its `attr` attribute names, else
    /// the configured one
    pub fn animation_for(&self, tree: &DomTree, trigger: NodeId) -> AnimationKind {
        if self.options.attr.is_empty() {
            return self.options.animation;
        }
        tree.attr(trigger, &self.options.attr)
            .and_then(AnimationKind::from_name)
            .unwrap_or(self.options.animation)
    }

    /// Show or hide right away with the trigger's animation
    pub fn toggle(&self, doc: &mut Document) {
        let kind = self.animation_for(doc.tree(), self.parts.trigger);
        self.run(doc, self.parts.trigger, kind);
    }

    fn run(&self, doc: &mut Document, trigger: NodeId, kind: AnimationKind) {
        let showing = doc.tree().text_content(trigger) == self.options.trigger_show;
        let parts = SidebarParts {
            trigger,
            ..self.parts
        };
        let effects = build(kind, &parts, &self.options, showing);
        tracing::debug!(
            animation = kind.name(),
            showing,
            duration_ms = effects.duration_ms(),
            "Running sidebar animation"
        );
        self.animator.run(doc, effects);
    }

    fn listen(self: &Rc<Self>, doc: &mut Document) {
        for ty in self.options.activation_events() {
            let this = Rc::clone(self);
            if ty.bubbles() {
                doc.add_event_listener(self.parts.container, ty, move |doc, event| {
                    let Some(trigger) = this.delegate_target(doc.tree(), event.target) else {
                        return;
                    };
                    event.prevent_default();
                    this.activate(doc, trigger);
                });
            } else {
                // Non-bubbling events never reach the container
                doc.add_event_listener(self.parts.trigger, ty, move |doc, event| {
                    event.prevent_default();
                    this.activate(doc, event.current_target);
                });
            }
        }

        if !self.options.is_click_mode() {
            let this = Rc::clone(self);
            doc.add_event_listener(self.parts.trigger, EventType::MouseLeave, move |doc, _| {
                this.cancel_pending(doc);
            });
        }
    }

    /// Trigger link inside the container that an event target belongs to
    fn delegate_target(&self, tree: &DomTree, target: NodeId) -> Option<NodeId> {
        let trigger = tree.closest(target, TRIGGER_SELECTOR).ok().flatten()?;
        (trigger != self.parts.container && tree.is_inclusive_ancestor(self.parts.container, trigger))
            .then_some(trigger)
    }

    fn activate(self: &Rc<Self>, doc: &mut Document, trigger: NodeId) {
        let kind = self.animation_for(doc.tree(), trigger);
        if self.options.is_click_mode() {
            self.run(doc, trigger, kind);
            return;
        }

        self.cancel_pending(doc);
        let this = Rc::clone(self);
        let id = doc.set_timeout(
            move |doc| {
                this.pending.set(None);
                this.run(doc, trigger, kind);
            },
            self.options.interval,
        );
        self.pending.set(Some(id));
    }

    fn cancel_pending(&self, doc: &mut Document) {
        if let Some(id) = self.pending.take() {
            tracing::trace!(?id, "Cancelling hover activation");
            doc.clear_timer(id);
        }
    }
}
