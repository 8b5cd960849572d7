//! Page - behaviours installed on one document

use std::cell::RefCell;
use std::rc::Rc;

use pagekit_autosave::{FormAutosave, Prompt};
use pagekit_dom::{Document, EventType, NodeId};
use pagekit_sidebar::{Animator, SidebarToggler};
use pagekit_toggle::{CrawlReport, ToggleConfig};

use crate::{Config, SidebarBinding};

#[derive(Debug, Default)]
struct Installed {
    toggles: Option<CrawlReport<NodeId>>,
    sidebars: Vec<Rc<SidebarToggler>>,
}

/// Handle to the behaviours installed on a document
#[derive(Debug, Clone)]
pub struct Page {
    installed: Rc<RefCell<Installed>>,
    autosave: Option<Rc<FormAutosave>>,
}

impl Page {
    /// Register everything `config` enables. Toggles and sidebars are set
    /// up on DOMContentLoaded, autosave on load.
    pub fn install(
        doc: &mut Document,
        config: Config,
        prompt: Rc<dyn Prompt>,
        animator: Rc<dyn Animator>,
    ) -> Self {
        let installed = Rc::new(RefCell::new(Installed::default()));

        let Config {
            toggle,
            autosave,
            sidebars,
        } = config;
        let toggles_enabled = toggle.is_some();
        let sidebar_count = sidebars.len();

        if toggles_enabled || sidebar_count > 0 {
            let state = Rc::clone(&installed);
            doc.add_event_listener(NodeId::ROOT, EventType::DomContentLoaded, move |doc, _| {
                let mut state = state.borrow_mut();
                if let Some(toggle) = &toggle {
                    state.toggles = Some(install_toggles(doc, toggle));
                }
                for binding in &sidebars {
                    state
                        .sidebars
                        .extend(install_sidebars(doc, binding, &animator));
                }
            });
        }

        let autosave = autosave.map(|config| {
            let autosave = FormAutosave::new(config);
            autosave.install(doc, prompt);
            autosave
        });

        tracing::info!(
            toggles = toggles_enabled,
            sidebars = sidebar_count,
            autosave = autosave.is_some(),
            "pagekit {} installed",
            crate::VERSION
        );

        Self {
            installed,
            autosave,
        }
    }

    /// Result of the toggle crawl, once DOMContentLoaded has fired
    pub fn toggles(&self) -> Option<CrawlReport<NodeId>> {
        self.installed.borrow().toggles.clone()
    }

    /// Sidebars installed so far
    pub fn sidebars(&self) -> Vec<Rc<SidebarToggler>> {
        self.installed.borrow().sidebars.clone()
    }

    pub fn autosave(&self) -> Option<&Rc<FormAutosave>> {
        self.autosave.as_ref()
    }
}

fn install_toggles(doc: &mut Document, config: &ToggleConfig) -> CrawlReport<NodeId> {
    pagekit_toggle::init(doc, config.clone())
}

fn install_sidebars(
    doc: &mut Document,
    binding: &SidebarBinding,
    animator: &Rc<dyn Animator>,
) -> Vec<Rc<SidebarToggler>> {
    let root = doc.tree().root();
    let containers = match doc.tree().query_selector_all(root, &binding.container) {
        Ok(containers) => containers,
        Err(err) => {
            tracing::warn!(%err, container = %binding.container, "Skipping sidebar");
            return Vec::new();
        }
    };
    if containers.is_empty() {
        tracing::debug!(container = %binding.container, "No sidebar container on this page");
    }

    containers
        .into_iter()
        .filter_map(|container| {
            SidebarToggler::apply(doc, container, binding.options.clone(), Rc::clone(animator))
                .inspect_err(|err| {
                    tracing::warn!(%err, container = %binding.container, "Sidebar not installed");
                })
                .ok()
        })
        .collect()
}
