//! Form autosave
//!
//! Every text input and textarea is tracked. Typing schedules a save; the
//! save writes all values, joined with `|`, into one cookie. On load the
//! user is offered the saved values back. Submitting any form drops them.

use std::cell::RefCell;
use std::rc::Rc;

use pagekit_dom::{Document, DomTree, EventType, ListenerId, NodeId, TimerId, http_date, unix_now};

use crate::{AutosaveConfig, Prompt, escape, unescape};

const SEPARATOR: &str = "|";

/// `<input>` types other than these report `type == "text"`
const INPUT_TYPES: &[&str] = &[
    "text", "password", "checkbox", "radio", "submit", "reset", "button", "hidden", "image",
    "file", "email", "url", "tel", "search", "number", "range", "date", "month", "week", "time",
    "datetime-local", "color",
];

/// Whether a node is an `<input>` whose effective type is text
pub fn is_text_input(tree: &DomTree, node: NodeId) -> bool {
    let Some(elem) = tree.element(node) else { return false };
    if !elem.is("input") {
        return false;
    }
    match elem.attr("type").map(|t| t.trim().to_ascii_lowercase()) {
        Some(t) if INPUT_TYPES.contains(&t.as_str()) => t == "text",
        _ => true,
    }
}

#[derive(Debug, Default)]
struct Fields {
    inputs: Vec<NodeId>,
    textareas: Vec<NodeId>,
    pending: Option<TimerId>,
}

/// Cookie-backed autosave for the fields of one document
#[derive(Debug)]
pub struct FormAutosave {
    config: AutosaveConfig,
    fields: RefCell<Fields>,
}

impl FormAutosave {
    pub fn new(config: AutosaveConfig) -> Rc<Self> {
        Rc::new(Self {
            config,
            fields: RefCell::new(Fields::default()),
        })
    }

    pub fn config(&self) -> &AutosaveConfig {
        &self.config
    }

    /// Start once the document has loaded
    pub fn install(self: &Rc<Self>, doc: &mut Document, prompt: Rc<dyn Prompt>) -> ListenerId {
        let this = Rc::clone(self);
        let root = doc.tree().root();
        doc.add_event_listener(root, EventType::Load, move |doc, _| {
            this.start(doc, prompt.as_ref());
        })
    }

    /// Find the fields, hook up the listeners, and offer a restore
    pub fn start(self: &Rc<Self>, doc: &mut Document, prompt: &dyn Prompt) {
        let root = doc.tree().root();
        let forms = doc.tree().elements_by_tag_name(root, "form");
        let textareas = doc.tree().elements_by_tag_name(root, "textarea");
        let inputs: Vec<NodeId> = doc
            .tree()
            .elements_by_tag_name(root, "input")
            .into_iter()
            .filter(|&n| is_text_input(doc.tree(), n))
            .collect();

        for &form in &forms {
            let this = Rc::clone(self);
            doc.add_event_listener(form, EventType::Submit, move |doc, _| this.clear(doc));
        }
        for &field in inputs.iter().chain(&textareas) {
            let this = Rc::clone(self);
            doc.add_event_listener(field, EventType::KeyUp, move |doc, _| this.prepare_save(doc));
        }

        tracing::info!(
            inputs = inputs.len(),
            textareas = textareas.len(),
            forms = forms.len(),
            "Form autosave started"
        );

        {
            let mut fields = self.fields.borrow_mut();
            fields.inputs = inputs;
            fields.textareas = textareas;
        }
        self.offer_repopulate(doc, prompt);
    }

    /// Tracked fields: text inputs first, then textareas
    pub fn tracked_fields(&self) -> Vec<NodeId> {
        let fields = self.fields.borrow();
        fields.inputs.iter().chain(&fields.textareas).copied().collect()
    }

    /// Whether a save is scheduled
    pub fn has_pending_save(&self) -> bool {
        self.fields.borrow().pending.is_some()
    }

    /// Restart the quiet period; the save runs once typing pauses
    pub fn prepare_save(self: &Rc<Self>, doc: &mut Document) {
        let previous = self.fields.borrow_mut().pending.take();
        if let Some(id) = previous {
            doc.clear_timer(id);
        }

        let this = Rc::clone(self);
        let id = doc.set_timeout(move |doc| this.save_data(doc), self.config.save_delay_ms);
        self.fields.borrow_mut().pending = Some(id);
    }

    /// Write the current field values to the cookie
    pub fn save_data(&self, doc: &mut Document) {
        self.fields.borrow_mut().pending = None;

        let values: Vec<String> = self
            .tracked_fields()
            .into_iter()
            .map(|n| doc.value(n).unwrap_or_default().to_string())
            .collect();
        let joined = values.join(SEPARATOR);

        let expires = unix_now() + self.config.lifetime_secs();
        self.write_cookie(doc, &joined, expires);
        tracing::debug!(fields = values.len(), bytes = joined.len(), "Saved form data");
    }

    /// Saved values, if the cookie holds anything
    pub fn saved_values(&self, doc: &Document) -> Option<Vec<String>> {
        let raw = doc.cookie_value(&self.config.cookie_name)?;
        if raw.is_empty() {
            return None;
        }
        Some(unescape(raw).split(SEPARATOR).map(String::from).collect())
    }

    /// Put saved values back, in field order, then drop the cookie.
    /// Fields beyond the saved values are left alone. Returns how many
    /// fields were filled.
    pub fn repopulate(&self, doc: &mut Document) -> usize {
        let Some(values) = self.saved_values(doc) else { return 0 };

        let mut restored = 0;
        for (field, value) in self.tracked_fields().into_iter().zip(values) {
            doc.set_value(field, &value);
            restored += 1;
        }

        self.clear(doc);
        tracing::info!(restored, "Restored saved form data");
        restored
    }

    /// Ask before restoring. Returns whether anything was restored.
    pub fn offer_repopulate(&self, doc: &mut Document, prompt: &dyn Prompt) -> bool {
        if self.saved_values(doc).is_none() {
            return false;
        }
        if !prompt.confirm(&self.config.restore_prompt) {
            tracing::debug!("Restore declined");
            return false;
        }
        self.repopulate(doc);
        true
    }

    /// Drop the saved values
    pub fn clear(&self, doc: &mut Document) {
        let expires = unix_now().saturating_sub(self.config.lifetime_secs());
        self.write_cookie(doc, "", expires);
    }

    fn write_cookie(&self, doc: &mut Document, value: &str, expires: u64) {
        let assignment = format!(
            "{}={}; expires={}; path=/",
            self.config.cookie_name,
            escape(value),
            http_date(expires)
        );
        if !doc.set_cookie(&assignment) {
            tracing::warn!(cookie = %self.config.cookie_name, "Cookie write rejected");
        }
    }
}
