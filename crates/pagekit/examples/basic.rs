//! Example: a page with every behaviour enabled
//!
//! Run with `RUST_LOG=debug` to see what gets installed.

use std::rc::Rc;

use pagekit::autosave::FixedAnswer;
use pagekit::dom::Document;
use pagekit::sidebar::TimedAnimator;
use pagekit::{Config, Page};
use tracing_subscriber::EnvFilter;

const CONFIG: &str = r#"{
    "toggle": { "trigger": "toggle", "closed_state": "closed", "hidden_state": "hidden" },
    "sidebars": [ { "container": "div.aside", "options": { "init_state": "hidden" } } ]
}"#;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut doc = Document::new("http://example.com/faq")?;
    let body = doc.body();

    let content = doc.tree.create_element_with("div", &[("id", "content")]);
    let main = doc.tree.create_element_with("div", &[("id", "main")]);
    let question = doc.tree.create_element_with("h3", &[("class", "toggle closed")]);
    let answer = doc.tree.create_element("p");
    let form = doc.tree.create_element("form");
    let reply = doc.tree.create_element("textarea");
    let aside = doc.tree.create_element_with("div", &[("class", "aside")]);
    let panel = doc.tree.create_element_with("div", &[("class", "slide"), ("style", "width: 220px")]);

    doc.tree.append_child(body, content)?;
    doc.tree.append_child(content, main)?;
    doc.tree.append_child(main, question)?;
    doc.tree.append_child(main, answer)?;
    doc.tree.append_child(main, form)?;
    doc.tree.append_child(form, reply)?;
    doc.tree.append_child(content, aside)?;
    doc.tree.append_child(aside, panel)?;

    let config = Config::from_json(CONFIG)?;
    let page = Page::install(&mut doc, config, Rc::new(FixedAnswer(true)), Rc::new(TimedAnimator));
    doc.content_loaded();
    doc.load();

    println!("pagekit v{}", pagekit::VERSION);
    println!("answer hidden: {}", doc.tree().has_class(answer, "hidden"));
    doc.click(question);
    println!("answer hidden after click: {}", doc.tree().has_class(answer, "hidden"));

    for sidebar in page.sidebars() {
        doc.click(sidebar.parts().trigger);
        doc.advance(2_000);
        println!("sidebar shown: {}", sidebar.is_shown(doc.tree()));
    }

    doc.type_text(reply, "Thanks, that helped!");
    doc.advance(500);
    println!("document.cookie = {:?}", doc.cookie());

    Ok(())
}
