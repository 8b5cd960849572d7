//! Document host integration tests

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use pagekit_dom::{Document, DomError, EventType, NodeId};

fn append(doc: &mut Document, parent: NodeId, tag: &str, attrs: &[(&str, &str)]) -> NodeId {
    let node = doc.tree.create_element_with(tag, attrs);
    doc.tree.append_child(parent, node).unwrap();
    node
}

#[test]
fn test_listener_added_during_dispatch_runs_next_time() {
    let mut doc = Document::new("http://example.com/").unwrap();
    let body = doc.body();
    let button = append(&mut doc, body, "button", &[]);
    let late_calls = Rc::new(Cell::new(0));

    let late = Rc::clone(&late_calls);
    doc.add_event_listener(button, EventType::Click, move |doc, event| {
        let late = Rc::clone(&late);
        doc.add_event_listener(event.current_target, EventType::Click, move |_, _| {
            late.set(late.get() + 1);
        });
    });

    doc.click(button);
    assert_eq!(late_calls.get(), 0);
    doc.click(button);
    assert_eq!(late_calls.get(), 1);
}

#[test]
fn test_detached_node_events_stay_local() {
    let mut doc = Document::new("http://example.com/").unwrap();
    let body = doc.body();
    let list = append(&mut doc, body, "ul", &[]);
    let item = append(&mut doc, list, "li", &[]);
    let seen = Rc::new(RefCell::new(Vec::new()));

    for node in [body, list, item] {
        let seen = Rc::clone(&seen);
        doc.add_event_listener(node, EventType::Click, move |_, event| {
            seen.borrow_mut().push(event.current_target);
        });
    }

    doc.tree.remove(list).unwrap();
    assert!(!doc.tree().is_connected(item));
    doc.click(item);
    assert_eq!(*seen.borrow(), vec![item, list]);
}

#[test]
fn test_interval_cleared_by_listener() {
    let mut doc = Document::new("http://example.com/").unwrap();
    let body = doc.body();
    let stop = append(&mut doc, body, "button", &[]);
    let ticks = Rc::new(Cell::new(0));

    let counter = Rc::clone(&ticks);
    let interval = doc.set_interval(move |_| counter.set(counter.get() + 1), 100);
    doc.add_event_listener(stop, EventType::Click, move |doc, _| doc.clear_timer(interval));

    doc.advance(350);
    assert_eq!(ticks.get(), 3);
    assert_eq!(doc.now(), 350);

    doc.click(stop);
    doc.advance(1000);
    assert_eq!(ticks.get(), 3);
    assert!(!doc.timers().has_pending());
}

#[test]
fn test_cookies_follow_path_and_host() {
    let mut shop = Document::new("http://shop.example.com/cart/view").unwrap();
    assert!(shop.set_cookie("basket=3; path=/cart"));
    assert!(shop.set_cookie("theme=dark; domain=.example.com; path=/"));
    assert!(shop.set_cookie("checkout=1; path=/checkout"));

    let mut cookie = shop.cookie().split("; ").map(String::from).collect::<Vec<_>>();
    cookie.sort();
    assert_eq!(cookie, vec!["basket=3", "theme=dark"]);

    // Another page on a sibling host sees only the domain cookie
    let mut blog = Document::new("http://blog.example.com/").unwrap();
    *blog.cookies_mut() = shop.cookies().clone();
    assert_eq!(blog.cookie(), "theme=dark");
    assert_eq!(blog.cookie_value("basket"), None);
}

#[test]
fn test_selectors_over_page() {
    let mut doc = Document::new("http://example.com/").unwrap();
    let body = doc.body();
    let content = append(&mut doc, body, "div", &[("id", "content")]);
    let slide = append(&mut doc, content, "div", &[("class", "slide wide")]);
    let link = append(&mut doc, slide, "a", &[("class", "trigger")]);

    let tree = doc.tree();
    assert_eq!(tree.query_selector(body, "div.slide").unwrap(), Some(slide));
    assert_eq!(tree.query_selector(body, ".wide.slide").unwrap(), Some(slide));
    assert_eq!(tree.closest(link, "#content").unwrap(), Some(content));
    assert_eq!(tree.query_selector_all(body, "div").unwrap(), vec![content, slide]);
    assert!(matches!(
        tree.query_selector(body, "#content a"),
        Err(DomError::UnsupportedSelector(_))
    ));
}

#[test]
fn test_invalid_url() {
    assert!(matches!(Document::new("not a url"), Err(DomError::InvalidUrl(_))));
}
