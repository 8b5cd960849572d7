//! Sidebar behaviour against the in-memory document

use std::rc::Rc;

use pagekit_dom::{Document, EventType, NodeId, StyleProp};
use pagekit_sidebar::{
    AnimationKind, InitState, InstantAnimator, Position, RecordingAnimator, SidebarError,
    SidebarOptions, SidebarToggler, TimedAnimator,
};

struct Layout {
    doc: Document,
    content: NodeId,
    main: NodeId,
    panel: NodeId,
}

fn append(doc: &mut Document, parent: NodeId, tag: &str, attrs: &[(&str, &str)]) -> NodeId {
    let node = doc.tree.create_element_with(tag, attrs);
    doc.tree.append_child(parent, node).unwrap();
    node
}

/// `#content > (#main, div#sidebar > div.slide[width 200])`
fn layout() -> Layout {
    let mut doc = Document::new("http://example.com/docs").unwrap();
    let body = doc.body();
    let content = append(&mut doc, body, "div", &[("id", "content")]);
    let main = append(&mut doc, content, "div", &[("id", "main")]);
    let sidebar = append(&mut doc, content, "div", &[("id", "sidebar")]);
    let panel = append(&mut doc, sidebar, "div", &[("class", "slide"), ("style", "width: 200px")]);
    Layout {
        doc,
        content,
        main,
        panel,
    }
}

fn style(doc: &Document, node: NodeId, prop: StyleProp) -> Option<f32> {
    doc.tree().element(node).unwrap().style.get(prop)
}

fn options() -> SidebarOptions {
    SidebarOptions {
        trigger_width: 40.0,
        ..SidebarOptions::default()
    }
}

#[test]
fn test_trigger_inserted_before_panel() {
    let mut l = layout();
    let sidebar =
        SidebarToggler::apply(&mut l.doc, l.content, options(), Rc::new(InstantAnimator)).unwrap();
    let trigger = sidebar.parts().trigger;

    assert_eq!(l.doc.tree().next_sibling(trigger), Some(l.panel));
    assert_eq!(l.doc.tree().tag_name(trigger), Some("a"));
    assert_eq!(l.doc.tree().attr(trigger, "href"), Some("#"));
    assert_eq!(l.doc.tree().text_content(trigger), "Hide");
    assert!(!l.doc.tree().has_class(trigger, "collapsed"));
    assert_eq!(sidebar.parts().pw, 200.0);
    assert_eq!(sidebar.parts().main, l.main);
    // Shown sidebars are left where they are
    assert_eq!(style(&l.doc, l.panel, StyleProp::Right), None);
}

#[test]
fn test_click_hides_then_shows() {
    let mut l = layout();
    let sidebar =
        SidebarToggler::apply(&mut l.doc, l.content, options(), Rc::new(InstantAnimator)).unwrap();
    let trigger = sidebar.parts().trigger;

    // The link's default navigation is suppressed
    assert!(!l.doc.click(trigger));
    assert!(!sidebar.is_shown(l.doc.tree()));
    assert_eq!(l.doc.tree().text_content(trigger), "Show");
    assert!(l.doc.tree().has_class(trigger, "collapsed"));
    assert_eq!(style(&l.doc, trigger, StyleProp::Opacity), Some(1.0));
    assert_eq!(style(&l.doc, l.panel, StyleProp::Right), Some(-201.0));
    assert_eq!(style(&l.doc, l.panel, StyleProp::Opacity), Some(0.0));
    assert_eq!(style(&l.doc, l.main, StyleProp::MarginRight), Some(45.0));

    l.doc.click(trigger);
    assert!(sidebar.is_shown(l.doc.tree()));
    assert_eq!(l.doc.tree().text_content(trigger), "Hide");
    assert!(!l.doc.tree().has_class(trigger, "collapsed"));
    assert_eq!(style(&l.doc, l.panel, StyleProp::Right), Some(0.0));
    assert_eq!(style(&l.doc, l.panel, StyleProp::Opacity), Some(1.0));
    assert_eq!(style(&l.doc, l.main, StyleProp::MarginRight), Some(205.0));
}

#[test]
fn test_initially_hidden() {
    let mut l = layout();
    let opts = SidebarOptions {
        init_state: InitState::Hidden,
        ..options()
    };
    let sidebar = SidebarToggler::apply(&mut l.doc, l.content, opts, Rc::new(InstantAnimator)).unwrap();
    let trigger = sidebar.parts().trigger;

    assert_eq!(l.doc.tree().text_content(trigger), "Show");
    assert!(l.doc.tree().has_class(trigger, "collapsed"));
    assert_eq!(style(&l.doc, l.panel, StyleProp::Right), Some(-201.0));
    assert_eq!(style(&l.doc, l.main, StyleProp::MarginRight), Some(45.0));

    l.doc.click(trigger);
    assert!(sidebar.is_shown(l.doc.tree()));
    assert_eq!(style(&l.doc, l.main, StyleProp::MarginRight), Some(205.0));
}

#[test]
fn test_full_width_when_hidden() {
    let mut l = layout();
    let opts = SidebarOptions {
        init_state: InitState::Hidden,
        full: true,
        ..options()
    };
    SidebarToggler::apply(&mut l.doc, l.content, opts, Rc::new(InstantAnimator)).unwrap();
    assert_eq!(style(&l.doc, l.main, StyleProp::MarginRight), Some(0.0));
}

#[test]
fn test_left_position() {
    let mut l = layout();
    let opts = SidebarOptions {
        init_state: InitState::Hidden,
        position: Position::Left,
        ..options()
    };
    let sidebar = SidebarToggler::apply(&mut l.doc, l.content, opts, Rc::new(InstantAnimator)).unwrap();
    assert_eq!(style(&l.doc, l.panel, StyleProp::Left), Some(-201.0));
    assert_eq!(style(&l.doc, l.main, StyleProp::MarginLeft), Some(45.0));

    l.doc.click(sidebar.parts().trigger);
    assert_eq!(style(&l.doc, l.panel, StyleProp::Left), Some(0.0));
    assert_eq!(style(&l.doc, l.main, StyleProp::MarginLeft), Some(205.0));
    assert_eq!(style(&l.doc, l.panel, StyleProp::Right), None);
}

#[test]
fn test_trigger_attribute_picks_animation() {
    let mut l = layout();
    let animator = Rc::new(RecordingAnimator::new());
    let sidebar = SidebarToggler::apply(&mut l.doc, l.content, options(), animator.clone()).unwrap();
    let trigger = sidebar.parts().trigger;

    l.doc.click(trigger);
    assert_eq!(animator.runs()[0].tracks.len(), 2);

    l.doc.tree.set_attr(trigger, "id", "simpleToggle").unwrap();
    assert_eq!(sidebar.animation_for(l.doc.tree(), trigger), AnimationKind::SimpleToggle);
    l.doc.click(trigger);
    assert_eq!(animator.run_count(), 2);
    assert_eq!(animator.runs()[1].duration_ms(), 0);

    // Names that are not animations fall back to the configured one
    l.doc.tree.set_attr(trigger, "id", "sidebar-link").unwrap();
    assert_eq!(sidebar.animation_for(l.doc.tree(), trigger), AnimationKind::QueuedEffects);
}

#[test]
fn test_clicks_elsewhere_are_ignored() {
    let mut l = layout();
    let animator = Rc::new(RecordingAnimator::new());
    SidebarToggler::apply(&mut l.doc, l.content, options(), animator.clone()).unwrap();

    assert!(l.doc.click(l.panel));
    assert!(l.doc.click(l.main));
    assert_eq!(animator.run_count(), 0);
}

#[test]
fn test_hover_mode_waits_for_interval() {
    let mut l = layout();
    let opts = SidebarOptions {
        event: "mouseenter".to_string(),
        add_events: String::new(),
        ..options()
    };
    let sidebar = SidebarToggler::apply(&mut l.doc, l.content, opts, Rc::new(InstantAnimator)).unwrap();
    let trigger = sidebar.parts().trigger;
    assert_eq!(l.doc.listener_count(trigger, EventType::MouseEnter), 1);
    assert_eq!(l.doc.listener_count(l.content, EventType::Click), 0);

    l.doc.dispatch(trigger, EventType::MouseEnter);
    assert!(sidebar.has_pending());
    l.doc.advance(299);
    assert!(sidebar.is_shown(l.doc.tree()));
    l.doc.advance(1);
    assert!(!sidebar.is_shown(l.doc.tree()));
    assert!(!sidebar.has_pending());
}

#[test]
fn test_mouseleave_cancels_hover() {
    let mut l = layout();
    let opts = SidebarOptions {
        event: "hover".to_string(),
        ..options()
    };
    let sidebar = SidebarToggler::apply(&mut l.doc, l.content, opts, Rc::new(InstantAnimator)).unwrap();
    let trigger = sidebar.parts().trigger;

    l.doc.dispatch(trigger, EventType::MouseEnter);
    l.doc.advance(100);
    l.doc.dispatch(trigger, EventType::MouseLeave);
    assert!(!sidebar.has_pending());
    l.doc.advance(1000);
    assert!(sidebar.is_shown(l.doc.tree()));

    // add_events defaults to click, which still goes through the delay
    l.doc.click(trigger);
    l.doc.advance(300);
    assert!(!sidebar.is_shown(l.doc.tree()));
}

#[test]
fn test_timed_animation_reaches_end_state() {
    let mut l = layout();
    let sidebar =
        SidebarToggler::apply(&mut l.doc, l.content, options(), Rc::new(TimedAnimator)).unwrap();
    let trigger = sidebar.parts().trigger;

    l.doc.click(trigger);
    l.doc.advance(400);
    // Panel is out, main content has not moved yet
    assert_eq!(style(&l.doc, l.panel, StyleProp::Right), Some(-201.0));
    assert_eq!(style(&l.doc, l.main, StyleProp::MarginRight), None);
    assert_eq!(style(&l.doc, trigger, StyleProp::Opacity), Some(0.0));

    l.doc.advance(400);
    assert_eq!(style(&l.doc, l.main, StyleProp::MarginRight), Some(45.0));
    assert_eq!(l.doc.tree().text_content(trigger), "Show");

    l.doc.advance(400);
    assert_eq!(style(&l.doc, trigger, StyleProp::Opacity), Some(1.0));
    assert!(!l.doc.timers().has_pending());
}

#[test]
fn test_missing_parts_leave_document_untouched() {
    let mut l = layout();
    let before = l.doc.tree().len();

    let no_panel = SidebarOptions {
        sidebar: "div.drawer".to_string(),
        ..options()
    };
    let err = SidebarToggler::apply(&mut l.doc, l.content, no_panel, Rc::new(InstantAnimator));
    assert_eq!(err.unwrap_err(), SidebarError::PanelNotFound("div.drawer".to_string()));

    let no_wrapper = SidebarOptions {
        wrapper: "#page".to_string(),
        ..options()
    };
    let err = SidebarToggler::apply(&mut l.doc, l.content, no_wrapper, Rc::new(InstantAnimator));
    assert_eq!(err.unwrap_err(), SidebarError::WrapperNotFound("#page".to_string()));

    let no_main = SidebarOptions {
        main_content: "#article".to_string(),
        ..options()
    };
    let err = SidebarToggler::apply(&mut l.doc, l.content, no_main, Rc::new(InstantAnimator));
    assert_eq!(err.unwrap_err(), SidebarError::MainContentNotFound("#article".to_string()));

    assert_eq!(l.doc.tree().len(), before);
    assert_eq!(l.doc.listener_count(l.content, EventType::Click), 0);
}

#[test]
fn test_options_from_json() {
    let opts: SidebarOptions = serde_json::from_str(
        r#"{ "init_state": "hidden", "animation": "concurrentEffects", "position": "top", "speed": 100 }"#,
    )
    .unwrap();
    assert_eq!(opts.init_state, InitState::Hidden);
    assert_eq!(opts.animation, AnimationKind::ConcurrentEffects);
    assert_eq!(opts.position, Position::Right);
    assert_eq!(opts.speed, 100);
    assert_eq!(opts.trigger_show, "Show");
    assert_eq!(opts.sidebar, "div.slide");
}
