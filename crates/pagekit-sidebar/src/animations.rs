//! Show/hide animations
//!
//! Every animation reaches the same end state. Shown: main content margin
//! `pw + p`, panel offset 0 and opaque, trigger reads "hide" without
//! `collapsed`. Hidden: margin `tw + p` (0 when `full`), panel offset
//! `-(pw + 1)` and transparent, trigger reads "show" with `collapsed`.

use pagekit_dom::StyleProp;

use crate::{AnimationKind, EffectSequence, EffectStep, FAST_MS, SidebarOptions, SidebarParts};

/// Class on the trigger while the sidebar is hidden
pub const COLLAPSED: &str = "collapsed";

/// Build the effects that take the sidebar to the opposite state.
/// `showing` is true when the sidebar is currently hidden.
pub fn build(
    kind: AnimationKind,
    parts: &SidebarParts,
    options: &SidebarOptions,
    showing: bool,
) -> EffectSequence {
    let targets = Targets::new(parts, options);
    match (kind, showing) {
        (AnimationKind::QueuedEffects, true) => queued_show(parts, options, &targets),
        (AnimationKind::QueuedEffects, false) => queued_hide(parts, options, &targets),
        (AnimationKind::ConcurrentEffects, true) => concurrent_show(parts, options, &targets),
        (AnimationKind::ConcurrentEffects, false) => concurrent_hide(parts, options, &targets),
        (AnimationKind::SimpleToggle, true) => simple_show(parts, options, &targets),
        (AnimationKind::SimpleToggle, false) => simple_hide(parts, options, &targets),
    }
}

/// End-state values for one sidebar
struct Targets {
    offset: StyleProp,
    margin: StyleProp,
    shown_margin: f32,
    hidden_margin: f32,
    hidden_offset: f32,
}

impl Targets {
    fn new(parts: &SidebarParts, options: &SidebarOptions) -> Self {
        Self {
            offset: options.position.offset_prop(),
            margin: options.position.margin_prop(),
            shown_margin: parts.pw + options.p,
            hidden_margin: hidden_margin(parts, options),
            hidden_offset: -(parts.pw + 1.0),
        }
    }
}

/// Main content margin while the sidebar is hidden
pub fn hidden_margin(parts: &SidebarParts, options: &SidebarOptions) -> f32 {
    if options.full { 0.0 } else { parts.tw + options.p }
}

fn fade_out(parts: &SidebarParts, duration_ms: u64) -> EffectStep {
    EffectStep::animate(parts.trigger, &[(StyleProp::Opacity, 0.0)], duration_ms)
}

fn reveal_trigger(parts: &SidebarParts, options: &SidebarOptions) -> [EffectStep; 3] {
    [
        EffectStep::remove_class(parts.trigger, COLLAPSED),
        EffectStep::set_text(parts.trigger, &options.trigger_hide),
        EffectStep::animate(parts.trigger, &[(StyleProp::Opacity, 1.0)], options.speed),
    ]
}

fn collapse_trigger(parts: &SidebarParts, options: &SidebarOptions) -> [EffectStep; 3] {
    [
        EffectStep::add_class(parts.trigger, COLLAPSED),
        EffectStep::set_text(parts.trigger, &options.trigger_show),
        EffectStep::animate(parts.trigger, &[(StyleProp::Opacity, 1.0)], options.speed),
    ]
}

fn queued_show(parts: &SidebarParts, options: &SidebarOptions, t: &Targets) -> EffectSequence {
    let mut main = vec![
        EffectStep::animate(parts.main, &[(t.margin, t.shown_margin)], options.speed),
        EffectStep::animate(parts.panel, &[(StyleProp::Opacity, 1.0)], FAST_MS),
        EffectStep::animate(parts.panel, &[(t.offset, 0.0)], options.speed),
    ];
    main.extend(reveal_trigger(parts, options));

    EffectSequence::new()
        .track(vec![fade_out(parts, options.speed)])
        .track(main)
}

fn queued_hide(parts: &SidebarParts, options: &SidebarOptions, t: &Targets) -> EffectSequence {
    let mut main = vec![
        EffectStep::animate(
            parts.panel,
            &[(StyleProp::Opacity, 0.0), (t.offset, t.hidden_offset)],
            options.speed,
        ),
        EffectStep::animate(parts.main, &[(t.margin, t.hidden_margin)], options.speed),
    ];
    main.extend(collapse_trigger(parts, options));

    EffectSequence::new()
        .track(vec![fade_out(parts, options.speed)])
        .track(main)
}

fn concurrent_show(parts: &SidebarParts, options: &SidebarOptions, t: &Targets) -> EffectSequence {
    let mut panel = vec![EffectStep::animate(
        parts.panel,
        &[(t.offset, 0.0), (StyleProp::Opacity, 1.0)],
        options.speed,
    )];
    panel.extend(reveal_trigger(parts, options));

    EffectSequence::new()
        .track(vec![fade_out(parts, FAST_MS)])
        .track(vec![EffectStep::animate(
            parts.main,
            &[(t.margin, t.shown_margin)],
            options.speed,
        )])
        .track(panel)
}

fn concurrent_hide(parts: &SidebarParts, options: &SidebarOptions, t: &Targets) -> EffectSequence {
    let mut main = vec![EffectStep::animate(
        parts.main,
        &[(t.margin, t.hidden_margin)],
        options.speed,
    )];
    main.extend(collapse_trigger(parts, options));

    EffectSequence::new()
        .track(vec![fade_out(parts, FAST_MS)])
        .track(vec![EffectStep::animate(
            parts.panel,
            &[(StyleProp::Opacity, 0.0), (t.offset, t.hidden_offset)],
            options.speed,
        )])
        .track(main)
}

fn simple_show(parts: &SidebarParts, options: &SidebarOptions, t: &Targets) -> EffectSequence {
    EffectSequence::new().track(vec![
        EffectStep::remove_class(parts.trigger, COLLAPSED),
        EffectStep::set_text(parts.trigger, &options.trigger_hide),
        EffectStep::css(parts.panel, &[(t.offset, 0.0), (StyleProp::Opacity, 1.0)]),
        EffectStep::css(parts.main, &[(t.margin, t.shown_margin)]),
    ])
}

fn simple_hide(parts: &SidebarParts, options: &SidebarOptions, t: &Targets) -> EffectSequence {
    EffectSequence::new().track(vec![
        EffectStep::add_class(parts.trigger, COLLAPSED),
        EffectStep::set_text(parts.trigger, &options.trigger_show),
        EffectStep::css(parts.panel, &[(t.offset, t.hidden_offset), (StyleProp::Opacity, 0.0)]),
        EffectStep::css(parts.main, &[(t.margin, t.hidden_margin)]),
    ])
}
