//! Inline style
//!
//! Numeric CSS properties set directly on an element. There is no layout
//! engine, so an element's width is whatever its inline style says.

use std::collections::HashMap;

/// Style properties the page behaviours read and write (pixels, or 0..1 for opacity)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleProp {
    Width,
    Left,
    Right,
    MarginLeft,
    MarginRight,
    Opacity,
}

impl StyleProp {
    /// CSS property name
    pub fn css_name(self) -> &'static str {
        match self {
            Self::Width => "width",
            Self::Left => "left",
            Self::Right => "right",
            Self::MarginLeft => "margin-left",
            Self::MarginRight => "margin-right",
            Self::Opacity => "opacity",
        }
    }

    /// Parse a CSS property name
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "width" => Some(Self::Width),
            "left" => Some(Self::Left),
            "right" => Some(Self::Right),
            "margin-left" => Some(Self::MarginLeft),
            "margin-right" => Some(Self::MarginRight),
            "opacity" => Some(Self::Opacity),
            _ => None,
        }
    }
}

/// Inline style declarations of one element
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InlineStyle {
    props: HashMap<StyleProp, f32>,
}

impl InlineStyle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a `style` attribute such as `width: 200px; opacity: 0.5`.
    /// Unknown properties and non-numeric values are ignored.
    pub fn parse(s: &str) -> Self {
        let mut style = Self::new();
        for decl in s.split(';') {
            let Some((name, value)) = decl.split_once(':') else { continue };
            let Some(prop) = StyleProp::parse(name) else { continue };
            let value = value.trim();
            let value = value.strip_suffix("px").unwrap_or(value);
            if let Ok(v) = value.trim().parse::<f32>() {
                style.set(prop, v);
            }
        }
        style
    }

    pub fn get(&self, prop: StyleProp) -> Option<f32> {
        self.props.get(&prop).copied()
    }

    pub fn set(&mut self, prop: StyleProp, value: f32) {
        self.props.insert(prop, value);
    }

    pub fn remove(&mut self, prop: StyleProp) -> Option<f32> {
        self.props.remove(&prop)
    }

    pub fn is_empty(&self) -> bool {
        self.props.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_style_attribute() {
        let style = InlineStyle::parse("width: 200px; opacity:0.5; color: red; right: -10px");
        assert_eq!(style.get(StyleProp::Width), Some(200.0));
        assert_eq!(style.get(StyleProp::Opacity), Some(0.5));
        assert_eq!(style.get(StyleProp::Right), Some(-10.0));
        assert_eq!(style.get(StyleProp::Left), None);
    }

    #[test]
    fn test_prop_names_round_trip() {
        for prop in [StyleProp::Width, StyleProp::MarginLeft, StyleProp::Opacity] {
            assert_eq!(StyleProp::parse(prop.css_name()), Some(prop));
        }
    }
}
