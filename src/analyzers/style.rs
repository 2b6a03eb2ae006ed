// SPDX-License-Identifier: PMPL-1.0-or-later
//! Inline `style` attribute helpers: declaration lookup, color parsing,
//! pixel dimensions, and a simplified contrast ratio.
//!
//! Only what is written in the attribute is seen. Anything these helpers
//! cannot parse yields `None` and the calling analyzer skips the element.

use regex::Regex;
use std::sync::LazyLock;

/// An 8-bit RGB triple
pub type Rgb = (u8, u8, u8);

static DECLARATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|;)\s*([A-Za-z-]+)\s*:\s*([^;]*)").expect("valid regex")
});

static RGB_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^rgb\(\s*(\d{1,3})\s*,\s*(\d{1,3})\s*,\s*(\d{1,3})\s*\)$").expect("valid regex")
});

static PIXELS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(\d+)px\b").expect("valid regex"));

/// Value of the first declaration of `property`, trimmed
pub fn declaration<'a>(style: &'a str, property: &str) -> Option<&'a str> {
    DECLARATION_RE
        .captures_iter(style)
        .find(|caps| caps[1].eq_ignore_ascii_case(property))
        .and_then(|caps| caps.get(2))
        .map(|m| m.as_str().trim())
}

/// Parse `#rgb`, `#rrggbb` or `rgb(r, g, b)`
pub fn parse_color(value: &str) -> Option<Rgb> {
    let value = value.trim().to_ascii_lowercase();
    if let Some(hex) = value.strip_prefix('#') {
        parse_hex_color(hex)
    } else if value.starts_with("rgb(") {
        parse_rgb_color(&value)
    } else {
        None
    }
}

/// Parse hex digits (without the leading `#`) in short or long form
pub fn parse_hex_color(hex: &str) -> Option<Rgb> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    match hex.len() {
        3 => {
            let r = u8::from_str_radix(&hex[0..1].repeat(2), 16).ok()?;
            let g = u8::from_str_radix(&hex[1..2].repeat(2), 16).ok()?;
            let b = u8::from_str_radix(&hex[2..3].repeat(2), 16).ok()?;
            Some((r, g, b))
        }
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some((r, g, b))
        }
        _ => None,
    }
}

/// Parse `rgb(r, g, b)` with integer channels in 0..=255
pub fn parse_rgb_color(value: &str) -> Option<Rgb> {
    let caps = RGB_RE.captures(value)?;
    let r: u8 = caps[1].parse().ok()?;
    let g: u8 = caps[2].parse().ok()?;
    let b: u8 = caps[3].parse().ok()?;
    Some((r, g, b))
}

/// Text color declared by `color`
pub fn foreground(style: &str) -> Option<Rgb> {
    declaration(style, "color").and_then(parse_color)
}

/// Background declared by `background-color`, falling back to `background`
pub fn background(style: &str) -> Option<Rgb> {
    declaration(style, "background-color")
        .or_else(|| declaration(style, "background"))
        .and_then(parse_color)
}

/// Positive integer pixel size of `property` (e.g. `width: 24px`)
pub fn pixel_dimension(style: &str, property: &str) -> Option<u32> {
    let value = declaration(style, property)?;
    let caps = PIXELS_RE.captures(value)?;
    caps[1].parse::<u32>().ok().filter(|&px| px > 0)
}

/// Linear luminance `0.2126R + 0.7152G + 0.0722B` over channels in [0, 1].
///
/// No sRGB gamma decoding is applied.
pub fn relative_luminance((r, g, b): Rgb) -> f64 {
    let channel = |c: u8| f64::from(c) / 255.0;
    0.2126 * channel(r) + 0.7152 * channel(g) + 0.0722 * channel(b)
}

/// `(lighter + 0.05) / (darker + 0.05)`, always >= 1.0
pub fn contrast_ratio(fg: Rgb, bg: Rgb) -> f64 {
    let l1 = relative_luminance(fg);
    let l2 = relative_luminance(bg);
    let (lighter, darker) = if l1 > l2 { (l1, l2) } else { (l2, l1) };
    (lighter + 0.05) / (darker + 0.05)
}
