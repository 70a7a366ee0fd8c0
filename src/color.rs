//! Fill color normalisation and palette labelling.
//!
//! Sticky fills come out of the design tool as unit-interval float triples. We normalise them to
//! lowercase `#rrggbb` so they can be compared and filtered on, then name them against the
//! design tool's swatch palettes. The current palette wins, then the retired (legacy) palette,
//! and only then the nearest reference color.

use crate::document::Rgb;

/// Label returned for hex strings that do not parse.
pub const UNKNOWN_LABEL: &str = "unknown";

/// Qualifier appended to labels of retired or approximated swatches.
pub const LEGACY_TAG: &str = "(legacy)";

/// Default swatches of the current design-tool generation, including the "new standard" set.
pub const CURRENT_PALETTE: [(&str, &str); 13] = [
    ("#ffc700", "yellow"),
    ("#1abcfe", "blue"),
    ("#f24822", "red"),
    ("#0acf83", "green"),
    ("#7b61ff", "purple"),
    ("#ff72a6", "pink"),
    ("#808080", "gray"),
    ("#ffffff", "white"),
    ("#a8daff", "blue"),
    ("#d3bdff", "purple"),
    ("#ffa8db", "pink"),
    ("#ffafa3", "red"),
    ("#ffe299", "yellow"),
];

/// Retired swatches still found on older boards.
pub const LEGACY_PALETTE: [(&str, &str); 14] = [
    ("#e6e6e6", "gray (legacy)"),
    ("#ffd3a8", "orange (legacy)"),
    ("#fffa3a", "yellow (legacy)"),
    ("#b3efbd", "green (legacy)"),
    ("#b3f4ef", "teal (legacy)"),
    ("#a8d3ff", "blue (legacy)"),
    ("#ffb3b3", "red (legacy)"),
    ("#75d7f0", "light blue (legacy)"),
    ("#80caff", "blue (legacy)"),
    ("#85e0a3", "green (legacy)"),
    ("#afbccf", "gray (legacy)"),
    ("#ffbdf2", "pink (legacy)"),
    ("#ffc470", "orange (legacy)"),
    ("#ffd966", "yellow (legacy)"),
];

/// Anchors for nearest-neighbour labelling, in tie-break order.
pub const REFERENCE_COLORS: [(&str, [u8; 3]); 8] = [
    ("white", [0xff, 0xff, 0xff]),
    ("gray", [0x80, 0x80, 0x80]),
    ("orange", [0xff, 0x99, 0x00]),
    ("yellow", [0xff, 0xc7, 0x00]),
    ("green", [0x0a, 0xcf, 0x83]),
    ("teal", [0x00, 0xb5, 0xa5]),
    ("blue", [0x1a, 0xbc, 0xfe]),
    ("red", [0xf2, 0x48, 0x22]),
];

/// Fixed corrections for historically ambiguous nearest matches: `(hex, nearest, label)`.
///
/// An entry only applies when the nearest reference color is the one listed.
pub const NEAREST_OVERRIDES: [(&str, &str, &str); 3] = [
    ("#a6a6a6", "gray", "light gray (legacy)"),
    ("#333333", "gray", "dark gray (legacy)"),
    ("#3dadff", "blue", "light blue (legacy)"),
];

#[must_use]
/// Normalise a unit-interval color to lowercase `#rrggbb`.
///
/// Each channel is scaled by 255 and rounded half-up. Out-of-range channels clamp and `NaN`
/// becomes zero, so the output always has the `#rrggbb` shape.
pub fn to_hex(rgb: Rgb) -> String {
    format!(
        "#{:02x}{:02x}{:02x}",
        channel(rgb.r),
        channel(rgb.g),
        channel(rgb.b)
    )
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn channel(c: f64) -> u8 {
    // Float-to-int `as` saturates and maps NaN to 0.
    (c * 255.0 + 0.5).floor() as u8
}

#[must_use]
/// Name a hex color: exact current swatch, exact legacy swatch, else nearest reference color.
pub fn classify(hex: &str) -> String {
    let hex = hex.to_ascii_lowercase();

    if let Some(label) = lookup(&CURRENT_PALETTE, &hex) {
        return label.to_string();
    }
    if let Some(label) = lookup(&LEGACY_PALETTE, &hex) {
        return label.to_string();
    }

    let Some(channels) = parse_hex(&hex) else {
        return UNKNOWN_LABEL.to_string();
    };

    let nearest = nearest_reference(channels);
    NEAREST_OVERRIDES
        .iter()
        .find(|(override_hex, name, _)| *override_hex == hex && *name == nearest)
        .map_or_else(
            || format!("{nearest} {LEGACY_TAG}"),
            |(_, _, label)| (*label).to_string(),
        )
}

fn lookup(palette: &[(&str, &'static str)], hex: &str) -> Option<&'static str> {
    palette
        .iter()
        .find(|(swatch, _)| *swatch == hex)
        .map(|(_, label)| *label)
}

#[must_use]
/// Parse `#rrggbb` (either case) into channel bytes.
pub fn parse_hex(hex: &str) -> Option<[u8; 3]> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }

    let mut channels = [0u8; 3];
    for (i, slot) in channels.iter_mut().enumerate() {
        *slot = u8::from_str_radix(&digits[i * 2..i * 2 + 2], 16).ok()?;
    }
    Some(channels)
}

#[must_use]
/// Name of the reference color at the smallest squared Euclidean distance.
///
/// Ties go to whichever reference color is listed first.
pub fn nearest_reference(channels: [u8; 3]) -> &'static str {
    REFERENCE_COLORS
        .iter()
        .min_by_key(|(_, reference)| distance_sq(channels, *reference))
        .map_or(UNKNOWN_LABEL, |(name, _)| *name)
}

fn distance_sq(a: [u8; 3], b: [u8; 3]) -> u32 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| {
            let d = u32::from(x.abs_diff(*y));
            d * d
        })
        .sum()
}

#[cfg(test)]
#[path = "tests/color.rs"]
mod tests;
