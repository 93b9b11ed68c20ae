//! Color palette construction and assignment
//!
//! The stripe palette is built once from a raw list of colors, grouped by
//! hue and sorted within each group. Its order must stay stable across
//! reloads: teams get the first free entry, so any change to the bucket
//! thresholds or sort keys reassigns colors.

use std::collections::HashSet;
use std::sync::OnceLock;

use rand::Rng;

use crate::color::HexColor;

/// Raw colors the stripe palette is built from
pub const STRIPE_COLORS: [&str; 17] = [
    "#b91c1c", "#ea580c", "#b45309", "#eab308", "#65a30d", "#15803d", "#047857", "#0f766e",
    "#0891b2", "#0284c7", "#2563eb", "#6d28d9", "#7e22ce", "#a21caf", "#be185d", "#e11d48",
    "#64748b",
];

/// Neutral grays, always placed between the greens and the purples
pub const FIXED_GRAYS: [&str; 3] = ["#737373", "#4a4a4a", "#252525"];

/// Minimum palette distance between the two colors picked on reset
pub const RESET_MIN_GAP: usize = 2;

/// An ordered list of candidate colors
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<HexColor>,
}

impl Palette {
    /// Palette in exactly the given order
    pub fn new(colors: Vec<HexColor>) -> Self {
        Self { colors }
    }

    /// Build a palette from raw hex strings, grouped and sorted by hue.
    /// Unparseable entries are skipped.
    pub fn from_raw(raw: &[&str]) -> Self {
        let colors: Vec<HexColor> = raw.iter().filter_map(|hex| HexColor::parse(hex)).collect();
        Self::new(order_by_groups(&colors))
    }

    /// The shared stripe palette
    pub fn stripe() -> &'static Palette {
        static STRIPE: OnceLock<Palette> = OnceLock::new();
        STRIPE.get_or_init(|| Palette::from_raw(&STRIPE_COLORS))
    }

    pub fn colors(&self) -> &[HexColor] {
        &self.colors
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&HexColor> {
        self.colors.get(index)
    }

    /// Pick an unused color, preferring `default`. See [`pick_unused_color`].
    pub fn pick_unused(&self, default: &HexColor, used: &HashSet<HexColor>) -> HexColor {
        pick_unused_color(&self.colors, default, used)
    }

    /// Two colors at least [`RESET_MIN_GAP`] positions apart when possible
    pub fn distinct_pair<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<(HexColor, HexColor)> {
        let (i0, i1) = distinct_pair(self.len(), RESET_MIN_GAP, rng)?;
        Some((self.colors[i0].clone(), self.colors[i1].clone()))
    }
}

/// First-fit color assignment.
///
/// Returns `default` if it is not in `used`, else the first palette entry not
/// in `used`. When every candidate is taken the default is returned anyway.
pub fn pick_unused_color(
    palette: &[HexColor],
    default: &HexColor,
    used: &HashSet<HexColor>,
) -> HexColor {
    if !used.contains(default) {
        return default.clone();
    }
    palette
        .iter()
        .find(|c| !used.contains(*c))
        .unwrap_or(default)
        .clone()
}

/// Group colors by hue and sort each group.
///
/// Buckets: reds/oranges (`h >= 330 || h < 60`) by lightness descending,
/// blues (`200..260`) by saturation descending, greens (`60..200`) and
/// purples (`260..330`) by hue ascending. Output order is reds, blues,
/// greens, unbucketed, [`FIXED_GRAYS`], purples.
pub fn order_by_groups(colors: &[HexColor]) -> Vec<HexColor> {
    let grays: Vec<HexColor> = FIXED_GRAYS.iter().map(|g| HexColor::from_static(g)).collect();

    let mut reds = Vec::new();
    let mut blues = Vec::new();
    let mut greens = Vec::new();
    let mut purples = Vec::new();
    let mut other = Vec::new();

    for color in colors.iter().filter(|c| !grays.contains(*c)) {
        let hsl = color.to_hsl();
        let entry = (color.clone(), hsl);
        let h = hsl.h;
        if h >= 330.0 || h < 60.0 {
            reds.push(entry);
        } else if (60.0..200.0).contains(&h) {
            greens.push(entry);
        } else if (200.0..260.0).contains(&h) {
            blues.push(entry);
        } else if (260.0..330.0).contains(&h) {
            purples.push(entry);
        } else {
            other.push(entry);
        }
    }

    reds.sort_by(|a, b| b.1.l.total_cmp(&a.1.l));
    blues.sort_by(|a, b| b.1.s.total_cmp(&a.1.s));
    greens.sort_by(|a, b| a.1.h.total_cmp(&b.1.h));
    purples.sort_by(|a, b| a.1.h.total_cmp(&b.1.h));

    let strip = |group: Vec<(HexColor, _)>| group.into_iter().map(|(c, _)| c);
    strip(reds)
        .chain(strip(blues))
        .chain(strip(greens))
        .chain(strip(other))
        .chain(grays)
        .chain(strip(purples))
        .collect()
}

/// Pick two palette indices at least `min_gap` apart.
///
/// The first index is uniform over `0..len`, the second uniform over the
/// indices far enough from it. When no index qualifies the neighbor
/// `(i0 + 1) % len` is used. Returns `None` for an empty palette.
pub fn distinct_pair<R: Rng + ?Sized>(
    len: usize,
    min_gap: usize,
    rng: &mut R,
) -> Option<(usize, usize)> {
    if len == 0 {
        return None;
    }
    let i0 = rng.random_range(0..len);
    let valid: Vec<usize> = (0..len).filter(|&j| j.abs_diff(i0) >= min_gap).collect();
    let i1 = if valid.is_empty() {
        (i0 + 1) % len
    } else {
        valid[rng.random_range(0..valid.len())]
    };
    Some((i0, i1))
}
