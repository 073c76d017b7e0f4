//! Pure transformations of a [`Colormap`]: reversal, index remapping and
//! discretization into a bounded palette with edge-extension bands.

use rgb::RGB;

use crate::error::CptError;
use crate::{ColorRange, ColorStop, Colormap};

/// Which side(s) of the boundary range receive an explicit out-of-range
/// color instead of rendering as "none".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extend {
    Neither,
    Min,
    Max,
    Both,
}

impl Extend {
    fn extends_min(self) -> bool { matches!(self, Extend::Min | Extend::Both) }

    fn extends_max(self) -> bool { matches!(self, Extend::Max | Extend::Both) }
}

/// A discretized colormap: one color per boundary interval, plus an
/// optional under/over color on each extended side.
///
/// Produced by [`Colormap::discretize`].  `None` for the under or over
/// color means values outside the boundaries on that side render with no
/// defined color.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscreteColormap {
    name: String,
    colors: Vec<RGB<f64>>,
    // Invariant: strictly increasing, length ≥ 2.
    boundaries: Vec<f64>,
    extend: Extend,
    under: Option<RGB<f64>>,
    over: Option<RGB<f64>>,
}

impl DiscreteColormap {
    pub fn name(&self) -> &str { &self.name }

    /// All sampled colors, extension bands included: the first entry is
    /// the under color when the minimum side is extended, the last the
    /// over color when the maximum side is.
    pub fn colors(&self) -> &[RGB<f64>] { &self.colors }

    /// The interval boundaries, in the caller's data units.
    pub fn boundaries(&self) -> &[f64] { &self.boundaries }

    pub fn extend(&self) -> Extend { self.extend }

    /// Color for values below the lowest boundary, if the minimum side is
    /// extended.
    pub fn under(&self) -> Option<RGB<f64>> { self.under }

    /// Color for values at or above the highest boundary, if the maximum
    /// side is extended.
    pub fn over(&self) -> Option<RGB<f64>> { self.over }

    /// Look up the color for a data value: the color of the half-open
    /// interval `[bᵢ, bᵢ₊₁)` containing it, or the under/over color
    /// outside the boundary range (`None` on a non-extended side).
    pub fn color_for(&self, value: f64) -> Option<RGB<f64>> {
        let b = &self.boundaries;
        if value < b[0] {
            return self.under;
        }
        if value >= b[b.len() - 1] {
            return self.over;
        }
        let i = b.partition_point(|&x| x <= value);
        // Interval i - 1; interior colors start after an under band.
        let offset = usize::from(self.extend.extends_min());
        Some(self.colors[offset + i - 1])
    }
}

impl Colormap {
    /// The same gradient running the other way: every stop moves from
    /// position `p` to `1 - p` and the name gains a `_r` suffix (rename
    /// with [`Colormap::with_name`]).  Reversing twice reproduces the
    /// original stops up to floating-point rounding.
    pub fn reversed(&self) -> Colormap {
        let stops = self.stops().iter().rev()
            .map(|s| ColorStop { position: 1. - s.position, color: s.color })
            .collect();
        Colormap::new(format!("{}_r", self.name()), stops)
    }

    /// Apply a monotonic function to every stop position and sort the
    /// result.  `f` must keep all positions inside \[0, 1\] without
    /// collapsing any two stops, otherwise [`CptError::InvalidRemap`] is
    /// returned.  `name` of `None` keeps the current name.
    pub fn remapped<F>(&self, f: F, name: Option<&str>) -> Result<Colormap, CptError>
    where F: Fn(f64) -> f64 {
        let mut stops: Vec<ColorStop> = self.stops().iter()
            .map(|s| ColorStop { position: f(s.position), color: s.color })
            .collect();
        stops.sort_by(|a, b| a.position.total_cmp(&b.position));
        let lo = stops[0].position;
        let hi = stops[stops.len() - 1].position;
        if !(lo >= 0. && hi <= 1.) {
            return Err(CptError::InvalidRemap(format!(
                "mapped positions span [{lo}, {hi}], outside [0, 1]")));
        }
        if stops.windows(2).any(|w| w[1].position <= w[0].position) {
            return Err(CptError::InvalidRemap(
                "mapped positions are not strictly increasing".into()));
        }
        let named = name.unwrap_or(self.name());
        Ok(Colormap::new(named, stops))
    }

    /// Discretize the gradient over the given strictly increasing
    /// boundaries.  One color is sampled per boundary interval, plus one
    /// extra band per side named by `extend`; extended sides expose the
    /// first/last sampled color through [`DiscreteColormap::under`] and
    /// [`DiscreteColormap::over`].
    pub fn discretize(&self, levels: &[f64], extend: Extend)
                      -> Result<DiscreteColormap, CptError> {
        if levels.len() < 2 {
            return Err(CptError::InvalidLevels(format!(
                "need at least 2 boundaries, got {}", levels.len())));
        }
        if levels.windows(2).any(|w| w[1] <= w[0]) {
            return Err(CptError::InvalidLevels(
                "boundaries must be strictly increasing".into()));
        }
        let n = levels.len() - 1
            + usize::from(extend.extends_min())
            + usize::from(extend.extends_max());
        let colors = self.sample(n);
        let under = extend.extends_min().then(|| colors[0]);
        let over = extend.extends_max().then(|| colors[n - 1]);
        Ok(DiscreteColormap {
            name: self.name().to_owned(),
            colors,
            boundaries: levels.to_vec(),
            extend,
            under,
            over,
        })
    }
}
