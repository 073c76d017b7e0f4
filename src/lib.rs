//! GMT color palette tables.
//!
//! Parses GMT-style `.cpt` files — line-oriented ASCII tables describing
//! piecewise-linear color gradients — into [`Colormap`] values, and provides
//! pure transformations on them: [`Colormap::reversed`],
//! [`Colormap::remapped`] and [`Colormap::discretize`].  The simple
//! listed-color table format (two header lines followed by `r g b` rows) is
//! supported through [`ListedColormap`].
//!
//! Retrieval of the text (file system, HTTP, caching) is the caller's
//! business: the parser consumes any [`std::io::BufRead`] and returns a
//! value, nothing is registered globally.
//!
//! ```
//! use gmt_cpt::{Colormap, ColorRange};
//!
//! let cpt = "\
//! ## a two-stop gray ramp
//! 0 0 0 0 1 255 255 255
//! ";
//! let cmap = Colormap::from_cpt_str(cpt, "gray")?;
//! assert_eq!(cmap.stops().len(), 2);
//! let mid = cmap.rgb(0.5);
//! assert!((mid.r - 0.5).abs() < 1e-12);
//! # Ok::<(), gmt_cpt::CptError>(())
//! ```

use rgb::{RGB, RGB8};

mod error;
mod parse;
mod transform;

pub use error::CptError;
pub use parse::ListedColormap;
pub use transform::{DiscreteColormap, Extend};

/// A “continuous” range of colors parametrized by reals in \[0, 1\].
pub trait ColorRange {
    /// Returns the color corresponding to `t` ∈ \[0., 1.\].  Out-of-range
    /// arguments are clamped, never extrapolated.
    fn rgb(&self, t: f64) -> RGB<f64>;

    /// Like [`ColorRange::rgb`] but quantized to 8 bits per channel.
    fn rgb8(&self, t: f64) -> RGB8 {
        let c = self.rgb(t);
        RGB8 { r: (255. * c.r).round() as u8,
               g: (255. * c.g).round() as u8,
               b: (255. * c.b).round() as u8 }
    }

    /// Return `n` colors sampled uniformly over \[0, 1\], both endpoints
    /// included.  `n == 1` samples the color at 0.
    fn sample(&self, n: usize) -> Vec<RGB<f64>> {
        if n == 0 { return Vec::new() }
        if n == 1 { return vec![self.rgb(0.)] }
        let dt = 1. / (n - 1) as f64;
        (0 .. n).map(|i| self.rgb(i as f64 * dt)).collect()
    }
}

/// One vertex of a piecewise-linear gradient: a position in \[0, 1\]
/// together with the color at that position (channels in \[0, 1\]).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorStop {
    pub position: f64,
    pub color: RGB<f64>,
}

/// A named piecewise-linear color gradient.
///
/// Constructed by the cpt parser (see [`Colormap::from_cpt_reader`]) or by
/// one of the transformations.  Values are immutable: every transformation
/// returns a fresh `Colormap`.
#[derive(Debug, Clone, PartialEq)]
pub struct Colormap {
    name: String,
    // Invariant: length ≥ 2, strictly increasing positions with
    // stops[0].position == 0 and stops[last].position == 1.
    stops: Vec<ColorStop>,
}

impl Colormap {
    /// Create a colormap from explicit stops.
    ///
    /// `stops` must hold at least two entries, strictly increasing by
    /// position, with the first at 0 and the last at 1.  Evaluation of a
    /// colormap violating this is unspecified.
    pub fn new(name: impl Into<String>, stops: Vec<ColorStop>) -> Colormap {
        Colormap { name: name.into(), stops }
    }

    /// The colormap's identifier.  Not necessarily unique.
    pub fn name(&self) -> &str { &self.name }

    /// The gradient's stops, ascending by position.
    pub fn stops(&self) -> &[ColorStop] { &self.stops }

    /// Return the same gradient under a different name.
    pub fn with_name(mut self, name: impl Into<String>) -> Colormap {
        self.name = name.into();
        self
    }
}

impl ColorRange for Colormap {
    /// Piecewise-linear interpolation between the two stops bracketing `t`,
    /// each channel independently.  Positions outside the stop span take
    /// the nearest stop's color.
    fn rgb(&self, t: f64) -> RGB<f64> {
        fn lerp(a: f64, b: f64, u: f64) -> f64 { a + u * (b - a) }

        let stops = &self.stops;
        let t = t.clamp(0., 1.);
        let last = stops.len() - 1;
        if t <= stops[0].position { return stops[0].color }
        if t >= stops[last].position { return stops[last].color }
        let i = stops.partition_point(|s| s.position <= t);
        // The guards above pin 0 < i ≤ last.
        let s0 = &stops[i - 1];
        let s1 = &stops[i];
        let u = (t - s0.position) / (s1.position - s0.position);
        RGB { r: lerp(s0.color.r, s1.color.r, u),
              g: lerp(s0.color.g, s1.color.g, u),
              b: lerp(s0.color.b, s1.color.b, u) }
    }
}

/// A color in the HSV model as cpt files store it: hue in degrees,
/// saturation and value in \[0, 1\].
#[derive(Debug, Clone, Copy)]
pub(crate) struct Hsv {
    pub(crate) h: f64,
    pub(crate) s: f64,
    pub(crate) v: f64,
}

impl Hsv {
    /// Standard HSV → RGB conversion, channels in \[0, 1\].  The hue wraps
    /// at 360°; zero saturation gives pure gray at `v`.
    pub(crate) fn to_rgb(self) -> RGB<f64> {
        let h = self.h.rem_euclid(360.) / 60.;
        let f = h.fract();
        let p = self.v * (1. - self.s);
        let q = self.v * (1. - self.s * f);
        let t = self.v * (1. - self.s * (1. - f));
        let v = self.v;
        let (r, g, b) = match h.trunc() as u8 {
            0 => (v, t, p),
            1 => (q, v, p),
            2 => (p, v, t),
            3 => (p, q, v),
            4 => (t, p, v),
            _ => (v, p, q),
        };
        RGB { r, g, b }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: RGB<f64>, b: RGB<f64>) -> bool {
        (a.r - b.r).abs() <= 1e-12
            && (a.g - b.g).abs() <= 1e-12
            && (a.b - b.b).abs() <= 1e-12
    }

    fn ramp() -> Colormap {
        Colormap::new("ramp", vec![
            ColorStop { position: 0., color: RGB { r: 1., g: 0., b: 0. } },
            ColorStop { position: 0.5, color: RGB { r: 0., g: 1., b: 0. } },
            ColorStop { position: 1., color: RGB { r: 0., g: 0., b: 1. } },
        ])
    }

    #[test]
    fn interpolates_between_stops() {
        let c = ramp().rgb(0.25);
        assert!(close(c, RGB { r: 0.5, g: 0.5, b: 0. }), "{:?}", c);
    }

    #[test]
    fn hits_stops_exactly() {
        let g = ramp();
        assert!(close(g.rgb(0.5), RGB { r: 0., g: 1., b: 0. }));
        assert!(close(g.rgb(1.), RGB { r: 0., g: 0., b: 1. }));
    }

    #[test]
    fn clamps_instead_of_extrapolating() {
        let g = ramp();
        assert_eq!(g.rgb(-0.1), g.rgb(0.));
        assert_eq!(g.rgb(1.1), g.rgb(1.));
    }

    #[test]
    fn sample_counts() {
        let g = ramp();
        assert!(g.sample(0).is_empty());
        assert_eq!(g.sample(1), vec![g.rgb(0.)]);
        let s = g.sample(5);
        assert_eq!(s.len(), 5);
        assert!(close(s[0], g.rgb(0.)));
        assert!(close(s[2], g.rgb(0.5)));
        assert!(close(s[4], g.rgb(1.)));
    }

    #[test]
    fn rgb8_quantization() {
        let g = ramp();
        assert_eq!(g.rgb8(0.), RGB8 { r: 255, g: 0, b: 0 });
        assert_eq!(g.rgb8(1.), RGB8 { r: 0, g: 0, b: 255 });
    }

    #[test]
    fn hsv_gray_and_primaries() {
        let white = Hsv { h: 0., s: 0., v: 1. }.to_rgb();
        assert!(close(white, RGB { r: 1., g: 1., b: 1. }));
        let red = Hsv { h: 0., s: 1., v: 1. }.to_rgb();
        assert!(close(red, RGB { r: 1., g: 0., b: 0. }));
        let green = Hsv { h: 120., s: 1., v: 1. }.to_rgb();
        assert!(close(green, RGB { r: 0., g: 1., b: 0. }));
        let blue = Hsv { h: 240., s: 1., v: 1. }.to_rgb();
        assert!(close(blue, RGB { r: 0., g: 0., b: 1. }));
    }

    #[test]
    fn hsv_hue_wraps() {
        let a = Hsv { h: 360., s: 1., v: 1. }.to_rgb();
        let b = Hsv { h: 0., s: 1., v: 1. }.to_rgb();
        assert!(close(a, b));
    }
}
