//! Readers for the GMT cpt format and the listed-color table format.
//!
//! A cpt file is a sequence of segment rows `x0 r0 g0 b0 x1 r1 g1 b1`
//! giving the color at both edges of one gradient segment, interspersed
//! with `#` comment lines (a trailing `HSV` token switches the color model)
//! and `B`/`F`/`N` background/foreground/NaN rows, which carry no gradient
//! data.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use rgb::RGB;

use crate::error::CptError;
use crate::{ColorStop, Colormap, Hsv};

/// Color model declared by the most recent `#` header line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColorModel {
    Rgb,
    Hsv,
}

/// One edge of a segment row, in the file's raw units, tagged with the
/// model that was active when the row was read.
#[derive(Clone, Copy)]
struct RawStop {
    x: f64,
    c0: f64,
    c1: f64,
    c2: f64,
    model: ColorModel,
}

impl RawStop {
    fn color(&self) -> RGB<f64> {
        match self.model {
            // The triple is (hue °, saturation, value).
            ColorModel::Hsv => Hsv { h: self.c0, s: self.c1, v: self.c2 }.to_rgb(),
            // Raw channels are 0–255.
            ColorModel::Rgb => RGB { r: self.c0 / 255.,
                                     g: self.c1 / 255.,
                                     b: self.c2 / 255. },
        }
    }
}

fn parse_field(token: &str, line: usize) -> Result<f64, CptError> {
    token.parse().map_err(|_| CptError::BadNumber { line, token: token.to_owned() })
}

impl Colormap {
    /// Read a cpt colormap from in-memory text.
    pub fn from_cpt_str(text: &str, name: &str) -> Result<Colormap, CptError> {
        Colormap::from_cpt_reader(text.as_bytes(), Some(name))
    }

    /// Read a cpt colormap from a file, naming it after the file stem
    /// unless the result is later renamed.  A missing or unreadable file
    /// surfaces as [`CptError::Source`].
    pub fn from_cpt_file(path: impl AsRef<Path>) -> Result<Colormap, CptError> {
        let path = path.as_ref();
        let name = path.file_stem().map(|s| s.to_string_lossy().into_owned());
        let file = File::open(path)?;
        Colormap::from_cpt_reader(BufReader::new(file), name.as_deref())
    }

    /// Read a cpt colormap from any line-oriented source.
    ///
    /// `name` is the identifier for the resulting colormap; `None` leaves
    /// it empty.  Positions are normalized so the first stop lands at 0 and
    /// the last at 1; row order is preserved as-is, so a file with
    /// decreasing x values produces an out-of-order colormap rather than a
    /// silently re-sorted one.
    pub fn from_cpt_reader(reader: impl BufRead, name: Option<&str>)
                           -> Result<Colormap, CptError> {
        let mut model = ColorModel::Rgb;
        let mut raw: Vec<RawStop> = Vec::new();
        let mut last_right: Option<RawStop> = None;

        for (i, line) in reader.lines().enumerate() {
            let line = line?;
            let lineno = i + 1;
            let tokens: Vec<&str> = line.split_whitespace().collect();
            let Some(&first) = tokens.first() else { continue };

            if first.starts_with('#') {
                // Header or comment; the most recent model hint wins.
                model = if tokens[tokens.len() - 1] == "HSV" {
                    ColorModel::Hsv
                } else {
                    ColorModel::Rgb
                };
                continue;
            }
            if matches!(first, "B" | "F" | "N") {
                continue;
            }

            if tokens.len() < 8 {
                return Err(CptError::ShortRow {
                    line: lineno, expected: 8, found: tokens.len(),
                });
            }
            let mut fields = [0.; 8];
            for (slot, tok) in fields.iter_mut().zip(&tokens) {
                *slot = parse_field(tok, lineno)?;
            }
            let [x0, c0, c1, c2, x1, d0, d1, d2] = fields;
            raw.push(RawStop { x: x0, c0, c1, c2, model });
            last_right = Some(RawStop { x: x1, c0: d0, c1: d1, c2: d2, model });
        }

        // The right edge of the last segment closes the gradient.
        let Some(right) = last_right else { return Err(CptError::NoData) };
        raw.push(right);

        let x_min = raw[0].x;
        let x_max = raw[raw.len() - 1].x;
        if x_max == x_min {
            return Err(CptError::DegenerateRange);
        }
        let stops = raw.iter()
            .map(|r| ColorStop { position: (r.x - x_min) / (x_max - x_min),
                                 color: r.color() })
            .collect();
        Ok(Colormap::new(name.unwrap_or(""), stops))
    }
}

/// A discrete list of colors with no interpolation structure, as produced
/// by listed-color table files: two header lines (count and column names)
/// followed by one `r g b` row per color, channels already in \[0, 1\].
#[derive(Debug, Clone, PartialEq)]
pub struct ListedColormap {
    name: String,
    colors: Vec<RGB<f64>>,
}

impl ListedColormap {
    /// Read a listed-color table from in-memory text.
    pub fn from_table_str(text: &str, name: &str) -> Result<ListedColormap, CptError> {
        ListedColormap::from_table_reader(text.as_bytes(), name)
    }

    /// Read a listed-color table from any line-oriented source.
    pub fn from_table_reader(reader: impl BufRead, name: &str)
                             -> Result<ListedColormap, CptError> {
        let mut colors = Vec::new();
        for (i, line) in reader.lines().enumerate() {
            let line = line?;
            let lineno = i + 1;
            if lineno <= 2 {
                continue; // count and column-name headers
            }
            let tokens: Vec<&str> = line.split_whitespace().collect();
            if tokens.is_empty() {
                continue;
            }
            if tokens.len() < 3 {
                return Err(CptError::ShortRow {
                    line: lineno, expected: 3, found: tokens.len(),
                });
            }
            let mut ch = [0.; 3];
            for (slot, tok) in ch.iter_mut().zip(&tokens) {
                *slot = parse_field(tok, lineno)?;
            }
            colors.push(RGB { r: ch[0], g: ch[1], b: ch[2] });
        }
        if colors.is_empty() {
            return Err(CptError::NoData);
        }
        Ok(ListedColormap { name: name.to_owned(), colors })
    }

    pub fn name(&self) -> &str { &self.name }

    pub fn colors(&self) -> &[RGB<f64>] { &self.colors }

    /// Number of colors in the list (always ≥ 1).
    pub fn len(&self) -> usize { self.colors.len() }

    pub fn is_empty(&self) -> bool { self.colors.is_empty() }
}
