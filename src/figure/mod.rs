// @file mod.rs
// @author Hajime Suzuki
// @brief retained figure model: one figure, one axes, a list of artists

mod draw;
mod export;
mod render;
mod series;

pub use export::{ExportOptions, ImageFormat, plot_export};
pub use series::{PlotType, SeriesOptions, plot_data};

use crate::color::Rgba;
use crate::style::Style;
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Marker {
    #[default]
    #[serde(rename = "o")]
    Circle,
    #[serde(rename = "s")]
    Square,
    #[serde(rename = "^")]
    TriangleUp,
    #[serde(rename = "v")]
    TriangleDown,
    #[serde(rename = "D")]
    Diamond,
    #[serde(rename = "x")]
    Cross,
    #[serde(rename = "+")]
    Plus,
    #[serde(rename = ".")]
    Point,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineStyle {
    #[default]
    #[serde(rename = "-")]
    Solid,
    #[serde(rename = "--")]
    Dashed,
    #[serde(rename = ":")]
    Dotted,
    #[serde(rename = "-.")]
    DashDot,
    #[serde(rename = "none")]
    None,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Hatch {
    #[serde(rename = "/")]
    Slash,
    #[serde(rename = "\\")]
    Backslash,
    #[serde(rename = "|")]
    Vertical,
    #[serde(rename = "-")]
    Horizontal,
    #[serde(rename = "+")]
    Grid,
    #[serde(rename = "x")]
    Cross,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GridWhich {
    #[default]
    Major,
    Minor,
    Both,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GridAxis {
    X,
    Y,
    #[default]
    Both,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Grid {
    pub which: GridWhich,
    pub axis: GridAxis,
}

/// Marker appearance; size is the marker diameter in points.
#[derive(Clone, Debug, PartialEq)]
pub struct MarkerSpec {
    pub marker: Marker,
    pub size: f64,
    pub face: Rgba,
    pub edge: Option<(Rgba, f64)>,
}

/// Line appearance; width in points.
#[derive(Clone, Debug, PartialEq)]
pub struct StrokeSpec {
    pub color: Rgba,
    pub width: f64,
    pub style: LineStyle,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ArtistKind {
    Scatter {
        points: Vec<(f64, f64)>,
        marker: MarkerSpec,
    },
    Line {
        points: Vec<(f64, f64)>,
        stroke: StrokeSpec,
        marker: Option<MarkerSpec>,
    },
    Bars {
        points: Vec<(f64, f64)>,
        width: f64,
        color: Rgba,
        alpha: f64,
        hatch: Option<Hatch>,
        edge_width: f64,
    },
    ErrorBars {
        points: Vec<(f64, f64)>,
        err: Vec<f64>,
        color: Rgba,
        cap_size: f64,
        line_width: f64,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Artist {
    pub kind: ArtistKind,
    pub label: Option<String>,
    pub zorder: f64,
}

impl Artist {
    fn extend_limits(&self, limits: &mut Limits) {
        match &self.kind {
            ArtistKind::Scatter { points, .. } | ArtistKind::Line { points, .. } => {
                for &(x, y) in points {
                    limits.add(x, y);
                }
            }
            ArtistKind::Bars { points, width, .. } => {
                for &(x, y) in points {
                    limits.add(x - width / 2.0, 0.0);
                    limits.add(x + width / 2.0, y);
                }
                limits.has_bars = true;
            }
            ArtistKind::ErrorBars { points, err, .. } => {
                for (&(x, y), &e) in points.iter().zip(err.iter()) {
                    limits.add(x, y - e);
                    limits.add(x, y + e);
                }
            }
        }
    }
}

#[derive(Copy, Clone, Debug)]
struct Limits {
    x: (f64, f64),
    y: (f64, f64),
    has_bars: bool,
}

impl Limits {
    fn new() -> Limits {
        Limits {
            x: (f64::INFINITY, f64::NEG_INFINITY),
            y: (f64::INFINITY, f64::NEG_INFINITY),
            has_bars: false,
        }
    }

    fn add(&mut self, x: f64, y: f64) {
        if x.is_finite() {
            self.x = (self.x.0.min(x), self.x.1.max(x));
        }
        if y.is_finite() {
            self.y = (self.y.0.min(y), self.y.1.max(y));
        }
    }
}

const AXES_MARGIN: f64 = 0.05;

fn pad_range((lo, hi): (f64, f64), sticky_zero: bool) -> (f64, f64) {
    if lo > hi {
        return (0.0, 1.0);
    }
    if lo == hi {
        let delta = if lo == 0.0 { 0.5 } else { lo.abs() * AXES_MARGIN };
        return (lo - delta, hi + delta);
    }
    let pad = (hi - lo) * AXES_MARGIN;
    let lo = if sticky_zero && lo == 0.0 { 0.0 } else { lo - pad };
    let hi = if sticky_zero && hi == 0.0 { 0.0 } else { hi + pad };
    (lo, hi)
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Axes {
    artists: Vec<Artist>,
    pub xlabel: Option<String>,
    pub ylabel: Option<String>,
    pub title: Option<String>,
    pub grid: Option<Grid>,
    legend: Option<usize>,
    hide_tick_labels: bool,
}

impl Axes {
    pub fn new() -> Axes {
        Axes::default()
    }

    pub fn artists(&self) -> &[Artist] {
        &self.artists
    }

    pub fn add_artist(&mut self, artist: Artist) {
        log::debug!("artist added: zorder {}, label {:?}", artist.zorder, artist.label);
        self.artists.push(artist);
    }

    /// Shows a legend covering the artists added so far.
    pub fn legend(&mut self) {
        self.legend = Some(self.artists.len());
    }

    pub fn has_legend(&self) -> bool {
        self.legend.is_some()
    }

    /// Indices of the artists that appear in the legend.
    pub fn legend_entries(&self) -> Vec<usize> {
        let upto = self.legend.unwrap_or(0);
        (0..upto).filter(|&i| self.artists[i].label.is_some()).collect()
    }

    pub fn hide_tick_labels(&mut self) {
        self.hide_tick_labels = true;
    }

    pub fn tick_labels_visible(&self) -> bool {
        !self.hide_tick_labels
    }

    /// Autoscaled view limits: data bounds plus 5% on each side. Bars keep
    /// their zero baseline on the axis edge.
    pub fn view_limits(&self) -> ((f64, f64), (f64, f64)) {
        let mut limits = Limits::new();
        for artist in &self.artists {
            artist.extend_limits(&mut limits);
        }
        (pad_range(limits.x, false), pad_range(limits.y, limits.has_bars))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Figure {
    size: (f64, f64),
    axes: Axes,
}

impl Figure {
    /// Empty figure of `style.figure_size` with a single axes.
    pub fn new(style: &Style) -> Figure {
        Figure::with_size(style.figure_size)
    }

    pub fn with_size(size: (f64, f64)) -> Figure {
        Figure { size, axes: Axes::new() }
    }

    /// Width and height in inches.
    pub fn size(&self) -> (f64, f64) {
        self.size
    }

    pub fn axes(&self) -> &Axes {
        &self.axes
    }

    pub fn axes_mut(&mut self) -> &mut Axes {
        &mut self.axes
    }
}
