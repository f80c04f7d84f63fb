// @file series.rs
// @author Hajime Suzuki
// @brief one call per data series: scatter, bar, line or marker+line, with optional error bars

use crate::color::{BLACK, Rgba};
use crate::figure::{Artist, ArtistKind, Figure, Grid, GridAxis, GridWhich, Hatch, LineStyle, Marker, MarkerSpec, StrokeSpec};
use crate::style::Style;
use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlotType {
    #[default]
    MarkerLine,
    Scatter,
    Bar,
    Line,
}

// default draw order per artist type; error bars always go to the back
const ZORDER_PATCH: f64 = 1.0;
const ZORDER_LINE: f64 = 2.0;
const ZORDER_ERRORBAR: f64 = 0.0;

const ERRORBAR_ALPHA: f64 = 0.5;

/// Styling of one data series.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeriesOptions {
    pub plot_type: PlotType,
    /// legend entry
    pub label: Option<String>,
    pub xlabel: Option<String>,
    pub ylabel: Option<String>,
    pub marker: Marker,
    pub line_style: LineStyle,
    pub color: Rgba,
    pub title: Option<String>,
    /// `None` leaves the grid as it is
    pub grid: Option<GridWhich>,
    pub grid_axis: GridAxis,
    pub legend: bool,
    /// legend shows the marker only, without the connecting line
    pub legend_points_only: bool,
    pub bar_width: f64,
    pub hatch: Option<Hatch>,
    pub alpha: f64,
    /// defaults to `color`
    pub err_color: Option<Rgba>,
    pub zorder: Option<f64>,
    pub marker_edge_color: Option<Rgba>,
    pub marker_edge_width: f64,
}

impl Default for SeriesOptions {
    fn default() -> Self {
        SeriesOptions {
            plot_type: PlotType::MarkerLine,
            label: None,
            xlabel: None,
            ylabel: None,
            marker: Marker::Circle,
            line_style: LineStyle::Solid,
            color: BLACK,
            title: None,
            grid: Some(GridWhich::Major),
            grid_axis: GridAxis::Both,
            legend: true,
            legend_points_only: false,
            bar_width: 0.5,
            hatch: None,
            alpha: 1.0,
            err_color: None,
            zorder: None,
            marker_edge_color: None,
            marker_edge_width: 0.5,
        }
    }
}

impl SeriesOptions {
    fn marker_spec(&self, style: &Style) -> MarkerSpec {
        MarkerSpec {
            marker: self.marker,
            size: style.marker_size,
            face: self.color,
            edge: self.marker_edge_color.map(|c| (c, self.marker_edge_width)),
        }
    }

    fn stroke_spec(&self, width: f64) -> StrokeSpec {
        StrokeSpec {
            color: self.color,
            width,
            style: self.line_style,
        }
    }
}

fn check_len(x: &[f64], y: &[f64], what: &str) -> Result<()> {
    if x.len() != y.len() {
        return Err(anyhow!(
            "x and {} must have same first dimension, but have shapes ({},) and ({},)",
            what,
            x.len(),
            y.len()
        ));
    }
    Ok(())
}

/// Adds one data series to `fig`, or to a new figure sized by `style` when
/// `fig` is `None`, and returns the figure.
pub fn plot_data(style: &Style, fig: Option<Figure>, x: &[f64], y: &[f64], err: Option<&[f64]>, opts: &SeriesOptions) -> Result<Figure> {
    check_len(x, y, "y")?;
    if let Some(err) = err {
        check_len(x, err, "yerr")?;
    }
    let mut fig = fig.unwrap_or_else(|| Figure::new(style));
    let axes = fig.axes_mut();

    let points = x.iter().copied().zip(y.iter().copied()).collect::<Vec<_>>();
    let label = opts.label.clone();

    match opts.plot_type {
        PlotType::Scatter => axes.add_artist(Artist {
            kind: ArtistKind::Scatter {
                points,
                marker: opts.marker_spec(style),
            },
            label,
            zorder: opts.zorder.unwrap_or(ZORDER_PATCH),
        }),
        PlotType::Bar => axes.add_artist(Artist {
            kind: ArtistKind::Bars {
                points,
                width: opts.bar_width,
                color: opts.color,
                alpha: opts.alpha,
                hatch: opts.hatch,
                edge_width: style.hatch_line_width,
            },
            label,
            zorder: opts.zorder.unwrap_or(ZORDER_PATCH),
        }),
        PlotType::Line => axes.add_artist(Artist {
            kind: ArtistKind::Line {
                points,
                stroke: opts.stroke_spec(1.5 * style.line_width),
                marker: None,
            },
            label,
            zorder: opts.zorder.unwrap_or(ZORDER_LINE),
        }),
        PlotType::MarkerLine => {
            let line_label = if opts.legend_points_only {
                // the labeled scatter goes first so that the legend shows a marker only
                axes.add_artist(Artist {
                    kind: ArtistKind::Scatter {
                        points: points.clone(),
                        marker: opts.marker_spec(style),
                    },
                    label,
                    zorder: opts.zorder.unwrap_or(ZORDER_PATCH),
                });
                None
            } else {
                label
            };
            axes.add_artist(Artist {
                kind: ArtistKind::Line {
                    points,
                    stroke: opts.stroke_spec(style.line_width),
                    marker: Some(opts.marker_spec(style)),
                },
                label: line_label,
                zorder: opts.zorder.unwrap_or(ZORDER_LINE),
            });
        }
    }

    if let Some(err) = err {
        let color = opts.err_color.unwrap_or(opts.color);
        axes.add_artist(Artist {
            kind: ArtistKind::ErrorBars {
                points: x.iter().copied().zip(y.iter().copied()).collect(),
                err: err.to_vec(),
                color: color.with_alpha(ERRORBAR_ALPHA),
                cap_size: (style.marker_size - 2.0).max(0.0),
                line_width: style.line_width,
            },
            label: None,
            zorder: ZORDER_ERRORBAR,
        });
    }

    if let Some(xlabel) = &opts.xlabel {
        axes.xlabel = Some(xlabel.clone());
    }
    if let Some(ylabel) = &opts.ylabel {
        axes.ylabel = Some(ylabel.clone());
    }
    if let Some(title) = &opts.title {
        axes.title = Some(title.clone());
    }
    if let Some(which) = opts.grid {
        axes.grid = Some(Grid {
            which,
            axis: opts.grid_axis,
        });
    }
    if opts.legend {
        axes.legend();
    }
    Ok(fig)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::KIT_GREEN;
    use crate::style::{PlotInit, plot_init};

    const X: [f64; 3] = [1.0, 2.0, 3.0];
    const Y: [f64; 3] = [2.0, 4.0, 3.0];

    fn style() -> Style {
        plot_init(&PlotInit::default())
    }

    #[test]
    fn scatter_creates_figure() {
        let style = style();
        let opts = SeriesOptions {
            plot_type: PlotType::Scatter,
            label: Some("data".to_string()),
            ..SeriesOptions::default()
        };
        let fig = plot_data(&style, None, &X, &Y, None, &opts).unwrap();
        assert_eq!(fig.size(), style.figure_size);
        let artists = fig.axes().artists();
        assert_eq!(artists.len(), 1);
        assert!(matches!(artists[0].kind, ArtistKind::Scatter { .. }));
        assert_eq!(artists[0].label.as_deref(), Some("data"));
        assert_eq!(artists[0].zorder, 1.0);
    }

    #[test]
    fn bar_width_is_kept() {
        let opts = SeriesOptions {
            plot_type: PlotType::Bar,
            bar_width: 0.3,
            hatch: Some(Hatch::Slash),
            ..SeriesOptions::default()
        };
        let style = style();
        let fig = plot_data(&style, None, &X, &Y, None, &opts).unwrap();
        match &fig.axes().artists()[0].kind {
            ArtistKind::Bars {
                width, hatch, edge_width, ..
            } => {
                assert_eq!(*width, 0.3);
                assert_eq!(*hatch, Some(Hatch::Slash));
                assert_eq!(*edge_width, style.hatch_line_width);
            }
            other => panic!("unexpected artist: {:?}", other),
        }
    }

    #[test]
    fn line_is_wider() {
        let style = style();
        let opts = SeriesOptions {
            plot_type: PlotType::Line,
            ..SeriesOptions::default()
        };
        let fig = plot_data(&style, None, &X, &Y, None, &opts).unwrap();
        match &fig.axes().artists()[0].kind {
            ArtistKind::Line { stroke, marker, .. } => {
                assert_eq!(stroke.width, 1.5 * style.line_width);
                assert!(marker.is_none());
            }
            other => panic!("unexpected artist: {:?}", other),
        }
    }

    #[test]
    fn marker_line_single_labeled_artist() {
        let opts = SeriesOptions {
            label: Some("a".to_string()),
            ..SeriesOptions::default()
        };
        let fig = plot_data(&style(), None, &X, &Y, None, &opts).unwrap();
        let artists = fig.axes().artists();
        assert_eq!(artists.len(), 1);
        assert!(matches!(&artists[0].kind, ArtistKind::Line { marker: Some(_), .. }));
        assert_eq!(artists[0].label.as_deref(), Some("a"));
    }

    #[test]
    fn legend_points_only_puts_scatter_first() {
        let opts = SeriesOptions {
            label: Some("a".to_string()),
            legend_points_only: true,
            marker_edge_color: Some(KIT_GREEN),
            ..SeriesOptions::default()
        };
        let fig = plot_data(&style(), None, &X, &Y, None, &opts).unwrap();
        let artists = fig.axes().artists();
        assert_eq!(artists.len(), 2);
        match &artists[0].kind {
            ArtistKind::Scatter { marker, .. } => assert_eq!(marker.edge, Some((KIT_GREEN, 0.5))),
            other => panic!("unexpected artist: {:?}", other),
        }
        assert_eq!(artists[0].label.as_deref(), Some("a"));
        assert!(artists[1].label.is_none());
        assert_eq!(fig.axes().legend_entries(), vec![0]);
    }

    #[test]
    fn error_bars_are_separate_and_behind() {
        let style = style();
        let opts = SeriesOptions {
            color: KIT_GREEN,
            ..SeriesOptions::default()
        };
        let err = [0.1, 0.2, 0.3];
        let fig = plot_data(&style, None, &X, &Y, Some(&err[..]), &opts).unwrap();
        let artists = fig.axes().artists();
        assert_eq!(artists.len(), 2);
        match &artists[1].kind {
            ArtistKind::ErrorBars { err, color, cap_size, .. } => {
                assert_eq!(err.as_slice(), &[0.1, 0.2, 0.3]);
                assert_eq!(*color, KIT_GREEN.with_alpha(0.5));
                assert_eq!(*cap_size, style.marker_size - 2.0);
            }
            other => panic!("unexpected artist: {:?}", other),
        }
        assert_eq!(artists[1].zorder, 0.0);
    }

    #[test]
    fn error_bar_alpha_overrides_color_alpha() {
        let opts = SeriesOptions {
            err_color: Some(KIT_GREEN.with_alpha(0.8)),
            ..SeriesOptions::default()
        };
        let err = [0.1, 0.2, 0.3];
        let fig = plot_data(&style(), None, &X, &Y, Some(&err[..]), &opts).unwrap();
        match &fig.axes().artists()[1].kind {
            ArtistKind::ErrorBars { color, .. } => assert_eq!(color.a, 0.5),
            other => panic!("unexpected artist: {:?}", other),
        }
    }

    #[test]
    fn reuses_given_figure() {
        let style = style();
        let fig = plot_data(&style, None, &X, &Y, None, &SeriesOptions::default()).unwrap();
        let opts = SeriesOptions {
            xlabel: Some("t / s".to_string()),
            title: Some("run".to_string()),
            grid: None,
            legend: false,
            ..SeriesOptions::default()
        };
        let fig = plot_data(&style, Some(fig), &X, &Y, None, &opts).unwrap();
        let axes = fig.axes();
        assert_eq!(axes.artists().len(), 2);
        assert_eq!(axes.xlabel.as_deref(), Some("t / s"));
        assert_eq!(axes.title.as_deref(), Some("run"));
        assert_eq!(axes.grid, Some(Grid::default()));
        assert!(axes.has_legend());
    }

    #[test]
    fn mismatched_lengths_fail() {
        let err = plot_data(&style(), None, &X, &Y[..2], None, &SeriesOptions::default()).unwrap_err();
        assert!(err.to_string().contains("same first dimension"));
        assert!(plot_data(&style(), None, &X, &Y, Some(&[0.1][..]), &SeriesOptions::default()).is_err());
    }

    #[test]
    fn options_from_yaml() {
        let opts: SeriesOptions = serde_yaml::from_str(
            "plot_type: bar\nmarker: s\nline_style: '--'\ncolor: kit-green\nhatch: '/'\ngrid: null\ngrid_axis: y\n",
        )
        .unwrap();
        assert_eq!(opts.plot_type, PlotType::Bar);
        assert_eq!(opts.marker, Marker::Square);
        assert_eq!(opts.line_style, LineStyle::Dashed);
        assert_eq!(opts.color, KIT_GREEN);
        assert_eq!(opts.hatch, Some(Hatch::Slash));
        assert_eq!(opts.grid, None);
        assert_eq!(opts.grid_axis, GridAxis::Y);
        assert_eq!(opts.bar_width, 0.5);
    }
}
