// @file render.rs
// @author Hajime Suzuki
// @brief draws a Figure onto a plotters drawing area

use crate::color::{BLACK as BLACK_RGBA, Rgba};
use crate::figure::draw::{BarGlyph, DASH_DOT, DASHED, DOTTED, ErrorBarGlyph, LegendKey, MarkerGlyph, MarkerShape, Polyline};
use crate::figure::{Artist, ArtistKind, Axes, Figure, GridAxis, GridWhich, LineStyle, MarkerSpec};
use crate::style::Style;
use anyhow::Result;
use plotters::coord::Shift;
use plotters::coord::types::RangedCoordf64;
use plotters::prelude::*;

const GRID_COLOR: RGBColor = RGBColor(176, 176, 176);
const GRID_ALPHA: f64 = 0.5;

// standard subplot placement, as fractions of the figure
const SUBPLOT_LEFT: f64 = 0.125;
const SUBPLOT_RIGHT: f64 = 0.9;
const SUBPLOT_BOTTOM: f64 = 0.11;
const SUBPLOT_TOP: f64 = 0.88;

const TIGHT_PAD_INCHES: f64 = 0.1;

// hatch line pitch in points
const HATCH_PITCH: f64 = 4.0;

/// Pixel placement of the axes within the figure.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Frame {
    pub px_per_pt: f64,
    pub margin_top: u32,
    pub margin_right: u32,
    pub margin_bottom: u32,
    pub margin_left: u32,
    pub x_label_area: u32,
    pub y_label_area: u32,
}

impl Frame {
    /// Tight frame: label areas sized from the fonts, plus a fixed padding
    /// (none if `zero_pad`).
    pub fn tight(fig: &Figure, style: &Style, dpi: f64, zero_pad: bool) -> Frame {
        let px_per_pt = dpi / 72.0;
        let axes = fig.axes();
        let pad = if zero_pad { 0.0 } else { TIGHT_PAD_INCHES * dpi };
        let tick = if axes.tick_labels_visible() { style.tick_label_size * px_per_pt } else { 0.0 };
        let label = style.axes_label_size * px_per_pt;

        let x_area = 1.6 * tick + if axes.xlabel.is_some() { 1.5 * label } else { 0.0 };
        let y_area = 3.5 * tick + if axes.ylabel.is_some() { 1.5 * label } else { 0.0 };
        Frame {
            px_per_pt,
            margin_top: (pad + 0.5 * tick).round() as u32,
            margin_right: (pad + tick).round() as u32,
            margin_bottom: pad.round() as u32,
            margin_left: pad.round() as u32,
            x_label_area: x_area.round() as u32,
            y_label_area: y_area.round() as u32,
        }
    }

    /// Axes placed at the standard subplot fractions of a `width` x `height`
    /// pixel canvas.
    pub fn standard(fig: &Figure, style: &Style, dpi: f64, (width, height): (u32, u32)) -> Frame {
        let px_per_pt = dpi / 72.0;
        let (w, h) = (width as f64, height as f64);
        let title = if fig.axes().title.is_some() { 1.5 * style.title_size * px_per_pt } else { 0.0 };
        Frame {
            px_per_pt,
            margin_top: ((1.0 - SUBPLOT_TOP) * h - title).max(0.0).round() as u32,
            margin_right: ((1.0 - SUBPLOT_RIGHT) * w).round() as u32,
            margin_bottom: 0,
            margin_left: 0,
            x_label_area: (SUBPLOT_BOTTOM * h).round() as u32,
            y_label_area: (SUBPLOT_LEFT * w).round() as u32,
        }
    }

    fn px(&self, pt: f64) -> f64 {
        pt * self.px_per_pt
    }

    fn px_u32(&self, pt: f64) -> u32 {
        self.px(pt).round().max(0.0) as u32
    }
}

/// Tick label text: up to six decimals, trailing zeros dropped.
pub fn format_tick(v: f64, decimal_separator: char) -> String {
    let s = format!("{:.6}", v);
    let s = if s.contains('.') { s.trim_end_matches('0').trim_end_matches('.') } else { s.as_str() };
    let s = if s == "-0" { "0" } else { s };
    if decimal_separator == '.' {
        s.to_string()
    } else {
        s.replace('.', &decimal_separator.to_string())
    }
}

fn marker_shape(spec: &MarkerSpec, frame: &Frame) -> MarkerShape {
    MarkerShape {
        marker: spec.marker,
        radius: (frame.px(spec.size) / 2.0).round() as i32,
        face: spec.face.into(),
        edge: spec.edge.map(|(color, width)| (color.into(), frame.px_u32(width))),
    }
}

/// Bar face and edge; `alpha` replaces the alpha of `color`.
fn bar_colors(color: &Rgba, alpha: f64) -> (RGBAColor, RGBAColor) {
    (color.with_alpha(alpha).into(), BLACK_RGBA.with_alpha(alpha).into())
}

type Chart<'a, DB> = ChartContext<'a, DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

fn draw_line<'a, DB>(chart: &mut Chart<'a, DB>, points: &[(f64, f64)], line: LineStyle, color: &RGBAColor, width: u32) -> Result<()>
where
    DB: DrawingBackend + 'a,
    DB::ErrorType: 'static,
{
    let style = ShapeStyle {
        color: *color,
        filled: false,
        stroke_width: width,
    };
    // dash lengths scale with the line width
    let lw = width as f64;
    let coords = points.iter().copied();
    match line {
        LineStyle::None => {}
        LineStyle::Solid => {
            chart.draw_series(LineSeries::new(coords, style))?;
        }
        LineStyle::Dashed => {
            chart.draw_series(DashedLineSeries::new(coords, DASHED.0 * lw, DASHED.1 * lw, style))?;
        }
        LineStyle::Dotted => {
            let radius = (DOTTED.0 * lw / 2.0).round().max(1.0) as u32;
            let dot = style.filled();
            chart.draw_series(DottedLineSeries::new(coords, 0.0, (DOTTED.0 + DOTTED.1) * lw, move |c| {
                Circle::new(c, radius, dot)
            }))?;
        }
        LineStyle::DashDot => {
            chart.draw_series(std::iter::once(Polyline {
                points: points.to_vec(),
                style,
                pattern: DASH_DOT.iter().map(|x| x * lw).collect(),
            }))?;
        }
    }
    Ok(())
}

fn draw_artist<'a, DB>(chart: &mut Chart<'a, DB>, artist: &Artist, frame: &Frame, with_label: bool) -> Result<()>
where
    DB: DrawingBackend + 'a,
    DB::ErrorType: 'static,
{
    let key = match &artist.kind {
        ArtistKind::Scatter { points, marker } => {
            let shape = marker_shape(marker, frame);
            chart.draw_series(points.iter().map(|&pos| MarkerGlyph { pos, shape: &shape }))?;
            LegendKey {
                pos: (0, 0),
                length: 0,
                line: None,
                bar: None,
                marker: Some(shape),
            }
        }
        ArtistKind::Line { points, stroke, marker } => {
            let color: RGBAColor = stroke.color.into();
            let width = frame.px_u32(stroke.width).max(1);
            draw_line(chart, points, stroke.style, &color, width)?;
            let shape = marker.as_ref().map(|m| marker_shape(m, frame));
            if let Some(shape) = &shape {
                chart.draw_series(points.iter().map(|&pos| MarkerGlyph { pos, shape }))?;
            }
            LegendKey {
                pos: (0, 0),
                length: 0,
                line: (stroke.style != LineStyle::None).then_some((color, width)),
                bar: None,
                marker: shape,
            }
        }
        ArtistKind::Bars {
            points,
            width,
            color,
            alpha,
            hatch,
            edge_width,
        } => {
            let (face, edge) = bar_colors(color, *alpha);
            let spacing = frame.px(HATCH_PITCH).round() as i32;
            chart.draw_series(points.iter().map(|&(x, y)| BarGlyph {
                corners: [(x - width / 2.0, 0.0), (x + width / 2.0, y)],
                face: face.clone(),
                edge: edge.clone(),
                edge_width: frame.px_u32(*edge_width),
                hatch: hatch.map(|h| (h, spacing)),
            }))?;
            LegendKey {
                pos: (0, 0),
                length: 0,
                line: None,
                bar: Some((face, edge)),
                marker: None,
            }
        }
        ArtistKind::ErrorBars {
            points,
            err,
            color,
            cap_size,
            line_width,
        } => {
            let color: RGBAColor = (*color).into();
            let width = frame.px_u32(*line_width).max(1);
            let cap = (frame.px(*cap_size) / 2.0).round() as i32;
            chart.draw_series(points.iter().zip(err.iter()).map(|(&(x, y), &e)| ErrorBarGlyph {
                ends: [(x, y - e), (x, y + e)],
                color: color.clone(),
                width,
                cap,
            }))?;
            LegendKey {
                pos: (0, 0),
                length: 0,
                line: Some((color, width)),
                bar: None,
                marker: None,
            }
        }
    };

    if let (true, Some(label)) = (with_label, &artist.label) {
        // one legend entry per artist, carried by an empty series
        let key = LegendKey {
            length: frame.px(20.0) as i32,
            ..key
        };
        chart
            .draw_series(std::iter::empty::<MarkerGlyph>())?
            .label(label.clone())
            .legend(move |pos| key.at(pos));
    }
    Ok(())
}

fn draw_mesh<'a, DB>(chart: &mut Chart<'a, DB>, axes: &Axes, style: &Style, frame: &Frame) -> Result<()>
where
    DB: DrawingBackend + 'a,
    DB::ErrorType: 'static,
{
    let family = style.font_family.as_str();
    let separator = style.decimal_separator();
    let formatter = |v: &f64| format_tick(*v, separator);
    let axis_width = frame.px_u32(style.axes_line_width).max(1);
    let grid_width = frame.px_u32(0.8).max(1);

    let mut mesh = chart.configure_mesh();
    mesh.axis_style(ShapeStyle {
        color: BLACK.mix(1.0),
        filled: false,
        stroke_width: axis_width,
    })
    .label_style((family, frame.px(style.tick_label_size)))
    .axis_desc_style((family, frame.px(style.axes_label_size)))
    .x_label_formatter(&formatter)
    .y_label_formatter(&formatter);
    if !axes.tick_labels_visible() {
        mesh.x_labels(0).y_labels(0);
    }
    if let Some(xlabel) = &axes.xlabel {
        mesh.x_desc(xlabel.as_str());
    }
    if let Some(ylabel) = &axes.ylabel {
        mesh.y_desc(ylabel.as_str());
    }
    match axes.grid {
        None => {
            mesh.disable_mesh();
        }
        Some(grid) => {
            let bold = ShapeStyle {
                color: GRID_COLOR.mix(GRID_ALPHA),
                filled: false,
                stroke_width: grid_width,
            };
            let light = ShapeStyle {
                color: GRID_COLOR.mix(GRID_ALPHA * 0.5),
                filled: false,
                stroke_width: (grid_width / 2).max(1),
            };
            let hidden = ShapeStyle {
                color: WHITE.mix(0.0),
                filled: false,
                stroke_width: 0,
            };
            match grid.which {
                GridWhich::Major => {
                    mesh.bold_line_style(bold).max_light_lines(0);
                }
                GridWhich::Minor => {
                    mesh.bold_line_style(hidden).light_line_style(light);
                }
                GridWhich::Both => {
                    mesh.bold_line_style(bold).light_line_style(light);
                }
            }
            match grid.axis {
                GridAxis::X => {
                    mesh.disable_y_mesh();
                }
                GridAxis::Y => {
                    mesh.disable_x_mesh();
                }
                GridAxis::Both => {}
            }
        }
    }
    mesh.draw()?;
    Ok(())
}

/// Draws `fig` onto `root`, which covers the whole figure.
pub fn draw_figure<DB>(root: &DrawingArea<DB, Shift>, fig: &Figure, style: &Style, frame: &Frame) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let axes = fig.axes();
    let ((x0, x1), (y0, y1)) = axes.view_limits();

    let mut builder = ChartBuilder::on(root);
    builder
        .margin_top(frame.margin_top)
        .margin_right(frame.margin_right)
        .margin_bottom(frame.margin_bottom)
        .margin_left(frame.margin_left)
        .x_label_area_size(frame.x_label_area)
        .y_label_area_size(frame.y_label_area);
    if let Some(title) = &axes.title {
        builder.caption(title, (style.font_family.as_str(), frame.px(style.title_size)));
    }
    let mut chart = builder.build_cartesian_2d(x0..x1, y0..y1)?;

    if style.axis_below {
        draw_mesh(&mut chart, axes, style, frame)?;
    }

    let legend = axes.legend_entries();
    let mut order = (0..axes.artists().len()).collect::<Vec<_>>();
    order.sort_by(|&a, &b| axes.artists()[a].zorder.total_cmp(&axes.artists()[b].zorder));
    for i in order {
        draw_artist(&mut chart, &axes.artists()[i], frame, legend.contains(&i))?;
    }

    if !style.axis_below {
        draw_mesh(&mut chart, axes, style, frame)?;
    }

    if axes.has_legend() {
        if legend.is_empty() {
            log::warn!("no artists with labels found to put in legend");
        } else {
            draw_legend(&mut chart, style, frame)?;
        }
    }
    Ok(())
}

fn draw_legend<'a, DB>(chart: &mut Chart<'a, DB>, style: &Style, frame: &Frame) -> Result<()>
where
    DB: DrawingBackend + 'a,
    DB::ErrorType: 'static,
{
    let legend = &style.legend;
    let font_px = frame.px(legend.font_size);
    let handle = (legend.handle_length + legend.handle_text_pad) * font_px;
    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .margin((legend.border_pad * font_px).round() as u32)
        .legend_area_size(handle.round().max(frame.px(20.0)) as u32)
        .label_font((style.font_family.as_str(), font_px))
        .background_style(ShapeStyle {
            color: WHITE.mix(0.8),
            filled: true,
            stroke_width: 0,
        })
        .border_style(ShapeStyle {
            color: legend.edge_color.into(),
            filled: false,
            stroke_width: 1,
        })
        .draw()?;
    Ok(())
}
