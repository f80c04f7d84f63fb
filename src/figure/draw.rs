// @file draw.rs
// @author Hajime Suzuki
// @brief plotters elements for markers, dashed polylines, hatched bars, error bars and legend keys

use crate::figure::{Hatch, Marker};
use plotters::element::{Drawable, PointCollection};
use plotters::prelude::*;
use plotters_backend::{BackendCoord, DrawingErrorKind};

fn stroke(color: &RGBAColor, width: u32) -> ShapeStyle {
    ShapeStyle {
        color: color.clone(),
        filled: false,
        stroke_width: width.max(1),
    }
}

fn fill(color: &RGBAColor) -> ShapeStyle {
    ShapeStyle {
        color: color.clone(),
        filled: true,
        stroke_width: 0,
    }
}

/// Marker appearance in backend pixels.
#[derive(Clone, Debug)]
pub struct MarkerShape {
    pub marker: Marker,
    pub radius: i32,
    pub face: RGBAColor,
    pub edge: Option<(RGBAColor, u32)>,
}

impl MarkerShape {
    fn polygon(&self, (x, y): BackendCoord) -> Option<Vec<BackendCoord>> {
        let r = self.radius;
        let dx = (r as f64 * 0.866) as i32;
        match self.marker {
            Marker::TriangleUp => Some(vec![(x, y - r), (x - dx, y + r / 2), (x + dx, y + r / 2)]),
            Marker::TriangleDown => Some(vec![(x, y + r), (x - dx, y - r / 2), (x + dx, y - r / 2)]),
            Marker::Diamond => Some(vec![(x, y - r), (x + r, y), (x, y + r), (x - r, y)]),
            _ => None,
        }
    }

    pub fn draw_at<DB: DrawingBackend>(&self, pos: BackendCoord, backend: &mut DB) -> Result<(), DrawingErrorKind<DB::ErrorType>> {
        let (x, y) = pos;
        let r = self.radius.max(1);
        let edge_width = self.edge.as_ref().map_or(1, |(_, w)| *w);
        match self.marker {
            Marker::Circle | Marker::Point => {
                let r = if self.marker == Marker::Point { (r / 2).max(1) } else { r };
                backend.draw_circle(pos, r as u32, &fill(&self.face), true)?;
                if let Some((color, width)) = &self.edge {
                    backend.draw_circle(pos, r as u32, &stroke(color, *width), false)?;
                }
            }
            Marker::Square => {
                backend.draw_rect((x - r, y - r), (x + r, y + r), &fill(&self.face), true)?;
                if let Some((color, width)) = &self.edge {
                    backend.draw_rect((x - r, y - r), (x + r, y + r), &stroke(color, *width), false)?;
                }
            }
            Marker::TriangleUp | Marker::TriangleDown | Marker::Diamond => {
                let vert = self.polygon(pos).unwrap_or_default();
                backend.fill_polygon(vert.iter().copied(), &fill(&self.face))?;
                if let Some((color, width)) = &self.edge {
                    let mut path = vert.clone();
                    path.push(vert[0]);
                    backend.draw_path(path, &stroke(color, *width))?;
                }
            }
            Marker::Cross => {
                let style = stroke(&self.face, edge_width);
                backend.draw_line((x - r, y - r), (x + r, y + r), &style)?;
                backend.draw_line((x - r, y + r), (x + r, y - r), &style)?;
            }
            Marker::Plus => {
                let style = stroke(&self.face, edge_width);
                backend.draw_line((x - r, y), (x + r, y), &style)?;
                backend.draw_line((x, y - r), (x, y + r), &style)?;
            }
        }
        Ok(())
    }
}

/// One marker at a data coordinate.
pub struct MarkerGlyph<'a> {
    pub pos: (f64, f64),
    pub shape: &'a MarkerShape,
}

impl<'a> PointCollection<'a, (f64, f64)> for &'a MarkerGlyph<'_> {
    type Point = &'a (f64, f64);
    type IntoIter = std::iter::Once<&'a (f64, f64)>;

    fn point_iter(self) -> Self::IntoIter {
        std::iter::once(&self.pos)
    }
}

impl<DB> Drawable<DB> for MarkerGlyph<'_>
where
    DB: DrawingBackend,
{
    fn draw<I>(&self, pos: I, backend: &mut DB, _: (u32, u32)) -> Result<(), DrawingErrorKind<DB::ErrorType>>
    where
        I: Iterator<Item = BackendCoord>,
    {
        let mut pos = pos;
        match pos.next() {
            Some(pos) => self.shape.draw_at(pos, backend),
            None => Ok(()),
        }
    }
}

// on/off lengths in multiples of the line width
pub const DASHED: (f64, f64) = (3.7, 1.6);
pub const DOTTED: (f64, f64) = (1.0, 1.65);
pub const DASH_DOT: [f64; 4] = [6.4, 1.6, 1.0, 1.6];

/// Splits a polyline into the visible pieces of a dash pattern given in pixels.
pub fn split_dashes(points: &[(f64, f64)], pattern: &[f64]) -> Vec<Vec<(f64, f64)>> {
    let mut pieces = Vec::new();
    if points.len() < 2 || pattern.is_empty() || pattern.iter().sum::<f64>() <= 0.0 {
        if points.len() >= 2 {
            pieces.push(points.to_vec());
        }
        return pieces;
    }

    let mut index = 0;
    let mut left = pattern[0];
    let mut current = vec![points[0]];
    for w in points.windows(2) {
        let (mut from, to) = (w[0], w[1]);
        let mut seg = ((to.0 - from.0).powi(2) + (to.1 - from.1).powi(2)).sqrt();
        while seg > left {
            let t = left / seg;
            let cut = (from.0 + (to.0 - from.0) * t, from.1 + (to.1 - from.1) * t);
            if index % 2 == 0 {
                current.push(cut);
                pieces.push(std::mem::take(&mut current));
            } else {
                current = vec![cut];
            }
            seg -= left;
            from = cut;
            index = (index + 1) % pattern.len();
            left = pattern[index];
        }
        left -= seg;
        if index % 2 == 0 {
            current.push(to);
        }
    }
    if index % 2 == 0 && current.len() >= 2 {
        pieces.push(current);
    }
    pieces
}

/// Connected line with a dash-dot pattern; `pattern` holds on/off lengths in pixels.
pub struct Polyline {
    pub points: Vec<(f64, f64)>,
    pub style: ShapeStyle,
    pub pattern: Vec<f64>,
}

impl<'a> PointCollection<'a, (f64, f64)> for &'a Polyline {
    type Point = &'a (f64, f64);
    type IntoIter = std::slice::Iter<'a, (f64, f64)>;

    fn point_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

impl<DB> Drawable<DB> for Polyline
where
    DB: DrawingBackend,
{
    fn draw<I>(&self, pos: I, backend: &mut DB, _: (u32, u32)) -> Result<(), DrawingErrorKind<DB::ErrorType>>
    where
        I: Iterator<Item = BackendCoord>,
    {
        let points = pos.map(|(x, y)| (x as f64, y as f64)).collect::<Vec<_>>();
        for piece in split_dashes(&points, &self.pattern) {
            let piece = piece.iter().map(|&(x, y)| (x.round() as i32, y.round() as i32));
            backend.draw_path(piece, &self.style)?;
        }
        Ok(())
    }
}

/// Visits the hatch line segments clipped to the rectangle `ul`-`br`.
pub fn hatch_segments(hatch: Hatch, ul: BackendCoord, br: BackendCoord, spacing: i32) -> Vec<(BackendCoord, BackendCoord)> {
    let (l, t) = ul;
    let (r, b) = br;
    let spacing = spacing.max(2);
    let mut v = Vec::new();

    let horizontal = |v: &mut Vec<_>| {
        let mut y = t + spacing / 2;
        while y < b {
            v.push(((l, y), (r, y)));
            y += spacing;
        }
    };
    let vertical = |v: &mut Vec<_>| {
        let mut x = l + spacing / 2;
        while x < r {
            v.push(((x, t), (x, b)));
            x += spacing;
        }
    };
    // x + y = c
    let slash = |v: &mut Vec<_>| {
        let mut c = l + t + spacing / 2;
        while c < r + b {
            let (x0, x1) = ((c - b).max(l), (c - t).min(r));
            if x0 <= x1 {
                v.push(((x0, c - x0), (x1, c - x1)));
            }
            c += spacing;
        }
    };
    // x - y = c
    let backslash = |v: &mut Vec<_>| {
        let mut c = l - b + spacing / 2;
        while c < r - t {
            let (x0, x1) = ((c + t).max(l), (c + b).min(r));
            if x0 <= x1 {
                v.push(((x0, x0 - c), (x1, x1 - c)));
            }
            c += spacing;
        }
    };

    match hatch {
        Hatch::Horizontal => horizontal(&mut v),
        Hatch::Vertical => vertical(&mut v),
        Hatch::Slash => slash(&mut v),
        Hatch::Backslash => backslash(&mut v),
        Hatch::Grid => {
            horizontal(&mut v);
            vertical(&mut v);
        }
        Hatch::Cross => {
            slash(&mut v);
            backslash(&mut v);
        }
    }
    v
}

/// Single bar spanning two data corners.
pub struct BarGlyph {
    pub corners: [(f64, f64); 2],
    pub face: RGBAColor,
    pub edge: RGBAColor,
    pub edge_width: u32,
    pub hatch: Option<(Hatch, i32)>,
}

impl<'a> PointCollection<'a, (f64, f64)> for &'a BarGlyph {
    type Point = &'a (f64, f64);
    type IntoIter = std::slice::Iter<'a, (f64, f64)>;

    fn point_iter(self) -> Self::IntoIter {
        self.corners.iter()
    }
}

impl<DB> Drawable<DB> for BarGlyph
where
    DB: DrawingBackend,
{
    fn draw<I>(&self, pos: I, backend: &mut DB, _: (u32, u32)) -> Result<(), DrawingErrorKind<DB::ErrorType>>
    where
        I: Iterator<Item = BackendCoord>,
    {
        let pos = pos.collect::<Vec<_>>();
        if pos.len() != 2 {
            return Ok(());
        }
        let ul = (pos[0].0.min(pos[1].0), pos[0].1.min(pos[1].1));
        let br = (pos[0].0.max(pos[1].0), pos[0].1.max(pos[1].1));
        backend.draw_rect(ul, br, &fill(&self.face), true)?;
        if let Some((hatch, spacing)) = self.hatch {
            let style = stroke(&self.edge, self.edge_width);
            for (from, to) in hatch_segments(hatch, ul, br, spacing) {
                backend.draw_line(from, to, &style)?;
            }
        }
        if self.edge_width > 0 {
            backend.draw_rect(ul, br, &stroke(&self.edge, self.edge_width), false)?;
        }
        Ok(())
    }
}

/// Vertical error bar between two data points, with caps of `cap` pixels
/// on each side.
pub struct ErrorBarGlyph {
    pub ends: [(f64, f64); 2],
    pub color: RGBAColor,
    pub width: u32,
    pub cap: i32,
}

impl<'a> PointCollection<'a, (f64, f64)> for &'a ErrorBarGlyph {
    type Point = &'a (f64, f64);
    type IntoIter = std::slice::Iter<'a, (f64, f64)>;

    fn point_iter(self) -> Self::IntoIter {
        self.ends.iter()
    }
}

impl<DB> Drawable<DB> for ErrorBarGlyph
where
    DB: DrawingBackend,
{
    fn draw<I>(&self, pos: I, backend: &mut DB, _: (u32, u32)) -> Result<(), DrawingErrorKind<DB::ErrorType>>
    where
        I: Iterator<Item = BackendCoord>,
    {
        let pos = pos.collect::<Vec<_>>();
        if pos.len() != 2 {
            return Ok(());
        }
        let style = stroke(&self.color, self.width);
        backend.draw_line(pos[0], pos[1], &style)?;
        if self.cap > 0 {
            for (x, y) in pos {
                backend.draw_line((x - self.cap, y), (x + self.cap, y), &style)?;
            }
        }
        Ok(())
    }
}

/// Legend handle: an optional line segment with an optional marker on top.
#[derive(Clone)]
pub struct LegendKey {
    pub pos: BackendCoord,
    pub length: i32,
    pub line: Option<(RGBAColor, u32)>,
    pub bar: Option<(RGBAColor, RGBAColor)>,
    pub marker: Option<MarkerShape>,
}

impl LegendKey {
    pub fn at(&self, pos: BackendCoord) -> LegendKey {
        LegendKey { pos, ..self.clone() }
    }
}

impl<'a> PointCollection<'a, BackendCoord> for &'a LegendKey {
    type Point = &'a BackendCoord;
    type IntoIter = std::iter::Once<&'a BackendCoord>;

    fn point_iter(self) -> Self::IntoIter {
        std::iter::once(&self.pos)
    }
}

impl<DB> Drawable<DB> for LegendKey
where
    DB: DrawingBackend,
{
    fn draw<I>(&self, pos: I, backend: &mut DB, _: (u32, u32)) -> Result<(), DrawingErrorKind<DB::ErrorType>>
    where
        I: Iterator<Item = BackendCoord>,
    {
        let mut pos = pos;
        let (x, y) = match pos.next() {
            Some(pos) => pos,
            None => return Ok(()),
        };
        let half = self.length / 2;
        if let Some((face, edge)) = &self.bar {
            let h = (half / 2).max(2);
            backend.draw_rect((x, y - h), (x + self.length, y + h), &fill(face), true)?;
            backend.draw_rect((x, y - h), (x + self.length, y + h), &stroke(edge, 1), false)?;
        }
        if let Some((color, width)) = &self.line {
            backend.draw_line((x, y), (x + self.length, y), &stroke(color, *width))?;
        }
        if let Some(marker) = &self.marker {
            marker.draw_at((x + half, y), backend)?;
        }
        Ok(())
    }
}
