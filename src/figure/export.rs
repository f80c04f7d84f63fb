// @file export.rs
// @author Hajime Suzuki
// @brief figure export; the file extension picks the plotters backend, pdf goes through svg2pdf

use crate::figure::Figure;
use crate::figure::render::{Frame, draw_figure};
use crate::style::Style;
use anyhow::{Result, anyhow};
use plotters::coord::Shift;
use plotters::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use svg2pdf::{ConversionOptions, PageOptions, usvg};

// vector output is laid out in points
const VECTOR_DPI: f64 = 72.0;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Jpeg,
    Bmp,
    Svg,
    Pdf,
}

impl ImageFormat {
    const SUPPORTED: &'static str = "bmp, jpeg, jpg, pdf, png, svg";

    pub fn from_extension(ext: &str) -> Result<ImageFormat> {
        match ext.to_ascii_lowercase().as_str() {
            "png" => Ok(ImageFormat::Png),
            "jpg" | "jpeg" => Ok(ImageFormat::Jpeg),
            "bmp" => Ok(ImageFormat::Bmp),
            "svg" => Ok(ImageFormat::Svg),
            "pdf" => Ok(ImageFormat::Pdf),
            _ => Err(anyhow!("Format {:?} is not supported (supported formats: {})", ext, Self::SUPPORTED)),
        }
    }

    pub fn is_vector(&self) -> bool {
        matches!(self, ImageFormat::Svg | ImageFormat::Pdf)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    /// crop to the axes and their labels
    pub squeeze: bool,
    /// raster resolution; ignored for vector output
    pub dpi: f64,
    /// no padding around the cropped figure
    pub zero_pad: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        ExportOptions {
            squeeze: true,
            dpi: 1000.0,
            zero_pad: false,
        }
    }
}

/// Output path and format; a path without extension gets ".png".
fn resolve_path(path: &Path) -> Result<(PathBuf, ImageFormat)> {
    match path.extension().and_then(|x| x.to_str()) {
        Some(ext) => Ok((path.to_path_buf(), ImageFormat::from_extension(ext)?)),
        None => {
            let mut path = path.as_os_str().to_owned();
            path.push(".png");
            Ok((PathBuf::from(path), ImageFormat::Png))
        }
    }
}

fn canvas_size(fig: &Figure, dpi: f64) -> Result<(u32, u32)> {
    let (w, h) = fig.size();
    let dim = ((w * dpi).round(), (h * dpi).round());
    if !(dim.0 >= 1.0 && dim.1 >= 1.0 && dim.0 < 65536.0 && dim.1 < 65536.0) {
        return Err(anyhow!("image size out of range: {} x {} (figure {} x {} in at {} dpi)", dim.0, dim.1, w, h, dpi));
    }
    Ok((dim.0 as u32, dim.1 as u32))
}

fn render<DB>(root: DrawingArea<DB, Shift>, fig: &Figure, style: &Style, dpi: f64, opts: &ExportOptions) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)?;
    let frame = if opts.squeeze {
        Frame::tight(fig, style, dpi, opts.zero_pad)
    } else {
        Frame::standard(fig, style, dpi, root.dim_in_pixel())
    };
    draw_figure(&root, fig, style, &frame)?;
    root.present()?;
    Ok(())
}

// pdf pages are laid out at 72 dpi, so one svg pixel becomes one point
fn write_pdf(fig: &Figure, style: &Style, path: &Path, dim: (u32, u32), opts: &ExportOptions) -> Result<()> {
    let mut svg = String::new();
    render(SVGBackend::with_string(&mut svg, dim).into_drawing_area(), fig, style, VECTOR_DPI, opts)?;

    let mut options = usvg::Options::default();
    options.fontdb_mut().load_system_fonts();
    let tree = usvg::Tree::from_str(&svg, &options).map_err(|e| anyhow!("failed to parse the rendered svg: {}", e))?;
    let pdf = svg2pdf::to_pdf(&tree, ConversionOptions::default(), PageOptions::default())
        .map_err(|e| anyhow!("failed to convert to pdf: {:?}", e))?;
    std::fs::write(path, pdf).map_err(|e| anyhow!("failed to write {}: {}", path.display(), e))?;
    Ok(())
}

/// Writes `fig` to `path`.
///
/// With `opts.squeeze` the canvas keeps the figure size; only the margins
/// around the axes shrink to the label areas plus a 0.1 in padding (none with
/// `opts.zero_pad`). The image is not cropped to the drawn content.
pub fn plot_export<P: AsRef<Path>>(fig: &Figure, style: &Style, path: P, opts: &ExportOptions) -> Result<()> {
    let (path, format) = resolve_path(path.as_ref())?;
    let dpi = if format.is_vector() { VECTOR_DPI } else { opts.dpi };
    let dim = canvas_size(fig, dpi)?;
    log::info!("writing {} ({:?}, {} x {})", path.display(), format, dim.0, dim.1);

    match format {
        ImageFormat::Svg => render(SVGBackend::new(&path, dim).into_drawing_area(), fig, style, dpi, opts),
        ImageFormat::Pdf => write_pdf(fig, style, &path, dim, opts),
        ImageFormat::Png | ImageFormat::Jpeg | ImageFormat::Bmp => {
            render(BitMapBackend::new(&path, dim).into_drawing_area(), fig, style, dpi, opts)
        }
    }
}
