// @file style.rs
// @author Hajime Suzuki
// @brief plot defaults: figure sizing against the document line width, fonts and legend

use crate::color::{BLACK, Rgba};
use anyhow::{Result, anyhow};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

const CM_PER_INCH: f64 = 2.54;

/// How the base figure size is scaled against the document line width.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScaleMode {
    HalfPage,
    #[default]
    FullPage,
    Presentation, // full page width, fonts forced to 1.6x
    Fraction,     // width = fraction * line width
}

impl TryFrom<u8> for ScaleMode {
    type Error = anyhow::Error;

    fn try_from(code: u8) -> Result<ScaleMode> {
        match code {
            1 => Ok(ScaleMode::FullPage),
            2 => Ok(ScaleMode::HalfPage),
            3 => Ok(ScaleMode::Presentation),
            4 => Ok(ScaleMode::Fraction),
            _ => Err(anyhow!("unknown scale mode code: {}", code)),
        }
    }
}

/// Parameters of [`plot_init`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotInit {
    pub scale: ScaleMode,
    /// document line width in cm
    pub page_line_width_cm: f64,
    pub font_scale: f64,
    pub font_family: String,
    /// base figure size in inches
    pub figure_size: (f64, f64),
    /// used by [`ScaleMode::Fraction`]
    pub fraction: f64,
    pub marker_size: f64,
    pub line_width: f64,
    pub use_locale: bool,
}

impl Default for PlotInit {
    fn default() -> Self {
        PlotInit {
            scale: ScaleMode::FullPage,
            page_line_width_cm: 16.5,
            font_scale: 1.0,
            font_family: "Latin Modern Roman".to_string(),
            figure_size: (6.4, 4.8),
            fraction: 0.6,
            marker_size: 6.0,
            line_width: 1.5,
            use_locale: false,
        }
    }
}

/// Legend box appearance. `fancybox`, `shadow`, `label_spacing` and
/// `column_spacing` are carried with the style but the plotters legend has no
/// rounded frame, shadow or row spacing to apply them to.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LegendStyle {
    pub font_size: f64,
    pub fancybox: bool,
    pub shadow: bool,
    pub edge_color: Rgba,
    // the following are in units of the legend font size
    pub handle_text_pad: f64,
    pub handle_length: f64,
    pub border_pad: f64,
    pub label_spacing: f64,
    pub column_spacing: f64,
}

impl Default for LegendStyle {
    fn default() -> Self {
        LegendStyle {
            font_size: 10.0,
            fancybox: true,
            shadow: false,
            edge_color: Rgba::gray(0.8),
            handle_text_pad: 0.8,
            handle_length: 2.0,
            border_pad: 0.4,
            label_spacing: 0.5,
            column_spacing: 2.0,
        }
    }
}

/// Styling shared by every figure drawn with it. Sizes are in points unless
/// noted otherwise.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Style {
    /// inches
    pub figure_size: (f64, f64),
    /// on-screen resolution; file output takes its own from [`crate::figure::ExportOptions`]
    pub dpi: f64,
    pub font_family: String,
    /// kept for recipes; labels are drawn as plain text
    pub mathtext_fontset: String,
    pub legend: LegendStyle,
    pub tick_label_size: f64,
    pub axes_label_size: f64,
    pub title_size: f64,
    pub axes_line_width: f64,
    /// draw the grid and the axis lines under the data
    pub axis_below: bool,
    pub marker_size: f64,
    pub line_width: f64,
    pub hatch_line_width: f64,
    pub use_locale: bool,
}

impl Default for Style {
    fn default() -> Self {
        Style {
            figure_size: (6.4, 4.8),
            dpi: 100.0,
            font_family: "sans-serif".to_string(),
            mathtext_fontset: "dejavusans".to_string(),
            legend: LegendStyle::default(),
            tick_label_size: 10.0,
            axes_label_size: 10.0,
            title_size: 12.0,
            axes_line_width: 0.8,
            axis_below: false,
            marker_size: 6.0,
            line_width: 1.5,
            hatch_line_width: 1.0,
            use_locale: false,
        }
    }
}

impl Style {
    /// Decimal separator for tick labels.
    pub fn decimal_separator(&self) -> char {
        if self.use_locale { locale_decimal_separator() } else { '.' }
    }
}

fn locale_decimal_separator() -> char {
    let locale = ["LC_ALL", "LC_NUMERIC", "LANG"]
        .iter()
        .filter_map(|key| std::env::var(key).ok())
        .find(|x| !x.is_empty())
        .unwrap_or_default();
    let lang = locale.split(['_', '.', '@']).next().unwrap_or("");
    match lang {
        "de" | "fr" | "es" | "it" | "nl" | "pt" | "ru" | "pl" | "cs" | "da" | "fi" | "nb" | "sv" | "tr" => ',',
        _ => '.',
    }
}

/// Figure size after scaling `init.figure_size` to the target share of the
/// document line width.
pub fn scaled_figure_size(init: &PlotInit) -> (f64, f64) {
    let share = match init.scale {
        ScaleMode::HalfPage => 0.5,
        ScaleMode::FullPage | ScaleMode::Presentation => 1.0,
        ScaleMode::Fraction => init.fraction,
    };
    let (w, h) = init.figure_size;
    let fac = share * init.page_line_width_cm / (CM_PER_INCH * w);
    (w * fac, h * fac)
}

/// Builds a [`Style`] from library defaults and `init`. Every call starts
/// over from the defaults, so repeated calls never accumulate.
pub fn plot_init(init: &PlotInit) -> Style {
    let scale = if init.scale == ScaleMode::Presentation { 1.6 } else { init.font_scale };
    let figure_size = scaled_figure_size(init);
    log::debug!(
        "figure size: {:.4} x {:.4} in ({:?}, line width {} cm)",
        figure_size.0,
        figure_size.1,
        init.scale,
        init.page_line_width_cm
    );

    let defaults = Style::default();
    Style {
        figure_size,
        font_family: init.font_family.clone(),
        mathtext_fontset: "cm".to_string(),
        legend: LegendStyle {
            font_size: 10.0 * scale,
            fancybox: true,
            shadow: false,
            edge_color: BLACK,
            handle_text_pad: 0.2,
            handle_length: 1.0,
            border_pad: 0.2,
            label_spacing: 0.2,
            column_spacing: 0.2,
        },
        tick_label_size: 8.0 * scale,
        axes_label_size: 10.0 * scale,
        axes_line_width: 0.5 * scale,
        axis_below: true,
        marker_size: init.marker_size,
        hatch_line_width: init.line_width / 2.0,
        line_width: init.line_width,
        use_locale: init.use_locale,
        ..defaults
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-9;

    #[test]
    fn full_page_matches_line_width() {
        let style = plot_init(&PlotInit::default());
        let expected = 16.5 / 2.54;
        assert!((style.figure_size.0 - expected).abs() < TOL);
        assert!((style.figure_size.0 - 6.4961).abs() < 1e-4);
        assert!((style.figure_size.1 / style.figure_size.0 - 0.75).abs() < TOL);
    }

    #[test]
    fn half_page_is_half_width() {
        let init = PlotInit {
            scale: ScaleMode::HalfPage,
            ..PlotInit::default()
        };
        let style = plot_init(&init);
        assert!((style.figure_size.0 - 16.5 / 2.54 / 2.0).abs() < TOL);
    }

    #[test]
    fn fraction_uses_multiplier() {
        let init = PlotInit {
            scale: ScaleMode::Fraction,
            fraction: 0.6,
            ..PlotInit::default()
        };
        let style = plot_init(&init);
        assert!((style.figure_size.0 - 0.6 * 16.5 / 2.54).abs() < TOL);
    }

    #[test]
    fn presentation_forces_font_scale() {
        let init = PlotInit {
            scale: ScaleMode::Presentation,
            font_scale: 1.0,
            ..PlotInit::default()
        };
        let style = plot_init(&init);
        assert!((style.figure_size.0 - 16.5 / 2.54).abs() < TOL);
        assert!((style.legend.font_size - 16.0).abs() < TOL);
        assert!((style.tick_label_size - 12.8).abs() < TOL);
        assert!((style.axes_line_width - 0.8).abs() < TOL);
    }

    #[test]
    fn fonts_and_lines_follow_init() {
        let init = PlotInit {
            font_scale: 2.0,
            font_family: "serif".to_string(),
            marker_size: 4.0,
            line_width: 2.0,
            ..PlotInit::default()
        };
        let style = plot_init(&init);
        assert_eq!(style.font_family, "serif");
        assert_eq!(style.axes_label_size, 20.0);
        assert_eq!(style.tick_label_size, 16.0);
        assert_eq!(style.marker_size, 4.0);
        assert_eq!(style.hatch_line_width, 1.0);
        assert_eq!(style.line_width, 2.0);
        assert_eq!(style.legend.handle_length, 1.0);
        assert_eq!(style.legend.edge_color, BLACK);
        assert_eq!(Style::default().legend.edge_color, Rgba::gray(0.8));
        assert!(style.axis_below);
    }

    #[test]
    fn repeated_calls_do_not_accumulate() {
        let init = PlotInit {
            scale: ScaleMode::HalfPage,
            ..PlotInit::default()
        };
        let first = plot_init(&init);
        let _other = plot_init(&PlotInit {
            font_scale: 3.0,
            ..PlotInit::default()
        });
        let second = plot_init(&init);
        assert_eq!(first, second);
    }

    #[test]
    fn scale_mode_codes() {
        assert_eq!(ScaleMode::try_from(1).unwrap(), ScaleMode::FullPage);
        assert_eq!(ScaleMode::try_from(2).unwrap(), ScaleMode::HalfPage);
        assert_eq!(ScaleMode::try_from(3).unwrap(), ScaleMode::Presentation);
        assert_eq!(ScaleMode::try_from(4).unwrap(), ScaleMode::Fraction);
        assert!(ScaleMode::try_from(5).is_err());
    }

    #[test]
    fn init_from_yaml_fills_defaults() {
        let init: PlotInit = serde_yaml::from_str("scale: half-page\nfont_scale: 1.2\n").unwrap();
        assert_eq!(init.scale, ScaleMode::HalfPage);
        assert_eq!(init.font_scale, 1.2);
        assert_eq!(init.page_line_width_cm, 16.5);
        assert_eq!(init.figure_size, (6.4, 4.8));
    }
}
