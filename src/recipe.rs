// @file recipe.rs
// @author Hajime Suzuki
// @brief YAML description of a complete figure: init parameters, series and export options

use crate::figure::{ExportOptions, Figure, SeriesOptions, plot_data, plot_export};
use crate::style::{PlotInit, Style, plot_init};
use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SeriesRecipe {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    #[serde(default)]
    pub err: Option<Vec<f64>>,
    #[serde(flatten)]
    pub options: SeriesOptions,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FigureRecipe {
    pub init: PlotInit,
    pub series: Vec<SeriesRecipe>,
    pub hide_tick_labels: bool,
    pub export: ExportOptions,
}

impl FigureRecipe {
    pub fn from_yaml(text: &str) -> Result<FigureRecipe> {
        Ok(serde_yaml::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<FigureRecipe> {
        let text = std::fs::read_to_string(path).map_err(|e| anyhow!("failed to read {}: {}", path.display(), e))?;
        Self::from_yaml(&text)
    }

    /// Builds the style and the figure with every series drawn in order.
    pub fn build(&self) -> Result<(Style, Figure)> {
        let style = plot_init(&self.init);
        let mut fig = Figure::new(&style);
        if self.hide_tick_labels {
            fig.axes_mut().hide_tick_labels();
        }
        for (i, series) in self.series.iter().enumerate() {
            fig = plot_data(&style, Some(fig), &series.x, &series.y, series.err.as_deref(), &series.options)
                .map_err(|e| anyhow!("series {}: {}", i, e))?;
        }
        Ok((style, fig))
    }

    pub fn render(&self, path: &Path, opts: &ExportOptions) -> Result<()> {
        let (style, fig) = self.build()?;
        plot_export(&fig, &style, path, opts)
    }
}
