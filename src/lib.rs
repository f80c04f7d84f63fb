pub mod cmap;
pub mod color;
pub mod figure;
pub mod recipe;
pub mod style;

pub use cmap::{ListedColormap, colormaps};
pub use color::Rgba;
pub use figure::{ExportOptions, Figure, PlotType, SeriesOptions, plot_data, plot_export};
pub use recipe::FigureRecipe;
pub use style::{PlotInit, ScaleMode, Style, plot_init};
