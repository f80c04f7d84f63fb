// @file main.rs
// @author Hajime Suzuki
// @brief kitplot: render figure recipes and preview the KIT colormaps

use anyhow::{Result, anyhow};
use clap::{Parser, Subcommand};
use kitplot::cmap::{ListedColormap, colormaps};
use kitplot::recipe::FigureRecipe;
use kitplot::style::ScaleMode;
use plotters::prelude::*;
use plotters::style::colors::colormaps::ColorMap;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, Parser)]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Cmd,
}

#[derive(Clone, Debug, Subcommand)]
pub enum Cmd {
    #[clap(about = "render a figure recipe (YAML)")]
    Plot {
        #[clap(help = "recipe file")]
        recipe: PathBuf,

        #[clap(short = 'o', long, help = "output filename; extension selects the format", default_value = "out.png")]
        output: PathBuf,

        #[clap(short = 's', long, help = "figure scaling against the document line width (overrides the recipe)")]
        scale: Option<ScaleMode>,

        #[clap(short = 'd', long, help = "resolution for raster output (overrides the recipe)")]
        dpi: Option<f64>,

        #[clap(long, help = "keep the standard subplot margins instead of cropping")]
        no_squeeze: bool,

        #[clap(long, help = "no padding around the cropped figure")]
        zero_pad: bool,
    },

    #[clap(about = "write a color bar preview of a colormap")]
    Colormap {
        #[clap(help = "colormap name, e.g. kit_green_black")]
        name: String,

        #[clap(short = 'o', long, help = "output filename", default_value = "colormap.png")]
        output: PathBuf,

        #[clap(short = 'W', long, help = "width in pixel", default_value = "512")]
        width: u32,

        #[clap(short = 'H', long, help = "height in pixel", default_value = "48")]
        height: u32,

        #[clap(short = 'r', long, help = "reverse the colormap")]
        reverse: bool,
    },

    #[clap(about = "list built-in colormaps")]
    List,
}

fn find_colormap(name: &str) -> Result<ListedColormap> {
    let base = name.strip_suffix("_r").unwrap_or(name);
    let cmap = colormaps()
        .into_iter()
        .find(|x| x.name() == base)
        .ok_or_else(|| anyhow!("unknown colormap: {:?}", name))?;
    if base != name { Ok(cmap.reversed()) } else { Ok(cmap.clone()) }
}

fn write_color_bar(cmap: &ListedColormap, path: &Path, (width, height): (u32, u32)) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(anyhow!("empty color bar: {} x {}", width, height));
    }
    let root = BitMapBackend::new(path, (width, height)).into_drawing_area();
    root.fill(&WHITE)?;
    for i in 0..width {
        let color = cmap.get_color_normalized(i as f64, 0.0, (width - 1).max(1) as f64);
        root.draw(&Rectangle::new([(i as i32, 0), (i as i32 + 1, height as i32)], color.filled()))?;
    }
    root.present()?;
    log::info!("wrote {} ({})", path.display(), cmap.name());
    Ok(())
}

fn print_args(args: &[String]) {
    let args = args
        .iter()
        .map(|x| if x.contains(' ') { format!("\"{x}\"") } else { x.to_string() })
        .collect::<Vec<_>>();
    let args = args.join(" ");
    log::info!("args: {args}");
}

fn run(args: &Args) -> Result<()> {
    match &args.command {
        Cmd::Plot {
            recipe,
            output,
            scale,
            dpi,
            no_squeeze,
            zero_pad,
        } => {
            let mut recipe = FigureRecipe::load(recipe)?;
            if let Some(scale) = scale {
                recipe.init.scale = *scale;
            }
            let mut opts = recipe.export;
            if let Some(dpi) = dpi {
                opts.dpi = *dpi;
            }
            if *no_squeeze {
                opts.squeeze = false;
            }
            if *zero_pad {
                opts.zero_pad = true;
            }
            recipe.render(output, &opts)
        }
        Cmd::Colormap {
            name,
            output,
            width,
            height,
            reverse,
        } => {
            let cmap = find_colormap(name)?;
            let cmap = if *reverse { cmap.reversed() } else { cmap };
            write_color_bar(&cmap, output, (*width, *height))
        }
        Cmd::List => {
            for cmap in colormaps() {
                println!("{}", cmap.name());
            }
            Ok(())
        }
    }
}

fn main() {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let args = Args::parse();
    print_args(&std::env::args().collect::<Vec<_>>());

    if let Err(e) = run(&args) {
        log::error!("{e:#}");
        std::process::exit(1);
    }
}
