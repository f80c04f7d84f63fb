// @file cmap.rs
// @author Hajime Suzuki
// @brief KIT brand colormaps, linear gradients over the fixed palette

//! Nine 256-entry colormaps interpolated between the KIT brand colors.
//!
//! Two-color maps blend `w * a + (1 - w) * b` with `w = i / 255`, so index 0
//! holds the second color and index 255 the first. Three-color maps weight
//! start, middle and end colors with three piecewise-linear ramps split at
//! index 128.

use crate::color::{BLACK, KIT_BLUE, KIT_GREEN, KIT_RED, Rgba, TRANSPARENT, WHITE};
use anyhow::{Result, anyhow};
use lazy_static::lazy_static;
use plotters::prelude::RGBAColor;
use plotters::style::colors::colormaps::ColorMap;

/// Number of entries in every gradient table.
pub const N: usize = 256;

const HALF: usize = N / 2;

/// Evenly spaced samples over [start, end], endpoints included.
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            let mut v = (0..n).map(|i| start + i as f64 * step).collect::<Vec<_>>();
            v[n - 1] = end;
            v
        }
    }
}

/// Blend factor for two-color gradients: 0 -> 1 over the whole table.
pub fn ramp() -> Vec<f64> {
    linspace(0.0, 1.0, N)
}

/// Blend factors for three-color gradients (start, middle, end).
///
/// The middle ramp peaks at both 127 and 128; the two halves are computed
/// independently and the seam is kept as is.
pub fn triple_ramps() -> [Vec<f64>; 3] {
    let zeros = vec![0.0; HALF];
    let up = linspace(0.0, 1.0, HALF);
    let down = linspace(1.0, 0.0, HALF);

    let start = [down.as_slice(), zeros.as_slice()].concat();
    let middle = [up.as_slice(), down.as_slice()].concat();
    let end = [zeros.as_slice(), up.as_slice()].concat();
    [start, middle, end]
}

pub fn two_color_gradient(a: Rgba, b: Rgba) -> Vec<Rgba> {
    ramp().into_iter().map(|w| w * a + (1.0 - w) * b).collect()
}

pub fn three_color_gradient(start: Rgba, middle: Rgba, end: Rgba) -> Vec<Rgba> {
    let [r1, r2, r3] = triple_ramps();
    (0..N).map(|i| r1[i] * start + r2[i] * middle + r3[i] * end).collect()
}

/// Discrete lookup table from [0, 1] to colors.
#[derive(Clone, Debug, PartialEq)]
pub struct ListedColormap {
    name: String,
    colors: Vec<Rgba>,
}

impl ListedColormap {
    pub fn new(name: &str, colors: Vec<Rgba>) -> Result<ListedColormap> {
        if colors.is_empty() {
            return Err(anyhow!("colormap {:?} has no colors", name));
        }
        Ok(Self::from_table(name, colors))
    }

    // gradient tables always hold N entries
    fn from_table(name: &str, colors: Vec<Rgba>) -> ListedColormap {
        ListedColormap {
            name: name.to_string(),
            colors,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn colors(&self) -> &[Rgba] {
        &self.colors
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Color for `x` in [0, 1]. Values below 0 clamp to the first entry,
    /// above 1 to the last; NaN maps to transparent.
    pub fn get(&self, x: f64) -> Rgba {
        if x.is_nan() {
            return TRANSPARENT;
        }
        let n = self.colors.len();
        let scaled = x * n as f64;
        let index = if scaled < 0.0 {
            0
        } else if scaled >= n as f64 {
            n - 1
        } else {
            scaled as usize
        };
        self.colors[index]
    }

    pub fn reversed(&self) -> ListedColormap {
        let name = match self.name.strip_suffix("_r") {
            Some(base) => base.to_string(),
            None => format!("{}_r", self.name),
        };
        let mut colors = self.colors.clone();
        colors.reverse();
        ListedColormap { name, colors }
    }
}

impl ColorMap<RGBAColor, f64> for ListedColormap {
    fn get_color_normalized(&self, h: f64, min: f64, max: f64) -> RGBAColor {
        let x = if max > min { (h - min) / (max - min) } else { 0.0 };
        self.get(x).into()
    }
}

lazy_static! {
    pub static ref KIT_GREEN_BLACK: ListedColormap = ListedColormap::from_table("kit_green_black", two_color_gradient(KIT_GREEN, BLACK));
    pub static ref KIT_GREEN_WHITE: ListedColormap = ListedColormap::from_table("kit_green_white", two_color_gradient(KIT_GREEN, WHITE));
    pub static ref KIT_GREEN_RED: ListedColormap = ListedColormap::from_table("kit_green_red", two_color_gradient(KIT_GREEN, KIT_RED));
    pub static ref KIT_RED_BLACK: ListedColormap = ListedColormap::from_table("kit_red_black", two_color_gradient(KIT_RED, BLACK));
    pub static ref KIT_RED_WHITE: ListedColormap = ListedColormap::from_table("kit_red_white", two_color_gradient(KIT_RED, WHITE));
    pub static ref KIT_BLACK_GREEN_WHITE: ListedColormap =
        ListedColormap::from_table("kit_black_green_white", three_color_gradient(BLACK, KIT_GREEN, WHITE));
    pub static ref KIT_BLUE_GREEN_RED: ListedColormap =
        ListedColormap::from_table("kit_blue_green_red", three_color_gradient(KIT_BLUE, KIT_GREEN, KIT_RED));
    pub static ref KIT_BLACK_RED_WHITE: ListedColormap =
        ListedColormap::from_table("kit_black_red_white", three_color_gradient(BLACK, KIT_RED, WHITE));
    pub static ref KIT_BLACK_BLUE_WHITE: ListedColormap =
        ListedColormap::from_table("kit_black_blue_white", three_color_gradient(BLACK, KIT_BLUE, WHITE));
}

/// All built-in colormaps, two-color ones first.
pub fn colormaps() -> [&'static ListedColormap; 9] {
    [
        &KIT_GREEN_BLACK,
        &KIT_GREEN_WHITE,
        &KIT_GREEN_RED,
        &KIT_RED_BLACK,
        &KIT_RED_WHITE,
        &KIT_BLACK_GREEN_WHITE,
        &KIT_BLUE_GREEN_RED,
        &KIT_BLACK_RED_WHITE,
        &KIT_BLACK_BLUE_WHITE,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-12;

    #[test]
    fn tables_are_in_range() {
        for cmap in colormaps() {
            assert_eq!(cmap.len(), N, "{}", cmap.name());
            for c in cmap.colors() {
                assert!(c.channels().iter().all(|x| (-TOL..=1.0 + TOL).contains(x)), "{}: {:?}", cmap.name(), c);
            }
        }
    }

    #[test]
    fn two_color_endpoints_and_samples() {
        let pairs = [
            (&*KIT_GREEN_BLACK, KIT_GREEN, BLACK),
            (&*KIT_GREEN_WHITE, KIT_GREEN, WHITE),
            (&*KIT_GREEN_RED, KIT_GREEN, KIT_RED),
            (&*KIT_RED_BLACK, KIT_RED, BLACK),
            (&*KIT_RED_WHITE, KIT_RED, WHITE),
        ];
        for (cmap, a, b) in pairs {
            assert!(cmap.colors()[0].approx_eq(&b, TOL));
            assert!(cmap.colors()[255].approx_eq(&a, TOL));
            for i in [0usize, 1, 127, 128, 255] {
                let w = i as f64 / 255.0;
                let expected = w * a + (1.0 - w) * b;
                assert!(cmap.colors()[i].approx_eq(&expected, TOL), "{} at {}", cmap.name(), i);
            }
        }
    }

    #[test]
    fn triple_weights_sum_to_one() {
        let [r1, r2, r3] = triple_ramps();
        assert_eq!((r1.len(), r2.len(), r3.len()), (N, N, N));
        for i in 0..N {
            assert!((r1[i] + r2[i] + r3[i] - 1.0).abs() < TOL, "index {}", i);
        }
    }

    #[test]
    fn middle_ramp_peaks_on_both_sides_of_seam() {
        let [r1, r2, r3] = triple_ramps();
        assert_eq!(r2[127], 1.0);
        assert_eq!(r2[128], 1.0);
        assert_eq!(r1[127], 0.0);
        assert_eq!(r1[128], 0.0);
        assert_eq!(r3[128], 0.0);
        assert_eq!(r3[255], 1.0);
    }

    #[test]
    fn three_color_endpoints() {
        let cmap = &*KIT_BLUE_GREEN_RED;
        assert!(cmap.colors()[0].approx_eq(&KIT_BLUE, TOL));
        assert!(cmap.colors()[127].approx_eq(&KIT_GREEN, TOL));
        assert!(cmap.colors()[128].approx_eq(&KIT_GREEN, TOL));
        assert!(cmap.colors()[255].approx_eq(&KIT_RED, TOL));
    }

    #[test]
    fn lookup_edges() {
        let cmap = &*KIT_GREEN_WHITE;
        assert_eq!(cmap.get(0.0), cmap.colors()[0]);
        assert_eq!(cmap.get(1.0), cmap.colors()[255]);
        assert_eq!(cmap.get(0.5), cmap.colors()[128]);
        assert_eq!(cmap.get(-3.0), cmap.colors()[0]);
        assert_eq!(cmap.get(7.0), cmap.colors()[255]);
        assert_eq!(cmap.get(f64::NAN), TRANSPARENT);
    }

    #[test]
    fn plotters_colormap_normalizes() {
        let cmap = &*KIT_RED_BLACK;
        let c = cmap.get_color_normalized(10.0, 0.0, 10.0);
        let expected: RGBAColor = KIT_RED.into();
        assert_eq!((c.0, c.1, c.2), (expected.0, expected.1, expected.2));
    }

    #[test]
    fn reversed_twice_is_identity() {
        let r = KIT_GREEN_RED.reversed();
        assert_eq!(r.name(), "kit_green_red_r");
        assert_eq!(r.colors()[0], KIT_GREEN_RED.colors()[255]);
        assert_eq!(r.reversed(), *KIT_GREEN_RED);
    }

    #[test]
    fn custom_colormap() {
        let cmap = ListedColormap::new("duo", vec![BLACK, WHITE]).unwrap();
        assert_eq!(cmap.get(0.25), BLACK);
        assert_eq!(cmap.get(0.75), WHITE);
        assert!(ListedColormap::new("none", Vec::new()).is_err());
    }
}
