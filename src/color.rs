// @file color.rs
// @author Hajime Suzuki
// @brief RGBA color with real-valued channels, palette constants and color-string parser

use anyhow::{Result, anyhow};
use hex_color::HexColor;
use plotters::prelude::RGBAColor;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Mul};
use std::str::FromStr;

/// Color with red, green, blue and alpha channels in [0, 1].
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgba {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Rgba {
    pub const fn new(r: f64, g: f64, b: f64, a: f64) -> Rgba {
        Rgba { r, g, b, a }
    }

    pub const fn from_rgb8(r: u8, g: u8, b: u8) -> Rgba {
        Rgba {
            r: r as f64 / 255.0,
            g: g as f64 / 255.0,
            b: b as f64 / 255.0,
            a: 1.0,
        }
    }

    pub const fn gray(level: f64) -> Rgba {
        Rgba::new(level, level, level, 1.0)
    }

    pub fn with_alpha(self, a: f64) -> Rgba {
        Rgba { a, ..self }
    }

    pub fn channels(&self) -> [f64; 4] {
        [self.r, self.g, self.b, self.a]
    }

    pub fn to_rgba8(self) -> (u8, u8, u8, u8) {
        let q = |x: f64| (x.clamp(0.0, 1.0) * 255.0).round() as u8;
        (q(self.r), q(self.g), q(self.b), q(self.a))
    }

    pub fn approx_eq(&self, other: &Rgba, tol: f64) -> bool {
        self.channels().iter().zip(other.channels().iter()).all(|(x, y)| (x - y).abs() <= tol)
    }
}

impl Add for Rgba {
    type Output = Rgba;

    fn add(self, rhs: Rgba) -> Rgba {
        Rgba::new(self.r + rhs.r, self.g + rhs.g, self.b + rhs.b, self.a + rhs.a)
    }
}

impl Mul<Rgba> for f64 {
    type Output = Rgba;

    fn mul(self, rhs: Rgba) -> Rgba {
        Rgba::new(self * rhs.r, self * rhs.g, self * rhs.b, self * rhs.a)
    }
}

impl From<Rgba> for RGBAColor {
    fn from(c: Rgba) -> RGBAColor {
        let (r, g, b, _) = c.to_rgba8();
        RGBAColor(r, g, b, c.a.clamp(0.0, 1.0))
    }
}

pub const BLACK: Rgba = Rgba::new(0.0, 0.0, 0.0, 1.0);
pub const WHITE: Rgba = Rgba::new(1.0, 1.0, 1.0, 1.0);
pub const TRANSPARENT: Rgba = Rgba::new(0.0, 0.0, 0.0, 0.0);

pub const KIT_GREEN: Rgba = Rgba::from_rgb8(0, 150, 130);
pub const KIT_RED: Rgba = Rgba::from_rgb8(162, 34, 35);
pub const KIT_BLUE: Rgba = Rgba::from_rgb8(70, 100, 170);
pub const KIT_ORANGE: Rgba = Rgba::from_rgb8(223, 155, 27);
pub const KIT_PURPLE: Rgba = Rgba::from_rgb8(163, 16, 124);

fn named_color(name: &str) -> Option<Rgba> {
    let c = match name {
        // single-letter base colors
        "b" => Rgba::new(0.0, 0.0, 1.0, 1.0),
        "g" => Rgba::new(0.0, 0.5, 0.0, 1.0),
        "r" => Rgba::new(1.0, 0.0, 0.0, 1.0),
        "c" => Rgba::new(0.0, 0.75, 0.75, 1.0),
        "m" => Rgba::new(0.75, 0.0, 0.75, 1.0),
        "y" => Rgba::new(0.75, 0.75, 0.0, 1.0),
        "k" | "black" => BLACK,
        "w" | "white" => WHITE,
        "blue" => Rgba::from_rgb8(0, 0, 255),
        "green" => Rgba::from_rgb8(0, 128, 0),
        "red" => Rgba::from_rgb8(255, 0, 0),
        "gray" | "grey" => Rgba::from_rgb8(128, 128, 128),
        "none" | "transparent" => TRANSPARENT,
        "kit-green" => KIT_GREEN,
        "kit-red" => KIT_RED,
        "kit-blue" => KIT_BLUE,
        "kit-orange" => KIT_ORANGE,
        "kit-purple" => KIT_PURPLE,
        _ => return None,
    };
    Some(c)
}

impl FromStr for Rgba {
    type Err = anyhow::Error;

    /// Accepts single-letter codes ("k"), names ("kit-green"), a grayscale
    /// level ("0.75") or a hex string ("#009682", "#00968280").
    fn from_str(s: &str) -> Result<Rgba> {
        let s = s.trim();
        if let Some(c) = named_color(&s.to_ascii_lowercase()) {
            return Ok(c);
        }
        if s.starts_with('#') {
            let hex = HexColor::parse(s).map_err(|e| anyhow!("failed to parse color {:?}: {}", s, e))?;
            return Ok(Rgba::new(
                hex.r as f64 / 255.0,
                hex.g as f64 / 255.0,
                hex.b as f64 / 255.0,
                hex.a as f64 / 255.0,
            ));
        }
        if let Ok(level) = s.parse::<f64>() {
            if (0.0..=1.0).contains(&level) {
                return Ok(Rgba::gray(level));
            }
        }
        Err(anyhow!("failed to parse color: {:?}", s))
    }
}

impl TryFrom<String> for Rgba {
    type Error = anyhow::Error;

    fn try_from(s: String) -> Result<Rgba> {
        s.parse()
    }
}

impl From<Rgba> for String {
    fn from(c: Rgba) -> String {
        c.to_string()
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let (r, g, b, a) = self.to_rgba8();
        write!(f, "#{:02x}{:02x}{:02x}{:02x}", r, g, b, a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_codes_and_names() {
        assert_eq!("k".parse::<Rgba>().unwrap(), BLACK);
        assert_eq!("Kit-Green".parse::<Rgba>().unwrap(), KIT_GREEN);
        assert_eq!("0.5".parse::<Rgba>().unwrap(), Rgba::gray(0.5));
        assert!("1.5".parse::<Rgba>().is_err());
        assert!("chartreuse-ish".parse::<Rgba>().is_err());
    }

    #[test]
    fn parse_hex() {
        let c: Rgba = "#009682".parse().unwrap();
        assert!(c.approx_eq(&KIT_GREEN, 1e-12));

        let c: Rgba = "#00000080".parse().unwrap();
        assert_eq!(c.to_rgba8(), (0, 0, 0, 128));
    }

    #[test]
    fn display_is_hex() {
        assert_eq!(KIT_RED.to_string(), "#a22223ff");
        let back: Rgba = KIT_RED.to_string().parse().unwrap();
        assert!(back.approx_eq(&KIT_RED, 1e-12));
    }

    #[test]
    fn to_plotters_color() {
        let c: RGBAColor = KIT_GREEN.with_alpha(0.5).into();
        assert_eq!((c.0, c.1, c.2), (0, 150, 130));
        assert!((c.3 - 0.5).abs() < 1e-12);
    }
}
