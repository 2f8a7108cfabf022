use phf::phf_map;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

static NAMED_COLORS: phf::Map<&'static str, (u8, u8, u8)> = phf_map! {
    "black" => (0, 0, 0),
    "blue" => (0, 0, 255),
    "crimson" => (220, 20, 60),
    "cyan" => (0, 255, 255),
    "darkorange" => (255, 140, 0),
    "gray" => (128, 128, 128),
    "green" => (0, 128, 0),
    "indigo" => (75, 0, 130),
    "magenta" => (255, 0, 255),
    "mediumpurple" => (147, 112, 219),
    "mediumvioletred" => (199, 21, 133),
    "orange" => (255, 165, 0),
    "orchid" => (218, 112, 214),
    "purple" => (128, 0, 128),
    "red" => (255, 0, 0),
    "slateblue" => (106, 90, 205),
    "teal" => (0, 128, 128),
};

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ColorError {
    #[error("Unknown colour name '{0}'")]
    UnknownName(String),
    #[error("Invalid hex colour '{0}'. Expected '#rrggbb'.")]
    InvalidHex(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    fn from_hex(hex: &str) -> Result<Self, ColorError> {
        let digits = hex.trim_start_matches('#');
        if digits.len() != 6 || !digits.is_ascii() {
            return Err(ColorError::InvalidHex(hex.to_string()));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16).map_err(|_| ColorError::InvalidHex(hex.into()))
        };
        Ok(Self::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

impl FromStr for Rgb {
    type Err = ColorError;

    /// Accepts `#rrggbb` or a lowercase CSS-style colour name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.starts_with('#') {
            return Self::from_hex(s);
        }
        NAMED_COLORS
            .get(s.to_ascii_lowercase().as_str())
            .map(|&(r, g, b)| Self::new(r, g, b))
            .ok_or_else(|| ColorError::UnknownName(s.to_string()))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}
