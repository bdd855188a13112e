use std::{fmt, str::FromStr};

/// An opaque RGB color, written as `#RRGGBB`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
pub struct Color(pub u8, pub u8, pub u8);

impl Color {
    /// Build a color from a packed `0xRRGGBB` value
    const fn hex(value: u32) -> Self {
        Self((value >> 16) as u8, (value >> 8) as u8, value as u8)
    }
}

impl FromStr for Color {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .strip_prefix('#')
            .ok_or_else(|| ColorError::Format(s.to_owned()))?;
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ColorError::Format(s.to_owned()));
        }
        let value =
            u32::from_str_radix(digits, 16).map_err(|_| ColorError::Format(s.to_owned()))?;
        Ok(Self::hex(value))
    }
}

impl TryFrom<String> for Color {
    type Error = ColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(value: Color) -> Self {
        value.to_string()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}

/// Errors that can occur when parsing a color
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum ColorError {
    /// The string was not of the form `#RRGGBB`
    #[error("invalid color {0:?}, expected #RRGGBB")]
    Format(String),
}

/// The palette diagrams are drawn with
pub struct Colors;

impl Colors {
    /// Supply curves and cost
    pub const SUPPLY: Color = Color::hex(0x1565C0);
    /// Demand curves and utility
    pub const DEMAND: Color = Color::hex(0xEF6C00);
    /// Welfare
    pub const WELFARE: Color = Color::hex(0x2E7D32);
    /// Axes, annotations and markers
    pub const BLACK: Color = Color::hex(0x000000);
}

/// How a line is stroked.
///
/// Parsed from the short format strings used by plotting libraries:
/// `-`, `--`, `:` and `-.`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
pub enum LineStyle {
    /// `-`
    #[default]
    Solid,
    /// `--`
    Dashed,
    /// `:`
    Dotted,
    /// `-.`
    DashDot,
}

impl LineStyle {
    /// The alternating on/off lengths of the stroke, in pixels. Empty for solid lines.
    pub fn pattern(&self) -> &'static [f64] {
        match self {
            Self::Solid => &[],
            Self::Dashed => &[6.0, 4.0],
            Self::Dotted => &[1.5, 3.0],
            Self::DashDot => &[6.0, 3.0, 1.5, 3.0],
        }
    }

    /// The format string for this style
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Solid => "-",
            Self::Dashed => "--",
            Self::Dotted => ":",
            Self::DashDot => "-.",
        }
    }
}

impl FromStr for LineStyle {
    type Err = LineStyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "-" | "solid" => Ok(Self::Solid),
            "--" | "dashed" => Ok(Self::Dashed),
            ":" | "dotted" => Ok(Self::Dotted),
            "-." | "dashdot" => Ok(Self::DashDot),
            _ => Err(LineStyleError::Unknown(s.to_owned())),
        }
    }
}

impl TryFrom<String> for LineStyle {
    type Error = LineStyleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<LineStyle> for String {
    fn from(value: LineStyle) -> Self {
        value.as_str().to_owned()
    }
}

/// Errors that can occur when parsing a line style
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum LineStyleError {
    /// The format string is not one of `-`, `--`, `:` or `-.`
    #[error("unknown line style: {0}")]
    Unknown(String),
}
