use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ulid::Ulid;

/// The base unit a good is priced against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Unit {
    #[serde(rename = "kg")]
    Kilogram,
    #[serde(rename = "L")]
    Liter,
}

impl Unit {
    /// The 1/1000 unit goods are dispensed in.
    pub fn sub_unit(self) -> Measure {
        match self {
            Unit::Kilogram => Measure::Gram,
            Unit::Liter => Measure::Milliliter,
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Unit::Kilogram => write!(f, "kg"),
            Unit::Liter => write!(f, "L"),
        }
    }
}

impl FromStr for Unit {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "kg" | "kilogram" | "mass" => Ok(Unit::Kilogram),
            "l" | "liter" | "litre" | "volume" => Ok(Unit::Liter),
            _ => Err(ParseError::Unit(s.to_string())),
        }
    }
}

/// The unit attached to a conversion input or result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Measure {
    Currency,
    Gram,
    Milliliter,
}

impl fmt::Display for Measure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Measure::Currency => write!(f, "currency"),
            Measure::Gram => write!(f, "g"),
            Measure::Milliliter => write!(f, "ml"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Red,
    Orange,
    Amber,
    Yellow,
    Lime,
    Green,
    Emerald,
    Teal,
    Cyan,
    Sky,
    Blue,
    Indigo,
    Violet,
    Purple,
    Fuchsia,
    Pink,
    Rose,
    Gray,
}

impl Color {
    pub const PALETTE: [Color; 18] = [
        Color::Red,
        Color::Orange,
        Color::Amber,
        Color::Yellow,
        Color::Lime,
        Color::Green,
        Color::Emerald,
        Color::Teal,
        Color::Cyan,
        Color::Sky,
        Color::Blue,
        Color::Indigo,
        Color::Violet,
        Color::Purple,
        Color::Fuchsia,
        Color::Pink,
        Color::Rose,
        Color::Gray,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Color::Red => "red",
            Color::Orange => "orange",
            Color::Amber => "amber",
            Color::Yellow => "yellow",
            Color::Lime => "lime",
            Color::Green => "green",
            Color::Emerald => "emerald",
            Color::Teal => "teal",
            Color::Cyan => "cyan",
            Color::Sky => "sky",
            Color::Blue => "blue",
            Color::Indigo => "indigo",
            Color::Violet => "violet",
            Color::Purple => "purple",
            Color::Fuchsia => "fuchsia",
            Color::Pink => "pink",
            Color::Rose => "rose",
            Color::Gray => "gray",
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::PALETTE[0]
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Color {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.to_lowercase();
        Color::PALETTE
            .into_iter()
            .find(|color| color.name() == needle)
            .ok_or_else(|| ParseError::Color(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    PriceToQuantity,
    QuantityToPrice,
}

impl Mode {
    pub fn toggled(self) -> Self {
        match self {
            Mode::PriceToQuantity => Mode::QuantityToPrice,
            Mode::QuantityToPrice => Mode::PriceToQuantity,
        }
    }
}

impl Default for Mode {
    fn default() -> Self {
        Mode::PriceToQuantity
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::PriceToQuantity => write!(f, "price"),
            Mode::QuantityToPrice => write!(f, "quantity"),
        }
    }
}

impl FromStr for Mode {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "price" | "p" | "price-to-quantity" => Ok(Mode::PriceToQuantity),
            "quantity" | "q" | "qty" | "weight" | "quantity-to-price" => {
                Ok(Mode::QuantityToPrice)
            }
            _ => Err(ParseError::Mode(s.to_string())),
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("unknown unit {0:?}, expected kg or L")]
    Unit(String),
    #[error("unknown color {0:?}")]
    Color(String),
    #[error("unknown mode {0:?}, expected price or quantity")]
    Mode(String),
}

/// A catalog entry sold by price per kilogram or per liter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Good {
    pub id: Ulid,
    pub name: String,
    pub price_per_unit: f64,
    pub unit: Unit,
    pub color: Color,
}

/// The fields of a good before it has been admitted into a catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoodSeed {
    pub name: String,
    pub price_per_unit: f64,
    pub unit: Unit,
    #[serde(default)]
    pub color: Color,
}

impl GoodSeed {
    pub fn new(name: &str, price_per_unit: f64, unit: Unit, color: Color) -> Self {
        Self {
            name: name.to_string(),
            price_per_unit,
            unit,
            color,
        }
    }
}

/// Ten spices and oils the calculator starts with.
pub fn starter_goods() -> Vec<GoodSeed> {
    vec![
        GoodSeed::new("Turmeric Powder", 400.0, Unit::Kilogram, Color::Yellow),
        GoodSeed::new("Chilli Powder", 600.0, Unit::Kilogram, Color::Red),
        GoodSeed::new("Coriander Powder", 350.0, Unit::Kilogram, Color::Emerald),
        GoodSeed::new("Cumin Seeds", 800.0, Unit::Kilogram, Color::Amber),
        GoodSeed::new("Garam Masala", 1200.0, Unit::Kilogram, Color::Orange),
        GoodSeed::new("Mustard Oil", 180.0, Unit::Liter, Color::Amber),
        GoodSeed::new("Sunflower Oil", 150.0, Unit::Liter, Color::Yellow),
        GoodSeed::new("Groundnut Oil", 220.0, Unit::Liter, Color::Orange),
        GoodSeed::new("Black Pepper", 1000.0, Unit::Kilogram, Color::Gray),
        GoodSeed::new("Cloves", 1500.0, Unit::Kilogram, Color::Rose),
    ]
}
