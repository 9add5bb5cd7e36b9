use std::fmt;

use serde::{Deserialize, Serialize};

/// Marker used for a bomb cell in the dictionary and rendered forms.
pub const BOMB_SYMBOL: &str = ".";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameState {
    #[default]
    #[serde(rename = "ongoing")]
    Ongoing,
    #[serde(rename = "defeat")]
    Defeat,
    #[serde(rename = "victory")]
    Victory,
}

impl GameState {
    pub fn is_terminal(self) -> bool {
        self != GameState::Ongoing
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            GameState::Ongoing => "ongoing",
            GameState::Defeat => "defeat",
            GameState::Victory => "victory",
        };
        write!(f, "{name}")
    }
}

/// A board cell: either a bomb or the number of bombs around it.
///
/// Serialized as a bare integer, or as the string `"."` for a bomb.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawBoardCell", into = "RawBoardCell")]
pub enum BoardCell {
    Bomb,
    Count(u32),
}

impl BoardCell {
    pub fn is_bomb(self) -> bool {
        self == BoardCell::Bomb
    }

    /// Single character symbol shown for this cell when visible.
    pub fn symbol(self) -> String {
        match self {
            BoardCell::Bomb => BOMB_SYMBOL.to_string(),
            BoardCell::Count(0) => " ".to_string(),
            BoardCell::Count(n) => n.to_string(),
        }
    }
}

impl fmt::Display for BoardCell {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            BoardCell::Bomb => write!(f, "'{BOMB_SYMBOL}'"),
            BoardCell::Count(n) => write!(f, "{n}"),
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RawBoardCell {
    Count(u32),
    Marker(String),
}

impl TryFrom<RawBoardCell> for BoardCell {
    type Error = String;

    fn try_from(value: RawBoardCell) -> Result<Self, Self::Error> {
        match value {
            RawBoardCell::Count(n) => Ok(BoardCell::Count(n)),
            RawBoardCell::Marker(marker) if marker == BOMB_SYMBOL => Ok(BoardCell::Bomb),
            RawBoardCell::Marker(marker) => Err(format!("unknown board marker {marker:?}")),
        }
    }
}

impl From<BoardCell> for RawBoardCell {
    fn from(value: BoardCell) -> Self {
        match value {
            BoardCell::Bomb => RawBoardCell::Marker(BOMB_SYMBOL.to_string()),
            BoardCell::Count(n) => RawBoardCell::Count(n),
        }
    }
}

/// Nested arrays of arbitrary depth, as found in the dictionary form.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Nested<T> {
    Array(Vec<Nested<T>>),
    Leaf(T),
}

impl<T> Nested<T> {
    /// Nesting depth, following the first element at every level.
    pub fn depth(&self) -> usize {
        match self {
            Nested::Leaf(_) => 0,
            Nested::Array(items) => 1 + items.first().map_or(0, Nested::depth),
        }
    }

    /// Element at `coord`, one index per nesting level.
    pub fn get(&self, coord: &[usize]) -> Option<&T> {
        match (self, coord.split_first()) {
            (Nested::Leaf(value), None) => Some(value),
            (Nested::Array(items), Some((&first, rest))) => items.get(first)?.get(rest),
            _ => None,
        }
    }
}

/// Dictionary form of a mine field game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameDict {
    pub dimensions: Vec<usize>,
    pub board: Nested<BoardCell>,
    pub mask: Nested<bool>,
    pub state: GameState,
}

/// Parameters for a randomly generated mine field.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldParams {
    pub dimensions: Vec<usize>,
    pub bombs: usize,
}

impl Default for FieldParams {
    fn default() -> Self {
        Self {
            dimensions: vec![9, 9],
            bombs: 10,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColorMode {
    #[serde(rename = "L")]
    L,
    #[serde(rename = "LA")]
    La,
    #[serde(rename = "RGB")]
    Rgb,
    #[serde(rename = "RGBA")]
    Rgba,
    #[serde(rename = "RGBX")]
    Rgbx,
    #[serde(rename = "CMYK")]
    Cmyk,
    #[serde(rename = "P")]
    Palette,
    #[serde(rename = "I")]
    Int32,
    #[serde(rename = "F")]
    Float32,
}

impl ColorMode {
    /// Interleaved bytes per pixel for the 8-bit modes.
    pub fn channels(self) -> Option<usize> {
        match self {
            ColorMode::L | ColorMode::Palette => Some(1),
            ColorMode::La => Some(2),
            ColorMode::Rgb => Some(3),
            ColorMode::Rgba | ColorMode::Rgbx | ColorMode::Cmyk => Some(4),
            ColorMode::Int32 | ColorMode::Float32 => None,
        }
    }

    pub fn is_rgb_family(self) -> bool {
        matches!(self, ColorMode::Rgb | ColorMode::Rgba | ColorMode::Rgbx)
    }
}

impl fmt::Display for ColorMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            ColorMode::L => "L",
            ColorMode::La => "LA",
            ColorMode::Rgb => "RGB",
            ColorMode::Rgba => "RGBA",
            ColorMode::Rgbx => "RGBX",
            ColorMode::Cmyk => "CMYK",
            ColorMode::Palette => "P",
            ColorMode::Int32 => "I",
            ColorMode::Float32 => "F",
        };
        write!(f, "{name}")
    }
}

/// Decoded raster as handed over by an image codec: interleaved 8-bit
/// channels, row-major.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawImage {
    pub width: usize,
    pub height: usize,
    pub mode: ColorMode,
    pub data: Vec<u8>,
}
