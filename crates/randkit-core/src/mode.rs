//! Generation modes.

use serde::{Deserialize, Serialize};

/// The kind of value a generation request asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeneratorMode {
    /// Numbers on a min/max/step grid
    Range,
    /// Picks from an item list, optionally weighted
    List,
    /// Full random permutation of an item list
    Shuffle,
    /// Passwords built from character categories
    Password,
    /// Numeric PINs
    Pin,
    /// Dice rolls
    Dice,
    /// Coin flips
    Coin,
    /// Two-pool lottery draw (main numbers plus bonus numbers)
    Lottery,
    /// No-repeat draws across calls using a caller-held bag
    Ticket,
    /// UUID v4 strings
    Uuid,
    /// Random byte blobs (hex, base64 or numeric array)
    Bytes,
    /// Random `#rrggbb` colors
    Color,
}

impl GeneratorMode {
    /// All modes, in display order.
    pub const ALL: [GeneratorMode; 12] = [
        GeneratorMode::Range,
        GeneratorMode::List,
        GeneratorMode::Shuffle,
        GeneratorMode::Password,
        GeneratorMode::Pin,
        GeneratorMode::Dice,
        GeneratorMode::Coin,
        GeneratorMode::Lottery,
        GeneratorMode::Ticket,
        GeneratorMode::Uuid,
        GeneratorMode::Bytes,
        GeneratorMode::Color,
    ];

    /// Wire name of the mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            GeneratorMode::Range => "range",
            GeneratorMode::List => "list",
            GeneratorMode::Shuffle => "shuffle",
            GeneratorMode::Password => "password",
            GeneratorMode::Pin => "pin",
            GeneratorMode::Dice => "dice",
            GeneratorMode::Coin => "coin",
            GeneratorMode::Lottery => "lottery",
            GeneratorMode::Ticket => "ticket",
            GeneratorMode::Uuid => "uuid",
            GeneratorMode::Bytes => "bytes",
            GeneratorMode::Color => "color",
        }
    }
}

impl std::fmt::Display for GeneratorMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for GeneratorMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "range" | "number" => Ok(GeneratorMode::Range),
            "list" | "pick" | "picker" => Ok(GeneratorMode::List),
            "shuffle" => Ok(GeneratorMode::Shuffle),
            "password" => Ok(GeneratorMode::Password),
            "pin" => Ok(GeneratorMode::Pin),
            "dice" | "roll" => Ok(GeneratorMode::Dice),
            "coin" | "flip" => Ok(GeneratorMode::Coin),
            "lottery" | "lotto" => Ok(GeneratorMode::Lottery),
            "ticket" | "raffle" => Ok(GeneratorMode::Ticket),
            "uuid" => Ok(GeneratorMode::Uuid),
            "bytes" | "hex" => Ok(GeneratorMode::Bytes),
            "color" => Ok(GeneratorMode::Color),
            _ => Err(format!("Unknown generator mode: {s}")),
        }
    }
}
