use serde::{Deserialize, Serialize};

/// Fruit and body colours. The core only compares them; display values are for renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorTag {
    Red,
    Orange,
    Green,
    Yellow,
    Cyan,
    Pink,
}

impl ColorTag {
    pub const ALL: [ColorTag; 6] = [
        ColorTag::Red,
        ColorTag::Orange,
        ColorTag::Green,
        ColorTag::Yellow,
        ColorTag::Cyan,
        ColorTag::Pink,
    ];

    /// RGB display value
    pub fn rgb(&self) -> (u8, u8, u8) {
        match self {
            ColorTag::Red => (0xff, 0x00, 0x00),
            ColorTag::Orange => (0xff, 0x88, 0x00),
            ColorTag::Green => (0x45, 0xd1, 0x45),
            ColorTag::Yellow => (0xff, 0xff, 0x00),
            ColorTag::Cyan => (0x00, 0xff, 0xff),
            ColorTag::Pink => (0xff, 0x69, 0xb4),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ColorTag::Red => "red",
            ColorTag::Orange => "orange",
            ColorTag::Green => "green",
            ColorTag::Yellow => "yellow",
            ColorTag::Cyan => "cyan",
            ColorTag::Pink => "pink",
        }
    }
}
