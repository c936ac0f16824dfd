/// Control pad buttons as numbered by the app
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    One,
    Two,
    Three,
    Four,
    Up,
    Down,
    Left,
    Right,
}

impl Button {
    pub const ALL: [Self; 8] = [
        Self::One,
        Self::Two,
        Self::Three,
        Self::Four,
        Self::Up,
        Self::Down,
        Self::Left,
        Self::Right,
    ];

    /// Decode the ASCII button id (`'1'..='8'`)
    pub const fn from_wire(id: u8) -> Option<Self> {
        Some(match id {
            b'1' => Self::One,
            b'2' => Self::Two,
            b'3' => Self::Three,
            b'4' => Self::Four,
            b'5' => Self::Up,
            b'6' => Self::Down,
            b'7' => Self::Left,
            b'8' => Self::Right,
            _ => return None,
        })
    }

    pub const fn to_wire(self) -> u8 {
        match self {
            Self::One => b'1',
            Self::Two => b'2',
            Self::Three => b'3',
            Self::Four => b'4',
            Self::Up => b'5',
            Self::Down => b'6',
            Self::Left => b'7',
            Self::Right => b'8',
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::One => "1",
            Self::Two => "2",
            Self::Three => "3",
            Self::Four => "4",
            Self::Up => "up",
            Self::Down => "down",
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}
