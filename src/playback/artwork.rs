//! Cover art shown next to the now-playing label. Purely cosmetic: every
//! successful load picks one of these at random.

#[derive(Debug, PartialEq, Eq)]
pub struct Artwork {
    pub name: &'static str,
    pub lines: &'static [&'static str],
}

pub const ARTWORKS: [Artwork; 3] = [
    Artwork {
        name: "vinyl",
        lines: &[
            "   .-\"\"\"-.   ",
            "  /  .-.  \\  ",
            " |  ( o )  | ",
            "  \\  '-'  /  ",
            "   '-...-'   ",
        ],
    },
    Artwork {
        name: "cassette",
        lines: &[
            " ___________ ",
            "|  _     _  |",
            "| (_)===(_) |",
            "|  _______  |",
            "|_/_______\\_|",
        ],
    },
    Artwork {
        name: "notes",
        lines: &[
            "     ___     ",
            "    |   |\\   ",
            "    |   | \\  ",
            "  (_)  (_)   ",
            "   ♪     ♫   ",
        ],
    },
];

pub fn pick_random() -> &'static Artwork {
    &ARTWORKS[rand::random_range(0..ARTWORKS.len())]
}
