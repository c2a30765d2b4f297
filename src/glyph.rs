//! Large ASCII-art readout for the instantaneous rate.
//!
//! Every character maps to a glyph of [`GLYPH_ROWS`] rows. Characters
//! without artwork map to [`BLANK`], so any input renders. Glyphs are laid
//! out left to right every [`GLYPH_STRIDE`] columns; a glyph wider than the
//! stride is overdrawn by its right neighbour.

use crate::surface::Surface;

pub const GLYPH_ROWS: usize = 7;
pub const GLYPH_STRIDE: usize = 8;

/// Number of leading characters of a value shown in the readout.
pub const READOUT_CHARS: usize = 4;

pub type Glyph = [&'static str; GLYPH_ROWS];

pub const BLANK: Glyph = ["       "; GLYPH_ROWS];

const ZERO: Glyph = [
    "  ___  ",
    r" / _ \ ",
    "| | | |",
    "| | | |",
    "| |_| |",
    r" \___/ ",
    "       ",
];
const ONE: Glyph = [
    " __    ",
    "/_ |   ",
    " | |   ",
    " | |   ",
    " | |   ",
    " |_|   ",
    "       ",
];
const TWO: Glyph = [
    "  ___  ",
    r" |__ \ ",
    "    ) |",
    "   / / ",
    "  / /_ ",
    " |____|",
    "       ",
];
const THREE: Glyph = [
    "  ____ ",
    r" |___ \",
    "   __) |",
    "  |__ < ",
    "  ___) |",
    " |____/ ",
    "        ",
];
const FOUR: Glyph = [
    "  _  _   ",
    " | || |  ",
    " | || |_ ",
    " |__   _|",
    "    | |  ",
    "    |_|  ",
    "         ",
];
const FIVE: Glyph = [
    "  _____ ",
    " | ____|",
    " | |__  ",
    r" |___ \ ",
    "  ___) |",
    " |____/ ",
    "        ",
];
const SIX: Glyph = [
    "   __   ",
    "  / /   ",
    " / /_   ",
    r" | '_ \ ",
    " | (_) |",
    r"  \___/ ",
    "        ",
];
const SEVEN: Glyph = [
    "  ______",
    " |____  |",
    "     / / ",
    "    / /  ",
    "   / /   ",
    "  /_/    ",
    "         ",
];
const EIGHT: Glyph = [
    "   ___  ",
    r"  / _ \ ",
    " | (_) |",
    "  > _ < ",
    " | (_) |",
    r"  \___/ ",
    "        ",
];
const NINE: Glyph = [
    "   ___  ",
    r"  / _ \ ",
    " | (_) |",
    r"  \__, |",
    "    / / ",
    "   /_/  ",
    "        ",
];
const DOT: Glyph = [
    "       ",
    "       ",
    "       ",
    "       ",
    "  ___  ",
    " (___) ",
    "       ",
];
const KILO: Glyph = [
    "  _  __",
    " | |/ /",
    " | ' / ",
    " |  <  ",
    r" | . \ ",
    r" |_|\_\",
    "       ",
];
const MEGA: Glyph = [
    "  __  __ ",
    r" |  \/  |",
    r" | \  / |",
    r" | |\/| |",
    " | |  | |",
    " |_|  |_|",
    "         ",
];
const GIGA: Glyph = [
    "  ____ ",
    " / ___|",
    "| |  _ ",
    "| |_| |",
    r" \____|",
    "       ",
    "       ",
];
const SMALL_B: Glyph = [
    " _     ",
    "| |    ",
    "| |__  ",
    r"| '_ \ ",
    "| |_) |",
    "|_.__/ ",
    "       ",
];
const SMALL_I: Glyph = [
    " _ ",
    "(_)",
    " | ",
    " | ",
    " | ",
    " |_|",
    "    ",
];
const SMALL_T: Glyph = [
    "  _   ",
    " | |  ",
    " | |_ ",
    " | __|",
    " | |_ ",
    r"  \__|",
    "      ",
];
const SLASH: Glyph = [
    "     __",
    "    / /",
    "   / / ",
    "  / /  ",
    " / /   ",
    "/_/    ",
    "       ",
];
const SMALL_S: Glyph = [
    "  ____ ",
    " / ___|",
    r" \___ \",
    "  ___) |",
    " |____/ ",
    "        ",
    "        ",
];

/// Glyph for `ch`, or [`BLANK`] when there is no artwork for it.
pub fn glyph(ch: char) -> &'static Glyph {
    match ch {
        '0' => &ZERO,
        '1' => &ONE,
        '2' => &TWO,
        '3' => &THREE,
        '4' => &FOUR,
        '5' => &FIVE,
        '6' => &SIX,
        '7' => &SEVEN,
        '8' => &EIGHT,
        '9' => &NINE,
        '.' => &DOT,
        'K' => &KILO,
        'M' => &MEGA,
        'G' => &GIGA,
        'b' => &SMALL_B,
        'i' => &SMALL_I,
        't' => &SMALL_T,
        '/' => &SLASH,
        's' => &SMALL_S,
        _ => &BLANK,
    }
}

/// Leading [`READOUT_CHARS`] characters of `value`.
pub fn truncate_readout(value: &str) -> String {
    value.chars().take(READOUT_CHARS).collect()
}

/// Lays out `text` as exactly [`GLYPH_ROWS`] lines.
pub fn render_rows(text: &str) -> Vec<String> {
    let glyphs: Vec<&Glyph> = text.chars().map(glyph).collect();

    (0..GLYPH_ROWS)
        .map(|row| {
            let mut line: Vec<char> = Vec::new();
            for (index, glyph) in glyphs.iter().enumerate() {
                let start = index * GLYPH_STRIDE;
                if line.len() < start {
                    line.resize(start, ' ');
                }
                for (offset, ch) in glyph[row].chars().enumerate() {
                    let col = start + offset;
                    if col < line.len() {
                        line[col] = ch;
                    } else {
                        line.push(ch);
                    }
                }
            }
            line.into_iter().collect()
        })
        .collect()
}

pub fn draw(surface: &mut dyn Surface, x: usize, y: usize, text: &str) {
    for (offset, line) in render_rows(text).iter().enumerate() {
        surface.put(x, y + offset, line);
    }
}
