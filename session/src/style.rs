use infisweep_core::RenderCode;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Color {
    Black,
    White,
    Blue,
    Green,
    Red,
    Purple,
    Yellow,
    Cyan,
    Magenta,
}

/// How a painter should draw one render code.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CellStyle {
    pub glyph: &'static str,
    pub fg: Color,
    pub bg: Color,
}

/// Glyph drawn for every cell while numbers are hidden.
pub const HIDDEN_GLYPH: &str = "..";

const NUMBERS: [(&str, Color); 9] = [
    (" 0", Color::White),
    (" 1", Color::Blue),
    (" 2", Color::Green),
    (" 3", Color::Red),
    (" 4", Color::Purple),
    (" 5", Color::Yellow),
    (" 6", Color::Cyan),
    (" 7", Color::Magenta),
    (" 8", Color::Black),
];

fn lookup(code: RenderCode) -> (&'static str, Color) {
    use RenderCode::*;
    match code {
        Revealed(count) => NUMBERS
            .get(usize::from(count))
            .copied()
            .unwrap_or((" ?", Color::Black)),
        Flagged => (" F", Color::Red),
        Unrevealed => (HIDDEN_GLYPH, Color::Black),
        EndOfLine => ("\n", Color::White),
    }
}

/// Style of `code`. With numbers hidden every cell is a solid block of its background color.
pub fn style_for(code: RenderCode, numbers_visible: bool) -> CellStyle {
    let (glyph, bg) = lookup(code);
    let glyph = if numbers_visible || code == RenderCode::EndOfLine {
        glyph
    } else {
        HIDDEN_GLYPH
    };
    let fg = if numbers_visible && code != RenderCode::Unrevealed {
        Color::White
    } else {
        bg
    };

    CellStyle { glyph, fg, bg }
}
