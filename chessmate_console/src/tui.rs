use console::Style;
use itertools::Itertools;

use chessmate::board::Board;
use chessmate::coord::{Coord, NUM_COLS, NUM_ROWS};
use chessmate::display::{
    BoardOrientation, DisplayCoord, ThreatMap, from_display_coord, render_as_unicode,
};


pub struct RenderOptions<'a> {
    pub orientation: BoardOrientation,
    pub use_colors: bool,
    // Squares to emphasize, e.g. the last move.
    pub highlight: &'a [Coord],
    pub threats: Option<&'a ThreatMap>,
}

pub fn render_board(board: &Board, options: &RenderOptions) -> String {
    if !options.use_colors {
        let mut marked = options.highlight.to_vec();
        if let Some(threats) = options.threats {
            marked.extend(Coord::all().filter(|pos| is_threatened(threats, *pos)));
        }
        return render_as_unicode(board, options.orientation, &marked);
    }
    let colors = [
        Style::new().color256(233).on_color256(222),
        Style::new().color256(233).on_color256(230),
    ];
    let highlight_style = Style::new().color256(233).on_color256(153);
    let threat_style = Style::new().color256(233).on_color256(217);
    let mut ret = String::new();
    for y in -1..=(NUM_ROWS as i8) {
        for x in -1..=(NUM_COLS as i8) {
            let row_header = x < 0 || x >= NUM_COLS as i8;
            let col_header = y < 0 || y >= NUM_ROWS as i8;
            let square = match (row_header, col_header) {
                (true, true) => format_square(' '),
                (true, false) => {
                    format_square(header_coord(0, y, options.orientation).row.to_algebraic())
                }
                (false, true) => {
                    format_square(header_coord(x, 0, options.orientation).col.to_algebraic())
                }
                (false, false) => {
                    let Some(pos) = from_display_coord(DisplayCoord { x, y }, options.orientation)
                    else {
                        continue;
                    };
                    let style = if options.highlight.contains(&pos) {
                        &highlight_style
                    } else if options.threats.is_some_and(|t| is_threatened(t, pos)) {
                        &threat_style
                    } else {
                        &colors[usize::from((pos.x() + pos.y()) % 2)]
                    };
                    let ch = board.get(pos).map_or(' ', |piece| piece.pictogram());
                    style.apply_to(format_square(ch)).to_string()
                }
            };
            ret.push_str(&square);
        }
        ret.push('\n');
    }
    ret
}

pub fn render_counts(
    counts: impl IntoIterator<Item = (String, u8, Option<u8>)>,
) -> String {
    counts
        .into_iter()
        .map(|(label, have, want)| match want {
            Some(want) => format!("{label}: {have}/{want}"),
            None => format!("{label}: {have}"),
        })
        .join("   ")
}

pub fn error_style() -> Style { Style::new().red() }
pub fn success_style() -> Style { Style::new().green().bold() }

// Board coordinate shown in the given display row and column. Header cells reuse the
// labels of the nearest board square.
fn header_coord(x: i8, y: i8, orientation: BoardOrientation) -> Coord {
    let x = x.clamp(0, NUM_COLS as i8 - 1);
    let y = y.clamp(0, NUM_ROWS as i8 - 1);
    // Both coordinates are clamped onto the board.
    from_display_coord(DisplayCoord { x, y }, orientation).unwrap_or(Coord::A1)
}

fn is_threatened(threats: &ThreatMap, pos: Coord) -> bool {
    threats[usize::from(pos.y())][usize::from(pos.x())]
}

fn format_square(ch: char) -> String { format!(" {} ", ch) }
