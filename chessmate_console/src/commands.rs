// Text commands typed at the console prompt.

use std::str::FromStr;

use chessmate::coord::Coord;
use chessmate::piece::PieceKind;
use chessmate::placement::{PlacementMode, Quota};
use chessmate::uci::UciMove;
use chessmate::util::as_single_char;


pub const PUZZLE_HELP: &str = "\
Commands:
  <move>    play a move, e.g. e2e4 or a7a8q
  hint      show the square the next move starts from
  restart   start the current puzzle over
  skip      go to the next puzzle
  fen       print the current position
  quit";

pub const PLACEMENT_HELP: &str = "\
Commands:
  <square> [piece]         place a piece, e.g. d4 or d4 rook
  remove <square>          take a piece back
  select <piece>           choose the piece to place by default
  mode <mode>              8-queens, 8-rooks, 14-bishops, 16-kings or custom
  quota <piece>=<n> ...    set a custom quota, e.g. quota q=2 knight=4
  threats                  show squares where the selected piece cannot go
  reset                    clear the board
  quit";

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PuzzleCommand {
    Move(UciMove),
    Hint,
    Restart,
    Skip,
    ShowFen,
    Help,
    Quit,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PlacementCommand {
    Place(Coord, Option<PieceKind>),
    Remove(Coord),
    Select(PieceKind),
    Mode(PlacementMode),
    SetQuota(Quota),
    ShowThreats,
    Reset,
    Help,
    Quit,
}

// Accepts a letter ("n") or a full name ("knight").
pub fn parse_piece_kind(s: &str) -> Result<PieceKind, String> {
    let kind = match as_single_char(s) {
        Some(ch) => PieceKind::from_algebraic_char(ch),
        None => PieceKind::from_str(s).ok(),
    };
    kind.ok_or_else(|| format!("Unknown piece: '{s}'."))
}

fn parse_square(s: &str) -> Result<Coord, String> {
    Coord::from_algebraic(s).ok_or_else(|| format!("Not a square: '{s}'."))
}

fn parse_quota<'a>(entries: impl Iterator<Item = &'a str>) -> Result<Quota, String> {
    let mut quota = Quota::new();
    for entry in entries {
        let (kind, count) = entry
            .split_once('=')
            .ok_or_else(|| format!("Expected <piece>=<count>, got '{entry}'."))?;
        let count = count.parse::<u8>().map_err(|_| format!("Invalid count: '{count}'."))?;
        quota = quota.with(parse_piece_kind(kind)?, count);
    }
    Ok(quota)
}

pub fn parse_puzzle_command(line: &str) -> Result<PuzzleCommand, String> {
    let line = line.trim();
    Ok(match line.to_ascii_lowercase().as_str() {
        "hint" => PuzzleCommand::Hint,
        "restart" => PuzzleCommand::Restart,
        "skip" | "next" => PuzzleCommand::Skip,
        "fen" => PuzzleCommand::ShowFen,
        "help" | "?" => PuzzleCommand::Help,
        "quit" | "q" => PuzzleCommand::Quit,
        _ => PuzzleCommand::Move(UciMove::parse(line).map_err(|err| err.to_string())?),
    })
}

pub fn parse_placement_command(line: &str) -> Result<PlacementCommand, String> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Err("Empty command.".to_owned());
    };
    let args = words.collect::<Vec<_>>();
    let expect_args = |n: usize| {
        if args.len() == n {
            Ok(())
        } else {
            Err(format!("'{head}' expects {n} argument(s), got {}.", args.len()))
        }
    };
    match head.to_ascii_lowercase().as_str() {
        "remove" | "rm" => {
            expect_args(1)?;
            Ok(PlacementCommand::Remove(parse_square(args[0])?))
        }
        "select" => {
            expect_args(1)?;
            Ok(PlacementCommand::Select(parse_piece_kind(args[0])?))
        }
        "mode" => {
            expect_args(1)?;
            let mode = PlacementMode::from_str(args[0])
                .map_err(|_| format!("Unknown mode: '{}'.", args[0]))?;
            Ok(PlacementCommand::Mode(mode))
        }
        "quota" => Ok(PlacementCommand::SetQuota(parse_quota(args.iter().copied())?)),
        "threats" => Ok(PlacementCommand::ShowThreats),
        "reset" => Ok(PlacementCommand::Reset),
        "help" | "?" => Ok(PlacementCommand::Help),
        "quit" | "q" => Ok(PlacementCommand::Quit),
        _ => {
            let pos = parse_square(head)?;
            match args[..] {
                [] => Ok(PlacementCommand::Place(pos, None)),
                [kind] => Ok(PlacementCommand::Place(pos, Some(parse_piece_kind(kind)?))),
                _ => Err(format!("Too many arguments for placing a piece on {pos}.")),
            }
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn puzzle_commands() {
        assert_eq!(
            parse_puzzle_command("e2e4\n"),
            Ok(PuzzleCommand::Move(UciMove::new(Coord::E2, Coord::E4)))
        );
        assert_eq!(parse_puzzle_command(" Hint "), Ok(PuzzleCommand::Hint));
        assert_eq!(parse_puzzle_command("q"), Ok(PuzzleCommand::Quit));
        assert!(parse_puzzle_command("Nf3").is_err());
    }

    #[test]
    fn placement_commands() {
        assert_eq!(parse_placement_command("d4"), Ok(PlacementCommand::Place(Coord::D4, None)));
        assert_eq!(
            parse_placement_command("D4 Rook"),
            Ok(PlacementCommand::Place(Coord::D4, Some(PieceKind::Rook)))
        );
        assert_eq!(parse_placement_command("rm h8"), Ok(PlacementCommand::Remove(Coord::H8)));
        assert_eq!(
            parse_placement_command("select n"),
            Ok(PlacementCommand::Select(PieceKind::Knight))
        );
        assert_eq!(
            parse_placement_command("mode 14-bishops"),
            Ok(PlacementCommand::Mode(PlacementMode::FourteenBishops))
        );
        assert_eq!(
            parse_placement_command("quota q=2 knight=4"),
            Ok(PlacementCommand::SetQuota(
                Quota::new().with(PieceKind::Queen, 2).with(PieceKind::Knight, 4)
            ))
        );
        assert!(parse_placement_command("").is_err());
        assert!(parse_placement_command("i9").is_err());
        assert!(parse_placement_command("remove").is_err());
        assert!(parse_placement_command("quota q2").is_err());
        assert!(parse_placement_command("mode 9-queens").is_err());
    }
}
