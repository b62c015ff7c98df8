use std::io::{self, BufRead, Write};
use std::path::Path;

use anyhow::Context;
use log::{debug, info, warn};
use serde::Deserialize;

use chessmate::display::BoardOrientation;
use chessmate::puzzle::{MoveOutcome, PuzzleGame, PuzzlePayload, PuzzleStatus};
use chessmate::session::GameMode;

use crate::commands::{PUZZLE_HELP, PuzzleCommand, parse_puzzle_command};
use crate::config::ConsoleConfig;
use crate::tui::{self, RenderOptions};


#[derive(Deserialize)]
#[serde(untagged)]
enum PayloadFile {
    Single(PuzzlePayload),
    Many(Vec<PuzzlePayload>),
}

enum PuzzleExit {
    Next,
    Quit,
}

pub fn read_payloads(path: &Path) -> anyhow::Result<Vec<PuzzlePayload>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read puzzle file '{}'.", path.display()))?;
    parse_payloads(&contents)
}

fn parse_payloads(contents: &str) -> anyhow::Result<Vec<PuzzlePayload>> {
    let file: PayloadFile = serde_json::from_str(contents).context("Failed to parse puzzles.")?;
    Ok(match file {
        PayloadFile::Single(payload) => vec![payload],
        PayloadFile::Many(payloads) => payloads,
    })
}

pub fn run(config: &ConsoleConfig, payloads: Vec<PuzzlePayload>) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut stdout = io::stdout();
    let mut game = PuzzleGame::new();
    let mut solved = 0;
    let total = payloads.len();
    for payload in payloads {
        if let Err(err) = game.load_payload(payload) {
            let message = format!("Skipping puzzle: {err}");
            warn!("{message}");
            writeln!(stdout, "{}", tui::error_style().apply_to(message))?;
            continue;
        }
        let exit = play_puzzle(config, &mut game, &mut input, &mut stdout)?;
        if game.is_solved() {
            solved += 1;
        }
        if let PuzzleExit::Quit = exit {
            break;
        }
    }
    info!("Solved {solved} out of {total} puzzles");
    writeln!(stdout, "Solved {solved}/{total}.")?;
    Ok(())
}

fn play_puzzle(
    config: &ConsoleConfig, game: &mut PuzzleGame, input: &mut impl BufRead,
    out: &mut impl Write,
) -> anyhow::Result<PuzzleExit> {
    if let Some(position) = game.starting_position() {
        debug!("Puzzle {} starts from {}", game.puzzle_id(), position);
    }
    writeln!(
        out,
        "Puzzle {}: {} to move, find {} move(s).",
        game.puzzle_id(),
        game.player_force(),
        game.num_player_moves()
    )?;
    print_board(config, game, out)?;
    loop {
        if game.status() == PuzzleStatus::AwaitingReply && config.auto_play_replies {
            if let Some(reply) = game.play_scripted_reply() {
                writeln!(out, "Opponent plays {reply}.")?;
                print_board(config, game, out)?;
            }
        }
        if game.is_solved() {
            writeln!(out, "{}", tui::success_style().apply_to("Solved!"))?;
            return Ok(PuzzleExit::Next);
        }
        write!(out, "> ")?;
        out.flush()?;
        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(PuzzleExit::Quit);
        }
        if line.trim().is_empty() {
            // Without auto replies an empty line asks for the opponent's move.
            if let Some(reply) = game.play_scripted_reply() {
                writeln!(out, "Opponent plays {reply}.")?;
                print_board(config, game, out)?;
            }
            continue;
        }
        let command = match parse_puzzle_command(&line) {
            Ok(command) => command,
            Err(err) => {
                writeln!(out, "{}", tui::error_style().apply_to(err))?;
                continue;
            }
        };
        match command {
            PuzzleCommand::Move(mv) => match game.submit_player_move(mv.from, mv.to) {
                Ok(MoveOutcome::Rejected) => {
                    writeln!(out, "{}", tui::error_style().apply_to("Not the right move."))?;
                }
                Ok(MoveOutcome::Continue | MoveOutcome::Solved) => {
                    print_board(config, game, out)?;
                }
                Err(err) => writeln!(out, "{}", tui::error_style().apply_to(err))?,
            },
            PuzzleCommand::Hint => match game.hint() {
                Some(pos) => writeln!(out, "Move the piece on {pos}.")?,
                None => writeln!(out, "No moves left.")?,
            },
            PuzzleCommand::Restart => {
                game.reset();
                print_board(config, game, out)?;
            }
            PuzzleCommand::Skip => return Ok(PuzzleExit::Next),
            PuzzleCommand::ShowFen => writeln!(out, "{}", game.session().to_fen())?,
            PuzzleCommand::Help => writeln!(out, "{PUZZLE_HELP}")?,
            PuzzleCommand::Quit => return Ok(PuzzleExit::Quit),
        }
    }
}

fn print_board(config: &ConsoleConfig, game: &PuzzleGame, out: &mut impl Write) -> io::Result<()> {
    let highlight = game.last_move().map_or(vec![], |mv| vec![mv.from, mv.to]);
    let options = RenderOptions {
        orientation: BoardOrientation::for_force(game.player_force()),
        use_colors: config.use_colors,
        highlight: &highlight,
        threats: None,
    };
    writeln!(out, "{}", tui::render_board(game.session().board(), &options))
}
