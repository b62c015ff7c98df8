use std::io::{self, BufRead, Write};

use log::info;
use strum::IntoEnumIterator;

use chessmate::display::BoardOrientation;
use chessmate::force::Force;
use chessmate::piece::PieceKind;
use chessmate::placement::{PlacementGame, PlacementMode, PlacementOutcome};
use chessmate::session::GameMode;

use crate::commands::{PLACEMENT_HELP, PlacementCommand, parse_placement_command};
use crate::config::ConsoleConfig;
use crate::tui::{self, RenderOptions};


pub fn run(config: &ConsoleConfig, mode: Option<PlacementMode>) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let mut game = PlacementGame::with_mode(mode.unwrap_or(config.default_placement_mode));
    play(config, &mut game, &mut stdin.lock(), &mut io::stdout())
}

fn play(
    config: &ConsoleConfig, game: &mut PlacementGame, input: &mut impl BufRead,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let mut show_threats = config.show_threats;
    writeln!(out, "Mode {}. Type 'help' for commands.", game.mode().label())?;
    print_state(config, game, show_threats, out)?;
    loop {
        write!(out, "{}> ", game.selected_kind().label())?;
        out.flush()?;
        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(());
        }
        if line.trim().is_empty() {
            continue;
        }
        let command = match parse_placement_command(&line) {
            Ok(command) => command,
            Err(err) => {
                writeln!(out, "{}", tui::error_style().apply_to(err))?;
                continue;
            }
        };
        match command {
            PlacementCommand::Place(pos, kind) => {
                let kind = kind.unwrap_or(game.selected_kind());
                match game.attempt_place(pos, kind, Force::White) {
                    PlacementOutcome::Placed => {
                        print_state(config, game, show_threats, out)?;
                        if game.is_solved() && !game.score_recorded() {
                            report_solved(game, out)?;
                        }
                    }
                    PlacementOutcome::OutOfRange => {
                        writeln!(out, "{}", tui::error_style().apply_to("Outside the board."))?;
                    }
                    PlacementOutcome::CellOccupied => {
                        writeln!(out, "{}", tui::error_style().apply_to("The square is taken."))?;
                    }
                    PlacementOutcome::Conflict(detail) => {
                        writeln!(out, "{}", tui::error_style().apply_to(detail))?;
                    }
                }
            }
            PlacementCommand::Remove(pos) => {
                if game.remove_piece(pos) {
                    print_state(config, game, show_threats, out)?;
                } else {
                    writeln!(out, "{}", tui::error_style().apply_to("Nothing to remove."))?;
                }
            }
            PlacementCommand::Select(kind) => game.select_kind(kind),
            PlacementCommand::Mode(mode) => {
                game.change_mode(mode);
                writeln!(out, "Mode {}.", mode.label())?;
                print_state(config, game, show_threats, out)?;
            }
            PlacementCommand::SetQuota(quota) => match game.set_custom_quota(quota) {
                Ok(()) => print_state(config, game, show_threats, out)?,
                Err(err) => writeln!(out, "{}", tui::error_style().apply_to(err))?,
            },
            PlacementCommand::ShowThreats => {
                show_threats = !show_threats;
                print_state(config, game, show_threats, out)?;
            }
            PlacementCommand::Reset => {
                game.reset();
                print_state(config, game, show_threats, out)?;
            }
            PlacementCommand::Help => writeln!(out, "{PLACEMENT_HELP}")?,
            PlacementCommand::Quit => return Ok(()),
        }
    }
}

fn report_solved(game: &mut PlacementGame, out: &mut impl Write) -> io::Result<()> {
    let key = game.schema_key();
    info!("Solved {key} with final score {}", game.final_score());
    writeln!(
        out,
        "{} Score {} ({} error(s)).",
        tui::success_style().apply_to("Solved!"),
        game.final_score(),
        game.error_count()
    )?;
    writeln!(out, "Solution: {}", game.solution_signature())?;
    game.mark_score_recorded();
    Ok(())
}

fn print_state(
    config: &ConsoleConfig, game: &PlacementGame, show_threats: bool, out: &mut impl Write,
) -> io::Result<()> {
    let threats = game.threat_map();
    let options = RenderOptions {
        orientation: BoardOrientation::Normal,
        use_colors: config.use_colors,
        highlight: &[],
        threats: show_threats.then_some(&threats),
    };
    writeln!(out, "{}", tui::render_board(game.session().board(), &options))?;
    let counts = game.current_counts();
    let quota = game.quota();
    let summary = tui::render_counts(
        PieceKind::iter()
            .filter(|&kind| counts[kind] > 0 || quota.get(kind).is_some())
            .map(|kind| (kind.label().to_owned(), counts[kind], quota.get(kind))),
    );
    writeln!(out, "{summary}   score: {}", game.raw_score())
}
