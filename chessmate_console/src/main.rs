// Legend for various fix-this comments:
//   * "TODO" - bug or missing crucial feature.
//   * "Improvement potential" - missing nice-to-have feature or an opportunity
//       to make code better or faster.

#![forbid(unsafe_code)]
#![cfg_attr(feature = "strict", deny(warnings))]

mod commands;
mod config;
mod placement_main;
mod puzzle_main;
mod tui;

use std::path::PathBuf;

use chessmate::placement::PlacementMode;
use clap::{Command, arg, value_parser};
use config::ConsoleConfig;


fn main() -> anyhow::Result<()> {
    env_logger::Builder::new()
        .target(env_logger::Target::Stderr)
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .init();

    let matches = Command::new("Chessmate")
        .version(clap::crate_version!())
        .about("Chess puzzles and piece placement puzzles in the terminal")
        .subcommand_required(true)
        .arg(
            arg!(-c --"config" <config_file> "Path to a yaml-serialized ConsoleConfig")
                .value_parser(value_parser!(PathBuf))
                .global(true),
        )
        .subcommand(
            Command::new("puzzle")
                .about("Solve puzzles from a JSON file: one puzzle object or a list of them")
                .arg(
                    arg!(<puzzle_file> "Path to the puzzle file")
                        .value_parser(value_parser!(PathBuf)),
                ),
        )
        .subcommand(
            Command::new("placement")
                .about("Place pieces so that none attacks another")
                .arg(
                    arg!(-m --"mode" <mode> "Initial mode")
                        .value_parser(["8-queens", "8-rooks", "14-bishops", "16-kings"]),
                ),
        )
        .get_matches();

    // Improvement potential. Look for a config in the user's config directory.
    let config = match matches.get_one::<PathBuf>("config") {
        Some(path) => config::read_config_file(path)?,
        None => ConsoleConfig::default(),
    };

    match matches.subcommand() {
        Some(("puzzle", sub_matches)) => {
            let path = sub_matches
                .get_one::<PathBuf>("puzzle_file")
                .expect("<puzzle_file> is a required argument");
            puzzle_main::run(&config, puzzle_main::read_payloads(path)?)
        }
        Some(("placement", sub_matches)) => {
            let mode = sub_matches
                .get_one::<String>("mode")
                .map(|mode| mode.parse::<PlacementMode>())
                .transpose()?;
            placement_main::run(&config, mode)
        }
        _ => unreachable!("Exhausted list of subcommands and subcommand_required prevents `None`"),
    }
}
