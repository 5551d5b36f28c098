use chess_search::agent::ai::{EvaluatorKind, MCTSConfig, NegamaxConfig};
use chess_search::agent::{MCTSPlayer, NegamaxPlayer, Player};
use chess_search::game_repr::{Position, START_FEN};
use chess_search::{Evaluator, Result};
use clap::{Arg, ArgAction, ArgMatches, Command};
use log::{error, info};
use std::process::ExitCode;

fn cli() -> Command {
    Command::new("chess_search")
        .about("Pick a chess move with Monte Carlo tree search or negamax")
        .version(env!("CARGO_PKG_VERSION"))
        .arg(
            Arg::new("fen")
                .long("fen")
                .value_name("FEN")
                .help("Position to search")
                .num_args(1)
                .default_value(START_FEN),
        )
        .arg(
            Arg::new("engine")
                .short('e')
                .long("engine")
                .help("Search engine")
                .num_args(1)
                .value_parser(["mcts", "negamax"])
                .default_value("mcts"),
        )
        .arg(
            Arg::new("iterations")
                .short('n')
                .long("iterations")
                .help("MCTS iterations")
                .num_args(1)
                .value_parser(clap::value_parser!(u32)),
        )
        .arg(
            Arg::new("depth")
                .short('d')
                .long("depth")
                .help("Negamax search depth in plies")
                .num_args(1)
                .value_parser(clap::value_parser!(u32)),
        )
        .arg(
            Arg::new("simulationDepth")
                .long("simulation-depth")
                .help("Random plies per MCTS rollout before evaluation")
                .num_args(1)
                .value_parser(clap::value_parser!(u32)),
        )
        .arg(
            Arg::new("threads")
                .short('t')
                .long("threads")
                .help("Root-parallel MCTS trees")
                .num_args(1)
                .default_value("1")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            Arg::new("eval")
                .long("eval")
                .help("Evaluation function")
                .num_args(1)
                .value_parser(["combined", "material", "pst", "pawns", "king", "mobility", "center", "activity"])
                .default_value("combined"),
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .help("Seed for reproducible searches")
                .num_args(1)
                .value_parser(clap::value_parser!(u64)),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Print the static evaluation and its feature breakdown")
                .action(ArgAction::SetTrue)
                .num_args(0),
        )
}

fn run(matches: &ArgMatches) -> Result<()> {
    let verbose = matches.get_flag("verbose");
    let position = Position::from_fen(matches.get_one::<String>("fen").map_or(START_FEN, String::as_str))?;

    let evaluator_kind = matches
        .get_one::<String>("eval")
        .and_then(|name| name.parse::<EvaluatorKind>().ok())
        .unwrap_or_default();
    let seed = matches.get_one::<u64>("seed").copied();

    if verbose {
        let evaluator = evaluator_kind.build();
        println!("eval {:.1} ({})", evaluator.evaluate(&position), evaluator.name());
        for (feature, score) in evaluator.breakdown(position.board()) {
            println!("  {:<16}{:>6}", feature, score);
        }
    }

    let mut player: Box<dyn Player<Position>> = match matches.get_one::<String>("engine").map(String::as_str) {
        Some("negamax") => {
            let mut config = NegamaxConfig::default();
            if let Some(&depth) = matches.get_one::<u32>("depth") {
                config.depth = depth;
            }

            let player = NegamaxPlayer::new(config, evaluator_kind.build(), "negamax");
            Box::new(match seed {
                Some(seed) => player.with_seed(seed),
                None => player,
            })
        }
        _ => {
            let mut config = MCTSConfig::default()
                .with_threads(matches.get_one::<usize>("threads").copied().unwrap_or(1));
            if let Some(&iterations) = matches.get_one::<u32>("iterations") {
                config.iterations = iterations;
            }
            if let Some(&depth) = matches.get_one::<u32>("simulationDepth") {
                config.simulation_depth = depth;
            }

            let player = MCTSPlayer::new(config, evaluator_kind.build(), "mcts");
            Box::new(match seed {
                Some(seed) => player.with_seed(seed),
                None => player,
            })
        }
    };

    info!("searching {} with {}", position, player.name());
    let mv = player.get_move(&position)?;
    println!("{}", mv);

    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    let matches = cli().get_matches();
    match run(&matches) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{}", err);
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}
