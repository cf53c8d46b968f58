use std::process::ExitCode;
use std::time::Instant;

use clap::{Parser, Subcommand};
use tracing::{error, info};

use quill_chess::config::EngineConfig;
use quill_chess::errors::ChessResult;
use quill_chess::game_state::chess_types::Position;
use quill_chess::move_generation::perft::{divide, perft};
use quill_chess::search::game::{format_line, Game, SearchReport};
use quill_chess::utils::bench_positions::BENCH_POSITIONS;

#[derive(Debug, Parser)]
#[command(name = "quill", version, about = "Bitboard chess engine with quiescence search")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Count leaf nodes of the move tree.
    Perft {
        #[arg(long)]
        fen: Option<String>,
        #[arg(long, default_value_t = 5)]
        depth: u8,
        /// Print per-move counts for the root moves.
        #[arg(long)]
        divide: bool,
    },
    /// Search a position and print the best move.
    Search {
        #[arg(long)]
        fen: Option<String>,
        #[arg(long)]
        depth: Option<u8>,
        #[arg(long)]
        movetime: Option<u64>,
        #[arg(long)]
        nodes: Option<u64>,
    },
    /// Print the static evaluation breakdown of a position.
    Score {
        #[arg(long)]
        fen: Option<String>,
    },
    /// Search the built-in tactical positions.
    Bench {
        #[arg(long, default_value_t = 6)]
        depth: u8,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "quill_chess=info,quill=info".into()),
        )
        .init();

    let cli = Cli::parse();
    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> ChessResult<()> {
    match command {
        Command::Perft {
            fen,
            depth,
            divide: split,
        } => {
            let position = load_position(fen.as_deref())?;
            let start = Instant::now();
            if split {
                let mut total = 0u64;
                for (mv, nodes) in divide(&position, depth) {
                    println!("{mv}: {nodes}");
                    total += nodes;
                }
                println!("\n  Nodes: {total}");
            } else {
                let counts = perft(&position, depth);
                println!("\n  Nodes: {}", counts.nodes);
                println!(
                    "Captures: {}  E.p.: {}  Castles: {}  Promotions: {}  Checks: {}",
                    counts.captures,
                    counts.en_passant,
                    counts.castles,
                    counts.promotions,
                    counts.checks
                );
            }
            println!("Elapsed: {:.2}s", start.elapsed().as_secs_f64());
            Ok(())
        }
        Command::Search {
            fen,
            depth,
            movetime,
            nodes,
        } => {
            let mut config = EngineConfig::from_env();
            if let Some(depth) = depth {
                config.max_depth = depth;
            }
            config.move_time_ms = movetime.or(config.move_time_ms);
            config.node_budget = nodes.or(config.node_budget);

            let position = load_position(fen.as_deref())?;
            let mut game = Game::new(config)?;
            println!("{position}\n");
            print_report(&game.think(&position));
            Ok(())
        }
        Command::Score { fen } => {
            let position = load_position(fen.as_deref())?;
            let trace = position.evaluate_with_trace();
            println!("{position}\n");
            println!("Material:  {:>6}", trace.material);
            println!("Placement: {:>6}", trace.placement);
            println!("Mobility:  {:>6}", trace.mobility);
            println!("Endgame:   {:>6}/24", trace.endgame_weight);
            println!("Total:     {:>6} (side to move)", trace.total);
            Ok(())
        }
        Command::Bench { depth } => {
            let config = EngineConfig {
                max_depth: depth,
                ..EngineConfig::from_env()
            };
            let mut game = Game::new(config)?;
            let start = Instant::now();
            let mut total_nodes = 0u64;

            for bench in BENCH_POSITIONS {
                let position = bench.position()?;
                info!(name = bench.name, "bench position");
                println!("{}\n{position}\n", bench.name);
                game.new_game();
                let report = game.think(&position);
                total_nodes += report.nodes + report.qnodes;
                print_report(&report);
            }

            let elapsed = start.elapsed().as_secs_f64();
            println!("Total nodes: {total_nodes}");
            println!("Nodes/s: {:.0}", total_nodes as f64 / elapsed.max(f64::EPSILON));
            Ok(())
        }
    }
}

fn load_position(fen: Option<&str>) -> ChessResult<Position> {
    match fen {
        Some(fen) => Position::from_fen(fen),
        None => Ok(Position::new_game()),
    }
}

fn print_report(report: &SearchReport) {
    let best = report
        .best_move
        .map(|mv| mv.to_string())
        .unwrap_or_else(|| "(none)".to_owned());
    match report.mate_in() {
        Some(moves) => println!("Best move: {best}  mate {moves}"),
        None => println!("Best move: {best}  score {}", report.score),
    }
    println!(
        "Depth {}  nodes {}  qnodes {}  time {:.2}s  cache hits {}/{}",
        report.depth,
        report.nodes,
        report.qnodes,
        report.elapsed.as_secs_f64(),
        report.cache.hits,
        report.cache.probes
    );
    println!("PV: {}\n", format_line(&report.principal_variation));
}
