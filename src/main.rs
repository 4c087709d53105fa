// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! `tilelayout`: solve markdown layout descriptions from the command line.
//!
//! Commands:
//! - `solve`: parse a description, solve it, print the layout
//! - `probe`: show the placement options for two sample rooms

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tile_layout::constraints::{Adjacent, ConstraintTag};
use tile_layout::diagnostics::{DecisionTree, Tee, TracingObserver};
use tile_layout::engine::options::{generate_options, order_options};
use tile_layout::{dsl, render, Direction, Position, SearchContext, SolverConfig, Tile};

#[derive(Parser)]
#[command(
    name = "tilelayout",
    about = "Assemble ASCII tiles into a layout that satisfies adjacency constraints",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve a layout description
    Solve {
        /// Markdown file with Components, Constraints and Component Tiles
        file: PathBuf,

        /// Solver configuration (TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Print the explored decision tree
        #[arg(long)]
        tree: bool,

        /// Print a JSON report instead of the drawing
        #[arg(long)]
        json: bool,
    },

    /// List placement options for ADJACENT(RoomB, RoomA, DIRECTION)
    Probe {
        /// n, s, e, w or any
        direction: Direction,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Solve {
            file,
            config,
            tree,
            json,
        } => solve(file, config, tree, json),
        Commands::Probe { direction } => probe(direction),
    }
}

fn solve(file: PathBuf, config: Option<PathBuf>, tree: bool, json: bool) -> Result<()> {
    let config = match config {
        Some(path) => SolverConfig::load(&path)?,
        None => SolverConfig::default(),
    };
    let mut solver = dsl::parse_file(&file)?.into_solver(config)?;

    let mut observer = Tee(TracingObserver, DecisionTree::new());
    let outcome = solver.solve_with(&mut observer);
    let Tee(_, decisions) = observer;
    if tree {
        eprint!("{}", decisions.render());
    }

    let report = outcome.with_context(|| format!("no layout for {}", file.display()))?;
    solver.normalize();
    let violations = solver.verify();
    if !violations.is_empty() {
        for v in &violations {
            eprintln!("violation: {v}");
        }
        bail!("solved layout failed verification");
    }

    if json {
        let placements: Vec<_> = solver
            .components()
            .iter()
            .map(|c| (c.name.as_str(), c.position))
            .collect();
        let out = serde_json::json!({
            "placements": placements,
            "iterations": report.iterations,
            "nodes_created": report.nodes_created,
            "backtracks": report.backtracks,
            "statistics": report.statistics,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        print!("{}", solver.render());
    }
    Ok(())
}

fn probe(direction: Direction) -> Result<()> {
    let mut ctx = SearchContext::new();
    let room_a = ctx.add_component("RoomA", Tile::outline(7, 5)?)?;
    let room_b = ctx.add_component("RoomB", Tile::outline(4, 3)?)?;
    let constraint = ctx.add_constraint(ConstraintTag::Adjacent, "RoomB", "RoomA", direction)?;
    ctx.place(room_a, Position::default());

    let mut options = generate_options(&ctx, &Adjacent, ctx.constraint(constraint), room_b);
    order_options(&mut options);

    println!(
        "{} with RoomA 7x5 at {} and RoomB 4x3: {} options",
        ctx.describe(ctx.constraint(constraint)),
        Position::default(),
        options.len()
    );
    print!("{}", render::render_options(&ctx, &options));
    Ok(())
}
