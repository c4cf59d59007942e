//! Command implementations and argument parsing for the kasane CLI.

use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use kasane_core::{
    GraphError, Hierarchy, LevelReport, LocalBiconnectedMerger, MergerError, MultilevelGraph,
};
use thiserror::Error;
use tracing::{Span, field, info, instrument};

use super::edge_list::{EdgeListError, parse_edge_list};

const DEFAULT_SHRINK_FACTOR: f64 = 2.0;
const DEFAULT_SEED: u64 = 42;

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(name = "kasane", about = "Coarsen graphs while preserving local biconnectivity.")]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Build coarser levels of an edge-list graph until no level can be built.
    Coarsen(CoarsenArgs),
}

/// Options accepted by the `coarsen` command.
#[derive(Debug, Args, Clone)]
pub struct CoarsenArgs {
    /// Path to a whitespace-separated edge list (`source target [length]`).
    pub path: PathBuf,

    /// Each level aims for at most `nodes / shrink-factor` live nodes.
    #[arg(long = "shrink-factor", default_value_t = DEFAULT_SHRINK_FACTOR)]
    pub shrink_factor: f64,

    /// Add the collapsed edge's length to every edge moved onto the survivor.
    #[arg(long = "adjust-edge-lengths")]
    pub adjust_edge_lengths: bool,

    /// Seed for candidate edge selection.
    #[arg(long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Stop after this many levels.
    #[arg(long = "max-levels", value_parser = clap::value_parser!(usize))]
    pub max_levels: Option<usize>,
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// The input file could not be opened.
    #[error("failed to open `{path}`: {source}")]
    Io {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// The edge list was malformed.
    #[error("failed to parse `{path}`: {source}")]
    EdgeList {
        /// Path of the malformed file.
        path: PathBuf,
        /// Parse failure.
        #[source]
        source: EdgeListError,
    },
    /// The edge list described an invalid graph.
    #[error(transparent)]
    Graph(#[from] GraphError),
    /// Merger configuration or execution failed.
    #[error(transparent)]
    Merger(#[from] MergerError),
}

impl CliError {
    /// Returns the stable core error code, when the failure came from the
    /// core library.
    #[must_use]
    pub fn code(&self) -> Option<&'static str> {
        match self {
            Self::Graph(err) => Some(err.code().as_str()),
            Self::Merger(err) => Some(err.code().as_str()),
            Self::Io { .. } | Self::EdgeList { .. } => None,
        }
    }
}

/// Summarises a coarsening run.
#[derive(Debug, Clone)]
pub struct CoarsenSummary {
    /// Live node count of the input graph.
    pub initial_nodes: usize,
    /// Live edge count of the input graph.
    pub initial_edges: usize,
    /// Live node count after the last level.
    pub final_nodes: usize,
    /// Live edge count after the last level.
    pub final_edges: usize,
    /// One report per level that contracted at least one node.
    pub levels: Vec<LevelReport>,
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when reading the input or coarsening fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use kasane_cli::cli::{Cli, CoarsenArgs, Command, run_cli};
/// # use tempfile::NamedTempFile;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let file = NamedTempFile::new()?;
/// std::fs::write(file.path(), "0 1\n1 2\n2 3\n3 4\n4 5\n5 0\n")?;
/// let cli = Cli {
///     command: Command::Coarsen(CoarsenArgs {
///         path: file.path().to_path_buf(),
///         shrink_factor: 2.0,
///         adjust_edge_lengths: false,
///         seed: 3,
///         max_levels: None,
///     }),
/// };
/// let summary = run_cli(cli)?;
/// assert_eq!(summary.initial_nodes, 6);
/// assert!(summary.final_nodes <= 3);
/// # Ok(())
/// # }
/// ```
#[instrument(name = "cli.run", err, skip(cli), fields(command = field::Empty))]
pub fn run_cli(cli: Cli) -> Result<CoarsenSummary, CliError> {
    match cli.command {
        Command::Coarsen(args) => {
            Span::current().record("command", field::display("coarsen"));
            run_coarsen(args)
        }
    }
}

#[instrument(
    name = "cli.coarsen",
    err,
    skip(args),
    fields(path = field::Empty, shrink_factor = args.shrink_factor, seed = args.seed),
)]
pub(super) fn run_coarsen(args: CoarsenArgs) -> Result<CoarsenSummary, CliError> {
    let CoarsenArgs {
        path,
        shrink_factor,
        adjust_edge_lengths,
        seed,
        max_levels,
    } = args;
    Span::current().record("path", field::display(path.display()));

    let mut merger = LocalBiconnectedMerger::builder()
        .with_shrink_factor(shrink_factor)
        .with_adjust_edge_lengths(adjust_edge_lengths)
        .with_rng_seed(seed)
        .build()?;
    let mut graph = load_graph(&path)?;
    let initial_nodes = graph.node_count();
    let initial_edges = graph.edge_count();

    let levels = coarsen(&mut merger, &mut graph, max_levels)?;

    info!(
        levels = levels.len(),
        initial_nodes,
        final_nodes = graph.node_count(),
        "coarsening completed"
    );
    Ok(CoarsenSummary {
        initial_nodes,
        initial_edges,
        final_nodes: graph.node_count(),
        final_edges: graph.edge_count(),
        levels,
    })
}

/// Builds levels until the merger reports no new level or `max_levels` is
/// reached, collecting a report for every pass that contracted something.
pub(super) fn coarsen(
    merger: &mut LocalBiconnectedMerger,
    graph: &mut MultilevelGraph,
    max_levels: Option<usize>,
) -> Result<Vec<LevelReport>, CliError> {
    let mut levels = Vec::new();
    while max_levels.is_none_or(|limit| levels.len() < limit) {
        let built = merger.build_one_level(graph)?;
        if let Some(report) = merger.last_report().filter(|report| report.contractions() > 0) {
            levels.push(report.clone());
        }
        if !built {
            break;
        }
    }
    Ok(levels)
}

#[instrument(name = "cli.load_graph", err, fields(path = field::Empty))]
pub(super) fn load_graph(path: &Path) -> Result<MultilevelGraph, CliError> {
    Span::current().record("path", field::display(path.display()));
    let file = File::open(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let list = parse_edge_list(BufReader::new(file)).map_err(|source| CliError::EdgeList {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(list.into_graph()?)
}

/// Renders `summary` to `writer` in a human-readable text format.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
///
/// # Examples
/// ```
/// # use std::io::Cursor;
/// # use kasane_cli::cli::{CoarsenSummary, render_summary};
/// let summary = CoarsenSummary {
///     initial_nodes: 4,
///     initial_edges: 4,
///     final_nodes: 4,
///     final_edges: 4,
///     levels: Vec::new(),
/// };
/// let mut buffer = Cursor::new(Vec::new());
/// render_summary(&summary, &mut buffer)?;
/// let text = String::from_utf8(buffer.into_inner())?;
/// assert_eq!(text, "nodes: 4 -> 4\nedges: 4 -> 4\nlevels: 0\n");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn render_summary(summary: &CoarsenSummary, mut writer: impl Write) -> io::Result<()> {
    writeln!(
        writer,
        "nodes: {} -> {}",
        summary.initial_nodes, summary.final_nodes
    )?;
    writeln!(
        writer,
        "edges: {} -> {}",
        summary.initial_edges, summary.final_edges
    )?;
    writeln!(writer, "levels: {}", summary.levels.len())?;
    for report in &summary.levels {
        writeln!(
            writer,
            "{}\t{} -> {}\tmatching={} cover={} contracted={} rejected={} refused={}",
            report.level(),
            report.initial_nodes(),
            report.final_nodes(),
            report.matching_edges(),
            report.cover_edges(),
            report.contractions(),
            report.feasibility_rejections(),
            report.finalize_failures(),
        )?;
    }
    Ok(())
}
