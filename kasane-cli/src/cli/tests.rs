//! Unit tests for the CLI commands and edge-list parsing.

use super::commands::{coarsen, load_graph, run_coarsen};
use super::{
    Cli, CliError, CoarsenArgs, CoarsenSummary, Command, EdgeListError, MAX_NODE_ID,
    parse_edge_list, render_summary, run_cli,
};

use std::fs;
use std::path::PathBuf;

use clap::Parser;
use kasane_core::{GraphError, Hierarchy, LocalBiconnectedMerger, MergerError};
use rstest::rstest;
use tempfile::TempDir;
use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;

use kasane_test_support::tracing::RecordingLayer;

type TestResult = Result<(), Box<dyn std::error::Error>>;

const HEXAGON: &str = "0 1\n1 2\n2 3\n3 4\n4 5\n5 0\n";

fn temp_dir() -> TempDir {
    TempDir::new().expect("create temporary directory")
}

fn write_edge_list(dir: &TempDir, name: &str, contents: &str) -> Result<PathBuf, std::io::Error> {
    let path = dir.path().join(name);
    fs::write(&path, contents)?;
    Ok(path)
}

fn args(path: PathBuf) -> CoarsenArgs {
    CoarsenArgs {
        path,
        shrink_factor: 2.0,
        adjust_edge_lengths: false,
        seed: 3,
        max_levels: None,
    }
}

fn grid_edge_list(rows: usize, cols: usize) -> String {
    let mut text = String::new();
    for row in 0..rows {
        for col in 0..cols {
            let node = row * cols + col;
            if col + 1 < cols {
                text.push_str(&format!("{node} {}\n", node + 1));
            }
            if row + 1 < rows {
                text.push_str(&format!("{node} {}\n", node + cols));
            }
        }
    }
    text
}

#[test]
fn parses_comments_blank_lines_and_lengths() -> TestResult {
    let input = "# header\n\n0 1\n1 2 0.5 # trailing comment\n   \n2 7\n";
    let list = parse_edge_list(input.as_bytes())?;
    assert_eq!(list.node_count(), 8);
    assert_eq!(list.edges(), &[(0_usize, 1_usize, 1.0), (1, 2, 0.5), (2, 7, 1.0)]);
    Ok(())
}

#[test]
fn empty_input_yields_an_empty_list() -> TestResult {
    let list = parse_edge_list("# nothing here\n".as_bytes())?;
    assert_eq!(list.node_count(), 0);
    assert!(list.edges().is_empty());
    Ok(())
}

#[rstest]
#[case::lone_node("0 1\n7\n", 2, 1)]
#[case::too_many_fields("0 1 1.0 extra\n", 1, 4)]
fn rejects_wrong_field_counts(
    #[case] input: &str,
    #[case] expected_line: usize,
    #[case] expected_fields: usize,
) {
    let err = parse_edge_list(input.as_bytes()).expect_err("line must be rejected");
    assert!(matches!(
        err,
        EdgeListError::FieldCount { line, fields }
            if line == expected_line && fields == expected_fields
    ));
}

#[rstest]
#[case::negative("-1 2\n", "-1")]
#[case::word("0 b\n", "b")]
#[case::fractional("0 1.5\n", "1.5")]
fn rejects_invalid_node_ids(#[case] input: &str, #[case] expected: &str) {
    let err = parse_edge_list(input.as_bytes()).expect_err("node id must be rejected");
    assert!(matches!(
        err,
        EdgeListError::InvalidNode { line: 1, ref token } if token == expected
    ));
}

#[rstest]
#[case::usize_max(format!("0 {}\n", usize::MAX), usize::MAX)]
#[case::just_above_cap(format!("{} 0\n", MAX_NODE_ID + 1), MAX_NODE_ID + 1)]
fn rejects_node_ids_above_the_cap(#[case] input: String, #[case] expected: usize) {
    let err = parse_edge_list(input.as_bytes()).expect_err("node id must be rejected");
    assert!(matches!(
        err,
        EdgeListError::NodeIdTooLarge { line: 1, node } if node == expected
    ));
}

#[test]
fn accepts_the_largest_node_id() -> TestResult {
    let list = parse_edge_list(format!("0 {MAX_NODE_ID}\n").as_bytes())?;
    assert_eq!(list.node_count(), MAX_NODE_ID + 1);
    Ok(())
}

#[test]
fn rejects_invalid_lengths() {
    let err = parse_edge_list("0 1\n1 2 far\n".as_bytes()).expect_err("length must be rejected");
    assert!(matches!(
        err,
        EdgeListError::InvalidLength { line: 2, ref token } if token == "far"
    ));
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = temp_dir();
    let err = load_graph(&dir.path().join("absent.txt")).expect_err("file does not exist");
    assert!(matches!(err, CliError::Io { .. }));
    assert_eq!(err.code(), None);
}

#[test]
fn malformed_file_reports_its_path() -> TestResult {
    let dir = temp_dir();
    let path = write_edge_list(&dir, "broken.txt", "0 x\n")?;
    let err = load_graph(&path).expect_err("file is malformed");
    assert!(matches!(err, CliError::EdgeList { path: ref reported, .. } if *reported == path));
    Ok(())
}

#[test]
fn self_loops_surface_the_graph_error_code() -> TestResult {
    let dir = temp_dir();
    let path = write_edge_list(&dir, "loop.txt", "0 1\n1 1\n")?;
    let err = run_coarsen(args(path)).expect_err("self-loop must be rejected");
    assert!(matches!(err, CliError::Graph(GraphError::SelfLoop { node: 1 })));
    assert_eq!(err.code(), Some("GRAPH_SELF_LOOP"));
    Ok(())
}

#[test]
fn negative_lengths_are_rejected() -> TestResult {
    let dir = temp_dir();
    let path = write_edge_list(&dir, "negative.txt", "0 1 -2\n")?;
    let err = run_coarsen(args(path)).expect_err("negative length must be rejected");
    assert_eq!(err.code(), Some("GRAPH_INVALID_LENGTH"));
    Ok(())
}

#[rstest]
#[case(1.0)]
#[case(f64::NAN)]
fn invalid_shrink_factor_is_rejected(#[case] shrink_factor: f64) -> TestResult {
    let dir = temp_dir();
    let path = write_edge_list(&dir, "hexagon.txt", HEXAGON)?;
    let err = run_coarsen(CoarsenArgs {
        shrink_factor,
        ..args(path)
    })
    .expect_err("factor must be rejected");
    assert!(matches!(
        err,
        CliError::Merger(MergerError::InvalidShrinkFactor { .. })
    ));
    assert_eq!(err.code(), Some("MERGER_INVALID_SHRINK_FACTOR"));
    Ok(())
}

#[test]
fn hexagon_coarsens_to_the_floor() -> TestResult {
    let dir = temp_dir();
    let path = write_edge_list(&dir, "hexagon.txt", HEXAGON)?;
    let summary = run_cli(Cli {
        command: Command::Coarsen(args(path)),
    })?;
    assert_eq!(summary.initial_nodes, 6);
    assert_eq!(summary.initial_edges, 6);
    assert!(summary.final_nodes <= 3);
    assert!(!summary.levels.is_empty());
    assert_eq!(summary.levels[0].level(), 1);
    assert_eq!(summary.levels[0].initial_nodes(), 6);
    Ok(())
}

#[rstest]
#[case(0)]
#[case(1)]
fn max_levels_caps_the_run(#[case] limit: usize) -> TestResult {
    let dir = temp_dir();
    let path = write_edge_list(&dir, "grid.txt", &grid_edge_list(6, 6))?;
    let summary = run_coarsen(CoarsenArgs {
        max_levels: Some(limit),
        ..args(path)
    })?;
    assert!(summary.levels.len() <= limit);
    if limit == 0 {
        assert_eq!(summary.final_nodes, summary.initial_nodes);
    }
    Ok(())
}

#[test]
fn levels_are_numbered_consecutively() -> TestResult {
    let dir = temp_dir();
    let path = write_edge_list(&dir, "grid.txt", &grid_edge_list(5, 5))?;
    let mut graph = load_graph(&path)?;
    let mut merger = LocalBiconnectedMerger::builder().with_rng_seed(8).build()?;

    let levels = coarsen(&mut merger, &mut graph, None)?;
    assert!(!levels.is_empty());
    for (index, report) in levels.iter().enumerate() {
        assert_eq!(report.level(), index + 1);
        assert!(report.contractions() > 0);
        assert!(report.final_nodes() < report.initial_nodes());
    }
    let last = levels.last().expect("at least one level");
    assert_eq!(last.final_nodes(), graph.node_count());
    Ok(())
}

#[test]
fn render_summary_lists_every_level() -> TestResult {
    let dir = temp_dir();
    let path = write_edge_list(&dir, "grid.txt", &grid_edge_list(4, 4))?;
    let summary = run_coarsen(args(path))?;

    let mut buffer = Vec::new();
    render_summary(&summary, &mut buffer)?;
    let text = String::from_utf8(buffer)?;
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 3 + summary.levels.len());
    assert_eq!(lines[0], format!("nodes: 16 -> {}", summary.final_nodes));
    assert_eq!(lines[2], format!("levels: {}", summary.levels.len()));
    assert!(lines[3].starts_with("1\t16 -> "));
    Ok(())
}

#[test]
fn render_summary_of_an_untouched_graph() -> TestResult {
    let summary = CoarsenSummary {
        initial_nodes: 3,
        initial_edges: 3,
        final_nodes: 3,
        final_edges: 3,
        levels: Vec::new(),
    };
    let mut buffer = Vec::new();
    render_summary(&summary, &mut buffer)?;
    assert_eq!(String::from_utf8(buffer)?, "nodes: 3 -> 3\nedges: 3 -> 3\nlevels: 0\n");
    Ok(())
}

#[test]
fn coarsen_span_records_arguments() -> TestResult {
    let dir = temp_dir();
    let path = write_edge_list(&dir, "hexagon.txt", HEXAGON)?;
    let layer = RecordingLayer::default();
    let subscriber = tracing_subscriber::registry().with(layer.clone());

    tracing::subscriber::with_default(subscriber, || {
        run_cli(Cli {
            command: Command::Coarsen(args(path.clone())),
        })
    })?;

    let run = layer.span_named("cli.run").expect("run span recorded");
    assert_eq!(run.field("command"), Some("coarsen"));
    let coarsen = layer.span_named("cli.coarsen").expect("coarsen span recorded");
    assert_eq!(coarsen.field("seed"), Some("3"));
    assert_eq!(coarsen.field("path"), Some(path.display().to_string().as_str()));

    let completed = layer
        .event_with_message("coarsening completed")
        .expect("completion event recorded");
    assert_eq!(completed.level, Level::INFO);
    assert_eq!(completed.field("initial_nodes"), Some("6"));
    Ok(())
}

#[test]
fn spans_close_innermost_first() -> TestResult {
    let dir = temp_dir();
    let path = write_edge_list(&dir, "grid.txt", &grid_edge_list(4, 4))?;
    let layer = RecordingLayer::default();
    let subscriber = tracing_subscriber::registry().with(layer.clone());

    let summary = tracing::subscriber::with_default(subscriber, || {
        run_cli(Cli {
            command: Command::Coarsen(args(path)),
        })
    })?;

    let names: Vec<String> = layer.spans().into_iter().map(|span| span.name).collect();
    assert_eq!(names.first().map(String::as_str), Some("cli.load_graph"));
    assert_eq!(
        names.iter().rev().take(2).map(String::as_str).collect::<Vec<_>>(),
        ["cli.run", "cli.coarsen"]
    );
    let passes = names
        .iter()
        .filter(|name| *name == "merger.build_one_level")
        .count();
    assert!(passes >= summary.levels.len());
    assert_eq!(names.len(), passes + 3);
    Ok(())
}

#[test]
fn clap_parses_coarsen_arguments() {
    let cli = Cli::parse_from([
        "kasane",
        "coarsen",
        "graph.txt",
        "--shrink-factor",
        "3",
        "--adjust-edge-lengths",
        "--seed",
        "9",
        "--max-levels",
        "2",
    ]);
    let Command::Coarsen(args) = cli.command;
    assert_eq!(args.path, PathBuf::from("graph.txt"));
    assert!((args.shrink_factor - 3.0).abs() < f64::EPSILON);
    assert!(args.adjust_edge_lengths);
    assert_eq!(args.seed, 9);
    assert_eq!(args.max_levels, Some(2));
}

#[test]
fn clap_applies_defaults() {
    let cli = Cli::parse_from(["kasane", "coarsen", "graph.txt"]);
    let Command::Coarsen(args) = cli.command;
    assert!((args.shrink_factor - 2.0).abs() < f64::EPSILON);
    assert!(!args.adjust_edge_lengths);
    assert_eq!(args.seed, 42);
    assert_eq!(args.max_levels, None);
}
