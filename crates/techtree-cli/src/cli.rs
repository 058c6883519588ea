//! Command-line interface for the techtree utility
//!
//! Renders technology-tree snapshots to SVG, validates them, and answers
//! picking queries against them.

use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use tracing::{debug, info};

use techtree::core::logging::{init_logging, LOG_FORMAT_ENV, LOG_LEVEL_ENV};
use techtree::interaction::{GestureController, TreeEvent};
use techtree::model::{validate, TechnologyTree};
use techtree::render::TreeCanvas;
use techtree::{AnimationFrame, Point, RenderConfig, Size, SvgCanvas, Vec2, ViewState};

/// Techtree - Render technology trees to SVG
#[derive(Parser)]
#[command(name = "techtree")]
#[command(about = "Render technology-tree JSON snapshots to SVG and inspect them")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Set log level (trace|debug|info|warn|error)
    #[arg(long, value_enum, default_value_t = LogLevel::Warn)]
    pub log_level: LogLevel,

    /// Set log format (compact|pretty|json)
    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

/// Log level options
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Log format options
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Compact => "compact",
            LogFormat::Pretty => "pretty",
            LogFormat::Json => "json",
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render a tree snapshot to SVG
    Render(RenderArgs),

    /// Check a tree snapshot for dangling references and requirement cycles
    Validate {
        /// Input tree JSON (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Print issues as JSON
        #[arg(long)]
        json: bool,
    },

    /// Report which node a tap at a screen point selects
    Tap {
        /// Input tree JSON (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Screen x coordinate
        #[arg(long, allow_hyphen_values = true)]
        x: f64,

        /// Screen y coordinate
        #[arg(long, allow_hyphen_values = true)]
        y: f64,

        /// Horizontal pan offset
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        pan_x: f64,

        /// Vertical pan offset
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        pan_y: f64,
    },

    /// List nodes with their resolved titles
    Nodes {
        /// Input tree JSON (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Title language (defaults to the tree's default language)
        #[arg(long)]
        lang: Option<String>,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Options of the render command
#[derive(Args, Debug, Clone, PartialEq)]
pub struct RenderArgs {
    /// Input tree JSON (use - for stdin)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Output SVG file (use - for stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Render configuration JSON; flags below override it
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Label language
    #[arg(long)]
    pub lang: Option<String>,

    /// Draw the background grid
    #[arg(long)]
    pub grid: bool,

    /// Horizontal pan offset
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    pub pan_x: f64,

    /// Vertical pan offset
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    pub pan_y: f64,

    /// Id of the selected node
    #[arg(long)]
    pub select: Option<String>,

    /// Scale of the selected node
    #[arg(long, default_value_t = 1.0)]
    pub pulse_scale: f64,

    /// Alpha of the selected node's glow
    #[arg(long, default_value_t = 0.3)]
    pub glow_alpha: f64,

    /// Output width (defaults to the tree's canvas width)
    #[arg(long)]
    pub width: Option<f64>,

    /// Output height (defaults to the tree's canvas height)
    #[arg(long)]
    pub height: Option<f64>,
}

impl Default for RenderArgs {
    fn default() -> Self {
        let animation = AnimationFrame::default();
        Self {
            input: None,
            output: None,
            config: None,
            lang: None,
            grid: false,
            pan_x: 0.0,
            pan_y: 0.0,
            select: None,
            pulse_scale: animation.pulse_scale,
            glow_alpha: animation.glow_alpha,
            width: None,
            height: None,
        }
    }
}

/// One line of `nodes` output
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeRow {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub node_type: String,
    pub shape: String,
    pub x: f64,
    pub y: f64,
}

/// Main CLI application
pub struct TechtreeApp {
    config: RenderConfig,
}

impl TechtreeApp {
    /// Create a new application instance with default settings
    pub fn new() -> Self {
        Self::with_config(RenderConfig::default())
    }

    /// Create a new application instance with a base render config
    pub fn with_config(config: RenderConfig) -> Self {
        Self { config }
    }

    /// Run the application with the given CLI arguments
    pub fn run(&mut self, cli: Cli) -> Result<()> {
        // Environment variables take precedence over flags
        let log_level_str = std::env::var(LOG_LEVEL_ENV)
            .ok()
            .or_else(|| std::env::var("RUST_LOG").ok())
            .or_else(|| Some(cli.log_level.as_str().to_string()));

        let log_format_str = std::env::var(LOG_FORMAT_ENV)
            .ok()
            .or_else(|| Some(cli.log_format.as_str().to_string()));

        if let Err(e) = init_logging(log_level_str.as_deref(), log_format_str.as_deref()) {
            eprintln!("Warning: Failed to initialize logging: {}", e);
        }

        if cli.verbose {
            eprintln!("techtree v{}", env!("CARGO_PKG_VERSION"));
        }

        match cli.command {
            Commands::Render(args) => self.render_command(args, cli.verbose),
            Commands::Validate { input, json } => self.validate_command(input, json, cli.verbose),
            Commands::Tap {
                input,
                x,
                y,
                pan_x,
                pan_y,
            } => self.tap_command(input, Point::new(x, y), Vec2::new(pan_x, pan_y)),
            Commands::Nodes { input, lang, json } => self.nodes_command(input, lang, json),
        }
    }

    /// Handle the render command
    fn render_command(&self, args: RenderArgs, verbose: bool) -> Result<()> {
        let content = self.read_input(args.input.clone())?;
        if verbose {
            eprintln!("Read {} bytes of input", content.len());
        }

        let svg = self.render_to_string(&content, &args)?;
        self.write_output(args.output, &svg)?;

        if verbose {
            eprintln!("Rendered {} bytes of SVG", svg.len());
        }
        Ok(())
    }

    /// Render a snapshot with the render command's options
    pub fn render_to_string(&self, content: &str, args: &RenderArgs) -> Result<String> {
        let tree = TechnologyTree::from_json_str(content).context("Failed to load tree")?;
        let config = self.build_config(args, &tree)?;
        let view = ViewState {
            pan: Vec2::new(args.pan_x, args.pan_y),
            selected: args.select.clone(),
            animation: AnimationFrame {
                pulse_scale: args.pulse_scale,
                glow_alpha: args.glow_alpha,
            },
        };

        if let Some(id) = &view.selected {
            if !tree.has_node(id) {
                info!(id = %id, "Selected node is not in the tree");
            }
        }

        let renderer = TreeCanvas::new(config);
        let viewport = renderer.viewport(&tree);
        if viewport.width <= 0.0 || viewport.height <= 0.0 {
            return Err(techtree::TreeError::render_error(format!(
                "viewport {}x{} has no area",
                viewport.width, viewport.height
            ))
            .into());
        }

        let mut canvas = SvgCanvas::new(viewport);
        let stats = renderer.render(&tree, &view, &mut canvas);
        debug!(?stats, "Rendered tree");
        Ok(canvas.finish())
    }

    /// Merge the base config, an optional config file and flags
    fn build_config(&self, args: &RenderArgs, tree: &TechnologyTree) -> Result<RenderConfig> {
        let mut config = match &args.config {
            Some(path) => {
                let raw = fs::read_to_string(path).map_err(|e| {
                    anyhow!("Failed to read config file '{}': {}", path.display(), e)
                })?;
                serde_json::from_str(&raw)
                    .with_context(|| format!("Invalid config file '{}'", path.display()))?
            }
            None => self.config.clone(),
        };

        if args.grid {
            config.show_grid = true;
        }
        if let Some(lang) = &args.lang {
            config.language = Some(lang.clone());
        }
        if args.width.is_some() || args.height.is_some() {
            let base = config.viewport.unwrap_or(tree.metadata().canvas_size);
            config.viewport = Some(Size::new(
                args.width.unwrap_or(base.width),
                args.height.unwrap_or(base.height),
            ));
        }
        Ok(config)
    }

    /// Handle the validate command
    fn validate_command(&self, input: Option<PathBuf>, json: bool, verbose: bool) -> Result<()> {
        let content = self.read_input(input)?;
        if verbose {
            eprintln!("Read {} bytes of input", content.len());
        }

        let tree = TechnologyTree::from_json_str(&content).context("Failed to load tree")?;
        let issues: Vec<String> = validate(&tree).iter().map(ToString::to_string).collect();

        if json {
            let report = serde_json::json!({
                "valid": issues.is_empty(),
                "nodes": tree.node_count(),
                "connections": tree.connection_count(),
                "issues": issues,
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else if issues.is_empty() {
            println!(
                "✓ Valid tree ({} nodes, {} connections)",
                tree.node_count(),
                tree.connection_count()
            );
        } else {
            for issue in &issues {
                println!("✗ {}", issue);
            }
        }

        if issues.is_empty() {
            Ok(())
        } else {
            Err(anyhow!("{} issue(s) found", issues.len()))
        }
    }

    /// Handle the tap command
    fn tap_command(&self, input: Option<PathBuf>, point: Point, pan: Vec2) -> Result<()> {
        let content = self.read_input(input)?;
        let tree = TechnologyTree::from_json_str(&content).context("Failed to load tree")?;
        println!("{}", Self::tap_result(&tree, point, pan));
        Ok(())
    }

    /// Id selected by a tap, or `none`
    pub fn tap_result(tree: &TechnologyTree, point: Point, pan: Vec2) -> String {
        let mut gestures = GestureController::with_pan(pan);
        gestures
            .tap(tree, point)
            .into_iter()
            .find_map(|event| match event {
                TreeEvent::NodeSelected { id } => id,
                TreeEvent::NodeMoved { .. } => None,
            })
            .unwrap_or_else(|| "none".to_string())
    }

    /// Handle the nodes command
    fn nodes_command(&self, input: Option<PathBuf>, lang: Option<String>, json: bool) -> Result<()> {
        let content = self.read_input(input)?;
        let tree = TechnologyTree::from_json_str(&content).context("Failed to load tree")?;
        let rows = Self::node_rows(&tree, lang.as_deref());

        if json {
            println!("{}", serde_json::to_string_pretty(&rows)?);
        } else {
            for row in &rows {
                println!(
                    "{:<16} {:<8} {:<9} ({}, {})  {}",
                    row.id, row.node_type, row.shape, row.x, row.y, row.title
                );
            }
        }
        Ok(())
    }

    /// Node listing in document order
    pub fn node_rows(tree: &TechnologyTree, lang: Option<&str>) -> Vec<NodeRow> {
        let lang = lang.unwrap_or(&tree.metadata().default_language);
        tree.nodes()
            .iter()
            .map(|node| NodeRow {
                id: node.id.clone(),
                title: node.title.resolve(lang).to_string(),
                node_type: node.node_type.to_string(),
                shape: node.shape().to_string(),
                x: node.position.x,
                y: node.position.y,
            })
            .collect()
    }

    /// Read input from file or stdin
    pub fn read_input(&self, input: Option<PathBuf>) -> Result<String> {
        match input {
            Some(path) if path.to_string_lossy() != "-" => fs::read_to_string(&path)
                .map_err(|e| anyhow!("Failed to read input file '{}': {}", path.display(), e)),
            _ => {
                let mut content = String::new();
                io::stdin().read_to_string(&mut content)?;
                Ok(content)
            }
        }
    }

    /// Write output to file or stdout
    pub fn write_output(&self, output: Option<PathBuf>, content: &str) -> Result<()> {
        match output {
            Some(path) if path.to_string_lossy() != "-" => {
                fs::write(&path, content).map_err(|e| {
                    anyhow!("Failed to write output file '{}': {}", path.display(), e)
                })?;
            }
            _ => {
                let mut stdout = io::stdout();
                stdout.write_all(content.as_bytes())?;
                if !content.is_empty() && !content.ends_with('\n') {
                    stdout.write_all(b"\n")?;
                }
                stdout.flush()?;
            }
        }
        Ok(())
    }
}

impl Default for TechtreeApp {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::fs;
    use tempfile::tempdir;

    const FIXTURE: &str = include_str!("../../techtree/tests/fixtures/kotlin_tree.json");

    fn tree() -> TechnologyTree {
        TechnologyTree::from_json_str(FIXTURE).unwrap()
    }

    #[test]
    fn test_cli_parsing_render_command() {
        let args = vec![
            "techtree", "render", "--input", "tree.json", "--output", "tree.svg", "--lang", "en",
            "--grid", "--pan-x", "-20", "--select", "intro",
        ];
        let cli = Cli::try_parse_from(args).unwrap();

        match cli.command {
            Commands::Render(args) => {
                assert_eq!(args.input.unwrap().to_string_lossy(), "tree.json");
                assert_eq!(args.output.unwrap().to_string_lossy(), "tree.svg");
                assert_eq!(args.lang.as_deref(), Some("en"));
                assert!(args.grid);
                assert_eq!(args.pan_x, -20.0);
                assert_eq!(args.pan_y, 0.0);
                assert_eq!(args.select.as_deref(), Some("intro"));
                assert_eq!(args.pulse_scale, 1.0); // default
                assert_eq!(args.glow_alpha, 0.3); // default
            }
            _ => panic!("Expected Render command"),
        }
    }

    #[test]
    fn test_cli_parsing_tap_command() {
        let args = vec!["techtree", "tap", "-i", "tree.json", "--x", "100", "--y", "300"];
        let cli = Cli::try_parse_from(args).unwrap();

        match cli.command {
            Commands::Tap { x, y, pan_x, pan_y, .. } => {
                assert_eq!((x, y), (100.0, 300.0));
                assert_eq!((pan_x, pan_y), (0.0, 0.0));
            }
            _ => panic!("Expected Tap command"),
        }
    }

    #[test]
    fn test_cli_tap_requires_coordinates() {
        assert!(Cli::try_parse_from(vec!["techtree", "tap", "--x", "1"]).is_err());
    }

    #[test]
    fn test_cli_parsing_validate_command() {
        let cli = Cli::try_parse_from(vec!["techtree", "validate", "--json"]).unwrap();

        match cli.command {
            Commands::Validate { input, json } => {
                assert!(input.is_none());
                assert!(json);
            }
            _ => panic!("Expected Validate command"),
        }
    }

    #[test]
    fn test_verbose_and_log_flags() {
        let args = vec!["techtree", "--verbose", "--log-level", "debug", "nodes"];
        let cli = Cli::try_parse_from(args).unwrap();

        assert!(cli.verbose);
        assert_eq!(cli.log_level, LogLevel::Debug);
        assert_eq!(cli.log_format, LogFormat::Compact);
    }

    #[test]
    fn test_render_to_string() {
        let app = TechtreeApp::new();
        let svg = app.render_to_string(FIXTURE, &RenderArgs::default()).unwrap();
        assert!(svg.contains("Введение в Kotlin"));
    }

    #[test]
    fn test_render_flags_override_config_file() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.json");
        fs::write(&config_path, r#"{"language": "ru", "viewport": {"width": 300, "height": 200}}"#)
            .unwrap();

        let app = TechtreeApp::new();
        let args = RenderArgs {
            config: Some(config_path),
            lang: Some("en".into()),
            height: Some(150.0),
            ..RenderArgs::default()
        };
        let config = app.build_config(&args, &tree()).unwrap();
        assert_eq!(config.language.as_deref(), Some("en"));
        assert_eq!(config.viewport, Some(Size::new(300.0, 150.0)));

        let svg = app.render_to_string(FIXTURE, &args).unwrap();
        assert!(svg.contains("Introduction to Kotlin"));
    }

    #[test]
    fn test_render_rejects_empty_viewport() {
        let app = TechtreeApp::new();
        let args = RenderArgs {
            width: Some(0.0),
            ..RenderArgs::default()
        };
        let error = app.render_to_string(FIXTURE, &args).unwrap_err();
        assert!(error.to_string().contains("no area"));
    }

    #[test]
    fn test_tap_result() {
        let tree = tree();
        assert_eq!(
            TechtreeApp::tap_result(&tree, Point::new(100.0, 300.0), Vec2::ZERO),
            "intro"
        );
        assert_eq!(
            TechtreeApp::tap_result(&tree, Point::new(100.0, 300.0), Vec2::new(50.0, 50.0)),
            "none"
        );
    }

    #[test]
    fn test_node_rows() {
        let rows = TechtreeApp::node_rows(&tree(), None);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].id, "intro");
        assert_eq!(rows[0].title, "Введение в Kotlin");
        assert_eq!(rows[0].node_type, "topic");
        assert_eq!(rows[0].shape, "circular");
        assert_eq!((rows[1].x, rows[1].y), (300.0, 200.0));

        let english = TechtreeApp::node_rows(&tree(), Some("en"));
        assert_eq!(english[1].title, "Variables and data types");
    }

    #[test]
    fn test_validate_command_reports_issues() {
        let dir = tempdir().unwrap();
        let bad = dir.path().join("bad.json");
        fs::write(
            &bad,
            r#"{"nodes": {"a": {"position": {"x": 0, "y": 0}, "requirements": ["ghost"]}}}"#,
        )
        .unwrap();
        let good = dir.path().join("good.json");
        fs::write(&good, FIXTURE).unwrap();

        let app = TechtreeApp::new();
        assert!(app.validate_command(Some(bad), false, false).is_err());
        assert!(app.validate_command(Some(good), true, false).is_ok());
    }

    #[test]
    fn test_read_input_from_file() {
        let app = TechtreeApp::new();
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("tree.json");
        fs::write(&file_path, FIXTURE).unwrap();

        let content = app.read_input(Some(file_path)).unwrap();
        assert_eq!(content, FIXTURE);
    }

    #[test]
    fn test_read_input_missing_file() {
        let app = TechtreeApp::new();
        let error = app
            .read_input(Some(PathBuf::from("/no/such/tree.json")))
            .unwrap_err();
        assert!(error.to_string().contains("Failed to read input file"));
    }

    #[test]
    fn test_write_output_to_file() {
        let app = TechtreeApp::new();
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("tree.svg");

        app.write_output(Some(file_path.clone()), "<svg/>").unwrap();

        assert_eq!(fs::read_to_string(&file_path).unwrap(), "<svg/>");
    }
}
