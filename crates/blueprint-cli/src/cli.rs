//! Command-line interface for the blueprint utility
//!
//! Renders JSON scenes and sequence notation to HTML, SVG or a terminal
//! preview.

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use tracing::debug;

use crate::colorizer::colorize_output;
use blueprint::core::logging::init_logging;
use blueprint::plugins::Orchestrator;
use blueprint::{
    ActorVariant, ArrowDirection, CharacterSet, ContainerColor, MessageVariant, NodeVariant,
    RenderConfig, Size,
};

/// Blueprint - Render declarative diagrams to HTML, SVG or text
#[derive(Parser)]
#[command(name = "blueprint")]
#[command(about = "Render declarative architecture scenes and sequence diagrams")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Set log level (trace|debug|info|warn|error|off)
    #[arg(long, value_enum, global = true)]
    pub log_level: Option<LogLevel>,

    /// Set log format (compact|pretty|json)
    #[arg(long, value_enum, global = true)]
    pub log_format: Option<LogFormat>,
}

/// Log level options
#[derive(Copy, Clone, Debug, clap::ValueEnum, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
    Off,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
            LogLevel::Off => "off",
        }
    }
}

/// Log format options
#[derive(Copy, Clone, Debug, clap::ValueEnum, PartialEq, Eq)]
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
    /// Render a scene or sequence diagram
    Render {
        /// Input file: a JSON scene or sequence notation (use - for stdin)
        input: Option<PathBuf>,

        /// Output file (use - for stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Html)]
        format: OutputFormat,

        /// Character set for the terminal preview
        #[arg(long, value_enum, default_value_t = StyleChoice::Unicode)]
        style: StyleChoice,

        /// When to use colors in the terminal preview
        #[arg(long, value_enum, default_value_t = ColorChoice::Auto)]
        color: ColorChoice,

        /// Default vertical distance between messages, in pixels
        #[arg(long)]
        spacing: Option<f64>,

        /// Prefix for generated element ids
        #[arg(long, default_value = "bp")]
        id_prefix: String,

        /// Leave the stylesheet out of page output
        #[arg(long)]
        no_stylesheet: bool,
    },

    /// Check that the input loads and validates
    Validate {
        /// Input file to validate (use - for stdin)
        input: Option<PathBuf>,
    },

    /// Detect the input kind
    Detect {
        /// Input file to analyze (use - for stdin)
        input: Option<PathBuf>,
    },

    /// List the presentational variants
    Variants {
        /// Show in JSON format
        #[arg(long)]
        json: bool,
    },
}

/// Output formats
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// HTML fragment
    #[default]
    Html,
    /// Standalone HTML page with the stylesheet
    Page,
    /// Standalone SVG (sequence diagrams only)
    Svg,
    /// Terminal preview of the sequence diagrams
    Ascii,
}

/// Supported preview character sets
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum StyleChoice {
    Ascii,
    Unicode,
}

impl From<StyleChoice> for CharacterSet {
    fn from(value: StyleChoice) -> Self {
        match value {
            StyleChoice::Ascii => CharacterSet::Ascii,
            StyleChoice::Unicode => CharacterSet::Unicode,
        }
    }
}

/// When to colorize output
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq, Default)]
pub enum ColorChoice {
    /// Use colors if output is a terminal and NO_COLOR is not set
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Options of the render command
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub format: OutputFormat,
    pub style: StyleChoice,
    pub color: ColorChoice,
    pub spacing: Option<f64>,
    pub id_prefix: String,
    pub embed_stylesheet: bool,
}

impl RenderOptions {
    fn to_config(&self) -> Result<RenderConfig> {
        let mut config = RenderConfig::new(self.style.into())
            .with_id_prefix(self.id_prefix.clone())
            .with_stylesheet(self.embed_stylesheet);
        if let Some(spacing) = self.spacing {
            if !spacing.is_finite() || spacing <= 0.0 {
                return Err(anyhow!("--spacing must be a positive number, got {}", spacing));
            }
            config = config.with_message_spacing(spacing);
        }
        Ok(config)
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            format: OutputFormat::Html,
            style: StyleChoice::Unicode,
            color: ColorChoice::Never,
            spacing: None,
            id_prefix: "bp".to_string(),
            embed_stylesheet: true,
        }
    }
}

/// Main CLI application
pub struct BlueprintApp {
    orchestrator: Orchestrator,
}

impl BlueprintApp {
    /// Create a new application instance with default settings
    pub fn new() -> Self {
        Self::with_config(RenderConfig::default())
    }

    /// Create a new application instance with a render config
    pub fn with_config(config: RenderConfig) -> Self {
        Self {
            orchestrator: Orchestrator::with_all_plugins().with_config(config),
        }
    }

    /// Run the application with the given CLI arguments
    pub fn run(&mut self, cli: Cli) -> Result<()> {
        // Explicit flags win; init_logging falls back to the environment
        if let Err(e) = init_logging(
            cli.log_level.map(|l| l.as_str()),
            cli.log_format.map(|f| f.as_str()),
        ) {
            eprintln!("Warning: Failed to initialize logging: {}", e);
        }

        if cli.verbose {
            eprintln!("Blueprint v{}", env!("CARGO_PKG_VERSION"));
        }

        match cli.command {
            Commands::Render {
                input,
                output,
                format,
                style,
                color,
                spacing,
                id_prefix,
                no_stylesheet,
            } => {
                let options = RenderOptions {
                    format,
                    style,
                    color,
                    spacing,
                    id_prefix,
                    embed_stylesheet: !no_stylesheet,
                };
                self.render_command(input, output, &options, cli.verbose)
            }
            Commands::Validate { input } => self.validate_command(input, cli.verbose),
            Commands::Detect { input } => self.detect_command(input, cli.verbose),
            Commands::Variants { json } => self.variants_command(json, cli.verbose),
        }
    }

    /// Handle the render command
    pub fn render_command(
        &mut self,
        input: Option<PathBuf>,
        output: Option<PathBuf>,
        options: &RenderOptions,
        verbose: bool,
    ) -> Result<()> {
        let content = self.read_input(input)?;
        if verbose {
            eprintln!("Read {} bytes of input", content.len());
        }

        self.orchestrator = Orchestrator::with_all_plugins().with_config(options.to_config()?);
        let should_colorize = options.format == OutputFormat::Ascii
            && Self::should_colorize(&output, options.color);

        let rendered = self.render_content(&content, options.format)?;
        debug!(format = ?options.format, bytes = rendered.len(), colorize = should_colorize, "Rendered output");
        if verbose {
            eprintln!("Rendered {:?} output ({} bytes)", options.format, rendered.len());
        }

        let final_output = if should_colorize {
            colorize_output(&rendered)
        } else {
            rendered
        };
        self.write_output(output, &final_output)
    }

    /// Render already-read content in the requested format
    pub fn render_content(&self, content: &str, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Html => self.orchestrator.process_html(content),
            OutputFormat::Page => self.orchestrator.process_page(content),
            OutputFormat::Svg => self.orchestrator.process_svg(content),
            OutputFormat::Ascii => self.orchestrator.process_ascii(content),
        }
    }

    /// Determine if we should colorize the output based on color choice and output destination
    fn should_colorize(output: &Option<PathBuf>, color: ColorChoice) -> bool {
        match color {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => {
                if std::env::var("NO_COLOR").is_ok() {
                    return false;
                }
                match output {
                    None => crossterm::tty::IsTty::is_tty(&std::io::stdout()),
                    Some(p) if p.to_str() == Some("-") => {
                        crossterm::tty::IsTty::is_tty(&std::io::stdout())
                    }
                    Some(_) => false,
                }
            }
        }
    }

    /// Handle the detect command
    fn detect_command(&self, input: Option<PathBuf>, verbose: bool) -> Result<()> {
        let content = self.read_input(input)?;
        if verbose {
            eprintln!("Read {} bytes of input", content.len());
        }

        match self.orchestrator.detect_diagram_type(&content) {
            Ok(kind) => {
                println!("{}", kind);
                Ok(())
            }
            Err(e) => {
                eprintln!("Could not detect input kind: {}", e);
                Err(e)
            }
        }
    }

    /// Describe every presentational variant
    pub fn variants_report(json: bool) -> Result<String> {
        let groups: Vec<(&str, Vec<String>)> = vec![
            ("node", names(NodeVariant::ALL)),
            ("size", names(Size::ALL)),
            ("arrow", names(ArrowDirection::ALL)),
            ("container", names(ContainerColor::ALL)),
            ("actor", names(ActorVariant::ALL)),
            ("message", names(MessageVariant::ALL)),
        ];

        if json {
            let mut map = serde_json::Map::new();
            for (group, values) in groups {
                map.insert(group.to_string(), serde_json::json!(values));
            }
            return Ok(serde_json::to_string_pretty(&serde_json::Value::Object(map))?);
        }

        let mut report = String::from("Presentational variants:\n");
        for (group, values) in groups {
            report.push_str(&format!("  {:<10} {}\n", group, values.join(", ")));
        }
        Ok(report)
    }

    /// Handle the variants command
    fn variants_command(&self, json: bool, verbose: bool) -> Result<()> {
        if verbose {
            eprintln!("Listing presentational variants");
        }
        println!("{}", Self::variants_report(json)?.trim_end());
        Ok(())
    }

    /// Handle the validate command
    fn validate_command(&self, input: Option<PathBuf>, verbose: bool) -> Result<()> {
        let content = self.read_input(input)?;
        if verbose {
            eprintln!("Read {} bytes of input", content.len());
        }

        let kind = match self.orchestrator.detect_diagram_type(&content) {
            Ok(kind) => kind,
            Err(e) => {
                println!("✗ Could not detect input kind");
                return Err(e);
            }
        };
        if verbose {
            eprintln!("Detected input kind: {}", kind);
        }

        match self.orchestrator.load(&content) {
            Ok(_) => {
                println!("✓ Valid {}", kind);
                Ok(())
            }
            Err(e) => {
                println!("✗ Invalid {}: {}", kind, e);
                Err(e)
            }
        }
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

    #[cfg(test)]
    pub fn orchestrator(&self) -> &Orchestrator {
        &self.orchestrator
    }
}

fn names<T: ToString>(items: &[T]) -> Vec<String> {
    items.iter().map(ToString::to_string).collect()
}

impl Default for BlueprintApp {
    fn default() -> Self {
        Self::new()
    }
}
