//! doclines CLI - selective text extraction tool

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;

use doclines::{
    CleanupOptions, CleanupPreset, ExtractionStats, JsonFormat, ReadConfig, ReaderRegistry,
    Selector, TextCleaner,
};

#[derive(Parser)]
#[command(name = "doclines")]
#[command(version)]
#[command(about = "Read selected pages and lines from documents as clean text", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract selected text
    Text {
        /// Input document
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        #[command(flatten)]
        selection: SelectionArgs,

        /// Text cleanup preset
        #[arg(long, value_enum)]
        cleanup: Option<CleanupLevel>,
    },

    /// Extract selected text as JSON (pages, lines, metadata)
    Json {
        /// Input document
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        #[command(flatten)]
        selection: SelectionArgs,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Show document information
    Info {
        /// Input document
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Clean a text file (or stdin) for LLM input
    Clean {
        /// Input text file (stdin if not specified or "-")
        #[arg(value_name = "FILE")]
        input: Option<PathBuf>,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Text cleanup preset
        #[arg(long, value_enum, default_value = "standard")]
        cleanup: CleanupLevel,

        /// Maximum consecutive blank lines (negative = unlimited)
        #[arg(long, allow_negative_numbers = true)]
        max_blank_lines: Option<i32>,
    },

    /// List supported formats
    Formats,

    /// Show version information
    Version,
}

/// Page and line selection flags.
#[derive(Args, Debug, Default)]
struct SelectionArgs {
    /// Pages, sheets or slides to read, zero-based (e.g., "0,2,4-6")
    #[arg(long, value_name = "SEL")]
    pages: Option<String>,

    /// Lines to read on every page, zero-based (e.g., "0-9")
    #[arg(long, value_name = "SEL")]
    lines: Option<String>,

    /// Lines for one page, as PAGE:SEL (e.g., "1:0-4"); repeatable
    #[arg(long = "page-lines", value_name = "PAGE:SEL")]
    page_lines: Vec<String>,

    /// Sheet names to read (spreadsheets); repeatable
    #[arg(long = "sheet", value_name = "NAME")]
    sheets: Vec<String>,

    /// JSON read configuration; flags are applied on top of it
    #[arg(long, value_name = "FILE", env = "DOCLINES_CONFIG")]
    config: Option<PathBuf>,
}

impl SelectionArgs {
    fn to_config(&self) -> Result<ReadConfig, Box<dyn std::error::Error>> {
        let mut config = match &self.config {
            Some(path) => ReadConfig::from_json_file(path)?,
            None => ReadConfig::new(),
        };

        if let Some(pages) = &self.pages {
            config = config.with_page_selector(Selector::parse(pages)?);
        }
        if let Some(lines) = &self.lines {
            config = config.with_line_selector(Selector::parse(lines)?);
        }
        for arg in &self.page_lines {
            let (page, selector) = parse_page_lines(arg)?;
            config = config.add_page_override(page, selector);
        }
        if !self.sheets.is_empty() {
            config = config.with_sheet_names(self.sheets.iter().cloned());
        }

        log::debug!("read config: {:?}", config);
        Ok(config)
    }
}

/// Parse `PAGE:SEL` into a page override.
fn parse_page_lines(arg: &str) -> Result<(i64, Selector), Box<dyn std::error::Error>> {
    let (page, lines) = arg
        .split_once(':')
        .ok_or_else(|| format!("Invalid page lines '{}': expected PAGE:SEL", arg))?;
    let page: i64 = page
        .trim()
        .parse()
        .map_err(|_| format!("Invalid page index in '{}'", arg))?;
    Ok((page, Selector::parse(lines)?))
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum CleanupLevel {
    /// Minimal cleanup (whitespace only, blank lines kept)
    Minimal,
    /// Standard cleanup (default)
    Standard,
    /// Aggressive cleanup (no blank lines)
    Aggressive,
}

impl From<CleanupLevel> for CleanupPreset {
    fn from(level: CleanupLevel) -> Self {
        match level {
            CleanupLevel::Minimal => CleanupPreset::Minimal,
            CleanupLevel::Standard => CleanupPreset::Standard,
            CleanupLevel::Aggressive => CleanupPreset::Aggressive,
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let registry = ReaderRegistry::with_defaults();

    let result = match cli.command {
        Commands::Text {
            input,
            output,
            selection,
            cleanup,
        } => cmd_text(&registry, &input, output.as_deref(), &selection, cleanup),
        Commands::Json {
            input,
            output,
            selection,
            compact,
        } => cmd_json(&registry, &input, output.as_deref(), &selection, compact),
        Commands::Info { input } => cmd_info(&registry, &input),
        Commands::Clean {
            input,
            output,
            cleanup,
            max_blank_lines,
        } => cmd_clean(input.as_deref(), output.as_deref(), cleanup, max_blank_lines),
        Commands::Formats => {
            cmd_formats(&registry);
            Ok(())
        }
        Commands::Version => {
            cmd_version();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn write_output(output: Option<&Path>, content: &str) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(path) = output {
        fs::write(path, content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

fn cmd_text(
    registry: &ReaderRegistry,
    input: &Path,
    output: Option<&Path>,
    selection: &SelectionArgs,
    cleanup: Option<CleanupLevel>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = selection.to_config()?;
    let result = registry.read_with_config(input, &config)?;

    let options = cleanup.map(|level| CleanupOptions::from_preset(level.into()));
    let text = doclines::render::to_text(&result, options.as_ref());

    write_output(output, &text)
}

fn cmd_json(
    registry: &ReaderRegistry,
    input: &Path,
    output: Option<&Path>,
    selection: &SelectionArgs,
    compact: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = selection.to_config()?;
    let result = registry.read_with_config(input, &config)?;

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    let json = doclines::render::to_json(&result, format)?;
    write_output(output, &json)
}

fn cmd_info(registry: &ReaderRegistry, input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let result = registry.read_with_config(input, &ReadConfig::default())?;

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    if let Some(format) = result.metadata.get("format") {
        println!("{}: {}", "Format".bold(), format);
    }
    println!("{}: {}", "Pages".bold(), result.total_pages);

    for (key, value) in &result.metadata {
        if key == "format" {
            continue;
        }
        println!("{}: {}", key.bold(), value);
    }

    println!();
    println!("{}", "Content Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    let stats = ExtractionStats::from_result(&result);
    println!("{}: {}", "Lines".bold(), stats.line_count);
    println!("{}: {}", "Blank lines".bold(), stats.blank_line_count);
    println!("{}: {}", "Words".bold(), stats.word_count);
    println!("{}: {}", "Characters".bold(), stats.char_count);

    if let Some(names) = page_names(&result) {
        println!("{}: {}", "Page names".bold(), names);
    }

    log::debug!("stats: {}", serde_json::to_string(&stats)?);
    Ok(())
}

fn page_names(result: &doclines::DocumentResult) -> Option<String> {
    let names: Vec<&str> = result
        .pages
        .iter()
        .filter_map(|p| p.page_name.as_deref())
        .collect();
    (!names.is_empty()).then(|| names.join(", "))
}

fn cmd_clean(
    input: Option<&Path>,
    output: Option<&Path>,
    cleanup: CleanupLevel,
    max_blank_lines: Option<i32>,
) -> Result<(), Box<dyn std::error::Error>> {
    let text = match input {
        Some(path) if path != Path::new("-") => fs::read_to_string(path)?,
        _ => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };

    let mut options = CleanupOptions::from_preset(cleanup.into());
    if let Some(max) = max_blank_lines {
        options = options.with_max_blank_lines(max);
    }

    let cleaned = TextCleaner::new(options).clean(&text);
    write_output(output, &cleaned)
}

fn cmd_formats(registry: &ReaderRegistry) {
    println!("{}", "Supported formats".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    for ext in registry.supported_extensions() {
        let reader = registry
            .get_by_extension(ext)
            .map(|r| r.name().to_string())
            .unwrap_or_default();
        println!("  {:<10} {}", ext.bold(), reader.dimmed());
    }
}

fn cmd_version() {
    println!("{} {}", "doclines".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Selective text extraction from PDF, office and text documents");
    println!();
    println!("License: MIT");
}
