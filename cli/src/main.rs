//! unfooter CLI - remove footers from SVG charts and re-crop their height

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use unfooter::batch::{cropped_path, discover, run_batch_with, DEFAULT_SKIP_MARKER};
use unfooter::render::report_to_json;
use unfooter::trim::{DEFAULT_FOOTER_ID, DEFAULT_PADDING};
use unfooter::{
    BatchOptions, EntryStatus, HeightPolicy, JsonFormat, OutputMode, ParseOptions, TrimOptions,
    TrimReport, Unfooter,
};

#[derive(Parser)]
#[command(name = "unfooter")]
#[command(version)]
#[command(about = "Remove footers from SVG charts and re-crop their height", long_about = None)]
struct Cli {
    /// Input SVG file
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output file (defaults to "<stem> (cropped).svg")
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    #[command(flatten)]
    trim: TrimArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Trim the footer from one SVG file
    Trim {
        /// Input SVG file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (defaults to "<stem> (cropped).svg"; may equal FILE)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        #[command(flatten)]
        trim: TrimArgs,
    },

    /// Trim every SVG file in a directory
    Batch {
        /// Input directory
        #[arg(value_name = "DIR")]
        input: PathBuf,

        /// Output directory (defaults to writing next to each input)
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        /// Descend into sub-directories
        #[arg(short, long)]
        recursive: bool,

        /// Process files one at a time
        #[arg(long)]
        sequential: bool,

        /// Skip files whose name contains MARKER (repeatable)
        #[arg(long, value_name = "MARKER", default_value = DEFAULT_SKIP_MARKER)]
        skip: Vec<String>,

        #[command(flatten)]
        trim: TrimArgs,
    },

    /// Show what trimming would do without writing anything
    Inspect {
        /// Input SVG file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        #[command(flatten)]
        trim: TrimArgs,
    },

    /// Show version information
    Version,
}

#[derive(Args, Clone)]
struct TrimArgs {
    /// Id of the footer element
    #[arg(long, env = "UNFOOTER_FOOTER_ID", default_value = DEFAULT_FOOTER_ID)]
    footer_id: String,

    /// Space kept below the lowest remaining element
    #[arg(long, env = "UNFOOTER_PADDING", default_value_t = DEFAULT_PADDING)]
    padding: f64,

    /// Look for the footer at any depth, not only among the root's children
    #[arg(long)]
    any_depth: bool,

    /// How the new height is rounded
    #[arg(long, value_enum, default_value = "ceil")]
    height_policy: HeightMode,

    /// Write an XML declaration at the top of the output
    #[arg(long)]
    xml_declaration: bool,

    /// Drop comments from the output
    #[arg(long)]
    strip_comments: bool,

    /// Print reports as JSON
    #[arg(long)]
    json: bool,
}

impl TrimArgs {
    fn trim_options(&self) -> TrimOptions {
        let mut options = TrimOptions::new()
            .with_footer_id(self.footer_id.clone())
            .with_padding(self.padding)
            .with_height_policy(self.height_policy.into());
        if self.any_depth {
            options = options.any_depth();
        }
        if self.xml_declaration {
            options = options.with_output_mode(OutputMode::Utf8WithDeclaration);
        }
        options
    }

    fn parse_options(&self) -> ParseOptions {
        ParseOptions::new().with_strip_comments(self.strip_comments)
    }

    fn unfooter(&self) -> Unfooter {
        let options = self.trim_options();
        let mut builder = Unfooter::new()
            .with_footer_id(options.footer_id)
            .with_padding(options.padding)
            .with_scan_depth(options.scan_depth)
            .with_height_policy(options.height_policy)
            .with_output_mode(options.output_mode);
        if self.strip_comments {
            builder = builder.strip_comments();
        }
        builder
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum HeightMode {
    /// Round up to a whole number (default)
    Ceil,
    /// Keep two decimal places
    Fixed,
}

impl From<HeightMode> for HeightPolicy {
    fn from(mode: HeightMode) -> Self {
        match mode {
            HeightMode::Ceil => HeightPolicy::Ceil,
            HeightMode::Fixed => HeightPolicy::Fixed2,
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Trim {
            input,
            output,
            trim,
        }) => cmd_trim(&input, output.as_deref(), &trim),
        Some(Commands::Batch {
            input,
            output,
            recursive,
            sequential,
            skip,
            trim,
        }) => cmd_batch(&input, output, recursive, sequential, skip, &trim),
        Some(Commands::Inspect { input, trim }) => cmd_inspect(&input, &trim),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: trim if input is provided
            if let Some(input) = cli.input {
                cmd_trim(&input, cli.output.as_deref(), &cli.trim)
            } else {
                println!("{}", "Usage: unfooter <FILE> [OUTPUT]".yellow());
                println!("       unfooter --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_trim(
    input: &Path,
    output: Option<&Path>,
    args: &TrimArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let output = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| cropped_path(input));

    let report = args.unfooter().trim_file(input, &output)?;

    if args.json {
        println!("{}", report_to_json(&report, JsonFormat::Pretty)?);
        return Ok(());
    }

    print_report(input, &report);
    if report.footer_found {
        println!("{} {}", "Saved to".green(), output.display());
    }

    Ok(())
}

fn cmd_batch(
    input: &Path,
    output: Option<PathBuf>,
    recursive: bool,
    sequential: bool,
    skip: Vec<String>,
    args: &TrimArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut options = BatchOptions::new()
        .with_trim_options(args.trim_options())
        .with_parse_options(args.parse_options())
        .with_recursive(recursive)
        .with_parallel(!sequential)
        .with_skip_markers(skip);
    if let Some(dir) = output {
        options = options.with_output_dir(dir);
    }

    let total = discover(input, &options)?.len();
    log::debug!("Discovered {} SVG file(s) in {}", total, input.display());
    let pb = ProgressBar::new(total as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    let report = run_batch_with(input, &options, |entry| {
        let name = entry.input.file_name().unwrap_or_default().to_string_lossy();
        pb.set_message(name.into_owned());
        pb.inc(1);
    })?;
    pb.finish_and_clear();

    if args.json {
        println!("{}", report_to_json(&report, JsonFormat::Pretty)?);
    } else {
        for entry in &report.entries {
            match entry.status() {
                EntryStatus::Trimmed => println!(
                    "  {} {} -> {}",
                    "├─".dimmed(),
                    entry.input.display(),
                    entry.output.display()
                ),
                EntryStatus::NotFound => println!(
                    "  {} {} {}",
                    "├─".dimmed(),
                    entry.input.display(),
                    "(no footer)".yellow()
                ),
                EntryStatus::Failed => println!(
                    "  {} {} {}",
                    "├─".dimmed(),
                    entry.input.display(),
                    entry.error.as_deref().unwrap_or("failed").red()
                ),
            }
        }

        println!(
            "\n{} {} trimmed, {} without footer, {} failed",
            "Done!".green().bold(),
            report.trimmed(),
            report.not_found(),
            report.failed()
        );
    }

    if report.failed() > 0 {
        return Err(format!("{} file(s) failed", report.failed()).into());
    }

    Ok(())
}

fn cmd_inspect(input: &Path, args: &TrimArgs) -> Result<(), Box<dyn std::error::Error>> {
    let inspection = args.unfooter().inspect_file(input)?;

    if args.json {
        println!("{}", report_to_json(&inspection, JsonFormat::Pretty)?);
        return Ok(());
    }

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Root".bold(), inspection.root);
    println!("{}: {}", "Elements".bold(), inspection.element_count);
    if let Some(ref width) = inspection.width {
        println!("{}: {}", "Width".bold(), width);
    }
    if let Some(ref height) = inspection.height {
        println!("{}: {}", "Height".bold(), height);
    }
    if let Some(ref view_box) = inspection.view_box {
        let note = if inspection.view_box_valid {
            String::new()
        } else {
            format!(" {}", "(not rewritable)".yellow())
        };
        println!("{}: {}{}", "viewBox".bold(), view_box, note);
    }

    println!();
    println!("{}", "Footer".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    let trim = &inspection.trim;
    println!("{}: {}", "Id".bold(), trim.footer_id);
    println!(
        "{}: {}",
        "Found".bold(),
        if trim.footer_found { "Yes" } else { "No" }
    );
    if trim.footer_found {
        println!("{}: {}", "Elements removed".bold(), trim.removed_count);
        if let Some(min_y) = trim.footer_min_y {
            println!("{}: {}", "Footer top".bold(), min_y);
        }
        if let Some(max_y) = trim.content_max_y {
            println!("{}: {}", "Content bottom".bold(), max_y);
        }
        if let Some(ref bottom) = trim.bottom_element {
            println!("{}: {}", "Lowest element".bold(), bottom);
        }
        println!(
            "{}: {}",
            "New height".bold(),
            trim.new_height.as_deref().unwrap_or("?")
        );
    }
    if trim.duplicate_footer_ids > 0 {
        println!(
            "{} {} more element(s) share id=\"{}\"",
            "Warning:".yellow().bold(),
            trim.duplicate_footer_ids,
            trim.footer_id
        );
    }

    Ok(())
}

fn print_report(input: &Path, report: &TrimReport) {
    if !report.footer_found {
        println!(
            "{} {}: {}; nothing written",
            "Warning:".yellow().bold(),
            input.display(),
            report.summary()
        );
        return;
    }

    println!("{} {}", "Trimmed".green().bold(), input.display());
    println!("  {} {}", "├─".dimmed(), report.summary());
    if let Some(max_y) = report.content_max_y {
        println!("  {} content bottom {}", "├─".dimmed(), max_y);
    }
    println!(
        "  {} viewBox {}",
        "└─".dimmed(),
        if report.viewbox_updated {
            "updated"
        } else {
            "unchanged"
        }
    );
    if report.duplicate_footer_ids > 0 {
        println!(
            "{} {} more element(s) share id=\"{}\"",
            "Warning:".yellow().bold(),
            report.duplicate_footer_ids,
            report.footer_id
        );
    }
}

fn cmd_version() {
    println!("{} {}", "unfooter".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("SVG footer trimming tool");
}
