//! mdocx CLI - Markdown resume to Word converter

mod tailor;

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{ArgAction, Args, Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use mdocx::{ConversionStats, ConvertOptions, JsonFormat, ParseOptions, RenderOptions, StyleTheme};
use tailor::files::{self, MARKDOWN_DIR};
use tailor::llm::{ChatClient, DEFAULT_BASE_URL, DEFAULT_MODEL};
use tailor::prompt::{build_prompt, PromptSettings, HEADER_FILE};
use tailor::TailorError;

#[derive(Parser)]
#[command(name = "mdocx")]
#[command(version)]
#[command(about = "Tailor Markdown resumes and convert them to Word documents", long_about = None)]
struct Cli {
    /// Input Markdown file
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,

    /// Output .docx file
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    #[command(flatten)]
    style: StyleArgs,

    /// Show debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Options shared by every command that writes a document.
#[derive(Args, Clone)]
struct StyleArgs {
    /// Folder the .docx is saved in (created if missing)
    #[arg(long, value_name = "DIR")]
    path: Option<PathBuf>,

    /// Settings folder holding header.txt and the prompt files
    #[arg(long, value_name = "DIR", env = "MDOCX_SETTINGS", default_value = "settings")]
    settings: PathBuf,

    /// Page header line (overrides settings/header.txt)
    #[arg(long, value_name = "TEXT")]
    header: Option<String>,

    /// Do not add a page header
    #[arg(long, conflicts_with = "header")]
    no_header: bool,

    /// Theme JSON file
    #[arg(long, value_name = "FILE")]
    theme: Option<PathBuf>,

    /// Reject tables with rows that do not match the header width
    #[arg(long)]
    strict: bool,

    /// Apply bold, italic and links inside table cells
    #[arg(long)]
    table_formatting: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert Markdown to .docx
    Convert {
        /// Input Markdown file
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output .docx file
        #[arg(value_name = "OUTPUT")]
        output: Option<PathBuf>,

        #[command(flatten)]
        style: StyleArgs,
    },

    /// Tailor a resume to a job listing and convert it to .docx
    Tailor {
        #[command(flatten)]
        args: TailorArgs,

        #[command(flatten)]
        style: StyleArgs,
    },

    /// Print the parsed document as JSON
    Json {
        /// Input Markdown file
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Print the document as plain text
    Text {
        /// Input Markdown file
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Show document information
    Info {
        /// Input Markdown file
        #[arg(value_name = "INPUT")]
        input: PathBuf,
    },

    /// Show version information
    Version,
}

#[derive(Args, Clone)]
struct TailorArgs {
    /// URL of the job listing
    #[arg(long)]
    job_url: String,

    /// Source Markdown resume
    #[arg(long, value_name = "FILE")]
    resume: PathBuf,

    /// Tailored Markdown output (random name in markdown_resumes/ if omitted)
    #[arg(long, value_name = "FILE")]
    output_md: Option<PathBuf>,

    /// Converted .docx output (random name in exported_resumes/ if omitted)
    #[arg(long, value_name = "FILE")]
    output_docx: Option<PathBuf>,

    /// Model used for tailoring
    #[arg(long, default_value = DEFAULT_MODEL)]
    model: String,

    /// Favor the baseline resume with minimal changes
    #[arg(long, default_value_t = true, action = ArgAction::Set, value_name = "BOOL")]
    moderate: bool,

    /// API key for the chat-completions endpoint
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Base URL of the chat-completions endpoint
    #[arg(long, env = "OPENAI_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,
}

fn main() {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter)).init();

    let result = match cli.command {
        Some(Commands::Convert { input, output, style }) => cmd_convert(&input, output.as_deref(), &style),
        Some(Commands::Tailor { args, style }) => cmd_tailor(&args, &style, cli.verbose),
        Some(Commands::Json {
            input,
            output,
            compact,
        }) => cmd_json(&input, output.as_deref(), compact),
        Some(Commands::Text { input, output }) => cmd_text(&input, output.as_deref()),
        Some(Commands::Info { input }) => cmd_info(&input),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: convert if input is provided
            if let Some(input) = cli.input {
                cmd_convert(&input, cli.output.as_deref(), &cli.style)
            } else {
                println!("{}", "Usage: mdocx <INPUT> <OUTPUT> [--path DIR]".yellow());
                println!("       mdocx --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

/// Build conversion options from the shared flags.
fn convert_options(style: &StyleArgs) -> Result<ConvertOptions, Box<dyn std::error::Error>> {
    let mut parse = ParseOptions::new();
    if style.strict {
        parse = parse.strict();
    }

    let mut render = RenderOptions::new().with_table_inline_formatting(style.table_formatting);
    if let Some(header) = page_header(style)? {
        render = render.with_page_header(header);
    }

    let theme = match &style.theme {
        Some(path) => StyleTheme::from_file(path)?,
        None => StyleTheme::default(),
    };

    let mut options = ConvertOptions::new()
        .with_parse_options(parse)
        .with_render_options(render)
        .with_theme(theme);
    if let Some(dir) = &style.path {
        options = options.with_output_dir(dir);
    }
    Ok(options)
}

/// Page header text from `--header` or the settings folder.
fn page_header(style: &StyleArgs) -> Result<Option<String>, Box<dyn std::error::Error>> {
    if style.no_header {
        return Ok(None);
    }
    if let Some(header) = &style.header {
        return Ok(Some(header.clone()));
    }
    let path = style.settings.join(HEADER_FILE);
    if !path.is_file() {
        log::debug!("no page header: {} not found", path.display());
        return Ok(None);
    }
    Ok(Some(fs::read_to_string(&path)?.trim().to_string()))
}

fn cmd_convert(input: &Path, output: Option<&Path>, style: &StyleArgs) -> Result<(), Box<dyn std::error::Error>> {
    let output = match output {
        Some(path) => path.to_path_buf(),
        None => {
            let stem = input.file_stem().unwrap_or_default().to_string_lossy();
            PathBuf::from(format!("{}.docx", stem))
        }
    };

    let options = convert_options(style)?;
    let written = mdocx::convert_file(input, &output, &options)?;
    println!("{} {}", "Saved formatted resume to".green(), written.display());
    Ok(())
}

fn cmd_tailor(args: &TailorArgs, style: &StyleArgs, verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let (output_md, written) = run_tailor(args, style, verbose, Path::new(MARKDOWN_DIR))?;
    println!("{} {}", "Tailored resume saved to".green(), output_md.display());
    println!("{} {}", "Saved formatted resume to".green(), written.display());
    Ok(())
}

/// Backup, fetch, prompt, model call and conversion. Returns the tailored
/// Markdown path and the written `.docx` path.
fn run_tailor(
    args: &TailorArgs,
    style: &StyleArgs,
    verbose: bool,
    markdown_dir: &Path,
) -> Result<(PathBuf, PathBuf), Box<dyn std::error::Error>> {
    let api_key = args.api_key.clone().ok_or(TailorError::MissingApiKey)?;
    if !args.resume.is_file() {
        return Err(mdocx::Error::InputNotFound(args.resume.clone()).into());
    }
    let settings = PromptSettings::load(&style.settings, args.moderate)?;
    let options = convert_options(style)?;

    let output_md = args
        .output_md
        .clone()
        .unwrap_or_else(|| PathBuf::from(files::default_markdown_name()));
    let output_md = files::place_in(markdown_dir, &output_md)?;
    let output_docx = args
        .output_docx
        .clone()
        .unwrap_or_else(|| PathBuf::from(files::default_docx_name()));

    let backup = files::backup_resume(&args.resume, markdown_dir)?;
    if verbose {
        println!("Backup of original resume saved as {}", backup.display());
    }
    let resume_md = fs::read_to_string(&args.resume)?;

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.enable_steady_tick(Duration::from_millis(100));

    let rt = tokio::runtime::Runtime::new()?;

    pb.set_message("Fetching job details...");
    let http = reqwest::Client::new();
    let job_details = rt.block_on(tailor::job::fetch_job_details(&http, &args.job_url))?;
    if verbose {
        pb.suspend(|| {
            println!("\n--- JOB DETAILS ---");
            println!("{}", job_details);
            println!("-------------------\n");
        });
    }

    let today = chrono::Local::now().date_naive();
    let prompt = build_prompt(&settings, today, &job_details, &resume_md);
    if verbose {
        pb.suspend(|| {
            println!("\n--- FULL PROMPT ---");
            println!("{}", prompt);
            println!("-------------------\n");
        });
    }

    pb.set_message(format!("Tailoring the resume with {}...", args.model));
    let client = ChatClient::new(api_key, args.base_url.as_str())?;
    let tailored = rt.block_on(client.complete(&args.model, &prompt))?;
    fs::write(&output_md, &tailored)?;

    pb.set_message("Converting the tailored resume to .docx...");
    let written = mdocx::convert_file(&output_md, &output_docx, &options)?;
    pb.finish_and_clear();

    Ok((output_md, written))
}

fn cmd_json(input: &Path, output: Option<&Path>, compact: bool) -> Result<(), Box<dyn std::error::Error>> {
    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    let json = mdocx::to_json(input, format)?;

    if let Some(path) = output {
        fs::write(path, &json)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", json);
    }

    Ok(())
}

fn cmd_text(input: &Path, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let text = mdocx::extract_text(input)?;

    if let Some(path) = output {
        fs::write(path, &text)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", text);
    }

    Ok(())
}

fn cmd_info(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let doc = mdocx::parse_file(input)?;
    let stats = ConversionStats::from_document(&doc);

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    if let Some(ref title) = doc.metadata.title {
        println!("{}: {}", "Title".bold(), title);
    }

    println!();
    println!("{}", "Content Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "Blocks".bold(), stats.block_count());
    println!("{}: {}", "Headings".bold(), stats.heading_count);
    println!("{}: {}", "Paragraphs".bold(), stats.paragraph_count);
    println!("{}: {}", "Bullets".bold(), stats.list_item_count);
    println!("{}: {} ({} rows)", "Tables".bold(), stats.table_count, stats.table_row_count);
    println!("{}: {}", "Rules".bold(), stats.horizontal_rule_count);
    println!("{}: {}", "Links".bold(), stats.link_count);
    println!("{}: {}", "Words".bold(), stats.word_count);
    println!("{}: {}", "Characters".bold(), stats.char_count);

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "mdocx".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Markdown resume to Word converter");
    println!();
    println!("License: MIT");
}
