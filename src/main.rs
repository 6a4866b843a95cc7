use std::collections::BTreeSet;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing_subscriber::EnvFilter;

mod config;
mod error;
mod gemini;
mod options;
mod session;
mod summary;
mod title;
mod video;

use gemini::{GeminiClient, GeminiConfig};
use session::{Session, Stage};
use title::OembedClient;

#[derive(Parser)]
#[command(name = "tubesum", version, about = "Summarize YouTube videos with an AI model")]
struct Cli {
    /// Suppress non-essential output
    #[arg(long, global = true)]
    quiet: bool,

    /// Path to a tubesum.json config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum RenderFormat {
    Terminal,
    Html,
    Page,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a summary Markdown file
    Render {
        /// Path to the Markdown file (`-` for stdin)
        file: String,

        /// Output format
        #[arg(long, value_enum, default_value = "terminal")]
        format: RenderFormat,

        /// Page title for `--format page`
        #[arg(long)]
        title: Option<String>,
    },

    /// Print the video id of a YouTube URL
    Id {
        url: String,
    },

    /// List the available summary options
    Options {
        /// Print the catalog as JSON
        #[arg(long)]
        json: bool,
    },

    /// Look up the title of a YouTube video
    Title {
        url: String,
    },

    /// Summarize a YouTube video
    Summarize {
        url: String,

        /// Summary option ids (repeat or comma-separate); prompts when omitted
        #[arg(short = 'o', long = "option", value_delimiter = ',')]
        options: Vec<u32>,

        /// Focus topic for the "Specific Topic" option
        #[arg(long)]
        topic: Option<String>,

        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,

        /// Output format
        #[arg(long, value_enum, default_value = "terminal")]
        format: RenderFormat,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.quiet);

    match cli.command {
        Commands::Render {
            file,
            format,
            title,
        } => {
            handle_render(&file, format, title)?;
        }
        Commands::Id { url } => {
            handle_id(&url);
        }
        Commands::Options { json } => {
            handle_options(json)?;
        }
        Commands::Title { url } => {
            let config = config::load_config(cli.config.as_deref())?;
            handle_title(&url, &config).await?;
        }
        Commands::Summarize {
            url,
            options,
            topic,
            yes,
            format,
        } => {
            let config = config::load_config(cli.config.as_deref())?;
            let opts = SummarizeOpts {
                options,
                topic,
                yes,
                format,
                quiet: cli.quiet,
            };
            handle_summarize(&url, &opts, &config).await?;
        }
    }

    Ok(())
}

fn init_logging(quiet: bool) {
    let default_level = if quiet { "error" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn format_output(markdown: &str, format: RenderFormat, page: tubesum_md::PageConfig) -> String {
    let blocks = tubesum_md::render(markdown);
    match format {
        RenderFormat::Terminal => tubesum_md::render_term::to_terminal(&blocks),
        RenderFormat::Html => tubesum_md::render_html::to_html(&blocks),
        RenderFormat::Page => tubesum_md::render_html::to_html_page(&blocks, &page),
        RenderFormat::Json => {
            serde_json::to_string_pretty(&blocks).unwrap_or_else(|_| "[]".to_string())
        }
    }
}

fn handle_render(file: &str, format: RenderFormat, title: Option<String>) -> Result<()> {
    let content = if file == "-" {
        std::io::read_to_string(std::io::stdin()).context("Failed to read stdin")?
    } else {
        std::fs::read_to_string(file).map_err(|e| anyhow::anyhow!("Failed to read '{}': {}", file, e))?
    };

    let page = tubesum_md::PageConfig {
        title,
        ..Default::default()
    };
    println!("{}", format_output(&content, format, page));
    Ok(())
}

fn handle_id(url: &str) {
    match video::extract_id(url) {
        Some(id) => println!("{id}"),
        None => {
            eprintln!("{} {}", "error:".red().bold(), session::INVALID_URL_MESSAGE);
            std::process::exit(1);
        }
    }
}

fn handle_options(json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&options::SUMMARY_OPTIONS[..])?);
        return Ok(());
    }

    for (category, opts) in options::by_category() {
        println!("{}", category.label().to_uppercase().dimmed().bold());
        for opt in opts {
            let input_hint = if opt.requires_input {
                format!(" {}", "(asks for a topic)".dimmed())
            } else {
                String::new()
            };
            println!(
                "  {:>2}  {} {}{input_hint}",
                opt.id,
                opt.label.bold(),
                opt.description.dimmed()
            );
        }
        println!();
    }
    Ok(())
}

fn build_clients(config: &config::TubesumConfig) -> Result<(OembedClient, GeminiClient)> {
    let oembed = OembedClient::new(&config.oembed_base_url, Duration::from_secs(config.timeout_secs))
        .context("Failed to build oEmbed client")?;
    let gemini = GeminiClient::new(GeminiConfig::from_env(config)?)?;
    Ok((oembed, gemini))
}

async fn handle_title(url: &str, config: &config::TubesumConfig) -> Result<()> {
    let (oembed, gemini) = build_clients(config)?;
    let title = title::fetch_title(url, &oembed, &gemini).await?;
    println!("{title}");
    Ok(())
}

/// Options passed from CLI to the summarize flow.
struct SummarizeOpts {
    options: Vec<u32>,
    topic: Option<String>,
    yes: bool,
    format: RenderFormat,
    quiet: bool,
}

async fn handle_summarize(url: &str, opts: &SummarizeOpts, config: &config::TubesumConfig) -> Result<()> {
    let mut session = Session::new();

    let canonical = match session.submit_url(url) {
        Ok(canonical) => canonical,
        Err(_) => {
            eprintln!("{} {}", "error:".red().bold(), session::INVALID_URL_MESSAGE);
            std::process::exit(1);
        }
    };

    let (oembed, gemini) = build_clients(config)?;

    if !opts.quiet {
        eprintln!("{} {}", "Looking up".green().bold(), canonical);
    }
    match title::fetch_title(&canonical, &oembed, &gemini).await {
        Ok(title) => session.title_found(title)?,
        Err(e) => {
            session.lookup_failed();
            tracing::debug!(error = %e, "title lookup failed");
            anyhow::bail!(session.error().unwrap_or(session::LOOKUP_FAILED_MESSAGE));
        }
    }

    let video = session.video().cloned().context("video missing after lookup")?;
    if !opts.quiet {
        eprintln!("{} {}", "Video:".bold(), video.title);
        eprintln!("       {}", video::thumbnail_url(&video.id).dimmed());
    }
    if !opts.yes && !prompt_yes_no("Is this the right video?", true)? {
        session.cancel();
        eprintln!("{}", "Cancelled.".yellow());
        return Ok(());
    }
    session.confirm()?;

    let mut first_pass = true;
    loop {
        let chosen = if first_pass && !opts.options.is_empty() {
            opts.options.clone()
        } else {
            prompt_options()?
        };
        apply_selection(&mut session, &chosen)?;

        if session.proceed()? == Stage::TopicInput {
            let topic = match (&opts.topic, session.topic()) {
                (Some(t), _) if first_pass => t.clone(),
                (_, Some(current)) => {
                    let answer = prompt_line(&format!("Which topic should the summary focus on? [{current}]"))?;
                    topic_or_current(&answer, current)
                }
                _ => prompt_line("Which topic should the summary focus on?")?,
            };
            session.submit_topic(&topic)?;
        }
        tracing::debug!(stage = %session.stage(), selected = ?session.selected(), "options chosen");

        if !opts.quiet {
            eprintln!("{} \"{}\"...", "Summarizing".green().bold(), video.title);
        }
        let request = session.summary_request().context("no summary request while generating")?;
        let generated = summary::generate_summary(&gemini, &request).await;
        let markdown = match generated {
            Ok(markdown) => markdown,
            Err(e) => {
                session.generation_failed();
                tracing::debug!(error = %e, "summary generation failed");
                anyhow::bail!(session.error().unwrap_or(session::GENERATION_FAILED_MESSAGE));
            }
        };
        session.summary_ready(markdown)?;

        let page = tubesum_md::PageConfig {
            title: Some(video.title.clone()),
            source_url: Some(video.url.clone()),
            ..Default::default()
        };
        println!("{}", format_output(session.summary().unwrap_or_default(), opts.format, page));

        // `--yes` runs unattended: one pass only.
        if opts.yes || !prompt_yes_no("Summarize again with different options?", false)? {
            break;
        }
        session.resummarize()?;
        first_pass = false;
    }
    Ok(())
}

/// Make the session's selection exactly `chosen`.
fn apply_selection(session: &mut Session, chosen: &[u32]) -> Result<()> {
    for &id in chosen {
        if options::find(id).is_none() {
            anyhow::bail!("Unknown summary option {id}; run `tubesum options` to list them");
        }
    }
    let stale: Vec<u32> = session
        .selected()
        .iter()
        .copied()
        .filter(|id| !chosen.contains(id))
        .collect();
    for id in stale.into_iter().chain(chosen.iter().copied()) {
        if chosen.contains(&id) == session.selected().contains(&id) {
            continue;
        }
        session.toggle_option(id)?;
    }
    Ok(())
}

/// An empty answer keeps the topic from the previous pass.
fn topic_or_current(answer: &str, current: &str) -> String {
    if answer.trim().is_empty() {
        current.to_string()
    } else {
        answer.to_string()
    }
}

fn prompt_line(question: &str) -> Result<String> {
    eprint!("{} ", question.bold());
    std::io::stderr().flush()?;
    let mut answer = String::new();
    std::io::stdin().lock().read_line(&mut answer)?;
    Ok(answer.trim().to_string())
}

fn prompt_yes_no(question: &str, default: bool) -> Result<bool> {
    let hint = if default { "[Y/n]" } else { "[y/N]" };
    let answer = prompt_line(&format!("{question} {hint}"))?;
    if answer.is_empty() {
        return Ok(default);
    }
    Ok(answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes"))
}

fn prompt_options() -> Result<Vec<u32>> {
    handle_options(false)?;
    let answer = prompt_line("Option ids (comma-separated):")?;
    parse_option_list(&answer)
}

fn parse_option_list(input: &str) -> Result<Vec<u32>> {
    let ids: BTreeSet<u32> = input
        .split([',', ' '])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<u32>().with_context(|| format!("'{s}' is not an option id")))
        .collect::<Result<_>>()?;
    Ok(ids.into_iter().collect())
}
