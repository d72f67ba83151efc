use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use marquee_core::store::record_file_name;
use marquee_core::{
    FetchConfig, JsonStore, MovieFilter, MovieIndex, Theater, TheaterList, TheaterListing, WebSource,
    default_config_path, default_theaters, load_theater_configs,
};
use owo_colors::OwoColorize;
use tracing_subscriber::EnvFilter;

mod echo;
mod prompt;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// List the movies now playing across a set of theaters
#[derive(Parser, Debug)]
#[command(name = "marquee")]
#[command(version)]
#[command(about = "List the movies now playing across a set of theaters", long_about = None)]
struct Args {
    /// Only list titles containing one of these strings (case-sensitive)
    #[arg(value_name = "INTEREST")]
    interests: Vec<String>,

    /// Prompt for interest strings before searching
    #[arg(short, long)]
    interactive: bool,

    /// Theater configuration file (default: ~/.config/marquee/theaters.json, then built-in theaters)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Restore theaters from records written by --save-dir
    #[arg(long, value_name = "DIR", conflicts_with = "config")]
    load_dir: Option<PathBuf>,

    /// Save every theater's state after the run
    #[arg(long, value_name = "DIR")]
    save_dir: Option<PathBuf>,

    /// Print each theater's titles instead of the combined listing
    #[arg(long)]
    by_theater: bool,

    /// HTTP timeout in seconds
    #[arg(long, default_value = "30", value_name = "SECS")]
    timeout: u64,

    /// Custom User-Agent for HTTP requests
    #[arg(long, value_name = "UA")]
    user_agent: Option<String>,

    /// Generate shell completion script
    #[arg(long, value_name = "SHELL", value_enum)]
    completions: Option<Shell>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let default_directive = if verbose { "marquee=debug,marquee_core=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn load_theaters(args: &Args) -> anyhow::Result<TheaterList> {
    if let Some(dir) = &args.load_dir {
        return load_saved_theaters(dir);
    }

    let configs = match &args.config {
        Some(path) => load_theater_configs(path).with_context(|| format!("Failed to load {}", path.display()))?,
        None => match default_config_path().filter(|path| path.exists()) {
            Some(path) => {
                tracing::debug!(path = %path.display(), "using default configuration file");
                load_theater_configs(&path).with_context(|| format!("Failed to load {}", path.display()))?
            }
            None => default_theaters(),
        },
    };

    TheaterList::from_configs(configs).context("Invalid theater configuration")
}

/// Saved records are named `NNNN-theater-name.json`, so sorting restores list order.
fn load_saved_theaters(dir: &Path) -> anyhow::Result<TheaterList> {
    let mut paths: Vec<PathBuf> = fs::read_dir(dir)
        .with_context(|| format!("Failed to read directory: {}", dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
        .collect();
    paths.sort();

    let mut theaters = TheaterList::default();
    for path in paths {
        let theater =
            Theater::load(&JsonStore, &path).with_context(|| format!("Failed to load theater: {}", path.display()))?;
        theaters.add_theater(theater);
    }
    Ok(theaters)
}

/// Zero padded so lexical order matches list order.
fn saved_record_path(dir: &Path, position: usize, name: &str) -> PathBuf {
    dir.join(format!("{:04}-{}", position + 1, record_file_name(name)))
}

fn save_theaters(theaters: &TheaterList, dir: &Path) -> anyhow::Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("Failed to create directory: {}", dir.display()))?;

    for (position, theater) in theaters.iter().enumerate() {
        let path = saved_record_path(dir, position, theater.name());
        theater
            .save(&JsonStore, &path)
            .with_context(|| format!("Failed to save theater: {}", path.display()))?;
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if let Some(shell) = args.completions {
        clap_complete::generate(shell, &mut Args::command(), "marquee", &mut io::stdout());
        return Ok(());
    }

    init_tracing(args.verbose);

    if args.verbose {
        echo::print_banner();
        echo::print_info("Debug logging enabled");
        eprintln!();
    }

    let mut filter: MovieFilter = args.interests.iter().cloned().collect();
    if args.interactive {
        let entered = prompt::read_interests(io::stdin().lock(), &mut io::stderr(), prompt::MAX_PROMPTS)
            .context("Failed to read movie interests")?;
        filter.extend(entered);
    }

    if args.verbose {
        echo::print_step(1, 3, "Loading theaters");
    }

    let mut theaters = load_theaters(&args)?;
    theaters.set_movie_filter(&filter);

    if args.verbose {
        eprintln!(
            "  {} {}",
            "Theaters:".dimmed(),
            theaters.list_theaters().join(", ").bright_white()
        );
        if !filter.is_empty() {
            eprintln!(
                "  {} {}",
                "Interests:".dimmed(),
                filter.iter().collect::<Vec<_>>().join(", ").bright_white()
            );
        }
        eprintln!();
        echo::print_step(2, 3, "Collecting movie lists");
    }

    let fetch_config = FetchConfig {
        timeout: args.timeout,
        user_agent: args.user_agent.clone().unwrap_or_else(|| FetchConfig::default().user_agent),
    };
    let source = WebSource::new(fetch_config).context("Failed to start HTTP client")?;

    let started = Instant::now();
    let mut timings: Vec<(String, Duration)> = Vec::new();
    let mut listings: Vec<TheaterListing> = Vec::new();

    for theater in &mut theaters {
        let theater_name = theater.name().to_string();
        let theater_started = Instant::now();

        match theater.movies(&source) {
            Ok([]) => {
                echo::print_warning(&format!("{} returned no movies -- check configuration.", theater_name));
            }
            Ok(movies) => {
                listings.push(TheaterListing { theater_name: theater_name.clone(), movies: movies.to_vec() });
            }
            Err(e) => {
                echo::print_error(&format!("{}: {}", theater_name, e));
            }
        }

        timings.push((theater_name, theater_started.elapsed()));
    }

    if args.verbose {
        eprintln!();
        echo::print_timing_summary(started.elapsed(), &timings);
        echo::print_step(3, 3, "Writing output");
    }

    if args.by_theater {
        println!();
        for listing in &listings {
            println!("{}\n", listing);
        }
    } else {
        print!("{}", MovieIndex::from_listings(&listings));
    }

    if let Some(dir) = &args.save_dir {
        save_theaters(&theaters, dir)?;
        echo::print_success(&format!("Theaters saved to {}", dir.display().bright_white()));
    }

    Ok(())
}
