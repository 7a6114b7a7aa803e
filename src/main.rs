use anyhow::Result;
use clap::{Arg, ArgAction, Command};
use rotate_wallpaper::{
    apply_wallpapers, ensure_output_dir, select_wallpapers, AppConfig, CancelToken,
    ListingSource, RedditClient, SelectionConfig, SelectionReport, TimePeriod,
};
use std::path::PathBuf;
use tracing::{info, warn, Level};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let matches = Command::new("rotate-wallpaper")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Rotate desktop wallpapers with images from reddit")
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::Count)
                .help("Increase log verbosity for each occurrence"),
        )
        .arg(
            Arg::new("min-width")
                .short('W')
                .long("min-width")
                .value_name("PIXELS")
                .help("Minimum width of image to accept")
                .default_value("1920"),
        )
        .arg(
            Arg::new("min-height")
                .short('H')
                .long("min-height")
                .value_name("PIXELS")
                .help("Minimum height of image to accept")
                .default_value("1080"),
        )
        .arg(
            Arg::new("time")
                .short('t')
                .long("time")
                .value_name("PERIOD")
                .help("Time window to list top images from (hour, day, week, month, year)")
                .default_value("all"),
        )
        .arg(
            Arg::new("random")
                .short('r')
                .long("random")
                .action(ArgAction::SetTrue)
                .help("Pick random submissions instead of the top listing (may be slower)"),
        )
        .arg(
            Arg::new("screens")
                .short('s')
                .long("screens")
                .value_name("COUNT")
                .help("Number of screens to fetch images for")
                .default_value("3"),
        )
        .arg(
            Arg::new("output-dir")
                .value_name("DIR")
                .required(true)
                .help("Directory to write the wallpapers to"),
        )
        .arg(
            Arg::new("subreddit")
                .value_name("SUBREDDIT")
                .required(true)
                .num_args(1..)
                .help("Subreddits to pull images from, combined into one query"),
        )
        .get_matches();

    // Initialize configuration from command line arguments
    let config = create_app_config(&matches)?;

    // Initialize logging
    initialize_logging(config.verbosity)?;

    // Run the application
    run_application(config).await
}

/// Pure function to create application configuration from CLI arguments
fn create_app_config(matches: &clap::ArgMatches) -> Result<AppConfig> {
    let min_width: u32 = matches
        .get_one::<String>("min-width")
        .unwrap()
        .parse()
        .map_err(|_| anyhow::anyhow!("Invalid min-width value"))?;

    let min_height: u32 = matches
        .get_one::<String>("min-height")
        .unwrap()
        .parse()
        .map_err(|_| anyhow::anyhow!("Invalid min-height value"))?;

    let screens: usize = matches
        .get_one::<String>("screens")
        .unwrap()
        .parse()
        .map_err(|_| anyhow::anyhow!("Invalid screens value"))?;

    let time_period: TimePeriod = matches.get_one::<String>("time").unwrap().parse()?;

    let output_dir = PathBuf::from(matches.get_one::<String>("output-dir").unwrap());

    let subreddits: Vec<String> = matches
        .get_many::<String>("subreddit")
        .unwrap()
        .cloned()
        .collect();

    Ok(AppConfig {
        selection: SelectionConfig {
            output_dir,
            min_width,
            min_height,
            screens,
        },
        time_period,
        random: matches.get_flag("random"),
        subreddits,
        verbosity: matches.get_count("verbose"),
    })
}

/// Initialize structured logging with tracing, level derived from the -v count
fn initialize_logging(verbosity: u8) -> Result<()> {
    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let filter = EnvFilter::from_default_env()
        .add_directive(level.into())
        .add_directive("reqwest=warn".parse()?)
        .add_directive("hyper=warn".parse()?)
        .add_directive("rustls=warn".parse()?);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();

    Ok(())
}

/// Main application logic
async fn run_application(config: AppConfig) -> Result<()> {
    let subreddits = config.combined_subreddits();
    info!("Using subreddits {}", subreddits);

    ensure_output_dir(&config.selection.output_dir)?;

    let client = RedditClient::new()?;

    let source = if config.random {
        info!("Using random listing");
        // Ctrl-C cancels the random retry loop. The top listing never
        // consults the token, so the handler is armed only here and top mode
        // keeps the default SIGINT termination.
        let cancel = CancelToken::new();
        cancel.cancel_on_ctrl_c();
        ListingSource::random(&client, subreddits, cancel)
    } else {
        ListingSource::top(&client, &subreddits, config.time_period).await?
    };

    let report = select_wallpapers(source, &client, &config.selection).await?;
    print_selection_report(&report);

    apply_wallpapers();

    Ok(())
}

/// Print the selection report through the logger
fn print_selection_report(report: &SelectionReport) {
    info!("=== WALLPAPER REPORT ===");
    info!("Wallpapers requested: {}", report.requested);
    info!("Wallpapers copied: {}", report.copied());

    for wallpaper in &report.wallpapers {
        info!(
            "  {} ({}x{}) -> {}",
            wallpaper.url,
            wallpaper.width,
            wallpaper.height,
            wallpaper.destination.display()
        );
    }

    if !report.is_complete() {
        warn!(
            "Listing ran out after {} of {} wallpapers",
            report.copied(),
            report.requested
        );
    }
}
