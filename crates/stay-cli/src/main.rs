//! `stay` CLI — check venue availability and derive calendar data from Holidaze
//! booking payloads.
//!
//! ## Usage
//!
//! ```sh
//! # Is June 15-20 free? (bookings JSON on stdin, any API shape)
//! curl -s "$API/holidaze/venues/$ID?_bookings=true" | stay check --from 2024-06-15 --to 2024-06-20
//!
//! # Dates the date picker should disable
//! stay blocked -i venue.json
//! stay blocked -i venue.json --dates
//!
//! # Open stretches of at least 3 nights in June
//! stay open -i venue.json --from 2024-06-01 --to 2024-07-01 --min-nights 3
//!
//! # Display status of each booking
//! stay status -i bookings.json --today 2024-06-12
//!
//! # Typeahead over a venue list; one query per stdin line
//! printf 'bea\nbeach\n' | stay suggest --venues venues.json
//!
//! # Per-user favourites in a local store file
//! stay favorites --store favs.json --user alice toggle venue-123
//! ```

mod config;

use std::io::{self, BufRead, Read};
use std::path::PathBuf;
use std::process;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::json;
use stay_engine::envelope::windows_from_records;
use stay_engine::store::{Favorites, FileStore, UserScope};
use stay_engine::suggest::{rank_suggestions, RateLimiter};
use stay_engine::{
    blocked_dates, check_availability, decode_bookings, decode_venues, derive_blocked_ranges,
    find_first_open_window, find_open_windows, infer_status, parse_calendar_date, BookingWindow,
    CalendarDate,
};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::StayConfig;

/// Exit status for `check --strict` when the dates are taken.
const EXIT_UNAVAILABLE: i32 = 2;

#[derive(Parser)]
#[command(
    name = "stay",
    version,
    about = "Venue availability and booking-calendar tool"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (defaults to ./stay.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Check whether a stay conflicts with existing bookings
    Check {
        /// Check-in date (inclusive)
        #[arg(long)]
        from: String,
        /// Check-out date (exclusive)
        #[arg(long)]
        to: String,
        /// Bookings JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Exit with status 2 when the dates are unavailable
        #[arg(long)]
        strict: bool,
    },
    /// List blocked ranges for a date picker
    Blocked {
        /// Bookings JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Emit individual dates instead of ranges
        #[arg(long)]
        dates: bool,
    },
    /// Find open stretches between bookings
    Open {
        /// Start of the search window
        #[arg(long)]
        from: String,
        /// End of the search window (exclusive)
        #[arg(long)]
        to: String,
        /// Only report stretches of at least this many nights
        #[arg(long, default_value_t = 1)]
        min_nights: i64,
        /// Report only the first matching stretch
        #[arg(long)]
        first: bool,
        /// Bookings JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
    /// Show the display status of each booking
    Status {
        /// Reference date (defaults to today in UTC)
        #[arg(long)]
        today: Option<String>,
        /// Bookings JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
    /// Rank venues for typeahead queries
    Suggest {
        /// Venue list JSON file
        #[arg(long)]
        venues: String,
        /// Query to rank (reads one query per stdin line if omitted)
        #[arg(short, long)]
        query: Option<String>,
        /// Maximum suggestions per query (overrides config)
        #[arg(long)]
        limit: Option<usize>,
        /// Client key used for rate limiting
        #[arg(long, default_value = "cli")]
        client: String,
    },
    /// Manage a user's favourite venues
    Favorites {
        /// Store file
        #[arg(long)]
        store: PathBuf,
        /// User the favourites belong to
        #[arg(long)]
        user: String,
        #[command(subcommand)]
        action: FavoriteAction,
    },
}

#[derive(Subcommand)]
enum FavoriteAction {
    /// Print the user's favourites
    List,
    /// Add a venue
    Add { venue_id: String },
    /// Remove a venue
    Remove { venue_id: String },
    /// Add the venue if absent, remove it if present
    Toggle { venue_id: String },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StatusRow {
    id: Option<String>,
    date_from: CalendarDate,
    date_to: CalendarDate,
    status: stay_engine::BookingStatus,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = StayConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    init_logging(cli.verbose, &config.log_level);
    debug!(?config, "configuration loaded");

    match cli.command {
        Commands::Check {
            from,
            to,
            input,
            strict,
        } => {
            let records = read_bookings(input.as_deref())?;
            let verdict = check_availability(&from, &to, &records)
                .with_context(|| format!("Cannot check stay {} to {}", from, to))?;
            info!(available = verdict.available, "availability checked");
            print_json(&verdict)?;
            if strict && !verdict.available {
                process::exit(EXIT_UNAVAILABLE);
            }
        }
        Commands::Blocked { input, dates } => {
            let windows = read_windows(input.as_deref())?;
            if dates {
                print_json(&blocked_dates(&windows))?;
            } else {
                let ranges: Vec<_> = derive_blocked_ranges(&windows).collect();
                print_json(&ranges)?;
            }
        }
        Commands::Open {
            from,
            to,
            min_nights,
            first,
            input,
        } => {
            let windows = read_windows(input.as_deref())?;
            let window_from = parse_date_arg("--from", &from)?;
            let window_to = parse_date_arg("--to", &to)?;
            if first {
                let open = find_first_open_window(&windows, window_from, window_to, min_nights);
                print_json(&open)?;
            } else {
                let open: Vec<_> = find_open_windows(&windows, window_from, window_to)
                    .into_iter()
                    .filter(|w| w.nights >= min_nights)
                    .collect();
                print_json(&open)?;
            }
        }
        Commands::Status { today, input } => {
            let today = match today {
                Some(raw) => parse_date_arg("--today", &raw)?,
                None => CalendarDate::from(Utc::now().date_naive()),
            };
            let records = read_bookings(input.as_deref())?;
            let rows = records
                .iter()
                .map(|r| {
                    let window = r.window().with_context(|| {
                        format!("Invalid booking {}", r.id.as_deref().unwrap_or("<no id>"))
                    })?;
                    Ok(StatusRow {
                        id: r.id.clone(),
                        date_from: window.date_from(),
                        date_to: window.date_to(),
                        status: infer_status(&window, r.status.as_deref(), today),
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            print_json(&rows)?;
        }
        Commands::Suggest {
            venues,
            query,
            limit,
            client,
        } => {
            let raw = read_input(Some(venues.as_str()))?;
            let venues = decode_venues(&raw).context("Failed to decode venue list")?;
            let limit = limit.unwrap_or(config.suggest.limit);

            let queries: Vec<String> = match query {
                Some(q) => vec![q],
                None => io::stdin()
                    .lock()
                    .lines()
                    .collect::<io::Result<Vec<_>>>()
                    .context("Failed to read queries from stdin")?,
            };

            let mut limiter = RateLimiter::new(
                config.suggest.max_requests,
                Duration::from_secs(config.suggest.window_secs),
            );
            let mut results = Vec::with_capacity(queries.len());
            for q in queries {
                let now = Instant::now();
                limiter.prune(now);
                match limiter.check(&client, now) {
                    Ok(()) => results.push(json!({
                        "query": q,
                        "suggestions": rank_suggestions(&q, &venues, limit),
                    })),
                    Err(retry) => {
                        warn!(client = %client, query = %q, "typeahead rate limit exceeded");
                        results.push(json!({
                            "query": q,
                            "rateLimited": true,
                            "retryAfterMs": retry.0.as_millis() as u64,
                        }));
                    }
                }
            }
            print_json(&results)?;
        }
        Commands::Favorites {
            store,
            user,
            action,
        } => {
            let scope = UserScope::new(user);
            let store = FileStore::open(&store)
                .with_context(|| format!("Failed to open store: {}", store.display()))?;
            let mut favorites = Favorites::new(store);

            match action {
                FavoriteAction::List => {}
                FavoriteAction::Add { venue_id } => favorites.add(&scope, &venue_id)?,
                FavoriteAction::Remove { venue_id } => favorites.remove(&scope, &venue_id)?,
                FavoriteAction::Toggle { venue_id } => {
                    let now = favorites.toggle(&scope, &venue_id)?;
                    info!(venue = %venue_id, favorite = now, "favourite toggled");
                }
            }
            print_json(&favorites.list(&scope)?)?;
        }
    }

    Ok(())
}

/// Install the stderr subscriber. `RUST_LOG` wins, then `-v`, then config.
fn init_logging(verbose: u8, configured: &str) {
    let fallback = match verbose {
        0 => configured.to_string(),
        1 => "info".to_string(),
        2 => "debug".to_string(),
        _ => "trace".to_string(),
    };
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&fallback))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn parse_date_arg(flag: &str, raw: &str) -> Result<CalendarDate> {
    parse_calendar_date(raw).with_context(|| format!("Invalid {} date", flag))
}

fn read_bookings(path: Option<&str>) -> Result<Vec<stay_engine::BookingRecord>> {
    let raw = read_input(path)?;
    decode_bookings(&raw).context("Failed to decode bookings")
}

fn read_windows(path: Option<&str>) -> Result<Vec<BookingWindow>> {
    let records = read_bookings(path)?;
    windows_from_records(&records).context("Invalid booking in input")
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let pretty = serde_json::to_string_pretty(value)?;
    println!("{}", pretty);
    Ok(())
}
