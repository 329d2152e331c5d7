use std::path::Path;
use std::process::ExitCode;
use std::time::Duration;

use gen4ids::{IdResult, SearchError, SearchParameters, Settings};
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};

const APP_NAME: &str = "gen4ids";
const POLL_INTERVAL: Duration = Duration::from_secs(1);

const USAGE: &str = "\
usage: gen4ids [--min DELAY] [--max DELAY] [--tid IDS] [--sid IDS] [--infinite] [--verbose]

DELAY bounds are a half-open range: --min 600 --max 601 searches delay 600
only, and equal bounds search nothing. --infinite ignores both and searches
every 32-bit seed.

IDS is a comma-separated list. Values given here replace the ones saved by the
previous run; omitted values are reused.";

struct Args {
    min_delay: Option<String>,
    max_delay: Option<String>,
    tid:       Option<String>,
    sid:       Option<String>,
    infinite:  bool,
    verbose:   bool,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Args, SearchError> {
    let mut parsed = Args {
        min_delay: None,
        max_delay: None,
        tid:       None,
        sid:       None,
        infinite:  false,
        verbose:   false,
    };

    while let Some(arg) = args.next() {
        let mut value = |name: &str| {
            args.next()
                .ok_or_else(|| SearchError::InvalidArgument(format!("{name} needs a value")))
        };
        match arg.as_str() {
            "--min" => parsed.min_delay = Some(value("--min")?),
            "--max" => parsed.max_delay = Some(value("--max")?),
            // Settings keep one ID per line
            "--tid" => parsed.tid = Some(value("--tid")?.replace(',', "\n")),
            "--sid" => parsed.sid = Some(value("--sid")?.replace(',', "\n")),
            "--infinite" => parsed.infinite = true,
            "--verbose" | "-v" => parsed.verbose = true,
            other => {
                return Err(SearchError::InvalidArgument(format!("unknown argument '{other}'")))
            }
        }
    }
    Ok(parsed)
}

fn main() -> ExitCode {
    let args = match parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{e}\n\n{USAGE}");
            return ExitCode::FAILURE;
        }
    };

    let level = if args.verbose { LevelFilter::Debug } else { LevelFilter::Info };
    if let Err(e) = TermLogger::init(level, Config::default(), TerminalMode::Mixed, ColorChoice::Auto) {
        eprintln!("could not initialise logging: {e}");
    }

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", describe(&e));
            ExitCode::FAILURE
        }
    }
}

fn describe(e: &SearchError) -> String {
    match e.path() {
        Some(path) => format!("{e}: {}", path.display()),
        None => e.to_string(),
    }
}

fn run(args: Args) -> Result<(), SearchError> {
    let settings_path = match Settings::default_path(APP_NAME) {
        Ok(path) => Some(path),
        Err(e) => {
            log::warn!("Settings will not be saved: {}", describe(&e));
            None
        }
    };
    let mut settings = match &settings_path {
        Some(path) => Settings::load_from(path).unwrap_or_else(|e| {
            log::warn!("Ignoring unreadable settings: {}", describe(&e));
            Settings::default()
        }),
        None => Settings::default(),
    };

    if let Some(v) = args.min_delay {
        settings.min_delay = v;
    }
    if let Some(v) = args.max_delay {
        settings.max_delay = v;
    }
    if let Some(v) = args.tid {
        settings.tid = v;
    }
    if let Some(v) = args.sid {
        settings.sid = v;
    }

    let outcome = search(&settings, args.infinite);

    // Saved on the way out whatever the outcome, so rejected input can be
    // fixed next time
    if let Some(path) = &settings_path {
        save_settings(&settings, path);
    }
    outcome
}

/// Write `settings`, logging instead of failing. Returns whether it worked.
fn save_settings(settings: &Settings, path: &Path) -> bool {
    match settings.save_to(path) {
        Ok(()) => true,
        Err(e) => {
            log::warn!("Could not save settings: {}", describe(&e));
            false
        }
    }
}

fn search(settings: &Settings, infinite: bool) -> Result<(), SearchError> {
    let params = SearchParameters::from_text(
        &settings.tid,
        &settings.sid,
        &settings.min_delay,
        &settings.max_delay,
        infinite,
    )?;

    log::info!(
        "Searching {:?} for {} seeds",
        params.space,
        params.max_progress()
    );

    let handle = gen4ids::search().parameters(params).start()?;
    handle.watch(POLL_INTERVAL, |snap| {
        log::info!(
            "{:6.2}% ({} / {}), {} matches",
            snap.percent(),
            snap.progress,
            snap.max_progress,
            snap.results.len()
        );
    });
    let results = handle.wait()?;

    print_results(&results.results);
    log::info!(
        "{} matches, {} seeds in {:.2}s ({} seeds/s)",
        results.results.len(),
        results.stats.seeds,
        results.stats.duration.as_secs_f64(),
        results.stats.seeds_per_sec
    );
    Ok(())
}

fn print_results(results: &[IdResult]) {
    println!("{:>10}  {:>5}  {:>5}  {:>6}  {:>4}", "Seed", "TID", "SID", "Delay", "TSV");
    for r in results {
        println!(
            "{:>10}  {:>5}  {:>5}  {:>6}  {:>4}",
            format!("{:08X}", r.seed),
            r.tid,
            r.sid,
            r.delay,
            r.tsv()
        );
    }
}
