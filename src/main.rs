use clap::{ArgAction, Parser, Subcommand};
use geosort::geocode::NominatimClient;
use geosort::sort::{self, SortOptions};
use geosort::{config, output};
use std::path::PathBuf;

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "geosort")]
#[command(about = "Sort photos into folders by where they were taken")]
#[command(long_about = "\
Sort photos into folders by where they were taken

Every .jpg, .jpeg and .png directly inside the input directory that has an
EXIF GPS position is looked up on OpenStreetMap Nominatim and moved to

  sorted_images/<country>/<state>/<state_district>/<county>/<file>

Spaces in place names become underscores; missing levels are 'Unknown'.
Images without GPS data are reported and left where they are.

Example:

  images/
  ├── trip.jpg          → sorted_images/United_States/California/Unknown/San_Francisco_County/trip.jpg
  ├── nogps.png         (stays, 'No GPS data found for nogps.png')
  └── note.txt          (ignored)

Settings are read from ./geosort.toml when present.
Run 'geosort gen-config' to generate a documented geosort.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Config file (default: ./geosort.toml if it exists)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Root of the destination tree (overrides output_dir)
    #[arg(long, global = true)]
    output: Option<PathBuf>,

    /// More log output on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Move geotagged images into the place-named tree (the default)
    Sort {
        /// Directory holding the images
        #[arg(default_value = "images")]
        input: PathBuf,
    },
    /// List the GPS position of every image without moving anything
    Check {
        /// Directory holding the images
        #[arg(default_value = "images")]
        input: PathBuf,
    },
    /// Print a stock geosort.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let command = cli.command.unwrap_or(Command::Sort {
        input: PathBuf::from("images"),
    });
    let load = || config::load_config(cli.config.as_deref(), cli_overrides(cli.output.as_ref()));

    match command {
        Command::Sort { input } => {
            let config = load()?;
            log::debug!("effective config: {config:?}");
            let geocoder = NominatimClient::new(&config.geocoder)?;
            let options = SortOptions::from_config(&config);

            let (tx, rx) = std::sync::mpsc::channel();
            let printer = std::thread::spawn(move || {
                for event in rx {
                    output::print_sort_event(&event);
                }
            });
            let result = sort::sort_directory(&input, &geocoder, &options, Some(tx));
            printer.join().map_err(|_| "output thread panicked")?;
            let report = result?;
            log::info!("{}", output::format_sort_summary(&report));
        }
        Command::Check { input } => {
            let config = load()?;
            let entries = sort::check_directory(&input, config.case_sensitive_extensions)?;
            output::print_check_output(&entries);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Map `-v` occurrences onto a log level. `RUST_LOG` still wins when set.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

/// Command-line flags as a TOML table layered over the config file.
fn cli_overrides(output: Option<&PathBuf>) -> Option<toml::Value> {
    let output = output?;
    let mut table = toml::map::Map::new();
    table.insert(
        "output_dir".into(),
        toml::Value::String(output.to_string_lossy().into_owned()),
    );
    Some(toml::Value::Table(table))
}
