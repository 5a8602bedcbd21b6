//! KNMI weather data manager.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};

use knmi_data::{setup_logging, CommonCmdLineArgs, DataMode, Fetcher, StationCode, Store};

fn main() {
    if let Err(ref e) = run() {
        eprintln!("error: {}", e);

        for cause in e.chain().skip(1) {
            eprintln!("caused by: {}", cause);
        }

        ::std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let (common_args, matches) = CommonCmdLineArgs::matches(app())?;
    setup_logging(common_args.log_level())?;

    match matches.subcommand() {
        Some(("create", sub_args)) => create(&common_args, sub_args)?,
        Some(("download-and-import", sub_args)) => download_and_import(&common_args, sub_args)?,
        Some(("reset", sub_args)) => reset(&common_args, sub_args)?,
        Some(("export", sub_args)) => export(&common_args, sub_args)?,
        Some(("reset-stations", sub_args)) => reset_stations(&common_args, sub_args)?,
        Some(("stations", _)) => stations(&common_args)?,
        Some(("measurements", sub_args)) => measurements(&common_args, sub_args)?,
        _ => unreachable!(),
    }

    Ok(())
}

fn app() -> Command {
    CommonCmdLineArgs::new_app("knmi", "Download, store, and export KNMI weather data.")
        .subcommand_required(true)
        .subcommand(
            Command::new("create")
                .about("Create a new store. Ignores all global options except --root.")
                .arg(
                    Arg::new("force")
                        .long("force")
                        .action(ArgAction::SetTrue)
                        .help("Overwrite any existing store at `root`."),
                ),
        )
        .subcommand(
            Command::new("download-and-import")
                .about("Download the latest data and replace the stored measurements with it.")
                .arg(mode_arg())
                .args(period_args()),
        )
        .subcommand(
            Command::new("reset")
                .about("Replace the stored measurements with a previously downloaded file.")
                .arg(mode_arg())
                .arg(
                    Arg::new("download")
                        .long("download")
                        .action(ArgAction::SetTrue)
                        .help("Download a fresh copy of the file first."),
                )
                .args(period_args()),
        )
        .subcommand(
            Command::new("export")
                .about("Export measurements joined with their stations to a csv file.")
                .arg(mode_arg())
                .arg(
                    Arg::new("output")
                        .short('o')
                        .long("output")
                        .value_parser(value_parser!(PathBuf))
                        .help("File to write, defaults to the export file in the data directory."),
                ),
        )
        .subcommand(
            Command::new("reset-stations")
                .about("Replace the station registry with the stations in a reference file.")
                .arg(
                    Arg::new("file")
                        .short('f')
                        .long("file")
                        .value_parser(value_parser!(PathBuf))
                        .help("Station file, defaults to the stations file in the data directory."),
                ),
        )
        .subcommand(Command::new("stations").about("List the stations in the store."))
        .subcommand(
            Command::new("measurements")
                .about("List the measurements in the store.")
                .arg(
                    Arg::new("station")
                        .short('s')
                        .long("station")
                        .value_parser(value_parser!(u16))
                        .help("Only list measurements for this station code."),
                ),
        )
}

fn mode_arg() -> Arg {
    Arg::new("mode")
        .index(1)
        .required(true)
        .help("Either 'hour' or 'day'.")
}

fn period_args() -> [Arg; 2] {
    [
        Arg::new("start")
            .long("start")
            .help("First period to download, YYYYMMDD or YYYYMMDDHH."),
        Arg::new("end")
            .long("end")
            .help("Last period to download, YYYYMMDD or YYYYMMDDHH."),
    ]
}

fn mode(sub_args: &ArgMatches) -> Result<DataMode> {
    // Required argument, clap rejects the command line without it.
    let name = sub_args
        .get_one::<String>("mode")
        .map(String::as_str)
        .unwrap_or_default();

    Ok(DataMode::from_name(name)?)
}

fn download(
    common_args: &CommonCmdLineArgs,
    store: &Store,
    mode: DataMode,
    sub_args: &ArgMatches,
) -> Result<PathBuf> {
    let fetcher = Fetcher::new(common_args.config().clone(), &store.data_root());

    let start = sub_args.get_one::<String>("start").map(String::as_str);
    let end = sub_args.get_one::<String>("end").map(String::as_str);

    Ok(fetcher.fetch(mode, start, end)?)
}

fn create(common_args: &CommonCmdLineArgs, sub_args: &ArgMatches) -> Result<()> {
    // Check if the store already exists. (try connecting to it)
    let already_exists: bool = Store::connect(&common_args.root()).is_ok();

    if already_exists && sub_args.get_flag("force") {
        ::std::fs::remove_file(common_args.root().join(Store::DB_FILE))?;
    } else if already_exists {
        bail!("Store already exists, must use --force to overwrite.");
    }

    let store = Store::create(&common_args.root())?;
    println!("Created a new store in {}", store.root().display());

    Ok(())
}

fn download_and_import(common_args: &CommonCmdLineArgs, sub_args: &ArgMatches) -> Result<()> {
    let mode = mode(sub_args)?;
    mode.ensure_importable()?;

    let mut store = Store::connect(&common_args.root())?;
    let path = download(common_args, &store, mode, sub_args)?;

    let count = store.import_measurements_file(mode, &path)?;
    println!("Imported {} measurements {}.", count, mode);

    Ok(())
}

fn reset(common_args: &CommonCmdLineArgs, sub_args: &ArgMatches) -> Result<()> {
    let mode = mode(sub_args)?;
    mode.ensure_importable()?;

    let mut store = Store::connect(&common_args.root())?;

    let path = if sub_args.get_flag("download") {
        download(common_args, &store, mode, sub_args)?
    } else {
        store.data_root().join(mode.file_name())
    };

    let count = store
        .import_measurements_file(mode, &path)
        .with_context(|| format!("importing {}", path.display()))?;
    println!("Imported {} measurements {}.", count, mode);

    Ok(())
}

fn export(common_args: &CommonCmdLineArgs, sub_args: &ArgMatches) -> Result<()> {
    let mode = mode(sub_args)?;
    mode.ensure_importable()?;

    let store = Store::connect(&common_args.root())?;
    let path = sub_args
        .get_one::<PathBuf>("output")
        .cloned()
        .unwrap_or_else(|| store.data_root().join(&common_args.config().export_file));

    let count = store.export(&path)?;
    println!("Exported {} measurements to {}.", count, path.display());

    Ok(())
}

fn reset_stations(common_args: &CommonCmdLineArgs, sub_args: &ArgMatches) -> Result<()> {
    let mut store = Store::connect(&common_args.root())?;
    let path = sub_args
        .get_one::<PathBuf>("file")
        .cloned()
        .unwrap_or_else(|| store.data_root().join(&common_args.config().stations_file));

    let count = store
        .import_stations_file(&path)
        .with_context(|| format!("importing {}", path.display()))?;
    println!("Imported {} stations.", count);

    Ok(())
}

fn stations(common_args: &CommonCmdLineArgs) -> Result<()> {
    let store = Store::connect(&common_args.root())?;
    let stations = store.stations()?;

    if stations.is_empty() {
        println!("No stations in the store.");
        return Ok(());
    }

    println!(
        "{:>4} {:<32} {:>8} {:>8} {:>8}",
        "CODE", "NAME", "LAT", "LON", "ALT"
    );
    for stn in &stations {
        println!(
            "{:>4} {:<32} {:>8} {:>8} {:>8}",
            stn.code, stn.name, stn.latitude, stn.longitude, stn.altitude
        );
    }
    println!("{} stations.", stations.len());

    Ok(())
}

fn measurements(common_args: &CommonCmdLineArgs, sub_args: &ArgMatches) -> Result<()> {
    let store = Store::connect(&common_args.root())?;

    let measurements = match sub_args.get_one::<u16>("station") {
        Some(&code) => store.measurements_for_station(StationCode::new(code))?,
        None => store.measurements()?,
    };

    if measurements.is_empty() {
        println!("No measurements matched criteria.");
        return Ok(());
    }

    let blank = "-".to_owned();

    println!(
        "{:>4} {:^10} {:>4} {:>8} {:>8}",
        "STN", "DAY", "HOUR", "PRECIP", "SUN"
    );
    for m in &measurements {
        let precip = m
            .precipitation
            .map(|p| p.to_string())
            .unwrap_or_else(|| blank.clone());
        let sun = m
            .sunshine
            .map(|s| s.to_string())
            .unwrap_or_else(|| blank.clone());
        println!(
            "{:>4} {:^10} {:>4} {:>8} {:>8}",
            m.station, m.day, m.hour, precip, sun
        );
    }
    println!("{} measurements.", measurements.len());

    Ok(())
}
