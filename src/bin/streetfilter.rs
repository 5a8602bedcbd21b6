//! Reduce a GeoJSON street network to its main roads.

use std::path::PathBuf;

use anyhow::Result;
use clap::{crate_authors, crate_version, value_parser, Arg, Command};
use log::LevelFilter;

use knmi_data::{filter_file, setup_logging};

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
    let matches = Command::new("streetfilter")
        .author(crate_authors!())
        .about("Keep only the main roads of a GeoJSON feature collection.")
        .version(crate_version!())
        .arg(
            Arg::new("input")
                .index(1)
                .required(true)
                .value_parser(value_parser!(PathBuf))
                .help("GeoJSON file with the full street network."),
        )
        .arg(
            Arg::new("output")
                .index(2)
                .required(true)
                .value_parser(value_parser!(PathBuf))
                .help("File to write the main roads to."),
        )
        .get_matches();

    setup_logging(LevelFilter::Info)?;

    // Both are required, clap exits before this point when either is missing.
    let (Some(input), Some(output)) = (
        matches.get_one::<PathBuf>("input"),
        matches.get_one::<PathBuf>("output"),
    ) else {
        unreachable!()
    };

    let count = filter_file(input, output)?;
    println!("Kept {} streets, written to {}.", count, output.display());

    Ok(())
}
