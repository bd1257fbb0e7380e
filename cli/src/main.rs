use std::fs::File;
use std::io::{stdout, BufWriter, Write};

use anyhow::{anyhow, bail, Context, Result};
use clap::ArgMatches;
use log::info;
use serde_json::json;

use crate::cli::{get_int_arg, parse_dump_options, parse_repeat_options};
use repkmer::serialization::{
    write_counts, write_family_kmers, write_histogram, write_report, KMERS_EXT, REPORT_EXT,
};
use repkmer::statistics::counts_histogram;
use repkmer::tandem::{canonical_repeat, expected_kmers, minimal_period};
use repkmer::{find_repeats, open_counts_file, open_dump_file};

mod cli;

fn output_to<F>(output_fn: F, output: Option<&str>, extension: &str) -> Result<()>
where
    F: Fn(&mut dyn Write) -> Result<()>,
{
    match output {
        None => {
            let mut out = stdout();
            output_fn(&mut out)?;
        }
        Some(o) => {
            // if the filename doesn't have the right extension
            // add it on
            let filename = String::from(o);
            let out_filename = if filename.ends_with(extension) {
                filename
            } else {
                filename + extension
            };

            let mut out = BufWriter::new(
                File::create(&out_filename)
                    .context(format!("unable to create '{}'", out_filename))?,
            );
            output_fn(&mut out)?;
            out.flush()?;
        }
    };
    Ok(())
}

fn init_logging(verbose: bool) {
    let log_level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

fn run() -> Result<()> {
    let matches = cli::build_cli().get_matches();
    let verbose = matches
        .subcommand()
        .1
        .map_or(false, |m| m.is_present("verbose"));
    init_logging(verbose);

    match matches.subcommand() {
        ("dump", Some(matches)) => run_dump(matches)?,
        ("find", Some(matches)) => run_find(matches)?,
        ("hist", Some(matches)) => {
            let filename = matches
                .value_of("counts")
                .ok_or_else(|| anyhow!("Bad counts"))?;
            let counts = open_counts_file(filename)
                .with_context(|| format!("unable to read counts from '{}'", filename))?;
            let histogram = counts_histogram(&counts);

            output_to(
                |writer| {
                    write_histogram(writer, &histogram)?;
                    Ok(())
                },
                matches.value_of("output_file"),
                ".json",
            )?;
        }
        ("unit", Some(matches)) => {
            let seq = matches.value_of("SEQ").ok_or_else(|| anyhow!("Bad SEQ"))?;
            let kmer_length: usize = get_int_arg(matches, "kmer_length")?;

            let (frame, unit) = minimal_period(seq);
            let canonical = canonical_repeat(unit)?;
            let expected: Vec<String> = if kmer_length > canonical.len() {
                expected_kmers(&canonical, kmer_length, true)?
                    .into_iter()
                    .collect()
            } else {
                Vec::new()
            };
            let info = json!({
                "frame": frame,
                "unit": unit,
                "canonical": canonical,
                "kmerLength": kmer_length,
                "expected": expected,
            });
            output_to(
                |writer| {
                    serde_json::to_writer_pretty(&mut *writer, &info)?;
                    writeln!(writer)?;
                    Ok(())
                },
                None,
                ".json",
            )?;
        }
        other => bail!("Unknown subcommand: {:?}", other.0),
    };

    Ok(())
}

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {:?}", err);
        std::process::exit(1);
    }
}

fn run_dump(matches: &ArgMatches) -> Result<()> {
    let filename = matches
        .value_of("INPUT")
        .ok_or_else(|| anyhow!("Bad INPUT"))?;
    let params = parse_dump_options(matches)?;

    let (histogram, counts) = open_dump_file(filename, &params)
        .with_context(|| format!("unable to parse dump '{}'", filename))?;

    output_to(
        |writer| {
            write_histogram(writer, &histogram)?;
            Ok(())
        },
        matches.value_of("histo"),
        ".json",
    )?;
    output_to(
        |writer| {
            write_counts(writer, &counts)?;
            Ok(())
        },
        matches.value_of("output_file"),
        ".json",
    )?;
    Ok(())
}

fn run_find(matches: &ArgMatches) -> Result<()> {
    let filename = matches
        .value_of("counts")
        .ok_or_else(|| anyhow!("Bad counts"))?;
    let prefix = matches
        .value_of("output_prefix")
        .ok_or_else(|| anyhow!("Bad output"))?;
    let params = parse_repeat_options(matches)?;

    let counts = open_counts_file(filename)
        .with_context(|| format!("unable to read counts from '{}'", filename))?;
    let summary = find_repeats(&counts, &params)?;

    let report_filename = format!("{}{}", prefix, REPORT_EXT);
    info!("Writing output to file {}", report_filename);
    output_to(
        |writer| {
            write_report(writer, &summary.families)?;
            Ok(())
        },
        Some(report_filename.as_str()),
        REPORT_EXT,
    )?;

    let kmers_filename = format!("{}{}", prefix, KMERS_EXT);
    info!("Writing output to file {}", kmers_filename);
    output_to(
        |writer| {
            write_family_kmers(writer, &summary.families)?;
            Ok(())
        },
        Some(kmers_filename.as_str()),
        KMERS_EXT,
    )?;
    Ok(())
}
