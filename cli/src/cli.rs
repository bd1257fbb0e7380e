use anyhow::{anyhow, bail, Result};
use clap::{crate_authors, crate_version, App, AppSettings, Arg, ArgMatches, SubCommand};
use log::warn;
use repkmer::filtering::DumpParams;
use repkmer::RepeatParams;
use std::str::FromStr;

pub fn build_cli() -> App<'static, 'static> {
    App::new("repkmer")
        .version(crate_version!())
        .author(crate_authors!())
        .about("Tool for finding tandem-repeat families in k-mer counts")
        .setting(AppSettings::VersionlessSubcommands)
        .setting(AppSettings::ArgRequiredElseHelp)
        .subcommand(dump_command())
        .subcommand(find_command())
        .subcommand(hist_command())
        .subcommand(unit_command())
}

fn dump_command() -> App<'static, 'static> {
    let mut dump_command = SubCommand::with_name("dump")
        .about("Read a k-mer count dump and drop low coverage k-mers")
        .arg(
            Arg::with_name("INPUT")
                .help("Dump file (`>count` headers followed by the k-mer)")
                .required(true),
        )
        .arg(
            Arg::with_name("cutoff")
                .long("cutoff")
                .help("K-mers need a count above this to be kept")
                .default_value("2")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("histo")
                .long("histo")
                .help("File to store the histogram of k-mer counts in")
                .default_value("counts_histo.json")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("output_file")
                .short("o")
                .long("output")
                .help("File to store the k-mers above the cutoff in")
                .default_value("counts_kmers.json")
                .takes_value(true),
        );
    dump_command = add_log_options(dump_command);
    dump_command
}

fn find_command() -> App<'static, 'static> {
    let mut find_command = SubCommand::with_name("find")
        .about("Identify tandem-repeat families from k-mer counts")
        .arg(
            Arg::with_name("counts")
                .short("c")
                .long("counts")
                .help("JSON file of counts per k-mer")
                .required(true)
                .takes_value(true),
        )
        .arg(
            Arg::with_name("output_prefix")
                .short("o")
                .long("output")
                .help("Prefix for the .report.tsv and .kmers.json output files")
                .default_value("repeat_info")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("max_zeroes")
                .long("maxzeroes")
                .help("Only report families with fewer zero-count expected k-mers than this")
                .default_value("1")
                .takes_value(true),
        );
    find_command = add_kmer_options(find_command);
    find_command = add_log_options(find_command);
    find_command
}

fn hist_command() -> App<'static, 'static> {
    let mut hist_command = SubCommand::with_name("hist")
        .about("Display the histogram of k-mer counts")
        .arg(
            Arg::with_name("counts")
                .short("c")
                .long("counts")
                .help("JSON file of counts per k-mer")
                .required(true)
                .takes_value(true),
        )
        .arg(
            Arg::with_name("output_file")
                .short("o")
                .long("output")
                .help("Output to this file")
                .takes_value(true),
        );
    hist_command = add_log_options(hist_command);
    hist_command
}

fn unit_command() -> App<'static, 'static> {
    let mut unit_command = SubCommand::with_name("unit")
        .about("Show the repeat unit and expected k-mers of a sequence")
        .arg(
            Arg::with_name("SEQ")
                .help("Sequence (or k-mer) to look for a repeat unit in")
                .required(true),
        );
    unit_command = add_kmer_options(unit_command);
    unit_command = add_log_options(unit_command);
    unit_command
}

fn add_kmer_options<'a, 'b>(app: App<'a, 'b>) -> App<'a, 'b> {
    app.arg(
        Arg::with_name("kmer_length")
            .short("k")
            .long("kmer-length")
            .takes_value(true)
            .default_value("19")
            .help("Length of kmers to use (odd, ideally prime)"),
    )
}

fn add_log_options<'a, 'b>(app: App<'a, 'b>) -> App<'a, 'b> {
    app.arg(
        Arg::with_name("verbose")
            .short("v")
            .long("verbose")
            .help("Log each family as it is accepted or rejected"),
    )
}

pub fn get_int_arg<T: FromStr>(matches: &ArgMatches, key: &str) -> Result<T> {
    let display_key = key.replace('_', "-");
    matches
        .value_of(key)
        .ok_or_else(|| anyhow!("Bad {}", display_key))?
        .parse::<T>()
        .map_err(|_| anyhow!("{} must be a positive integer", display_key))
}

pub fn parse_dump_options(matches: &ArgMatches) -> Result<DumpParams> {
    Ok(DumpParams {
        cutoff: get_int_arg(matches, "cutoff")?,
    })
}

pub fn parse_repeat_options(matches: &ArgMatches) -> Result<RepeatParams> {
    let kmer_length: u8 = get_int_arg(matches, "kmer_length")?;
    if kmer_length % 2 == 0 {
        bail!("kmer-length must be odd");
    }
    let max_zeroes: usize = get_int_arg(matches, "max_zeroes")?;
    if max_zeroes == 0 {
        warn!("maxzeroes of 0 rejects every family, the report will be empty");
    }
    Ok(RepeatParams {
        kmer_length,
        max_zeroes,
    })
}
