extern crate clap;
extern crate plotline;

mod commands;
mod extract;

use clap::{value_t, App, Arg, ArgMatches};
use commands::*;
use plotline::geom::size;
use plotline::outline::OutlineOptions;

use std::fs::File;
use std::io::prelude::*;
use std::io::{stdin, stdout};
use std::process;

fn main() {
    env_logger::init();

    let matches = App::new("plotline command-line interface")
        .version("0.1")
        .author("The plotline developers")
        .about("Extracts plotter outlines from a stream of drawing events")
        .arg(Arg::with_name("INPUT")
            .help("Sets the input file to use (standard input by default)")
            .short("i")
            .long("input")
            .value_name("FILE")
            .takes_value(true)
            .required(false)
        )
        .arg(Arg::with_name("OUTPUT")
            .help("Sets the output file to use")
            .value_name("FILE")
            .short("o")
            .long("output")
            .takes_value(true)
            .required(false)
        )
        .arg(Arg::with_name("DENSITY")
            .short("d")
            .long("density")
            .help("Sets the number of pixels per millimeter (5 by default)")
            .value_name("DENSITY")
            .takes_value(true)
        )
        .arg(Arg::with_name("WIDTH")
            .long("width")
            .help("Overrides the page width, in millimeters")
            .value_name("MM")
            .takes_value(true)
            .requires("HEIGHT")
        )
        .arg(Arg::with_name("HEIGHT")
            .long("height")
            .help("Overrides the page height, in millimeters")
            .value_name("MM")
            .takes_value(true)
            .requires("WIDTH")
        )
        .arg(Arg::with_name("FORMAT")
            .short("f")
            .long("format")
            .help("Sets the output format")
            .value_name("FORMAT")
            .possible_values(&["json", "path"])
            .default_value("json")
        )
        .arg(Arg::with_name("COUNT")
            .short("c")
            .long("count")
            .help("Prints the number of outlines and their total length")
        )
        .get_matches();

    let mut input = String::new();
    let read = match matches.value_of("INPUT") {
        Some(input_file) => File::open(input_file).and_then(|mut file| file.read_to_string(&mut input)),
        None => stdin().read_to_string(&mut input),
    };
    if let Err(e) = read {
        eprintln!("Cannot read input: {}", e);
        process::exit(1);
    }

    let output: Box<dyn Write> = match matches.value_of("OUTPUT") {
        Some(output_file) => match File::create(output_file) {
            Ok(file) => Box::new(file),
            Err(e) => {
                eprintln!("Cannot create {}: {}", output_file, e);
                process::exit(1);
            }
        },
        None => Box::new(stdout()),
    };

    let page_size = if matches.is_present("WIDTH") {
        let width = value_t!(matches, "WIDTH", f64).unwrap_or_else(|e| e.exit());
        let height = value_t!(matches, "HEIGHT", f64).unwrap_or_else(|e| e.exit());
        Some(size(width, height))
    } else {
        None
    };

    let format = match matches.value_of("FORMAT") {
        Some("path") => OutputFormat::Path,
        _ => OutputFormat::Json,
    };

    let cmd = ExtractCmd {
        input,
        output,
        pixels_per_mm: get_density(&matches),
        page_size,
        format,
        count: matches.is_present("COUNT"),
    };

    if let Err(e) = extract::extract(cmd) {
        eprintln!("{}", e);
        process::exit(1);
    }
}

fn get_density(matches: &ArgMatches) -> f64 {
    if matches.is_present("DENSITY") {
        return value_t!(matches, "DENSITY", f64).unwrap_or_else(|e| e.exit());
    }

    OutlineOptions::DEFAULT_PIXELS_PER_MM
}
