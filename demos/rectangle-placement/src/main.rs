use std::fs::File;
use std::io;
use std::process::ExitCode;
use std::time::Instant;

use sequence_pair::output::{format_solution, NO_FEASIBLE_PLACEMENT};
use sequence_pair::parser::{read_instance, ParseError};
use sequence_pair::validation::validate_solution;
use sequence_pair::{Instance, SearchOptions};
use tracing::{error, info, Level};

fn log_level(verbosity: u64) -> Level {
    match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

fn load_instance(path: Option<&str>) -> Result<Instance, ParseError> {
    match path {
        Some(path) => read_instance(File::open(path)?),
        None => read_instance(io::stdin().lock()),
    }
}

fn main() -> ExitCode {
    let matches = clap::Command::new("Rectangle Placement")
        .version("1.0")
        .about("Places rectangles into a container without overlap, or proves that this is impossible")
        .arg(
            clap::Arg::new("input")
                .value_name("INPUT")
                .help("Instance file, reads standard input if omitted")
                .required(false)
                .index(1),
        )
        .arg(
            clap::Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Log more, may be repeated")
                .multiple_occurrences(true),
        )
        .arg(
            clap::Arg::new("no_prune")
                .long("no-prune")
                .help("Evaluate every sequence pair instead of skipping hopeless ones"),
        )
        .get_matches();

    tracing_subscriber::fmt()
        .with_max_level(log_level(matches.occurrences_of("verbose")))
        .with_writer(io::stderr)
        .init();

    let input = matches.value_of("input");
    let instance = match load_instance(input) {
        Ok(instance) => instance.with_options(SearchOptions {
            prune_structures: !matches.is_present("no_prune"),
        }),
        Err(err) => {
            error!(input = input.unwrap_or("<stdin>"), "could not load instance: {}", err);
            return ExitCode::FAILURE;
        }
    };

    info!(
        rectangles = instance.rectangles().len(),
        container = %instance.container(),
        "placing rectangles"
    );
    let start = Instant::now();
    let solution = instance.place();
    info!(
        elapsed_ms = start.elapsed().as_millis() as u64,
        feasible = solution.is_some(),
        "search done"
    );

    match solution {
        Some(solution) => {
            if let Err(err) = validate_solution(instance.container(), instance.rectangles(), &solution) {
                error!("placement failed validation: {}", err);
                return ExitCode::FAILURE;
            }
            print!("{}", format_solution(&solution));
        }
        None => println!("{}", NO_FEASIBLE_PLACEMENT),
    }
    ExitCode::SUCCESS
}
