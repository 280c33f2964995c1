use std::fs::File;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process;

use clap::Parser as _;
use log::{info, LevelFilter};

use sxd_validator::Parser;

#[derive(clap::Parser)]
#[command(name = "sxd-validate", about = "Check XML documents against a strict XML subset")]
struct Cli {
    /// Files to validate, `-` for standard input
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Don't print anything for valid files
    #[arg(short, long)]
    quiet: bool,

    /// Log more; repeat for even more
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn level(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

fn process_input<R>(parser: &Parser, input: R) -> Result<(), String>
    where R: Read
{
    parser.validate(input).map_err(|e| e.to_string())
}

fn process_file(parser: &Parser, filename: &PathBuf) -> Result<(), String> {
    if filename.as_os_str() == "-" {
        process_input(parser, io::stdin().lock())
    } else {
        let file = File::open(filename)
            .map_err(|e| format!("could not open file: {}", e))?;
        process_input(parser, file)
    }
}

fn main() {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(level(cli.verbose))
        .parse_default_env()
        .init();

    let parser = Parser::new();
    let mut failed = 0;

    for filename in &cli.files {
        println!("File: {}", filename.display());

        match process_file(&parser, filename) {
            Ok(()) => {
                if !cli.quiet {
                    println!("OK.");
                }
            },
            Err(e) => {
                failed += 1;
                eprintln!("Error: {}", e);
            },
        }

        println!("--------");
    }

    info!("{} of {} files invalid", failed, cli.files.len());

    if failed > 0 {
        process::exit(1);
    }
}
