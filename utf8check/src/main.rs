use clap::Parser;
use std::{fs::File, io::BufReader, path::PathBuf, process::ExitCode};
use tracing::{Level, debug};
use utf8scan::{Error, Scanner, Source};

#[derive(Parser)]
struct Args {
    /// File to scan, standard input when omitted
    file: Option<PathBuf>,
}

fn main() -> ExitCode {
    let Args { file } = Args::parse();
    let level = if std::env::var_os("UTF8CHECK_LOG").is_some() {
        Level::DEBUG
    } else {
        Level::INFO
    };
    tracing_subscriber::fmt()
        .with_target(false)
        .compact()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
    match file {
        Some(path) => match File::open(&path) {
            Ok(file) => report(Scanner::from_reader(BufReader::new(file))),
            Err(err) => {
                eprintln!("{}: {}", path.display(), err);
                ExitCode::from(exit_code(&Error::Io))
            }
        },
        None => report(Scanner::from_reader(std::io::stdin().lock())),
    }
}

fn report<S: Source>(mut scanner: Scanner<S>) -> ExitCode {
    match scanner.scan() {
        Ok(counts) => {
            println!("{}", counts);
            ExitCode::SUCCESS
        }
        Err(err) => {
            let counts = scanner.counts();
            debug!(
                "stopped at byte {} with {} ascii and {} multi-byte so far",
                scanner.offset(),
                counts.ascii,
                counts.multi
            );
            eprintln!("{}", err);
            ExitCode::from(exit_code(&err))
        }
    }
}

fn exit_code(error: &Error) -> u8 {
    match error {
        Error::InvalidHeader(_) => 1,
        Error::InvalidTail(_) => 2,
        Error::InvalidCodePoint(_) => 3,
        Error::Overlong(_) => 4,
        Error::Io => 5,
    }
}
