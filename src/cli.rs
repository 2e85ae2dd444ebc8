//! Command-line surface.
//!
//! A top-level `Parser` wrapping a `Subcommand` enum, with shared option
//! groups factored into a `#[command(flatten)]` struct (`PatternSettings`).

use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use log::debug;

use crate::adapter::Charset;
use crate::bigint::SInt;
use crate::error::Error;
use crate::pattern::{Options, RegexSequence};

#[derive(Parser)]
#[command(name = "rexseq", about = "Index the language of a regex as a sequence")]
pub struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all logging, including warnings.
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Emit every string matched by each pattern, one per line.
    Generate {
        #[arg(required = true, num_args = 1..)]
        patterns: Vec<String>,
        #[command(flatten)]
        settings: PatternSettings,
        /// Only emit the first N strings (after `--start`).
        #[arg(long)]
        limit: Option<u64>,
        /// Start at this index instead of 0 (negative counts from the end).
        #[arg(long, allow_hyphen_values = true)]
        start: Option<i64>,
    },
    /// Print the cardinality of each pattern's language.
    Len {
        #[arg(required = true, num_args = 1..)]
        patterns: Vec<String>,
        #[command(flatten)]
        settings: PatternSettings,
    },
    /// Print the string at a given index.
    Index {
        pattern: String,
        #[arg(allow_hyphen_values = true)]
        index: i64,
        #[command(flatten)]
        settings: PatternSettings,
    },
}

#[derive(Args, Clone)]
struct PatternSettings {
    /// ASCII (default, full 0..255 byte range) or printable-only charset.
    #[arg(long, value_enum, default_value_t = CharsetArg::Ascii)]
    charset: CharsetArg,
    /// Clamp unbounded repetitions to this many repeats.
    #[arg(long, default_value_t = 65_535)]
    max_count: u32,
    /// Demote unsupported lookaround to an empty production instead of a parse error.
    #[arg(long)]
    relaxed: bool,
    /// Let `.` match `\n` too.
    #[arg(long)]
    dotall: bool,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum CharsetArg {
    Ascii,
    Printable,
}

impl From<&PatternSettings> for Options {
    fn from(s: &PatternSettings) -> Self {
        Options {
            charset: match s.charset {
                CharsetArg::Ascii => Charset::Ascii,
                CharsetArg::Printable => Charset::Printable,
            },
            dotall: s.dotall,
            relaxed: s.relaxed,
            max_count: s.max_count,
        }
    }
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        "off"
    } else {
        match verbose {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        }
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

/// Runs the CLI; returns the process exit code (0 success, 1 `ParseError`,
/// 2 `IndexError`).
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let result = match cli.command {
        Command::Generate {
            patterns,
            settings,
            limit,
            start,
        } => run_generate(&patterns, &settings, start, limit),
        Command::Len { patterns, settings } => run_len(&patterns, &settings),
        Command::Index {
            pattern,
            index,
            settings,
        } => run_index(&pattern, index, &settings),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            exit_code_for(&e)
        }
    }
}

fn exit_code_for(e: &Error) -> ExitCode {
    match e {
        Error::Index(_) | Error::ZeroStep => ExitCode::from(2),
        _ => ExitCode::from(1),
    }
}

fn run_generate(
    patterns: &[String],
    settings: &PatternSettings,
    start: Option<i64>,
    limit: Option<u64>,
) -> crate::error::Result<()> {
    let options: Options = settings.into();
    debug!("generate: patterns={patterns:?} start={start:?} limit={limit:?}");
    for pattern in patterns {
        let seq = RegexSequence::new(pattern, &options)?;
        let view = if start.is_some() || limit.is_some() {
            let step = None;
            let start = start.map(SInt::from);
            let stop = match (start.clone(), limit) {
                (Some(s), Some(l)) => Some(&s + SInt::from(l)),
                (None, Some(l)) => Some(SInt::from(l)),
                _ => None,
            };
            seq.slice(start, stop, step)?
        } else {
            seq
        };
        for s in view.iter() {
            println!("{s}");
        }
    }
    Ok(())
}

fn run_len(patterns: &[String], settings: &PatternSettings) -> crate::error::Result<()> {
    let options: Options = settings.into();
    for pattern in patterns {
        let seq = RegexSequence::new(pattern, &options)?;
        println!("{}", seq.len());
    }
    Ok(())
}

fn run_index(pattern: &str, index: i64, settings: &PatternSettings) -> crate::error::Result<()> {
    let options: Options = settings.into();
    let seq = RegexSequence::new(pattern, &options)?;
    println!("{}", seq.get(&SInt::from(index))?);
    Ok(())
}
