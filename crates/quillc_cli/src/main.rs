use crate::args::{Args, Command};
use clap::Parser;
use owo_colors::OwoColorize;
use owo_colors::Stream::Stderr as StderrStream;
use quill_grammar::{language, language_analysis};
use quill_parsing::lexer::scan;
use quill_parsing::parser::Parser as QuillParser;
use quill_symbols::{HashIndex, SymbolTable};
use quill_tokens::source::SourceFile;
use quill_tokens::token::Token;
use std::io::{stderr, stdout, Stderr, StderrLock, Stdout, StdoutLock};
use std::path::Path;
use std::process::ExitCode;
use std::{fs, io};
use tracing::metadata::LevelFilter;
use tracing::{debug, info, trace, Level};
use tracing::Metadata;
use tracing_error::ErrorLayer;
use tracing_subscriber::fmt::{format, MakeWriter};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{Layer, Registry};

mod args;
mod report;

fn main() -> eyre::Result<ExitCode> {
    color_eyre::install()?;
    let args = Args::parse();
    init_logging(args.logging().log_level_filter())?;
    trace!("starting quillc with args: {args:?}");
    debug!("quillc version: {}", env!("CARGO_PKG_VERSION"));

    match run(args.command) {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(error) => {
            let message = format!("error: {error}");
            eprintln!(
                "{}",
                message.if_supports_color(StderrStream, |text| text.bright_red().to_string())
            );
            Ok(ExitCode::FAILURE)
        }
    }
}

fn run(command: Command) -> eyre::Result<()> {
    match command {
        Command::Tokens { file } => {
            let tokens = tokens(&file)?;
            print!("{}", report::tokens_section(&tokens));
        }
        Command::First { file } => {
            let tokens = tokens(&file)?;
            print!("{}", report::first_section(&tokens, language_analysis()));
        }
        Command::Follow { file } => {
            let tokens = tokens(&file)?;
            print!("{}", report::follow_section(&tokens, language_analysis()));
        }
        Command::Grammar => {
            print!(
                "{}",
                report::grammar_section(language().non_terminals(), language_analysis())
            );
        }
        Command::Tree { file } => {
            let tokens = tokens(&file)?;
            let tree = QuillParser::new(tokens).parse()?;
            print!("{tree}");
        }
        Command::Symbols { file, hash_size } => {
            let text = fs::read_to_string(&file)?;
            let table = SymbolTable::from_source(&text);
            let index = HashIndex::from_source(&text, hash_size)?;
            println!("{table}");
            print!("{index}");
        }
        Command::Report { file, output } => {
            let tokens = tokens(&file)?;
            let report = report::full_report(&tokens, language_analysis());
            match output {
                Some(output) => {
                    fs::write(&output, report)?;
                    info!("report written to {output:?}");
                }
                None => print!("{report}"),
            }
        }
    }
    Ok(())
}

fn tokens(file: &Path) -> eyre::Result<Vec<Token>> {
    let source = SourceFile::read_path(file)?;
    let tokens = scan(&source)?;
    debug!("scanned {} tokens from {file:?}", tokens.len());
    Ok(tokens)
}

struct StdioWriter {
    stdout: Stdout,
    stderr: Stderr,
}

enum StdioLock<'a> {
    Stdout(StdoutLock<'a>),
    Stderr(StderrLock<'a>),
}

impl io::Write for StdioLock<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            StdioLock::Stdout(stdout) => stdout.write(buf),
            StdioLock::Stderr(stderr) => stderr.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            StdioLock::Stdout(stdout) => stdout.flush(),
            StdioLock::Stderr(stderr) => stderr.flush(),
        }
    }
}

impl<'a> MakeWriter<'a> for StdioWriter {
    type Writer = StdioLock<'a>;

    fn make_writer(&'a self) -> Self::Writer {
        StdioLock::Stderr(self.stderr.lock())
    }

    // warnings and errors stay off stdout
    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        if meta.level() <= &Level::WARN {
            StdioLock::Stderr(self.stderr.lock())
        } else {
            StdioLock::Stdout(self.stdout.lock())
        }
    }
}

fn init_logging(level_filter: LevelFilter) -> eyre::Result<()> {
    let registry = Registry::default()
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(format().with_thread_ids(true))
                .with_writer(StdioWriter {
                    stdout: stdout(),
                    stderr: stderr(),
                })
                .with_filter(level_filter),
        )
        .with(ErrorLayer::default());

    tracing::subscriber::set_global_default(registry)?;

    Ok(())
}
