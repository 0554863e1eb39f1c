use std::{fs, path::PathBuf, process::ExitCode, rc::Rc, time::Instant};

use clap::Parser;
use funk::{
    errors::{errors::Error, handler::ErrorsHandler},
    lexer::lexer::tokenize,
    parser::parser::parse,
    render_error,
    type_checker::type_checker::{type_check, AnalyzerOptions},
};
use tracing::{debug, Level};

/// Funk semantic checker
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Source file to check
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Analyze top level declarations directly in the root scope
    #[arg(long)]
    no_root_scope: bool,

    /// Enable verbose output (shows analyzer logs)
    #[arg(short, long)]
    verbose: bool,

    /// Print the type of every typed node
    #[arg(long)]
    print_types: bool,
}

/// Prints every error as soon as it is reported.
struct PrintingHandler<'a> {
    source: &'a str,
    count: usize,
}

impl ErrorsHandler for PrintingHandler<'_> {
    fn handle(&mut self, error: Error) {
        self.count += 1;
        println!("{}", render_error(&error, self.source));
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    let level = if args.verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt().with_max_level(level).init();

    let source = match fs::read_to_string(&args.input) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Error reading file '{}': {e}", args.input.display());
            return ExitCode::FAILURE;
        }
    };

    let file_name = args
        .input
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| args.input.display().to_string());

    let start = Instant::now();

    let unit = match tokenize(source.clone(), Some(file_name.clone()))
        .and_then(|tokens| parse(tokens, Rc::new(file_name)))
    {
        Ok(unit) => unit,
        Err(error) => {
            println!("{}", render_error(&error, &source));
            return ExitCode::FAILURE;
        }
    };

    debug!("Parsed in {:?}", start.elapsed());

    let options = AnalyzerOptions {
        create_root_scope: !args.no_root_scope,
    };
    let handler = PrintingHandler {
        source: &source,
        count: 0,
    };
    let checker = type_check(&unit, handler, &options);

    debug!("Type checked in {:?}", start.elapsed());

    if args.print_types {
        let mut types: Vec<_> = checker.data_types().iter().collect();
        types.sort_by_key(|(id, _)| **id);
        for (id, data_type) in types {
            println!("{} {}", id, data_type);
        }
    }

    let count = checker.handler().count;
    if count > 0 {
        println!("{} error(s) found", count);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
