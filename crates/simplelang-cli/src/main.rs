//! `simplelang` CLI: file runner and REPL (spec.md §6).
//!
//! `simplelang <file>` reads and evaluates a file; `simplelang` with no
//! file argument starts an interactive REPL. Both sit on top of
//! [`simplelang::run_source`] and differ only in how they source input and
//! report the result — the language core has no notion of either.

use std::{
    env,
    io::{self, Write as _},
    process::ExitCode,
};

use log::LevelFilter;
use simplelang::{
    interpreter::Interp,
    io::StdIo,
    run_source,
};

const USAGE: &str = "usage: simplelang [--log-level <level>] [<file>]";

fn main() -> ExitCode {
    let mut args = env::args().skip(1).peekable();
    let mut log_level = env::var("SIMPLELANG_LOG")
        .ok()
        .and_then(|s| s.parse::<LevelFilter>().ok())
        .unwrap_or(LevelFilter::Warn);
    let mut file_path = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                println!("{USAGE}");
                return ExitCode::SUCCESS;
            }
            "--log-level" => {
                let Some(level) = args.next() else {
                    eprintln!("--log-level requires an argument\n{USAGE}");
                    return ExitCode::FAILURE;
                };
                let Ok(parsed) = level.parse::<LevelFilter>() else {
                    eprintln!("unrecognized log level '{level}'\n{USAGE}");
                    return ExitCode::FAILURE;
                };
                log_level = parsed;
            }
            _ => {
                file_path = Some(arg);
                break;
            }
        }
    }

    simple_logger::SimpleLogger::new()
        .with_level(log_level)
        .init()
        .expect("logger can only be initialized once");

    match file_path {
        Some(path) => run_file(&path),
        None => run_repl(),
    }
}

fn run_file(path: &str) -> ExitCode {
    let Ok(source) = std::fs::read_to_string(path) else {
        println!("[Error-IO] That file doesn't exist!");
        return ExitCode::FAILURE;
    };

    let mut interp = Interp::new(Box::new(StdIo));
    log::info!("running {path}");
    match run_source(&source, &mut interp) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            println!("{err}");
            ExitCode::FAILURE
        }
    }
}

/// Prompt is `> `; each line resets the `main` latch so repeated top-level
/// execution works, matching the REPL's documented behavior (spec.md §6).
fn run_repl() -> ExitCode {
    let mut interp = Interp::new(Box::new(StdIo));
    log::info!("starting REPL");
    let stdin = io::stdin();
    loop {
        print!("> ");
        if io::stdout().flush().is_err() {
            break;
        }

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => {
                // EOF (Ctrl-D): the host-level abort path (spec.md §6).
                println!("Aborted by user.");
                break;
            }
            Ok(_) => {}
            Err(err) => {
                log::error!("failed to read line: {err}");
                break;
            }
        }

        interp.reset_main_latch();
        interp.called_print = false;
        match run_source(&line, &mut interp) {
            Ok(_) => {
                if interp.called_print {
                    println!();
                }
            }
            Err(err) => println!("{err}"),
        }
    }
    ExitCode::SUCCESS
}
