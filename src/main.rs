use std::fs::File;
use std::io::{self, BufRead, BufReader, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser as ClapParser;
use clap::Subcommand;
use env_logger::Builder;
use log::{debug, info};

use simpl::ast_printer::AstPrinter;
use simpl::config::TerminalConfig;
use simpl::interpreter::Interpreter;
use simpl::parser::parse;
use simpl::scanner::Scanner;
use simpl::screen::TextScreen;
use simpl::terminal::Terminal;

const BANNER: [&str; 12] = [
    "#",
    "#   DDD  I N  N K  K Y   Y",
    "#   D  D I NN N K K   Y Y",
    "#   D  D I N NN KK     Y",
    "#   D  D I N  N K K    Y",
    "#   DDD  I N  N K  K   Y",
    "#",
    "# DinkySoft™ SIMPL™ v0.1.0",
    "# Structured Imperative Microchip Programming Language",
    "# (c) DinkySoft Corporation 1976",
    "# Press Ctrl-D to exit",
    "#",
];

#[derive(ClapParser, Debug)]
#[command(version, about = "DinkySoft SIMPL interpreter", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    commands: Commands,

    /// Enable logging to app.log
    #[arg(long, global = true)]
    log: bool,

    /// JSON file overriding the terminal geometry, colours and banner
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Tokenizes input from a file, printing each token
    Tokenize { filename: PathBuf },

    /// Parses input from a file as a single statement and prints it back
    Parse {
        filename: PathBuf,

        /// Print the syntax tree as JSON instead of source text
        #[arg(long)]
        json: bool,
    },

    /// Evaluates input from a file as a single statement and prints the result
    Evaluate { filename: PathBuf },

    /// Feeds a file line by line through a terminal session and prints the scrollback
    Run { filename: PathBuf },

    /// Interactive session on stdin/stdout
    Repl,
}

/// Reads the contents of a file into a String
fn read_file(filename: &Path) -> Result<String> {
    info!("Reading file: {:?}", filename);

    let file = File::open(filename).context(format!("Failed to open file {:?}", filename))?;
    let mut reader = BufReader::new(file);
    let mut buf = String::new();

    let bytes = reader
        .read_to_string(&mut buf)
        .context(format!("Failed to read file {:?}", filename))?;

    info!("Read {} bytes from {:?}", bytes, filename);

    Ok(buf)
}

fn load_config(path: Option<&Path>) -> Result<TerminalConfig> {
    match path {
        Some(path) => {
            let text = read_file(path)?;
            TerminalConfig::from_json(&text).context(format!("Invalid config file {:?}", path))
        }
        None => Ok(TerminalConfig::default()),
    }
}

fn init_logger() -> Result<()> {
    let log_file = File::create("app.log").context("Failed to create app.log")?;

    Builder::new()
        .format(|buf, record| {
            // Strip 'simpl::' from module path
            let module = record
                .module_path()
                .unwrap_or("<unnamed>")
                .strip_prefix("simpl::")
                .unwrap_or(record.module_path().unwrap_or("<unnamed>"));
            writeln!(
                buf,
                "{} [{}:{}] - {}",
                chrono::Local::now().format("%H:%M:%S%.3f"),
                module,
                record.line().unwrap_or(0),
                record.args()
            )
        })
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .filter(None, log::LevelFilter::Debug)
        .parse_default_env()
        .init();

    info!("Logger initialized, writing to app.log");
    Ok(())
}

fn repl(config: TerminalConfig) -> Result<()> {
    let mut config = config;
    if config.banner.is_empty() {
        config.banner = BANNER.iter().map(|s| s.to_string()).collect();
    }

    let mut screen = TextScreen::new(config.width, config.height);
    let mut terminal = Terminal::new(config);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    for line in terminal.lines() {
        writeln!(out, "{}", line)?;
    }

    loop {
        write!(out, "{}", if terminal.is_pending() { ".. " } else { "> " })?;
        out.flush()?;

        let mut input = String::new();
        if io::stdin().lock().read_line(&mut input)? == 0 {
            break;
        }

        let text = input.trim_end_matches(|c| c == '\r' || c == '\n');
        let printed = terminal.submit(text, &mut screen);

        // The first entry echoes the input, which is already on screen.
        for entry in printed.iter().skip(1) {
            writeln!(out, "{}", entry)?;
        }
    }

    writeln!(out)?;
    Ok(())
}

fn main() -> Result<()> {
    let args: Cli = Cli::parse();

    if args.log {
        init_logger()?;
    } else {
        env_logger::Builder::new()
            .filter_level(log::LevelFilter::Off)
            .init();
    }

    info!("CLI arguments: {:?}", args);

    let config = load_config(args.config.as_deref())?;

    match args.commands {
        Commands::Tokenize { filename } => {
            info!("Running Tokenize subcommand");
            let source = read_file(&filename)?;

            for token in Scanner::new(&source) {
                println!("{}", token);
            }
        }

        Commands::Parse { filename, json } => {
            info!("Running Parse subcommand");
            let source = read_file(&filename)?;

            match parse(&source) {
                Ok(Some(node)) => {
                    if json {
                        println!("{}", serde_json::to_string_pretty(&node)?);
                    } else {
                        println!("{}", AstPrinter::print(&node));
                    }
                }

                Ok(None) => info!("Nothing to parse"),

                Err(e) => {
                    debug!("Parse debug: {}", e);
                    eprintln!("{}", e);
                    std::process::exit(65);
                }
            }
        }

        Commands::Evaluate { filename } => {
            info!("Running Evaluate subcommand");
            let source = read_file(&filename)?;

            let node = match parse(&source) {
                Ok(Some(node)) => node,
                Ok(None) => return Ok(()),
                Err(e) => {
                    debug!("Parse debug: {}", e);
                    eprintln!("{}", e);
                    std::process::exit(65);
                }
            };

            let mut interpreter = Interpreter::new();
            let bindings = interpreter.bindings().clone();

            match interpreter.evaluate(&node, &bindings) {
                Ok(value) => {
                    debug!("Evaluated to: {}", value);
                    println!("{}", value);
                }

                Err(e) => {
                    debug!("Evaluation debug: {}", e);
                    eprintln!("{}", e);
                    std::process::exit(70);
                }
            }
        }

        Commands::Run { filename } => {
            info!("Running Run subcommand");
            let source = read_file(&filename)?;

            let mut screen = TextScreen::new(config.width, config.height);
            let mut terminal = Terminal::new(config);

            for line in source.lines() {
                terminal.submit(line, &mut screen);
            }

            for line in terminal.lines() {
                println!("{}", line);
            }
        }

        Commands::Repl => {
            info!("Running Repl subcommand");
            repl(config)?;
        }
    }

    Ok(())
}
