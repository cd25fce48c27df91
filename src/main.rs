mod app;
mod complex;
mod config;
mod error;
mod history;
mod input;
mod memory;
mod operation;
mod shapes;
mod ui;

use std::io::{self, Write};
use std::panic;
use std::path::PathBuf;

use tracing::{error, info};
use tracing_subscriber::fmt::writer::MakeWriter;

use crossterm::{
    cursor::MoveToColumn,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use app::App;
use config::Config;

/// Parse command line arguments.
/// Returns an optional history file overriding the configured one.
fn parse_args() -> Option<PathBuf> {
    let args: Vec<String> = std::env::args().collect();
    let mut history_file: Option<PathBuf> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            arg if arg.starts_with('-') => {
                eprintln!("Unknown option: {}", arg);
                std::process::exit(1);
            }
            _ => {
                history_file = Some(PathBuf::from(&args[i]));
                i += 1;
            }
        }
    }

    history_file
}

/// Handle panics gracefully
fn install_panic_hook() {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);

        if let Some(location) = info.location() {
            error!(
                file = location.file(),
                line = location.line(),
                "panic occured"
            );
        } else {
            error!("panic occured");
        }

        if let Some(s) = info.payload().downcast_ref::<&str>() {
            error!(message = %s);
        } else if let Some(s) = info.payload().downcast_ref::<String>() {
            error!(message = %s);
        }

        default_hook(info);
    }));
}

/// A `MakeWriter` for `tracing` that logs to the main screen by leaving
/// the alternate screen temporarily.
pub struct MainScreenWriter;

impl<'a> MakeWriter<'a> for MainScreenWriter {
    type Writer = MainScreenWriterHandle;

    fn make_writer(&'a self) -> Self::Writer {
        MainScreenWriterHandle
    }
}

/// A handle that writes to stdout outside the alternate screen
pub struct MainScreenWriterHandle;

impl Write for MainScreenWriterHandle {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        execute!(io::stdout(), LeaveAlternateScreen)?;
        println!();
        execute!(io::stdout(), MoveToColumn(0))?;
        let result = io::stdout().write(buf);
        execute!(io::stdout(), MoveToColumn(0))?;
        io::stdout().flush()?;
        execute!(io::stdout(), EnterAlternateScreen)?;
        result
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stdout().flush()
    }
}

fn print_help() {
    eprintln!("argand - a terminal calculator for complex numbers");
    eprintln!();
    eprintln!("USAGE:");
    eprintln!("    argand [FILE]");
    eprintln!();
    eprintln!("ARGS:");
    eprintln!("    FILE    History file to use instead of the configured one;");
    eprintln!("            loaded at startup when it exists.");
    eprintln!();
    eprintln!("OPTIONS:");
    eprintln!("    -h, --help    Print this help message");
}

fn main() -> io::Result<()> {
    tracing_subscriber::fmt().with_writer(MainScreenWriter).init();
    info!("argand started");

    install_panic_hook();

    let mut config = Config::load();
    if let Some(path) = parse_args() {
        config.history_file = path;
    }

    let mut app = App::new(config);
    if app.config.history_file.exists() {
        app.load_history();
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = app.run(&mut terminal);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    info!("argand exiting");
    result
}
