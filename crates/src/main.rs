// Entry point: program main
// Handles --config, --options, --log, --help, and runs the TUI

use std::env;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Mutex;
use tagline::ui::{Model, builtin_config, builtin_options, run};
use tagline::{Config, OptionSource};
use tracing_subscriber::EnvFilter;

fn print_help() {
    println!("tagline - inline mention and tag completion in a terminal text field");
    println!();
    println!("Usage:");
    println!("  tagline [--config <file>] [--options <file>] [--log <file>]");
    println!();
    println!("Options:");
    println!("  --config <file>   JSON trigger settings (triggers, minChars, separator, ...).");
    println!("  --options <file>  JSON candidates: a list, or an object keyed by trigger tag.");
    println!("  --log <file>      Write tracing output to <file>. Filter with RUST_LOG (default info).");
    println!("  --help            Show this help message.");
    println!();
    println!("Without files, `@` completes a few names and `#` walks a nested tag tree.");
    println!("Enter submits the line and prints it on stdout; Esc quits.");
}

#[derive(Debug, Default)]
struct Args {
    config: Option<PathBuf>,
    options: Option<PathBuf>,
    log: Option<PathBuf>,
    help: bool,
}

fn parse_args(args: &[String]) -> Result<Args, String> {
    let mut out = Args::default();
    let mut i = 0usize;
    while i < args.len() {
        let flag = args[i].as_str();
        if flag == "--help" || flag == "-h" {
            out.help = true;
            i += 1;
            continue;
        }
        let slot = match flag {
            "--config" => &mut out.config,
            "--options" => &mut out.options,
            "--log" => &mut out.log,
            other => return Err(format!("unknown argument: {other}")),
        };
        let Some(value) = args.get(i + 1) else {
            return Err(format!("{flag} needs a file argument"));
        };
        *slot = Some(PathBuf::from(value));
        i += 2;
    }
    Ok(out)
}

// The TUI owns the terminal, so logs only go to a file.
fn init_logging(path: &Path) -> Result<(), String> {
    let file = File::create(path).map_err(|e| format!("cannot open log {}: {e}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| format!("failed to install logger: {e}"))
}

fn load_model(args: &Args) -> Result<Model, String> {
    let config = match &args.config {
        Some(path) => Config::load(path).map_err(|e| e.to_string())?,
        None => builtin_config(),
    };
    let source = match &args.options {
        Some(path) => OptionSource::load(path).map_err(|e| e.to_string())?,
        None => builtin_options().map_err(|e| e.to_string())?,
    };
    Model::new(&config, source).map_err(|e| e.to_string())
}

#[tokio::main]
async fn main() {
    let raw: Vec<String> = env::args().skip(1).collect();
    let args = match parse_args(&raw) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("{e}");
            eprintln!("try `tagline --help`");
            process::exit(2);
        }
    };
    if args.help {
        print_help();
        return;
    }

    if let Some(path) = &args.log {
        if let Err(e) = init_logging(path) {
            eprintln!("{e}");
            process::exit(2);
        }
    }

    let model = match load_model(&args) {
        Ok(m) => m,
        Err(e) => {
            eprintln!("{e}");
            process::exit(2);
        }
    };

    match run(model).await {
        Ok(Some(line)) => println!("{line}"),
        Ok(None) => {}
        Err(e) => {
            eprintln!("{e}");
            process::exit(2);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parses_file_flags() {
        let a = parse_args(&strings(&["--config", "c.json", "--log", "t.log"])).unwrap();
        assert_eq!(a.config, Some(PathBuf::from("c.json")));
        assert_eq!(a.log, Some(PathBuf::from("t.log")));
        assert!(a.options.is_none());
        assert!(!a.help);
    }

    #[test]
    fn rejects_bad_arguments() {
        assert!(parse_args(&strings(&["--options"])).is_err());
        assert!(parse_args(&strings(&["stray"])).is_err());
        assert!(parse_args(&strings(&["-h"])).unwrap().help);
    }

    #[test]
    fn defaults_build_a_model() {
        let m = load_model(&Args::default()).unwrap();
        assert!(!m.suggesting());
    }
}
