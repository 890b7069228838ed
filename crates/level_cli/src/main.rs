use std::env;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use engine::resolve_app_paths;
use level_cli::{run, CommandKind, CommonOptions};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    init_tracing();
    match run_cli() {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("{message}");
            ExitCode::from(1)
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .compact()
        .init();
}

fn run_cli() -> Result<(), String> {
    let args = env::args().skip(1).collect::<Vec<_>>();
    if args.is_empty() {
        return Err(usage_text());
    }
    if args[0] == "-h" || args[0] == "--help" {
        print_usage();
        return Ok(());
    }

    let mut levels_dir: Option<PathBuf> = None;
    let mut index = 0usize;
    while index < args.len() {
        match args[index].as_str() {
            "--levels-dir" => {
                let value = args
                    .get(index + 1)
                    .ok_or_else(|| "missing value for --levels-dir".to_string())?;
                levels_dir = Some(PathBuf::from(value));
                index += 2;
            }
            _ => break,
        }
    }

    let command = args
        .get(index)
        .ok_or_else(|| "missing subcommand".to_string())?
        .as_str();
    let command_args = &args[(index + 1)..];

    let kind = match command {
        "list" => {
            if !command_args.is_empty() {
                return Err("list takes no arguments".to_string());
            }
            CommandKind::List
        }
        "inspect" => match command_args {
            [name] => CommandKind::Inspect { name: name.clone() },
            _ => return Err("inspect requires exactly one level name".to_string()),
        },
        "validate" => match command_args {
            [path] => CommandKind::Validate {
                path: PathBuf::from(path),
            },
            _ => return Err("validate requires exactly one file path".to_string()),
        },
        "replay" => {
            let path = command_args
                .first()
                .ok_or_else(|| "replay requires a script path".to_string())?;
            let save = match &command_args[1..] {
                [] => None,
                [flag, name] if flag == "--save" => Some(name.clone()),
                _ => return Err("unknown replay arguments (expected --save <name>)".to_string()),
            };
            CommandKind::Replay {
                path: PathBuf::from(path),
                save,
            }
        }
        other => return Err(format!("unknown subcommand '{other}'")),
    };

    let levels_dir = match levels_dir {
        Some(dir) => dir,
        None => resolve_app_paths()
            .map_err(|error| error.to_string())?
            .levels_dir,
    };

    run(kind, CommonOptions { levels_dir }, &mut io::stdout())
}

fn print_usage() {
    println!("{}", usage_text());
}

fn usage_text() -> String {
    [
        "level_cli - headless level tools for the platformer editor",
        "",
        "Usage:",
        "  level_cli [--levels-dir <path>] list",
        "  level_cli [--levels-dir <path>] inspect <name>",
        "  level_cli [--levels-dir <path>] validate <file>",
        "  level_cli [--levels-dir <path>] replay <script> [--save <name>]",
        "",
        "The levels directory defaults to SORASU_LEVELS_DIR, then <project root>/levels.",
    ]
    .join("\n")
}
