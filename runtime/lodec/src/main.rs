//! The lode runtime CLI.

use lodec::commands::{parse_file, parse_target_and_paths, run_unit, why_unit};

fn main() {
    init_tracing();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        print_usage();
        std::process::exit(2);
    }

    let code = match args[1].as_str() {
        "run" => match parse_target_and_paths(&args[2..]) {
            Ok((target, paths)) => run_unit(&target, &paths),
            Err(err) => {
                eprintln!("error: {err}");
                eprintln!("Usage: lode run <unit|file.lode> [--path <dir>]...");
                2
            }
        },
        "why" => match parse_target_and_paths(&args[2..]) {
            Ok((target, paths)) => why_unit(&target, &paths),
            Err(err) => {
                eprintln!("error: {err}");
                eprintln!("Usage: lode why <unit> [--path <dir>]...");
                2
            }
        },
        "parse" => {
            if args.len() < 3 {
                eprintln!("Usage: lode parse <file.lode>");
                2
            } else {
                parse_file(&args[2])
            }
        }
        "help" | "--help" | "-h" => {
            print_usage();
            0
        }
        other => {
            eprintln!("error: unknown command '{other}'");
            print_usage();
            2
        }
    };

    std::process::exit(code);
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_env("LODE_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_usage() {
    eprintln!("lode - module resolution and execution runtime");
    eprintln!();
    eprintln!("Usage: lode <command> [args]");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  run <unit|file.lode> [--path <dir>]...   Execute a unit as the entry point");
    eprintln!("  why <unit> [--path <dir>]...             List search path matches for a name");
    eprintln!("  parse <file.lode>                        Check a file without executing it");
    eprintln!("  help                                     Show this message");
    eprintln!();
    eprintln!("The search path is: working directory, --path flags in order, then");
    eprintln!("LODE_PATH (colon-separated). Earlier entries win name collisions.");
    eprintln!("Set LODE_LOG (e.g. LODE_LOG=debug) for resolution traces.");
}
