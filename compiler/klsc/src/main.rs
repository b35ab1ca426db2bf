//! klscript CLI
//!
//! Runs, checks and minifies klscript files.

use klsc::commands::{calc, check_file, minify_file, run_file, RunOptions};

fn main() {
    klsc::init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];

    match command.as_str() {
        "run" => {
            let mut options = RunOptions::default();
            let mut file_path = None;

            for arg in args.iter().skip(2) {
                if arg == "--dump" || arg == "-d" {
                    options.dump = true;
                } else if file_path.is_none() {
                    file_path = Some(arg.as_str());
                } else if let Ok(value) = arg.parse::<f64>() {
                    options.params.push(value);
                } else {
                    eprintln!("error: script parameters must be numbers, found '{arg}'");
                    std::process::exit(1);
                }
            }

            let Some(path) = file_path else {
                eprintln!("error: missing file path");
                eprintln!("Usage: kls run <file.kls|-> [--dump] [params...]");
                std::process::exit(1);
            };

            run_file(path, options);
        }
        "check" => {
            if args.len() < 3 {
                eprintln!("Usage: kls check <file.kls|->");
                std::process::exit(1);
            }
            check_file(&args[2]);
        }
        "calc" => {
            if args.len() < 3 {
                eprintln!("Usage: kls calc <expr> [name=value ...]");
                std::process::exit(1);
            }
            calc(&args[2], &args[3..]);
        }
        "minify" => {
            if args.len() < 3 {
                eprintln!("Usage: kls minify <file.kls|->");
                std::process::exit(1);
            }
            minify_file(&args[2]);
        }
        "help" | "--help" | "-h" => {
            print_usage();
        }
        "version" | "--version" | "-V" => {
            println!("kls {}", env!("CARGO_PKG_VERSION"));
        }
        _ => {
            eprintln!("Unknown command: {command}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    println!("klscript CLI");
    println!();
    println!("Usage: kls <command> [options]");
    println!();
    println!("Commands:");
    println!("  run <file> [--dump] [params...]  Evaluate a script; params feed `pop`");
    println!("  check <file>                     Validate a script without running it");
    println!("  calc <expr> [name=value ...]     Evaluate a single expression");
    println!("  minify <file>                    Strip comments and spare whitespace");
    println!("  help                             Show this message");
    println!("  version                          Show version information");
    println!();
    println!("Use `-` as <file> to read from stdin. Set RUST_LOG for tracing output.");
}
