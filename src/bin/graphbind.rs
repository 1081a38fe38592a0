use std::{env, io, process};

use graphbind::cli::{self, CommandLineConfig};

fn main() {
    tracing_subscriber::fmt().with_writer(io::stderr).init();

    let args: Vec<String> = env::args().collect();
    if args.iter().any(|arg| arg == "--help" || arg == "-h") {
        println!("{}", CommandLineConfig::help());
        return;
    }
    let arg_refs: Vec<&str> = args.iter().map(|s| s.as_str()).collect();
    let config = match CommandLineConfig::from_args(&arg_refs) {
        Ok(cfg) => cfg,
        Err(err) => {
            eprintln!("error: {err}");
            process::exit(2);
        }
    };

    let stdout = io::stdout();
    if let Err(err) = cli::run(&config, &mut stdout.lock()) {
        eprintln!("command failed: {err}");
        process::exit(1);
    }
}
