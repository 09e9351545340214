use std::process;

use tesser_cli::args::{Args, USAGE};
use tesser_cli::report;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let argv: Vec<String> = std::env::args().skip(1).collect();
    let args = match Args::parse(&argv) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{e}");
            eprintln!("{USAGE}");
            process::exit(1);
        }
    };
    if args.help {
        eprintln!("{USAGE}");
        process::exit(0);
    }

    let report = match tesser_cli::run(&args) {
        Ok(report) => report,
        Err(e) => {
            log::error!("{e}");
            process::exit(1);
        }
    };

    println!("\n## Structure Summary\n");
    println!("{}", report::format_markdown(&report));
    println!("{}", report.conversion);
    println!("\n{}", report::format_warnings(&report));
}
