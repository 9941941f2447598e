use std::env;
use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use scheduler::cli::{App, Cli, StartupCommand};
use scheduler::config::AppConfig;
use scheduler::schedule::Schedule;
use scheduler::store::Store;

const BANNER: &str = "
-----------------------------------------------------------------------------------------
Personal scheduling application

Type 'help' for help
-----------------------------------------------------------------------------------------
";

fn main() {
    // quiet by default; RUST_LOG turns diagnostics on
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match cli.config.clone().or_else(|| env::var("CONFIG_FILE").ok()) {
        Some(path) => match AppConfig::from_file(&path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("{e}");
                process::exit(1);
            }
        },
        None => AppConfig::default(),
    };
    let store = Store::from_config(&config);

    println!("{BANNER}");

    let schedule = match store.load() {
        Ok(Some(schedule)) => {
            println!("Schedule Loaded\n");
            schedule
        }
        Ok(None) => {
            println!(
                "\nEVENTS FILE: '{}' DOES NOT EXIST, WILL BE CREATED UPON NEXT SAVE.\n",
                store.events_path().display()
            );
            Schedule::new()
        }
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        }
    };

    let mut app = App::new(schedule, store);
    if let Some(StartupCommand::Print) = cli.command {
        println!("{}", app.schedule());
    }
    app.run();
}
