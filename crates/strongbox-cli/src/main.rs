use std::env;

use clap::Parser;
use cli::Args;
use error::{CliResult, ErrorContext};
use logging::setup_logging;
use strongbox_config::config::{
    self, generate_default_config, get_config, set_config_path, DEFAULT_LOG_LEVEL,
};
use strongbox_utils::path::resolve_path;
use tracing::debug;
use utils::COLOR;

mod cli;
mod error;
mod inspect;
mod logging;
mod store;
mod utils;

fn handle_cli() -> CliResult<()> {
    let args = Args::parse();

    if args.no_color {
        let mut color = COLOR.write().unwrap();
        *color = false;
    }

    if let Some(ref c) = args.config {
        let path = resolve_path(c)?;
        let path = if path.is_absolute() {
            path
        } else {
            env::current_dir()
                .with_context(|| "retrieving current directory".into())?
                .join(path)
        };
        set_config_path(path);
    }

    match args.command {
        cli::Commands::DefConfig => {
            setup_logging(&args, DEFAULT_LOG_LEVEL);
            generate_default_config()?;
        }
        ref command => {
            config::init()?;
            let config = get_config();
            setup_logging(&args, config.log_level());
            debug!("using graph snapshot {}", config.get_graph_path()?.display());

            match command {
                cli::Commands::Store { file } => store::store(file, args.json)?,
                cli::Commands::Show { vertex, depth } => {
                    inspect::show(*vertex, *depth, args.json)?
                }
                cli::Commands::Labels => inspect::labels()?,
                cli::Commands::Config => inspect::print_config()?,
                cli::Commands::DefConfig => unreachable!(),
            }
        }
    }

    Ok(())
}

fn main() {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .build(),
        )
    }))
    .ok();

    if let Err(err) = handle_cli() {
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(1);
    }
}
