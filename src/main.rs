use std::fs::File;
use std::io::stdout;

use clap::Parser;
use roomdeed::cli::{self, Args};
use simplelog::{ColorChoice, LevelFilter, TermLogger, TerminalMode, WriteLogger};

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    setup_logging(&args)?;
    cli::run(&args, &mut stdout().lock())
}

fn setup_logging(args: &Args) -> anyhow::Result<()> {
    if args.debug {
        WriteLogger::init(
            LevelFilter::Debug,
            simplelog::ConfigBuilder::new()
                .set_target_level(LevelFilter::Error)
                .build(),
            File::create("debug.log")?,
        )?;
    } else {
        TermLogger::init(
            args.log_level,
            simplelog::Config::default(),
            TerminalMode::Stderr,
            ColorChoice::Auto,
        )?;
    }
    Ok(())
}
