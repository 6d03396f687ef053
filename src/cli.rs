use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use world_core::prelude::*;
use world_core::{codec, line_split, render};

use crate::demo;

#[derive(Debug, Parser)]
#[command(version, about = "Walk and render a world of owned rooms")]
pub struct Args {
    /// TOML world file. Without one, a two room demo world is used
    #[arg(long, short)]
    pub world: Option<PathBuf>,
    /// Player identity to move around
    #[arg(long, short, default_value = "player")]
    pub player: String,
    /// Write debug logs to debug.log instead of the terminal
    #[arg(long)]
    pub debug: bool,
    #[arg(long, default_value = "warn")]
    pub log_level: log::LevelFilter,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the document for a location
    Render { id: LocationId },
    /// Print the document for the player's location
    Look,
    /// Move through exits in order, then look
    Walk {
        #[arg(required = true)]
        directions: Vec<Compass>,
    },
    /// Teleport to a respawn point, then look
    Respawn { id: LocationId },
    /// Show how a description would be wrapped
    Split { text: String },
    /// Base64 encode text
    Encode { text: String },
    /// Take a document apart and print its JSON and SVG
    Inspect { document: String },
}

impl Args {
    pub fn load_world(&self) -> anyhow::Result<World> {
        match &self.world {
            Some(path) => Ok(WorldConfiguration::load(path)?.build()?),
            None => demo::demo_world(),
        }
    }
}

/// Runs `args.command`, writing results to `out`
pub fn run<W: Write>(args: &Args, out: &mut W) -> anyhow::Result<()> {
    let player = Principal::new(args.player.as_str());
    match &args.command {
        Command::Render { id } => {
            let world = args.load_world()?;
            writeln!(out, "{}", world.render(*id))?;
        },
        Command::Look => {
            let world = args.load_world()?;
            writeln!(out, "{}", world.look(&player))?;
        },
        Command::Walk { directions } => {
            let mut world = args.load_world()?;
            for direction in directions {
                let to = world.move_player(&player, *direction)?;
                writeln!(out, "{player} went {direction} to {to}")?;
            }
            for event in world.drain_events() {
                log::info!("[{}] is now at [{}]", event.player(), event.to());
            }
            writeln!(out, "{}", world.look(&player))?;
        },
        Command::Respawn { id } => {
            let mut world = args.load_world()?;
            world.respawn(&player, *id)?;
            writeln!(out, "{player} respawned at {id}")?;
            writeln!(out, "{}", world.look(&player))?;
        },
        Command::Split { text } => {
            for line in line_split::split(text.as_bytes()) {
                writeln!(out, "[{}]", String::from_utf8_lossy(line))?;
            }
        },
        Command::Encode { text } => {
            writeln!(out, "{}", codec::encode(text))?;
        },
        Command::Inspect { document } => {
            let decoded = render::decode_document(document.trim())?;
            writeln!(out, "{}", serde_json::to_string_pretty(&decoded.metadata)?)?;
            writeln!(out, "{}", String::from_utf8_lossy(&decoded.svg))?;
        },
    }
    Ok(())
}
