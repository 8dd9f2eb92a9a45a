use clap::{Parser, Subcommand};
use color_eyre::Result;
use env_logger::Env;
use log::info;
use std::path::PathBuf;

use topogen::topology::generate_topology;
use topogen::{config_loader, orchestrator, workspace};

/// Topology and provisioning scaffold generator for cyber-range sandboxes
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write topology.yml, containers.yml and the provisioning skeleton
    Generate {
        /// Path to the project YAML file
        #[arg(short, long)]
        config: PathBuf,

        /// Directory in which the <name>/ topology directory is created
        #[arg(short, long, default_value = ".")]
        output: PathBuf,
    },
    /// Print the topology.yml content without touching disk
    Render {
        /// Path to the project YAML file
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Copy a file or folder into a generated topology tree
    Import {
        /// File or folder to copy
        #[arg(short, long)]
        source: PathBuf,

        /// Destination directory
        #[arg(short, long)]
        target: PathBuf,
    },
    /// Delete a file or folder inside a generated topology tree
    Remove {
        /// File or folder to delete
        #[arg(short, long)]
        path: PathBuf,

        /// Directory the path must lie within
        #[arg(short, long)]
        root: PathBuf,
    },
}

fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    let args = Args::parse();

    // Initialize logging with default filter level of "info"
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    match args.command {
        Command::Generate { config, output } => {
            let project = config_loader::load_project(&config)?;
            let report = orchestrator::generate_project(&project, &output)?;
            info!("Topology saved at: {:?}", report.topology_file);
            if let Some(containers_file) = &report.containers_file {
                info!("Containers saved at: {:?}", containers_file);
            }
        }
        Command::Render { config } => {
            let project = config_loader::load_project(&config)?;
            print!("{}", generate_topology(&project.topology)?);
        }
        Command::Import { source, target } => {
            let (dest, _) = workspace::import_path(&source, &target)?;
            info!("Uploaded to {:?}", dest);
        }
        Command::Remove { path, root } => {
            workspace::remove_path(&path, &root)?;
        }
    }

    Ok(())
}
