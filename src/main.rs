use anyhow::{bail, Context, Result};
use archive_nav::{ArchiveManager, ModelConfig};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "archive-nav", version, about = "Browse and build zip/tar/7z archives")]
struct Cli {
    /// Config file (defaults to $ARCHIVE_NAV_CONFIG or the user config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List one directory of an archive
    List {
        archive: PathBuf,
        #[arg(default_value = "")]
        dir: String,
        /// Walk every directory below `dir`
        #[arg(short, long)]
        recursive: bool,
    },
    /// Extract entries into the temp directory
    Extract {
        archive: PathBuf,
        #[arg(required = true)]
        entries: Vec<String>,
    },
    /// Extract the whole archive (into the staging directory by default)
    ExtractAll {
        archive: PathBuf,
        destination: Option<PathBuf>,
    },
    /// Build `<temp>/<name>.<suffix>` from the staging directory
    Pack {
        name: String,
        #[arg(default_value = "zip")]
        suffix: String,
    },
    /// Empty the staging and temp directories
    Clear,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => ModelConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => ModelConfig::load()?,
    };
    let mut manager = ArchiveManager::new(config)?;

    match cli.command {
        Command::List {
            archive,
            dir,
            recursive,
        } => {
            manager
                .open_archive(&archive)
                .with_context(|| format!("opening {}", archive.display()))?;
            print_directory(&mut manager, &dir, recursive);
        }
        Command::Extract { archive, entries } => {
            manager.open_archive(&archive)?;
            let produced = manager.extract_entries(&entries);
            if produced.is_empty() {
                bail!("none of the requested entries were found");
            }
            for path in produced {
                println!("{}", path.display());
            }
        }
        Command::ExtractAll {
            archive,
            destination,
        } => {
            manager.open_archive(&archive)?;
            let destination = destination.unwrap_or_else(|| manager.staging_dir().to_path_buf());
            manager.extract_all(&destination)?;
            println!("{}", destination.display());
        }
        Command::Pack { name, suffix } => {
            let output = manager.save_as(&name, &suffix)?;
            println!("{}", output.display());
        }
        Command::Clear => manager.clear()?,
    }

    Ok(())
}

fn print_directory(manager: &mut ArchiveManager, dir: &str, recursive: bool) {
    manager.set_current_dir(dir);
    let rows = manager.rows().to_vec();
    for entry in &rows {
        if entry.is_dir {
            println!("d {}/", entry.full_path);
        } else {
            println!("- {}", entry.full_path);
        }
    }
    if recursive {
        for entry in rows.iter().filter(|e| e.is_dir) {
            print_directory(manager, &entry.full_path, true);
        }
    }
}
