mod alphafold;
mod project;
mod proteinnet;
mod summary;
mod uniprot;

use alphafold::run_alphafold;
use project::run_project;
use proteinnet::run_proteinnet;
use summary::run_summary;
use uniprot::run_uniprot;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};

use shapemer::Structure;
use shapemer::io::StructureReader;
use shapemer::io::util::{open_structure, proteome_folders, structure_files, structure_id};

use crate::cli::Command;
use crate::display::Context as DisplayContext;

pub fn dispatch(command: Command, ctx: DisplayContext) -> Result<()> {
    match command {
        Command::Alphafold(args) => run_alphafold(args, ctx),
        Command::Proteinnet(args) => run_proteinnet(args, ctx),
        Command::Project(args) => run_project(args, ctx),
        Command::Summary(args) => run_summary(args, ctx),
        Command::Uniprot(args) => run_uniprot(args, ctx),
    }
}

/// Reads one structure file, identified by its file stem.
fn read_structure(path: &Path) -> Result<Structure> {
    let (reader, format) =
        open_structure(path).with_context(|| format!("Failed to open {}", path.display()))?;
    StructureReader::new(reader, format)
        .id(structure_id(path))
        .read()
        .with_context(|| format!("Failed to read {}", path.display()))
}

/// Proteome folders under `root` paired with their structure files.
fn scan_proteomes(root: &Path, prefix: &str) -> Result<Vec<(PathBuf, Vec<PathBuf>)>> {
    let folders = proteome_folders(root, prefix)
        .with_context(|| format!("Failed to list {}", root.display()))?;
    if folders.is_empty() {
        bail!(
            "No proteome folders starting with '{}' in {}",
            prefix,
            root.display()
        );
    }

    folders
        .into_iter()
        .map(|folder| {
            let files = structure_files(&folder)
                .with_context(|| format!("Failed to list {}", folder.display()))?;
            Ok((folder, files))
        })
        .collect()
}

fn folder_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
