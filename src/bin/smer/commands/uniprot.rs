use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use log::info;

use shapemer::io::util::{accession, structure_id};
use shapemer::uniprot::{HttpTransport, IdMapper, Transport, catalog, fetch_database_abbreviations};

use super::{folder_name, scan_proteomes};
use crate::cli::{RequestOptions, UniprotArgs};
use crate::display::{Context as DisplayContext, Progress};
use crate::util::text::plural;

const TOTAL_STEPS: u8 = 2;

pub fn run_uniprot(args: UniprotArgs, ctx: DisplayContext) -> Result<()> {
    fs::create_dir_all(&args.aux)
        .with_context(|| format!("Failed to create {}", args.aux.display()))?;

    let transport = HttpTransport::new(Duration::from_secs(args.request.timeout))
        .context("Failed to set up the HTTP client")?;

    let mut progress = Progress::new(ctx.interactive, TOTAL_STEPS);

    progress.step("Preparing column selection");
    let mut columns = if args.columns.is_empty() {
        catalog().default.clone()
    } else {
        args.columns.clone()
    };
    if args.all_databases {
        let databases = fetch_database_abbreviations(&transport)
            .context("Failed to fetch the UniProt database list")?;
        for database in databases {
            if !columns.contains(&database) {
                columns.push(database);
            }
        }
    }
    let selection = catalog().selection(&columns)?;
    progress.complete_step(
        "Preparing column selection",
        &[&plural(columns.len(), "column")],
    );

    let mapper = build_mapper(transport, selection, &args.request);
    let proteomes = scan_proteomes(&args.root, &args.prefix)?;

    progress.counted_step("Mapping accessions", proteomes.len());
    let mut fetched = 0;
    let mut skipped = 0;
    for (folder, files) in &proteomes {
        let name = folder_name(folder);
        progress.advance(&name);

        let target = args.aux.join(format!("{name}_uniprot.txt"));
        if target.exists() {
            info!("{name}: {} exists, skipping", target.display());
            skipped += 1;
            continue;
        }

        let chunks = map_folder(&mapper, files, &target)
            .with_context(|| format!("UniProt mapping failed for {name}"))?;
        info!("{name}: wrote {} to {}", plural(chunks, "chunk"), target.display());
        fetched += 1;
    }
    progress.complete_step(
        "Mapping accessions",
        &[
            &format!("{} fetched", plural(fetched, "proteome")),
            &format!("{} already present", plural(skipped, "proteome")),
        ],
    );
    progress.finish();

    Ok(())
}

fn build_mapper<T: Transport>(transport: T, columns: String, opts: &RequestOptions) -> IdMapper<T> {
    IdMapper::new(transport)
        .columns(columns)
        .chunk_size(opts.chunk_size)
        .max_attempts(opts.attempts)
        .retry_delay(Duration::from_secs(opts.retry_delay))
}

fn map_folder<T: Transport>(
    mapper: &IdMapper<T>,
    files: &[PathBuf],
    target: &Path,
) -> Result<usize> {
    let ids = accessions(files);
    Ok(mapper.map_to_file(&ids, target)?)
}

/// Accessions of AlphaFold files (`AF-<accession>-F1-...`), in file order.
fn accessions(files: &[PathBuf]) -> Vec<String> {
    files
        .iter()
        .filter_map(|path| accession(&structure_id(path)).map(str::to_string))
        .collect()
}
