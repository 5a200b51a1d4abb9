use anyhow::{Context, Result};
use log::{info, warn};

use shapemer::io::util::structure_id;
use shapemer::io::{CorpusWriter, alphafold_corpus_name};
use shapemer::{Shapemer, SplitFamily, segment_shapemers};

use super::{folder_name, read_structure, scan_proteomes};
use crate::cli::AlphafoldArgs;
use crate::config::{apply_segmentation, build_shapemer_config};
use crate::display::{
    Context as DisplayContext, CorpusStats, Progress, print_corpus_summary, print_parameters,
};
use crate::io::create_output;
use crate::util::text::plural;

const TOTAL_STEPS: u8 = 3;

pub fn run_alphafold(args: AlphafoldArgs, ctx: DisplayContext) -> Result<()> {
    let mut config = build_shapemer_config(&args.extraction)?;
    apply_segmentation(&mut config, &args.segmentation)?;

    let output = args.output.clone().unwrap_or_else(|| {
        args.root.join(alphafold_corpus_name(
            config.kmer.resolution,
            config.radius.resolution,
            config.segmentation.length_threshold,
        ))
    });

    if ctx.interactive {
        print_parameters(&config, true);
    }

    let mut progress = Progress::new(ctx.interactive, TOTAL_STEPS);

    progress.step("Scanning proteome folders");
    let proteomes = scan_proteomes(&args.root, &args.prefix)?;
    let total: usize = proteomes.iter().map(|(_, files)| files.len()).sum();
    progress.complete_step(
        "Scanning proteome folders",
        &[&format!(
            "{} in {}",
            plural(total, "structure"),
            plural(proteomes.len(), "folder")
        )],
    );

    progress.counted_step("Extracting shapemers", total);
    let mut corpus = CorpusWriter::new(create_output(Some(output.as_path()))?);
    let mut stats = CorpusStats {
        folders: proteomes.len(),
        ..CorpusStats::default()
    };

    for (folder, files) in &proteomes {
        info!("{}: {}", folder_name(folder), plural(files.len(), "structure"));
        for path in files {
            let id = structure_id(path);
            progress.advance(&id);
            stats.structures += 1;

            let tokens = match read_structure(path)
                .and_then(|s| segment_shapemers(&s, &config).map_err(anyhow::Error::from))
            {
                Ok(Some(tokens)) => tokens,
                Ok(None) => {
                    stats.unqualified += 1;
                    continue;
                }
                Err(e) => {
                    warn!("skipping {}: {:#}", path.display(), e);
                    stats.failed += 1;
                    continue;
                }
            };

            count_families(&mut stats, &tokens);
            if corpus
                .write_document(&id, &tokens)
                .with_context(|| format!("Failed to write corpus {}", output.display()))?
            {
                stats.documents += 1;
            } else {
                stats.unqualified += 1;
            }
        }
    }
    progress.complete_step(
        "Extracting shapemers",
        &[
            &format!("{} written", plural(stats.documents, "document")),
            &format!("{} skipped", plural(stats.failed, "unreadable file")),
        ],
    );

    progress.step("Finalizing corpus");
    corpus
        .finish()
        .with_context(|| format!("Failed to write corpus {}", output.display()))?;
    progress.complete_step("Finalizing corpus", &[&output.display().to_string()]);
    progress.finish();

    info!(
        "wrote {} ({} of {} structures) to {}",
        plural(stats.documents, "document"),
        stats.documents,
        stats.structures,
        output.display()
    );

    if ctx.interactive {
        print_corpus_summary(&stats);
    }

    Ok(())
}

pub(super) fn count_families(stats: &mut CorpusStats, tokens: &[Shapemer]) {
    let kmer = tokens
        .iter()
        .filter(|t| t.family == SplitFamily::Kmer)
        .count();
    stats.kmer_tokens += kmer;
    stats.radius_tokens += tokens.len() - kmer;
}
