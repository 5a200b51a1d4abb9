use anyhow::{Context, Result};
use log::info;

use shapemer::chain_shapemers;
use shapemer::io::{AtomSelector, CorpusWriter, ProteinNetReader, proteinnet_corpus_name};

use super::alphafold::count_families;
use crate::cli::ProteinnetArgs;
use crate::config::build_shapemer_config;
use crate::display::{
    Context as DisplayContext, CorpusStats, Progress, print_corpus_summary, print_parameters,
};
use crate::io::{create_output, open_input};
use crate::util::text::plural;

const TOTAL_STEPS: u8 = 2;

pub fn run_proteinnet(args: ProteinnetArgs, ctx: DisplayContext) -> Result<()> {
    let config = build_shapemer_config(&args.extraction)?;
    let atom = AtomSelector::from(args.atom);

    let output = args.output.clone().unwrap_or_else(|| {
        let stem = args
            .input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        args.input.with_file_name(proteinnet_corpus_name(
            &stem,
            config.kmer.resolution,
            config.radius.resolution,
        ))
    });

    if ctx.interactive {
        print_parameters(&config, false);
    }

    let mut progress = Progress::new(ctx.interactive, TOTAL_STEPS);

    progress.step("Extracting shapemers");
    let records = ProteinNetReader::new(open_input(&args.input)?)
        .evolutionary_entries(args.evo_entries);
    let mut corpus = CorpusWriter::new(create_output(Some(output.as_path()))?);
    let mut stats = CorpusStats::default();

    for record in records {
        let record =
            record.with_context(|| format!("Failed to parse {}", args.input.display()))?;
        let structure = record.clean(atom)?;
        stats.structures += 1;

        let tokens = chain_shapemers(&structure, &config)
            .with_context(|| format!("Failed to extract shapemers of '{}'", structure.id))?;
        count_families(&mut stats, &tokens);
        if corpus
            .write_document(&structure.id, &tokens)
            .with_context(|| format!("Failed to write corpus {}", output.display()))?
        {
            stats.documents += 1;
        } else {
            stats.unqualified += 1;
        }
    }
    progress.complete_step(
        "Extracting shapemers",
        &[
            &format!("{} read ({} atoms)", plural(stats.structures, "record"), atom),
            &format!("{} written", plural(stats.documents, "document")),
        ],
    );

    progress.step("Finalizing corpus");
    corpus
        .finish()
        .with_context(|| format!("Failed to write corpus {}", output.display()))?;
    progress.complete_step("Finalizing corpus", &[&output.display().to_string()]);
    progress.finish();

    info!(
        "wrote {} to {}",
        plural(stats.documents, "document"),
        output.display()
    );

    if ctx.interactive {
        print_corpus_summary(&stats);
    }

    Ok(())
}
