use std::fs;
use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use log::info;

use shapemer::io::{TopicMatrix, write_pdb_scores};
use shapemer::render::{best_projection, confidence_opacities, render};
use shapemer::{KmerSpread, Structure, project_topic_weights};

use super::read_structure;
use crate::cli::ProjectArgs;
use crate::config::{build_render_options, build_shapemer_config};
use crate::display::{Context as DisplayContext, Progress, print_projection_summary};
use crate::io::{OutputKind, create_output, infer_output_kind, open_input};

const TOTAL_STEPS: u8 = 3;

pub fn run_project(args: ProjectArgs, ctx: DisplayContext) -> Result<()> {
    let outputs = resolve_outputs(&args.output)?;

    let mut config = build_shapemer_config(&args.extraction)?;
    if args.legacy_kmer_spread {
        config.projection.kmer_spread = KmerSpread::Anchor;
    }
    if let Some(gamma) = args.gamma {
        config.projection.gamma = gamma;
    }
    config.validate().context("Invalid projection parameters")?;

    let mut progress = Progress::new(ctx.interactive, TOTAL_STEPS);

    progress.step("Loading structure and topic weights");
    let structure = read_structure(&args.structure)?;
    let matrix = TopicMatrix::read(open_input(&args.weights)?)
        .with_context(|| format!("Failed to read topic weights: {}", args.weights.display()))?;
    let matrix = if args.normalize {
        matrix.normalized()
    } else {
        matrix
    };
    let weights = matrix.row(args.topic)?;
    progress.complete_step(
        "Loading structure and topic weights",
        &[
            &format!("{} ({} residues)", structure.id, structure.len()),
            &format!(
                "{} topics × {} shapemers{}",
                matrix.topics(),
                matrix.vocabulary().len(),
                if args.normalize { ", normalized" } else { "" }
            ),
        ],
    );

    progress.step("Projecting topic weights");
    let scores = project_topic_weights(&structure.coordinates(), &weights, &config)
        .context("Projection failed")?;
    progress.complete_step("Projecting topic weights", &[]);

    progress.step("Writing output");
    if outputs.is_empty() {
        write_scores(create_output(None)?, &structure, &scores)?;
    }
    for (path, kind) in &outputs {
        match kind {
            OutputKind::Scores => write_scores(create_output(Some(path.as_path()))?, &structure, &scores)?,
            OutputKind::Structure => write_pdb_scores(create_output(Some(path.as_path()))?, &structure, &scores)
                .with_context(|| format!("Failed to write {}", path.display()))?,
            OutputKind::Plot => {
                let svg = plot(&structure, &scores, &args)?;
                fs::write(path, svg)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
            }
        }
        info!("wrote {}", path.display());
    }
    let written: Vec<String> = outputs.iter().map(|(p, _)| p.display().to_string()).collect();
    let written_ref: Vec<&str> = written.iter().map(|s| s.as_str()).collect();
    progress.complete_step("Writing output", &written_ref);
    progress.finish();

    if ctx.interactive {
        print_projection_summary(&structure.id, args.topic, &config, &scores);
    }

    Ok(())
}

fn resolve_outputs(paths: &[PathBuf]) -> Result<Vec<(PathBuf, OutputKind)>> {
    paths
        .iter()
        .map(|path| match infer_output_kind(path) {
            Some(kind) => Ok((path.clone(), kind)),
            None => bail!(
                "Cannot tell what to write to '{}'; use a .tsv, .svg or .pdb extension",
                path.display()
            ),
        })
        .collect()
}

fn write_scores<W: Write>(mut out: W, structure: &Structure, scores: &[f64]) -> Result<()> {
    writeln!(out, "residue\tcode\tconfidence\tscore")?;
    for (i, (residue, score)) in structure.residues.iter().zip(scores).enumerate() {
        writeln!(
            out,
            "{}\t{}\t{:.2}\t{:.6}",
            i + 1,
            residue.code,
            residue.confidence,
            score
        )?;
    }
    out.flush().context("Failed to write scores")?;
    Ok(())
}

fn plot(structure: &Structure, scores: &[f64], args: &ProjectArgs) -> Result<String> {
    let max_value = args.max_value.unwrap_or_else(|| default_max_value(scores));
    let coords = best_projection(&structure.coordinates());
    let opacities = confidence_opacities(&structure.confidences());
    let svg = render(
        &coords,
        scores,
        &opacities,
        max_value,
        &build_render_options(&args.plot),
    )
    .with_context(|| format!("Failed to plot {}", structure.id))?;
    Ok(svg)
}

/// Highest score, or 1.0 when nothing scored above zero so the trace draws in the lowest colour.
fn default_max_value(scores: &[f64]) -> f64 {
    let max = scores.iter().copied().fold(0.0, f64::max);
    if max > 0.0 { max } else { 1.0 }
}
