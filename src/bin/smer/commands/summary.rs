use std::io::Write;

use anyhow::{Context, Result};
use log::warn;

use shapemer::io::util::structure_id;
use shapemer::{StructureSummary, summarize};

use super::{read_structure, scan_proteomes};
use crate::cli::SummaryArgs;
use crate::display::{Context as DisplayContext, Progress};
use crate::io::create_output;
use crate::util::text::plural;

const TOTAL_STEPS: u8 = 2;

pub fn run_summary(args: SummaryArgs, ctx: DisplayContext) -> Result<()> {
    let mut progress = Progress::new(ctx.interactive, TOTAL_STEPS);

    progress.step("Scanning proteome folders");
    let proteomes = scan_proteomes(&args.root, &args.prefix)?;
    let total: usize = proteomes.iter().map(|(_, files)| files.len()).sum();
    progress.complete_step(
        "Scanning proteome folders",
        &[&plural(total, "structure")],
    );

    progress.counted_step("Summarizing structures", total);
    let mut out = create_output(args.output.as_deref())?;
    writeln!(out, "id\tmedian_confidence\tlength\tconfident_length")?;

    let mut failed = 0;
    for path in proteomes.iter().flat_map(|(_, files)| files) {
        progress.advance(&structure_id(path));
        let structure = match read_structure(path) {
            Ok(s) => s,
            Err(e) => {
                warn!("skipping {}: {:#}", path.display(), e);
                failed += 1;
                continue;
            }
        };
        write_row(&mut out, &summarize(&structure, args.threshold))?;
    }
    out.flush().context("Failed to write summary")?;

    progress.complete_step(
        "Summarizing structures",
        &[
            &format!("confident residues: pLDDT > {}", args.threshold),
            &format!("{} skipped", plural(failed, "unreadable file")),
        ],
    );
    progress.finish();

    Ok(())
}

fn write_row<W: Write>(out: &mut W, summary: &StructureSummary) -> std::io::Result<()> {
    writeln!(
        out,
        "{}\t{:.2}\t{}\t{}",
        summary.id, summary.median_confidence, summary.length, summary.confident_length
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_layout() {
        let mut buf = Vec::new();
        let summary = StructureSummary {
            id: "AF-P1-F1-model_v1".to_string(),
            median_confidence: 87.126,
            length: 120,
            confident_length: 98,
        };
        write_row(&mut buf, &summary).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "AF-P1-F1-model_v1\t87.13\t120\t98\n"
        );
    }
}
