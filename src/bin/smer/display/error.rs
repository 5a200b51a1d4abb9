use std::io::{self, Write};

use anyhow::Error;

use crate::util::text::wrap;

#[rustfmt::skip]
pub fn print_error(err: &Error) {
    let mut stderr = io::stderr().lock();

    let _ = writeln!(stderr);
    let _ = writeln!(stderr, "   ╔══════════════════════════════════════════════════════════════╗");
    let _ = writeln!(stderr, "   ║  ✗ Error                                                     ║");
    let _ = writeln!(stderr, "   ╟──────────────────────────────────────────────────────────────╢");

    for line in wrap(&err.to_string(), 59) {
        let _ = writeln!(stderr, "   ║  {:<59} ║", line);
    }

    let mut source = err.source();
    while let Some(cause) = source {
        let _ = writeln!(stderr, "   ╟──────────────────────────────────────────────────────────────╢");
        let _ = writeln!(stderr, "   ║  Caused by:                                                  ║");
        for line in wrap(&cause.to_string(), 57) {
            let _ = writeln!(stderr, "   ║    {:<57} ║", line);
        }
        source = cause.source();
    }

    let hints = HintCollector::collect(err);
    if !hints.is_empty() {
        let _ = writeln!(stderr, "   ╟──────────────────────────────────────────────────────────────╢");
        let _ = writeln!(stderr, "   ║  Hints:                                                      ║");
        for hint in hints {
            let wrapped = wrap(&hint, 55);
            if let Some((first, rest)) = wrapped.split_first() {
                let _ = writeln!(stderr, "   ║    • {:<55} ║", first);
                for line in rest {
                    let _ = writeln!(stderr, "   ║      {:<55} ║", line);
                }
            }
        }
    }

    let _ = writeln!(stderr, "   ╚══════════════════════════════════════════════════════════════╝");
    let _ = writeln!(stderr);
}

#[derive(Default)]
struct HintCollector {
    hints: Vec<String>,
    has_typed_hints: bool,
}

impl HintCollector {
    fn collect(err: &Error) -> Vec<String> {
        let mut collector = Self::default();

        collector.collect_io_hints(err);
        collector.collect_shape_hints(err);
        collector.collect_render_hints(err);
        collector.collect_uniprot_hints(err);

        if !collector.has_typed_hints {
            collector.collect_fallback_hints(err);
        }

        collector.hints
    }

    fn add(&mut self, hint: impl Into<String>) {
        self.hints.push(hint.into());
    }

    fn mark_typed(&mut self) {
        self.has_typed_hints = true;
    }

    fn collect_io_hints(&mut self, err: &Error) {
        use shapemer::io::Error as IoError;

        let Some(io_err) = err.downcast_ref::<IoError>() else {
            return;
        };

        self.mark_typed();

        match io_err {
            IoError::Io { source } => self.collect_std_io_hints(source),

            IoError::Parse { format, line, .. } => {
                self.add(format!(
                    "Parser encountered an issue near line {} in {} input",
                    line, format
                ));
                self.add("Inspect the file around that line for malformed entries");
                self.add_format_specific_parse_hints(*format);
            }

            IoError::UnsupportedReadFormat(fmt) => {
                self.add(format!("{} files cannot be read as a single structure", fmt));
                self.add("Use 'smer proteinnet' for ProteinNet text files");
            }

            IoError::UnknownExtension(path) => {
                self.add(format!("Could not tell the format of '{}'", path));
                self.add("Supported extensions: .pdb, .ent, .cif, .mmcif, each optionally .gz");
            }

            IoError::NoResidues(fmt) => {
                self.add(format!("The {} input has no alpha-carbon ATOM records", fmt));
                self.add("Only protein chains of the first model are read");
            }

            IoError::MissingSection { section, .. } => {
                self.add(format!("Every record needs a [{}] section", section));
                self.add("Check that the file is a complete ProteinNet text file");
            }

            IoError::InvalidAtom(_) => {
                self.add("Choose --atom n, ca or cb");
            }

            IoError::LengthMismatch { id, .. } => {
                self.add(format!(
                    "Record '{}' has a sequence and coordinates of different lengths",
                    id
                ));
                self.add("Check --evo-entries matches the number of [EVOLUTIONARY] rows");
            }

            IoError::TopicMatrix(_) => {
                self.add("The weights file must be tab-separated with a vocabulary header");
                self.add("Topic rows are counted from zero; check --topic");
            }
        }
    }

    fn collect_std_io_hints(&mut self, source: &std::io::Error) {
        use std::io::ErrorKind;

        match source.kind() {
            ErrorKind::NotFound => {
                self.add("File or directory not found");
                self.add("Check the path spelling and ensure the file exists");
            }

            ErrorKind::PermissionDenied => {
                self.add("Permission denied accessing the file");
                self.add("Check file permissions with `ls -la`");
            }

            ErrorKind::InvalidData => {
                self.add("File contains invalid or corrupt data");
                self.add("Gzipped files must end in .gz and be complete");
            }

            ErrorKind::UnexpectedEof => {
                self.add("Unexpected end of file encountered");
                self.add("The file may be truncated or incomplete");
            }

            ErrorKind::BrokenPipe => {
                self.add("Broken pipe, the output consumer terminated");
                self.add("This may occur when piping to commands like `head`");
            }

            _ => {
                self.add("I/O operation failed");
                self.add("Check file path, permissions, and disk space");
            }
        }
    }

    fn add_format_specific_parse_hints(&mut self, format: shapemer::io::Format) {
        use shapemer::io::Format;

        match format {
            Format::Pdb => {
                self.add("PDB: Check ATOM record formatting (columns 1-80)");
                self.add("PDB: Coordinates occupy columns 31-54, B-factor 61-66");
            }

            Format::Mmcif => {
                self.add("mmCIF: Verify _atom_site loop headers and row alignment");
                self.add("mmCIF: Check quoting of values containing spaces");
            }

            Format::ProteinNet => {
                self.add("ProteinNet: [SECONDARY] uses DSSP letters, [MASK] only + and -");
                self.add("ProteinNet: [TERTIARY] holds three lines of 3N values");
            }
        }
    }

    fn collect_shape_hints(&mut self, err: &Error) {
        use shapemer::ShapeError;

        let Some(shape_err) = err.downcast_ref::<ShapeError>() else {
            return;
        };

        self.mark_typed();

        match shape_err {
            ShapeError::Config(_) => {
                self.add("Configuration file has invalid TOML or unknown keys");
                self.add("Sections: [segmentation], [kmer], [radius], [projection]");
            }

            ShapeError::InvalidParameter { name, .. } => {
                self.add(format!("Adjust '{}' in the configuration or its flag", name));
            }

            ShapeError::EmptySegment | ShapeError::SegmentTooShort { .. } => {
                self.add("The structure is too short for the chosen window");
                self.add("Lower --kmer-size or --length-threshold");
            }
        }
    }

    fn collect_render_hints(&mut self, err: &Error) {
        use shapemer::render::Error as RenderError;

        let Some(render_err) = err.downcast_ref::<RenderError>() else {
            return;
        };

        self.mark_typed();

        match render_err {
            RenderError::InvalidMaxValue(_) => {
                self.add("All projected scores are zero or --max-value is not positive");
                self.add("Check the topic has weight on this structure's shapemers");
            }

            RenderError::TooFewResidues(_) => {
                self.add("A plot needs at least two residues");
            }

            RenderError::InvalidUpsampleRate => {
                self.add("Use --upsample 1 or more");
            }

            RenderError::LengthMismatch { .. } | RenderError::Draw(_) => {
                self.add("Plot rendering failed; write .tsv output instead");
            }
        }
    }

    fn collect_uniprot_hints(&mut self, err: &Error) {
        use shapemer::uniprot::Error as UniprotError;

        let Some(uniprot_err) = err.downcast_ref::<UniprotError>() else {
            return;
        };

        self.mark_typed();

        match uniprot_err {
            UniprotError::Io(source) => self.collect_std_io_hints(source),

            UniprotError::Http(_) | UniprotError::Status { .. } => {
                self.add("Could not reach UniProt");
                self.add("Check network access and try again later");
            }

            UniprotError::RetriesExhausted { .. } => {
                self.add("UniProt kept failing; the partial output was removed");
                self.add("Rerun later, finished folders are skipped");
                self.add("Raise --attempts or --retry-delay for flaky connections");
            }

            UniprotError::Rejected { .. } => {
                self.add("UniProt refused the request");
                self.add("Check the --columns selection and accession format");
            }

            UniprotError::UnknownColumn(_) => {
                self.add("Use catalogued column names or database(<abbrev>)");
            }
        }
    }

    fn collect_fallback_hints(&mut self, err: &Error) {
        let msg = error_chain_text(err);

        if msg.contains("no such file") || msg.contains("not found") {
            self.add("Check that the file path is correct");
            self.add("Verify the file exists and is readable");
            return;
        }

        if msg.contains("permission denied") {
            self.add("Check file permissions with `ls -la`");
            return;
        }

        if msg.contains("no proteome folders") {
            self.add("ROOT must contain the unpacked proteome folders");
            self.add("Use --prefix to match differently named folders");
        }
    }
}

fn error_chain_text(err: &Error) -> String {
    let mut text = err.to_string();

    let mut source = err.source();
    while let Some(cause) = source {
        text.push('\n');
        text.push_str(&cause.to_string());
        source = cause.source();
    }

    text.to_lowercase()
}
