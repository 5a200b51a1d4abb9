use super::{Format, error::Error};
use crate::model::residue::Residue;
use crate::model::structure::Structure;
use std::fmt;
use std::io::{BufRead, Lines};
use std::str::FromStr;

/// DSSP secondary-structure letters accepted in `[SECONDARY]`.
const DSSP_LETTERS: &str = "LHBEGITS";
const RECORD_START: &str = "[ID]";
/// Coordinates in `[TERTIARY]` are stored in picometres.
const TERTIARY_SCALE: f64 = 100.0;
const CLEANED_CONFIDENCE: f64 = 100.0;

pub const DEFAULT_EVOLUTIONARY_ENTRIES: usize = 20;

/// Backbone atom taken from each residue's three `[TERTIARY]` rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AtomSelector {
    N,
    #[default]
    Ca,
    Cb,
}

impl AtomSelector {
    #[inline]
    pub fn offset(self) -> usize {
        match self {
            AtomSelector::N => 0,
            AtomSelector::Ca => 1,
            AtomSelector::Cb => 2,
        }
    }
}

impl fmt::Display for AtomSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AtomSelector::N => "n",
            AtomSelector::Ca => "ca",
            AtomSelector::Cb => "cb",
        };
        f.write_str(name)
    }
}

impl FromStr for AtomSelector {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "n" => Ok(AtomSelector::N),
            "ca" => Ok(AtomSelector::Ca),
            "cb" => Ok(AtomSelector::Cb),
            _ => Err(Error::InvalidAtom(s.to_string())),
        }
    }
}

/// One raw ProteinNet record, as laid out in the text file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProteinNetRecord {
    pub id: String,
    /// Line of the `[ID]` marker that opened this record.
    pub line: usize,
    pub primary: Option<String>,
    pub evolutionary: Vec<Vec<f64>>,
    pub secondary: Option<String>,
    /// Three rows per residue (N, CA, CB), so `3 * len(primary)` rows in total.
    pub tertiary: Vec<[f64; 3]>,
    pub mask: Option<Vec<bool>>,
}

impl ProteinNetRecord {
    /// Drops unresolved residues (mask `-`), picks one backbone atom per
    /// residue and rescales coordinates to Ångström.
    ///
    /// Every kept residue gets full confidence, since ProteinNet carries no
    /// per-residue quality score.
    pub fn clean(&self, atom: AtomSelector) -> Result<Structure, Error> {
        let primary = self.primary.as_deref().ok_or_else(|| self.missing("PRIMARY"))?;
        let mask = self.mask.as_ref().ok_or_else(|| self.missing("MASK"))?;
        if self.tertiary.is_empty() {
            return Err(self.missing("TERTIARY"));
        }

        let codes: Vec<char> = primary.chars().collect();
        if mask.len() != codes.len() {
            return Err(Error::parse(
                Format::ProteinNet,
                self.line,
                format!(
                    "record '{}' has {} mask entries for {} residues",
                    self.id,
                    mask.len(),
                    codes.len()
                ),
            ));
        }

        let mut sequence = String::new();
        let mut coordinates = Vec::new();
        for (n, (&code, &keep)) in codes.iter().zip(mask).enumerate() {
            if !keep {
                continue;
            }
            sequence.push(code);
            if let Some(row) = self.tertiary.get(n * 3 + atom.offset()) {
                coordinates.push(row.map(|v| v / TERTIARY_SCALE));
            }
        }

        let confidences = vec![CLEANED_CONFIDENCE; coordinates.len()];
        Structure::from_parts(self.id.clone(), coordinates, &sequence, confidences).map_err(
            |source| Error::LengthMismatch {
                id: self.id.clone(),
                source,
            },
        )
    }

    fn missing(&self, section: &'static str) -> Error {
        Error::MissingSection {
            id: self.id.clone(),
            section,
        }
    }
}

/// Streams [`ProteinNetRecord`]s out of a ProteinNet text file.
///
/// A line starting with `[ID]` opens a record; everything up to the next
/// such line belongs to it. Text before the first marker is ignored.
pub struct ProteinNetReader<R: BufRead> {
    lines: Lines<R>,
    line_no: usize,
    pending_start: Option<usize>,
    evolutionary_entries: usize,
}

impl<R: BufRead> ProteinNetReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_no: 0,
            pending_start: None,
            evolutionary_entries: DEFAULT_EVOLUTIONARY_ENTRIES,
        }
    }

    /// Number of rows in each `[EVOLUTIONARY]` section (20 in the public releases).
    pub fn evolutionary_entries(mut self, entries: usize) -> Self {
        self.evolutionary_entries = entries;
        self
    }

    fn next_line(&mut self) -> Option<Result<(usize, String), Error>> {
        let line = self.lines.next()?;
        self.line_no += 1;
        Some(line.map(|l| (self.line_no, l)).map_err(Error::from))
    }
}

impl<R: BufRead> Iterator for ProteinNetReader<R> {
    type Item = Result<ProteinNetRecord, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        let start = match self.pending_start.take() {
            Some(ln) => ln,
            None => loop {
                match self.next_line()? {
                    Ok((ln, line)) if line.starts_with(RECORD_START) => break ln,
                    Ok(_) => continue,
                    Err(e) => return Some(Err(e)),
                }
            },
        };

        let mut body = Vec::new();
        while let Some(item) = self.next_line() {
            match item {
                Ok((ln, line)) if line.starts_with(RECORD_START) => {
                    self.pending_start = Some(ln);
                    break;
                }
                Ok(entry) => body.push(entry),
                Err(e) => return Some(Err(e)),
            }
        }

        Some(parse_record(start, &body, self.evolutionary_entries))
    }
}

fn parse_record(
    start: usize,
    body: &[(usize, String)],
    evolutionary_entries: usize,
) -> Result<ProteinNetRecord, Error> {
    let id = body
        .first()
        .map(|(_, l)| l.trim().to_string())
        .filter(|id| !id.is_empty())
        .ok_or_else(|| Error::parse(Format::ProteinNet, start, "record has no identifier"))?;

    let mut record = ProteinNetRecord {
        id,
        line: start,
        ..Default::default()
    };

    let mut i = 1;
    while i < body.len() {
        match body[i].1.trim_end() {
            "[PRIMARY]" => {
                let (_, line) = data_line(body, i + 1, "PRIMARY")?;
                record.primary = Some(line.trim().to_string());
                i += 2;
            }
            "[EVOLUTIONARY]" => {
                let mut rows = Vec::with_capacity(evolutionary_entries);
                for offset in 1..=evolutionary_entries {
                    let (ln, line) = data_line(body, i + offset, "EVOLUTIONARY")?;
                    rows.push(parse_floats(line, *ln)?);
                }
                record.evolutionary = rows;
                i += evolutionary_entries + 1;
            }
            "[SECONDARY]" => {
                let (ln, line) = data_line(body, i + 1, "SECONDARY")?;
                let line = line.trim();
                if let Some(bad) = line.chars().find(|c| !DSSP_LETTERS.contains(*c)) {
                    return Err(Error::parse(
                        Format::ProteinNet,
                        *ln,
                        format!("unknown DSSP letter '{bad}'"),
                    ));
                }
                record.secondary = Some(line.to_string());
                i += 2;
            }
            "[TERTIARY]" => {
                let mut axes = Vec::with_capacity(3);
                for offset in 1..=3 {
                    let (ln, line) = data_line(body, i + offset, "TERTIARY")?;
                    axes.push(parse_floats(line, *ln)?);
                }
                if axes[1].len() != axes[0].len() || axes[2].len() != axes[0].len() {
                    return Err(Error::parse(
                        Format::ProteinNet,
                        body[i].0,
                        "tertiary axes have different lengths",
                    ));
                }
                record.tertiary = (0..axes[0].len())
                    .map(|j| [axes[0][j], axes[1][j], axes[2][j]])
                    .collect();
                i += 4;
            }
            "[MASK]" => {
                let (ln, line) = data_line(body, i + 1, "MASK")?;
                let mask = line
                    .trim()
                    .chars()
                    .map(|c| match c {
                        '+' => Ok(true),
                        '-' => Ok(false),
                        other => Err(Error::parse(
                            Format::ProteinNet,
                            *ln,
                            format!("unexpected mask symbol '{other}'"),
                        )),
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                record.mask = Some(mask);
                i += 2;
            }
            _ => i += 1,
        }
    }

    Ok(record)
}

fn data_line<'a>(
    body: &'a [(usize, String)],
    index: usize,
    section: &str,
) -> Result<&'a (usize, String), Error> {
    body.get(index).ok_or_else(|| {
        let line = body.last().map(|(ln, _)| *ln).unwrap_or(0);
        Error::parse(
            Format::ProteinNet,
            line,
            format!("[{section}] section ends before its data"),
        )
    })
}

fn parse_floats(line: &str, ln: usize) -> Result<Vec<f64>, Error> {
    line.split_whitespace()
        .map(|v| {
            v.parse::<f64>()
                .map_err(|_| Error::parse(Format::ProteinNet, ln, format!("invalid number '{v}'")))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const TWO_RECORDS: &str = "\
[ID]
TBM#T0865
[PRIMARY]
ABC
[EVOLUTIONARY]
0.1 0.2 0.3
0.4 0.5 0.6
[SECONDARY]
LHE
[TERTIARY]
0 100 200 300 400 500 600 700 800
0 0 0 0 0 0 0 0 0
0 0 0 0 0 0 0 0 -900
[MASK]
+-+

[ID]
1ABC_1_A
[PRIMARY]
GG
[TERTIARY]
1 2 3 4 5 6
1 2 3 4 5 6
1 2 3 4 5 6
[MASK]
++
";

    fn records(text: &str) -> Vec<ProteinNetRecord> {
        ProteinNetReader::new(Cursor::new(text.to_string()))
            .evolutionary_entries(2)
            .collect::<Result<Vec<_>, _>>()
            .unwrap()
    }

    #[test]
    fn splits_file_on_id_markers() {
        let records = records(TWO_RECORDS);
        assert_eq!(records.len(), 2);

        let first = &records[0];
        assert_eq!(first.id, "TBM#T0865");
        assert_eq!(first.line, 1);
        assert_eq!(first.primary.as_deref(), Some("ABC"));
        assert_eq!(first.evolutionary, vec![vec![0.1, 0.2, 0.3], vec![0.4, 0.5, 0.6]]);
        assert_eq!(first.secondary.as_deref(), Some("LHE"));
        assert_eq!(first.tertiary.len(), 9);
        assert_eq!(first.tertiary[8], [800.0, 0.0, -900.0]);
        assert_eq!(first.mask, Some(vec![true, false, true]));

        assert_eq!(records[1].id, "1ABC_1_A");
        assert_eq!(records[1].line, 17);
    }

    #[test]
    fn clean_keeps_resolved_alpha_carbons() {
        let record = &records(TWO_RECORDS)[0];
        let structure = record.clean(AtomSelector::Ca).unwrap();

        assert_eq!(structure.sequence(), "AC");
        assert_eq!(structure.len(), 2);
        assert_eq!(structure.coordinates(), vec![[1.0, 0.0, 0.0], [7.0, 0.0, 0.0]]);
        assert_eq!(structure.confidences(), vec![100.0, 100.0]);
    }

    #[test]
    fn clean_honours_atom_offset() {
        let record = &records(TWO_RECORDS)[0];
        let n = record.clean(AtomSelector::N).unwrap();
        let cb = record.clean(AtomSelector::Cb).unwrap();
        assert_eq!(n.coordinates()[1], [6.0, 0.0, 0.0]);
        assert_eq!(cb.coordinates()[1], [8.0, 0.0, -9.0]);
    }

    #[test]
    fn atom_selector_parsing() {
        assert_eq!("ca".parse::<AtomSelector>().unwrap(), AtomSelector::Ca);
        assert_eq!("CB".parse::<AtomSelector>().unwrap(), AtomSelector::Cb);
        assert_eq!(AtomSelector::default().to_string(), "ca");
        assert!(matches!("o".parse::<AtomSelector>(), Err(Error::InvalidAtom(s)) if s == "o"));
    }

    #[test]
    fn short_tertiary_is_a_length_mismatch() {
        let mut record = records(TWO_RECORDS).remove(0);
        record.tertiary.truncate(3);
        let err = record.clean(AtomSelector::Ca).unwrap_err();
        assert!(matches!(err, Error::LengthMismatch { ref id, .. } if id == "TBM#T0865"));
    }

    #[test]
    fn mask_length_must_match_primary() {
        let mut record = records(TWO_RECORDS).remove(1);
        record.mask = Some(vec![true]);
        match record.clean(AtomSelector::Ca).unwrap_err() {
            Error::Parse { format, line, .. } => {
                assert_eq!(format, Format::ProteinNet);
                assert_eq!(line, 17);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn missing_sections_are_reported() {
        let text = "[ID]\nX\n[PRIMARY]\nAA\n";
        let record = records(text).remove(0);
        let err = record.clean(AtomSelector::Ca).unwrap_err();
        assert!(matches!(err, Error::MissingSection { section: "MASK", .. }));
    }

    #[test]
    fn rejects_unknown_secondary_letters() {
        let text = "[ID]\nX\n[SECONDARY]\nLQ\n";
        let err = ProteinNetReader::new(Cursor::new(text))
            .next()
            .unwrap()
            .unwrap_err();
        assert!(matches!(err, Error::Parse { line: 4, .. }));
    }
}
