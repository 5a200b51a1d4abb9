use crate::io::{Format, StructureReader, error::Error};
use crate::model::residue::Residue;
use crate::model::structure::Structure;
use crate::model::types::one_letter_code;
use std::io::BufRead;

const ATOM_SITE: &str = "_atom_site.";

pub fn read<R: BufRead>(builder: StructureReader<R>) -> Result<Structure, Error> {
    let lines = collect_lines(builder.reader)?;

    let block_id = lines
        .iter()
        .find_map(|(_, l)| l.strip_prefix("data_"))
        .map(|s| s.trim().to_string());

    let (headers, body_start) = find_atom_site_loop(&lines)
        .ok_or_else(|| Error::parse(Format::Mmcif, 1, "missing _atom_site loop"))?;
    let columns = Columns::resolve(&headers)
        .ok_or_else(|| Error::parse(Format::Mmcif, body_start, "_atom_site loop lacks coordinate columns"))?;

    let mut residues = Vec::new();
    let mut first_model: Option<String> = None;
    let mut last_residue: Option<(String, String)> = None;
    let mut pending: Vec<String> = Vec::new();

    for (ln, line) in &lines[body_start..] {
        let trimmed = line.trim_start();
        if trimmed.starts_with('_') || trimmed.starts_with("loop_") || trimmed.starts_with("data_") {
            break;
        }
        if trimmed.starts_with('#') || trimmed.is_empty() {
            continue;
        }
        if trimmed.starts_with(';') {
            return Err(Error::parse(
                Format::Mmcif,
                *ln,
                "multi-line text fields are not supported inside _atom_site",
            ));
        }

        pending.extend(tokenize(line));
        while pending.len() >= headers.len() {
            let row: Vec<String> = pending.drain(..headers.len()).collect();

            if let Some(model) = columns.value(&row, columns.model) {
                match &first_model {
                    None => first_model = Some(model.to_string()),
                    Some(first) if first != model => continue,
                    Some(_) => {}
                }
            }
            if columns.value(&row, columns.group) == Some("HETATM") {
                continue;
            }
            if columns.value(&row, columns.atom_name) != Some("CA") {
                continue;
            }
            if let Some(alt) = columns.value(&row, columns.alt_id) {
                if alt != "A" {
                    continue;
                }
            }

            let key = (
                columns.value(&row, columns.chain).unwrap_or("").to_string(),
                columns.value(&row, columns.seq_id).unwrap_or("").to_string(),
            );
            if last_residue.as_ref() == Some(&key) {
                continue;
            }

            let position = [
                columns.number(&row, columns.x, *ln, "x")?,
                columns.number(&row, columns.y, *ln, "y")?,
                columns.number(&row, columns.z, *ln, "z")?,
            ];
            let confidence = match columns.value(&row, columns.b_factor) {
                Some(v) => v
                    .parse::<f64>()
                    .map_err(|_| Error::parse(Format::Mmcif, *ln, "invalid B_iso_or_equiv value"))?,
                None => 0.0,
            };
            let code = one_letter_code(columns.value(&row, columns.residue_name).unwrap_or(""));

            residues.push(Residue::new(code, position, confidence));
            last_residue = Some(key);
        }
    }

    if residues.is_empty() {
        return Err(Error::NoResidues(Format::Mmcif));
    }

    let id = builder
        .id
        .or(block_id)
        .unwrap_or_else(|| "UNKNOWN".to_string());

    Ok(Structure { id, residues })
}

fn collect_lines<R: BufRead>(reader: R) -> Result<Vec<(usize, String)>, Error> {
    reader
        .lines()
        .enumerate()
        .map(|(i, line)| line.map(|v| (i + 1, v)).map_err(|e| Error::Io { source: e }))
        .collect()
}

/// Returns the `_atom_site` column names and the index of the first data line.
fn find_atom_site_loop(lines: &[(usize, String)]) -> Option<(Vec<String>, usize)> {
    let mut idx = 0;
    while idx < lines.len() {
        if lines[idx].1.trim() == "loop_" {
            let mut headers = Vec::new();
            let mut cursor = idx + 1;
            while cursor < lines.len() {
                let trimmed = lines[cursor].1.trim();
                match trimmed.strip_prefix(ATOM_SITE) {
                    Some(name) => headers.push(name.to_string()),
                    None => break,
                }
                cursor += 1;
            }
            if !headers.is_empty() {
                return Some((headers, cursor));
            }
        }
        idx += 1;
    }
    None
}

/// Splits a CIF data line into values, honouring single and double quotes.
fn tokenize(line: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let chars: Vec<char> = line.chars().collect();
    let mut i = 0;

    while i < chars.len() {
        if chars[i].is_whitespace() {
            i += 1;
            continue;
        }

        let quote = chars[i];
        if quote == '\'' || quote == '"' {
            let start = i + 1;
            let mut end = start;
            // A quote only closes a value when followed by whitespace or end of line.
            while end < chars.len()
                && !(chars[end] == quote && chars.get(end + 1).is_none_or(|c| c.is_whitespace()))
            {
                end += 1;
            }
            tokens.push(chars[start..end.min(chars.len())].iter().collect());
            i = end + 1;
        } else {
            let start = i;
            while i < chars.len() && !chars[i].is_whitespace() {
                i += 1;
            }
            tokens.push(chars[start..i].iter().collect());
        }
    }

    tokens
}

struct Columns {
    group: Option<usize>,
    atom_name: Option<usize>,
    alt_id: Option<usize>,
    residue_name: Option<usize>,
    chain: Option<usize>,
    seq_id: Option<usize>,
    x: usize,
    y: usize,
    z: usize,
    b_factor: Option<usize>,
    model: Option<usize>,
}

impl Columns {
    fn resolve(headers: &[String]) -> Option<Self> {
        let find = |names: &[&str]| {
            names
                .iter()
                .find_map(|name| headers.iter().position(|h| h == name))
        };

        Some(Self {
            group: find(&["group_PDB"]),
            atom_name: find(&["label_atom_id", "auth_atom_id"]),
            alt_id: find(&["label_alt_id"]),
            residue_name: find(&["label_comp_id", "auth_comp_id"]),
            chain: find(&["auth_asym_id", "label_asym_id"]),
            seq_id: find(&["auth_seq_id", "label_seq_id"]),
            x: find(&["Cartn_x"])?,
            y: find(&["Cartn_y"])?,
            z: find(&["Cartn_z"])?,
            b_factor: find(&["B_iso_or_equiv"]),
            model: find(&["pdbx_PDB_model_num"]),
        })
    }

    /// Column value, treating the CIF placeholders `?` and `.` as absent.
    fn value<'a>(&self, row: &'a [String], column: Option<usize>) -> Option<&'a str> {
        let value = row.get(column?)?.as_str();
        match value {
            "?" | "." => None,
            v => Some(v),
        }
    }

    fn number(&self, row: &[String], column: usize, ln: usize, axis: &str) -> Result<f64, Error> {
        self.value(row, Some(column))
            .and_then(|v| v.parse::<f64>().ok())
            .ok_or_else(|| Error::parse(Format::Mmcif, ln, format!("invalid Cartn_{axis} value")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const SAMPLE: &str = "\
data_AF-P00001-F1
#
_entry.id AF-P00001-F1
#
loop_
_atom_site.group_PDB
_atom_site.id
_atom_site.label_atom_id
_atom_site.label_alt_id
_atom_site.label_comp_id
_atom_site.label_asym_id
_atom_site.label_seq_id
_atom_site.Cartn_x
_atom_site.Cartn_y
_atom_site.Cartn_z
_atom_site.B_iso_or_equiv
_atom_site.pdbx_PDB_model_num
ATOM 1 N   . MET A 1 0.000 0.000 0.000 55.10 1
ATOM 2 CA  . MET A 1 1.458 0.000 0.000 56.20 1
ATOM 3 CA  . LYS A 2 5.258 0.000 0.000 88.75 1
ATOM 4 CA  A GLY A 3 9.058 0.000 0.000 91.00 1
ATOM 5 CA  B GLY A 3 9.558 0.000 0.000 91.00 1
HETATM 6 CA . CA B . 20.0 20.0 20.0 10.0 1
ATOM 7 CA  . SER A 1 1.000 1.000 1.000 99.00 2
#
";

    fn read_text(text: &str) -> Result<Structure, Error> {
        StructureReader::new(Cursor::new(text.to_string()), Format::Mmcif).read()
    }

    #[test]
    fn reads_first_model_alpha_carbons() {
        let structure = read_text(SAMPLE).unwrap();
        assert_eq!(structure.id, "AF-P00001-F1");
        assert_eq!(structure.sequence(), "MKG");
        assert_eq!(structure.confidences(), vec![56.2, 88.75, 91.0]);
        assert_eq!(structure.coordinates()[2], [9.058, 0.0, 0.0]);
    }

    #[test]
    fn missing_loop_is_a_parse_error() {
        let err = read_text("data_x\n_entry.id x\n").unwrap_err();
        assert!(matches!(err, Error::Parse { format: Format::Mmcif, .. }));
    }

    #[test]
    fn tokenizer_respects_quotes() {
        assert_eq!(tokenize("ATOM 1 \"O5'\" . A"), vec!["ATOM", "1", "O5'", ".", "A"]);
        assert_eq!(tokenize("'a b' c"), vec!["a b", "c"]);
        assert_eq!(tokenize("   "), Vec::<String>::new());
    }

    #[test]
    fn rows_may_wrap_across_lines() {
        let text = "\
loop_
_atom_site.label_atom_id
_atom_site.label_comp_id
_atom_site.Cartn_x
_atom_site.Cartn_y
_atom_site.Cartn_z
CA ALA
1.0 2.0 3.0
";
        let structure = read_text(text).unwrap();
        assert_eq!(structure.id, "UNKNOWN");
        assert_eq!(structure.sequence(), "A");
        assert_eq!(structure.coordinates()[0], [1.0, 2.0, 3.0]);
        assert_eq!(structure.confidences(), vec![0.0]);
    }
}
