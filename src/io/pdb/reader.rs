use crate::io::{Format, StructureReader, error::Error, util::column};
use crate::model::residue::Residue;
use crate::model::structure::Structure;
use crate::model::types::one_letter_code;
use std::io::BufRead;

pub fn read<R: BufRead>(builder: StructureReader<R>) -> Result<Structure, Error> {
    let mut header_id: Option<String> = None;
    let mut residues = Vec::new();
    let mut in_model = false;
    let mut last_residue: Option<(String, String)> = None;

    for (idx, line) in builder.reader.lines().enumerate() {
        let line = line?;
        let ln = idx + 1;

        if line.starts_with("MODEL") {
            if in_model {
                break;
            }
            in_model = true;
            continue;
        }
        if line.starts_with("ENDMDL") {
            break;
        }
        if line.starts_with("HEADER") {
            let code = column(&line, 62, 66).trim();
            if !code.is_empty() {
                header_id = Some(code.to_string());
            }
            continue;
        }
        if !line.starts_with("ATOM") || column(&line, 12, 16).trim() != "CA" {
            continue;
        }

        let alt_loc = column(&line, 16, 17).trim();
        if !(alt_loc.is_empty() || alt_loc == "A") {
            continue;
        }

        let chain = column(&line, 21, 22).to_string();
        let seq = column(&line, 22, 27).to_string();
        let key = (chain, seq);
        if last_residue.as_ref() == Some(&key) {
            continue;
        }

        let position = [
            parse_coord(&line, 30, 38, ln, "x")?,
            parse_coord(&line, 38, 46, ln, "y")?,
            parse_coord(&line, 46, 54, ln, "z")?,
        ];

        let b_field = column(&line, 60, 66).trim();
        let confidence = if b_field.is_empty() {
            0.0
        } else {
            b_field
                .parse::<f64>()
                .map_err(|_| Error::parse(Format::Pdb, ln, "invalid B-factor field"))?
        };

        let code = one_letter_code(column(&line, 17, 20));
        residues.push(Residue::new(code, position, confidence));
        last_residue = Some(key);
    }

    if residues.is_empty() {
        return Err(Error::NoResidues(Format::Pdb));
    }

    let id = builder
        .id
        .or(header_id)
        .unwrap_or_else(|| "UNKNOWN".to_string());

    Ok(Structure { id, residues })
}

fn parse_coord(line: &str, start: usize, end: usize, ln: usize, axis: &str) -> Result<f64, Error> {
    column(line, start, end)
        .trim()
        .parse::<f64>()
        .map_err(|_| Error::parse(Format::Pdb, ln, format!("invalid {axis} coordinate")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const HEADER: &str =
        "HEADER    PLANT PROTEIN                           30-APR-81   1CRN              ";

    fn atom(serial: usize, name: &str, alt: char, res: &str, seq: i32, pos: [f64; 3], b: f64) -> String {
        format!(
            "ATOM  {:>5} {:<4}{}{:>3} A{:>4}    {:>8.3}{:>8.3}{:>8.3}{:>6.2}{:>6.2}           C",
            serial,
            format!(" {name}"),
            alt,
            res,
            seq,
            pos[0],
            pos[1],
            pos[2],
            1.0,
            b
        )
    }

    fn read_text(text: &str) -> Result<Structure, Error> {
        StructureReader::new(Cursor::new(text.to_string()), Format::Pdb).read()
    }

    #[test]
    fn reads_alpha_carbons_with_confidence() {
        let text = [
            HEADER.to_string(),
            atom(1, "N", ' ', "THR", 1, [17.0, 14.0, 3.6], 50.0),
            atom(2, "CA", ' ', "THR", 1, [16.9, 12.7, 4.3], 91.2),
            atom(3, "CA", ' ', "GLY", 2, [13.3, 12.1, 4.7], 70.0),
            "HETATM    4 CA    CA A 101       0.000   0.000   0.000  1.00 20.00          CA".to_string(),
        ]
        .join("\n");

        let structure = read_text(&text).unwrap();
        assert_eq!(structure.id, "1CRN");
        assert_eq!(structure.sequence(), "TG");
        assert_eq!(structure.confidences(), vec![91.2, 70.0]);
        assert_eq!(structure.coordinates()[1], [13.3, 12.1, 4.7]);
    }

    #[test]
    fn keeps_first_alternate_location_only() {
        let text = [
            atom(1, "CA", 'A', "SER", 1, [1.0, 0.0, 0.0], 80.0),
            atom(2, "CA", 'B', "SER", 1, [1.5, 0.0, 0.0], 80.0),
            atom(3, "CA", ' ', "ALA", 2, [4.8, 0.0, 0.0], 80.0),
        ]
        .join("\n");

        let structure = read_text(&text).unwrap();
        assert_eq!(structure.sequence(), "SA");
        assert_eq!(structure.coordinates()[0], [1.0, 0.0, 0.0]);
    }

    #[test]
    fn stops_after_first_model() {
        let text = [
            "MODEL        1".to_string(),
            atom(1, "CA", ' ', "LYS", 1, [0.0, 0.0, 0.0], 90.0),
            "ENDMDL".to_string(),
            "MODEL        2".to_string(),
            atom(1, "CA", ' ', "LYS", 1, [9.0, 9.0, 9.0], 90.0),
            "ENDMDL".to_string(),
        ]
        .join("\n");

        let structure = read_text(&text).unwrap();
        assert_eq!(structure.len(), 1);
        assert_eq!(structure.coordinates()[0], [0.0, 0.0, 0.0]);
    }

    #[test]
    fn unknown_residues_become_x() {
        let text = atom(1, "CA", ' ', "UNK", 1, [0.0, 0.0, 0.0], 90.0);
        let structure = StructureReader::new(Cursor::new(text), Format::Pdb)
            .id("custom")
            .read()
            .unwrap();
        assert_eq!(structure.id, "custom");
        assert_eq!(structure.sequence(), "X");
    }

    #[test]
    fn rejects_input_without_alpha_carbons() {
        let err = read_text("ATOM").unwrap_err();
        assert!(matches!(err, Error::NoResidues(Format::Pdb)));
    }

    #[test]
    fn reports_bad_coordinates_with_line_number() {
        let mut line = atom(1, "CA", ' ', "ALA", 1, [0.0, 0.0, 0.0], 90.0);
        line.replace_range(30..38, "  abcdef");
        let text = format!("{HEADER}\n{line}");

        match read_text(&text).unwrap_err() {
            Error::Parse { format, line, details } => {
                assert_eq!(format, Format::Pdb);
                assert_eq!(line, 2);
                assert_eq!(details, "invalid x coordinate");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
