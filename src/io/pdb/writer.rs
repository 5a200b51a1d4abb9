use crate::io::error::Error;
use crate::model::structure::Structure;
use crate::model::types::AminoAcid;
use std::io::Write;

/// Writes the alpha-carbon trace as PDB with one score per residue in the
/// B-factor column, for colouring by topic weight in a molecular viewer.
pub fn write_scores<W: Write>(mut writer: W, structure: &Structure, scores: &[f64]) -> Result<(), Error> {
    if scores.len() != structure.len() {
        return Err(Error::length_mismatch(
            structure.id.clone(),
            structure.len(),
            structure.len(),
            scores.len(),
        ));
    }

    writeln!(writer, "REMARK   1 {}", structure.id)?;
    for (i, (residue, score)) in structure.residues.iter().zip(scores).enumerate() {
        let name = AminoAcid::from_one_letter(residue.code)
            .map(|aa| aa.three_letter())
            .unwrap_or("UNK");
        let [x, y, z] = residue.position;
        writeln!(
            writer,
            "ATOM  {:>5}  CA  {:>3} A{:>4}    {:>8.3}{:>8.3}{:>8.3}{:>6.2}{:>6.2}           C",
            i + 1,
            name,
            i + 1,
            x,
            y,
            z,
            1.0,
            score
        )?;
    }
    writeln!(writer, "TER")?;
    writeln!(writer, "END")?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::{Format, StructureReader};
    use std::io::Cursor;

    fn sample() -> Structure {
        Structure::from_parts(
            "AF-P1-F1-model_v1",
            vec![[1.0, 2.0, 3.0], [4.8, 2.0, 3.0], [8.6, 2.5, -1.25]],
            "MKX",
            vec![90.0, 80.0, 70.0],
        )
        .unwrap()
    }

    #[test]
    fn scores_land_in_b_factor_column() {
        let structure = sample();
        let mut buf = Vec::new();
        write_scores(&mut buf, &structure, &[0.5, 1.25, 0.0]).unwrap();

        let reread = StructureReader::new(Cursor::new(buf), Format::Pdb)
            .read()
            .unwrap();
        assert_eq!(reread.sequence(), "MKX");
        assert_eq!(reread.confidences(), vec![0.5, 1.25, 0.0]);
        assert_eq!(reread.coordinates(), structure.coordinates());
    }

    #[test]
    fn rejects_score_count_mismatch() {
        let err = write_scores(Vec::new(), &sample(), &[1.0]).unwrap_err();
        assert!(matches!(err, Error::LengthMismatch { .. }));
    }
}
