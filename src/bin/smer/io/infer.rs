use std::path::Path;

/// What `smer project` writes to a given output path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputKind {
    /// `residue<TAB>code<TAB>score` table.
    Scores,
    /// SVG plot of the projected trace.
    Plot,
    /// Alpha-carbon PDB with scores as B-factors.
    Structure,
}

pub fn output(path: &Path) -> Option<OutputKind> {
    let ext = path.extension()?.to_str()?.to_lowercase();
    match ext.as_str() {
        "tsv" | "txt" => Some(OutputKind::Scores),
        "svg" => Some(OutputKind::Plot),
        "pdb" | "ent" => Some(OutputKind::Structure),
        _ => None,
    }
}
