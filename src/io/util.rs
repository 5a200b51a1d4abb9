use super::{Format, error::Error};
use flate2::read::GzDecoder;
use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

/// Fixed-column slice that tolerates short lines.
pub(crate) fn column(line: &str, start: usize, end: usize) -> &str {
    let len = line.len();
    if start >= len {
        return "";
    }
    let end = end.min(len);
    line.get(start..end).unwrap_or("")
}

pub fn is_gzip(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("gz"))
}

/// Infers the structure format from the extension, looking through a
/// trailing `.gz`.
pub fn infer_format(path: &Path) -> Option<Format> {
    let inner = if is_gzip(path) {
        Path::new(path.file_stem()?)
    } else {
        path
    };
    let ext = inner.extension()?.to_str()?.to_lowercase();
    match ext.as_str() {
        "pdb" | "ent" => Some(Format::Pdb),
        "cif" | "mmcif" => Some(Format::Mmcif),
        _ => None,
    }
}

/// Opens a structure file, transparently decompressing gzip input.
pub fn open_structure(path: &Path) -> Result<(Box<dyn BufRead>, Format), Error> {
    let format = infer_format(path)
        .ok_or_else(|| Error::UnknownExtension(path.display().to_string()))?;
    let file = File::open(path)?;
    let reader: Box<dyn BufRead> = if is_gzip(path) {
        Box::new(BufReader::new(GzDecoder::new(file)))
    } else {
        Box::new(BufReader::new(file))
    };
    Ok((reader, format))
}

/// Corpus identifier of a structure file: its name without the last extension.
///
/// `AF-P69905-F1-model_v1.pdb.gz` becomes `AF-P69905-F1-model_v1.pdb`.
pub fn structure_id(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// UniProt accession embedded in an AlphaFold file stem (`AF-<accession>-F1-...`).
pub fn accession(stem: &str) -> Option<&str> {
    stem.split('-').nth(1).filter(|s| !s.is_empty())
}

/// Structure files directly inside `dir`, sorted by name.
pub fn structure_files(dir: &Path) -> Result<Vec<PathBuf>, Error> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && infer_format(&path).is_some() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Sub-directories of `root` whose name starts with `prefix`, sorted by name.
///
/// AlphaFold proteome archives unpack into folders named after the proteome
/// (`UP000005640_9606_HUMAN`), hence the default `UP0` prefix upstream.
pub fn proteome_folders(root: &Path, prefix: &str) -> Result<Vec<PathBuf>, Error> {
    let mut folders = Vec::new();
    for entry in fs::read_dir(root)? {
        let path = entry?.path();
        let matches = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.starts_with(prefix));
        if path.is_dir() && matches {
            folders.push(path);
        }
    }
    folders.sort();
    Ok(folders)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::Compression;
    use flate2::write::GzEncoder;
    use std::io::{Read, Write};

    #[test]
    fn infers_formats_through_gzip() {
        assert_eq!(infer_format(Path::new("a/AF-P1-F1.pdb.gz")), Some(Format::Pdb));
        assert_eq!(infer_format(Path::new("x.CIF")), Some(Format::Mmcif));
        assert_eq!(infer_format(Path::new("x.ent")), Some(Format::Pdb));
        assert_eq!(infer_format(Path::new("x.txt.gz")), None);
        assert_eq!(infer_format(Path::new("noext")), None);
    }

    #[test]
    fn ids_and_accessions_follow_file_stems() {
        let id = structure_id(Path::new("/d/AF-Q9Y6K1-F1-model_v1.pdb.gz"));
        assert_eq!(id, "AF-Q9Y6K1-F1-model_v1.pdb");
        assert_eq!(accession(&id), Some("Q9Y6K1"));
        assert_eq!(accession("nodash"), None);
    }

    #[test]
    fn column_handles_short_lines() {
        assert_eq!(column("ATOM", 0, 6), "ATOM");
        assert_eq!(column("ATOM", 10, 12), "");
        assert_eq!(column("ATOM  12345", 6, 11), "12345");
    }

    #[test]
    fn opens_gzip_structures() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("AF-P1-F1-model_v1.pdb.gz");
        let mut encoder = GzEncoder::new(File::create(&path).unwrap(), Compression::default());
        encoder.write_all(b"HEADER    TEST\n").unwrap();
        encoder.finish().unwrap();

        let (mut reader, format) = open_structure(&path).unwrap();
        let mut text = String::new();
        reader.read_to_string(&mut text).unwrap();
        assert_eq!(format, Format::Pdb);
        assert_eq!(text, "HEADER    TEST\n");
    }

    #[test]
    fn lists_sorted_folders_and_files() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir(root.join("UP000002_B")).unwrap();
        fs::create_dir(root.join("UP000001_A")).unwrap();
        fs::create_dir(root.join("other")).unwrap();
        File::create(root.join("UP000001_A").join("b.pdb")).unwrap();
        File::create(root.join("UP000001_A").join("a.cif.gz")).unwrap();
        File::create(root.join("UP000001_A").join("notes.txt")).unwrap();

        let folders = proteome_folders(root, "UP0").unwrap();
        let names: Vec<_> = folders
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["UP000001_A", "UP000002_B"]);

        let files = structure_files(&folders[0]).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.cif.gz", "b.pdb"]);
    }
}
