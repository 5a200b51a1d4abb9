use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid or unsupported residue name: '{0}'")]
pub struct ParseAminoAcidError(String);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid split family tag: '{0}'")]
pub struct ParseSplitFamilyError(String);

/// The twenty standard amino acids plus the common non-standard residues
/// that AlphaFold and PDB entries carry in `ATOM` records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AminoAcid {
    Ala,
    Arg,
    Asn,
    Asp,
    Cys,
    Gln,
    Glu,
    Gly,
    His,
    Ile,
    Leu,
    Lys,
    Met,
    Phe,
    Pro,
    Ser,
    Thr,
    Trp,
    Tyr,
    Val,
    Sec,
    Pyl,
    /// Selenomethionine, reported as methionine in one-letter sequences.
    Mse,
}

impl AminoAcid {
    pub fn one_letter(&self) -> char {
        match self {
            AminoAcid::Ala => 'A',
            AminoAcid::Arg => 'R',
            AminoAcid::Asn => 'N',
            AminoAcid::Asp => 'D',
            AminoAcid::Cys => 'C',
            AminoAcid::Gln => 'Q',
            AminoAcid::Glu => 'E',
            AminoAcid::Gly => 'G',
            AminoAcid::His => 'H',
            AminoAcid::Ile => 'I',
            AminoAcid::Leu => 'L',
            AminoAcid::Lys => 'K',
            AminoAcid::Met => 'M',
            AminoAcid::Phe => 'F',
            AminoAcid::Pro => 'P',
            AminoAcid::Ser => 'S',
            AminoAcid::Thr => 'T',
            AminoAcid::Trp => 'W',
            AminoAcid::Tyr => 'Y',
            AminoAcid::Val => 'V',
            AminoAcid::Sec => 'U',
            AminoAcid::Pyl => 'O',
            AminoAcid::Mse => 'M',
        }
    }

    pub fn three_letter(&self) -> &'static str {
        match self {
            AminoAcid::Ala => "ALA",
            AminoAcid::Arg => "ARG",
            AminoAcid::Asn => "ASN",
            AminoAcid::Asp => "ASP",
            AminoAcid::Cys => "CYS",
            AminoAcid::Gln => "GLN",
            AminoAcid::Glu => "GLU",
            AminoAcid::Gly => "GLY",
            AminoAcid::His => "HIS",
            AminoAcid::Ile => "ILE",
            AminoAcid::Leu => "LEU",
            AminoAcid::Lys => "LYS",
            AminoAcid::Met => "MET",
            AminoAcid::Phe => "PHE",
            AminoAcid::Pro => "PRO",
            AminoAcid::Ser => "SER",
            AminoAcid::Thr => "THR",
            AminoAcid::Trp => "TRP",
            AminoAcid::Tyr => "TYR",
            AminoAcid::Val => "VAL",
            AminoAcid::Sec => "SEC",
            AminoAcid::Pyl => "PYL",
            AminoAcid::Mse => "MSE",
        }
    }

    /// Inverse of [`one_letter`](Self::one_letter) for the standard set.
    ///
    /// `M` always maps to methionine; `X` and unknown letters yield `None`.
    pub fn from_one_letter(code: char) -> Option<Self> {
        let aa = match code.to_ascii_uppercase() {
            'A' => AminoAcid::Ala,
            'R' => AminoAcid::Arg,
            'N' => AminoAcid::Asn,
            'D' => AminoAcid::Asp,
            'C' => AminoAcid::Cys,
            'Q' => AminoAcid::Gln,
            'E' => AminoAcid::Glu,
            'G' => AminoAcid::Gly,
            'H' => AminoAcid::His,
            'I' => AminoAcid::Ile,
            'L' => AminoAcid::Leu,
            'K' => AminoAcid::Lys,
            'M' => AminoAcid::Met,
            'F' => AminoAcid::Phe,
            'P' => AminoAcid::Pro,
            'S' => AminoAcid::Ser,
            'T' => AminoAcid::Thr,
            'W' => AminoAcid::Trp,
            'Y' => AminoAcid::Tyr,
            'V' => AminoAcid::Val,
            'U' => AminoAcid::Sec,
            'O' => AminoAcid::Pyl,
            _ => return None,
        };
        Some(aa)
    }
}

/// One-letter code for a three-letter residue name, `X` when unknown.
pub fn one_letter_code(residue_name: &str) -> char {
    residue_name
        .parse::<AminoAcid>()
        .map(|aa| aa.one_letter())
        .unwrap_or('X')
}

impl fmt::Display for AminoAcid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.three_letter())
    }
}

impl FromStr for AminoAcid {
    type Err = ParseAminoAcidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ALA" => Ok(AminoAcid::Ala),
            "ARG" => Ok(AminoAcid::Arg),
            "ASN" => Ok(AminoAcid::Asn),
            "ASP" => Ok(AminoAcid::Asp),
            "CYS" => Ok(AminoAcid::Cys),
            "GLN" => Ok(AminoAcid::Gln),
            "GLU" => Ok(AminoAcid::Glu),
            "GLY" => Ok(AminoAcid::Gly),
            "HIS" | "HID" | "HIE" | "HIP" => Ok(AminoAcid::His),
            "ILE" => Ok(AminoAcid::Ile),
            "LEU" => Ok(AminoAcid::Leu),
            "LYS" => Ok(AminoAcid::Lys),
            "MET" => Ok(AminoAcid::Met),
            "PHE" => Ok(AminoAcid::Phe),
            "PRO" => Ok(AminoAcid::Pro),
            "SER" => Ok(AminoAcid::Ser),
            "THR" => Ok(AminoAcid::Thr),
            "TRP" => Ok(AminoAcid::Trp),
            "TYR" => Ok(AminoAcid::Tyr),
            "VAL" => Ok(AminoAcid::Val),
            "SEC" => Ok(AminoAcid::Sec),
            "PYL" => Ok(AminoAcid::Pyl),
            "MSE" => Ok(AminoAcid::Mse),
            _ => Err(ParseAminoAcidError(s.to_string())),
        }
    }
}

/// Extraction family of a moment invariant: fixed-length sequence windows
/// or spatial neighbourhoods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SplitFamily {
    Kmer,
    Radius,
}

impl SplitFamily {
    /// Single-character prefix used in shapemer tokens.
    pub fn tag(&self) -> char {
        match self {
            SplitFamily::Kmer => 'k',
            SplitFamily::Radius => 'r',
        }
    }

    pub fn from_tag(tag: char) -> Option<Self> {
        match tag {
            'k' => Some(SplitFamily::Kmer),
            'r' => Some(SplitFamily::Radius),
            _ => None,
        }
    }
}

impl fmt::Display for SplitFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SplitFamily::Kmer => write!(f, "KMER_CUT"),
            SplitFamily::Radius => write!(f, "RADIUS"),
        }
    }
}

impl FromStr for SplitFamily {
    type Err = ParseSplitFamilyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "kmer" | "kmer_cut" | "k" => Ok(SplitFamily::Kmer),
            "radius" | "r" => Ok(SplitFamily::Radius),
            _ => Err(ParseSplitFamilyError(s.to_string())),
        }
    }
}
