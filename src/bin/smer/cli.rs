use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(
    name = "smer",
    about = "Shapemer corpora from predicted protein structures",
    version,
    author,
    before_help = crate::display::banner_for_help(),
    propagate_version = true
)]
pub struct Cli {
    #[command(flatten)]
    pub output: OutputOptions,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Build a corpus from AlphaFold proteome folders (PDB/mmCIF, optionally gzipped)
    #[command(visible_alias = "af")]
    Alphafold(AlphafoldArgs),

    /// Build a corpus from a ProteinNet text file
    #[command(visible_alias = "pn")]
    Proteinnet(ProteinnetArgs),

    /// Project a topic's shapemer weights back onto residues
    #[command(visible_alias = "p")]
    Project(ProjectArgs),

    /// Tabulate confidence statistics per structure
    #[command(visible_alias = "s")]
    Summary(SummaryArgs),

    /// Fetch UniProt annotations for every proteome folder
    #[command(visible_alias = "u")]
    Uniprot(UniprotArgs),
}

/// Terminal output options shared by all commands.
#[derive(Args)]
pub struct OutputOptions {
    /// Suppress banner, progress and tables (for scripting)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase log verbosity (-v info, -vv debug); RUST_LOG takes precedence
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

/// Extraction parameters shared by the corpus and projection commands.
#[derive(Args)]
#[command(next_help_heading = "Shapemer Extraction")]
pub struct ExtractionOptions {
    /// Configuration file (TOML); flags below override its values
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Quantisation resolution of KMER shapemers
    #[arg(long = "resolution-kmer", value_name = "N")]
    pub resolution_kmer: Option<u32>,

    /// Quantisation resolution of RADIUS shapemers
    #[arg(long = "resolution-radius", value_name = "N")]
    pub resolution_radius: Option<u32>,

    /// Residues per KMER window
    #[arg(long = "kmer-size", value_name = "N")]
    pub kmer_size: Option<usize>,

    /// Neighbourhood radius of RADIUS shapemers (Å)
    #[arg(long = "radius", value_name = "Å")]
    pub radius: Option<f64>,
}

#[derive(Args)]
#[command(next_help_heading = "Confidence Segmentation")]
pub struct SegmentationOptions {
    /// Minimum smoothed confidence of a segment residue
    #[arg(long = "confidence-threshold", value_name = "PLDDT")]
    pub confidence_threshold: Option<f64>,

    /// Segments must be longer than this many residues
    #[arg(long = "length-threshold", value_name = "N")]
    pub length_threshold: Option<usize>,

    /// Gaussian smoothing width (residues)
    #[arg(long, value_name = "SIGMA")]
    pub sigma: Option<f64>,
}

#[derive(Args)]
pub struct AlphafoldArgs {
    /// Directory holding the unpacked proteome folders
    #[arg(value_name = "ROOT")]
    pub root: PathBuf,

    /// Only folders whose name starts with this prefix are read
    #[arg(long, value_name = "PREFIX", default_value = "UP0")]
    pub prefix: String,

    /// Corpus file (default: ROOT/AF_ids_corpus_resolution_<k>_<r>_threshold_<t>.txt)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub extraction: ExtractionOptions,

    #[command(flatten)]
    pub segmentation: SegmentationOptions,
}

#[derive(Args)]
pub struct ProteinnetArgs {
    /// ProteinNet text file (e.g. casp12/training_30)
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    /// Backbone atom whose coordinates are used
    #[arg(long, value_name = "ATOM", default_value = "ca")]
    pub atom: Atom,

    /// Rows in each record's [EVOLUTIONARY] section
    #[arg(long = "evo-entries", value_name = "N", default_value = "20")]
    pub evo_entries: usize,

    /// Corpus file (default: PDB_<stem>_ids_corpus_resolution_<k>_<r>.txt next to FILE)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub extraction: ExtractionOptions,
}

#[derive(Args)]
pub struct ProjectArgs {
    /// Structure file (PDB/mmCIF, optionally gzipped)
    #[arg(value_name = "STRUCTURE")]
    pub structure: PathBuf,

    /// Topic-by-shapemer weight matrix (TSV, vocabulary header)
    #[arg(short, long, value_name = "FILE")]
    pub weights: PathBuf,

    /// Zero-based topic row to project
    #[arg(short, long, value_name = "N")]
    pub topic: usize,

    /// Output file(s), repeatable; .tsv scores, .svg plot, .pdb B-factors (stdout TSV if omitted)
    #[arg(short, long, value_name = "FILE", action = ArgAction::Append)]
    pub output: Vec<PathBuf>,

    /// Divide each shapemer's weight by its sum over all topics
    #[arg(long)]
    pub normalize: bool,

    /// Accumulate KMER weights on the window's first residue only
    #[arg(long = "legacy-kmer-spread")]
    pub legacy_kmer_spread: bool,

    /// Score mapped to the top of the colour scale (default: highest score)
    #[arg(long = "max-value", value_name = "X")]
    pub max_value: Option<f64>,

    /// Distance decay of the similarity kernel (1/Å²)
    #[arg(long, value_name = "GAMMA")]
    pub gamma: Option<f64>,

    #[command(flatten)]
    pub extraction: ExtractionOptions,

    #[command(flatten)]
    pub plot: PlotOptions,
}

#[derive(Args)]
#[command(next_help_heading = "Plot Options")]
pub struct PlotOptions {
    /// Canvas height (px)
    #[arg(long, value_name = "PX", default_value = "500")]
    pub height: u32,

    /// Interpolated points per residue
    #[arg(long = "upsample", value_name = "N", default_value = "3")]
    pub upsample_rate: usize,

    /// Stroke width (px)
    #[arg(long = "line-width", value_name = "PX", default_value = "2")]
    pub line_width: u32,
}

#[derive(Args)]
pub struct SummaryArgs {
    /// Directory holding the unpacked proteome folders
    #[arg(value_name = "ROOT")]
    pub root: PathBuf,

    /// Only folders whose name starts with this prefix are read
    #[arg(long, value_name = "PREFIX", default_value = "UP0")]
    pub prefix: String,

    /// Residues above this confidence count as confident
    #[arg(long, value_name = "PLDDT", default_value = "70")]
    pub threshold: f64,

    /// TSV output (stdout if omitted)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct UniprotArgs {
    /// Directory holding the unpacked proteome folders
    #[arg(value_name = "ROOT")]
    pub root: PathBuf,

    /// Directory receiving one <folder>_uniprot.txt per proteome
    #[arg(long, value_name = "DIR")]
    pub aux: PathBuf,

    /// Only folders whose name starts with this prefix are read
    #[arg(long, value_name = "PREFIX", default_value = "UP0")]
    pub prefix: String,

    /// Columns to request (comma-separated; default selection if omitted)
    #[arg(long, value_name = "COLS", value_delimiter = ',')]
    pub columns: Vec<String>,

    /// Also request every database cross-reference UniProt lists
    #[arg(long = "all-databases")]
    pub all_databases: bool,

    #[command(flatten)]
    pub request: RequestOptions,
}

#[derive(Args)]
#[command(next_help_heading = "Request Options")]
pub struct RequestOptions {
    /// Accessions per request
    #[arg(long = "chunk-size", value_name = "N", default_value = "100")]
    pub chunk_size: usize,

    /// Attempts per chunk before giving up
    #[arg(long, value_name = "N", default_value = "5")]
    pub attempts: u32,

    /// Pause before the first retry, doubled after each failure (seconds)
    #[arg(long = "retry-delay", value_name = "SECS", default_value = "1")]
    pub retry_delay: u64,

    /// Per-request timeout (seconds)
    #[arg(long, value_name = "SECS", default_value = "120")]
    pub timeout: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Atom {
    N,
    Ca,
    Cb,
}

pub fn parse() -> Cli {
    Cli::parse()
}
