use std::io::{self, Write};

use shapemer::ShapemerConfig;

use crate::util::convert::spread_display_name;
use crate::util::text::truncate;

const INDENT: &str = "      ";

const BOX_INNER_WIDTH: usize = 62;
const SAFE_TABLE_WIDTH: usize = BOX_INNER_WIDTH - INDENT.len();

/// Counters collected while building a corpus.
#[derive(Debug, Default, Clone)]
pub struct CorpusStats {
    pub folders: usize,
    pub structures: usize,
    pub documents: usize,
    pub unqualified: usize,
    pub failed: usize,
    pub kmer_tokens: usize,
    pub radius_tokens: usize,
}

impl CorpusStats {
    pub fn tokens(&self) -> usize {
        self.kmer_tokens + self.radius_tokens
    }
}

pub fn print_parameters(config: &ShapemerConfig, segmented: bool) {
    let stderr = io::stderr();
    let mut out = stderr.lock();

    let mut rows = Vec::new();
    if segmented {
        let seg = &config.segmentation;
        rows.push((
            "Segmentation",
            format!("pLDDT ≥ {}, > {} residues", seg.confidence_threshold, seg.length_threshold),
        ));
        rows.push(("Smoothing", format!("σ = {}, truncate {}", seg.sigma, seg.truncate)));
    }
    rows.push((
        "KMER",
        format!("{} residues, resolution {}", config.kmer.split_size, config.kmer.resolution),
    ));
    rows.push((
        "RADIUS",
        format!("{} Å, resolution {}", config.radius.split_size, config.radius.resolution),
    ));

    print_kv_table(&mut out, "Extraction Parameters", &rows);
}

pub fn print_corpus_summary(stats: &CorpusStats) {
    let stderr = io::stderr();
    let mut out = stderr.lock();

    let mut rows = Vec::new();
    if stats.folders > 0 {
        rows.push(("Folders", stats.folders.to_string()));
    }
    rows.push(("Structures", stats.structures.to_string()));
    rows.push(("Documents", stats.documents.to_string()));
    rows.push(("Unqualified", stats.unqualified.to_string()));
    rows.push(("Failed", stats.failed.to_string()));
    rows.push(("Shapemers", stats.tokens().to_string()));
    print_kv_table(&mut out, "Corpus Summary", &rows);

    if stats.tokens() > 0 {
        let families = [
            ("KMER".to_string(), stats.kmer_tokens),
            ("RADIUS".to_string(), stats.radius_tokens),
        ];
        print_distribution_table(&mut out, "Shapemer Families", &families, stats.tokens());
    }
}

pub fn print_projection_summary(id: &str, topic: usize, config: &ShapemerConfig, scores: &[f64]) {
    let stderr = io::stderr();
    let mut out = stderr.lock();

    let (min, max) = scores
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), s| (lo.min(*s), hi.max(*s)));
    let mean = if scores.is_empty() {
        0.0
    } else {
        scores.iter().sum::<f64>() / scores.len() as f64
    };

    let rows = vec![
        ("Structure", id.to_string()),
        ("Topic", topic.to_string()),
        ("Residues", scores.len().to_string()),
        ("KMER spread", spread_display_name(config.projection.kmer_spread).to_string()),
        ("Gamma", format!("{}", config.projection.gamma)),
        ("Score range", format!("{:.4} … {:.4}", min, max)),
        ("Mean score", format!("{:.4}", mean)),
    ];
    print_kv_table(&mut out, "Projection Summary", &rows);
}

fn print_distribution_table(
    out: &mut impl Write,
    title: &str,
    data: &[(String, usize)],
    total: usize,
) {
    let name_w = 10usize;
    let count_w = 10usize;
    let sep_overhead = 6;
    let dist_w = SAFE_TABLE_WIDTH.saturating_sub(name_w + count_w + sep_overhead);
    let max_bar_width = dist_w.saturating_sub(8).min(20);

    let rule = |left: &str, mid: &str, right: &str| {
        format!(
            "{INDENT}{left}{}{mid}{}{mid}{}{right}",
            "─".repeat(name_w + 2),
            "─".repeat(count_w + 2),
            "─".repeat(dist_w + 2)
        )
    };

    let _ = writeln!(out, "{INDENT}┌─ {} ─┐", truncate(title, SAFE_TABLE_WIDTH - 6));
    let _ = writeln!(out, "{}", rule("┌", "┬", "┐"));
    let _ = writeln!(
        out,
        "{INDENT}│ {:<name_w$} │ {:>count_w$} │ {:<dist_w$} │",
        "Family", "Count", "Distribution"
    );
    let _ = writeln!(out, "{}", rule("├", "┼", "┤"));

    for (name, count) in data {
        let pct = (*count as f64 / total as f64) * 100.0;
        let dist_cell = format!("{}  {:>5.1}%", make_bar(pct, max_bar_width), pct);
        let _ = writeln!(
            out,
            "{INDENT}│ {:<name_w$} │ {:>count_w$} │ {:<dist_w$} │",
            truncate(name, name_w),
            count,
            dist_cell
        );
    }

    let _ = writeln!(out, "{}", rule("└", "┴", "┘"));
}

fn print_kv_table(out: &mut impl Write, title: &str, rows: &[(&str, String)]) {
    let key_w = 16usize;
    let sep_overhead = 6;
    let val_w = SAFE_TABLE_WIDTH.saturating_sub(key_w + sep_overhead);

    let rule = |left: &str, mid: &str, right: &str| {
        format!(
            "{INDENT}{left}{}{mid}{}{right}",
            "─".repeat(key_w + 2),
            "─".repeat(val_w + 2)
        )
    };

    let _ = writeln!(out, "{INDENT}┌─ {} ─┐", truncate(title, SAFE_TABLE_WIDTH - 6));
    let _ = writeln!(out, "{}", rule("┌", "┬", "┐"));
    let _ = writeln!(out, "{INDENT}│ {:<key_w$} │ {:>val_w$} │", "Metric", "Value");
    let _ = writeln!(out, "{}", rule("├", "┼", "┤"));

    for (key, val) in rows {
        let _ = writeln!(
            out,
            "{INDENT}│ {:<key_w$} │ {:>val_w$} │",
            truncate(key, key_w),
            truncate(val, val_w)
        );
    }

    let _ = writeln!(out, "{}", rule("└", "┴", "┘"));
}

fn make_bar(pct: f64, max_width: usize) -> String {
    let filled = ((pct / 100.0) * max_width as f64).round() as usize;
    let empty = max_width.saturating_sub(filled);
    format!("{}{}", "█".repeat(filled), "░".repeat(empty))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bar_fills_proportionally() {
        assert_eq!(make_bar(50.0, 4), "██░░");
        assert_eq!(make_bar(0.0, 3), "░░░");
    }

    #[test]
    fn kv_table_rows_have_equal_width() {
        let mut buf = Vec::new();
        print_kv_table(&mut buf, "Test", &[("Documents", "12".to_string())]);
        let text = String::from_utf8(buf).unwrap();
        let widths: Vec<usize> = text.lines().skip(1).map(|l| l.chars().count()).collect();
        assert!(widths.windows(2).all(|w| w[0] == w[1]), "{text}");
    }
}
