use super::error::Error;
use std::collections::HashMap;
use std::io::BufRead;

/// Topic-by-shapemer weight matrix produced by a topic model.
///
/// The text form is tab-separated: the first line lists the vocabulary
/// (one shapemer token per column) and every following line is one topic's
/// weights in the same column order.
#[derive(Debug, Clone, PartialEq)]
pub struct TopicMatrix {
    vocabulary: Vec<String>,
    rows: Vec<Vec<f64>>,
}

impl TopicMatrix {
    pub fn new(vocabulary: Vec<String>, rows: Vec<Vec<f64>>) -> Result<Self, Error> {
        if vocabulary.is_empty() {
            return Err(Error::TopicMatrix("vocabulary is empty".into()));
        }
        if let Some((topic, row)) = rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != vocabulary.len())
        {
            return Err(Error::TopicMatrix(format!(
                "topic {topic} has {} weights for {} vocabulary entries",
                row.len(),
                vocabulary.len()
            )));
        }
        Ok(Self { vocabulary, rows })
    }

    pub fn read<R: BufRead>(reader: R) -> Result<Self, Error> {
        let mut lines = reader.lines();

        let header = match lines.next() {
            Some(line) => line?,
            None => return Err(Error::TopicMatrix("input is empty".into())),
        };
        let vocabulary: Vec<String> = header
            .split('\t')
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();

        let mut rows = Vec::new();
        for (idx, line) in lines.enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let row = line
                .split('\t')
                .map(|v| {
                    v.trim().parse::<f64>().map_err(|_| {
                        Error::TopicMatrix(format!("invalid weight '{}' on line {}", v.trim(), idx + 2))
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            rows.push(row);
        }

        Self::new(vocabulary, rows)
    }

    #[inline]
    pub fn topics(&self) -> usize {
        self.rows.len()
    }

    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    /// Rescales every vocabulary column so its weights sum to one across topics.
    ///
    /// Columns summing to zero are left at zero.
    pub fn normalized(&self) -> Self {
        let sums: Vec<f64> = (0..self.vocabulary.len())
            .map(|col| self.rows.iter().map(|row| row[col]).sum())
            .collect();

        let rows = self
            .rows
            .iter()
            .map(|row| {
                row.iter()
                    .zip(&sums)
                    .map(|(w, s)| if *s == 0.0 { 0.0 } else { w / s })
                    .collect()
            })
            .collect();

        Self {
            vocabulary: self.vocabulary.clone(),
            rows,
        }
    }

    /// Shapemer token to weight lookup for one topic.
    pub fn row(&self, topic: usize) -> Result<HashMap<String, f64>, Error> {
        let row = self.rows.get(topic).ok_or_else(|| {
            Error::TopicMatrix(format!(
                "topic {topic} is out of range ({} topics)",
                self.rows.len()
            ))
        })?;
        Ok(self.vocabulary.iter().cloned().zip(row.iter().copied()).collect())
    }
}
