// ============================================================
// Layer 6 - Result Reporter
// ============================================================
// Writes one `station<TAB>label` line per station, in station
// order, to any `Write` sink (stdout or a file). This is the only
// output of a run; nothing is written unless the caller asks.

use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};

use crate::domain::assignment::StationLabel;

/// Where the station→label pairs go
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportTarget {
    /// Return the pairs only
    None,
    Stdout,
    File(PathBuf),
}

pub struct ResultReporter {
    target: ReportTarget,
}

impl ResultReporter {
    pub fn new(target: ReportTarget) -> Self {
        Self { target }
    }

    pub fn emit(&self, pairs: &[StationLabel]) -> Result<()> {
        match &self.target {
            ReportTarget::None => Ok(()),
            ReportTarget::Stdout => {
                let stdout = io::stdout();
                write_pairs(&mut stdout.lock(), pairs).context("Cannot write labels to stdout")
            }
            ReportTarget::File(path) => write_file(path, pairs),
        }
    }
}

fn write_file(path: &Path, pairs: &[StationLabel]) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Cannot create '{}'", path.display()))?;
    let mut out = BufWriter::new(file);
    write_pairs(&mut out, pairs)
        .and_then(|_| out.flush())
        .with_context(|| format!("Cannot write labels to '{}'", path.display()))?;
    tracing::info!("Wrote {} station labels to '{}'", pairs.len(), path.display());
    Ok(())
}

pub fn write_pairs<W: Write>(out: &mut W, pairs: &[StationLabel]) -> io::Result<()> {
    for p in pairs {
        writeln!(out, "{}\t{}", p.station, p.label)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn pairs() -> Vec<StationLabel> {
        vec![
            StationLabel { station: "USW00094728".into(), label: 3 },
            StationLabel { station: "USW00023174".into(), label: 0 },
        ]
    }

    #[test]
    fn test_tab_separated_lines() {
        let mut buf = Vec::new();
        write_pairs(&mut buf, &pairs()).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "USW00094728\t3\nUSW00023174\t0\n");
    }

    #[test]
    fn test_file_target() {
        let dir  = TempDir::new().unwrap();
        let path = dir.path().join("labels.tsv");
        ResultReporter::new(ReportTarget::File(path.clone())).emit(&pairs()).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 2);
    }

    #[test]
    fn test_none_target_writes_nothing() {
        assert!(ResultReporter::new(ReportTarget::None).emit(&pairs()).is_ok());
    }
}
