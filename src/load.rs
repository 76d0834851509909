use anyhow::Context;
use anyhow::Result;
use flate2::read::GzDecoder;
use std::fs::File;
use std::io::prelude::*;
use std::io::BufReader;
use std::path::Path;

/// Loads ground motion levels, one per line, from a plain or gzipped
/// (`.gz`) text file. Blank lines and lines starting with `#` are skipped.
pub fn load_levels<P: AsRef<Path>>(path: P) -> Result<Vec<f64>> {
    let path = path.as_ref();
    let f = File::open(path).with_context(|| format!("reading {:?}", path))?;
    let levels = if path.extension().map_or(false, |ext| ext == "gz") {
        read_levels(BufReader::new(GzDecoder::new(f)))
    } else {
        read_levels(BufReader::new(f))
    };
    levels.with_context(|| format!("parsing {:?}", path))
}

pub fn read_levels<R: BufRead>(input: R) -> Result<Vec<f64>> {
    let mut levels = Vec::new();
    for (i, line) in input.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let level: f64 = fast_float::parse(line)
            .with_context(|| format!("line {}: not a number: {:?}", i + 1, line))?;
        levels.push(level);
    }
    Ok(levels)
}
