use anyhow::{ensure, Context, Result};
use argh::FromArgs;
use exceedance::load::load_levels;
use exceedance::{ArrayXySequence, ExceedanceModel, Imt, ModelCache};
use log::info;
use std::io::{BufWriter, Write};

#[derive(FromArgs)]
/// Computes the probability of exceeding a range of ground motion levels,
/// given the median and log standard deviation of a ground motion model.
struct Config {
    #[argh(option, short = 'm', default = "ExceedanceModel::TruncationUpperOnly")]
    /// exceedance model key, e.g. TRUNCATION_UPPER_ONLY
    pub model: ExceedanceModel,

    #[argh(option)]
    /// median ground motion, in the units of the levels (g for accelerations)
    pub median: f64,

    #[argh(option, short = 's')]
    /// standard deviation of natural-log ground motion
    pub sigma: f64,

    #[argh(option, short = 'n', default = "default_truncation()")]
    /// truncation level, in standard deviations
    pub truncation: f64,

    #[argh(option)]
    /// intensity measure type; may be repeated (default PGA)
    pub imt: Vec<Imt>,

    #[argh(option)]
    /// file of ground motion levels, one per line, optionally gzipped
    pub levels: Option<String>,

    #[argh(option, default = "default_min()")]
    /// lowest level of the default log-spaced range
    pub min: f64,

    #[argh(option, default = "default_max()")]
    /// highest level of the default log-spaced range
    pub max: f64,

    #[argh(option, default = "default_count()")]
    /// number of levels in the default log-spaced range
    pub count: usize,

    #[argh(switch)]
    /// evaluate the levels of each curve in parallel
    pub parallel: bool,
}

fn default_truncation() -> f64 {
    3.0
}

fn default_min() -> f64 {
    0.0025
}

fn default_max() -> f64 {
    5.0
}

fn default_count() -> usize {
    20
}

/// Mean of log ground motion for a median given in linear units.
fn log_mean(median: f64) -> Result<f64> {
    ensure!(
        median > 0.0 && median.is_finite(),
        "--median must be a positive, finite ground motion, got {}",
        median
    );
    Ok(median.ln())
}

fn main() -> Result<()> {
    env_logger::init();

    let config: Config = argh::from_env();
    let imts = if config.imt.is_empty() {
        vec![Imt::PGA]
    } else {
        config.imt.clone()
    };
    info!(
        "model {} median {} sigma {} truncation {} imts {:?}",
        config.model, config.median, config.sigma, config.truncation, imts
    );
    if !config.model.uses_imt() && imts.len() > 1 {
        info!("{} ignores the imt, curves will be identical", config.model);
    }

    let template = match &config.levels {
        Some(path) => {
            let levels = load_levels(path)?;
            ArrayXySequence::from_levels(&levels)
                .with_context(|| format!("levels in {}", path))?
        }
        None => ArrayXySequence::log_spaced(config.min, config.max, config.count)?,
    };
    let mean = log_mean(config.median)?;

    let cache = ModelCache::new();
    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    writeln!(out, "imt,level,ln_level,probability")?;
    for imt in imts {
        let prepared = cache.get_or_create(config.model, imt)?;
        let mut curve = template.clone();
        if config.parallel {
            prepared.par_exceedance_curve(mean, config.sigma, config.truncation, &mut curve)?;
        } else {
            prepared.exceedance_curve(mean, config.sigma, config.truncation, &mut curve)?;
        }
        for point in curve.iter() {
            writeln!(out, "{},{},{},{}", imt, point.x().exp(), point.x(), point.y)?;
        }
    }
    out.flush()?;
    Ok(())
}
