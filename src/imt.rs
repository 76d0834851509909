//! Intensity measure types.
//!
//! The variant order is significant: spectral accelerations are declared by
//! increasing period, so the derived `Ord` compares them by period.

use crate::error::{Error, Result};
use std::fmt::Display;
use std::str::FromStr;

#[allow(clippy::upper_case_acronyms)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Imt {
    PGA,
    PGV,
    PGD,
    ASI,
    SI,
    DSI,
    CAV,
    DS575,
    DS595,
    AI,
    SA0P01,
    SA0P02,
    SA0P03,
    SA0P05,
    SA0P075,
    SA0P1,
    SA0P15,
    SA0P2,
    SA0P25,
    SA0P3,
    SA0P4,
    SA0P5,
    SA0P75,
    SA1P0,
    SA1P5,
    SA2P0,
    SA3P0,
    SA4P0,
    SA5P0,
    SA7P5,
    SA10P0,
}

use Imt::*;

const ALL: [Imt; 31] = [
    PGA, PGV, PGD, ASI, SI, DSI, CAV, DS575, DS595, AI, SA0P01, SA0P02, SA0P03, SA0P05, SA0P075,
    SA0P1, SA0P15, SA0P2, SA0P25, SA0P3, SA0P4, SA0P5, SA0P75, SA1P0, SA1P5, SA2P0, SA3P0, SA4P0,
    SA5P0, SA7P5, SA10P0,
];

impl Imt {
    pub fn all() -> &'static [Imt] {
        &ALL
    }

    /// Spectral accelerations, by increasing period.
    pub fn sa_imts() -> impl Iterator<Item = Imt> {
        ALL.iter().copied().filter(Imt::is_sa)
    }

    pub fn is_sa(&self) -> bool {
        self.period().is_some()
    }

    /// Spectral period in seconds, `None` for non-spectral types.
    pub fn period(&self) -> Option<f64> {
        let period = match self {
            SA0P01 => 0.01,
            SA0P02 => 0.02,
            SA0P03 => 0.03,
            SA0P05 => 0.05,
            SA0P075 => 0.075,
            SA0P1 => 0.1,
            SA0P15 => 0.15,
            SA0P2 => 0.2,
            SA0P25 => 0.25,
            SA0P3 => 0.3,
            SA0P4 => 0.4,
            SA0P5 => 0.5,
            SA0P75 => 0.75,
            SA1P0 => 1.0,
            SA1P5 => 1.5,
            SA2P0 => 2.0,
            SA3P0 => 3.0,
            SA4P0 => 4.0,
            SA5P0 => 5.0,
            SA7P5 => 7.5,
            SA10P0 => 10.0,
            _ => return None,
        };
        Some(period)
    }

    /// The spectral acceleration type with exactly this period.
    pub fn from_period(period: f64) -> Result<Imt> {
        Imt::sa_imts()
            .find(|imt| imt.period() == Some(period))
            .ok_or_else(|| Error::UnknownImt(format!("SA({})", period)))
    }

    pub fn name(&self) -> &'static str {
        match self {
            PGA => "PGA",
            PGV => "PGV",
            PGD => "PGD",
            ASI => "ASI",
            SI => "SI",
            DSI => "DSI",
            CAV => "CAV",
            DS575 => "DS575",
            DS595 => "DS595",
            AI => "AI",
            SA0P01 => "SA0P01",
            SA0P02 => "SA0P02",
            SA0P03 => "SA0P03",
            SA0P05 => "SA0P05",
            SA0P075 => "SA0P075",
            SA0P1 => "SA0P1",
            SA0P15 => "SA0P15",
            SA0P2 => "SA0P2",
            SA0P25 => "SA0P25",
            SA0P3 => "SA0P3",
            SA0P4 => "SA0P4",
            SA0P5 => "SA0P5",
            SA0P75 => "SA0P75",
            SA1P0 => "SA1P0",
            SA1P5 => "SA1P5",
            SA2P0 => "SA2P0",
            SA3P0 => "SA3P0",
            SA4P0 => "SA4P0",
            SA5P0 => "SA5P0",
            SA7P5 => "SA7P5",
            SA10P0 => "SA10P0",
        }
    }
}

impl Display for Imt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Imt {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let key = s.trim();
        ALL.iter()
            .copied()
            .find(|imt| imt.name().eq_ignore_ascii_case(key))
            .ok_or_else(|| Error::UnknownImt(s.to_owned()))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_sa_order_follows_period() {
        let sa: Vec<Imt> = Imt::sa_imts().collect();
        assert_eq!(sa.len(), 21);
        for pair in sa.windows(2) {
            assert!(pair[0] < pair[1]);
            assert!(pair[0].period().unwrap() < pair[1].period().unwrap());
        }
    }

    #[test]
    fn test_short_period_threshold() {
        assert!(SA0P5 < SA0P75);
        assert!(SA0P75 < SA1P0);
        assert!(!PGA.is_sa());
        assert!(!PGV.is_sa());
        assert!(SA0P01.is_sa());
    }

    #[test]
    fn test_names_roundtrip() {
        for imt in Imt::all() {
            assert_eq!(imt.to_string().parse::<Imt>(), Ok(*imt));
        }
        assert_eq!("sa1p0".parse::<Imt>(), Ok(SA1P0));
        assert_eq!(" pga ".parse::<Imt>(), Ok(PGA));
        assert_eq!(
            "SA0P6".parse::<Imt>(),
            Err(Error::UnknownImt("SA0P6".to_owned()))
        );
    }

    #[test]
    fn test_from_period() {
        assert_eq!(Imt::from_period(0.75), Ok(SA0P75));
        assert_eq!(Imt::from_period(10.0), Ok(SA10P0));
        assert!(Imt::from_period(0.6).is_err());
    }
}
