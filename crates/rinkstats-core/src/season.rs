use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::CollectError;

/// An 8-digit season identifier: two directly concatenated 4-digit years,
/// e.g. `20132014` for the 2013-2014 season.
///
/// Construction validates the format, so a `SeasonCode` held by a collector
/// is always well-formed and URL substitution never needs to re-check it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct SeasonCode(String);

impl SeasonCode {
    pub fn new(code: impl Into<String>) -> Result<Self, CollectError> {
        let code = code.into();
        if code.len() == 8 && code.bytes().all(|b| b.is_ascii_digit()) {
            Ok(SeasonCode(code))
        } else {
            Err(CollectError::Config(format!(
                "season {code:?} is not of the correct format, which is two directly \
                 concatenated YYYY values, e.g. 20132014"
            )))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First four digits — the calendar year the season opens in. Used to
    /// build the play-by-play feed URL.
    pub fn opening_year(&self) -> &str {
        &self.0[..4]
    }

    /// Last four digits — the calendar year the season closes in.
    pub fn closing_year(&self) -> &str {
        &self.0[4..]
    }

    /// The hyphenated form the site prints in standings headers,
    /// e.g. `2013-2014`.
    pub fn label(&self) -> String {
        format!("{}-{}", self.opening_year(), self.closing_year())
    }
}

impl fmt::Display for SeasonCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SeasonCode {
    type Err = CollectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SeasonCode::new(s)
    }
}

/// The three kinds of season the site schedules games under. Each maps to
/// the stable numeric id substituted into the schedule query string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SeasonType {
    Preseason,
    Regular,
    Playoffs,
}

impl SeasonType {
    /// Numeric id used by the schedule endpoint's `gameType` parameter.
    pub fn id(&self) -> u8 {
        match self {
            SeasonType::Preseason => 1,
            SeasonType::Regular => 2,
            SeasonType::Playoffs => 3,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SeasonType::Preseason => "preseason",
            SeasonType::Regular => "regular",
            SeasonType::Playoffs => "playoffs",
        }
    }
}

impl fmt::Display for SeasonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SeasonType {
    type Err = CollectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "preseason" => Ok(SeasonType::Preseason),
            "regular" => Ok(SeasonType::Regular),
            "playoffs" => Ok(SeasonType::Playoffs),
            _ => Err(CollectError::Config(format!(
                "season type {s:?} is unknown (expected preseason, regular, or playoffs)"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_season_codes_accepted() {
        for code in ["20132014", "19992000", "20252026"] {
            let season = SeasonCode::new(code).unwrap();
            assert_eq!(season.as_str(), code);
        }
    }

    #[test]
    fn invalid_season_codes_rejected() {
        for code in ["", "2013", "201320145", "2013-214", "abcdefgh", "2013201x"] {
            let err = SeasonCode::new(code).unwrap_err();
            assert!(err.is_config(), "{code:?} should be a config error");
        }
    }

    #[test]
    fn season_years_and_label() {
        let season = SeasonCode::new("20132014").unwrap();
        assert_eq!(season.opening_year(), "2013");
        assert_eq!(season.closing_year(), "2014");
        assert_eq!(season.label(), "2013-2014");
        assert_eq!(season.to_string(), "20132014");
    }

    #[test]
    fn season_type_ids_are_stable() {
        assert_eq!(SeasonType::Preseason.id(), 1);
        assert_eq!(SeasonType::Regular.id(), 2);
        assert_eq!(SeasonType::Playoffs.id(), 3);
    }

    #[test]
    fn season_type_round_trips_through_names() {
        for ty in [
            SeasonType::Preseason,
            SeasonType::Regular,
            SeasonType::Playoffs,
        ] {
            let parsed: SeasonType = ty.as_str().parse().unwrap();
            assert_eq!(parsed, ty);
        }
    }

    #[test]
    fn unknown_season_type_is_config_error() {
        let err = "postseason".parse::<SeasonType>().unwrap_err();
        assert!(err.is_config());
        assert!(err.to_string().contains("postseason"));
    }
}
