use std::fmt;
use std::str::FromStr;

use crate::error::MemoError;

/// Named time window for `from` queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Period {
    All,
    Today,
    Yesterday,
    ThisWeek,
    LastWeek,
    LastTwoWeeks,
    ThisMonth,
    LastMonth,
    LastTwoMonths,
    ThisYear,
    LastYear,
    LastTwoYears,
}

impl Period {
    pub const ALL: [Period; 12] = [
        Period::All,
        Period::Today,
        Period::Yesterday,
        Period::ThisWeek,
        Period::LastWeek,
        Period::LastTwoWeeks,
        Period::ThisMonth,
        Period::LastMonth,
        Period::LastTwoMonths,
        Period::ThisYear,
        Period::LastYear,
        Period::LastTwoYears,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Period::All => "all",
            Period::Today => "today",
            Period::Yesterday => "yesterday",
            Period::ThisWeek => "thisweek",
            Period::LastWeek => "lastweek",
            Period::LastTwoWeeks => "last2weeks",
            Period::ThisMonth => "thismonth",
            Period::LastMonth => "lastmonth",
            Period::LastTwoMonths => "last2months",
            Period::ThisYear => "thisyear",
            Period::LastYear => "lastyear",
            Period::LastTwoYears => "last2years",
        }
    }

    /// Whether a filter exists for this period. Only `all` so far.
    pub fn is_implemented(self) -> bool {
        matches!(self, Period::All)
    }
}

impl FromStr for Period {
    type Err = MemoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Period::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| MemoError::UnknownPeriod(s.to_string()))
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_name_parses_back() {
        for p in Period::ALL {
            assert_eq!(p.as_str().parse::<Period>().unwrap(), p);
        }
    }

    #[test]
    fn test_unknown_period() {
        assert!(matches!(
            "blub".parse::<Period>(),
            Err(MemoError::UnknownPeriod(s)) if s == "blub"
        ));
        // names are case-sensitive
        assert!("All".parse::<Period>().is_err());
        assert!("help".parse::<Period>().is_err());
    }

    #[test]
    fn test_only_all_implemented() {
        let implemented: Vec<_> = Period::ALL.into_iter().filter(|p| p.is_implemented()).collect();
        assert_eq!(implemented, vec![Period::All]);
    }
}
