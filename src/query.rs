use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate};
use std::fmt;
use std::str::FromStr;

/// A calendar month, written `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    /// First day of the month as used in search qualifiers.
    pub fn first_day(&self) -> String {
        format!("{self}-01")
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let date = NaiveDate::parse_from_str(&format!("{}-01", s.trim()), "%Y-%m-%d")
            .with_context(|| format!("Invalid year-month {s:?}, expected YYYY-MM"))?;
        Ok(YearMonth {
            year: date.year(),
            month: date.month(),
        })
    }
}

/// Builds the issue search query for a user's activity in an organization.
///
/// `since` bounds the last update time from below; `until`, when given,
/// bounds the creation time from above (exclusive).
pub fn build_query(
    org: &str,
    username: &str,
    since: YearMonth,
    until: Option<YearMonth>,
) -> String {
    let mut query = format!(
        "org:{org} involves:{username} updated:>{}",
        since.first_day()
    );
    if let Some(until) = until {
        query.push_str(&format!(" created:<{}", until.first_day()));
    }
    query
}
