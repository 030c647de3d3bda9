//! Validate query parameters for `/accidents`.

use super::{DateBound, Error, Result};
use chrono::{Months, NaiveDate};
use url::form_urlencoded;

/// Format of dates in query parameters and upstream requests.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// How far back `start_date` goes when it isn’t specified.
const DEFAULT_LOOKBACK: Months = Months::new(3);

/// Query parameters for `/accidents`, as received.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct AccidentParams {
    /// First date to include (`YYYY-MM-DD`). Defaults to 3 months ago.
    pub start_date: Option<String>,

    /// Last date to include (`YYYY-MM-DD`). Defaults to today.
    pub end_date: Option<String>,

    /// Only return accidents with this type (case-insensitive).
    pub accident_type: Option<String>,
}

/// Inclusive range of dates to request from Procore.
///
/// `start` may be after `end`; Procore just returns nothing.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct DateRange {
    /// First date.
    pub start: NaiveDate,
    /// Last date.
    pub end: NaiveDate,
}

impl DateRange {
    /// `start` formatted for a query string.
    #[must_use]
    pub fn start_param(&self) -> String {
        self.start.format(DATE_FORMAT).to_string()
    }

    /// `end` formatted for a query string.
    #[must_use]
    pub fn end_param(&self) -> String {
        self.end.format(DATE_FORMAT).to_string()
    }
}

/// Validated query for `/accidents`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AccidentQuery {
    /// Dates to fetch.
    pub range: DateRange,

    /// Accident type to filter on, if any.
    pub accident_type: Option<String>,
}

impl AccidentParams {
    /// Read parameters from a raw query string.
    ///
    /// The first value of a repeated parameter wins. Unknown parameters are
    /// ignored.
    #[must_use]
    pub fn from_query(query: Option<&str>) -> Self {
        let mut params = Self::default();
        let pairs = form_urlencoded::parse(query.unwrap_or_default().as_bytes());
        for (key, value) in pairs {
            let field = match key.as_ref() {
                "start_date" => &mut params.start_date,
                "end_date" => &mut params.end_date,
                "accident_type" => &mut params.accident_type,
                _ => continue,
            };
            if field.is_none() {
                *field = Some(value.into_owned());
            }
        }
        params
    }

    /// Validate parameters and fill in defaults relative to `today`.
    ///
    /// An empty `accident_type` is the same as no filter, but an empty date
    /// is an error.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDate`] if either date is present but not
    /// `YYYY-MM-DD`. Nothing should be fetched in that case.
    pub fn validate(self, today: NaiveDate) -> Result<AccidentQuery> {
        let start = match self.start_date {
            Some(date) => parse_date(&date, DateBound::Start)?,
            None => today
                .checked_sub_months(DEFAULT_LOOKBACK)
                .unwrap_or(NaiveDate::MIN),
        };

        let end = match self.end_date {
            Some(date) => parse_date(&date, DateBound::End)?,
            None => today,
        };

        Ok(AccidentQuery {
            range: DateRange { start, end },
            accident_type: self.accident_type.filter(|kind| !kind.is_empty()),
        })
    }
}

/// Parse a `YYYY-MM-DD` date.
fn parse_date(input: &str, bound: DateBound) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input, DATE_FORMAT)
        .map_err(|source| Error::InvalidDate { bound, source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::assert;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn params(
        start_date: Option<&str>,
        end_date: Option<&str>,
        accident_type: Option<&str>,
    ) -> AccidentParams {
        AccidentParams {
            start_date: start_date.map(str::to_owned),
            end_date: end_date.map(str::to_owned),
            accident_type: accident_type.map(str::to_owned),
        }
    }

    #[test]
    fn from_query_decodes() {
        assert!(
            AccidentParams::from_query(Some(
                "start_date=2024-01-01&accident_type=Slip%2FFall+Trip&x=1"
            )) == params(Some("2024-01-01"), None, Some("Slip/Fall Trip"))
        );
        assert!(AccidentParams::from_query(None) == AccidentParams::default());
        assert!(
            AccidentParams::from_query(Some("end_date="))
                == params(None, Some(""), None)
        );
    }

    #[test]
    fn from_query_first_value_wins() {
        assert!(
            AccidentParams::from_query(Some(
                "accident_type=a&end_date=2024-01-31&accident_type=b"
            )) == params(None, Some("2024-01-31"), Some("a"))
        );
    }

    #[test]
    fn defaults() {
        let query =
            AccidentParams::default().validate(date(2024, 6, 15)).unwrap();
        assert!(
            query
                == AccidentQuery {
                    range: DateRange {
                        start: date(2024, 3, 15),
                        end: date(2024, 6, 15),
                    },
                    accident_type: None,
                }
        );
    }

    #[test]
    fn default_start_clamps_to_month_end() {
        let query =
            AccidentParams::default().validate(date(2024, 5, 31)).unwrap();
        assert!(query.range.start == date(2024, 2, 29));
    }

    #[test]
    fn explicit_dates() {
        let query = params(Some("2024-01-01"), Some("2024-01-31"), Some("Fall"))
            .validate(date(2024, 6, 15))
            .unwrap();
        assert!(query.range.start_param() == "2024-01-01");
        assert!(query.range.end_param() == "2024-01-31");
        assert!(query.accident_type.as_deref() == Some("Fall"));
    }

    #[test]
    fn end_before_start_is_allowed() {
        let query = params(Some("2024-02-01"), Some("2024-01-01"), None)
            .validate(date(2024, 6, 15))
            .unwrap();
        assert!(query.range.start > query.range.end);
    }

    #[test]
    fn invalid_start_date() {
        let error = params(Some("01-01-2024"), None, None)
            .validate(date(2024, 6, 15))
            .unwrap_err();
        assert!(let Error::InvalidDate { bound: DateBound::Start, .. } = &error);
        assert!(error.to_string() == "Invalid start date format");
    }

    #[test]
    fn invalid_end_date() {
        let error = params(None, Some("2024-02-30"), None)
            .validate(date(2024, 6, 15))
            .unwrap_err();
        assert!(error.to_string() == "Invalid end date format");
    }

    #[test]
    fn empty_date_is_invalid() {
        assert!(let Err(Error::InvalidDate { bound: DateBound::Start, .. }) =
            params(Some(""), None, None).validate(date(2024, 6, 15)));
    }

    #[test]
    fn empty_accident_type_is_no_filter() {
        let query = params(None, None, Some(""))
            .validate(date(2024, 6, 15))
            .unwrap();
        assert!(query.accident_type.is_none());
    }
}
