use chrono::{Months, NaiveDate};

use super::region::Region;
use crate::errors::InternalError;
use crate::types::db::festival;

/// Validated festival data, used for both create and full update
#[derive(Debug, Clone, PartialEq)]
pub struct NewFestival {
    pub name: String,
    pub description: String,
    pub location: String,
    pub region: Region,
    pub address: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub image_url: Option<String>,
    pub website: Option<String>,
    pub entry_fee: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
}

/// Inclusive date interval, optionally open on one side
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    /// Build a range from optional bounds
    ///
    /// # Returns
    /// * `Ok(None)` - Neither bound given
    /// * `Ok(Some(range))` - At least one bound given
    /// * `Err(InternalError::Validation)` - start is after end
    pub fn from_bounds(
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<Option<Self>, InternalError> {
        match (start, end) {
            (None, None) => Ok(None),
            (Some(start), Some(end)) if start > end => Err(InternalError::validation(
                "startDate must not be after endDate",
            )),
            _ => Ok(Some(Self { start, end })),
        }
    }

    /// First to last day of a calendar month
    pub fn calendar_month(year: i32, month: u32) -> Result<Self, InternalError> {
        let invalid = || InternalError::validation(format!("Invalid calendar month {}/{}", month, year));

        let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
        let last = first
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .ok_or_else(invalid)?;

        Ok(Self {
            start: Some(first),
            end: Some(last),
        })
    }
}

/// Festival query filter. All parts are optional and ANDed together.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FestivalFilter {
    pub region: Option<Region>,

    /// Lower-cased search term, never blank
    pub search: Option<String>,

    pub date_range: Option<DateRange>,
    pub calendar_month: Option<DateRange>,
}

impl FestivalFilter {
    /// Build a filter from raw query parameters
    ///
    /// * `region` - a region name, or "all"/absent for no region filter
    /// * `search` - free text; blank means no search filter
    /// * `start`/`end` - date range bounds
    /// * `month`/`year` - calendar month (1-12); must be given together
    pub fn from_query(
        region: Option<&str>,
        search: Option<&str>,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
        month: Option<u32>,
        year: Option<i32>,
    ) -> Result<Self, InternalError> {
        let region = match region.map(str::trim) {
            None | Some("") | Some("all") => None,
            Some(value) => Some(value.parse::<Region>()?),
        };

        let calendar_month = match (month, year) {
            (None, None) => None,
            (Some(month), Some(year)) => Some(DateRange::calendar_month(year, month)?),
            _ => {
                return Err(InternalError::validation(
                    "month and year must be given together",
                ))
            }
        };

        let mut filter = Self {
            region,
            search: None,
            date_range: DateRange::from_bounds(start, end)?,
            calendar_month,
        };
        if let Some(term) = search {
            filter = filter.with_search(term);
        }
        Ok(filter)
    }

    pub fn with_region(mut self, region: Region) -> Self {
        self.region = Some(region);
        self
    }

    pub fn with_search(mut self, term: &str) -> Self {
        let term = term.trim();
        self.search = if term.is_empty() {
            None
        } else {
            Some(term.to_lowercase())
        };
        self
    }

    pub fn with_date_range(mut self, range: DateRange) -> Self {
        self.date_range = Some(range);
        self
    }

    /// Date ranges a festival must overlap
    pub fn date_ranges(&self) -> impl Iterator<Item = &DateRange> {
        self.date_range.iter().chain(self.calendar_month.iter())
    }

    /// Case-insensitive substring match on name, description or location
    pub fn matches_search(&self, festival: &festival::Model) -> bool {
        match &self.search {
            None => true,
            Some(term) => [&festival.name, &festival.description, &festival.location]
                .iter()
                .any(|field| field.to_lowercase().contains(term.as_str())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(value: &str) -> NaiveDate {
        NaiveDate::parse_from_str(value, "%Y-%m-%d").unwrap()
    }

    fn festival(name: &str, description: &str, location: &str) -> festival::Model {
        festival::Model {
            id: "f".to_string(),
            name: name.to_string(),
            description: description.to_string(),
            location: location.to_string(),
            region: "bayern".to_string(),
            address: "Theresienwiese".to_string(),
            start_date: date("2025-09-21"),
            end_date: date("2025-10-06"),
            image_url: None,
            website: None,
            entry_fee: None,
            latitude: 48.13,
            longitude: 11.58,
            created_by: None,
            created_at: 0,
            updated_at: 0,
        }
    }

    #[test]
    fn test_region_all_means_no_filter() {
        let filter = FestivalFilter::from_query(Some("all"), None, None, None, None, None).unwrap();
        assert_eq!(filter.region, None);
    }

    #[test]
    fn test_unknown_region_is_rejected() {
        let result = FestivalFilter::from_query(Some("schwaben"), None, None, None, None, None);
        assert!(matches!(result, Err(InternalError::Validation(_))));
    }

    #[test]
    fn test_blank_search_is_ignored() {
        let filter = FestivalFilter::from_query(None, Some("   "), None, None, None, None).unwrap();
        assert_eq!(filter.search, None);
    }

    #[test]
    fn test_search_matches_any_of_three_fields_case_insensitively() {
        let filter = FestivalFilter::default().with_search("OKTOBER");

        assert!(filter.matches_search(&festival("Oktoberfest", "Bier", "München")));
        assert!(filter.matches_search(&festival("Wiesn", "Seit Oktober 1810", "München")));
        assert!(filter.matches_search(&festival("Wiesn", "Bier", "Oktoberplatz")));
        assert!(!filter.matches_search(&festival("Almabtrieb", "Kühe", "Mayrhofen")));
    }

    #[test]
    fn test_search_folds_non_ascii_case() {
        let filter = FestivalFilter::default().with_search("österreich");
        assert!(filter.matches_search(&festival("Opernball", "Ball", "Wien, Österreich")));
    }

    #[test]
    fn test_inverted_date_range_is_rejected() {
        let result = DateRange::from_bounds(Some(date("2025-10-10")), Some(date("2025-10-01")));
        assert!(matches!(result, Err(InternalError::Validation(_))));
    }

    #[test]
    fn test_single_bound_gives_open_range() {
        let range = DateRange::from_bounds(Some(date("2025-10-01")), None).unwrap().unwrap();
        assert_eq!(range.start, Some(date("2025-10-01")));
        assert_eq!(range.end, None);
    }

    #[test]
    fn test_calendar_month_spans_whole_month() {
        let range = DateRange::calendar_month(2024, 2).unwrap();
        assert_eq!(range.start, Some(date("2024-02-01")));
        assert_eq!(range.end, Some(date("2024-02-29")));

        let december = DateRange::calendar_month(2025, 12).unwrap();
        assert_eq!(december.end, Some(date("2025-12-31")));
    }

    #[test]
    fn test_calendar_month_validation() {
        assert!(DateRange::calendar_month(2025, 13).is_err());
        assert!(FestivalFilter::from_query(None, None, None, None, Some(9), None).is_err());
    }

    #[test]
    fn test_date_ranges_yields_both_parts() {
        let filter = FestivalFilter::from_query(
            None,
            None,
            Some(date("2025-09-01")),
            Some(date("2025-09-30")),
            Some(10),
            Some(2025),
        )
        .unwrap();

        assert_eq!(filter.date_ranges().count(), 2);
    }
}
