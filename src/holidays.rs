//! Public holiday calendars.

use chrono::{Datelike, NaiveDate, Weekday};

/// Lookup of public holidays for the exchange jurisdiction.
pub trait HolidayCalendar: Send + Sync {
    /// Returns the holiday name if `date` is a holiday.
    fn holiday_name(&self, date: NaiveDate) -> Option<&'static str>;

    /// Returns true if `date` is a holiday.
    fn is_holiday(&self, date: NaiveDate) -> bool {
        self.holiday_name(date).is_some()
    }
}

/// US federal holidays, with Saturday holidays observed on Friday and Sunday
/// holidays observed on Monday.
#[derive(Debug, Clone, Copy, Default)]
pub struct UsFederalHolidays;

impl UsFederalHolidays {
    /// Creates the calendar.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Returns every holiday (including observed dates) falling in `year`.
    #[must_use]
    pub fn holidays_in(&self, year: i32) -> Vec<(NaiveDate, &'static str)> {
        let mut out = Vec::with_capacity(16);

        let mut fixed = |month: u32, day: u32, name: &'static str| {
            if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
                out.push((date, name));
                if let Some(observed) = observed(date)
                    && observed.year() == year
                {
                    out.push((observed, name));
                }
            }
        };

        fixed(1, 1, "New Year's Day");
        if year >= 2021 {
            fixed(6, 19, "Juneteenth National Independence Day");
        }
        fixed(7, 4, "Independence Day");
        fixed(11, 11, "Veterans Day");
        fixed(12, 25, "Christmas Day");

        // Jan 1 of next year on a Saturday is observed on Dec 31 of this year.
        if let Some(next_new_year) = NaiveDate::from_ymd_opt(year + 1, 1, 1)
            && next_new_year.weekday() == Weekday::Sat
            && let Some(eve) = NaiveDate::from_ymd_opt(year, 12, 31)
        {
            out.push((eve, "New Year's Day"));
        }

        let floating = [
            (year >= 1986, nth_weekday(year, 1, Weekday::Mon, 3), "Martin Luther King Jr. Day"),
            (true, nth_weekday(year, 2, Weekday::Mon, 3), "Washington's Birthday"),
            (true, last_weekday(year, 5, Weekday::Mon), "Memorial Day"),
            (true, nth_weekday(year, 9, Weekday::Mon, 1), "Labor Day"),
            (true, nth_weekday(year, 10, Weekday::Mon, 2), "Columbus Day"),
            (true, nth_weekday(year, 11, Weekday::Thu, 4), "Thanksgiving"),
        ];
        for (active, date, name) in floating {
            if active && let Some(date) = date {
                out.push((date, name));
            }
        }

        out.sort_by_key(|(date, _)| *date);
        out
    }
}

impl HolidayCalendar for UsFederalHolidays {
    fn holiday_name(&self, date: NaiveDate) -> Option<&'static str> {
        self.holidays_in(date.year())
            .into_iter()
            .find(|(d, _)| *d == date)
            .map(|(_, name)| name)
    }
}

/// Observed date for a fixed-date holiday landing on a weekend.
fn observed(date: NaiveDate) -> Option<NaiveDate> {
    match date.weekday() {
        Weekday::Sat => date.pred_opt(),
        Weekday::Sun => date.succ_opt(),
        _ => None,
    }
}

fn nth_weekday(year: i32, month: u32, weekday: Weekday, n: u8) -> Option<NaiveDate> {
    NaiveDate::from_weekday_of_month_opt(year, month, weekday, n)
}

fn last_weekday(year: i32, month: u32, weekday: Weekday) -> Option<NaiveDate> {
    nth_weekday(year, month, weekday, 5).or_else(|| nth_weekday(year, month, weekday, 4))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_fixed_holidays() {
        let cal = UsFederalHolidays::new();
        assert!(cal.is_holiday(date(2024, 1, 1)));
        assert!(cal.is_holiday(date(2024, 7, 4)));
        assert!(cal.is_holiday(date(2024, 12, 25)));
        assert_eq!(cal.holiday_name(date(2024, 6, 19)), Some("Juneteenth National Independence Day"));
    }

    #[test]
    fn test_juneteenth_only_from_2021() {
        let cal = UsFederalHolidays::new();
        assert!(!cal.is_holiday(date(2019, 6, 19)));
        assert!(cal.is_holiday(date(2023, 6, 19)));
    }

    #[test]
    fn test_floating_holidays_2024() {
        let cal = UsFederalHolidays::new();
        assert_eq!(cal.holiday_name(date(2024, 1, 15)), Some("Martin Luther King Jr. Day"));
        assert_eq!(cal.holiday_name(date(2024, 2, 19)), Some("Washington's Birthday"));
        assert_eq!(cal.holiday_name(date(2024, 5, 27)), Some("Memorial Day"));
        assert_eq!(cal.holiday_name(date(2024, 9, 2)), Some("Labor Day"));
        assert_eq!(cal.holiday_name(date(2024, 10, 14)), Some("Columbus Day"));
        assert_eq!(cal.holiday_name(date(2024, 11, 28)), Some("Thanksgiving"));
    }

    #[test]
    fn test_observed_sunday_moves_to_monday() {
        // July 4, 2021 was a Sunday.
        let cal = UsFederalHolidays::new();
        assert!(cal.is_holiday(date(2021, 7, 5)));
    }

    #[test]
    fn test_observed_saturday_moves_to_friday() {
        // July 4, 2026 is a Saturday.
        let cal = UsFederalHolidays::new();
        assert!(cal.is_holiday(date(2026, 7, 3)));
    }

    #[test]
    fn test_new_year_observed_on_prior_december() {
        // Jan 1, 2022 was a Saturday.
        let cal = UsFederalHolidays::new();
        assert_eq!(cal.holiday_name(date(2021, 12, 31)), Some("New Year's Day"));
    }

    #[test]
    fn test_regular_weekday_is_not_holiday() {
        let cal = UsFederalHolidays::new();
        assert!(!cal.is_holiday(date(2024, 3, 14)));
        assert!(!cal.is_holiday(date(2024, 3, 15)));
    }

    #[test]
    fn test_holidays_in_sorted_and_complete() {
        let list = UsFederalHolidays::new().holidays_in(2024);
        assert_eq!(list.len(), 11);
        assert!(list.windows(2).all(|w| w[0].0 <= w[1].0));
    }
}
