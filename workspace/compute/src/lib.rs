pub mod depreciation;
pub mod error;
pub mod regenerate;
pub mod reports;
pub mod schedule;

use chrono::{NaiveDate, Utc};
use regenerate::ScheduleRegenerator;

/// Returns the regenerator used by the service and the CLI.
///
/// The provided date is used as "today" (the last scheduled calendar year is
/// its year), falling back to the current date when none is provided.
pub fn default_regenerator(today: Option<NaiveDate>) -> ScheduleRegenerator {
    let today = today.unwrap_or_else(|| Utc::now().date_naive());
    ScheduleRegenerator::new_with_today(today)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_regenerator_uses_given_day() {
        let today = NaiveDate::from_ymd_opt(2026, 6, 22).unwrap();
        let regenerator = default_regenerator(Some(today));

        assert_eq!(regenerator.today(), today);
        assert_eq!(regenerator.current_year(), 2026);
    }
}
