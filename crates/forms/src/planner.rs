//! Antenatal visit planning from the last menstrual period.
//!
//! Gestational age is counted in weeks of amenorrhea from the LMP date.
//! The visit cadence follows the national ANC guideline: monthly to week
//! 28, biweekly to week 36, weekly to week 41. Scheduling proper happens
//! server-side; this module exists for due-date display while the form is
//! edited and for dashboard aggregation.

use cpn_types::{DateError, IsoDate};

/// Gestational weeks at which a visit is planned: 12–28 every 4 weeks,
/// 30–36 every 2 weeks, 37–41 weekly.
pub const VISIT_WEEKS: [u64; 14] = [12, 16, 20, 24, 28, 30, 32, 34, 36, 37, 38, 39, 40, 41];

/// Estimated due date: LMP + 280 days (40 weeks).
pub fn estimated_due_date(lmp: IsoDate) -> Result<IsoDate, DateError> {
    lmp.plus_days(280)
}

/// All planned visit dates for a pregnancy, in chronological order.
pub fn plan_visits(lmp: IsoDate) -> Result<Vec<IsoDate>, DateError> {
    VISIT_WEEKS.iter().map(|&w| lmp.plus_weeks(w)).collect()
}

/// Planned visit dates on or after `today`.
pub fn upcoming_visits(lmp: IsoDate, today: IsoDate) -> Result<Vec<IsoDate>, DateError> {
    Ok(plan_visits(lmp)?
        .into_iter()
        .filter(|d| *d >= today)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> IsoDate {
        IsoDate::parse(s).expect("valid date")
    }

    #[test]
    fn test_due_date_is_lmp_plus_280_days() {
        assert_eq!(
            estimated_due_date(date("2025-01-01")).expect("in range"),
            date("2025-10-08")
        );
    }

    #[test]
    fn test_visit_schedule_weeks() {
        assert_eq!(
            VISIT_WEEKS,
            [12, 16, 20, 24, 28, 30, 32, 34, 36, 37, 38, 39, 40, 41]
        );
        let visits = plan_visits(date("2025-01-01")).expect("in range");
        assert_eq!(visits.len(), 14);
        assert_eq!(visits[0], date("2025-01-01").plus_weeks(12).expect("in range"));
        assert!(visits.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_upcoming_drops_past_visits_only() {
        let lmp = date("2025-01-01");
        let today = lmp.plus_weeks(29).expect("in range");
        let upcoming = upcoming_visits(lmp, today).expect("in range");
        // Weeks 12..28 are behind us; 30..41 remain.
        assert_eq!(upcoming.len(), 9);
        assert_eq!(upcoming[0], lmp.plus_weeks(30).expect("in range"));
    }
}
