//! Drag translation: hovered grid slots become shifted record ranges.

use chrono::{DateTime, Duration, Local, NaiveDate, NaiveTime};

use crate::utils::date::at_day_end;

/// State for an active drag, captured when the hold timer promotes a
/// press. The original range never changes; the hovered slot drives the
/// candidate range until release.
#[derive(Debug, Clone)]
pub struct DragContext {
    pub record_id: String,
    pub original_start: DateTime<Local>,
    pub original_end: Option<DateTime<Local>>,
    duration: Option<Duration>,
    hovered: Option<(NaiveDate, NaiveTime)>,
}

impl DragContext {
    pub fn new(
        record_id: String,
        start: DateTime<Local>,
        end: Option<DateTime<Local>>,
    ) -> Self {
        Self {
            record_id,
            original_start: start,
            original_end: end,
            duration: end.map(|end| end - start),
            hovered: None,
        }
    }

    /// True when the record carries an explicit end to move along.
    pub fn has_end(&self) -> bool {
        self.duration.is_some()
    }

    pub fn update_hover(&mut self, date: NaiveDate, time: NaiveTime) {
        self.hovered = Some((date, time));
    }

    /// The range under the pointer: the start follows the hovered slot,
    /// the end keeps the original span, or runs to end of day when the
    /// record has no end of its own. Until a hover lands this is the
    /// original range.
    pub fn current_range(&self) -> (DateTime<Local>, DateTime<Local>) {
        let start = self
            .hovered
            .and_then(|(date, time)| {
                date.and_time(time).and_local_timezone(Local).single()
            })
            .unwrap_or(self.original_start);
        let end = match self.duration {
            Some(span) => start + span,
            None => at_day_end(start.date_naive()),
        };
        (start, end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn instant(day: u32, hour: u32, minute: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 6, day, hour, minute, 0).unwrap()
    }

    #[test]
    fn test_no_hover_returns_original_range() {
        let ctx = DragContext::new(
            "r1".to_string(),
            instant(4, 9, 30),
            Some(instant(4, 10, 30)),
        );
        assert_eq!(ctx.current_range(), (instant(4, 9, 30), instant(4, 10, 30)));
    }

    #[test]
    fn test_hover_preserves_duration() {
        let mut ctx = DragContext::new(
            "r1".to_string(),
            instant(4, 9, 30),
            Some(instant(4, 10, 30)),
        );
        ctx.update_hover(
            NaiveDate::from_ymd_opt(2025, 6, 7).unwrap(),
            NaiveTime::from_hms_opt(14, 15, 0).unwrap(),
        );
        let (start, end) = ctx.current_range();
        assert_eq!(start, instant(7, 14, 15));
        assert_eq!(end - start, Duration::hours(1));
    }

    #[test]
    fn test_open_ended_record_runs_to_end_of_day() {
        let mut ctx = DragContext::new("r1".to_string(), instant(4, 9, 30), None);
        assert!(!ctx.has_end());
        ctx.update_hover(
            NaiveDate::from_ymd_opt(2025, 6, 7).unwrap(),
            NaiveTime::from_hms_opt(14, 0, 0).unwrap(),
        );
        let (start, end) = ctx.current_range();
        assert_eq!(start, instant(7, 14, 0));
        assert_eq!(end, instant(7, 23, 59) + Duration::seconds(59));
    }
}
