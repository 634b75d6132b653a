use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

/// Start or end of a calendar event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventTime {
    /// Precise instant with the offset the calendar reported
    DateTime(DateTime<FixedOffset>),
    /// Whole calendar day
    Date(NaiveDate),
}

/// Simplified calendar event representation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub id: String,
    pub summary: Option<String>,
    pub start: EventTime,
    pub end: EventTime,
}

impl CalendarEvent {
    /// Create a timed event
    pub fn timed(id: &str, start: DateTime<FixedOffset>, end: DateTime<FixedOffset>) -> Self {
        Self {
            id: id.to_string(),
            summary: None,
            start: EventTime::DateTime(start),
            end: EventTime::DateTime(end),
        }
    }

    /// Create an all-day event; `end` is exclusive as in the calendar API
    pub fn all_day(id: &str, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            id: id.to_string(),
            summary: None,
            start: EventTime::Date(start),
            end: EventTime::Date(end),
        }
    }

    /// All-day events carry a date instead of an instant
    pub fn is_all_day(&self) -> bool {
        matches!(self.start, EventTime::Date(_))
    }
}

/// `events.list` response body
#[derive(Debug, Deserialize)]
pub(crate) struct EventsResponse {
    #[serde(default)]
    pub items: Vec<ApiEvent>,
}

/// Event resource as returned by the calendar API
#[derive(Debug, Deserialize)]
pub(crate) struct ApiEvent {
    #[serde(default)]
    pub id: String,
    pub summary: Option<String>,
    pub start: Option<ApiEventTime>,
    pub end: Option<ApiEventTime>,
}

/// `start`/`end` object: `dateTime` for timed events, `date` for all-day ones
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ApiEventTime {
    pub date_time: Option<DateTime<FixedOffset>>,
    pub date: Option<NaiveDate>,
}

impl ApiEventTime {
    fn to_event_time(&self) -> Option<EventTime> {
        match (self.date_time, self.date) {
            (Some(instant), _) => Some(EventTime::DateTime(instant)),
            (None, Some(date)) => Some(EventTime::Date(date)),
            (None, None) => None,
        }
    }
}

impl ApiEvent {
    /// Convert to the domain model; events without usable times are dropped
    pub fn into_event(self) -> Option<CalendarEvent> {
        let start = self.start.as_ref()?.to_event_time()?;
        let end = self.end.as_ref()?.to_event_time()?;
        Some(CalendarEvent {
            id: self.id,
            summary: self.summary,
            start,
            end,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_api_events() {
        let body = r#"{
            "kind": "calendar#events",
            "items": [
                {
                    "id": "timed",
                    "summary": "Massage",
                    "start": {"dateTime": "2026-10-19T09:00:00-10:00", "timeZone": "Pacific/Tahiti"},
                    "end": {"dateTime": "2026-10-19T10:30:00-10:00", "timeZone": "Pacific/Tahiti"}
                },
                {
                    "id": "allday",
                    "start": {"date": "2026-10-20"},
                    "end": {"date": "2026-10-21"}
                },
                {
                    "id": "broken",
                    "start": {}
                }
            ]
        }"#;

        let response: EventsResponse = serde_json::from_str(body).unwrap();
        let events: Vec<CalendarEvent> = response
            .items
            .into_iter()
            .filter_map(ApiEvent::into_event)
            .collect();

        assert_eq!(events.len(), 2);
        assert_eq!(events[0].id, "timed");
        assert_eq!(events[0].summary.as_deref(), Some("Massage"));
        assert!(!events[0].is_all_day());
        assert!(events[1].is_all_day());
        assert_eq!(
            events[1].start,
            EventTime::Date(NaiveDate::from_ymd_opt(2026, 10, 20).unwrap())
        );
    }

    #[test]
    fn test_missing_items_means_no_events() {
        let response: EventsResponse = serde_json::from_str(r#"{"kind": "calendar#events"}"#).unwrap();
        assert!(response.items.is_empty());
    }
}
