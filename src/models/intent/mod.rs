// Intent module
// Fully resolved, permission-checked description of an action for the host to execute

use serde::{Deserialize, Serialize};

use crate::models::cell::DateRange;
use crate::models::event_ref::EventType;
use crate::models::menu::MenuAction;
use crate::models::subject::Subject;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Intent {
    pub action: MenuAction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_type: Option<EventType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_id: Option<i64>,
    pub subject: Subject,
    pub date_range: Option<DateRange>,
}

impl Intent {
    pub fn is_destructive(&self) -> bool {
        self.action.is_destructive()
    }

    /// Short description used in confirmations and notifications.
    pub fn describe(&self) -> String {
        let kind = self.event_type.map(|t| t.label()).unwrap_or("item");
        match self.date_range {
            Some(range) if range.is_single_day() => format!(
                "{} for {} on {}",
                kind,
                self.subject.display_name,
                range.start().format("%d-%m-%Y")
            ),
            Some(range) => format!(
                "{} for {} from {} to {}",
                kind,
                self.subject.display_name,
                range.start().format("%d-%m-%Y"),
                range.end().format("%d-%m-%Y")
            ),
            None => format!("{} for {}", kind, self.subject.display_name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn intent(range: Option<DateRange>) -> Intent {
        Intent {
            action: MenuAction::Create,
            event_type: Some(EventType::Leave),
            event_id: None,
            subject: Subject::new(2, "bram", "Bram Visser"),
            date_range: range,
        }
    }

    #[test]
    fn test_describe_single_day() {
        let date = NaiveDate::from_ymd_opt(2025, 4, 1).unwrap();
        assert_eq!(
            intent(Some(DateRange::single(date))).describe(),
            "Leave for Bram Visser on 01-04-2025"
        );
    }

    #[test]
    fn test_describe_span() {
        let start = NaiveDate::from_ymd_opt(2025, 4, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2025, 4, 3).unwrap();
        assert_eq!(
            intent(Some(DateRange::new(start, end))).describe(),
            "Leave for Bram Visser from 01-04-2025 to 03-04-2025"
        );
    }

    #[test]
    fn test_describe_without_dates() {
        assert_eq!(intent(None).describe(), "Leave for Bram Visser");
    }

    #[test]
    fn test_reversed_range_in_json_describes_in_order() {
        let intent: Intent = serde_json::from_str(
            r#"{
                "action": "create",
                "event_type": "leave",
                "subject": { "id": 2, "username": "bram", "display_name": "Bram Visser" },
                "date_range": { "start": "2025-03-05", "end": "2025-03-01" }
            }"#,
        )
        .unwrap();

        assert_eq!(
            intent.describe(),
            "Leave for Bram Visser from 01-03-2025 to 05-03-2025"
        );
    }
}
