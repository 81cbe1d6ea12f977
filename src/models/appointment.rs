use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::env;

// Returns the directory where the schedule blobs live.
// Defaults to a relative "./data" directory.
pub fn get_db_location() -> String {
    env::var("SCHEDULE_DB_LOCATION").unwrap_or("./data".to_string())
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Appointment {
    pub id: String,
    pub title: String,
    pub date: String,
    pub time: String,
    #[serde(rename = "reminderMinutes", skip_serializing_if = "Option::is_none")]
    pub reminder_minutes: Option<u32>,
}

impl Appointment {
    // The stored strings are "YYYY-MM-DD" and "HH:MM" wall-clock values with
    // no timezone attached. Malformed strings parse to None and the caller
    // falls back to ordering on the raw strings.
    pub fn start(&self) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(
            &format!("{}T{}", self.date, self.time),
            "%Y-%m-%dT%H:%M",
        )
        .ok()
    }

    pub fn reminder_at(&self) -> Option<NaiveDateTime> {
        let minutes = self.reminder_minutes?;
        self.start()?
            .checked_sub_signed(Duration::minutes(minutes as i64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    #[test]
    fn start_parses_well_formed_date_and_time() {
        let appointment = Appointment {
            id: "a1".to_string(),
            title: "Dentist".to_string(),
            date: "2025-03-10".to_string(),
            time: "09:00".to_string(),
            reminder_minutes: None,
        };
        let expected = NaiveDate::from_ymd_opt(2025, 3, 10)
            .unwrap()
            .and_time(NaiveTime::from_hms_opt(9, 0, 0).unwrap());
        assert_eq!(appointment.start(), Some(expected));
    }

    #[test]
    fn start_is_none_for_malformed_strings() {
        let appointment = Appointment {
            id: "a2".to_string(),
            title: "Garbage".to_string(),
            date: "next tuesday".to_string(),
            time: "morning".to_string(),
            reminder_minutes: Some(10),
        };
        assert_eq!(appointment.start(), None);
        assert_eq!(appointment.reminder_at(), None);
    }

    #[test]
    fn reminder_at_subtracts_lead_minutes() {
        let appointment = Appointment {
            id: "a3".to_string(),
            title: "Standup".to_string(),
            date: "2025-03-10".to_string(),
            time: "09:00".to_string(),
            reminder_minutes: Some(15),
        };
        let expected = NaiveDate::from_ymd_opt(2025, 3, 10)
            .unwrap()
            .and_time(NaiveTime::from_hms_opt(8, 45, 0).unwrap());
        assert_eq!(appointment.reminder_at(), Some(expected));
    }

    #[test]
    fn serialized_shape_uses_camel_case_reminder_field() {
        let appointment = Appointment {
            id: "a4".to_string(),
            title: "Call".to_string(),
            date: "2025-03-10".to_string(),
            time: "09:00".to_string(),
            reminder_minutes: Some(5),
        };
        let json = serde_json::to_string(&appointment).unwrap();
        assert!(json.contains("\"reminderMinutes\":5"));

        let without = Appointment {
            reminder_minutes: None,
            ..appointment
        };
        let json = serde_json::to_string(&without).unwrap();
        assert!(!json.contains("reminderMinutes"));
    }
}
