use chrono::Duration;
use icalendar::{Calendar, Component, Event, EventLike};

use crate::models::appointment::Appointment;

// Renders the schedule as an iCalendar document with one-hour timed events.
// Appointments whose date/time strings do not parse are left out.
pub fn build_calendar(appointments: &[Appointment]) -> Calendar {
    let mut calendar = Calendar::new();
    calendar.name("Schedule");
    for appointment in appointments {
        let Some(start) = appointment.start() else {
            continue;
        };
        calendar.push(
            Event::new()
                .uid(&appointment.id)
                .summary(&appointment.title)
                .starts(start)
                .ends(start + Duration::hours(1))
                .done(),
        );
    }
    calendar.done()
}

pub fn export_ics(appointments: &[Appointment]) -> String {
    build_calendar(appointments).to_string()
}
