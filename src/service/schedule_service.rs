use std::collections::HashSet;

use uuid::Uuid;

use crate::models::appointment::Appointment;
use crate::service::storage::ScheduleStorage;

// Owns the canonical appointment list plus the set of ids whose reminder has
// already fired. Every mutation re-persists both through the storage port; a
// failed write is logged and the in-memory state stays authoritative for the
// running session.
pub struct ScheduleStore {
    appointments: Vec<Appointment>,
    reminded: HashSet<String>,
    storage: Box<dyn ScheduleStorage>,
}

impl ScheduleStore {
    pub fn load(storage: Box<dyn ScheduleStorage>) -> Self {
        let (appointments, reminded) = match storage.load() {
            Ok(state) => state,
            Err(err) => {
                eprintln!("Failed to load schedule from storage: {}", err);
                (Vec::new(), HashSet::new())
            }
        };
        let mut store = Self {
            appointments,
            reminded,
            storage,
        };
        store.sort();
        store
    }

    // Always succeeds; the date/time strings are stored as given, even when
    // malformed. Malformed entries sort before everything with a valid start.
    pub fn add(
        &mut self,
        title: &str,
        date: &str,
        time: &str,
        reminder_minutes: Option<u32>,
    ) -> Appointment {
        let appointment = Appointment {
            id: Uuid::new_v4().to_string(),
            title: title.to_string(),
            date: date.to_string(),
            time: time.to_string(),
            reminder_minutes,
        };
        self.appointments.push(appointment.clone());
        self.sort();
        self.persist();
        appointment
    }

    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.appointments.len();
        self.appointments.retain(|appointment| appointment.id != id);
        let removed = self.appointments.len() < before;
        self.reminded.remove(id);
        self.persist();
        removed
    }

    pub fn list(&self) -> &[Appointment] {
        &self.appointments
    }

    // Replaces the reminder lead time and clears the fired marker so the new
    // threshold can fire fresh, even for a numerically identical value.
    pub fn set_reminder(&mut self, id: &str, reminder_minutes: u32) -> Option<Appointment> {
        let updated = {
            let appointment = self
                .appointments
                .iter_mut()
                .find(|appointment| appointment.id == id)?;
            appointment.reminder_minutes = Some(reminder_minutes);
            appointment.clone()
        };
        self.reminded.remove(id);
        self.persist();
        Some(updated)
    }

    pub fn is_reminded(&self, id: &str) -> bool {
        self.reminded.contains(id)
    }

    pub fn mark_reminded(&mut self, id: &str) {
        self.reminded.insert(id.to_string());
        self.persist();
    }

    fn sort(&mut self) {
        self.appointments
            .sort_by_key(|a| (a.start(), a.date.clone(), a.time.clone()));
    }

    fn persist(&self) {
        if let Err(err) = self.storage.save(&self.appointments, &self.reminded) {
            eprintln!("Failed to save schedule to storage: {}", err);
        }
    }
}
