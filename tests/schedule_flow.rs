use std::env;
use std::fs;

use scheduleChat::service::schedule_service::ScheduleStore;
use scheduleChat::service::storage::{JsonFileStorage, MemoryStorage};

fn temp_dir(test_name: &str) -> std::path::PathBuf {
    env::temp_dir().join(format!("schedulechat_{}_{}", test_name, uuid::Uuid::new_v4()))
}

#[test]
fn add_list_delete_round_trip() {
    let mut store = ScheduleStore::load(Box::new(MemoryStorage::new()));

    let appointment = store.add("Dentist", "2025-03-10", "09:00", Some(15));
    assert!(!appointment.id.is_empty());

    let listed = store.list();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0], appointment);

    assert!(store.delete(&appointment.id));
    assert!(store.list().is_empty());
}

#[test]
fn out_of_order_adds_list_chronologically() {
    let mut store = ScheduleStore::load(Box::new(MemoryStorage::new()));

    store.add("Second", "2025-06-01", "10:00", None);
    store.add("First", "2025-05-20", "18:30", None);
    store.add("Third", "2025-06-01", "10:30", None);

    let titles: Vec<&str> = store.list().iter().map(|a| a.title.as_str()).collect();
    assert_eq!(titles, vec!["First", "Second", "Third"]);
}

#[test]
fn schedule_and_fired_set_survive_restart() {
    let dir = temp_dir("restart");

    let mut store = ScheduleStore::load(Box::new(JsonFileStorage::new(&dir)));
    let kept = store.add("Dentist", "2025-03-10", "09:00", Some(15));
    let dropped = store.add("Cancelled", "2025-03-11", "10:00", None);
    store.mark_reminded(&kept.id);
    store.delete(&dropped.id);
    drop(store);

    let reloaded = ScheduleStore::load(Box::new(JsonFileStorage::new(&dir)));
    assert_eq!(reloaded.list().len(), 1);
    assert_eq!(reloaded.list()[0], kept);
    assert!(reloaded.is_reminded(&kept.id));
    assert!(!reloaded.is_reminded(&dropped.id));

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn stored_blob_keeps_original_field_shape() {
    let dir = temp_dir("shape");

    let mut store = ScheduleStore::load(Box::new(JsonFileStorage::new(&dir)));
    store.add("Dentist", "2025-03-10", "09:00", Some(15));
    drop(store);

    let blob = fs::read_to_string(dir.join("schedule.json")).unwrap();
    assert!(blob.contains("\"reminderMinutes\":15"));
    assert!(blob.contains("\"date\":\"2025-03-10\""));
    assert!(blob.contains("\"time\":\"09:00\""));

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn blob_written_by_the_original_client_parses_unchanged() {
    let dir = temp_dir("legacy");
    fs::create_dir_all(&dir).unwrap();
    fs::write(
        dir.join("schedule.json"),
        r#"[{"id":"1718000000000","title":"Dentist","date":"2025-03-10","time":"09:00","reminderMinutes":15},{"id":"1718000000001","title":"Lunch","date":"2025-03-09","time":"12:00"}]"#,
    )
    .unwrap();

    let store = ScheduleStore::load(Box::new(JsonFileStorage::new(&dir)));
    let titles: Vec<&str> = store.list().iter().map(|a| a.title.as_str()).collect();
    // Re-sorted on load regardless of the stored order.
    assert_eq!(titles, vec!["Lunch", "Dentist"]);
    assert_eq!(store.list()[1].reminder_minutes, Some(15));
    assert_eq!(store.list()[0].reminder_minutes, None);

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn unreadable_storage_degrades_to_empty_session_state() {
    let dir = temp_dir("corrupt");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("schedule.json"), "not json at all").unwrap();

    // A storage read failure is logged, never surfaced.
    let mut store = ScheduleStore::load(Box::new(JsonFileStorage::new(&dir)));
    assert!(store.list().is_empty());

    // The session keeps working in memory and the next mutation rewrites
    // the blobs.
    store.add("Fresh", "2025-03-10", "09:00", None);
    let reloaded = ScheduleStore::load(Box::new(JsonFileStorage::new(&dir)));
    assert_eq!(reloaded.list().len(), 1);

    let _ = fs::remove_dir_all(&dir);
}
