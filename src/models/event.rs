use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, Secret};
use uuid::Uuid;

use super::attendee::Attendee;

/// How many attendees the event list shows before collapsing the rest.
pub const PREVIEW_LEN: usize = 3;

/// A named, password-protected attendance session.
///
/// The roster only ever grows: attendees are appended in check-in order and
/// a student ID appears at most once.
#[derive(Debug)]
pub struct Event {
    pub id: Uuid,
    pub name: String,
    password: Secret<String>,
    attendees: Vec<Attendee>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct CreateEventData {
    pub name: String,
    pub password: String,
}

/// Rejection returned when a student ID is already on the roster.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("Student ID {student_id} has already checked in (name: {name})")]
pub struct DuplicateAttendee {
    pub student_id: String,
    /// Name recorded by the earlier check-in
    pub name: String,
}

impl Event {
    pub fn new(data: CreateEventData) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: data.name,
            password: Secret::new(data.password),
            attendees: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Exact comparison against the event password
    pub fn check_password(&self, candidate: &str) -> bool {
        self.password.expose_secret() == candidate
    }

    pub fn already_attended(&self, student_id: &str) -> bool {
        self.find_attendee(student_id).is_some()
    }

    fn find_attendee(&self, student_id: &str) -> Option<&Attendee> {
        self.attendees.iter().find(|a| a.has_student_id(student_id))
    }

    /// Appends `attendee` to the roster unless its student ID is already there.
    pub fn attend(&mut self, attendee: Attendee) -> Result<&Attendee, DuplicateAttendee> {
        if let Some(existing) = self.find_attendee(&attendee.student_id) {
            return Err(DuplicateAttendee {
                student_id: existing.student_id.clone(),
                name: existing.name.clone(),
            });
        }

        self.attendees.push(attendee);
        Ok(&self.attendees[self.attendees.len() - 1])
    }

    pub fn attendees_count(&self) -> usize {
        self.attendees.len()
    }

    pub fn preview_attendees(&self) -> &[Attendee] {
        &self.attendees[..self.attendees.len().min(PREVIEW_LEN)]
    }

    pub fn all_attendees(&self) -> &[Attendee] {
        &self.attendees
    }

    pub fn has_no_attendees(&self) -> bool {
        self.attendees.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event() -> Event {
        Event::new(CreateEventData {
            name: "Systems Programming W3".to_string(),
            password: "rustacean".to_string(),
        })
    }

    #[test]
    fn test_new_event_is_blank() {
        let event = event();

        assert_eq!(event.attendees_count(), 0);
        assert!(event.has_no_attendees());
        assert!(event.preview_attendees().is_empty());
    }

    #[test]
    fn test_check_password_is_exact() {
        let event = event();

        assert!(event.check_password("rustacean"));
        assert!(!event.check_password("Rustacean"));
        assert!(!event.check_password("rustacean "));
        assert!(!event.check_password(""));
    }

    #[test]
    fn test_attend_appends_in_order() {
        let mut event = event();

        event.attend(Attendee::new("Kim", "1")).unwrap();
        event.attend(Attendee::new("Lee", "2")).unwrap();
        event.attend(Attendee::new("Park", "3")).unwrap();

        let ids: Vec<&str> = event
            .all_attendees()
            .iter()
            .map(|a| a.student_id.as_str())
            .collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
        assert!(event.already_attended("2"));
        assert!(!event.already_attended("4"));
    }

    #[test]
    fn test_attend_rejects_duplicate_student_id() {
        let mut event = event();
        event.attend(Attendee::new("Kim", "2024001")).unwrap();

        let err = event.attend(Attendee::new("Someone Else", "2024001")).unwrap_err();

        assert_eq!(err.name, "Kim");
        assert_eq!(err.student_id, "2024001");
        assert_eq!(event.attendees_count(), 1);
    }

    #[test]
    fn test_preview_is_first_three() {
        let mut event = event();
        for i in 0..5 {
            event
                .attend(Attendee::new(format!("Student {}", i), i.to_string()))
                .unwrap();
        }

        let preview: Vec<&str> = event
            .preview_attendees()
            .iter()
            .map(|a| a.student_id.as_str())
            .collect();
        assert_eq!(preview, vec!["0", "1", "2"]);
        assert_eq!(event.all_attendees().len(), 5);
    }

    #[test]
    fn test_debug_hides_password() {
        let event = event();
        assert!(!format!("{:?}", event).contains("rustacean"));
    }
}
