use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One check-in record. Never modified once it is on a roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attendee {
    pub name: String,
    pub student_id: String,
    pub checked_in_at: DateTime<Utc>,
}

impl Attendee {
    pub fn new(name: impl Into<String>, student_id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            student_id: student_id.into(),
            checked_in_at: Utc::now(),
        }
    }

    pub fn has_student_id(&self, student_id: &str) -> bool {
        self.student_id == student_id
    }

    /// `name(student_id)`, the form used in roster previews
    pub fn label(&self) -> String {
        format!("{}({})", self.name, self.student_id)
    }
}
