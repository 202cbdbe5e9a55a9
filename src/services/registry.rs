use std::collections::HashMap;

use uuid::Uuid;

use crate::models::{Attendee, CreateEventData, DuplicateAttendee, Event};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Event name and password are both required")]
    MissingEventFields,

    #[error("Event {0} does not exist")]
    NotFound(Uuid),

    #[error("Wrong password")]
    WrongPassword,

    #[error("Name and student ID are both required")]
    MissingAttendeeFields,

    #[error(transparent)]
    Duplicate(#[from] DuplicateAttendee),
}

/// All events known to this process, kept in creation order.
#[derive(Debug, Default)]
pub struct EventRegistry {
    events: Vec<Event>,
    index: HashMap<Uuid, usize>,
}

impl EventRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new event with an empty roster
    pub fn create(&mut self, data: CreateEventData) -> Result<&Event, RegistryError> {
        let name = data.name.trim();
        if name.is_empty() || data.password.is_empty() {
            return Err(RegistryError::MissingEventFields);
        }

        let event = Event::new(CreateEventData {
            name: name.to_string(),
            password: data.password,
        });

        let position = self.events.len();
        self.index.insert(event.id, position);
        self.events.push(event);

        Ok(&self.events[position])
    }

    pub fn get(&self, id: Uuid) -> Result<&Event, RegistryError> {
        self.index
            .get(&id)
            .map(|&position| &self.events[position])
            .ok_or(RegistryError::NotFound(id))
    }

    fn get_mut(&mut self, id: Uuid) -> Result<&mut Event, RegistryError> {
        match self.index.get(&id) {
            Some(&position) => Ok(&mut self.events[position]),
            None => Err(RegistryError::NotFound(id)),
        }
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Records a check-in for `student_id`.
    ///
    /// The password is verified before the fields so a wrong password is
    /// reported even on an otherwise empty form. The roster is only touched
    /// when every check passes.
    pub fn check_in(
        &mut self,
        id: Uuid,
        password: &str,
        name: &str,
        student_id: &str,
    ) -> Result<&Attendee, RegistryError> {
        let event = self.get_mut(id)?;

        if !event.check_password(password) {
            return Err(RegistryError::WrongPassword);
        }

        let name = name.trim();
        let student_id = student_id.trim();
        if name.is_empty() || student_id.is_empty() {
            return Err(RegistryError::MissingAttendeeFields);
        }

        Ok(event.attend(Attendee::new(name, student_id))?)
    }
}
