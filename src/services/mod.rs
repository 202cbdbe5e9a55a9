// Services module - event registry and share links

pub mod links;
pub mod registry;
