//! Domain layer - entities, value objects, and the message model.

pub mod announcement;
pub mod conversation;
pub mod foundation;
pub mod messaging;
