mod messages;

pub use messages::{Event, Message};
