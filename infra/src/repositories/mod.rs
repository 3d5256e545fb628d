pub mod image;
pub mod location;
pub mod reminder;
pub mod settings;
pub mod sqlite;
pub mod weather;
