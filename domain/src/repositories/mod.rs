pub mod diary;
pub mod diary_image;
pub mod location;
pub mod reminder;
pub mod settings;
pub mod weather;
