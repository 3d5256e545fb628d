pub mod diary;
pub mod diary_image;
pub mod location;
pub mod primitives;
pub mod reminder;
pub mod weather;
