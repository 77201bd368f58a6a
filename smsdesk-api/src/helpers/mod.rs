pub mod database;
pub mod passwords;
pub mod sessions;
