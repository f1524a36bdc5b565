pub mod admin;
pub mod login;
pub mod profile;
pub mod requests;
pub mod utils;
