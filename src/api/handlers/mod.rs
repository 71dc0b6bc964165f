pub mod download;
pub mod home;
pub mod upload;
