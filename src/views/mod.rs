pub mod home;
pub mod snake;
