pub mod api;
pub mod login;
pub mod pages;
