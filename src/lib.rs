pub mod api;
pub mod auth;
pub mod consts;
pub mod env;
pub mod report;
pub mod submission;
