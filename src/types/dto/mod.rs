// Wire types - request and response bodies
pub mod admin;
pub mod auth;
pub mod common;
pub mod festival;
pub mod subscription;
