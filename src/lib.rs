pub mod api;
pub mod auth;
pub mod client;
pub mod config;
pub mod domain;
pub mod error;
pub mod repository;
pub mod service;
pub mod uploads;
