// src/lib.rs

//! truthwatch: local archive and reports for a public account's post feed

pub mod app;
pub mod capabilities;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod report;
pub mod services;
pub mod storage;
pub mod ui;
pub mod utils;
