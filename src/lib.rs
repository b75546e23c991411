//! Core library for csv-playlist-online-import
pub mod config;
pub mod db;
pub mod models;
pub mod api;
pub mod table;
pub mod normalize;
pub mod query;
pub mod score;
pub mod resolve;
pub mod importer;
