pub mod address;
pub mod app;
pub mod cli;
pub mod config;
pub mod credentials;
pub mod itinerary;
pub mod llm;
pub mod paths;
pub mod persistence;
pub mod preferences;
pub mod reviews;
pub mod session;
