pub mod reel_api;
pub mod web;
