pub mod reel_form;
pub mod reel_store;
