//! Client side of the reel generation service: wire types, the decode step
//! that turns raw bodies into typed results, and the two HTTP calls.

mod client;
mod error;
mod request;
mod types;

pub use client::{fetch_trends, generate_reel};
pub use error::ReelGenError;
pub use request::{FormPart, GenerateReelRequest};
pub use types::{
    decode_generate_reel, decode_trends, GenerateReelResponse, GeneratedReel, TrendsPayload,
};
