use std::ops::RangeInclusive;

/// Reel length the backend accepts, in seconds
pub const REEL_DURATION_RANGE_SECS: RangeInclusive<u32> = 5..=60;
pub const DEFAULT_REEL_DURATION_SECS: u32 = 15;

// Trending panel display caps
pub const TRENDING_HASHTAGS_SHOWN: usize = 8;
pub const TRENDING_TOPICS_SHOWN: usize = 6;

/// Audio file names longer than this are cut in the picker caption
pub const AUDIO_CAPTION_CHARS: usize = 15;
