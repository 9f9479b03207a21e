pub mod buttons;
pub mod file_picker;
pub mod spinner;
pub mod video_player;
