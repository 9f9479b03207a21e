//! Reel generator page state.
//!
//! Everything the page shows lives in one [`ReelState`] value. Input events,
//! the submission controller and the trends loader never touch it directly:
//! they describe what happened as a [`ReelAction`] and [`ReelState::reduce`]
//! returns the next state. The generation state machine is
//!
//! ```text
//! Idle | Succeeded | Failed --Submit--> Generating
//! Generating --GenerationSettled(Ok)--> Succeeded
//! Generating --GenerationSettled(Err)--> Failed
//! ```
//!
//! `Submit` is refused while the prompt is empty or a request is in flight.

use std::fmt;
use std::str::FromStr;

use consts::limits::{AUDIO_CAPTION_CHARS, DEFAULT_REEL_DURATION_SECS, REEL_DURATION_RANGE_SECS};
use thiserror::Error;
use utils::reel_api::{GenerateReelRequest, GeneratedReel, ReelGenError, TrendsPayload};
use utils::web::PickedFile;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ReelStyle {
    #[default]
    Trendy,
    Business,
    Lifestyle,
    Tech,
    Finance,
    Fitness,
}

impl ReelStyle {
    pub const ALL: [ReelStyle; 6] = [
        ReelStyle::Trendy,
        ReelStyle::Business,
        ReelStyle::Lifestyle,
        ReelStyle::Tech,
        ReelStyle::Finance,
        ReelStyle::Fitness,
    ];

    /// Value sent in the `style` form field
    pub const fn id(self) -> &'static str {
        match self {
            ReelStyle::Trendy => "trendy",
            ReelStyle::Business => "business",
            ReelStyle::Lifestyle => "lifestyle",
            ReelStyle::Tech => "tech",
            ReelStyle::Finance => "finance",
            ReelStyle::Fitness => "fitness",
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            ReelStyle::Trendy => "🔥 Trendy",
            ReelStyle::Business => "💼 Business",
            ReelStyle::Lifestyle => "✨ Lifestyle",
            ReelStyle::Tech => "🚀 Tech",
            ReelStyle::Finance => "📈 Finance",
            ReelStyle::Fitness => "💪 Fitness",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            ReelStyle::Trendy => "Popular social media style",
            ReelStyle::Business => "Professional and clean",
            ReelStyle::Lifestyle => "Casual and personal",
            ReelStyle::Tech => "Modern and sleek",
            ReelStyle::Finance => "Stock market focused",
            ReelStyle::Fitness => "Health and wellness",
        }
    }

    /// Gradient stops painted on the selected tile and the submit button
    pub const fn accent(self) -> &'static str {
        match self {
            ReelStyle::Trendy => "from-pink-500 to-violet-500",
            ReelStyle::Business => "from-blue-500 to-cyan-500",
            ReelStyle::Lifestyle => "from-green-500 to-teal-500",
            ReelStyle::Tech => "from-purple-500 to-indigo-500",
            ReelStyle::Finance => "from-yellow-500 to-orange-500",
            ReelStyle::Fitness => "from-red-500 to-pink-500",
        }
    }
}

impl fmt::Display for ReelStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for ReelStyle {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ReelStyle::ALL
            .into_iter()
            .find(|style| style.id() == s)
            .ok_or_else(|| FormError::UnknownStyle(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("unknown style {0:?}")]
    UnknownStyle(String),
    #[error("duration {0:?} is not a whole number of seconds")]
    InvalidDuration(String),
    #[error("{field} does not take a {kind} value")]
    WrongValueKind {
        field: &'static str,
        kind: &'static str,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormField {
    Prompt,
    Style,
    Duration,
    IncludeTrending,
}

impl FormField {
    /// `name` attribute of the matching input
    pub const fn input_name(self) -> &'static str {
        match self {
            FormField::Prompt => "prompt",
            FormField::Style => "style",
            FormField::Duration => "duration",
            FormField::IncludeTrending => "includeTrending",
        }
    }
}

/// Raw value read off an input element
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    /// Checkbox inputs report their checked state instead of their value
    Checked(bool),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormState {
    pub prompt: String,
    pub style: ReelStyle,
    pub duration_secs: u32,
    pub include_trending: bool,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            prompt: String::new(),
            style: ReelStyle::default(),
            duration_secs: DEFAULT_REEL_DURATION_SECS,
            include_trending: true,
        }
    }
}

impl FormState {
    /// Applies one input event. On error the state is left untouched.
    pub fn update_field(&mut self, field: FormField, value: FieldValue) -> Result<(), FormError> {
        match (field, value) {
            (FormField::Prompt, FieldValue::Text(text)) => self.prompt = text,
            (FormField::Style, FieldValue::Text(id)) => self.style = id.parse()?,
            (FormField::Duration, FieldValue::Text(raw)) => {
                self.duration_secs = parse_duration(&raw)?
            }
            (FormField::IncludeTrending, FieldValue::Checked(on)) => self.include_trending = on,
            (field, FieldValue::Checked(_)) => {
                return Err(FormError::WrongValueKind {
                    field: field.input_name(),
                    kind: "checkbox",
                })
            }
            (field, FieldValue::Text(_)) => {
                return Err(FormError::WrongValueKind {
                    field: field.input_name(),
                    kind: "text",
                })
            }
        }
        Ok(())
    }
}

// Range inputs clamp to their bounds, so do we. Anything that is not a
// number was tampered with and is refused.
fn parse_duration(raw: &str) -> Result<u32, FormError> {
    let secs: i64 = raw
        .trim()
        .parse()
        .map_err(|_| FormError::InvalidDuration(raw.to_string()))?;
    let min = i64::from(*REEL_DURATION_RANGE_SECS.start());
    let max = i64::from(*REEL_DURATION_RANGE_SECS.end());
    Ok(secs.clamp(min, max) as u32)
}

/// Files attached to the next submission. Each picker change replaces its
/// slot wholesale.
#[derive(Clone, Debug, Default)]
pub struct FileSelection {
    pub images: Vec<PickedFile>,
    pub audio: Option<PickedFile>,
}

impl FileSelection {
    pub fn images_caption(&self) -> String {
        if self.images.is_empty() {
            "Upload Images".to_string()
        } else {
            format!("{} files", self.images.len())
        }
    }

    pub fn audio_caption(&self) -> String {
        match &self.audio {
            Some(file) => {
                let short: String = file.name.chars().take(AUDIO_CAPTION_CHARS).collect();
                format!("{short}...")
            }
            None => "Upload Audio".to_string(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum GenerationPhase {
    #[default]
    Idle,
    Generating {
        request_id: u64,
    },
    Succeeded(GeneratedReel),
    Failed(String),
}

/// What the preview area shows. The error banner is drawn separately.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PreviewBranch {
    Generating,
    Video(GeneratedReel),
    Placeholder,
}

#[derive(Debug)]
pub enum ReelAction {
    UpdateField(FormField, FieldValue),
    SelectImages(Vec<PickedFile>),
    SelectAudio(Option<PickedFile>),
    Submit,
    GenerationSettled {
        request_id: u64,
        outcome: Result<GeneratedReel, ReelGenError>,
    },
    TrendsLoaded(TrendsPayload),
}

#[derive(Clone, Debug, Default)]
pub struct ReelState {
    pub form: FormState,
    pub files: FileSelection,
    pub phase: GenerationPhase,
    pub trends: Option<TrendsPayload>,
    last_request_id: u64,
}

impl ReelState {
    pub fn reduce(mut self, action: ReelAction) -> Self {
        match action {
            ReelAction::UpdateField(field, value) => {
                if let Err(e) = self.form.update_field(field, value) {
                    log::warn!("ignoring form input: {e}");
                }
            }
            ReelAction::SelectImages(images) => self.files.images = images,
            ReelAction::SelectAudio(audio) => self.files.audio = audio,
            ReelAction::Submit => {
                if !self.can_submit() {
                    log::debug!("submit refused in phase {:?}", self.phase);
                    return self;
                }
                self.last_request_id += 1;
                self.phase = GenerationPhase::Generating {
                    request_id: self.last_request_id,
                };
            }
            ReelAction::GenerationSettled {
                request_id,
                outcome,
            } => {
                if self.in_flight() != Some(request_id) {
                    log::debug!("dropping stale result of request {request_id}");
                    return self;
                }
                self.phase = match outcome {
                    Ok(reel) => GenerationPhase::Succeeded(reel),
                    Err(e) => {
                        log::error!("reel generation failed: {e:?}");
                        GenerationPhase::Failed(e.user_message())
                    }
                };
            }
            ReelAction::TrendsLoaded(trends) => self.trends = Some(trends),
        }
        self
    }

    /// Id of the request the page is waiting on
    pub fn in_flight(&self) -> Option<u64> {
        match self.phase {
            GenerationPhase::Generating { request_id } => Some(request_id),
            _ => None,
        }
    }

    pub fn is_generating(&self) -> bool {
        self.in_flight().is_some()
    }

    pub fn can_submit(&self) -> bool {
        !self.form.prompt.is_empty() && !self.is_generating()
    }

    pub fn error(&self) -> Option<&str> {
        match &self.phase {
            GenerationPhase::Failed(msg) => Some(msg),
            _ => None,
        }
    }

    pub fn preview(&self) -> PreviewBranch {
        match &self.phase {
            GenerationPhase::Generating { .. } => PreviewBranch::Generating,
            GenerationPhase::Succeeded(reel) => PreviewBranch::Video(reel.clone()),
            GenerationPhase::Idle | GenerationPhase::Failed(_) => PreviewBranch::Placeholder,
        }
    }

    /// Gradient of the submit button, `None` while it is disabled
    pub fn submit_accent(&self) -> Option<&'static str> {
        self.can_submit().then(|| self.form.style.accent())
    }

    /// Trends worth a panel
    pub fn visible_trends(&self) -> Option<&TrendsPayload> {
        self.trends.as_ref().filter(|trends| !trends.is_empty())
    }

    /// Snapshot of the form for the multipart body
    pub fn request(&self) -> GenerateReelRequest {
        GenerateReelRequest {
            prompt: self.form.prompt.clone(),
            style: self.form.style.id().to_string(),
            duration_secs: self.form.duration_secs,
            include_trending: self.form.include_trending,
            images: self.files.images.clone(),
            audio: self.files.audio.clone(),
        }
    }
}
