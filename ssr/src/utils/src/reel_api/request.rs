use crate::web::PickedFile;

/// Everything sent with one `POST /generate-reel`
#[derive(Clone, Debug)]
pub struct GenerateReelRequest {
    pub prompt: String,
    /// Style preset id, e.g. `"trendy"`
    pub style: String,
    pub duration_secs: u32,
    pub include_trending: bool,
    pub images: Vec<PickedFile>,
    pub audio: Option<PickedFile>,
}

/// One part of the multipart body
#[derive(Debug)]
pub enum FormPart<'a> {
    Text { name: &'static str, value: String },
    File { name: &'static str, file: &'a PickedFile },
}

impl FormPart<'_> {
    pub fn name(&self) -> &'static str {
        match self {
            FormPart::Text { name, .. } | FormPart::File { name, .. } => *name,
        }
    }
}

impl GenerateReelRequest {
    /// Multipart layout, in the order the parts are appended.
    /// Each image is its own repeated `images` part.
    pub fn parts(&self) -> Vec<FormPart<'_>> {
        let mut parts = vec![
            FormPart::Text {
                name: "prompt",
                value: self.prompt.clone(),
            },
            FormPart::Text {
                name: "style",
                value: self.style.clone(),
            },
            FormPart::Text {
                name: "duration",
                value: self.duration_secs.to_string(),
            },
            FormPart::Text {
                name: "include_trending",
                value: self.include_trending.to_string(),
            },
        ];
        parts.extend(
            self.images
                .iter()
                .map(|file| FormPart::File { name: "images", file }),
        );
        if let Some(file) = &self.audio {
            parts.push(FormPart::File { name: "audio", file });
        }
        parts
    }
}

#[cfg(all(test, not(feature = "hydrate")))]
mod tests {
    use super::*;

    fn image(name: &str) -> PickedFile {
        PickedFile::from_bytes(name, "image/png", vec![1u8, 2, 3])
    }

    fn request(images: Vec<PickedFile>, audio: Option<PickedFile>) -> GenerateReelRequest {
        GenerateReelRequest {
            prompt: "My top 3 stock picks".into(),
            style: "finance".into(),
            duration_secs: 30,
            include_trending: false,
            images,
            audio,
        }
    }

    fn count(parts: &[FormPart<'_>], name: &str) -> usize {
        parts.iter().filter(|part| part.name() == name).count()
    }

    #[test]
    fn text_fields_are_stringified() {
        let req = request(vec![], None);
        let texts: Vec<(&str, String)> = req
            .parts()
            .into_iter()
            .filter_map(|part| match part {
                FormPart::Text { name, value } => Some((name, value)),
                FormPart::File { .. } => None,
            })
            .collect();

        assert_eq!(
            texts,
            vec![
                ("prompt", "My top 3 stock picks".to_string()),
                ("style", "finance".to_string()),
                ("duration", "30".to_string()),
                ("include_trending", "false".to_string()),
            ]
        );
    }

    #[test]
    fn one_images_part_per_image_and_single_audio() {
        let audio = PickedFile::from_bytes("beat.mp3", "audio/mpeg", vec![9u8; 4]);
        let req = request(vec![image("a.png"), image("b.png"), image("c.png")], Some(audio));
        let parts = req.parts();

        assert_eq!(count(&parts, "images"), 3);
        assert_eq!(count(&parts, "audio"), 1);
        assert_eq!(parts.len(), 8);
    }

    #[test]
    fn no_file_parts_without_files() {
        let req = request(vec![], None);
        let parts = req.parts();
        assert_eq!(count(&parts, "images"), 0);
        assert_eq!(count(&parts, "audio"), 0);
    }

    #[test]
    fn file_parts_keep_picker_order() {
        let req = request(vec![image("first.png"), image("second.png")], None);
        let names: Vec<&str> = req
            .parts()
            .into_iter()
            .filter_map(|part| match part {
                FormPart::File { file, .. } => Some(file.name.as_str()),
                FormPart::Text { .. } => None,
            })
            .collect();
        assert_eq!(names, vec!["first.png", "second.png"]);
    }
}
