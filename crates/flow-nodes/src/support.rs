//! Support node field models
//!
//! Support nodes supply auxiliary generation parameters (colors, styles,
//! subject, reference images, logo) straight from their local editable
//! fields — no upstream dependency. Each model normalizes on output:
//! strings are trimmed, empty strings fold to absence, and a node whose
//! fields are all empty/default exposes no output at all, signaling "no
//! contribution" to the merge step.

use serde::{Deserialize, Serialize};
use serde_json::json;

/// Lighting color fields
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorsFields {
    pub ambient_color: String,
    pub rim_light_color: String,
    pub fill_light_color: String,
}

impl ColorsFields {
    /// Normalized output payload, or `None` when every color is empty
    pub fn output_data(&self) -> Option<serde_json::Value> {
        let mut payload = serde_json::Map::new();
        for (key, value) in [
            ("ambient_color", &self.ambient_color),
            ("rim_light_color", &self.rim_light_color),
            ("fill_light_color", &self.fill_light_color),
        ] {
            let trimmed = value.trim();
            if !trimmed.is_empty() {
                payload.insert(key.to_string(), json!(trimmed));
            }
        }
        if payload.is_empty() {
            None
        } else {
            Some(serde_json::Value::Object(payload))
        }
    }
}

/// Visual style fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StylesFields {
    pub tags: Vec<String>,
    pub sobriety: u8,
    pub use_gradients: bool,
    pub high_contrast: bool,
    pub minimal_elements: bool,
}

impl Default for StylesFields {
    fn default() -> Self {
        Self {
            tags: Vec::new(),
            sobriety: 50,
            use_gradients: true,
            high_contrast: false,
            minimal_elements: false,
        }
    }
}

impl StylesFields {
    fn normalized_tags(&self) -> Vec<String> {
        self.tags
            .iter()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect()
    }

    /// Full style snapshot, or `None` while everything sits at default
    ///
    /// Once any attribute deviates, the whole state is exposed so the
    /// merge step replaces (never unions) downstream style settings.
    pub fn output_data(&self) -> Option<serde_json::Value> {
        let tags = self.normalized_tags();
        let at_default = tags.is_empty()
            && self.sobriety == 50
            && self.use_gradients
            && !self.high_contrast
            && !self.minimal_elements;
        if at_default {
            return None;
        }
        let mut payload = serde_json::Map::new();
        if !tags.is_empty() {
            payload.insert("tags".to_string(), json!(tags));
        }
        payload.insert("sobriety".to_string(), json!(self.sobriety));
        payload.insert("use_gradients".to_string(), json!(self.use_gradients));
        payload.insert("high_contrast".to_string(), json!(self.high_contrast));
        payload.insert("minimal_elements".to_string(), json!(self.minimal_elements));
        Some(serde_json::Value::Object(payload))
    }
}

/// Subject description fields
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubjectFields {
    pub description: String,
    pub niche: String,
    pub images: Vec<String>,
}

impl SubjectFields {
    /// Normalized output payload, or `None` when all fields are empty
    pub fn output_data(&self) -> Option<serde_json::Value> {
        let mut payload = serde_json::Map::new();
        let description = self.description.trim();
        if !description.is_empty() {
            payload.insert("description".to_string(), json!(description));
        }
        let niche = self.niche.trim();
        if !niche.is_empty() {
            payload.insert("niche".to_string(), json!(niche));
        }
        let images: Vec<String> = self
            .images
            .iter()
            .map(|u| u.trim().to_string())
            .filter(|u| !u.is_empty())
            .collect();
        if !images.is_empty() {
            payload.insert("images".to_string(), json!(images));
        }
        if payload.is_empty() {
            None
        } else {
            Some(serde_json::Value::Object(payload))
        }
    }
}

/// Reference image fields
///
/// `urls` and `instructions` are positionally paired; `uploading` is the
/// node-owned loading flag while an upload is in flight.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReferenceImageFields {
    pub urls: Vec<String>,
    pub instructions: Vec<String>,
    pub uploading: bool,
}

impl ReferenceImageFields {
    /// Normalized output payload, or `None` when no URL survives trimming
    ///
    /// Empty URLs are dropped together with their paired instruction so
    /// the two lists stay aligned.
    pub fn output_data(&self) -> Option<serde_json::Value> {
        let mut urls = Vec::new();
        let mut instructions = Vec::new();
        for (i, url) in self.urls.iter().enumerate() {
            let trimmed = url.trim();
            if trimmed.is_empty() {
                continue;
            }
            urls.push(trimmed.to_string());
            instructions.push(
                self.instructions
                    .get(i)
                    .map(|s| s.trim().to_string())
                    .unwrap_or_default(),
            );
        }
        if urls.is_empty() {
            None
        } else {
            Some(json!({ "urls": urls, "instructions": instructions }))
        }
    }
}

/// Brand logo fields
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogoFields {
    pub url: String,
    pub uploading: bool,
}

impl LogoFields {
    /// Normalized output payload, or `None` when the URL is empty
    pub fn output_data(&self) -> Option<serde_json::Value> {
        let trimmed = self.url.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(json!({ "url": trimmed }))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_colors_contribute_nothing() {
        assert_eq!(ColorsFields::default().output_data(), None);

        let whitespace_only = ColorsFields {
            ambient_color: "   ".to_string(),
            ..Default::default()
        };
        assert_eq!(whitespace_only.output_data(), None);
    }

    #[test]
    fn single_color_is_trimmed_and_exposed() {
        let fields = ColorsFields {
            ambient_color: " #FFAA00 ".to_string(),
            ..Default::default()
        };
        let data = fields.output_data().unwrap();
        assert_eq!(data, json!({"ambient_color": "#FFAA00"}));
    }

    #[test]
    fn default_styles_contribute_nothing() {
        assert_eq!(StylesFields::default().output_data(), None);
    }

    #[test]
    fn styles_expose_full_snapshot_once_touched() {
        let fields = StylesFields {
            tags: vec![" retrô ".to_string(), "".to_string()],
            ..Default::default()
        };
        let data = fields.output_data().unwrap();
        assert_eq!(data["tags"], json!(["retrô"]));
        assert_eq!(data["sobriety"], json!(50));
        assert_eq!(data["use_gradients"], json!(true));
    }

    #[test]
    fn sobriety_change_alone_produces_output() {
        let fields = StylesFields {
            sobriety: 80,
            ..Default::default()
        };
        assert!(fields.output_data().is_some());
    }

    #[test]
    fn subject_fields_are_individually_normalized() {
        let fields = SubjectFields {
            description: "  tênis de corrida  ".to_string(),
            niche: String::new(),
            images: vec![" a.jpg ".to_string(), "  ".to_string()],
        };
        let data = fields.output_data().unwrap();
        assert_eq!(data["description"], json!("tênis de corrida"));
        assert!(data.get("niche").is_none());
        assert_eq!(data["images"], json!(["a.jpg"]));
    }

    #[test]
    fn reference_lists_stay_aligned_when_urls_drop() {
        let fields = ReferenceImageFields {
            urls: vec!["".to_string(), "b.png".to_string()],
            instructions: vec!["ignorada".to_string(), "fundo".to_string()],
            uploading: false,
        };
        let data = fields.output_data().unwrap();
        assert_eq!(data["urls"], json!(["b.png"]));
        assert_eq!(data["instructions"], json!(["fundo"]));
    }

    #[test]
    fn reference_without_urls_contributes_nothing() {
        assert_eq!(ReferenceImageFields::default().output_data(), None);
    }

    #[test]
    fn logo_url_is_trimmed() {
        let fields = LogoFields {
            url: " logo.svg ".to_string(),
            uploading: false,
        };
        assert_eq!(fields.output_data().unwrap(), json!({"url": "logo.svg"}));
        assert_eq!(LogoFields::default().output_data(), None);
    }
}
