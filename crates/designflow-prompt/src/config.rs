//! Generation request configuration
//!
//! `DesignConfig` is the flat parameter set consumed by the image
//! generation request. The merge step overlays per-node overrides onto
//! the defaults documented here; the generation service renders the same
//! prompt server-side from this struct.

use serde::{Deserialize, Serialize};

/// Upper bound on reference image URLs sent with one request
pub const MAX_REFERENCE_IMAGES: usize = 5;

/// Upper bound on subject image URLs sent with one request
pub const MAX_SUBJECT_IMAGES: usize = 2;

/// The flat parameter set for one generated design
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesignConfig {
    /// What the image shows
    pub subject_description: String,
    /// Product/subject photo URLs, at most [`MAX_SUBJECT_IMAGES`]
    pub subject_images: Vec<String>,
    /// Market niche used as context
    pub niche: String,
    /// Scene or backdrop description
    pub environment: String,

    /// Ambient lighting color (hex or name, empty = unset)
    pub ambient_color: String,
    /// Rim light color
    pub rim_light_color: String,
    /// Fill light color
    pub fill_light_color: String,

    /// Style tag list; replaced wholesale by a styles node, never unioned
    pub style_tags: Vec<String>,
    /// 0..=100; at most 50 reads as creative, above as professional
    pub sobriety: u8,
    pub use_gradients: bool,
    pub high_contrast: bool,
    pub minimal_elements: bool,

    pub camera_framing: String,
    /// Where the main element sits in the layout
    pub layout_position: String,
    /// Free-form description of floating/decorative elements
    pub floating_elements: String,
    /// Aspect-ratio code, e.g. "9:16"
    pub dimensions: String,

    /// Whether text is rendered on the image
    pub text_enabled: bool,
    pub headline_h1: String,
    pub subheadline_h2: String,
    pub cta_text: String,
    /// Where the overlay text sits, e.g. "centro"
    pub text_position: String,

    /// Reference image URLs, at most [`MAX_REFERENCE_IMAGES`]
    pub reference_images: Vec<String>,
    /// Per-reference instructions, positionally paired with the URLs
    pub reference_instructions: Vec<String>,
    /// Brand logo URL
    pub logo_url: Option<String>,

    /// Free-form instructions appended to the prompt
    pub additional_instructions: String,
}

impl Default for DesignConfig {
    fn default() -> Self {
        Self {
            subject_description: String::new(),
            subject_images: Vec::new(),
            niche: String::new(),
            environment: String::new(),
            ambient_color: String::new(),
            rim_light_color: String::new(),
            fill_light_color: String::new(),
            style_tags: vec!["moderno".to_string(), "limpo".to_string()],
            sobriety: 50,
            use_gradients: true,
            high_contrast: false,
            minimal_elements: false,
            camera_framing: "frontal".to_string(),
            layout_position: "centro".to_string(),
            floating_elements: String::new(),
            dimensions: "1:1".to_string(),
            text_enabled: false,
            headline_h1: String::new(),
            subheadline_h2: String::new(),
            cta_text: String::new(),
            text_position: "centro".to_string(),
            reference_images: Vec::new(),
            reference_instructions: Vec::new(),
            logo_url: None,
            additional_instructions: String::new(),
        }
    }
}
