//! Support-node output merge
//!
//! Collects the outputs of the support nodes connected to a generator
//! into a partial configuration (`ConfigOverrides`) that only carries the
//! keys upstream actually provided, then overlays it onto the documented
//! `DesignConfig` defaults.

use serde::{Deserialize, Serialize};

use flow_engine::{NodeOutput, UpstreamInputMap};

use crate::config::{DesignConfig, MAX_REFERENCE_IMAGES, MAX_SUBJECT_IMAGES};

/// The support node families that contribute generation parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SupportKind {
    ReferenceImage,
    #[serde(rename = "image_logo")]
    Logo,
    Colors,
    Styles,
    Subject,
}

impl SupportKind {
    /// The upstream-map key family this support kind owns
    pub fn as_key(&self) -> &'static str {
        match self {
            SupportKind::ReferenceImage => "reference_image",
            SupportKind::Logo => "image_logo",
            SupportKind::Colors => "colors",
            SupportKind::Styles => "styles",
            SupportKind::Subject => "subject",
        }
    }
}

/// Partial configuration: only keys provided by upstream are set
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigOverrides {
    pub reference_images: Vec<String>,
    pub reference_instructions: Vec<String>,
    pub logo_url: Option<String>,

    pub ambient_color: Option<String>,
    pub rim_light_color: Option<String>,
    pub fill_light_color: Option<String>,

    pub style_tags: Option<Vec<String>>,
    pub sobriety: Option<u8>,
    pub use_gradients: Option<bool>,
    pub high_contrast: Option<bool>,
    pub minimal_elements: Option<bool>,

    pub subject_description: Option<String>,
    pub niche: Option<String>,
    pub subject_images: Option<Vec<String>>,
}

impl ConfigOverrides {
    /// Overlay these overrides onto a config, leaving absent keys alone
    pub fn apply_to(&self, mut config: DesignConfig) -> DesignConfig {
        if !self.reference_images.is_empty() {
            config.reference_images = self.reference_images.clone();
            config.reference_instructions = self.reference_instructions.clone();
        }
        if let Some(url) = &self.logo_url {
            config.logo_url = Some(url.clone());
        }
        if let Some(c) = &self.ambient_color {
            config.ambient_color = c.clone();
        }
        if let Some(c) = &self.rim_light_color {
            config.rim_light_color = c.clone();
        }
        if let Some(c) = &self.fill_light_color {
            config.fill_light_color = c.clone();
        }
        if let Some(tags) = &self.style_tags {
            config.style_tags = tags.clone();
        }
        if let Some(s) = self.sobriety {
            config.sobriety = s;
        }
        if let Some(b) = self.use_gradients {
            config.use_gradients = b;
        }
        if let Some(b) = self.high_contrast {
            config.high_contrast = b;
        }
        if let Some(b) = self.minimal_elements {
            config.minimal_elements = b;
        }
        if let Some(d) = &self.subject_description {
            config.subject_description = d.clone();
        }
        if let Some(n) = &self.niche {
            config.niche = n.clone();
        }
        if let Some(images) = &self.subject_images {
            config.subject_images = images.clone();
        }
        config
    }
}

// Payload shapes the support nodes expose as their output data. Every
// field is optional on read so a sparse payload never fails the merge.
#[derive(Debug, Default, Deserialize)]
struct ReferenceImageData {
    #[serde(default)]
    urls: Vec<String>,
    #[serde(default)]
    instructions: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
struct LogoData {
    #[serde(default)]
    url: String,
}

#[derive(Debug, Default, Deserialize)]
struct ColorsData {
    #[serde(default)]
    ambient_color: String,
    #[serde(default)]
    rim_light_color: String,
    #[serde(default)]
    fill_light_color: String,
}

#[derive(Debug, Default, Deserialize)]
struct StylesData {
    #[serde(default)]
    tags: Option<Vec<String>>,
    #[serde(default)]
    sobriety: Option<u8>,
    #[serde(default)]
    use_gradients: Option<bool>,
    #[serde(default)]
    high_contrast: Option<bool>,
    #[serde(default)]
    minimal_elements: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
struct SubjectData {
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    niche: Option<String>,
    #[serde(default)]
    images: Option<Vec<String>>,
}

/// Iterate the numbered sources of one key family in suffix order
fn numbered_outputs<'a>(
    upstream: &'a UpstreamInputMap,
    base: &str,
) -> impl Iterator<Item = &'a NodeOutput> {
    let mut n = 0usize;
    let base = base.to_string();
    std::iter::from_fn(move || {
        n += 1;
        let key = if n == 1 {
            base.clone()
        } else {
            format!("{}_{}", base, n)
        };
        upstream.get(&key)
    })
}

fn parse_output<T: serde::de::DeserializeOwned + Default>(output: &NodeOutput) -> T {
    serde_json::from_value(output.data.clone()).unwrap_or_default()
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Collect support-node outputs into a partial configuration
///
/// Walks the known support key families:
/// - every numbered `reference_image` source contributes URLs, bounded to
///   [`MAX_REFERENCE_IMAGES`] total, with the instruction list padded to
///   the URL list's length
/// - the first numbered `image_logo` source with a non-empty URL wins
/// - `colors` fields are copied only if non-empty after trimming
/// - `styles` replaces the tag list (never a union) and sets whichever
///   attributes the payload carries
/// - `subject` fields are individually optional; its image list is capped
///   at [`MAX_SUBJECT_IMAGES`]
pub fn merge_inputs(upstream: &UpstreamInputMap) -> ConfigOverrides {
    let mut overrides = ConfigOverrides::default();

    for output in numbered_outputs(upstream, SupportKind::ReferenceImage.as_key()) {
        let data: ReferenceImageData = parse_output(output);
        for (i, url) in data.urls.iter().enumerate() {
            if overrides.reference_images.len() >= MAX_REFERENCE_IMAGES {
                log::debug!("Reference image limit reached; ignoring extra URLs");
                break;
            }
            let Some(url) = non_empty(url) else { continue };
            overrides.reference_images.push(url);
            overrides
                .reference_instructions
                .push(data.instructions.get(i).cloned().unwrap_or_default());
        }
    }

    for output in numbered_outputs(upstream, SupportKind::Logo.as_key()) {
        let data: LogoData = parse_output(output);
        if let Some(url) = non_empty(&data.url) {
            overrides.logo_url = Some(url);
            break;
        }
    }

    if let Some(output) = upstream.get(SupportKind::Colors.as_key()) {
        let data: ColorsData = parse_output(output);
        overrides.ambient_color = non_empty(&data.ambient_color);
        overrides.rim_light_color = non_empty(&data.rim_light_color);
        overrides.fill_light_color = non_empty(&data.fill_light_color);
    }

    if let Some(output) = upstream.get(SupportKind::Styles.as_key()) {
        let data: StylesData = parse_output(output);
        overrides.style_tags = data.tags;
        overrides.sobriety = data.sobriety;
        overrides.use_gradients = data.use_gradients;
        overrides.high_contrast = data.high_contrast;
        overrides.minimal_elements = data.minimal_elements;
    }

    if let Some(output) = upstream.get(SupportKind::Subject.as_key()) {
        let data: SubjectData = parse_output(output);
        overrides.subject_description = data.description.and_then(|d| non_empty(&d));
        overrides.niche = data.niche.and_then(|n| non_empty(&n));
        overrides.subject_images = data.images.map(|mut images| {
            images.truncate(MAX_SUBJECT_IMAGES);
            images
        });
    }

    overrides
}

/// Remove the key groups owned by the given support kinds
///
/// Used when a generation slide or slot opts out of a support type: the
/// disabled families are stripped and every other key is left untouched.
pub fn filter_overrides(mut overrides: ConfigOverrides, disabled: &[SupportKind]) -> ConfigOverrides {
    for kind in disabled {
        match kind {
            SupportKind::ReferenceImage => {
                overrides.reference_images.clear();
                overrides.reference_instructions.clear();
            }
            SupportKind::Logo => {
                overrides.logo_url = None;
            }
            SupportKind::Colors => {
                overrides.ambient_color = None;
                overrides.rim_light_color = None;
                overrides.fill_light_color = None;
            }
            SupportKind::Styles => {
                overrides.style_tags = None;
                overrides.sobriety = None;
                overrides.use_gradients = None;
                overrides.high_contrast = None;
                overrides.minimal_elements = None;
            }
            SupportKind::Subject => {
                overrides.subject_description = None;
                overrides.niche = None;
                overrides.subject_images = None;
            }
        }
    }
    overrides
}
