//! Generator node field models
//!
//! The image generator owns the request parameters that no support node
//! supplies: output dimensions, scene, framing, overlay text, floating
//! elements, and free-form instructions. Its output is the assembled
//! `DesignConfig` — support outputs merged over the documented defaults,
//! then the generator's own fields applied on top.
//!
//! The carousel is the multi-slide variant: one config per slide, where
//! each slide may opt out of individual support families.

use serde::{Deserialize, Serialize};

use designflow_prompt::{filter_overrides, merge_inputs, DesignConfig, SupportKind};
use designflow_remote::GeneratedAsset;
use flow_engine::UpstreamInputMap;

/// Editable state of an image generator node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorFields {
    pub dimensions: String,
    pub environment: String,
    pub camera_framing: String,
    pub layout_position: String,
    pub floating_elements: String,

    pub text_enabled: bool,
    pub headline_h1: String,
    pub subheadline_h2: String,
    pub cta_text: String,
    pub text_position: String,

    pub additional_instructions: String,

    /// Node-owned loading indicator while a generation request runs
    pub generating: bool,
    /// Artifacts returned by the last successful generation
    pub assets: Vec<GeneratedAsset>,
}

impl Default for GeneratorFields {
    fn default() -> Self {
        let defaults = DesignConfig::default();
        Self {
            dimensions: defaults.dimensions,
            environment: defaults.environment,
            camera_framing: defaults.camera_framing,
            layout_position: defaults.layout_position,
            floating_elements: defaults.floating_elements,
            text_enabled: defaults.text_enabled,
            headline_h1: defaults.headline_h1,
            subheadline_h2: defaults.subheadline_h2,
            cta_text: defaults.cta_text,
            text_position: defaults.text_position,
            additional_instructions: defaults.additional_instructions,
            generating: false,
            assets: Vec::new(),
        }
    }
}

impl GeneratorFields {
    /// Copy the generator-owned parameters onto a config
    fn apply_own_fields(&self, mut config: DesignConfig) -> DesignConfig {
        config.dimensions = self.dimensions.trim().to_string();
        config.environment = self.environment.trim().to_string();
        config.camera_framing = self.camera_framing.trim().to_string();
        config.layout_position = self.layout_position.trim().to_string();
        config.floating_elements = self.floating_elements.trim().to_string();
        config.text_enabled = self.text_enabled;
        config.headline_h1 = self.headline_h1.clone();
        config.subheadline_h2 = self.subheadline_h2.clone();
        config.cta_text = self.cta_text.clone();
        config.text_position = self.text_position.trim().to_string();
        config.additional_instructions = self.additional_instructions.trim().to_string();
        config
    }

    /// Assemble the full request config from these fields and the
    /// resolved support outputs
    pub fn assemble_config(&self, upstream: &UpstreamInputMap) -> DesignConfig {
        let overrides = merge_inputs(upstream);
        self.apply_own_fields(overrides.apply_to(DesignConfig::default()))
    }
}

/// One slide of a carousel
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlideSpec {
    /// Support families this slide opts out of
    pub disabled_support_types: Vec<SupportKind>,
    /// Slide-specific instructions appended to the shared ones
    pub extra_instructions: String,
}

/// Editable state of a carousel node
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarouselFields {
    /// Shared generation parameters, applied to every slide
    #[serde(flatten)]
    pub base: GeneratorFields,
    pub slides: Vec<SlideSpec>,
}

impl CarouselFields {
    /// Assemble one config per slide
    ///
    /// The merged support overrides are computed once, then each slide
    /// strips the families it disabled before applying the shared fields.
    pub fn slide_configs(&self, upstream: &UpstreamInputMap) -> Vec<DesignConfig> {
        let overrides = merge_inputs(upstream);
        self.slides
            .iter()
            .map(|slide| {
                let slide_overrides =
                    filter_overrides(overrides.clone(), &slide.disabled_support_types);
                let mut config = self
                    .base
                    .apply_own_fields(slide_overrides.apply_to(DesignConfig::default()));
                let extra = slide.extra_instructions.trim();
                if !extra.is_empty() {
                    if config.additional_instructions.is_empty() {
                        config.additional_instructions = extra.to_string();
                    } else {
                        config.additional_instructions =
                            format!("{} {}", config.additional_instructions, extra);
                    }
                }
                config
            })
            .collect()
    }
}
