//! Designflow Prompt - config merge and prompt assembly
//!
//! Turns the outputs of the support nodes connected to a generator into
//! one `DesignConfig` and renders that config into the natural-language
//! instruction consumed by the generation service.
//!
//! The pipeline is three pure steps:
//!
//! 1. [`merge_inputs`] — collect upstream support outputs into a partial
//!    override set
//! 2. [`filter_overrides`] — strip the groups a slide opted out of
//! 3. [`ConfigOverrides::apply_to`] + [`build_prompt`] — overlay onto the
//!    documented defaults and render

pub mod config;
pub mod merge;
pub mod prompt;

pub use config::{DesignConfig, MAX_REFERENCE_IMAGES, MAX_SUBJECT_IMAGES};
pub use merge::{filter_overrides, merge_inputs, ConfigOverrides, SupportKind};
pub use prompt::{build_prompt, format_label, tone_label};
