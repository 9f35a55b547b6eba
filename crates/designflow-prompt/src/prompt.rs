//! Prompt assembly
//!
//! Renders a merged `DesignConfig` into the single natural-language
//! instruction sent to the generation service. Pure and deterministic:
//! the same config always yields byte-identical output, because the
//! service renders the same prompt server-side and both sides must agree.

use crate::config::DesignConfig;

/// Map an aspect-ratio code to its named output format
///
/// Unknown codes pass through verbatim.
pub fn format_label(dimensions: &str) -> String {
    match dimensions {
        "9:16" => "stories 9:16".to_string(),
        "16:9" => "horizontal 16:9".to_string(),
        "1:1" => "feed 1:1".to_string(),
        "4:5" => "feed 4:5".to_string(),
        other => other.to_string(),
    }
}

/// The tone label derived from the sobriety level
pub fn tone_label(sobriety: u8) -> &'static str {
    if sobriety <= 50 {
        "mais criativo"
    } else {
        "mais profissional"
    }
}

/// The mandatory overlay-text block, quoted verbatim
///
/// Prepended before everything else when text is enabled; the headline,
/// subheadline, and call-to-action must appear exactly as the user typed
/// them.
fn overlay_text_block(config: &DesignConfig) -> String {
    let mut block = format!(
        "O design deve exibir, escrito de forma legível e em destaque, o título \"{}\"",
        config.headline_h1
    );
    if !config.subheadline_h2.is_empty() {
        block.push_str(&format!(", o subtítulo \"{}\"", config.subheadline_h2));
    }
    if !config.cta_text.is_empty() {
        block.push_str(&format!(" e o botão de ação \"{}\"", config.cta_text));
    }
    block.push_str(&format!(
        ". O texto fica na posição {} da imagem, sobre um leve efeito de gradiente que garante a leitura.",
        config.text_position
    ));
    block
}

/// Render the merged config into the generation instruction
///
/// Fixed section order: overlay text (when enabled), subject, niche,
/// environment and lighting, framing and layout, style and tone,
/// floating elements, output format, additional instructions. Empty
/// sections are omitted entirely.
pub fn build_prompt(config: &DesignConfig) -> String {
    let mut sections: Vec<String> = Vec::new();

    if config.text_enabled {
        sections.push(overlay_text_block(config));
    }

    if !config.subject_description.is_empty() {
        sections.push(format!("A imagem mostra {}.", config.subject_description));
    }

    if !config.niche.is_empty() {
        sections.push(format!("O contexto é o nicho de {}.", config.niche));
    }

    let mut scene = String::new();
    if !config.environment.is_empty() {
        scene.push_str(&format!("Cenário: {}.", config.environment));
    }
    let lights: Vec<String> = [
        ("cor ambiente", &config.ambient_color),
        ("luz de recorte", &config.rim_light_color),
        ("luz de preenchimento", &config.fill_light_color),
    ]
    .iter()
    .filter(|(_, color)| !color.is_empty())
    .map(|(label, color)| format!("{} {}", label, color))
    .collect();
    if !lights.is_empty() {
        if !scene.is_empty() {
            scene.push(' ');
        }
        scene.push_str(&format!("Iluminação com {}.", lights.join(", ")));
    }
    if !scene.is_empty() {
        sections.push(scene);
    }

    let mut framing = format!(
        "Enquadramento {}, com o elemento principal posicionado em {}",
        config.camera_framing, config.layout_position
    );
    if config.text_enabled {
        framing.push_str(&format!(
            ", reservando espaço livre na posição {} para o texto em destaque",
            config.text_position
        ));
    }
    framing.push('.');
    sections.push(framing);

    let mut style = format!(
        "Estilo visual: {}, com tom {}.",
        config.style_tags.join(", "),
        tone_label(config.sobriety)
    );
    if config.use_gradients {
        style.push_str(" Uso de gradientes.");
    }
    if config.high_contrast {
        style.push_str(" Alto contraste.");
    }
    if config.minimal_elements {
        style.push_str(" Composição minimalista.");
    }
    sections.push(style);

    if !config.floating_elements.is_empty() {
        sections.push(format!("Elementos flutuantes: {}.", config.floating_elements));
    }

    sections.push(format!(
        "Formato de saída {}.",
        format_label(&config.dimensions)
    ));

    if !config.additional_instructions.is_empty() {
        sections.push(format!(
            "Instruções adicionais: {}.",
            config.additional_instructions
        ));
    }

    sections.join(" ")
}
