use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{Result, SdError};

/// Conventional config file location, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "config.json";

/// Style-to-prompt-suffix mapping plus the default negative prompt.
///
/// Immutable after load. The selector keys exposed to a UI come from
/// [`GenerationConfig::styles`]; the final prompt for a submission is
/// assembled by [`GenerationConfig::styled_prompt`].
///
/// # Example
/// ```
/// use sdwebui_rs::GenerationConfig;
///
/// let config = GenerationConfig::fallback();
/// let prompt = config.styled_prompt("Retratos", "an old dwarf king").unwrap();
/// assert!(prompt.starts_with("an old dwarf king, "));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GenerationConfig {
    pub default_negative_prompt: String,
    pub prompts: BTreeMap<String, String>,
}

impl GenerationConfig {
    /// Load the config from a JSON file. Two explicit branches:
    ///
    /// - file absent → [`GenerationConfig::fallback`], returned verbatim
    ///   (never merged with a partial file);
    /// - file present → parsed document, or [`SdError::Config`] if the
    ///   JSON is malformed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::fallback()),
            Err(e) => return Err(SdError::Io(e)),
        };
        serde_json::from_str(&text).map_err(|source| SdError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// The built-in config used when no file is present: five styles
    /// tuned for tabletop RPG art, plus a general-purpose negative prompt.
    pub fn fallback() -> Self {
        let mut prompts = BTreeMap::new();
        prompts.insert(
            "Pueblos".to_string(),
            "fantasy, medieval, village, town, city, architecture, buildings, houses, streets, \
             market, people, shops, tavern, inn, castle, church, square, fountain, flowers, \
             animals, pets, birds, sky, clouds"
                .to_string(),
        );
        prompts.insert(
            "Mazmorras".to_string(),
            "Dark, underground, cave, High fantasy concept art, ultra-detailed environment. \
             Dungeons and Dragons 5e, fantasy illustration, detailed, book style"
                .to_string(),
        );
        prompts.insert(
            "Paisajes".to_string(),
            "landscape, oilpainting, drawn, ilustration, dungeons and dragons, detailed, nature, \
             mountains, forest, river, lake, sky, clouds, calm, peaceful, serene, tranquil, \
             quiet, beautiful, scenic, picturesque"
                .to_string(),
        );
        prompts.insert(
            "Retratos".to_string(),
            "portrait, realistic, detailed, drawn, face, barroque, oil painting, Dungeons and \
             Dragons 5e, fantasy illustration, detailed, book style"
                .to_string(),
        );
        prompts.insert(
            "Monstruos".to_string(),
            "Dungeons and Dragons 5e, fantasy illustration, detailed, book style, high fantasy, \
             dark"
                .to_string(),
        );

        Self {
            default_negative_prompt: "ugly, deformed, noisy, blurry, low quality, cartoon, flat \
                                      shading, watermark, text, logo, duplicates, out of frame"
                .to_string(),
            prompts,
        }
    }

    /// Style names for a selector widget.
    pub fn styles(&self) -> impl Iterator<Item = &str> {
        self.prompts.keys().map(String::as_str)
    }

    /// Append the style's suffix to the user prompt. Returns `None` for
    /// an unknown style name.
    pub fn styled_prompt(&self, style: &str, prompt: &str) -> Option<String> {
        self.prompts
            .get(style)
            .map(|suffix| format!("{}, {}", prompt, suffix))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_fallback_has_five_documented_styles() {
        let config = GenerationConfig::fallback();
        let styles: Vec<&str> = config.styles().collect();
        assert_eq!(styles.len(), 5);
        for name in ["Pueblos", "Mazmorras", "Paisajes", "Retratos", "Monstruos"] {
            assert!(styles.contains(&name), "missing style {}", name);
        }
        assert!(config.default_negative_prompt.starts_with("ugly, deformed"));
    }

    #[test]
    fn test_missing_file_returns_fallback() {
        let dir = tempfile::tempdir().unwrap();
        let config = GenerationConfig::load(dir.path().join("config.json")).unwrap();
        assert_eq!(config, GenerationConfig::fallback());
    }

    #[test]
    fn test_present_file_is_used_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let mut f = std::fs::File::create(&path).unwrap();
        write!(
            f,
            r#"{{"default_negative_prompt": "bad", "prompts": {{"Solo": "one style"}}}}"#
        )
        .unwrap();

        let config = GenerationConfig::load(&path).unwrap();
        assert_eq!(config.default_negative_prompt, "bad");
        assert_eq!(config.styles().count(), 1);
        assert_eq!(
            config.styled_prompt("Solo", "a tower").as_deref(),
            Some("a tower, one style")
        );
        // The file replaces the fallback wholesale — no merging.
        assert!(config.styled_prompt("Pueblos", "x").is_none());
    }

    #[test]
    fn test_malformed_file_fails_fast() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{not json").unwrap();

        let err = GenerationConfig::load(&path).unwrap_err();
        assert!(matches!(err, SdError::Config { .. }));
    }

    #[test]
    fn test_styled_prompt_unknown_style() {
        let config = GenerationConfig::fallback();
        assert!(config.styled_prompt("Nope", "a cat").is_none());
    }
}
