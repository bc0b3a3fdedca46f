use serde::{Deserialize, Serialize};

/// Fixed default parameter set for txt2img generation.
pub const DEFAULT_STEPS: u32 = 30;
pub const DEFAULT_WIDTH: u32 = 512;
pub const DEFAULT_HEIGHT: u32 = 512;
pub const DEFAULT_CFG_SCALE: f64 = 7.0;
pub const DEFAULT_SAMPLER: &str = "Euler a";

/// Seed value meaning "let the WebUI pick a random seed".
pub const RANDOM_SEED: i64 = -1;

/// Partial override of the default generation parameters.
///
/// Every field is optional; unset fields fall back to the documented
/// defaults when the payload is built. There is deliberately no prompt
/// field here — prompts are always passed explicitly and always win.
///
/// # Example
/// ```
/// use sdwebui_rs::GenerationOptions;
///
/// let opts = GenerationOptions::new()
///     .steps(50)
///     .cfg_scale(9.5)
///     .seed(42);
/// ```
#[derive(Debug, Clone, Default)]
pub struct GenerationOptions {
    pub steps: Option<u32>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub cfg_scale: Option<f64>,
    pub sampler: Option<String>,
    pub seed: Option<i64>,
}

impl GenerationOptions {
    /// Create an empty override set (all defaults apply).
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the number of sampling steps.
    pub fn steps(mut self, steps: u32) -> Self {
        self.steps = Some(steps);
        self
    }

    /// Override the output width in pixels.
    pub fn width(mut self, width: u32) -> Self {
        self.width = Some(width);
        self
    }

    /// Override the output height in pixels.
    pub fn height(mut self, height: u32) -> Self {
        self.height = Some(height);
        self
    }

    /// Override the classifier-free guidance scale.
    pub fn cfg_scale(mut self, cfg: f64) -> Self {
        self.cfg_scale = Some(cfg);
        self
    }

    /// Override the sampler algorithm (e.g. "Euler a", "DPM++ 2M").
    pub fn sampler(mut self, sampler: impl Into<String>) -> Self {
        self.sampler = Some(sampler.into());
        self
    }

    /// Pin the seed. Use [`RANDOM_SEED`] (-1) for a server-side random seed.
    pub fn seed(mut self, seed: i64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// JSON body for `POST /sdapi/v1/txt2img`.
///
/// Built through [`Txt2ImgPayload::merged`], which layers defaults,
/// caller overrides, and the explicit prompts in that order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Txt2ImgPayload {
    pub prompt: String,
    pub negative_prompt: String,
    pub steps: u32,
    pub width: u32,
    pub height: u32,
    pub cfg_scale: f64,
    #[serde(rename = "sampler_index")]
    pub sampler: String,
    pub seed: i64,
}

impl Txt2ImgPayload {
    /// Merge defaults with `options`, then set `prompt` and
    /// `negative_prompt` unconditionally. The explicit arguments always
    /// win over anything the overrides could carry.
    pub fn merged(prompt: &str, negative_prompt: &str, options: &GenerationOptions) -> Self {
        Self {
            prompt: prompt.to_string(),
            negative_prompt: negative_prompt.to_string(),
            steps: options.steps.unwrap_or(DEFAULT_STEPS),
            width: options.width.unwrap_or(DEFAULT_WIDTH),
            height: options.height.unwrap_or(DEFAULT_HEIGHT),
            cfg_scale: options.cfg_scale.unwrap_or(DEFAULT_CFG_SCALE),
            sampler: options
                .sampler
                .clone()
                .unwrap_or_else(|| DEFAULT_SAMPLER.to_string()),
            seed: options.seed.unwrap_or(RANDOM_SEED),
        }
    }
}
