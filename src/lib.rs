//! # sdwebui-rs
//!
//! Async Rust client for the [Stable Diffusion WebUI](https://github.com/AUTOMATIC1111/stable-diffusion-webui)
//! `txt2img` REST API.
//!
//! Provides a typed client for one-shot image generation with
//! deterministic on-disk persistence, a layered style configuration
//! (JSON file with a built-in fallback), a session-scoped generation
//! history, and a submission flow that wires them together the way a
//! generation form would.
//!
//! ## Quick Start
//!
//! ```no_run
//! use sdwebui_rs::{GenerationConfig, GenerationOptions, SdClient, Session, SubmitRequest};
//!
//! # async fn example() -> sdwebui_rs::Result<()> {
//! let client = SdClient::new("http://127.0.0.1:7860");
//! let config = GenerationConfig::load("config.json")?;
//! let mut session = Session::new();
//!
//! // Advanced panel opened: overrides apply.
//! session.set_advanced_options(true);
//!
//! let request = SubmitRequest::new("Paisajes", "a misty valley at dawn")
//!     .options(GenerationOptions::new().steps(50).cfg_scale(9.0));
//!
//! let path = sdwebui_rs::submit(&client, &config, &mut session, &request).await?;
//! println!("Saved: {}", path.display());
//!
//! for entry in session.recent() {
//!     println!("{} [{}] {}", entry.timestamp, entry.style, entry.prompt);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Every failure mode of a generation round trip — unreachable service,
//! non-2xx status, malformed response, bad base64, filesystem trouble —
//! surfaces as an [`SdError`] from the call; nothing panics past the
//! client boundary and a failed attempt leaves the session history
//! untouched.

pub mod client;
pub mod config;
pub mod error;
pub mod session;
pub mod submit;
pub mod types;

pub use client::{SdClient, DEFAULT_ENDPOINT, DEFAULT_OUTPUT_DIR};
pub use config::{GenerationConfig, DEFAULT_CONFIG_PATH};
pub use error::{Result, SdError};
pub use session::{HistoryEntry, Session, VISIBLE_HISTORY};
pub use submit::{submit, SubmitRequest};
pub use types::{GenerationOptions, Txt2ImgPayload, RANDOM_SEED};
