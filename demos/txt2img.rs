//! Run one styled generation against a local Stable Diffusion WebUI.
//!
//! Requires the WebUI running with `--api` at http://127.0.0.1:7860.
//!
//! ```sh
//! cargo run --example txt2img
//! ```

use sdwebui_rs::{GenerationConfig, GenerationOptions, SdClient, Session, SubmitRequest};

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let client = SdClient::default();

    // Check connection
    if !client.health().await? {
        eprintln!("Stable Diffusion WebUI is not responding");
        return Ok(());
    }
    println!("WebUI is online at {}", client.endpoint());

    // Config: config.json if present, built-in styles otherwise
    let config = GenerationConfig::load(sdwebui_rs::DEFAULT_CONFIG_PATH)?;
    println!("Available styles:");
    for style in config.styles() {
        println!("  - {}", style);
    }

    // What the advanced panel would offer
    let samplers = client.samplers().await?;
    if !samplers.is_empty() {
        println!("Samplers: {}", samplers.join(", "));
    }

    // Placeholder shown by the form before the first generation
    let placeholder = std::path::Path::new("img/placeholder.png");
    if !placeholder.exists() {
        eprintln!("Image file not found: {}", placeholder.display());
    }

    let mut session = Session::new();
    session.set_advanced_options(true);

    let request = SubmitRequest::new("Paisajes", "a misty valley at dawn, distant watchtower")
        .options(GenerationOptions::new().steps(40).cfg_scale(8.0));

    println!("Generating...");
    match sdwebui_rs::submit(&client, &config, &mut session, &request).await {
        Ok(path) => println!("Saved: {}", path.display()),
        Err(e) => eprintln!("Generation failed: {}", e),
    }

    // Last 5, newest first
    for entry in session.recent() {
        println!(
            "{} [{}] {} -> {}",
            entry.timestamp.format("%Y-%m-%d %H:%M:%S"),
            entry.style,
            entry.prompt,
            entry.path.display()
        );
    }

    Ok(())
}
