//! Print the final prompt each configured style would produce. Runs
//! offline — no WebUI needed.
//!
//! ```sh
//! cargo run --example styled_prompts
//! ```

use sdwebui_rs::GenerationConfig;

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let config = GenerationConfig::load(sdwebui_rs::DEFAULT_CONFIG_PATH)?;

    let user_prompt = "an abandoned watchtower on a cliff";
    println!("User prompt: {}\n", user_prompt);

    for style in config.styles() {
        let final_prompt = config.styled_prompt(style, user_prompt).unwrap();
        println!("[{}]\n{}\n", style, final_prompt);
    }

    println!("Default negative prompt:\n{}", config.default_negative_prompt);
    Ok(())
}
