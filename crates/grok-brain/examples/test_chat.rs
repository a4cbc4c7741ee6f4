//! Simple test for GrokBrain chat completion.
//!
//! Run with: cargo run -p grok-brain --example test_chat
//! Or with a custom message: cargo run -p grok-brain --example test_chat -- "Your message here"
//!
//! Make sure to set environment variables in .env:
//!   GROK_API_KEY - xAI API key for authentication

use grok_brain::{Brain, ChatTurn, CompletionRequest, GrokBrain};
use std::env;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::fmt::init();

    let args: Vec<String> = env::args().collect();
    let message_text = if args.len() > 1 {
        args[1..].join(" ")
    } else {
        "Hi, how much does it cost to wrap a pickup truck?".to_string()
    };

    println!("Initializing GrokBrain...");
    let brain = GrokBrain::from_env()?;

    println!("Brain initialized: {}", brain.name());
    println!("API URL: {}", brain.config().api_url);
    println!("Model: {}", brain.config().model);
    println!();

    let request = CompletionRequest::new(
        "You are a friendly assistant for a vehicle wrap shop. Never quote exact prices.",
        vec![ChatTurn::customer(&message_text)],
        300,
    );

    println!("Sending: \"{}\"", message_text);
    println!("Waiting for response...\n");

    let completion = brain.complete(request).await?;

    println!("=== Response ===");
    println!("{}", completion.text);
    println!("================");
    println!(
        "Tokens: {} prompt, {} completion",
        completion.usage.prompt_tokens, completion.usage.completion_tokens
    );

    Ok(())
}
