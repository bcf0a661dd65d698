use std::fs;
use std::path::PathBuf;

use clap::Parser;
use log::{debug, info};
use markov_core::{MarkovModel, NO_SYMBOL};

/// Generates text from an order-k Markov model trained on a file.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Training text, read as raw bytes
    input: PathBuf,

    /// Context length
    #[arg(short, long, default_value_t = 3)]
    order: usize,

    /// Seed of the model generator
    #[arg(short, long, default_value_t = 42)]
    seed: u64,

    /// Maximum number of symbols to generate
    #[arg(short, long, default_value_t = 200)]
    length: usize,

    /// Starting context; must be exactly `order` bytes, a random one is picked otherwise
    #[arg(long)]
    start: Option<String>,
}

/// Extends `start` one symbol at a time until the model has nothing to say
/// about the current context or `length` symbols were added.
fn generate(model: &mut MarkovModel, start: Vec<u8>, length: usize) -> Vec<u8> {
    let order = model.order();
    let mut text = start;

    for _ in 0..length {
        let next = model.next_symbol(&text[text.len() - order..]);
        if next == NO_SYMBOL {
            debug!("dead end after {} symbols", text.len());
            break;
        }
        text.push(next);
    }

    text
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    let training = fs::read(&args.input)?;
    info!("read {} bytes from {}", training.len(), args.input.display());

    // Build the model once; every later call only reads it or draws from it
    let mut model = MarkovModel::new(args.order, args.seed);
    model.train(&training);
    info!("{} contexts of order {}", model.len(), model.order());

    let start = match args.start {
        Some(s) if s.len() == args.order => s.into_bytes(),
        Some(s) => {
            info!("start '{}' is not {} bytes long, picking a random context", s, args.order);
            model.random_context().ok_or("Model is empty, the input is too short")?
        }
        None => model.random_context().ok_or("Model is empty, the input is too short")?,
    };

    let text = generate(&mut model, start, args.length);
    println!("{}", String::from_utf8_lossy(&text));

    Ok(())
}
