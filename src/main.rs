use captionary::{AppConfig, ImageReference};
use std::env;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // Get title and image from command-line arguments
    let args: Vec<String> = env::args().collect();
    let usage = "Usage: captionary <title> <image-url-or-path>";
    let title = args.get(1).ok_or(usage)?;
    let image = args.get(2).ok_or(usage)?;

    let config = AppConfig::load()?;
    let outcome = captionary::generate_caption(&config, ImageReference::parse(image), title).await?;

    println!("Descripción:\n{}\n", outcome.record.description);
    println!("Palabras clave: {}", outcome.record.keywords_joined());

    for warning in &outcome.warnings {
        eprintln!("Aviso: {}", warning);
    }

    if let Some(path) = &outcome.report_path {
        println!("Informe: {}", path.display());
    }
    println!("Compartir: {}", outcome.share_url);

    Ok(())
}
