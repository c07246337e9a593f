use clap::Parser;
use clay_engine::{
    GenerationClient, config::DEFAULT_MODEL, image_model::Imagen, prompt::build_prompt,
};
use color_eyre::Result;

/// Sends one raw prompt to Imagen and stores the result, bypassing the agent.
#[derive(clap::Parser)]
struct Arg {
    key: String,
    description: String,
    #[arg(long, default_value = DEFAULT_MODEL)]
    model: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    pretty_env_logger::init();
    let Arg {
        key,
        description,
        model,
    } = Arg::parse();

    let client = GenerationClient::new(Box::new(Imagen::new(key)));
    let image = client.generate(&build_prompt(&description, false), &model).await?;
    std::fs::write("output.png", &image)?;
    println!("Saved image, {} bytes", image.len());

    Ok(())
}
