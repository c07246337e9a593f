use clap::Parser;
use clay_engine::{GenerationClient, SculptorAgent, image_model::Imagen};
use clay_sculptor::{cli::Cli, load_config, resolve_api_key, run_single, session::Session};
use color_eyre::Result;
use log::LevelFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;
    pretty_env_logger::formatted_builder()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();

    let cli = Cli::parse();
    let api_key = resolve_api_key(|var| std::env::var(var).ok())?;
    let config = cli.apply(load_config(cli.config.as_deref())?);

    let client = GenerationClient::new(Box::new(Imagen::new(api_key)));
    let agent = SculptorAgent::new(client, config);

    if cli.interactive {
        let stdin = std::io::stdin();
        Session::new(&agent)
            .run(stdin.lock(), std::io::stdout())
            .await?;
    } else {
        for path in run_single(&agent, &cli).await? {
            println!("Saved {}", path.display());
        }
    }

    Ok(())
}
