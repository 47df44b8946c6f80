use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::Result;
use secrecy::SecretString;
use tokio::sync::Mutex;

use hoaxify::{
    core::app::AppSettings,
    domain::NewUser,
    infrastructure::{
        api::HoaxifyApi,
        cli::{Cli, Command},
        config::Config,
        http::HttpApi,
        signer::{BasicAuthSigner, CredentialStore},
        tui::real::RealTui,
    },
    integration::app_runner::AppRunner,
    trace_dbg,
    utils::{initialize_logging, initialize_panic_handler},
};

async fn run_command(api: &dyn HoaxifyApi, command: Command) -> Result<()> {
    match command {
        Command::Signup {
            username,
            display_name,
            password,
        } => {
            let user = NewUser {
                username,
                display_name,
                password: SecretString::from(password),
            };
            match api.signup(&user).await {
                Ok(message) => println!("{message}"),
                Err(e) => {
                    for (field, message) in e.validation_errors() {
                        eprintln!("{field}: {message}");
                    }
                    return Err(e.into());
                }
            }
        }
        Command::Post { content } => {
            let hoax = api.post_hoax(&content).await?;
            println!("posted hoax #{} as @{}", hoax.id, hoax.user.username);
        }
    }
    Ok(())
}

async fn tokio_main() -> Result<()> {
    initialize_logging()?;

    initialize_panic_handler()?;

    let args = Cli::parse();

    let mut config = Config::new()?;
    if let Some(base_url) = args.base_url {
        config.base_url = base_url;
    }
    let config = trace_dbg!(config);

    let credentials = CredentialStore::new();
    let signer = Arc::new(BasicAuthSigner::new(credentials.clone()));
    let api: Arc<dyn HoaxifyApi> = Arc::new(HttpApi::new(
        config.base_url.clone(),
        signer,
        config.request_timeout(),
    )?);

    if let Some(command) = args.command {
        if let Some(login) = config.credentials() {
            credentials.set(login);
        }
        return run_command(api.as_ref(), command).await;
    }

    let settings = AppSettings {
        feed: config.feed_config(),
        directory_page_size: config.directory_page_size,
        credentials: config.credentials(),
        initial_user: args.user,
    };
    let tui = Arc::new(Mutex::new(
        RealTui::new()?
            .tick_rate(args.tick_rate)
            .frame_rate(args.frame_rate),
    ));
    let mut runner = AppRunner::new(settings, api, credentials, tui);
    runner.run().await?;

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    if let Err(e) = tokio_main().await {
        eprintln!("{} error: Something went wrong", env!("CARGO_PKG_NAME"));
        Err(e)
    } else {
        Ok(())
    }
}
