use dotenvy::dotenv;
use order_report::{run, AppError, Config, GoedGepicktClient};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = Config::from_env(&args);

    match inspect(&config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(AppError::PlaceholderApiKey) => {
            log::error!("No API key configured.");
            log::error!("Set GOEDGEPICKT_API_KEY or run: order_report <ORDER_ID> <API_KEY>");
            ExitCode::FAILURE
        }
        Err(AppError::OrderUnavailable(_)) => {
            log::error!("Could not fetch order {}.", config.order_id);
            ExitCode::FAILURE
        }
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn inspect(config: &Config) -> Result<(), AppError> {
    config.validate()?;

    let client = GoedGepicktClient::new(config.api_key.as_str(), &config.base_url)
        .map_err(|e| AppError::Client(e.to_string()))?;

    let mut stdout = std::io::stdout();
    let path = run(&client, &config.order_id, &config.output_dir, &mut stdout).await?;
    println!("Order data saved to: {}", path.display());
    Ok(())
}
