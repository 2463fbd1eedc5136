use crate::api::{FilingApi, HttpFilingApi};
use crate::config::FilingLensConfig;
use crate::errors::FilingLensError;
use crate::repl::renderer;

pub async fn handle_health(config: &FilingLensConfig) -> Result<(), FilingLensError> {
    let api = HttpFilingApi::new(config.base_url());
    let status = api.health().await?;
    println!("{}", renderer::render_health(api.base_url(), &status));
    Ok(())
}
