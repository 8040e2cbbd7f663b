use anyhow::Result;
use tracing::info;

use scrollsnap_core::AppConfig;

pub fn run(config: &AppConfig, path_only: bool, save: bool) -> Result<()> {
    let path = AppConfig::config_path();

    if path_only {
        println!("{}", path.display());
        return Ok(());
    }

    if save {
        config.save()?;
        info!(path = %path.display(), "Settings written");
        println!("Saved settings to {}", path.display());
        return Ok(());
    }

    print!("{}", config.to_toml()?);
    Ok(())
}
