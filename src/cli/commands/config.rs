use crate::cli::{ConfigCommands, ConfigFormat, Output};
use crate::config::ParsumConfig;
use anyhow::{Context, Result};

pub fn execute(cmd: ConfigCommands, custom_config: Option<&str>, output: &Output) -> Result<()> {
    match cmd {
        ConfigCommands::Show { format } => {
            let config = ParsumConfig::load_with_custom_config(custom_config)?;
            let rendered = match format {
                ConfigFormat::Toml => {
                    toml::to_string_pretty(&config).context("Failed to render config as TOML")?
                }
                ConfigFormat::Json => serde_json::to_string_pretty(&config)?,
            };
            println!("{}", rendered.trim_end());
        }
        ConfigCommands::Validate => {
            let config = ParsumConfig::load_with_custom_config(custom_config)?;
            output.success("Configuration is valid");
            output.key_value("threads", &config.resolved_threads().to_string(), false);
            output.key_value("backend", config.reduce.backend.as_str(), false);
            output.key_value("count", &config.sample.count.to_string(), false);
            let (min, max) = config.sampler()?.range();
            output.key_value("range", &format!("[{min}, {max}]"), false);
        }
    }
    Ok(())
}
