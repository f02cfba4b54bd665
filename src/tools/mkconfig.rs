use std::fs;
use std::path::Path;

use tracing::info;

use crate::input::InputError;
use crate::input::config::RunConfig;

pub const DEFAULT_CONFIG_NAME: &str = "config.json";

/// Writes the example configuration; an existing file is never replaced.
pub fn write_example_config(path: &Path) -> Result<(), InputError> {
    if path.exists() {
        return Err(InputError::InvalidInput(format!(
            "{} already exists",
            path.display()
        )));
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, RunConfig::example().to_json()?)?;
    info!(path = %path.display(), "example configuration written");
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/src_inline/tools/mkconfig.rs"]
mod tests;
