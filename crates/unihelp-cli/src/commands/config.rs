//! Configuration commands.

use super::config_path;
use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;
use unihelp_config::Config;

pub fn show(explicit: Option<&Path>) -> Result<()> {
    let path = config_path(explicit)?;

    println!("{}", "Current Configuration".cyan().bold());
    println!("{}", "─".repeat(50));

    if !path.exists() {
        println!(
            "{} No config file at {}; built-in defaults apply.",
            "Note:".yellow(),
            path.display()
        );
        println!();
        println!("{}", Config::default_config_string());
        return Ok(());
    }

    let contents = std::fs::read_to_string(&path).context("Failed to read config file")?;
    println!("{}", contents);

    if let Err(e) = Config::load_from(&path) {
        println!("{} {}", "Warning:".yellow().bold(), e);
    }

    Ok(())
}

pub fn init(explicit: Option<&Path>, force: bool) -> Result<()> {
    let path = config_path(explicit)?;

    if path.exists() && !force {
        println!(
            "{} Config file already exists: {}",
            "Note:".yellow().bold(),
            path.display()
        );
        println!("  Use --force to overwrite it.");
        return Ok(());
    }

    Config::create_default_file(&path).context("Failed to write config file")?;
    println!("{} Created {}", "✓".green(), path.display());

    Ok(())
}

pub fn path(explicit: Option<&Path>) -> Result<()> {
    println!("{}", config_path(explicit)?.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_init_respects_existing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        init(Some(path.as_path()), false).unwrap();
        assert!(path.exists());

        std::fs::write(&path, "[logging]\nlevel = \"debug\"\n").unwrap();
        init(Some(path.as_path()), false).unwrap();
        assert!(std::fs::read_to_string(&path).unwrap().contains("debug"));

        init(Some(path.as_path()), true).unwrap();
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.logging.level, "info");
    }
}
