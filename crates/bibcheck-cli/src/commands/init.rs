//! Init command implementation.

use anyhow::{bail, Context, Result};
use std::path::Path;

const CONFIG_FILE: &str = "bibcheck.toml";

const DEFAULT_CONFIG: &str = r#"# bibcheck configuration

# Exit with a failure status when an issue at or above this severity is found
fail_on = "warning"

[analyzer]
# File or directory to check (default: current directory)
# root = "./paper"

# Glob patterns to exclude from analysis
exclude = [
    "**/build/**",
]

[doi]
# Look up every DOI at the resolver
enabled = true
timeout_secs = 30
workers = 8
# resolver_url = "https://doi.org/"

# Rule configurations
# Each rule can be enabled/disabled and have its severity overridden

[rules.et-al-not-wrapped]
enabled = true
# severity = "error"

[rules.incorrect-style-reference]
enabled = true

# [rules.doi-not-found]
# severity = "warning"
"#;

/// Runs the init command, writing the config into `dir`.
pub fn run(dir: &Path, force: bool) -> Result<()> {
    let config_path = dir.join(CONFIG_FILE);

    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(&config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;

    println!("Created {CONFIG_FILE}");
    println!("\nNext steps:");
    println!("  1. Edit {CONFIG_FILE} to configure rules");
    println!("  2. Run: bibcheck check paper.tex");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bibcheck_core::Config;
    use tempfile::TempDir;

    #[test]
    fn default_config_parses() {
        let config = Config::parse(DEFAULT_CONFIG).unwrap();
        assert!(config.doi.enabled);
        assert_eq!(config.analyzer.exclude, vec!["**/build/**".to_string()]);
        assert!(config.is_rule_enabled("et-al-not-wrapped"));
    }

    #[test]
    fn refuses_to_overwrite_without_force() {
        let tmp = TempDir::new().unwrap();
        run(tmp.path(), false).unwrap();
        assert!(run(tmp.path(), false).is_err());
        run(tmp.path(), true).unwrap();
        assert!(tmp.path().join(CONFIG_FILE).exists());
    }
}
