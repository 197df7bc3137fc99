//! Project initialization.
//!
//! Creates the project skeleton: `ogcard.toml`, a templates directory and
//! the default card template.

use anyhow::{Context, Result};
use std::{fs, path::Path};

use crate::{
    config::OgConfig,
    embed::{CONFIG_TOML, ConfigVars, DEFAULT_CARD_SVG},
    log,
};

/// Standard project directory structure.
const PROJECT_DIRS: &[&str] = &["templates"];

/// Create a new project with default structure
///
/// # Steps
/// 1. Validate target directory
/// 2. Create directory structure
/// 3. Write configuration file
/// 4. Write default card template
///
/// If `dry_run` is true, only prints the config template to stdout
pub fn new_project(config: &OgConfig, dry_run: bool) -> Result<()> {
    let root = config.get_root();

    if dry_run {
        print!("{}", render_config(root));
        return Ok(());
    }

    if config.config_path.exists() {
        log!("error"; "'{}' already exists, refusing to overwrite", config.config_path.display());
        std::process::exit(1);
    }

    create_structure(root)?;
    write_config(&config.config_path, root)?;
    write_card_template(root)?;

    log!("init"; "Project initialized successfully");
    Ok(())
}

/// Create project directory structure at the given root.
///
/// The root directory is created if it doesn't exist.
fn create_structure(root: &Path) -> Result<()> {
    if !root.exists() {
        fs::create_dir_all(root)
            .with_context(|| format!("Failed to create root directory '{}'", root.display()))?;
    }

    for dir in PROJECT_DIRS {
        let path = root.join(dir);
        fs::create_dir_all(&path)
            .with_context(|| format!("Failed to create directory '{}'", path.display()))?;
    }

    Ok(())
}

/// Render the starter config with the project name filled in.
fn render_config(root: &Path) -> String {
    let project_name = root
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "ogcard".to_string());
    CONFIG_TOML.render(&ConfigVars {
        project_name: &project_name,
    })
}

/// Write the starter configuration file.
fn write_config(config_path: &Path, root: &Path) -> Result<()> {
    fs::write(config_path, render_config(root))
        .with_context(|| format!("Failed to write '{}'", config_path.display()))
}

/// Write the default card template.
fn write_card_template(root: &Path) -> Result<()> {
    let path = root.join("templates/og-card.svg");
    fs::write(&path, DEFAULT_CARD_SVG)
        .with_context(|| format!("Failed to write '{}'", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_create_structure() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("my_blog");

        create_structure(&root).unwrap();

        assert!(root.join("templates").is_dir());
    }

    #[test]
    fn test_create_structure_existing_root() {
        let temp = TempDir::new().unwrap();
        create_structure(temp.path()).unwrap();

        assert!(temp.path().join("templates").is_dir());
    }

    #[test]
    fn test_render_config_uses_project_name() {
        let rendered = render_config(Path::new("/home/user/my_blog"));
        assert!(rendered.contains("my_blog"));
        assert!(!rendered.contains("__PROJECT_NAME__"));
    }

    #[test]
    fn test_written_template_is_loadable() {
        let temp = TempDir::new().unwrap();
        create_structure(temp.path()).unwrap();
        write_card_template(temp.path()).unwrap();

        let template =
            crate::card::CardTemplate::load(&temp.path().join("templates/og-card.svg"));
        assert!(template.is_ok());
    }
}
