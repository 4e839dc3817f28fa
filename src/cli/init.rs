use crate::models::{CanonConfig, CONFIG_PATH};
use crate::store::JsonFileStore;
use crate::Result;
use colored::Colorize;
use std::env;
use std::path::Path;

pub fn run(force: bool) -> Result<()> {
    let project_root = env::current_dir()?;
    init_at(&project_root, force)
}

/// Write the default config and an empty store under `project_root`
pub fn init_at(project_root: &Path, force: bool) -> Result<()> {
    let config_path = project_root.join(CONFIG_PATH);

    if config_path.exists() && !force {
        println!("{}", "⚠️  canon-gate is already initialized".yellow());
        println!("   Run with --force to rewrite {}", CONFIG_PATH);
        return Ok(());
    }

    println!("{}", "📁 Writing configuration...".cyan());
    let config = if config_path.exists() {
        // Keep user edits, only normalise the file
        CanonConfig::load(project_root)?
    } else {
        CanonConfig::default()
    };
    config.save(project_root)?;
    println!("   ✓ {}", CONFIG_PATH);

    let store_path = config.resolve_store_path(project_root);
    if !store_path.exists() {
        JsonFileStore::open(&store_path)?.save()?;
        println!("   ✓ {}", config.store_path.display());
    }

    println!();
    println!("{}", "✨ Initialized".green().bold());
    println!();
    println!("{}", "Required canonical documents:".yellow());
    for key in &config.manifest.required {
        println!("   • {}", key);
    }
    if let Some(scaffold) = &config.manifest.scaffold {
        println!("   • {} {}", scaffold, "(scaffold, must stay ungoverned)".bright_black());
    }
    println!();
    println!("{}", "⏭️  Next steps:".yellow());
    println!("   canon-gate document create <KEY> --file <path> --operator");
    println!("   canon-gate integrity");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::DocumentStore;
    use tempfile::TempDir;

    #[test]
    fn test_init_writes_config_and_empty_store() {
        let temp = TempDir::new().unwrap();
        init_at(temp.path(), false).unwrap();

        assert!(temp.path().join(CONFIG_PATH).exists());
        let config = CanonConfig::load(temp.path()).unwrap();
        let store = JsonFileStore::open(config.resolve_store_path(temp.path())).unwrap();
        assert!(store.list_documents().unwrap().is_empty());
    }

    #[test]
    fn test_init_keeps_existing_config_without_force() {
        let temp = TempDir::new().unwrap();
        let mut config = CanonConfig::default();
        config.apply.block_on_warn = true;
        config.save(temp.path()).unwrap();

        init_at(temp.path(), false).unwrap();
        assert!(CanonConfig::load(temp.path()).unwrap().apply.block_on_warn);

        init_at(temp.path(), true).unwrap();
        assert!(CanonConfig::load(temp.path()).unwrap().apply.block_on_warn);
    }
}
