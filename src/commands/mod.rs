//! Command implementations behind the CLI.

use anyhow::Result;
use log::{debug, info};
use std::path::PathBuf;
use std::sync::Arc;

use crate::{
    config::{Settings, default_config_path},
    runtime::Runtime,
    server,
};

mod check;
mod import_path;
mod resolve;

pub use check::describe_rules;
pub use import_path::ImportPath;
pub use resolve::resolve_import;

/// Load settings from `config` or the default location.
#[tracing::instrument(skip(runtime))]
pub fn load_settings<R: Runtime>(runtime: &R, config: Option<PathBuf>) -> Result<Settings> {
    let path = match config {
        Some(path) => path,
        None => default_config_path(runtime)?,
    };
    debug!("Using config file: {}", path.display());
    Settings::load(runtime, &path)
}

/// Start the HTTP server.
#[tracing::instrument(skip(runtime))]
pub async fn serve<R: Runtime>(
    runtime: R,
    config: Option<PathBuf>,
    listen: Option<String>,
) -> Result<()> {
    let settings = load_settings(&runtime, config)?;
    let addr = settings.listen_addr(listen.as_deref());
    if settings.rules.is_empty() {
        info!("No import paths configured, every request will get 404");
    }
    server::serve(&addr, Arc::new(settings.rules)).await
}

/// Resolve one import path against the configured rules and print the result.
#[tracing::instrument(skip(runtime))]
pub fn resolve<R: Runtime>(
    runtime: R,
    config: Option<PathBuf>,
    import_path: &str,
    json: bool,
) -> Result<()> {
    let settings = load_settings(&runtime, config)?;
    println!("{}", resolve_import(&settings.rules, import_path, json)?);
    Ok(())
}

/// Validate the configuration and list its rules.
#[tracing::instrument(skip(runtime))]
pub fn check<R: Runtime>(runtime: R, config: Option<PathBuf>) -> Result<()> {
    let settings = load_settings(&runtime, config)?;

    if settings.rules.is_empty() {
        println!("No import paths configured.");
        return Ok(());
    }

    println!("{} import path rule(s):", settings.rules.len());
    for line in describe_rules(&settings.rules) {
        println!("{}", line);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::MockRuntime;
    use mockall::predicate::eq;

    const CONFIG: &str = "import_paths:\n  - path: example.com/*\n    repo_path: https://git.example.com/*.git\n";

    fn runtime_with_config(path: PathBuf, content: &'static str) -> MockRuntime {
        let mut runtime = MockRuntime::new();
        runtime
            .expect_exists()
            .with(eq(path.clone()))
            .returning(|_| true);
        runtime
            .expect_read_to_string()
            .with(eq(path))
            .returning(move |_| Ok(content.to_string()));
        runtime
    }

    #[test]
    fn test_load_settings_explicit_path() {
        let path = PathBuf::from("/etc/govanity.yaml");
        let runtime = runtime_with_config(path.clone(), CONFIG);

        let settings = load_settings(&runtime, Some(path)).unwrap();
        assert_eq!(settings.rules.len(), 1);
    }

    #[test]
    fn test_load_settings_default_path() {
        let cwd = PathBuf::from("/srv/vanity");
        let path = cwd.join("config").join("config.yaml");
        let mut runtime = runtime_with_config(path, CONFIG);
        runtime.expect_current_dir().returning(move || Ok(cwd.clone()));

        let settings = load_settings(&runtime, None).unwrap();
        assert_eq!(settings.rules.len(), 1);
    }

    #[test]
    fn test_check_valid_config() {
        let path = PathBuf::from("/etc/govanity.yaml");
        let runtime = runtime_with_config(path.clone(), CONFIG);
        assert!(check(runtime, Some(path)).is_ok());
    }

    #[test]
    fn test_check_invalid_config() {
        let path = PathBuf::from("/etc/govanity.yaml");
        let runtime = runtime_with_config(
            path.clone(),
            "import_paths:\n  - path: example.com/*\n    repo_path: https://x/root.git\n",
        );
        assert!(check(runtime, Some(path)).is_err());
    }

    #[test]
    fn test_resolve_not_found() {
        let path = PathBuf::from("/etc/govanity.yaml");
        let runtime = runtime_with_config(path.clone(), CONFIG);
        let err = resolve(runtime, Some(path), "other.org/widget", false).unwrap_err();
        assert!(err.to_string().contains("Not found"));
    }
}
