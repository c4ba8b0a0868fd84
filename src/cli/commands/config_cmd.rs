//! config command - Show effective configuration values

use anyhow::{Context as _, Result};

use crate::core::config::Config;
use crate::engine::scan::resolver_for;
use crate::engine::Context;
use crate::git::Git;

/// List effective configuration values and where they came from.
///
/// Values are printed as `key = value` lines, one per key, regardless of
/// the quiet flag.
pub fn config(ctx: &Context) -> Result<()> {
    let cwd = ctx
        .working_dir()
        .context("Failed to determine working directory")?;
    let git = Git::open(&cwd).context("Failed to open repository")?;
    let config = Config::load(Some(git.git_dir())).context("Failed to load config")?;
    let remotes = git.remote_names().context("Failed to list remotes")?;

    for line in describe(&config, &remotes) {
        println!("{}", line);
    }

    Ok(())
}

/// Render the effective configuration as `key = value` lines.
fn describe(config: &Config, remotes: &[String]) -> Vec<String> {
    let resolver = resolver_for(config, remotes);

    let source = |path: Option<&std::path::Path>| {
        path.map(|p| p.display().to_string())
            .unwrap_or_else(|| "(none)".to_string())
    };

    vec![
        format!("direction = {}", config.direction()),
        format!("short_id_len = {}", config.short_id_len()),
        format!("output = {}", config.output().display()),
        format!("remote_prefixes = {}", resolver.remote_prefixes().join(", ")),
        format!("global_config = {}", source(config.global_config_loaded_from())),
        format!("repo_config = {}", source(config.repo_config_loaded_from())),
    ]
}
