use anyhow::Context;

use crate::{
    BuildArgs,
    build::{Builder, base_path_from_config, parse_date},
    config::{CONFIG_FILE_NAME, Config},
};

pub async fn run(args: &BuildArgs) -> Result<(), anyhow::Error> {
    // Determine the config file path
    let config_path = args
        .config_file
        .clone()
        .unwrap_or_else(|| CONFIG_FILE_NAME.into());
    let config_path = if config_path.is_relative() {
        std::env::current_dir()?.join(&config_path)
    } else {
        config_path
    };

    let config = Config::load_from_arg(Some(config_path.as_path()))?;

    // Get the base path for resolving relative paths
    let base_path = base_path_from_config(&config_path);

    let mut builder = Builder::new(config, base_path);
    if let Some(today) = &args.today {
        let today = parse_date(today)
            .with_context(|| format!("--today must be YYYY-MM-DD, got '{today}'"))?;
        builder = builder.with_today(today);
    }

    // The pipeline is synchronous file IO
    let result = tokio::task::spawn_blocking(move || builder.build()).await??;

    println!(
        "Wrote {} file(s) to {} ({} posts, {} tags, {} feed entries)",
        result.files.len(),
        result.output_dir.display(),
        result.documents,
        result.tags,
        result.feed_entries
    );

    Ok(())
}
