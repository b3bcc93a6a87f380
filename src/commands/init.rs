use crate::{
    InitArgs,
    config::{CONFIG_FILE_NAME, Config},
};

const EXAMPLE_POST_NAME: &str = "hello-world.md";

const EXAMPLE_POST: &str = "---
title: Hello, world
tags: [welcome]
---
Welcome to your new blog. Edit or delete this post, then run `quire build`.

## Writing posts

Each post is a markdown file in the posts directory, with a front matter
block holding its `title`, `date` (YYYY-MM-DD) and `tags`.

- **Bold**, *emphasis* and `code` work inline
- [Links](https://example.com) too
";

pub async fn run(args: &InitArgs) -> Result<(), anyhow::Error> {
    let path = if args.path.is_relative() {
        std::env::current_dir()?.join(&args.path)
    } else {
        args.path.clone()
    };

    if !path.exists() {
        if args.create {
            tokio::fs::create_dir_all(&path).await?;
            println!("Created directory {path}", path = path.display());
        } else {
            return Err(anyhow::anyhow!(
                "Directory does not exist: {path}",
                path = path.display()
            ));
        }
    }

    let config_file = path.join(CONFIG_FILE_NAME);
    if config_file.exists() {
        return Err(anyhow::anyhow!(
            "Config file already exists: {config_file}",
            config_file = config_file.display()
        ));
    }

    println!("Initializing blog in {}", path.display());

    let default_config = Config::default();
    let config_text = serde_yaml::to_string(&default_config)?;
    tokio::fs::write(&config_file, config_text).await?;

    println!(
        "Created config file {config_file}",
        config_file = config_file.display()
    );

    let posts_dir = path.join(&default_config.content.posts);
    tokio::fs::create_dir_all(&posts_dir).await?;
    let example_post = posts_dir.join(EXAMPLE_POST_NAME);
    if !example_post.exists() {
        tokio::fs::write(&example_post, EXAMPLE_POST).await?;
        println!("Created example post {}", example_post.display());
    }

    Ok(())
}
