mod cli;

use anyhow::Result;
use clap::Parser;
use std::path::Path;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use pathways::prelude::*;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => BrowserConfig::load(path),
        None => BrowserConfig::load(Path::new("pathways.toml")),
    };
    let browser = Pathways::open(&config)?;

    match cli.command {
        Commands::Topics => {
            for category in &browser.catalog().categories {
                println!("{} ({})", category.title, category.id);
                for topic in &category.topics {
                    println!("  {:<12} {}", topic.id, topic.short_description);
                }
            }
        }
        Commands::Show { topic_id } => {
            let Some(topic) = browser.resolve_topic(&topic_id) else {
                eprintln!("Topic not found: {topic_id}");
                std::process::exit(1);
            };
            println!("{} — {}", topic.title, topic.short_description);
            for section in &topic.content.sections {
                println!("\n## {} (#{})", section.title, section.anchor());
                println!("{}", section.content);
                if let Some(code) = &section.code_example {
                    println!("\n{code}");
                }
            }
            if !topic.content.resources.is_empty() {
                println!("\nResources:");
                for resource in &topic.content.resources {
                    println!("  [{}] {} — {}", resource.kind, resource.title, resource.url);
                }
            }
            if !topic.content.videos.is_empty() {
                println!("\nVideos:");
                for video in &topic.content.videos {
                    println!("  {} ({}) — {}", video.title, video.embed_id, video.description);
                }
            }
        }
        Commands::Communities { platform, refresh } => {
            match browser.platforms(&platform, refresh).await {
                DirectoryState::Ready(directory) if directory.platforms.is_empty() => {
                    println!("No communities match \"{platform}\".");
                }
                DirectoryState::Ready(directory) => {
                    for p in &directory.platforms {
                        println!("{} — {}", p.name, p.description);
                        for community in &p.communities {
                            println!(
                                "  {} ({}, {}) {}",
                                community.name, community.members, community.activity, community.link
                            );
                        }
                    }
                }
                DirectoryState::Unavailable(reason) => {
                    eprintln!("Community directory is unavailable: {reason}");
                    std::process::exit(1);
                }
            }
        }
        Commands::Stats => {
            let stats = browser.stats();
            println!("categories:    {}", stats.total_categories);
            println!("topics:        {}", stats.total_topics);
            println!("sections:      {}", stats.total_sections);
            println!("resources:     {}", stats.total_resources);
            println!("videos:        {}", stats.total_videos);
            println!("code examples: {}", stats.code_examples);
        }
        Commands::Route { path } => match Route::parse(&path) {
            Some(route) => println!("{route:?} -> {}", route.path()),
            None => {
                eprintln!("No route matches {path}");
                std::process::exit(1);
            }
        },
    }

    Ok(())
}
