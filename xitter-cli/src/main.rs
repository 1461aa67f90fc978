use anyhow::Result;
use clap::Parser;
use tracing::info;
use xitter_core::logging::{init_logging_with_config, LogConfig, LogLevel};
use xitter_core::model::{SpaceId, UserId, Username};
use xitter_core::test_utils::{seed_sample_posts, seeded_service, COMMUNITY, DEV};

#[derive(Parser, Debug)]
#[command(name = "xitter")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Set the log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Enable JSON formatted logging
    #[arg(long)]
    json_logs: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Parser, Debug)]
enum Command {
    /// Seed fixture data, run the demo scenario, and print the feeds
    Demo,
    /// Seed fixture data and print one space's feed
    SpaceFeed {
        /// Space id to read
        #[arg(default_value = COMMUNITY)]
        space: String,
    },
    /// Seed fixture data and print one author's feed
    AuthorFeed {
        /// Username to look up (case-insensitive)
        username: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = args.log_level.parse::<LogLevel>().unwrap_or_else(|_| {
        eprintln!("Invalid log level '{}', using 'info'", args.log_level);
        LogLevel::Info
    });
    init_logging_with_config(LogConfig::new(log_level).json_format(args.json_logs))?;

    match args.command {
        Some(Command::Demo) => run_demo().await?,
        Some(Command::SpaceFeed { space }) => {
            let service = seeded_service();
            seed_sample_posts(&service).await?;
            let feed = service.space_feed(&SpaceId::new(space)).await?;
            println!("{}", serde_json::to_string_pretty(&feed)?);
        }
        Some(Command::AuthorFeed { username }) => {
            let service = seeded_service();
            seed_sample_posts(&service).await?;
            let feed = service.author_feed(&Username::new(username)).await?;
            println!("{}", serde_json::to_string_pretty(&feed)?);
        }
        None => {
            info!("No command specified. Use --help for usage information.");
        }
    }

    Ok(())
}

/// The walkthrough from the platform docs: alice joins the dev space,
/// posts into both of her spaces, ben shares her post onward, and the
/// feeds stay consistent.
async fn run_demo() -> Result<()> {
    let service = seeded_service();
    seed_sample_posts(&service).await?;

    let alice = UserId::new("u-alice");
    let ben = UserId::new("u-ben");
    let community = SpaceId::new(COMMUNITY);
    let dev = SpaceId::new(DEV);

    service.join_space(&alice, &dev).await?;
    info!("alice joined {}", dev);

    let post = service
        .create_post(&alice, "Cross-posting to community and dev!", &[community.clone(), dev.clone()])
        .await?;
    info!("alice posted {} into {} spaces", post.id, post.space_tags.len());

    service.join_space(&ben, &SpaceId::new("space-tech")).await?;
    let shared = service
        .share_to_space(&ben, &post.id, &SpaceId::new("space-tech"))
        .await?;
    info!(
        "ben shared {} into space-tech; author is still {}",
        shared.id, shared.author_id
    );

    println!("--- home feed (alice) ---");
    let home = service.home_feed(&alice).await?;
    println!("{}", serde_json::to_string_pretty(&home)?);

    println!("--- space feed ({}) ---", dev);
    let feed = service.space_feed(&dev).await?;
    println!("{}", serde_json::to_string_pretty(&feed)?);

    Ok(())
}
