#![forbid(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::print_stdout)]
#![warn(clippy::print_stderr)]
#![deny(unused_must_use)]

use clap::Parser;
use site_contact::config::{LogFormat, TelemetryConfig};
use site_contact::{content, telemetry};
use std::path::PathBuf;

/// Validates authored blog posts against the content schema.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
struct Args {
    /// Directory holding the blog collection (`*.md` / `*.mdx`)
    #[arg(env = "CONTACT_CONTENT_DIR", default_value = "src/content/blog")]
    dir: PathBuf,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let _guard =
        telemetry::init_telemetry(&TelemetryConfig { otlp_endpoint: None, log_format: args.log_format })?;

    let posts = content::load_collection(&args.dir)?;
    let published = content::published(&posts).len();

    for post in &posts {
        tracing::info!(
            slug = %post.slug,
            date = %post.meta.date,
            author = %post.meta.author,
            draft = post.meta.draft,
            "valid"
        );
    }
    tracing::info!(total = posts.len(), published, dir = %args.dir.display(), "content check passed");

    Ok(())
}
