use clap::{Parser, Subcommand};
use mublog::{config, generate, output};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "mublog")]
#[command(about = "Static blog generator: markdown posts in, HTML out")]
#[command(long_about = "\
Static blog generator: markdown posts in, HTML out

Source layout:

  .
  ├── config.toml          # Optional, see 'mublog gen-config'
  ├── index.md             # → output/index.html
  ├── about.md             # → output/about.html
  ├── articles.md          # → output/articles.html (must contain <article>)
  ├── css/*.css            # → output/css/
  ├── assets/              # → output/assets/
  └── posts/
      ├── 2023-01-01-first.md   # → output/posts/2023-01-01-first.html
      └── _draft.md             # Draft prefix: not published

Every post starts with a header block:

  ---
  title: First Post
  description: Notes on getting started
  date: 2023-01-01
  tags: rust, blogging
  ---

Posts with a malformed header are reported and skipped.")]
#[command(version)]
struct Cli {
    /// Config file
    #[arg(long, default_value = "config.toml", global = true)]
    config: PathBuf,

    /// Source directory (overrides source_root from the config)
    #[arg(long, global = true)]
    source: Option<PathBuf>,

    /// Output directory (overrides output_root from the config)
    #[arg(long, global = true)]
    output: Option<PathBuf>,

    /// Log build steps (otherwise RUST_LOG decides, warnings by default)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build the site
    Build,
    /// Validate post headers without building
    Check,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Build => {
            let blog = load_blog_config(&cli)?;
            let report = generate::generate_with(&blog, |event| output::print_build_event(&event))?;
            output::print_summary(&report);
        }
        Command::Check => {
            let blog = load_blog_config(&cli)?;
            println!("==> Checking {}", blog.layout().src_posts.display());
            let report = generate::check(&blog)?;
            output::print_check_output(&report);
            let invalid = report.invalid().count();
            if invalid > 0 {
                return Err(format!("{invalid} post(s) have an invalid header").into());
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Load the config file and apply command-line overrides.
fn load_blog_config(cli: &Cli) -> Result<config::BlogConfig, config::ConfigError> {
    let mut blog = config::load_config(&cli.config)?;
    if let Some(source) = &cli.source {
        blog.source_root = source.clone();
    }
    if let Some(output) = &cli.output {
        blog.output_root = output.clone();
    }
    blog.validate()?;
    Ok(blog)
}
