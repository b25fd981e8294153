use clap::{Parser, Subcommand};
use modwiki::{config, output, pipeline};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "modwiki")]
#[command(about = "Localized wiki builder for modular projects")]
#[command(long_about = "\
Localized wiki builder for modular projects

Each module ships its own documentation, one markdown file per locale. modwiki
collects those pages into the wiki's docs tree, titles them from the module's
localization, and emits the site generator config with one sidebar per locale.

Project structure:

  modwiki.toml                       # Wiki config (optional)
  src/modules/
  ├── template/                      # Never published
  └── alpha/
      ├── docs/
      │   ├── en_US.md               # Page for en_US
      │   └── assets/                # → docs/.vuepress/public/assets/alpha/
      ├── i18n/en_US.root.json       # {\"name\": \"Alpha\"} → page title
      └── register.json              # {\"noMapkit\": true} → restricted list
  docs/
  ├── en_US/                         # Locale is published only if this exists
  │   ├── README.md                  # Static pages, listed if present
  │   └── modules/                   # Rebuilt on every build
  └── .vuepress/config.json          # Emitted generator config
  static/.configs.json               # {\"versions\": ...}

Run 'modwiki gen-config' to generate a documented modwiki.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Project root
    #[arg(long, default_value = ".", global = true)]
    root: PathBuf,

    /// Config file (default: modwiki.toml in the project root)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log pipeline progress at info level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Clean, copy module docs, mirror assets and emit the generator config
    Build,
    /// Scan modules and show what a build would publish, without writing
    Check,
    /// Print a stock modwiki.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| cli.root.join("modwiki.toml"));

    match cli.command {
        Command::Build => {
            let wiki = config::load_config(&config_path)?;
            let paths = wiki.paths.resolve(&cli.root);

            println!("==> Building {}", cli.root.display());
            let summary = pipeline::build(&cli.root, &wiki)?;

            println!("==> Modules");
            output::print_plan(&summary.plan, &paths.modules_dir);
            println!("==> Published");
            output::print_process_report(&summary.report);
            println!("==> Navigation");
            output::print_navigation(&summary.navigation);

            println!("==> Build complete: {}", summary.emit_path.display());
        }
        Command::Check => {
            let wiki = config::load_config(&config_path)?;
            let paths = wiki.paths.resolve(&cli.root);

            println!("==> Checking {}", cli.root.display());
            let plan = pipeline::check(&cli.root, &wiki)?;
            output::print_plan(&plan, &paths.modules_dir);
            println!("==> Modules are valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
