use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use richmark_config::Config;
use richmark_engine::{
    MarkType, Node, Point, Selection, deserialize, marked_text, serialize, split_at,
};
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Config file to use instead of ~/.config/richmark/config.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parses a markdown file and prints the document tree as JSON
    Parse {
        file: PathBuf,
        /// Single-line JSON regardless of config
        #[arg(long)]
        compact: bool,
    },
    /// Reads a JSON document tree and prints it as markdown
    Serialize { file: PathBuf },
    /// Parses a markdown file and prints it serialized again
    Roundtrip { file: PathBuf },
    /// Splits a markdown file at a cursor and prints both halves as JSON
    Split {
        file: PathBuf,
        /// Child indices below the document block, dot separated (e.g. 0.1)
        #[arg(long)]
        path: String,
        /// Character offset into the addressed text leaf
        #[arg(long)]
        offset: usize,
    },
    /// Lists the custom mark spans in a markdown file as JSON
    Marks {
        file: PathBuf,
        /// Only spans of this type: highlighted, read-only or comment
        #[arg(long = "type", value_parser = parse_mark_type)]
        mark_type: Option<MarkType>,
    },
    /// Writes the effective settings to the config file
    InitConfig {
        /// Replace an existing config file
        #[arg(long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = load_config(cli.config.as_deref())?;
    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    log::debug!("using config {config:?}");

    match cli.command {
        Commands::Parse { file, compact } => {
            let tree = deserialize(&read(&file)?);
            print_json(&tree, config.pretty && !compact)
        }
        Commands::Serialize { file } => {
            let json = read(&file)?;
            let tree: Vec<Node> = serde_json::from_str(&json)
                .with_context(|| format!("Invalid document tree in {}", file.display()))?;
            println!("{}", serialize(&tree));
            Ok(())
        }
        Commands::Roundtrip { file } => {
            println!("{}", serialize(&deserialize(&read(&file)?)));
            Ok(())
        }
        Commands::Split { file, path, offset } => {
            let children = deserialize(&read(&file)?);
            let tree = vec![Node::markdown_block(
                config.default_block_id.clone(),
                config.default_block_level,
                children,
            )];
            let mut full_path = vec![0];
            full_path.extend(parse_path(&path)?);

            let cursor = Selection::collapsed(Point::new(full_path, offset));
            match split_at(&tree, &cursor)? {
                Some(result) => print_json(&result, config.pretty),
                None => bail!("Nothing to split at path {path} offset {offset}"),
            }
        }
        Commands::Marks { file, mark_type } => {
            let spans = marked_text(&read(&file)?, mark_type);
            print_json(&spans, config.pretty)
        }
        Commands::InitConfig { force } => {
            init_config(&config, &config_path, force)?;
            println!("Wrote {}", Config::expand_path(&config_path).display());
            Ok(())
        }
    }
}

fn init_config(config: &Config, path: &Path, force: bool) -> Result<()> {
    if Config::expand_path(path).exists() && !force {
        bail!("{} already exists, pass --force to replace it", path.display());
    }
    if path == Config::config_path() {
        config.save()
    } else {
        config.save_to_path(path)
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let loaded = match explicit {
        Some(path) => Config::load_from_path(path)?,
        None => Config::load()?,
    };
    if loaded.is_none() {
        log::debug!("no config file found, using defaults");
    }
    Ok(loaded.unwrap_or_default())
}

fn read(file: &Path) -> Result<String> {
    std::fs::read_to_string(file).with_context(|| format!("Failed to read {}", file.display()))
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{json}");
    Ok(())
}

fn parse_path(path: &str) -> Result<Vec<usize>> {
    path.split('.')
        .map(|index| {
            index
                .trim()
                .parse()
                .with_context(|| format!("Invalid path segment {index:?} in {path:?}"))
        })
        .collect()
}

fn parse_mark_type(tag: &str) -> Result<MarkType, String> {
    MarkType::from_tag(tag)
        .ok_or_else(|| format!("unknown mark type {tag:?}, expected highlighted, read-only or comment"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn path_segments() {
        assert_eq!(parse_path("0.1.2").unwrap(), vec![0, 1, 2]);
        assert_eq!(parse_path("3").unwrap(), vec![3]);
        assert!(parse_path("0.x").is_err());
        assert!(parse_path("").is_err());
    }

    #[test]
    fn mark_type_argument() {
        assert_eq!(parse_mark_type("read-only"), Ok(MarkType::ReadOnly));
        assert!(parse_mark_type("bold").is_err());
    }

    #[test]
    fn split_command_arguments() {
        let cli = Cli::parse_from(["richmark", "split", "doc.md", "--path", "0.1", "--offset", "4"]);
        match cli.command {
            Commands::Split { path, offset, .. } => {
                assert_eq!(path, "0.1");
                assert_eq!(offset, 4);
            }
            _ => panic!("expected split"),
        }
    }

    #[test]
    fn init_config_writes_then_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("richmark/config.toml");
        let config = Config {
            pretty: false,
            ..Config::default()
        };

        init_config(&config, &path, false).unwrap();
        assert_eq!(load_config(Some(&path)).unwrap(), config);

        assert!(init_config(&Config::default(), &path, false).is_err());
        init_config(&Config::default(), &path, true).unwrap();
        assert_eq!(load_config(Some(&path)).unwrap(), Config::default());
    }

    #[test]
    fn missing_explicit_config_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(Some(&dir.path().join("absent.toml"))).unwrap();
        assert_eq!(config, Config::default());
    }
}
