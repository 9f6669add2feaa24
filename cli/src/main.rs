// Copyright (C) 2024 Daniel Mueller <deso@posteo.net>
// SPDX-License-Identifier: GPL-3.0-or-later

#![allow(
  clippy::collapsible_if,
  clippy::let_and_return,
  clippy::let_unit_value
)]

mod args;
mod export;

use std::env::args_os;
use std::env::var_os;
use std::ffi::OsString;
use std::path::PathBuf;

use clap::Parser as _;

use anyhow::Context as _;
use anyhow::Result;

use mailfilter::generate_rules;
use mailfilter::load_config;

use tokio::fs::write;
use tokio::io::stdout;
use tokio::io::AsyncWriteExt as _;

use tracing::info;
use tracing::subscriber::set_global_default as set_global_subscriber;
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::time::ChronoLocal;
use tracing_subscriber::FmtSubscriber;

use crate::args::Args;
use crate::export::to_xml;
use crate::export::Author;


/// Retrieve the path to the default configuration file.
fn default_config_path() -> Result<PathBuf> {
  let config_dir = if let Some(dir) = var_os("XDG_CONFIG_HOME").filter(|dir| !dir.is_empty()) {
    PathBuf::from(dir)
  } else {
    let home = var_os("HOME").context("neither XDG_CONFIG_HOME nor HOME are set")?;
    PathBuf::from(home).join(".config")
  };
  Ok(config_dir.join("mailfilter").join("config.json"))
}


async fn run_impl(args: Args) -> Result<()> {
  let Args {
    config,
    output,
    author_name,
    author_email,
    verbosity: _,
  } = args;

  let path = if let Some(config) = config {
    config
  } else {
    default_config_path()?
  };
  let config = load_config(&path).await?;

  let entries = generate_rules(&config)
    .with_context(|| format!("failed to generate filters from `{}`", path.display()))?;
  info!(
    rules = config.rules.len(),
    entries = entries.len(),
    "generated filter entries"
  );

  let author = Author {
    name: author_name.as_deref(),
    email: author_email.as_deref(),
  };
  let xml = to_xml(&entries, &author);

  if let Some(output) = output {
    let () = write(&output, xml.as_bytes())
      .await
      .with_context(|| format!("failed to write filters to `{}`", output.display()))?;
  } else {
    let mut stdout = stdout();
    let () = stdout
      .write_all(xml.as_bytes())
      .await
      .context("failed to write filters to stdout")?;
    let () = stdout.flush().await.context("failed to flush stdout")?;
  }
  Ok(())
}

fn setup_tracing(verbosity: u8) -> Result<()> {
  let builder =
    FmtSubscriber::builder().with_timer(ChronoLocal::new("%Y-%m-%dT%H:%M:%S%.3f%:z".to_string()));

  if verbosity != 0 {
    let level = match verbosity {
      0 => LevelFilter::WARN,
      1 => LevelFilter::INFO,
      2 => LevelFilter::DEBUG,
      _ => LevelFilter::TRACE,
    };
    let subscriber = builder
      .with_writer(std::io::stderr)
      .with_max_level(level)
      .finish();
    let () =
      set_global_subscriber(subscriber).with_context(|| "failed to set tracing subscriber")?;
  } else {
    let directive = var_os(EnvFilter::DEFAULT_ENV).unwrap_or_default();
    let directive = directive
      .to_str()
      .with_context(|| format!("env var `{}` is not valid UTF-8", EnvFilter::DEFAULT_ENV))?;

    let subscriber = builder
      .with_writer(std::io::stderr)
      .with_env_filter(EnvFilter::new(directive))
      .finish();
    let () =
      set_global_subscriber(subscriber).with_context(|| "failed to set tracing subscriber")?;
  }
  Ok(())
}


/// Run the program and report errors, if any.
async fn run<A, T>(args: A) -> Result<()>
where
  A: IntoIterator<Item = T>,
  T: Into<OsString> + Clone,
{
  let args = match Args::try_parse_from(args) {
    Ok(args) => args,
    Err(err) => match err.kind() {
      clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
        print!("{}", err);
        return Ok(())
      },
      _ => return Err(err.into()),
    },
  };

  let () = setup_tracing(args.verbosity)?;

  run_impl(args).await
}


#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
  run(args_os()).await
}


#[cfg(test)]
mod tests {
  use super::*;

  use std::env::remove_var;
  use std::env::set_var;
  use std::fs::read_to_string;
  use std::io::Write as _;

  use tempfile::NamedTempFile;
  use tempfile::TempDir;

  use tokio::test;


  /// Check that we can generate a filter feed from a configuration
  /// file.
  #[test]
  async fn generate_feed() {
    let mut config = NamedTempFile::new().unwrap();
    let () = config
      .write_all(
        br#"{
          "consts": {"team": {"values": ["a@corp.com", "b@corp.com"]}},
          "rules": [{
            "filters": {"consts": {"from": ["team"]}},
            "actions": {"labels": ["team", "work"]}
          }]
        }"#,
      )
      .unwrap();
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("filters.xml");

    let args = Args {
      config: Some(config.path().to_path_buf()),
      output: Some(output.clone()),
      author_name: None,
      author_email: None,
      verbosity: 0,
    };
    let () = run_impl(args).await.unwrap();

    let xml = read_to_string(&output).unwrap();
    assert_eq!(xml.matches("<entry>").count(), 2);
    assert_eq!(
      xml.matches("<apps:property name='from' value='{a@corp.com b@corp.com}'/>").count(),
      2
    );
    assert!(xml.contains("<apps:property name='label' value='team'/>"));
    assert!(xml.contains("<apps:property name='label' value='work'/>"));
  }

  /// Check that rule generation errors are reported with context.
  #[test]
  async fn generate_error() {
    let mut config = NamedTempFile::new().unwrap();
    let () = config
      .write_all(br#"{"rules": [{"actions": {"archive": true}}]}"#)
      .unwrap();

    let args = Args {
      config: Some(config.path().to_path_buf()),
      output: None,
      author_name: None,
      author_email: None,
      verbosity: 0,
    };
    let err = run_impl(args).await.unwrap_err();
    let chain = err.chain().map(ToString::to_string).collect::<Vec<_>>();
    assert_eq!(
      chain[1..],
      [
        "failed to generate rule #0: error generating filters",
        "at least one filter has to be specified",
      ]
    );
  }

  /// Check that the default configuration path honors
  /// `XDG_CONFIG_HOME` and falls back to `HOME`.
  #[test]
  async fn config_path() {
    let xdg = var_os("XDG_CONFIG_HOME");
    let home = var_os("HOME");

    let () = set_var("XDG_CONFIG_HOME", "/tmp/xdg");
    let () = set_var("HOME", "/home/jane");
    assert_eq!(
      default_config_path().unwrap(),
      PathBuf::from("/tmp/xdg/mailfilter/config.json")
    );

    let () = set_var("XDG_CONFIG_HOME", "");
    assert_eq!(
      default_config_path().unwrap(),
      PathBuf::from("/home/jane/.config/mailfilter/config.json")
    );

    let () = remove_var("XDG_CONFIG_HOME");
    assert_eq!(
      default_config_path().unwrap(),
      PathBuf::from("/home/jane/.config/mailfilter/config.json")
    );

    let () = remove_var("HOME");
    assert!(default_config_path().is_err());

    for (name, value) in [("XDG_CONFIG_HOME", xdg), ("HOME", home)] {
      if let Some(value) = value {
        let () = set_var(name, value);
      }
    }
  }

  /// Check that `--help` does not result in an error.
  #[test]
  async fn help() {
    let () = run(["mailfilter", "--help"]).await.unwrap();
  }
}
