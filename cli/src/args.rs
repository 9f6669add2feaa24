// Copyright (C) 2024 Daniel Mueller <deso@posteo.net>
// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::PathBuf;

use clap::ArgAction;
use clap::Parser;


/// A program for generating mail filter definitions from a rule
/// configuration.
#[derive(Debug, Parser)]
#[clap(version = env!("CARGO_PKG_VERSION"))]
pub struct Args {
  /// The path to the configuration file.
  ///
  /// Defaults to `mailfilter/config.json` in the user's configuration
  /// directory.
  #[clap(short, long)]
  pub config: Option<PathBuf>,
  /// The file to write the generated filter feed to.
  ///
  /// If not specified it will be written to standard output.
  #[clap(short, long)]
  pub output: Option<PathBuf>,
  /// The name of the author to record in the feed.
  #[clap(long)]
  pub author_name: Option<String>,
  /// The email address of the author to record in the feed.
  #[clap(long)]
  pub author_email: Option<String>,
  /// Increase verbosity (can be supplied multiple times).
  #[clap(short = 'v', long = "verbose", global = true, action = ArgAction::Count)]
  pub verbosity: u8,
}
