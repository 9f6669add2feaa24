// Copyright (C) 2024 Daniel Mueller <deso@posteo.net>
// SPDX-License-Identifier: GPL-3.0-or-later

use std::io::stdout;

use clap::CommandFactory as _;
use clap::Parser;

use clap_complete::generate;
use clap_complete::Shell;


#[allow(unused)]
#[path = "../src/args.rs"]
mod mailfilter;


/// Generate a shell completion script for the program.
#[derive(Debug, Parser)]
struct Args {
  /// The shell for which to generate a completion script for.
  #[clap(value_enum)]
  shell: Shell,
  /// The command for which to generate the shell completion script.
  #[clap(default_value = "mailfilter")]
  command: String,
}


fn main() {
  let args = Args::parse();
  let mut command = mailfilter::Args::command();
  let () = generate(args.shell, &mut command, &args.command, &mut stdout());
}
