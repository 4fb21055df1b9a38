// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{value_parser, Arg, ArgAction, Command};

fn req(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name).long(name).required(true).help(help)
}

fn opt(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name).long(name).help(help)
}

fn with_json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print as JSON lines"),
    )
}

pub fn build_cli() -> Command {
    Command::new("spendlens")
        .about("Personal expense tracking, CSV import, and spending insights")
        .version(clap::crate_version!())
        .subcommand(Command::new("init").about("Initialize the database"))
        .subcommand(
            Command::new("user")
                .about("Manage users and the active session")
                .subcommand(
                    Command::new("add")
                        .about("Register a user")
                        .arg(req("name", "User name")),
                )
                .subcommand(Command::new("list").about("List registered users"))
                .subcommand(
                    Command::new("switch")
                        .about("Make a user the active session identity")
                        .arg(req("name", "User name")),
                )
                .subcommand(Command::new("whoami").about("Show the active user")),
        )
        .subcommand(
            Command::new("expense")
                .about("Record, import, and inspect expenses")
                .subcommand(
                    Command::new("add")
                        .about("Record one expense")
                        .arg(req("date", "Date, YYYY-MM-DD"))
                        .arg(req("category", "Category label"))
                        // hyphen values reach the validator, which rejects
                        // negatives with a proper field error
                        .arg(req("amount", "Non-negative amount").allow_hyphen_values(true))
                        .arg(opt("description", "Optional free-form note")),
                )
                .subcommand(with_json_flags(
                    Command::new("list")
                        .about("List expenses, newest first")
                        .arg(opt("month", "Filter to a month, YYYY-MM"))
                        .arg(opt("category", "Filter to a category"))
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize))
                                .help("Show at most N rows"),
                        ),
                ))
                .subcommand(with_json_flags(
                    Command::new("import")
                        .about("Bulk-import expenses from a CSV file")
                        .arg(req("path", "CSV file with date, category, amount columns")),
                ))
                .subcommand(
                    Command::new("export")
                        .about("Export expenses to a file")
                        .arg(
                            Arg::new("format")
                                .long("format")
                                .default_value("csv")
                                .help("csv or json"),
                        )
                        .arg(req("out", "Output path")),
                ),
        )
        .subcommand(
            Command::new("insights")
                .about("Derived views over the expense store")
                .subcommand(with_json_flags(
                    Command::new("summary").about("Count, total, and average transaction"),
                ))
                .subcommand(with_json_flags(
                    Command::new("by-category").about("Total spend per category"),
                ))
                .subcommand(with_json_flags(
                    Command::new("monthly").about("Total spend per calendar month"),
                ))
                .subcommand(with_json_flags(
                    Command::new("predict")
                        .about("Forecast next month's spend")
                        .arg(
                            Arg::new("window")
                                .long("window")
                                .value_parser(value_parser!(usize))
                                .help("Months to average (default: forecast_window setting or 3)"),
                        ),
                ))
                .subcommand(
                    Command::new("set-window")
                        .about("Persist the default forecast window")
                        .arg(
                            Arg::new("window")
                                .long("window")
                                .required(true)
                                .value_parser(value_parser!(usize))
                                .help("Months to average, at least 1"),
                        ),
                ),
        )
        .subcommand(Command::new("doctor").about("Scan stored data for problems"))
}
