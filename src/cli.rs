// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{value_parser, Arg, ArgAction, Command};

fn json_args() -> [Arg; 2] {
    [
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .conflicts_with("jsonl")
            .help("Print as pretty JSON"),
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print as JSON lines"),
    ]
}

fn type_arg() -> Arg {
    Arg::new("type")
        .long("type")
        .value_parser(["income", "expense"])
        .help("income|expense")
}

fn period_args() -> [Arg; 4] {
    [
        Arg::new("month")
            .long("month")
            .conflicts_with_all(["year", "from", "to"])
            .help("YYYY-MM"),
        Arg::new("year")
            .long("year")
            .value_parser(value_parser!(i32))
            .conflicts_with_all(["from", "to"]),
        Arg::new("from").long("from").help("YYYY-MM-DD, inclusive"),
        Arg::new("to").long("to").help("YYYY-MM-DD, inclusive"),
    ]
}

pub fn build_cli() -> Command {
    Command::new("fincontrol")
        .about("Personal finance tracking: ledger, categories, dashboard and reports")
        .version(clap::crate_version!())
        .subcommand(Command::new("init").about("Create the database"))
        .subcommand(
            Command::new("config")
                .about("Settings")
                .subcommand(
                    Command::new("currency")
                        .about("Show or set the display currency")
                        .arg(Arg::new("code").help("e.g. BRL, USD")),
                ),
        )
        .subcommand(
            Command::new("category")
                .about("Manage categories")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(type_arg().default_value("expense")),
                )
                .subcommand(
                    Command::new("list")
                        .arg(type_arg())
                        .args(json_args()),
                )
                .subcommand(Command::new("rm").arg(Arg::new("name").long("name").required(true))),
        )
        .subcommand(
            Command::new("tx")
                .about("Record and list transactions")
                .subcommand(
                    Command::new("add")
                        .arg(type_arg().default_value("expense"))
                        .arg(Arg::new("category").long("category").required(true))
                        .arg(Arg::new("description").long("description").required(true))
                        .arg(
                            Arg::new("amount")
                                .long("amount")
                                .required(true)
                                .allow_hyphen_values(true),
                        )
                        .arg(Arg::new("date").long("date").help("YYYY-MM-DD, defaults to today"))
                        .arg(
                            Arg::new("status")
                                .long("status")
                                .value_parser(["paid", "pending"])
                                .default_value("paid"),
                        ),
                )
                .subcommand(
                    Command::new("list")
                        .args(period_args())
                        .arg(Arg::new("category").long("category"))
                        .arg(type_arg())
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        )
                        .args(json_args()),
                )
                .subcommand(
                    Command::new("rm").arg(
                        Arg::new("id")
                            .long("id")
                            .required(true)
                            .value_parser(value_parser!(i64)),
                    ),
                ),
        )
        .subcommand(
            Command::new("dashboard")
                .about("Monthly overview")
                .arg(Arg::new("month").long("month").help("YYYY-MM, defaults to this month"))
                .args(json_args()),
        )
        .subcommand(
            Command::new("report")
                .about("Totals, monthly evolution and per-category summary")
                .arg(
                    Arg::new("period")
                        .long("period")
                        .value_parser(["month", "year"])
                        .default_value("month"),
                )
                .arg(
                    Arg::new("year")
                        .long("year")
                        .value_parser(value_parser!(i32))
                        .help("Report on this year; implies --period year"),
                )
                .args(json_args()),
        )
        .subcommand(
            Command::new("export")
                .about("Export transactions")
                .subcommand(
                    Command::new("transactions")
                        .arg(
                            Arg::new("format")
                                .long("format")
                                .default_value("csv")
                                .help("csv|json"),
                        )
                        .arg(Arg::new("out").long("out").required(true))
                        .args(period_args()),
                ),
        )
        .subcommand(Command::new("doctor").about("Check stored data for inconsistencies"))
}
