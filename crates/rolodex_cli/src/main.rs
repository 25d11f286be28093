//! Command-line composition root for the user directory.
//!
//! # Responsibility
//! - Wire the SQLite-backed local store, the HTTP remote source and the
//!   reconciliation engine from environment configuration.
//! - Expose the directory operations as one-shot subcommands.

use log::info;
use rolodex_core::db::open_db;
use rolodex_core::query::view::filter_users;
use rolodex_core::{
    default_log_level, init_logging, HttpRemoteSource, LocalUserRepository, NewUser, RemoteConfig,
    SortField, SqliteLocalUserRepository, UserDirectory, UserRecord,
};
use std::env;
use std::process::ExitCode;

const DEFAULT_DB_FILE: &str = "rolodex.db";

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("{message}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), String> {
    let args: Vec<String> = env::args().skip(1).collect();
    let Some(command) = args.first().cloned() else {
        return Err(usage());
    };

    if let Ok(log_dir) = env::var("ROLODEX_LOG_DIR") {
        init_logging(default_log_level(), &log_dir)?;
    }

    let db_path = env::var("ROLODEX_DB").unwrap_or_else(|_| DEFAULT_DB_FILE.to_string());
    let conn =
        open_db(&db_path).map_err(|err| format!("cannot open database `{db_path}`: {err}"))?;

    let mut config = RemoteConfig::default();
    if let Ok(base_url) = env::var("ROLODEX_BASE_URL") {
        config.base_url = base_url;
    }

    let mut directory = UserDirectory::new(
        SqliteLocalUserRepository::new(&conn),
        HttpRemoteSource::new(config),
    );

    if let Err(err) = directory.initialize() {
        eprintln!("remote fetch failed: {err}");
        match command.as_str() {
            // Creation does not depend on the remote baseline, so an
            // offline session can still capture records.
            "add" => {}
            "list" => {
                let stored = SqliteLocalUserRepository::new(&conn)
                    .load()
                    .map_err(|load_err| format!("local store is also unreadable: {load_err}"))?;
                eprintln!("showing {} locally-created record(s) only", stored.len());
                let term = args.get(1).map(String::as_str).unwrap_or("");
                print_users(&filter_users(&stored, term));
                return Ok(());
            }
            other => {
                return Err(format!("cannot run `{other}` without the remote baseline"));
            }
        }
    }

    match command.as_str() {
        "list" => {
            if let Some(term) = args.get(1) {
                directory.set_search_term(term.clone());
            }
            print_users(&directory.visible_users());
            Ok(())
        }
        "add" => {
            let (Some(name), Some(email)) = (args.get(1), args.get(2)) else {
                return Err(usage());
            };
            let input = NewUser {
                name: name.clone(),
                email: email.clone(),
                phone: args.get(3).cloned(),
            };
            input.validate().map_err(|err| err.to_string())?;

            let record = directory.create(&input).map_err(|err| err.to_string())?;
            info!("event=cli_add module=cli status=ok id={}", record.id);
            println!("added #{} {} <{}>", record.id, record.name, record.email);
            Ok(())
        }
        "remove" => {
            let id: i64 = args
                .get(1)
                .ok_or_else(usage)?
                .parse()
                .map_err(|_| "`remove` needs a numeric id".to_string())?;
            if directory.find_user(id).is_none() {
                return Err(format!("no user with id {id}"));
            }

            directory.delete(id).map_err(|err| err.to_string())?;
            info!("event=cli_remove module=cli status=ok id={id}");
            println!("removed #{id}");
            Ok(())
        }
        "sort" => {
            let field = args
                .get(1)
                .and_then(|raw| SortField::parse(raw))
                .ok_or_else(usage)?;
            directory.set_sort_by(field);
            println!(
                "sorted by {} ({})",
                field.as_str(),
                directory.sort_order().as_str()
            );
            print_users(&directory.visible_users());
            Ok(())
        }
        other => Err(format!("unknown command `{other}`\n\n{}", usage())),
    }
}

fn print_users(users: &[&UserRecord]) {
    if users.is_empty() {
        println!("no users match");
        return;
    }
    for user in users {
        println!(
            "{:>13}  {}  <{}>  {}",
            user.id, user.name, user.email, user.phone
        );
    }
    println!("{} user(s)", users.len());
}

fn usage() -> String {
    [
        "usage: rolodex <command> [args]",
        "",
        "commands:",
        "  list [term]                 show users, optionally filtered by name/email",
        "  add <name> <email> [phone]  create a local user",
        "  remove <id>                 delete a user by id",
        "  sort <name|email>           show users sorted by a field",
        "",
        "environment:",
        "  ROLODEX_DB        database file (default rolodex.db)",
        "  ROLODEX_BASE_URL  remote user source base URL",
        "  ROLODEX_LOG_DIR   enable file logging into this directory",
    ]
    .join("\n")
}
