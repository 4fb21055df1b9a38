// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::auth::{self, AuthError};
use crate::utils::pretty_table;
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = sub.get_one::<String>("name").unwrap().trim();
            let user = auth::register(conn, name)?;
            println!("Added user '{}'", user.name);
        }
        Some(("list", _)) => {
            let mut stmt = conn.prepare("SELECT name, created_at FROM users ORDER BY name")?;
            let rows = stmt.query_map([], |r| {
                Ok((r.get::<_, String>(0)?, r.get::<_, String>(1)?))
            })?;
            let mut data = Vec::new();
            for row in rows {
                let (n, cr) = row?;
                data.push(vec![n, cr]);
            }
            println!("{}", pretty_table(&["Name", "Created"], data));
        }
        Some(("switch", sub)) => {
            let name = sub.get_one::<String>("name").unwrap().trim();
            let user = auth::login(conn, name)?;
            println!("Active user is now '{}'", user.name);
        }
        Some(("whoami", _)) => match auth::current_user(conn) {
            Ok(user) => println!("{}", user.name),
            Err(AuthError::NotAuthenticated) => println!("(no active user)"),
            Err(e) => return Err(e.into()),
        },
        _ => {}
    }
    Ok(())
}
