// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::User;
use rusqlite::{params, Connection, OptionalExtension};
use thiserror::Error;

// Stand-in for the external authentication provider: a named-user registry
// plus an active-user session setting. The engine only ever consumes the
// resolved owner identity, never a caller-supplied one.

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("not authenticated: no active user; run 'spendlens user switch --name <name>'")]
    NotAuthenticated,
    #[error("unknown user '{0}'")]
    UnknownUser(String),
    #[error(transparent)]
    Storage(#[from] rusqlite::Error),
}

pub fn register(conn: &Connection, name: &str) -> Result<User, AuthError> {
    conn.execute("INSERT INTO users(name) VALUES (?1)", params![name])?;
    Ok(User {
        id: conn.last_insert_rowid(),
        name: name.to_string(),
    })
}

pub fn find_user(conn: &Connection, name: &str) -> Result<Option<User>, AuthError> {
    let user = conn
        .query_row(
            "SELECT id, name FROM users WHERE name=?1",
            params![name],
            |r| {
                Ok(User {
                    id: r.get(0)?,
                    name: r.get(1)?,
                })
            },
        )
        .optional()?;
    Ok(user)
}

/// Make `name` the active user for subsequent commands.
pub fn login(conn: &Connection, name: &str) -> Result<User, AuthError> {
    let user = find_user(conn, name)?.ok_or_else(|| AuthError::UnknownUser(name.to_string()))?;
    conn.execute(
        "INSERT INTO settings(key, value) VALUES('active_user', ?1)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![user.name],
    )?;
    Ok(user)
}

/// The owner identity every operation is scoped to. Fails closed when no
/// active user is set or the stored name no longer resolves.
pub fn current_user(conn: &Connection) -> Result<User, AuthError> {
    let name: Option<String> = conn
        .query_row(
            "SELECT value FROM settings WHERE key='active_user'",
            [],
            |r| r.get(0),
        )
        .optional()?;
    let name = name.ok_or(AuthError::NotAuthenticated)?;
    find_user(conn, &name)?.ok_or(AuthError::NotAuthenticated)
}
