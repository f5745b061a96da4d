//! Account handlers: create user, log in.

use std::io::{BufRead, Write};

use tracing::{debug, info};

use hotel_core::validation::{parse_id, validate_name, validate_password};
use hotel_core::{Id, User};
use hotel_db::HotelStore;

use crate::console::{Color, Prompter};
use crate::error::CliResult;

/// Creates a customer account and returns its new ID.
pub async fn create_user<R: BufRead, W: Write>(
    store: &dyn HotelStore,
    console: &mut Prompter<R, W>,
) -> CliResult<Id> {
    let name = console.ask_parsed("\tEnter name: ", validate_name)?;
    let password = console.ask_parsed("\tEnter password: ", |s| {
        validate_password(s).map(|_| s.to_string())
    })?;

    let user_id = store.create_customer(&name, &password).await?;

    info!(user_id, "Customer account created");
    Ok(user_id)
}

/// Checks credentials.
///
/// ## Returns
/// * `Ok(Some(user))` - ID and password match
/// * `Ok(None)` - No such account
pub async fn log_in<R: BufRead, W: Write>(
    store: &dyn HotelStore,
    console: &mut Prompter<R, W>,
) -> CliResult<Option<User>> {
    let mut answer = console.ask("\tEnter userID: ")?;
    let user_id = loop {
        match parse_id("userID", &answer) {
            Ok(id) => break id,
            Err(_) => {
                console.banner(Color::Red, "\tUserID should only contain integers!")?;
                answer = console.ask("\tEnter userID: ")?;
            }
        }
    };

    let password = console.ask("\tEnter password: ")?;
    let user = store.authenticate(user_id, &password).await?;

    match &user {
        Some(u) => info!(user_id, kind = u.kind().as_str(), "Logged in"),
        None => debug!(user_id, "Login rejected"),
    }

    Ok(user)
}
