//! # Command Handlers
//!
//! One async function per menu action.
//!
//! ## Handler Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  prompt ──► validate ──► HotelStore call ──► TableSpec::render ──► out │
//! │     ▲           │                                                       │
//! │     └── retry ──┘  (not an integer, bad date, unknown hotel / room)    │
//! │                                                                         │
//! │  Statement failures propagate as CliError::Db; the menu reports them   │
//! │  and shows itself again.                                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//! - [`account`] - Create user, log in
//! - [`browse`] - Hotels nearby, available rooms
//! - [`booking`] - Book a room, own booking history
//! - [`manager`] - Room updates, hotel reports, repair requests

pub mod account;
pub mod booking;
pub mod browse;
pub mod manager;

use std::future::Future;
use std::io::{BufRead, Write};

use chrono::NaiveDate;

use hotel_core::validation::{parse_date, parse_id};
use hotel_core::{Column, Id, TableSpec};
use hotel_db::{DbResult, HotelStore};

use crate::console::Prompter;
use crate::error::CliResult;

// =============================================================================
// Shared Prompts
// =============================================================================

/// Asks for an ID until `exists` confirms it.
///
/// Answers that are not integers get the same retry prompt as unknown IDs.
async fn ask_existing<R, W, F, Fut>(
    console: &mut Prompter<R, W>,
    prompt: &str,
    retry: &str,
    exists: F,
) -> CliResult<Id>
where
    R: BufRead,
    W: Write,
    F: Fn(Id) -> Fut,
    Fut: Future<Output = DbResult<bool>>,
{
    let mut current = prompt;

    loop {
        let answer = console.ask(current)?;

        if let Ok(id) = parse_id("ID", &answer) {
            if exists(id).await? {
                return Ok(id);
            }
        }

        current = retry;
    }
}

pub(crate) async fn ask_hotel<R: BufRead, W: Write>(
    store: &dyn HotelStore,
    console: &mut Prompter<R, W>,
) -> CliResult<Id> {
    ask_existing(
        console,
        "\tEnter Hotel ID: ",
        "\tInvalid Hotel ID. Enter hotel ID: ",
        move |id| store.hotel_exists(id),
    )
    .await
}

pub(crate) async fn ask_managed_hotel<R: BufRead, W: Write>(
    store: &dyn HotelStore,
    console: &mut Prompter<R, W>,
    manager_id: Id,
) -> CliResult<Id> {
    ask_existing(
        console,
        "\tEnter Hotel ID: ",
        "\tInvalid hotel ID or you don't manage that hotel.\n\tEnter hotel ID: ",
        move |id| store.manages_hotel(manager_id, id),
    )
    .await
}

pub(crate) async fn ask_room<R: BufRead, W: Write>(
    store: &dyn HotelStore,
    console: &mut Prompter<R, W>,
    hotel_id: Id,
) -> CliResult<Id> {
    ask_existing(
        console,
        "\tEnter Room Number: ",
        "\tInvalid Room Number. Enter Room Number: ",
        move |room| store.room_exists(hotel_id, room),
    )
    .await
}

pub(crate) async fn ask_company<R: BufRead, W: Write>(
    store: &dyn HotelStore,
    console: &mut Prompter<R, W>,
) -> CliResult<Id> {
    ask_existing(
        console,
        "\tEnter Repair Company ID: ",
        "\tInvalid Repair Company ID. Enter Repair Company ID: ",
        move |id| store.company_exists(id),
    )
    .await
}

pub(crate) fn ask_date<R: BufRead, W: Write>(
    console: &mut Prompter<R, W>,
    prompt: &str,
) -> CliResult<NaiveDate> {
    console.ask_parsed(prompt, parse_date)
}

// =============================================================================
// Output
// =============================================================================

/// Prints a rendered table with a blank line on each side.
pub(crate) fn show<R: BufRead, W: Write>(
    console: &mut Prompter<R, W>,
    rendered: &str,
) -> CliResult<()> {
    console.say("")?;
    console.print(rendered)?;
    console.say("")
}

/// Layout shared by the room listing and the room update result.
pub(crate) fn room_table(title: impl Into<String>) -> TableSpec {
    TableSpec::new(title)
        .column(Column::right("Hotel ID", 8))
        .column(Column::right("Room Number", 11))
        .column(Column::right("Price", 7))
        .column(Column::left("Image URL", 30))
}

/// Radius as shown in titles: `30`, `12.5`.
pub(crate) fn format_radius(radius: f64) -> String {
    if radius.fract() == 0.0 {
        format!("{:.0}", radius)
    } else {
        radius.to_string()
    }
}
