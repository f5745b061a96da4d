//! Booking handlers: book a room, own booking history.

use std::io::{BufRead, Write};

use tracing::{debug, info};

use hotel_core::{format_date, Column, Id, TableSpec, RECENT_LIMIT};
use hotel_db::{DbError, HotelStore};

use super::{ask_date, ask_hotel, ask_room, show};
use crate::console::Prompter;
use crate::error::CliResult;

fn reservation_table() -> TableSpec {
    TableSpec::new("Your Reservation")
        .column(Column::right("Booking ID", 10))
        .column(Column::right("Customer ID", 11))
        .column(Column::right("Hotel ID", 8))
        .column(Column::right("Room Number", 11))
        .column(Column::right("Booking Date", 12))
        .column(Column::right("Price", 7))
}

fn history_table() -> TableSpec {
    TableSpec::new("Your Recent Booking History")
        .column(Column::right("Booking ID", 10))
        .column(Column::right("Hotel ID", 8))
        .column(Column::right("Room Number", 11))
        .column(Column::right("Booking Date", 12))
        .column(Column::right("Price", 7))
}

/// Books a room for `customer_id`.
///
/// A date on which the room is taken is reported and asked again, whether
/// the booking was already there or was inserted between check and insert.
/// A unique violation that leaves the date free is returned as an error.
pub async fn book_room<R: BufRead, W: Write>(
    store: &dyn HotelStore,
    console: &mut Prompter<R, W>,
    customer_id: Id,
) -> CliResult<()> {
    let hotel_id = ask_hotel(store, console).await?;
    let room_number = ask_room(store, console, hotel_id).await?;
    let mut date = ask_date(console, "\tEnter Date (MM/DD/YYYY): ")?;

    let reservation = loop {
        if !store.is_room_booked(hotel_id, room_number, date).await? {
            match store.book_room(customer_id, hotel_id, room_number, date).await {
                Ok(reservation) => break reservation,
                Err(e @ DbError::UniqueViolation { .. }) => {
                    if !store.is_room_booked(hotel_id, room_number, date).await? {
                        return Err(e.into());
                    }
                    debug!(hotel_id, room_number, %date, "Booked by someone else meanwhile");
                }
                Err(e) => return Err(e.into()),
            }
        }

        console.say(&format!(
            "\tRoom {} at Hotel ID {} is not available on {}",
            room_number,
            hotel_id,
            format_date(date)
        ))?;
        date = ask_date(console, "\tEnter another date (MM/DD/YYYY): ")?;
    };

    info!(booking_id = reservation.booking_id, customer_id, "Reservation made");
    show(console, &reservation_table().render(&[reservation]))
}

/// Shows the customer's latest bookings, newest first.
pub async fn recent_bookings<R: BufRead, W: Write>(
    store: &dyn HotelStore,
    console: &mut Prompter<R, W>,
    customer_id: Id,
) -> CliResult<()> {
    let bookings = store.recent_bookings(customer_id, RECENT_LIMIT).await?;
    show(
        console,
        &history_table().render_or_empty(&bookings, "No bookings yet"),
    )
}
