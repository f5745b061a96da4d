//! Browsing handlers: hotels near a point, rooms free on a date.

use std::io::{BufRead, Write};

use tracing::debug;

use hotel_core::validation::parse_coordinate;
use hotel_core::{format_date, Column, GeoPoint, TableSpec};
use hotel_db::HotelStore;

use super::{ask_date, ask_hotel, format_radius, room_table, show};
use crate::console::Prompter;
use crate::error::CliResult;

fn hotels_table(radius: &str) -> TableSpec {
    TableSpec::new(format!("Hotels within {} units", radius))
        .column(Column::right("Hotel ID", 8))
        .column(Column::left("Hotel Name", 30))
        .column(Column::right("Date Established", 16))
}

/// Lists hotels strictly closer than `radius` to a point, nearest first.
pub async fn view_hotels<R: BufRead, W: Write>(
    store: &dyn HotelStore,
    console: &mut Prompter<R, W>,
    radius: f64,
) -> CliResult<()> {
    let latitude = console.ask_parsed("\tEnter latitude: ", |s| parse_coordinate("latitude", s))?;
    let longitude =
        console.ask_parsed("\tEnter longitude: ", |s| parse_coordinate("longitude", s))?;

    let origin = GeoPoint::new(latitude, longitude);
    let hotels = store.hotels_within(origin, radius).await?;
    debug!(latitude, longitude, count = hotels.len(), "Hotels found");

    let units = format_radius(radius);
    let empty = format!("No hotels within {} units", units);
    show(console, &hotels_table(&units).render_or_empty(&hotels, &empty))
}

/// Lists the rooms of a hotel that have no booking on a date.
pub async fn view_rooms<R: BufRead, W: Write>(
    store: &dyn HotelStore,
    console: &mut Prompter<R, W>,
) -> CliResult<()> {
    let hotel_id = ask_hotel(store, console).await?;
    let date = ask_date(console, "\tEnter a date (MM/DD/YYYY): ")?;

    let rooms = store.available_rooms(hotel_id, date).await?;

    let day = format_date(date);
    let table = room_table(format!("Rooms Available on {}", day));
    let empty = format!("No rooms available on {}", day);
    show(console, &table.render_or_empty(&rooms, &empty))
}
