//! Manager handlers.
//!
//! Every action is limited to hotels whose `managerUserID` is the logged-in
//! user.

use std::io::{BufRead, Write};

use tracing::info;

use hotel_core::validation::{parse_price, validate_date_range, validate_image_url};
use hotel_core::{format_date, Column, Id, TableSpec, RECENT_LIMIT};
use hotel_db::HotelStore;

use super::{ask_company, ask_date, ask_managed_hotel, ask_room, room_table, show};
use crate::console::{Color, Prompter};
use crate::error::CliResult;

// =============================================================================
// Rooms
// =============================================================================

/// Edits price or image URL of rooms in managed hotels until the manager
/// returns to the main menu.
pub async fn update_room<R: BufRead, W: Write>(
    store: &dyn HotelStore,
    console: &mut Prompter<R, W>,
    manager_id: Id,
) -> CliResult<()> {
    'room: loop {
        let hotel_id = ask_managed_hotel(store, console, manager_id).await?;
        let room_number = ask_room(store, console, hotel_id).await?;

        loop {
            console.say(&format!(
                "\nWhat info would you like to update on Room {} at Hotel ID {}",
                room_number, hotel_id
            ))?;
            console.say("---------")?;
            console.say("1. Price")?;
            console.say("2. Image URL")?;
            console.say(".........................")?;
            console.say("8. Update other room.")?;
            console.say("9. < Return to Main Menu.")?;

            let room = match console.read_choice()? {
                1 => {
                    let price = console.ask_parsed("\tEnter the new price: $", parse_price)?;
                    store.update_room_price(hotel_id, room_number, price).await?
                }
                2 => {
                    let url =
                        console.ask_parsed("\tEnter the new image URL: ", validate_image_url)?;
                    store.update_room_image(hotel_id, room_number, &url).await?
                }
                8 => continue 'room,
                9 => return Ok(()),
                _ => {
                    console.banner(Color::Red, "\nUnrecognized choice!\n")?;
                    continue;
                }
            };

            info!(manager_id, hotel_id, room_number, "Room updated");
            show(console, &room_table("Updated Info").render(&[room]))?;
        }
    }
}

/// Shows the latest room update log entries for the manager.
pub async fn recent_updates<R: BufRead, W: Write>(
    store: &dyn HotelStore,
    console: &mut Prompter<R, W>,
    manager_id: Id,
) -> CliResult<()> {
    let updates = store.recent_room_updates(manager_id, RECENT_LIMIT).await?;

    let table = TableSpec::new(format!("Last {} Recent Updates", RECENT_LIMIT))
        .column(Column::right("Update Number", 13))
        .column(Column::right("Manager ID", 10))
        .column(Column::right("Hotel ID", 8))
        .column(Column::right("Room Number", 11))
        .column(Column::right("Updated On", 19));

    show(console, &table.render_or_empty(&updates, "No room updates yet"))
}

// =============================================================================
// Reports
// =============================================================================

/// Bookings at managed hotels between two dates, newest first.
pub async fn hotel_booking_history<R: BufRead, W: Write>(
    store: &dyn HotelStore,
    console: &mut Prompter<R, W>,
    manager_id: Id,
) -> CliResult<()> {
    let (start, end) = loop {
        let start = ask_date(console, "\tSee history from the date (MM/DD/YYYY): ")?;
        let end = ask_date(console, "\tTo the date (MM/DD/YYYY): ")?;

        match validate_date_range(start, end) {
            Ok(()) => break (start, end),
            Err(e) => console.banner(Color::Red, &format!("\t{}", e))?,
        }
    };

    let bookings = store.hotel_bookings(manager_id, start, end).await?;

    let table = TableSpec::new(format!(
        "Booking History From {} to {}",
        format_date(start),
        format_date(end)
    ))
    .column(Column::right("Booking ID", 10))
    .column(Column::left("Customer Name", 50))
    .column(Column::right("Hotel ID", 8))
    .column(Column::right("Room Number", 11))
    .column(Column::right("Booking Date", 12))
    .column(Column::right("Price", 7));

    show(
        console,
        &table.render_or_empty(&bookings, "No bookings in this period"),
    )
}

/// The customers with the most bookings at one managed hotel.
pub async fn regular_customers<R: BufRead, W: Write>(
    store: &dyn HotelStore,
    console: &mut Prompter<R, W>,
    manager_id: Id,
) -> CliResult<()> {
    let hotel_id = ask_managed_hotel(store, console, manager_id).await?;
    let customers = store.regular_customers(hotel_id, RECENT_LIMIT).await?;

    let table = TableSpec::new(format!(
        "Top {} Regular Customers at Hotel ID: {}",
        RECENT_LIMIT, hotel_id
    ))
    .column(Column::right("User ID", 7))
    .column(Column::left("Customer Name", 50))
    .column(Column::right("Bookings Made", 13));

    show(
        console,
        &table.render_or_empty(&customers, "No bookings at this hotel"),
    )
}

// =============================================================================
// Repairs
// =============================================================================

fn repair_table(title: &str) -> TableSpec {
    TableSpec::new(title)
        .column(Column::right("Repair ID", 9))
        .column(Column::right("Company ID", 10))
        .column(Column::right("Hotel ID", 8))
        .column(Column::right("Room Number", 11))
        .column(Column::right("Repair Date", 11))
}

/// Files a repair request, dated today, for a room in a managed hotel.
pub async fn place_repair<R: BufRead, W: Write>(
    store: &dyn HotelStore,
    console: &mut Prompter<R, W>,
    manager_id: Id,
) -> CliResult<()> {
    let hotel_id = ask_managed_hotel(store, console, manager_id).await?;
    let room_number = ask_room(store, console, hotel_id).await?;
    let company_id = ask_company(store, console).await?;

    let repair = store.place_repair(company_id, hotel_id, room_number).await?;

    info!(repair_id = repair.repair_id, manager_id, "Repair requested");
    show(console, &repair_table("Repair Request").render(&[repair]))
}

/// Repairs at every managed hotel, newest first.
pub async fn repair_history<R: BufRead, W: Write>(
    store: &dyn HotelStore,
    console: &mut Prompter<R, W>,
    manager_id: Id,
) -> CliResult<()> {
    let repairs = store.repair_history(manager_id).await?;
    show(
        console,
        &repair_table("Repair History").render_or_empty(&repairs, "No repair requests"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{console, date, output, MemoryStore};

    #[tokio::test]
    async fn test_update_room_price_then_return() {
        let store = MemoryStore::seeded();
        let mut c = console("1\n101\n1\n$175\n9\n");

        update_room(&store, &mut c, 2).await.unwrap();

        let out = output(c);
        assert!(out.contains("What info would you like to update on Room 101 at Hotel ID 1"));
        assert!(out.contains("Updated Info"));
        assert!(out.contains("|        1 |         101 |     175 |"));
    }

    #[tokio::test]
    async fn test_update_room_other_room_and_image() {
        let store = MemoryStore::seeded();
        let mut c = console("1\n101\n8\n2\n201\n2\nhttp://img/201.png\n7\n9\n");

        update_room(&store, &mut c, 2).await.unwrap();

        let out = output(c);
        assert!(out.contains("Room 201 at Hotel ID 2"));
        assert!(out.contains("http://img/201.png"));
        assert!(out.contains("Unrecognized choice!"));
    }

    #[tokio::test]
    async fn test_update_room_refuses_unmanaged_hotel() {
        let store = MemoryStore::seeded();
        let mut c = console("3\n1\n102\n9\n");

        update_room(&store, &mut c, 2).await.unwrap();
        assert!(output(c).contains("you don't manage that hotel"));
    }

    #[tokio::test]
    async fn test_recent_updates_follow_room_edits() {
        let store = MemoryStore::seeded();
        store.update_room_price(1, 101, 130).await.unwrap();
        store.update_room_price(2, 201, 95).await.unwrap();
        let mut c = console("");

        recent_updates(&store, &mut c, 2).await.unwrap();

        let out = output(c);
        assert!(out.contains("Last 5 Recent Updates"));
        assert!(out.find("|             2 |").unwrap() < out.find("|             1 |").unwrap());
    }

    #[tokio::test]
    async fn test_hotel_booking_history_reprompts_inverted_range() {
        let store = MemoryStore::seeded();
        store.book_room(1, 2, 201, date(2024, 1, 20)).await.unwrap();
        let mut c = console("02/01/2024\n01/01/2024\n01/01/2024\n01/31/2024\n");

        hotel_booking_history(&store, &mut c, 2).await.unwrap();

        let out = output(c);
        assert!(out.contains("02/01/2024 must not be after 01/01/2024"));
        assert!(out.contains("Booking History From 01/01/2024 to 01/31/2024"));
        assert!(out.find("01/20/2024").unwrap() < out.find("01/15/2024").unwrap());
        assert!(out.contains("| Alice "));
    }

    #[tokio::test]
    async fn test_regular_customers_ranked_by_bookings() {
        let store = MemoryStore::seeded();
        let carol = store.create_customer("Carol", "pw").await.unwrap();
        for day in 1..=3 {
            store
                .book_room(carol, 1, 102, date(2024, 6, day))
                .await
                .unwrap();
        }
        let mut c = console("1\n");

        regular_customers(&store, &mut c, 2).await.unwrap();

        let out = output(c);
        assert!(out.contains("Top 5 Regular Customers at Hotel ID: 1"));
        assert!(out.find("Carol").unwrap() < out.find("Alice").unwrap());
    }

    #[tokio::test]
    async fn test_place_repair_then_history() {
        let store = MemoryStore::seeded();
        let mut c = console("1\n102\n77\n1\n");

        place_repair(&store, &mut c, 2).await.unwrap();
        repair_history(&store, &mut c, 2).await.unwrap();

        let out = output(c);
        assert!(out.contains("Invalid Repair Company ID. Enter Repair Company ID: "));
        assert!(out.contains("Repair Request"));
        assert!(out.contains("Repair History"));
        assert_eq!(out.matches("|          1 |        1 |         102 |").count(), 2);
    }

    #[tokio::test]
    async fn test_repair_history_empty() {
        let store = MemoryStore::seeded();
        let mut c = console("");

        repair_history(&store, &mut c, 2).await.unwrap();
        assert!(output(c).contains("| No repair requests"));
    }
}
