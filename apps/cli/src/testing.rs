//! In-memory `HotelStore` and scripted consoles for handler and menu tests.

use std::collections::HashMap;
use std::io::Cursor;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{Duration, NaiveDate, NaiveDateTime};

use hotel_core::{
    BookingSummary, GeoPoint, Hotel, HotelBooking, Id, RegularCustomer, Reservation, Room,
    RoomRepair, RoomUpdate, User, UserType,
};
use hotel_db::repository::hotel::sort_nearest_first;
use hotel_db::{DbError, DbResult, HotelStore};

use crate::console::Prompter;

pub(crate) type TestConsole = Prompter<Cursor<Vec<u8>>, Vec<u8>>;

/// A console that reads `script` and records everything written.
pub(crate) fn console(script: &str) -> TestConsole {
    Prompter::new(Cursor::new(script.as_bytes().to_vec()), Vec::new(), false)
}

/// Everything the console printed.
pub(crate) fn output(console: TestConsole) -> String {
    String::from_utf8(console.into_parts().1).expect("console output is UTF-8")
}

pub(crate) fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid test date")
}

struct Account {
    user: User,
    password: String,
}

struct Booking {
    booking_id: Id,
    customer_id: Id,
    hotel_id: Id,
    room_number: Id,
    booking_date: NaiveDate,
}

#[derive(Default)]
struct State {
    accounts: Vec<Account>,
    hotels: Vec<(Hotel, Id)>,
    rooms: Vec<Room>,
    bookings: Vec<Booking>,
    companies: Vec<Id>,
    repairs: Vec<RoomRepair>,
    updates: Vec<RoomUpdate>,
    failures: HashMap<&'static str, DbError>,
    book_ahead: bool,
    closed: bool,
}

impl State {
    fn injected(&mut self, method: &'static str) -> DbResult<()> {
        match self.failures.remove(method) {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn manager_of(&self, hotel_id: Id) -> Option<Id> {
        self.hotels
            .iter()
            .find(|(h, _)| h.hotel_id == hotel_id)
            .map(|(_, manager)| *manager)
    }

    fn price_of(&self, hotel_id: Id, room_number: Id) -> i32 {
        self.rooms
            .iter()
            .find(|r| r.hotel_id == hotel_id && r.room_number == room_number)
            .map(|r| r.price)
            .unwrap_or_default()
    }

    fn name_of(&self, user_id: Id) -> String {
        self.accounts
            .iter()
            .find(|a| a.user.user_id == user_id)
            .map(|a| a.user.name.clone())
            .unwrap_or_default()
    }

    fn is_booked(&self, hotel_id: Id, room_number: Id, day: NaiveDate) -> bool {
        self.bookings.iter().any(|b| {
            b.hotel_id == hotel_id && b.room_number == room_number && b.booking_date == day
        })
    }

    /// Mimics the database trigger that logs room edits.
    fn log_update(&mut self, hotel_id: Id, room_number: Id) {
        let update_number = self.updates.len() as Id + 1;
        let base: NaiveDateTime = date(2024, 3, 1).and_hms_opt(9, 0, 0).expect("valid time");

        self.updates.push(RoomUpdate {
            update_number,
            manager_id: self.manager_of(hotel_id).unwrap_or_default(),
            hotel_id,
            room_number,
            updated_on: base + Duration::minutes(update_number as i64),
        });
    }
}

/// A `HotelStore` backed by vectors, with the database's ordering rules.
pub(crate) struct MemoryStore {
    state: Mutex<State>,
    today: NaiveDate,
}

impl MemoryStore {
    /// Two users, three hotels, four rooms, one booking, one company.
    ///
    /// ```text
    /// users:   1 Alice (customer, "pw")   2 Bob (manager, "secret")
    /// hotels:  1 Seaside Inn (0,0)    -> Bob   rooms 101 ($120), 102 ($150)
    ///          2 Mountain Lodge (10,10) -> Bob  room 201 ($90)
    ///          3 Far Away (100,100)   -> 99    room 301 ($60)
    /// booking: Alice, hotel 1, room 101, 01/15/2024
    /// ```
    pub(crate) fn seeded() -> Self {
        let hotel = |hotel_id: Id, name: &str, lat: f64, long: f64| Hotel {
            hotel_id,
            hotel_name: name.to_string(),
            date_established: date(1999, 3, 4),
            latitude: lat,
            longitude: long,
        };
        let room = |hotel_id: Id, room_number: Id, price: i32| Room {
            hotel_id,
            room_number,
            price,
            image_url: None,
        };
        let account = |user_id: Id, name: &str, password: &str, kind: UserType| Account {
            user: User {
                user_id,
                name: name.to_string(),
                user_type: kind.as_str().to_string(),
            },
            password: password.to_string(),
        };

        let state = State {
            accounts: vec![
                account(1, "Alice", "pw", UserType::Customer),
                account(2, "Bob", "secret", UserType::Manager),
            ],
            hotels: vec![
                (hotel(1, "Seaside Inn", 0.0, 0.0), 2),
                (hotel(2, "Mountain Lodge", 10.0, 10.0), 2),
                (hotel(3, "Far Away", 100.0, 100.0), 99),
            ],
            rooms: vec![
                room(1, 101, 120),
                room(1, 102, 150),
                room(2, 201, 90),
                room(3, 301, 60),
            ],
            bookings: vec![Booking {
                booking_id: 1,
                customer_id: 1,
                hotel_id: 1,
                room_number: 101,
                booking_date: date(2024, 1, 15),
            }],
            companies: vec![1],
            ..State::default()
        };

        MemoryStore {
            state: Mutex::new(state),
            today: date(2024, 3, 1),
        }
    }

    /// The next call to `method` fails with `err`.
    pub(crate) fn fail_on(&self, method: &'static str, err: DbError) {
        self.lock().failures.insert(method, err);
    }

    /// The next `book_room` finds its date taken by customer 2 just before
    /// inserting.
    pub(crate) fn book_ahead_of_next_insert(&self) {
        self.lock().book_ahead = true;
    }

    pub(crate) fn is_closed(&self) -> bool {
        self.lock().closed
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, State> {
        self.state.lock().expect("memory store lock")
    }
}

#[async_trait]
impl HotelStore for MemoryStore {
    async fn create_customer(&self, name: &str, password: &str) -> DbResult<Id> {
        let mut state = self.lock();
        state.injected("create_customer")?;

        let user_id = state
            .accounts
            .iter()
            .map(|a| a.user.user_id)
            .max()
            .unwrap_or(0)
            + 1;
        state.accounts.push(Account {
            user: User {
                user_id,
                name: name.to_string(),
                user_type: UserType::Customer.as_str().to_string(),
            },
            password: password.to_string(),
        });
        Ok(user_id)
    }

    async fn authenticate(&self, user_id: Id, password: &str) -> DbResult<Option<User>> {
        let mut state = self.lock();
        state.injected("authenticate")?;

        Ok(state
            .accounts
            .iter()
            .find(|a| a.user.user_id == user_id && a.password == password)
            .map(|a| a.user.clone()))
    }

    async fn hotels_within(&self, origin: GeoPoint, radius: f64) -> DbResult<Vec<Hotel>> {
        let mut state = self.lock();
        state.injected("hotels_within")?;

        let mut hotels: Vec<Hotel> = state
            .hotels
            .iter()
            .map(|(h, _)| h.clone())
            .filter(|h| origin.within(&h.location(), radius))
            .collect();
        sort_nearest_first(&mut hotels, origin);
        Ok(hotels)
    }

    async fn hotel_exists(&self, hotel_id: Id) -> DbResult<bool> {
        Ok(self.lock().manager_of(hotel_id).is_some())
    }

    async fn manages_hotel(&self, manager_id: Id, hotel_id: Id) -> DbResult<bool> {
        Ok(self.lock().manager_of(hotel_id) == Some(manager_id))
    }

    async fn room_exists(&self, hotel_id: Id, room_number: Id) -> DbResult<bool> {
        Ok(self
            .lock()
            .rooms
            .iter()
            .any(|r| r.hotel_id == hotel_id && r.room_number == room_number))
    }

    async fn available_rooms(&self, hotel_id: Id, day: NaiveDate) -> DbResult<Vec<Room>> {
        let state = self.lock();
        let mut rooms: Vec<Room> = state
            .rooms
            .iter()
            .filter(|r| r.hotel_id == hotel_id && !state.is_booked(hotel_id, r.room_number, day))
            .cloned()
            .collect();
        rooms.sort_by_key(|r| r.room_number);
        Ok(rooms)
    }

    async fn is_room_booked(&self, hotel_id: Id, room_number: Id, day: NaiveDate) -> DbResult<bool> {
        Ok(self.lock().is_booked(hotel_id, room_number, day))
    }

    async fn book_room(
        &self,
        customer_id: Id,
        hotel_id: Id,
        room_number: Id,
        day: NaiveDate,
    ) -> DbResult<Reservation> {
        let mut state = self.lock();
        state.injected("book_room")?;

        if std::mem::take(&mut state.book_ahead) {
            let booking_id = state.bookings.len() as Id + 1;
            state.bookings.push(Booking {
                booking_id,
                customer_id: 2,
                hotel_id,
                room_number,
                booking_date: day,
            });
        }

        if state.is_booked(hotel_id, room_number, day) {
            return Err(DbError::duplicate(
                "bookingDate",
                format!("{}/{}/{}", hotel_id, room_number, day),
            ));
        }

        let booking_id = state.bookings.len() as Id + 1;
        state.bookings.push(Booking {
            booking_id,
            customer_id,
            hotel_id,
            room_number,
            booking_date: day,
        });

        Ok(Reservation {
            booking_id,
            customer_id,
            hotel_id,
            room_number,
            booking_date: day,
            price: state.price_of(hotel_id, room_number),
        })
    }

    async fn recent_bookings(&self, customer_id: Id, limit: i64) -> DbResult<Vec<BookingSummary>> {
        let state = self.lock();
        let mut summaries: Vec<BookingSummary> = state
            .bookings
            .iter()
            .filter(|b| b.customer_id == customer_id)
            .map(|b| BookingSummary {
                booking_id: b.booking_id,
                hotel_id: b.hotel_id,
                room_number: b.room_number,
                booking_date: b.booking_date,
                price: state.price_of(b.hotel_id, b.room_number),
            })
            .collect();
        summaries.sort_by(|a, b| b.booking_id.cmp(&a.booking_id));
        summaries.truncate(limit as usize);
        Ok(summaries)
    }

    async fn update_room_price(&self, hotel_id: Id, room_number: Id, price: i32) -> DbResult<Room> {
        let mut state = self.lock();
        let room = state
            .rooms
            .iter_mut()
            .find(|r| r.hotel_id == hotel_id && r.room_number == room_number)
            .ok_or_else(|| DbError::not_found("Room", format!("{}/{}", hotel_id, room_number)))?;
        room.price = price;
        let updated = room.clone();

        state.log_update(hotel_id, room_number);
        Ok(updated)
    }

    async fn update_room_image(
        &self,
        hotel_id: Id,
        room_number: Id,
        image_url: &str,
    ) -> DbResult<Room> {
        let mut state = self.lock();
        let room = state
            .rooms
            .iter_mut()
            .find(|r| r.hotel_id == hotel_id && r.room_number == room_number)
            .ok_or_else(|| DbError::not_found("Room", format!("{}/{}", hotel_id, room_number)))?;
        room.image_url = Some(image_url.to_string());
        let updated = room.clone();

        state.log_update(hotel_id, room_number);
        Ok(updated)
    }

    async fn recent_room_updates(&self, manager_id: Id, limit: i64) -> DbResult<Vec<RoomUpdate>> {
        let state = self.lock();
        let mut updates: Vec<RoomUpdate> = state
            .updates
            .iter()
            .filter(|u| u.manager_id == manager_id)
            .cloned()
            .collect();
        updates.sort_by(|a, b| b.updated_on.cmp(&a.updated_on));
        updates.truncate(limit as usize);
        Ok(updates)
    }

    async fn hotel_bookings(
        &self,
        manager_id: Id,
        start: NaiveDate,
        end: NaiveDate,
    ) -> DbResult<Vec<HotelBooking>> {
        let state = self.lock();
        let mut bookings: Vec<HotelBooking> = state
            .bookings
            .iter()
            .filter(|b| state.manager_of(b.hotel_id) == Some(manager_id))
            .filter(|b| b.booking_date >= start && b.booking_date <= end)
            .map(|b| HotelBooking {
                booking_id: b.booking_id,
                customer_name: state.name_of(b.customer_id),
                hotel_id: b.hotel_id,
                room_number: b.room_number,
                booking_date: b.booking_date,
                price: state.price_of(b.hotel_id, b.room_number),
            })
            .collect();
        bookings.sort_by(|a, b| {
            b.booking_date
                .cmp(&a.booking_date)
                .then(b.booking_id.cmp(&a.booking_id))
        });
        Ok(bookings)
    }

    async fn regular_customers(&self, hotel_id: Id, limit: i64) -> DbResult<Vec<RegularCustomer>> {
        let state = self.lock();
        let mut counts: HashMap<Id, i64> = HashMap::new();
        for b in state.bookings.iter().filter(|b| b.hotel_id == hotel_id) {
            *counts.entry(b.customer_id).or_default() += 1;
        }

        let mut customers: Vec<RegularCustomer> = counts
            .into_iter()
            .map(|(user_id, bookings)| RegularCustomer {
                user_id,
                name: state.name_of(user_id),
                bookings,
            })
            .collect();
        customers.sort_by(|a, b| b.bookings.cmp(&a.bookings).then(a.user_id.cmp(&b.user_id)));
        customers.truncate(limit as usize);
        Ok(customers)
    }

    async fn company_exists(&self, company_id: Id) -> DbResult<bool> {
        Ok(self.lock().companies.contains(&company_id))
    }

    async fn place_repair(
        &self,
        company_id: Id,
        hotel_id: Id,
        room_number: Id,
    ) -> DbResult<RoomRepair> {
        let mut state = self.lock();
        state.injected("place_repair")?;

        let repair = RoomRepair {
            repair_id: state.repairs.len() as Id + 1,
            company_id,
            hotel_id,
            room_number,
            repair_date: self.today,
        };
        state.repairs.push(repair.clone());
        Ok(repair)
    }

    async fn repair_history(&self, manager_id: Id) -> DbResult<Vec<RoomRepair>> {
        let state = self.lock();
        let mut repairs: Vec<RoomRepair> = state
            .repairs
            .iter()
            .filter(|r| state.manager_of(r.hotel_id) == Some(manager_id))
            .cloned()
            .collect();
        repairs.sort_by(|a, b| {
            b.repair_date
                .cmp(&a.repair_date)
                .then(b.repair_id.cmp(&a.repair_id))
        });
        Ok(repairs)
    }

    async fn close(&self) {
        self.lock().closed = true;
    }
}
