//! # Menu Loop
//!
//! The console's state machine.
//!
//! ```text
//!              ┌──────────────────────────────┐
//!              │          Anonymous           │◄──────────────┐
//!              │  1 create  2 log in  9 exit  │               │
//!              └──────┬───────────────┬───────┘               │
//!          log in ok  │               │ 9 / end of input      │ 20
//!      ┌──────────────┴───────┐       ▼                       │
//!      ▼                      ▼     Exit                      │
//! ┌──────────┐          ┌──────────┐                          │
//! │ Customer │          │ Manager  │──────────────────────────┤
//! │  1..4    │          │  1..10   │                          │
//! └────┬─────┘          └──────────┘                          │
//!      └──────────────────────────────────────────────────────┘
//! ```
//!
//! Unknown choices show the same menu again under an "Unrecognized choice!"
//! banner. Handler failures that leave the connection usable are printed to
//! stderr and the menu carries on.

use std::io::{BufRead, Write};

use tracing::{info, warn};

use hotel_core::{Id, User, UserType};
use hotel_db::HotelStore;

use crate::console::{greeting, Color, Prompter};
use crate::error::{CliError, CliResult};
use crate::handlers::{account, booking, browse, format_radius, manager};

const MENU_RULE: &str = "----------------------------------------------------------";

/// Where the console is.
#[derive(Debug, Clone, PartialEq)]
pub enum MenuState {
    Anonymous,
    Customer(User),
    Manager(User),
    Exit,
}

impl MenuState {
    /// The signed-in state for `user`, by account kind.
    pub fn signed_in(user: User) -> Self {
        match user.kind() {
            UserType::Manager => MenuState::Manager(user),
            UserType::Customer => MenuState::Customer(user),
        }
    }
}

/// Message shown above the next menu.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Notice {
    LoginFailed,
    Unrecognized,
    UserCreated(Id),
}

/// Drives prompts and handlers until the user exits or input ends.
pub struct Menu<'a, R, W> {
    store: &'a dyn HotelStore,
    console: &'a mut Prompter<R, W>,
    radius: f64,
    notice: Option<Notice>,
}

impl<'a, R: BufRead, W: Write> Menu<'a, R, W> {
    pub fn new(store: &'a dyn HotelStore, console: &'a mut Prompter<R, W>, radius: f64) -> Self {
        Menu {
            store,
            console,
            radius,
            notice: None,
        }
    }

    /// Runs until Exit.
    ///
    /// End of input is a normal way out. Console failures and a lost
    /// connection are returned.
    pub async fn run(&mut self) -> CliResult<()> {
        let mut state = MenuState::Anonymous;

        while state != MenuState::Exit {
            state = match self.step(state).await {
                Ok(next) => next,
                Err(CliError::InputClosed) => {
                    info!("Input closed, leaving the menu");
                    MenuState::Exit
                }
                Err(e) => return Err(e),
            };
        }

        Ok(())
    }

    /// Shows the menu for `state`, handles one choice, and returns the next
    /// state.
    pub async fn step(&mut self, state: MenuState) -> CliResult<MenuState> {
        match state {
            MenuState::Anonymous => self.anonymous().await,
            MenuState::Customer(user) => self.user_menu(user, UserType::Customer).await,
            MenuState::Manager(user) => self.user_menu(user, UserType::Manager).await,
            MenuState::Exit => Ok(MenuState::Exit),
        }
    }

    // ===== Anonymous =====

    async fn anonymous(&mut self) -> CliResult<MenuState> {
        greeting(&mut *self.console)?;
        self.show_notice()?;

        self.console.say("")?;
        self.console.say("1. Create user")?;
        self.console.say("2. Log in")?;
        self.console.say("9. < EXIT")?;
        self.console.say(MENU_RULE)?;

        match self.console.read_choice()? {
            1 => {
                let created = account::create_user(self.store, &mut *self.console).await;
                if let Some(user_id) = self.recover(created)? {
                    self.notice = Some(Notice::UserCreated(user_id));
                }
                Ok(MenuState::Anonymous)
            }
            2 => {
                let login = account::log_in(self.store, &mut *self.console).await;
                match self.recover(login)? {
                    Some(Some(user)) => Ok(MenuState::signed_in(user)),
                    Some(None) | None => {
                        self.notice = Some(Notice::LoginFailed);
                        Ok(MenuState::Anonymous)
                    }
                }
            }
            9 => Ok(MenuState::Exit),
            _ => {
                self.notice = Some(Notice::Unrecognized);
                Ok(MenuState::Anonymous)
            }
        }
    }

    // ===== Signed In =====

    async fn user_menu(&mut self, user: User, kind: UserType) -> CliResult<MenuState> {
        let is_manager = kind == UserType::Manager;
        self.print_user_menu(is_manager)?;
        self.show_notice()?;

        let choice = self.console.read_choice()?;
        let id = user.user_id;
        let store = self.store;
        let console = &mut *self.console;

        let result = match (choice, is_manager) {
            (1, _) => browse::view_hotels(store, console, self.radius).await,
            (2, _) => browse::view_rooms(store, console).await,
            (3, _) => booking::book_room(store, console, id).await,
            (4, _) => booking::recent_bookings(store, console, id).await,
            (5, true) => manager::update_room(store, console, id).await,
            (6, true) => manager::recent_updates(store, console, id).await,
            (7, true) => manager::hotel_booking_history(store, console, id).await,
            (8, true) => manager::regular_customers(store, console, id).await,
            (9, true) => manager::place_repair(store, console, id).await,
            (10, true) => manager::repair_history(store, console, id).await,
            (20, _) => {
                info!(user_id = id, "Logged out");
                return Ok(MenuState::Anonymous);
            }
            _ => {
                self.notice = Some(Notice::Unrecognized);
                Ok(())
            }
        };
        self.recover(result)?;

        Ok(match kind {
            UserType::Manager => MenuState::Manager(user),
            UserType::Customer => MenuState::Customer(user),
        })
    }

    fn print_user_menu(&mut self, is_manager: bool) -> CliResult<()> {
        let title = if is_manager {
            "Manager Main Menu"
        } else {
            "User Main Menu"
        };
        let title = self.console.paint(Color::Yellow, &format!("{:^56}", title));

        let mut items = vec![
            format!("1. View Hotels within {} units", format_radius(self.radius)),
            "2. View Rooms".to_string(),
            "3. Book a Room".to_string(),
            "4. View recent booking history".to_string(),
        ];
        if is_manager {
            items.extend(
                [
                    "5. Update Room Information",
                    "6. View 5 recent Room Updates Info",
                    "7. View booking history of the hotel",
                    "8. View 5 regular Customers",
                    "9. Place room repair Request to a company",
                    "10. View room repair Requests history",
                ]
                .map(String::from),
            );
        }

        self.console.say("")?;
        self.console.say(MENU_RULE)?;
        self.console.say(&format!("|{}|", title))?;
        self.console.say(MENU_RULE)?;
        for item in &items {
            self.console.say(&menu_line(item))?;
        }
        self.console.say(MENU_RULE)?;
        self.console.say(&menu_line("20. Log out"))?;
        self.console.say(MENU_RULE)
    }

    // ===== Notices & Errors =====

    fn show_notice(&mut self) -> CliResult<()> {
        match self.notice.take() {
            Some(Notice::LoginFailed) => self.console.banner(
                Color::Red,
                "\nWe can't find that userID and password. Please try again.",
            ),
            Some(Notice::Unrecognized) => self.console.banner(Color::Red, "\nUnrecognized choice!"),
            Some(Notice::UserCreated(user_id)) => self.console.banner(
                Color::Green,
                &format!("\nUser successfully created with userID = {}", user_id),
            ),
            None => Ok(()),
        }
    }

    /// Reports a recoverable handler failure and turns it into `None`.
    fn recover<T>(&mut self, result: CliResult<T>) -> CliResult<Option<T>> {
        match result {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.is_recoverable() => {
                warn!(error = %e, "Handler failed");
                eprintln!("{}", e);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}

fn menu_line(text: &str) -> String {
    format!("| {:<54} |", text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{console, output, MemoryStore};
    use hotel_db::DbError;

    async fn run_script(store: &MemoryStore, script: &str) -> (CliResult<()>, String) {
        let mut c = console(script);
        let result = Menu::new(store, &mut c, 30.0).run().await;
        (result, output(c))
    }

    #[test]
    fn test_menu_line_width() {
        assert_eq!(menu_line("20. Log out").len(), MENU_RULE.len());
        assert_eq!(
            menu_line("1. View Hotels within 30 units"),
            "| 1. View Hotels within 30 units                         |"
        );
    }

    #[tokio::test]
    async fn test_invalid_choice_redisplays_menu() {
        let store = MemoryStore::seeded();
        let (result, out) = run_script(&store, "5\nabc\n9\n").await;

        assert!(result.is_ok());
        assert!(out.contains("Unrecognized choice!"));
        assert!(out.contains("Your input is invalid!"));
        assert_eq!(out.matches("1. Create user").count(), 2);
    }

    #[tokio::test]
    async fn test_wrong_password_returns_to_anonymous_menu() {
        let store = MemoryStore::seeded();
        let (result, out) = run_script(&store, "2\n1\nwrong\n9\n").await;

        assert!(result.is_ok());
        assert!(out.contains("We can't find that userID and password. Please try again."));
        assert_eq!(out.matches("2. Log in").count(), 2);
        assert!(!out.contains("User Main Menu"));
    }

    #[tokio::test]
    async fn test_create_user_banner() {
        let store = MemoryStore::seeded();
        let (_, out) = run_script(&store, "1\nCarol\npw\n9\n").await;

        assert!(out.contains("User successfully created with userID = 3"));
    }

    #[tokio::test]
    async fn test_customer_cannot_reach_manager_items() {
        let store = MemoryStore::seeded();
        let (result, out) = run_script(&store, "2\n1\npw\n5\n20\n9\n").await;

        assert!(result.is_ok());
        assert!(out.contains("User Main Menu"));
        assert!(!out.contains("5. Update Room Information"));
        assert!(out.contains("Unrecognized choice!"));
        assert!(!out.contains("What info would you like to update"));
        assert_eq!(out.matches("9. < EXIT").count(), 2);
    }

    #[tokio::test]
    async fn test_manager_menu_for_managers() {
        let store = MemoryStore::seeded();
        let (_, out) = run_script(&store, "2\n2\nsecret\n10\n20\n9\n").await;

        assert!(out.contains("Manager Main Menu"));
        assert!(out.contains("| 10. View room repair Requests history"));
        assert!(out.contains("Repair History"));
    }

    #[tokio::test]
    async fn test_end_of_input_mid_prompt_exits_cleanly() {
        let store = MemoryStore::seeded();
        let (result, out) = run_script(&store, "2\n1\npw\n3\n1\n").await;

        assert!(result.is_ok());
        assert!(out.ends_with("\tEnter Room Number: "));
    }

    #[tokio::test]
    async fn test_statement_error_keeps_menu_running() {
        let store = MemoryStore::seeded();
        store.fail_on("hotels_within", DbError::QueryFailed("relation missing".to_string()));
        let (result, out) = run_script(&store, "2\n1\npw\n1\n0\n0\n1\n0\n0\n20\n9\n").await;

        assert!(result.is_ok());
        assert_eq!(out.matches("Seaside Inn").count(), 1);
        assert_eq!(out.matches("User Main Menu").count(), 3);
    }

    #[tokio::test]
    async fn test_login_statement_error_shows_login_banner() {
        let store = MemoryStore::seeded();
        store.fail_on("authenticate", DbError::QueryFailed("relation missing".to_string()));
        let (result, out) = run_script(&store, "2\n1\npw\n9\n").await;

        assert!(result.is_ok());
        assert!(out.contains("We can't find that userID and password. Please try again."));
        assert!(!out.contains("User Main Menu"));
    }

    #[tokio::test]
    async fn test_lost_connection_ends_the_loop() {
        let store = MemoryStore::seeded();
        store.fail_on("hotels_within", DbError::ConnectionFailed("reset".to_string()));
        let (result, _) = run_script(&store, "2\n1\npw\n1\n0\n0\n20\n9\n").await;

        assert!(matches!(result, Err(CliError::Db(DbError::ConnectionFailed(_)))));
    }

    #[test]
    fn test_signed_in_state_follows_user_type() {
        let user = |kind: &str| User {
            user_id: 7,
            name: "Dana".to_string(),
            user_type: kind.to_string(),
        };

        assert!(matches!(MenuState::signed_in(user("manager")), MenuState::Manager(_)));
        assert!(matches!(MenuState::signed_in(user("customer")), MenuState::Customer(_)));
        assert!(matches!(MenuState::signed_in(user("")), MenuState::Manager(_)));
    }
}
