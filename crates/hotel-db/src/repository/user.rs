//! # User Repository
//!
//! Account creation and password login.

use tracing::debug;

use crate::error::DbResult;
use crate::session::Session;
use crate::statement::Statement;
use hotel_core::{Id, User, UserType};

/// Repository for the `Users` table.
#[derive(Debug, Clone)]
pub struct UserRepository {
    session: Session,
}

impl UserRepository {
    /// Creates a new UserRepository.
    pub fn new(session: Session) -> Self {
        UserRepository { session }
    }

    /// Inserts a customer account.
    ///
    /// ## Returns
    /// The generated user ID, read back with `RETURNING` so concurrent
    /// sign-ups cannot hand out each other's ID.
    pub async fn create_customer(&self, name: &str, password: &str) -> DbResult<Id> {
        debug!(name = %name, "Creating customer");

        let (user_id,): (Id,) = self
            .session
            .fetch_one(&create_statement(name, password, UserType::Customer))
            .await?;

        Ok(user_id)
    }

    /// Looks up the account matching both ID and password.
    ///
    /// ## Returns
    /// * `Ok(Some(User))` - Credentials match
    /// * `Ok(None)` - Unknown ID or wrong password
    pub async fn authenticate(&self, user_id: Id, password: &str) -> DbResult<Option<User>> {
        debug!(user_id, "Checking credentials");

        self.session
            .fetch_optional(&authenticate_statement(user_id, password))
            .await
    }
}

fn create_statement(name: &str, password: &str, user_type: UserType) -> Statement {
    Statement::new(
        "INSERT INTO Users (name, password, userType) VALUES ($1, $2, $3) \
         RETURNING userID::int4",
    )
    .bind(name)
    .bind(password)
    .bind(user_type.as_str())
}

fn authenticate_statement(user_id: Id, password: &str) -> Statement {
    Statement::new(
        "SELECT userID::int4 AS user_id, name::text AS name, userType::text AS user_type \
         FROM Users WHERE userID = $1 AND password = $2",
    )
    .bind(user_id)
    .bind(password)
}
