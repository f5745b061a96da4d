//! # Maintenance Repository
//!
//! Repair requests sent to maintenance companies.

use tracing::{debug, info};

use crate::error::DbResult;
use crate::session::Session;
use crate::statement::Statement;
use hotel_core::{Id, RoomRepair};

/// Repository for the `MaintenanceCompany` and `RoomRepairs` tables.
#[derive(Debug, Clone)]
pub struct MaintenanceRepository {
    session: Session,
}

impl MaintenanceRepository {
    /// Creates a new MaintenanceRepository.
    pub fn new(session: Session) -> Self {
        MaintenanceRepository { session }
    }

    /// Whether a maintenance company with this ID exists.
    pub async fn company_exists(&self, company_id: Id) -> DbResult<bool> {
        let stmt = Statement::new("SELECT companyID FROM MaintenanceCompany WHERE companyID = $1")
            .bind(company_id);

        Ok(self.session.query_count(&stmt).await? > 0)
    }

    /// Files a repair request dated today.
    pub async fn place_repair(
        &self,
        company_id: Id,
        hotel_id: Id,
        room_number: Id,
    ) -> DbResult<RoomRepair> {
        debug!(company_id, hotel_id, room_number, "Placing repair request");

        let stmt = Statement::new(
            "INSERT INTO RoomRepairs (companyID, hotelID, roomNumber, repairDate) \
             VALUES ($1, $2, $3, CURRENT_DATE) \
             RETURNING repairID::int4 AS repair_id, companyID::int4 AS company_id, \
                       hotelID::int4 AS hotel_id, roomNumber::int4 AS room_number, \
                       repairDate::date AS repair_date",
        )
        .bind(company_id)
        .bind(hotel_id)
        .bind(room_number);

        let repair: RoomRepair = self.session.fetch_one(&stmt).await?;

        info!(repair_id = repair.repair_id, "Repair request placed");
        Ok(repair)
    }

    /// Repairs at every hotel a manager runs, newest first.
    pub async fn repair_history(&self, manager_id: Id) -> DbResult<Vec<RoomRepair>> {
        let stmt = Statement::new(
            "SELECT r.repairID::int4 AS repair_id, r.companyID::int4 AS company_id, \
                    r.hotelID::int4 AS hotel_id, r.roomNumber::int4 AS room_number, \
                    r.repairDate::date AS repair_date \
             FROM RoomRepairs r \
             JOIN Hotel h ON h.hotelID = r.hotelID \
             WHERE h.managerUserID = $1 \
             ORDER BY r.repairDate DESC, r.repairID DESC",
        )
        .bind(manager_id);

        self.session.fetch_all(&stmt).await
    }
}
