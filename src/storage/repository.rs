use std::collections::HashMap;

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use crate::domain::{
    Activity, ActivityId, BookingStatus, Driver, DriverId, Expense, ExpenseId, ExpenseSplit,
    Hotel, HotelId, Member, MemberId, SplitMethod, Trip, TripId,
};

use super::MIGRATION_001_INITIAL;

/// Repository for persisting and querying trips and their owned entities.
///
/// Multi-record writes (an expense together with its splits, a trip cascade
/// delete) run inside a single SQLite transaction so readers never observe
/// partially written state.
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    /// Create a new repository with the given SQLite connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Connect to a SQLite database at the given URL.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = SqlitePool::connect(database_url)
            .await
            .context("Failed to connect to database")?;
        Ok(Self::new(pool))
    }

    /// Run database migrations.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::query(MIGRATION_001_INITIAL)
            .execute(&self.pool)
            .await
            .context("Failed to run migration 001")?;
        Ok(())
    }

    /// Initialize a new database (connect + migrate).
    pub async fn init(database_url: &str) -> Result<Self> {
        let repo = Self::connect(database_url).await?;
        repo.migrate().await?;
        Ok(repo)
    }

    // ========================
    // Trip operations
    // ========================

    /// Save a new trip to the database.
    pub async fn save_trip(&self, trip: &Trip) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO trips (id, owner_id, name, destination, start_date, end_date, budget_cents, description, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(trip.id.to_string())
        .bind(&trip.owner_id)
        .bind(&trip.name)
        .bind(&trip.destination)
        .bind(trip.start_date.to_string())
        .bind(trip.end_date.to_string())
        .bind(trip.budget_cents)
        .bind(&trip.description)
        .bind(trip.created_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .context("Failed to save trip")?;
        Ok(())
    }

    /// Get a trip by ID.
    pub async fn get_trip(&self, id: TripId) -> Result<Option<Trip>> {
        let row = sqlx::query(
            r#"
            SELECT id, owner_id, name, destination, start_date, end_date, budget_cents, description, created_at
            FROM trips
            WHERE id = ?
            "#,
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch trip")?;

        match row {
            Some(row) => Ok(Some(Self::row_to_trip(&row)?)),
            None => Ok(None),
        }
    }

    /// List all trips, newest first.
    pub async fn list_trips(&self) -> Result<Vec<Trip>> {
        let rows = sqlx::query(
            r#"
            SELECT id, owner_id, name, destination, start_date, end_date, budget_cents, description, created_at
            FROM trips
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to list trips")?;

        rows.iter().map(Self::row_to_trip).collect()
    }

    /// Update an existing trip.
    pub async fn update_trip(&self, trip: &Trip) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE trips
            SET name = ?, destination = ?, start_date = ?, end_date = ?, budget_cents = ?, description = ?
            WHERE id = ?
            "#,
        )
        .bind(&trip.name)
        .bind(&trip.destination)
        .bind(trip.start_date.to_string())
        .bind(trip.end_date.to_string())
        .bind(trip.budget_cents)
        .bind(&trip.description)
        .bind(trip.id.to_string())
        .execute(&self.pool)
        .await
        .context("Failed to update trip")?;
        Ok(())
    }

    /// Delete a trip and everything it owns in one transaction.
    pub async fn delete_trip(&self, id: TripId) -> Result<()> {
        let id_str = id.to_string();
        let mut tx = self
            .pool
            .begin()
            .await
            .context("Failed to begin transaction")?;

        sqlx::query(
            "DELETE FROM expense_splits WHERE expense_id IN (SELECT id FROM expenses WHERE trip_id = ?)",
        )
        .bind(&id_str)
        .execute(&mut *tx)
        .await
        .context("Failed to delete trip expense splits")?;

        for table in ["expenses", "members", "activities", "drivers", "hotels"] {
            sqlx::query(&format!("DELETE FROM {} WHERE trip_id = ?", table))
                .bind(&id_str)
                .execute(&mut *tx)
                .await
                .with_context(|| format!("Failed to delete trip {}", table))?;
        }

        sqlx::query("DELETE FROM trips WHERE id = ?")
            .bind(&id_str)
            .execute(&mut *tx)
            .await
            .context("Failed to delete trip")?;

        tx.commit().await.context("Failed to commit trip delete")?;
        Ok(())
    }

    fn row_to_trip(row: &sqlx::sqlite::SqliteRow) -> Result<Trip> {
        let id_str: String = row.get("id");
        let start_date_str: String = row.get("start_date");
        let end_date_str: String = row.get("end_date");
        let created_at_str: String = row.get("created_at");

        Ok(Trip {
            id: Uuid::parse_str(&id_str).context("Invalid trip ID")?,
            owner_id: row.get("owner_id"),
            name: row.get("name"),
            destination: row.get("destination"),
            start_date: parse_date(&start_date_str)?,
            end_date: parse_date(&end_date_str)?,
            budget_cents: row.get("budget_cents"),
            description: row.get("description"),
            created_at: DateTime::parse_from_rfc3339(&created_at_str)
                .context("Invalid created_at timestamp")?
                .with_timezone(&Utc),
        })
    }

    // ========================
    // Member operations
    // ========================

    /// Save a new member to the database.
    pub async fn save_member(&self, member: &Member) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO members (id, trip_id, name, email, user_id, is_admin)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(member.id.to_string())
        .bind(member.trip_id.to_string())
        .bind(&member.name)
        .bind(&member.email)
        .bind(&member.user_id)
        .bind(member.is_admin)
        .execute(&self.pool)
        .await
        .context("Failed to save member")?;
        Ok(())
    }

    /// Get a member by ID.
    pub async fn get_member(&self, id: MemberId) -> Result<Option<Member>> {
        let row = sqlx::query(
            "SELECT id, trip_id, name, email, user_id, is_admin FROM members WHERE id = ?",
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch member")?;

        match row {
            Some(row) => Ok(Some(Self::row_to_member(&row)?)),
            None => Ok(None),
        }
    }

    /// List all current members of a trip.
    pub async fn list_members(&self, trip_id: TripId) -> Result<Vec<Member>> {
        let rows = sqlx::query(
            r#"
            SELECT id, trip_id, name, email, user_id, is_admin
            FROM members
            WHERE trip_id = ?
            ORDER BY name
            "#,
        )
        .bind(trip_id.to_string())
        .fetch_all(&self.pool)
        .await
        .context("Failed to list members")?;

        rows.iter().map(Self::row_to_member).collect()
    }

    /// Update an existing member.
    pub async fn update_member(&self, member: &Member) -> Result<()> {
        sqlx::query("UPDATE members SET name = ?, email = ?, is_admin = ? WHERE id = ?")
            .bind(&member.name)
            .bind(&member.email)
            .bind(member.is_admin)
            .bind(member.id.to_string())
            .execute(&self.pool)
            .await
            .context("Failed to update member")?;
        Ok(())
    }

    /// Delete a member. Expenses and splits referencing the member are kept
    /// as historical records.
    pub async fn delete_member(&self, id: MemberId) -> Result<()> {
        sqlx::query("DELETE FROM members WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .context("Failed to delete member")?;
        Ok(())
    }

    fn row_to_member(row: &sqlx::sqlite::SqliteRow) -> Result<Member> {
        let id_str: String = row.get("id");
        let trip_id_str: String = row.get("trip_id");

        Ok(Member {
            id: Uuid::parse_str(&id_str).context("Invalid member ID")?,
            trip_id: Uuid::parse_str(&trip_id_str).context("Invalid trip ID")?,
            name: row.get("name"),
            email: row.get("email"),
            user_id: row.get("user_id"),
            is_admin: row.get::<i32, _>("is_admin") != 0,
        })
    }

    // ========================
    // Expense operations
    // ========================

    /// Save a new expense and all its splits in one transaction.
    pub async fn save_expense(&self, expense: &Expense) -> Result<()> {
        let mut tx = self
            .pool
            .begin()
            .await
            .context("Failed to begin transaction")?;

        sqlx::query(
            r#"
            INSERT INTO expenses (id, trip_id, description, amount_cents, category, paid_by_id, date, split_method)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(expense.id.to_string())
        .bind(expense.trip_id.to_string())
        .bind(&expense.description)
        .bind(expense.amount_cents)
        .bind(&expense.category)
        .bind(expense.paid_by.to_string())
        .bind(expense.date.to_string())
        .bind(expense.split_method.as_str())
        .execute(&mut *tx)
        .await
        .context("Failed to save expense")?;

        Self::insert_splits(&mut tx, expense).await?;

        tx.commit().await.context("Failed to commit expense")?;
        Ok(())
    }

    /// Get an expense by ID, with its splits attached in stored order.
    pub async fn get_expense(&self, id: ExpenseId) -> Result<Option<Expense>> {
        let row = sqlx::query(
            r#"
            SELECT id, trip_id, description, amount_cents, category, paid_by_id, date, split_method
            FROM expenses
            WHERE id = ?
            "#,
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch expense")?;

        let Some(row) = row else {
            return Ok(None);
        };
        let mut expense = Self::row_to_expense(&row)?;

        let split_rows = sqlx::query(
            r#"
            SELECT id, expense_id, member_id, amount_cents
            FROM expense_splits
            WHERE expense_id = ?
            ORDER BY position
            "#,
        )
        .bind(id.to_string())
        .fetch_all(&self.pool)
        .await
        .context("Failed to fetch expense splits")?;

        expense.splits = split_rows
            .iter()
            .map(Self::row_to_split)
            .collect::<Result<_>>()?;
        Ok(Some(expense))
    }

    /// List all expenses for a trip, with splits attached.
    pub async fn list_expenses(&self, trip_id: TripId) -> Result<Vec<Expense>> {
        let trip_id_str = trip_id.to_string();

        let rows = sqlx::query(
            r#"
            SELECT id, trip_id, description, amount_cents, category, paid_by_id, date, split_method
            FROM expenses
            WHERE trip_id = ?
            ORDER BY date, id
            "#,
        )
        .bind(&trip_id_str)
        .fetch_all(&self.pool)
        .await
        .context("Failed to list expenses")?;

        let mut expenses: Vec<Expense> = rows
            .iter()
            .map(Self::row_to_expense)
            .collect::<Result<_>>()?;

        let split_rows = sqlx::query(
            r#"
            SELECT s.id, s.expense_id, s.member_id, s.amount_cents
            FROM expense_splits s
            JOIN expenses e ON e.id = s.expense_id
            WHERE e.trip_id = ?
            ORDER BY s.expense_id, s.position
            "#,
        )
        .bind(&trip_id_str)
        .fetch_all(&self.pool)
        .await
        .context("Failed to list expense splits")?;

        let mut by_expense: HashMap<ExpenseId, Vec<ExpenseSplit>> = HashMap::new();
        for row in &split_rows {
            let split = Self::row_to_split(row)?;
            by_expense.entry(split.expense_id).or_default().push(split);
        }
        for expense in &mut expenses {
            if let Some(splits) = by_expense.remove(&expense.id) {
                expense.splits = splits;
            }
        }

        Ok(expenses)
    }

    /// Update an expense and replace all its splits in one transaction.
    pub async fn update_expense(&self, expense: &Expense) -> Result<()> {
        let mut tx = self
            .pool
            .begin()
            .await
            .context("Failed to begin transaction")?;

        sqlx::query(
            r#"
            UPDATE expenses
            SET description = ?, amount_cents = ?, category = ?, paid_by_id = ?, date = ?, split_method = ?
            WHERE id = ?
            "#,
        )
        .bind(&expense.description)
        .bind(expense.amount_cents)
        .bind(&expense.category)
        .bind(expense.paid_by.to_string())
        .bind(expense.date.to_string())
        .bind(expense.split_method.as_str())
        .bind(expense.id.to_string())
        .execute(&mut *tx)
        .await
        .context("Failed to update expense")?;

        sqlx::query("DELETE FROM expense_splits WHERE expense_id = ?")
            .bind(expense.id.to_string())
            .execute(&mut *tx)
            .await
            .context("Failed to clear expense splits")?;

        Self::insert_splits(&mut tx, expense).await?;

        tx.commit().await.context("Failed to commit expense update")?;
        Ok(())
    }

    /// Delete an expense and all its splits in one transaction.
    pub async fn delete_expense(&self, id: ExpenseId) -> Result<()> {
        let id_str = id.to_string();
        let mut tx = self
            .pool
            .begin()
            .await
            .context("Failed to begin transaction")?;

        sqlx::query("DELETE FROM expense_splits WHERE expense_id = ?")
            .bind(&id_str)
            .execute(&mut *tx)
            .await
            .context("Failed to delete expense splits")?;

        sqlx::query("DELETE FROM expenses WHERE id = ?")
            .bind(&id_str)
            .execute(&mut *tx)
            .await
            .context("Failed to delete expense")?;

        tx.commit().await.context("Failed to commit expense delete")?;
        Ok(())
    }

    async fn insert_splits(
        tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
        expense: &Expense,
    ) -> Result<()> {
        for (position, split) in expense.splits.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO expense_splits (id, expense_id, member_id, amount_cents, position)
                VALUES (?, ?, ?, ?, ?)
                "#,
            )
            .bind(split.id.to_string())
            .bind(split.expense_id.to_string())
            .bind(split.member_id.to_string())
            .bind(split.amount_cents)
            .bind(position as i64)
            .execute(&mut **tx)
            .await
            .context("Failed to save expense split")?;
        }
        Ok(())
    }

    fn row_to_expense(row: &sqlx::sqlite::SqliteRow) -> Result<Expense> {
        let id_str: String = row.get("id");
        let trip_id_str: String = row.get("trip_id");
        let paid_by_str: String = row.get("paid_by_id");
        let date_str: String = row.get("date");
        let split_method_str: String = row.get("split_method");

        Ok(Expense {
            id: Uuid::parse_str(&id_str).context("Invalid expense ID")?,
            trip_id: Uuid::parse_str(&trip_id_str).context("Invalid trip ID")?,
            description: row.get("description"),
            amount_cents: row.get("amount_cents"),
            category: row.get("category"),
            paid_by: Uuid::parse_str(&paid_by_str).context("Invalid payer ID")?,
            date: parse_date(&date_str)?,
            split_method: SplitMethod::from_str(&split_method_str)
                .ok_or_else(|| anyhow::anyhow!("Invalid split method: {}", split_method_str))?,
            splits: Vec::new(),
        })
    }

    fn row_to_split(row: &sqlx::sqlite::SqliteRow) -> Result<ExpenseSplit> {
        let id_str: String = row.get("id");
        let expense_id_str: String = row.get("expense_id");
        let member_id_str: String = row.get("member_id");

        Ok(ExpenseSplit {
            id: Uuid::parse_str(&id_str).context("Invalid split ID")?,
            expense_id: Uuid::parse_str(&expense_id_str).context("Invalid expense ID")?,
            member_id: Uuid::parse_str(&member_id_str).context("Invalid member ID")?,
            amount_cents: row.get("amount_cents"),
        })
    }

    // ========================
    // Activity operations
    // ========================

    /// Save a new activity to the database.
    pub async fn save_activity(&self, activity: &Activity) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO activities (id, trip_id, title, location, date, time, description, cost_cents)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(activity.id.to_string())
        .bind(activity.trip_id.to_string())
        .bind(&activity.title)
        .bind(&activity.location)
        .bind(activity.date.to_string())
        .bind(&activity.time)
        .bind(&activity.description)
        .bind(activity.cost_cents)
        .execute(&self.pool)
        .await
        .context("Failed to save activity")?;
        Ok(())
    }

    /// Get an activity by ID.
    pub async fn get_activity(&self, id: ActivityId) -> Result<Option<Activity>> {
        let row = sqlx::query(
            r#"
            SELECT id, trip_id, title, location, date, time, description, cost_cents
            FROM activities
            WHERE id = ?
            "#,
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch activity")?;

        match row {
            Some(row) => Ok(Some(Self::row_to_activity(&row)?)),
            None => Ok(None),
        }
    }

    /// List all activities for a trip.
    pub async fn list_activities(&self, trip_id: TripId) -> Result<Vec<Activity>> {
        let rows = sqlx::query(
            r#"
            SELECT id, trip_id, title, location, date, time, description, cost_cents
            FROM activities
            WHERE trip_id = ?
            ORDER BY date, time
            "#,
        )
        .bind(trip_id.to_string())
        .fetch_all(&self.pool)
        .await
        .context("Failed to list activities")?;

        rows.iter().map(Self::row_to_activity).collect()
    }

    /// Update an activity.
    pub async fn update_activity(&self, activity: &Activity) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE activities
            SET title = ?, location = ?, date = ?, time = ?, description = ?, cost_cents = ?
            WHERE id = ?
            "#,
        )
        .bind(&activity.title)
        .bind(&activity.location)
        .bind(activity.date.to_string())
        .bind(&activity.time)
        .bind(&activity.description)
        .bind(activity.cost_cents)
        .bind(activity.id.to_string())
        .execute(&self.pool)
        .await
        .context("Failed to update activity")?;
        Ok(())
    }

    /// Delete an activity.
    pub async fn delete_activity(&self, id: ActivityId) -> Result<()> {
        sqlx::query("DELETE FROM activities WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .context("Failed to delete activity")?;
        Ok(())
    }

    fn row_to_activity(row: &sqlx::sqlite::SqliteRow) -> Result<Activity> {
        let id_str: String = row.get("id");
        let trip_id_str: String = row.get("trip_id");
        let date_str: String = row.get("date");

        Ok(Activity {
            id: Uuid::parse_str(&id_str).context("Invalid activity ID")?,
            trip_id: Uuid::parse_str(&trip_id_str).context("Invalid trip ID")?,
            title: row.get("title"),
            location: row.get("location"),
            date: parse_date(&date_str)?,
            time: row.get("time"),
            description: row.get("description"),
            cost_cents: row.get("cost_cents"),
        })
    }

    // ========================
    // Driver operations
    // ========================

    /// Save a new driver booking to the database.
    pub async fn save_driver(&self, driver: &Driver) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO drivers (id, trip_id, name, contact, vehicle_type, pickup_location, dropoff_location, date, time, cost_cents, status)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(driver.id.to_string())
        .bind(driver.trip_id.to_string())
        .bind(&driver.name)
        .bind(&driver.contact)
        .bind(&driver.vehicle_type)
        .bind(&driver.pickup_location)
        .bind(&driver.dropoff_location)
        .bind(driver.date.to_string())
        .bind(&driver.time)
        .bind(driver.cost_cents)
        .bind(driver.status.as_str())
        .execute(&self.pool)
        .await
        .context("Failed to save driver")?;
        Ok(())
    }

    /// Get a driver booking by ID.
    pub async fn get_driver(&self, id: DriverId) -> Result<Option<Driver>> {
        let row = sqlx::query(
            r#"
            SELECT id, trip_id, name, contact, vehicle_type, pickup_location, dropoff_location, date, time, cost_cents, status
            FROM drivers
            WHERE id = ?
            "#,
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch driver")?;

        match row {
            Some(row) => Ok(Some(Self::row_to_driver(&row)?)),
            None => Ok(None),
        }
    }

    /// List all driver bookings for a trip.
    pub async fn list_drivers(&self, trip_id: TripId) -> Result<Vec<Driver>> {
        let rows = sqlx::query(
            r#"
            SELECT id, trip_id, name, contact, vehicle_type, pickup_location, dropoff_location, date, time, cost_cents, status
            FROM drivers
            WHERE trip_id = ?
            ORDER BY date, time
            "#,
        )
        .bind(trip_id.to_string())
        .fetch_all(&self.pool)
        .await
        .context("Failed to list drivers")?;

        rows.iter().map(Self::row_to_driver).collect()
    }

    /// Update a driver booking.
    pub async fn update_driver(&self, driver: &Driver) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE drivers
            SET name = ?, contact = ?, vehicle_type = ?, pickup_location = ?, dropoff_location = ?, date = ?, time = ?, cost_cents = ?, status = ?
            WHERE id = ?
            "#,
        )
        .bind(&driver.name)
        .bind(&driver.contact)
        .bind(&driver.vehicle_type)
        .bind(&driver.pickup_location)
        .bind(&driver.dropoff_location)
        .bind(driver.date.to_string())
        .bind(&driver.time)
        .bind(driver.cost_cents)
        .bind(driver.status.as_str())
        .bind(driver.id.to_string())
        .execute(&self.pool)
        .await
        .context("Failed to update driver")?;
        Ok(())
    }

    /// Delete a driver booking.
    pub async fn delete_driver(&self, id: DriverId) -> Result<()> {
        sqlx::query("DELETE FROM drivers WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .context("Failed to delete driver")?;
        Ok(())
    }

    fn row_to_driver(row: &sqlx::sqlite::SqliteRow) -> Result<Driver> {
        let id_str: String = row.get("id");
        let trip_id_str: String = row.get("trip_id");
        let date_str: String = row.get("date");
        let status_str: String = row.get("status");

        Ok(Driver {
            id: Uuid::parse_str(&id_str).context("Invalid driver ID")?,
            trip_id: Uuid::parse_str(&trip_id_str).context("Invalid trip ID")?,
            name: row.get("name"),
            contact: row.get("contact"),
            vehicle_type: row.get("vehicle_type"),
            pickup_location: row.get("pickup_location"),
            dropoff_location: row.get("dropoff_location"),
            date: parse_date(&date_str)?,
            time: row.get("time"),
            cost_cents: row.get("cost_cents"),
            status: BookingStatus::from_str(&status_str)
                .ok_or_else(|| anyhow::anyhow!("Invalid booking status: {}", status_str))?,
        })
    }

    // ========================
    // Hotel operations
    // ========================

    /// Save a new hotel booking to the database.
    pub async fn save_hotel(&self, hotel: &Hotel) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO hotels (id, trip_id, name, location, check_in, check_out, room_type, guests, cost_cents, status)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(hotel.id.to_string())
        .bind(hotel.trip_id.to_string())
        .bind(&hotel.name)
        .bind(&hotel.location)
        .bind(hotel.check_in.to_string())
        .bind(hotel.check_out.to_string())
        .bind(&hotel.room_type)
        .bind(hotel.guests)
        .bind(hotel.cost_cents)
        .bind(hotel.status.as_str())
        .execute(&self.pool)
        .await
        .context("Failed to save hotel")?;
        Ok(())
    }

    /// Get a hotel booking by ID.
    pub async fn get_hotel(&self, id: HotelId) -> Result<Option<Hotel>> {
        let row = sqlx::query(
            r#"
            SELECT id, trip_id, name, location, check_in, check_out, room_type, guests, cost_cents, status
            FROM hotels
            WHERE id = ?
            "#,
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch hotel")?;

        match row {
            Some(row) => Ok(Some(Self::row_to_hotel(&row)?)),
            None => Ok(None),
        }
    }

    /// List all hotel bookings for a trip.
    pub async fn list_hotels(&self, trip_id: TripId) -> Result<Vec<Hotel>> {
        let rows = sqlx::query(
            r#"
            SELECT id, trip_id, name, location, check_in, check_out, room_type, guests, cost_cents, status
            FROM hotels
            WHERE trip_id = ?
            ORDER BY check_in
            "#,
        )
        .bind(trip_id.to_string())
        .fetch_all(&self.pool)
        .await
        .context("Failed to list hotels")?;

        rows.iter().map(Self::row_to_hotel).collect()
    }

    /// Update a hotel booking.
    pub async fn update_hotel(&self, hotel: &Hotel) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE hotels
            SET name = ?, location = ?, check_in = ?, check_out = ?, room_type = ?, guests = ?, cost_cents = ?, status = ?
            WHERE id = ?
            "#,
        )
        .bind(&hotel.name)
        .bind(&hotel.location)
        .bind(hotel.check_in.to_string())
        .bind(hotel.check_out.to_string())
        .bind(&hotel.room_type)
        .bind(hotel.guests)
        .bind(hotel.cost_cents)
        .bind(hotel.status.as_str())
        .bind(hotel.id.to_string())
        .execute(&self.pool)
        .await
        .context("Failed to update hotel")?;
        Ok(())
    }

    /// Delete a hotel booking.
    pub async fn delete_hotel(&self, id: HotelId) -> Result<()> {
        sqlx::query("DELETE FROM hotels WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .context("Failed to delete hotel")?;
        Ok(())
    }

    fn row_to_hotel(row: &sqlx::sqlite::SqliteRow) -> Result<Hotel> {
        let id_str: String = row.get("id");
        let trip_id_str: String = row.get("trip_id");
        let check_in_str: String = row.get("check_in");
        let check_out_str: String = row.get("check_out");
        let status_str: String = row.get("status");

        Ok(Hotel {
            id: Uuid::parse_str(&id_str).context("Invalid hotel ID")?,
            trip_id: Uuid::parse_str(&trip_id_str).context("Invalid trip ID")?,
            name: row.get("name"),
            location: row.get("location"),
            check_in: parse_date(&check_in_str)?,
            check_out: parse_date(&check_out_str)?,
            room_type: row.get("room_type"),
            guests: row.get("guests"),
            cost_cents: row.get("cost_cents"),
            status: BookingStatus::from_str(&status_str)
                .ok_or_else(|| anyhow::anyhow!("Invalid booking status: {}", status_str))?,
        })
    }
}

fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").with_context(|| format!("Invalid date: {}", s))
}
