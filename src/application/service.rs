use std::collections::HashSet;

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::{
    Activity, ActivityId, BalanceSheet, BookingStatus, Cents, Driver, DriverId, Expense,
    ExpenseId, Hotel, HotelId, Member, MemberId, SplitError, SplitMethod, Trip, TripId,
    compute_balances, format_cents,
};
use crate::storage::Repository;

use super::AppError;

/// Application service providing high-level operations over trips and their
/// shared-expense ledger. This is the primary interface for any client.
pub struct TripService {
    repo: Repository,
}

/// Input for recording a new expense.
pub struct NewExpense {
    pub description: String,
    pub amount_cents: Cents,
    pub category: String,
    pub paid_by: MemberId,
    pub date: NaiveDate,
    pub split_method: Option<SplitMethod>,
    /// Debtors to divide the amount among. Empty means the payer absorbs
    /// the whole cost and no splits are recorded.
    pub split_among: Vec<MemberId>,
}

/// Field-level patch for an expense. `amount_cents` and/or `split_among`
/// trigger a full split recomputation; everything else applies untouched.
#[derive(Default)]
pub struct ExpensePatch {
    pub description: Option<String>,
    pub category: Option<String>,
    pub paid_by: Option<MemberId>,
    pub date: Option<NaiveDate>,
    pub split_method: Option<SplitMethod>,
    pub amount_cents: Option<Cents>,
    pub split_among: Option<Vec<MemberId>>,
}

/// Field-level patch for a trip.
#[derive(Default)]
pub struct TripPatch {
    pub name: Option<String>,
    pub destination: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub budget_cents: Option<Cents>,
    pub description: Option<String>,
}

/// Field-level patch for a member.
#[derive(Default)]
pub struct MemberPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub is_admin: Option<bool>,
}

/// Field-level patch for an itinerary activity.
#[derive(Default)]
pub struct ActivityPatch {
    pub title: Option<String>,
    pub location: Option<String>,
    pub date: Option<NaiveDate>,
    pub time: Option<String>,
    pub description: Option<String>,
    pub cost_cents: Option<Cents>,
}

/// Field-level patch for a driver booking.
#[derive(Default)]
pub struct DriverPatch {
    pub name: Option<String>,
    pub contact: Option<String>,
    pub vehicle_type: Option<String>,
    pub pickup_location: Option<String>,
    pub dropoff_location: Option<String>,
    pub date: Option<NaiveDate>,
    pub time: Option<String>,
    pub cost_cents: Option<Cents>,
    pub status: Option<BookingStatus>,
}

/// Field-level patch for a hotel booking.
#[derive(Default)]
pub struct HotelPatch {
    pub name: Option<String>,
    pub location: Option<String>,
    pub check_in: Option<NaiveDate>,
    pub check_out: Option<NaiveDate>,
    pub room_type: Option<String>,
    pub guests: Option<i64>,
    pub cost_cents: Option<Cents>,
    pub status: Option<BookingStatus>,
}

/// Serializable view of a whole trip, with per-member computed balances.
/// Monetary fields cross this boundary as decimal strings; the cents
/// representation stays internal.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TripOverview {
    pub id: TripId,
    pub name: String,
    pub destination: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub budget: String,
    pub description: Option<String>,
    pub members: Vec<MemberView>,
    pub expenses: Vec<ExpenseView>,
    pub activities: Vec<ActivityView>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberView {
    pub id: MemberId,
    pub name: String,
    pub email: Option<String>,
    pub is_admin: bool,
    pub is_owner: bool,
    pub balance: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseView {
    pub id: ExpenseId,
    pub description: String,
    pub amount: String,
    pub category: String,
    pub paid_by_id: MemberId,
    pub paid_by: PayerSummary,
    pub date: NaiveDate,
    pub split_method: SplitMethod,
    pub split_among: Vec<SplitView>,
}

/// Resolved payer summary. Falls back to a placeholder when the payer was
/// removed from the trip after the expense was recorded.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PayerSummary {
    pub id: MemberId,
    pub name: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitView {
    pub member_id: MemberId,
    pub amount: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityView {
    pub id: ActivityId,
    pub title: String,
    pub location: String,
    pub date: NaiveDate,
    pub time: Option<String>,
    pub cost: Option<String>,
}

/// Balance report for a trip, pairing members with their net position.
pub struct BalanceReport {
    pub entries: Vec<BalanceEntry>,
    pub sheet: BalanceSheet,
}

pub struct BalanceEntry {
    pub member: Member,
    pub balance: Cents,
}

impl TripService {
    /// Create a new service with the given repository.
    pub fn new(repo: Repository) -> Self {
        Self { repo }
    }

    /// Initialize a new database at the given path.
    pub async fn init(database_path: &str) -> Result<Self, AppError> {
        let db_url = format!("sqlite:{}?mode=rwc", database_path);
        let repo = Repository::init(&db_url).await?;
        Ok(Self::new(repo))
    }

    /// Connect to an existing database.
    pub async fn connect(database_path: &str) -> Result<Self, AppError> {
        let db_url = format!("sqlite:{}", database_path);
        let repo = Repository::connect(&db_url).await?;
        Ok(Self::new(repo))
    }

    // ========================
    // Trip operations
    // ========================

    pub async fn create_trip(
        &self,
        name: String,
        destination: String,
        start_date: NaiveDate,
        end_date: NaiveDate,
        budget_cents: Cents,
        description: Option<String>,
        owner_id: Option<String>,
    ) -> Result<Trip, AppError> {
        if budget_cents < 0 {
            return Err(AppError::InvalidAmount(
                "Budget must be non-negative".to_string(),
            ));
        }

        let mut trip = Trip::new(name, destination, start_date, end_date, budget_cents);
        if let Some(desc) = description {
            trip = trip.with_description(desc);
        }
        if let Some(owner) = owner_id {
            trip = trip.with_owner(owner);
        }

        self.repo.save_trip(&trip).await?;
        Ok(trip)
    }

    pub async fn get_trip(&self, trip_id: TripId) -> Result<Trip, AppError> {
        self.repo
            .get_trip(trip_id)
            .await?
            .ok_or_else(|| AppError::TripNotFound(trip_id.to_string()))
    }

    pub async fn list_trips(&self) -> Result<Vec<Trip>, AppError> {
        Ok(self.repo.list_trips().await?)
    }

    pub async fn update_trip(&self, trip_id: TripId, patch: TripPatch) -> Result<Trip, AppError> {
        let mut trip = self.get_trip(trip_id).await?;

        if let Some(name) = patch.name {
            trip.name = name;
        }
        if let Some(destination) = patch.destination {
            trip.destination = destination;
        }
        if let Some(start_date) = patch.start_date {
            trip.start_date = start_date;
        }
        if let Some(end_date) = patch.end_date {
            trip.end_date = end_date;
        }
        if let Some(budget_cents) = patch.budget_cents {
            if budget_cents < 0 {
                return Err(AppError::InvalidAmount(
                    "Budget must be non-negative".to_string(),
                ));
            }
            trip.budget_cents = budget_cents;
        }
        if let Some(description) = patch.description {
            trip.description = Some(description);
        }

        self.repo.update_trip(&trip).await?;
        Ok(trip)
    }

    /// Delete a trip and everything it owns (members, expenses with splits,
    /// activities, drivers, hotels) in a single transaction.
    pub async fn delete_trip(&self, trip_id: TripId) -> Result<Trip, AppError> {
        let trip = self.get_trip(trip_id).await?;
        self.repo.delete_trip(trip_id).await?;
        Ok(trip)
    }

    // ========================
    // Member operations
    // ========================

    pub async fn add_member(
        &self,
        trip_id: TripId,
        name: String,
        email: Option<String>,
        user_id: Option<String>,
        is_admin: bool,
    ) -> Result<Member, AppError> {
        // Fail early if the trip doesn't exist
        self.get_trip(trip_id).await?;

        let mut member = Member::new(trip_id, name).with_admin(is_admin);
        if let Some(email) = email {
            member = member.with_email(email);
        }
        if let Some(user_id) = user_id {
            member = member.with_user_id(user_id);
        }

        self.repo.save_member(&member).await?;
        Ok(member)
    }

    pub async fn get_member(&self, member_id: MemberId) -> Result<Member, AppError> {
        self.repo
            .get_member(member_id)
            .await?
            .ok_or_else(|| AppError::MemberNotFound(member_id.to_string()))
    }

    pub async fn list_members(&self, trip_id: TripId) -> Result<Vec<Member>, AppError> {
        self.get_trip(trip_id).await?;
        Ok(self.repo.list_members(trip_id).await?)
    }

    pub async fn update_member(
        &self,
        member_id: MemberId,
        patch: MemberPatch,
    ) -> Result<Member, AppError> {
        let mut member = self.get_member(member_id).await?;

        if let Some(name) = patch.name {
            member.name = name;
        }
        if let Some(email) = patch.email {
            member.email = Some(email);
        }
        if let Some(is_admin) = patch.is_admin {
            member.is_admin = is_admin;
        }

        self.repo.update_member(&member).await?;
        Ok(member)
    }

    /// Remove a member from a trip. Historical expenses and splits that
    /// reference the member are left in place; the balance engine drops
    /// them from aggregation and reports how many it dropped.
    pub async fn remove_member(&self, member_id: MemberId) -> Result<Member, AppError> {
        let member = self.get_member(member_id).await?;
        self.repo.delete_member(member_id).await?;
        Ok(member)
    }

    // ========================
    // Expense operations
    // ========================

    /// Record a new expense with its splits as one atomic unit.
    pub async fn create_expense(
        &self,
        trip_id: TripId,
        input: NewExpense,
    ) -> Result<Expense, AppError> {
        self.get_trip(trip_id).await?;
        let mut expense = Expense::new(
            trip_id,
            input.description,
            input.amount_cents,
            input.category,
            input.paid_by,
            input.date,
        )?;

        let members = self.repo.list_members(trip_id).await?;
        if !members.iter().any(|m| m.id == expense.paid_by) {
            return Err(AppError::UnknownMember {
                member_id: expense.paid_by,
                trip_id,
            });
        }
        check_distinct_debtors(&input.split_among)?;
        if let Some(method) = input.split_method {
            expense.split_method = method;
        }
        expense.split_equally_among(&input.split_among)?;

        self.repo.save_expense(&expense).await?;
        Ok(expense)
    }

    pub async fn get_expense(&self, expense_id: ExpenseId) -> Result<Expense, AppError> {
        self.repo
            .get_expense(expense_id)
            .await?
            .ok_or_else(|| AppError::ExpenseNotFound(expense_id.to_string()))
    }

    pub async fn list_expenses(&self, trip_id: TripId) -> Result<Vec<Expense>, AppError> {
        self.get_trip(trip_id).await?;
        Ok(self.repo.list_expenses(trip_id).await?)
    }

    /// Apply a field-level patch to an expense.
    ///
    /// A supplied debtor set always triggers a replace-all split
    /// recomputation over the effective amount. An amount change without a
    /// debtor set redistributes over the debtors already on file, provided
    /// the split method is equal and splits exist; otherwise splits are left
    /// untouched. The row update and split replacement commit together.
    pub async fn update_expense(
        &self,
        expense_id: ExpenseId,
        patch: ExpensePatch,
    ) -> Result<Expense, AppError> {
        let mut expense = self.get_expense(expense_id).await?;

        if let Some(paid_by) = patch.paid_by {
            let members = self.repo.list_members(expense.trip_id).await?;
            if !members.iter().any(|m| m.id == paid_by) {
                return Err(AppError::UnknownMember {
                    member_id: paid_by,
                    trip_id: expense.trip_id,
                });
            }
            expense.paid_by = paid_by;
        }
        if let Some(description) = patch.description {
            expense.description = description;
        }
        if let Some(category) = patch.category {
            expense.category = category;
        }
        if let Some(date) = patch.date {
            expense.date = date;
        }
        if let Some(method) = patch.split_method {
            expense.split_method = method;
        }

        let amount_changed = patch.amount_cents.is_some();
        if let Some(amount_cents) = patch.amount_cents {
            if amount_cents < 0 {
                return Err(AppError::InvalidSplit(SplitError::NegativeAmount(
                    amount_cents,
                )));
            }
            expense.amount_cents = amount_cents;
        }

        if let Some(debtors) = patch.split_among {
            check_distinct_debtors(&debtors)?;
            expense.split_equally_among(&debtors)?;
        } else if amount_changed
            && expense.split_method == SplitMethod::Equal
            && !expense.splits.is_empty()
        {
            let debtors = expense.debtor_ids();
            expense.split_equally_among(&debtors)?;
        }

        self.repo.update_expense(&expense).await?;
        Ok(expense)
    }

    /// Delete an expense and all its splits atomically.
    pub async fn delete_expense(&self, expense_id: ExpenseId) -> Result<Expense, AppError> {
        let expense = self.get_expense(expense_id).await?;
        self.repo.delete_expense(expense_id).await?;
        Ok(expense)
    }

    // ========================
    // Balance operations
    // ========================

    /// Compute net balances for every current member of a trip.
    pub async fn trip_balances(&self, trip_id: TripId) -> Result<BalanceReport, AppError> {
        self.get_trip(trip_id).await?;
        let members = self.repo.list_members(trip_id).await?;
        let expenses = self.repo.list_expenses(trip_id).await?;

        let sheet = compute_balances(&members, &expenses);
        let entries = members
            .into_iter()
            .map(|member| {
                let balance = sheet.balance_for(member.id);
                BalanceEntry { member, balance }
            })
            .collect();

        Ok(BalanceReport { entries, sheet })
    }

    /// Build the full serializable trip view, including per-member balances.
    pub async fn trip_overview(&self, trip_id: TripId) -> Result<TripOverview, AppError> {
        let trip = self.get_trip(trip_id).await?;
        let members = self.repo.list_members(trip_id).await?;
        let expenses = self.repo.list_expenses(trip_id).await?;
        let activities = self.repo.list_activities(trip_id).await?;

        let sheet = compute_balances(&members, &expenses);

        let member_views = members
            .iter()
            .map(|member| MemberView {
                id: member.id,
                name: member.name.clone(),
                email: member.email.clone(),
                is_admin: member.is_admin,
                is_owner: member.is_admin,
                balance: format_cents(sheet.balance_for(member.id)),
            })
            .collect();

        let expense_views = expenses
            .iter()
            .map(|expense| {
                let paid_by = members
                    .iter()
                    .find(|m| m.id == expense.paid_by)
                    .map(|m| PayerSummary {
                        id: m.id,
                        name: m.name.clone(),
                    })
                    .unwrap_or(PayerSummary {
                        id: expense.paid_by,
                        name: "Unknown".to_string(),
                    });

                ExpenseView {
                    id: expense.id,
                    description: expense.description.clone(),
                    amount: format_cents(expense.amount_cents),
                    category: expense.category.clone(),
                    paid_by_id: expense.paid_by,
                    paid_by,
                    date: expense.date,
                    split_method: expense.split_method,
                    split_among: expense
                        .splits
                        .iter()
                        .map(|split| SplitView {
                            member_id: split.member_id,
                            amount: format_cents(split.amount_cents),
                        })
                        .collect(),
                }
            })
            .collect();

        let activity_views = activities
            .iter()
            .map(|activity| ActivityView {
                id: activity.id,
                title: activity.title.clone(),
                location: activity.location.clone(),
                date: activity.date,
                time: activity.time.clone(),
                cost: activity.cost_cents.map(format_cents),
            })
            .collect();

        Ok(TripOverview {
            id: trip.id,
            name: trip.name,
            destination: trip.destination,
            start_date: trip.start_date,
            end_date: trip.end_date,
            budget: format_cents(trip.budget_cents),
            description: trip.description,
            members: member_views,
            expenses: expense_views,
            activities: activity_views,
        })
    }

    // ========================
    // Activity operations
    // ========================

    pub async fn add_activity(
        &self,
        trip_id: TripId,
        title: String,
        location: String,
        date: NaiveDate,
        time: Option<String>,
        description: Option<String>,
        cost_cents: Option<Cents>,
    ) -> Result<Activity, AppError> {
        self.get_trip(trip_id).await?;

        let mut activity = Activity::new(trip_id, title, location, date);
        if let Some(time) = time {
            activity = activity.with_time(time);
        }
        if let Some(description) = description {
            activity = activity.with_description(description);
        }
        if let Some(cost) = cost_cents {
            activity = activity.with_cost(cost);
        }

        self.repo.save_activity(&activity).await?;
        Ok(activity)
    }

    pub async fn get_activity(&self, activity_id: ActivityId) -> Result<Activity, AppError> {
        self.repo
            .get_activity(activity_id)
            .await?
            .ok_or_else(|| AppError::ActivityNotFound(activity_id.to_string()))
    }

    pub async fn list_activities(&self, trip_id: TripId) -> Result<Vec<Activity>, AppError> {
        self.get_trip(trip_id).await?;
        Ok(self.repo.list_activities(trip_id).await?)
    }

    pub async fn update_activity(
        &self,
        activity_id: ActivityId,
        patch: ActivityPatch,
    ) -> Result<Activity, AppError> {
        let mut activity = self.get_activity(activity_id).await?;

        if let Some(title) = patch.title {
            activity.title = title;
        }
        if let Some(location) = patch.location {
            activity.location = location;
        }
        if let Some(date) = patch.date {
            activity.date = date;
        }
        if let Some(time) = patch.time {
            activity.time = Some(time);
        }
        if let Some(description) = patch.description {
            activity.description = Some(description);
        }
        if let Some(cost_cents) = patch.cost_cents {
            activity.cost_cents = Some(cost_cents);
        }

        self.repo.update_activity(&activity).await?;
        Ok(activity)
    }

    pub async fn delete_activity(&self, activity_id: ActivityId) -> Result<Activity, AppError> {
        let activity = self.get_activity(activity_id).await?;
        self.repo.delete_activity(activity_id).await?;
        Ok(activity)
    }

    // ========================
    // Driver operations
    // ========================

    #[allow(clippy::too_many_arguments)]
    pub async fn hire_driver(
        &self,
        trip_id: TripId,
        name: String,
        contact: String,
        vehicle_type: String,
        pickup_location: String,
        dropoff_location: String,
        date: NaiveDate,
        time: Option<String>,
        cost_cents: Cents,
    ) -> Result<Driver, AppError> {
        self.get_trip(trip_id).await?;

        let mut driver = Driver::new(
            trip_id,
            name,
            contact,
            vehicle_type,
            pickup_location,
            dropoff_location,
            date,
            cost_cents,
        );
        if let Some(time) = time {
            driver = driver.with_time(time);
        }

        self.repo.save_driver(&driver).await?;
        Ok(driver)
    }

    pub async fn list_drivers(&self, trip_id: TripId) -> Result<Vec<Driver>, AppError> {
        self.get_trip(trip_id).await?;
        Ok(self.repo.list_drivers(trip_id).await?)
    }

    pub async fn update_driver(
        &self,
        driver_id: DriverId,
        patch: DriverPatch,
    ) -> Result<Driver, AppError> {
        let mut driver = self
            .repo
            .get_driver(driver_id)
            .await?
            .ok_or_else(|| AppError::DriverNotFound(driver_id.to_string()))?;

        if let Some(name) = patch.name {
            driver.name = name;
        }
        if let Some(contact) = patch.contact {
            driver.contact = contact;
        }
        if let Some(vehicle_type) = patch.vehicle_type {
            driver.vehicle_type = vehicle_type;
        }
        if let Some(pickup_location) = patch.pickup_location {
            driver.pickup_location = pickup_location;
        }
        if let Some(dropoff_location) = patch.dropoff_location {
            driver.dropoff_location = dropoff_location;
        }
        if let Some(date) = patch.date {
            driver.date = date;
        }
        if let Some(time) = patch.time {
            driver.time = Some(time);
        }
        if let Some(cost_cents) = patch.cost_cents {
            driver.cost_cents = cost_cents;
        }
        if let Some(status) = patch.status {
            driver.status = status;
        }

        self.repo.update_driver(&driver).await?;
        Ok(driver)
    }

    pub async fn cancel_driver(&self, driver_id: DriverId) -> Result<Driver, AppError> {
        let driver = self
            .repo
            .get_driver(driver_id)
            .await?
            .ok_or_else(|| AppError::DriverNotFound(driver_id.to_string()))?;
        self.repo.delete_driver(driver_id).await?;
        Ok(driver)
    }

    // ========================
    // Hotel operations
    // ========================

    #[allow(clippy::too_many_arguments)]
    pub async fn book_hotel(
        &self,
        trip_id: TripId,
        name: String,
        location: String,
        check_in: NaiveDate,
        check_out: NaiveDate,
        room_type: String,
        guests: i64,
        cost_cents: Cents,
    ) -> Result<Hotel, AppError> {
        self.get_trip(trip_id).await?;

        let hotel = Hotel::new(
            trip_id, name, location, check_in, check_out, room_type, guests, cost_cents,
        );
        self.repo.save_hotel(&hotel).await?;
        Ok(hotel)
    }

    pub async fn list_hotels(&self, trip_id: TripId) -> Result<Vec<Hotel>, AppError> {
        self.get_trip(trip_id).await?;
        Ok(self.repo.list_hotels(trip_id).await?)
    }

    pub async fn update_hotel(
        &self,
        hotel_id: HotelId,
        patch: HotelPatch,
    ) -> Result<Hotel, AppError> {
        let mut hotel = self
            .repo
            .get_hotel(hotel_id)
            .await?
            .ok_or_else(|| AppError::HotelNotFound(hotel_id.to_string()))?;

        if let Some(name) = patch.name {
            hotel.name = name;
        }
        if let Some(location) = patch.location {
            hotel.location = location;
        }
        if let Some(check_in) = patch.check_in {
            hotel.check_in = check_in;
        }
        if let Some(check_out) = patch.check_out {
            hotel.check_out = check_out;
        }
        if let Some(room_type) = patch.room_type {
            hotel.room_type = room_type;
        }
        if let Some(guests) = patch.guests {
            hotel.guests = guests;
        }
        if let Some(cost_cents) = patch.cost_cents {
            hotel.cost_cents = cost_cents;
        }
        if let Some(status) = patch.status {
            hotel.status = status;
        }

        self.repo.update_hotel(&hotel).await?;
        Ok(hotel)
    }

    pub async fn cancel_hotel(&self, hotel_id: HotelId) -> Result<Hotel, AppError> {
        let hotel = self
            .repo
            .get_hotel(hotel_id)
            .await?
            .ok_or_else(|| AppError::HotelNotFound(hotel_id.to_string()))?;
        self.repo.delete_hotel(hotel_id).await?;
        Ok(hotel)
    }
}

fn check_distinct_debtors(debtors: &[MemberId]) -> Result<(), AppError> {
    let mut seen = HashSet::new();
    for id in debtors {
        if !seen.insert(id) {
            return Err(AppError::InvalidSplit(SplitError::DuplicateDebtor(
                id.to_string(),
            )));
        }
    }
    Ok(())
}
