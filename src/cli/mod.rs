use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use uuid::Uuid;

use crate::application::{
    ActivityPatch, DriverPatch, ExpensePatch, HotelPatch, MemberPatch, NewExpense, TripPatch,
    TripService,
};
use crate::domain::{BookingStatus, MemberId, format_cents, parse_cents};

/// Tripledger - Trip planning and shared-expense ledger
#[derive(Parser)]
#[command(name = "tripledger")]
#[command(about = "Plan trips and track who owes whom, with exact cent arithmetic")]
#[command(version)]
pub struct Cli {
    /// Database file path
    #[arg(short, long, default_value = "tripledger.db")]
    pub database: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new database
    Init,

    /// Trip management commands
    #[command(subcommand)]
    Trip(TripCommands),

    /// Member management commands
    #[command(subcommand)]
    Member(MemberCommands),

    /// Expense management commands
    #[command(subcommand)]
    Expense(ExpenseCommands),

    /// Show net balances for a trip
    Balance {
        /// Trip ID
        trip: String,
    },

    /// Activity management commands
    #[command(subcommand)]
    Activity(ActivityCommands),

    /// Driver booking commands
    #[command(subcommand)]
    Driver(DriverCommands),

    /// Hotel booking commands
    #[command(subcommand)]
    Hotel(HotelCommands),
}

#[derive(Subcommand)]
pub enum TripCommands {
    /// Create a new trip
    Create {
        /// Trip name
        name: String,

        /// Destination
        #[arg(long)]
        destination: String,

        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        start: String,

        /// End date (YYYY-MM-DD)
        #[arg(long)]
        end: String,

        /// Budget (e.g., "1500.00")
        #[arg(long)]
        budget: String,

        /// Description
        #[arg(short = 'D', long)]
        description: Option<String>,
    },

    /// List all trips
    List,

    /// Show a trip with members, balances and expenses
    Show {
        /// Trip ID
        id: String,

        /// Print the full overview as JSON
        #[arg(long)]
        json: bool,
    },

    /// Update trip fields
    Update {
        /// Trip ID
        id: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        destination: Option<String>,

        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        start: Option<String>,

        /// End date (YYYY-MM-DD)
        #[arg(long)]
        end: Option<String>,

        /// Budget (e.g., "1500.00")
        #[arg(long)]
        budget: Option<String>,
    },

    /// Delete a trip and everything it owns
    Delete {
        /// Trip ID
        id: String,
    },
}

#[derive(Subcommand)]
pub enum MemberCommands {
    /// Add a member to a trip
    Add {
        /// Trip ID
        trip: String,

        /// Member display name
        name: String,

        /// Email address
        #[arg(long)]
        email: Option<String>,

        /// Mark the member as trip admin/owner
        #[arg(long)]
        admin: bool,
    },

    /// List members of a trip
    List {
        /// Trip ID
        trip: String,
    },

    /// Update member fields
    Update {
        /// Member ID
        id: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        email: Option<String>,

        /// Set or clear the admin flag
        #[arg(long)]
        admin: Option<bool>,
    },

    /// Remove a member (historical expenses and splits are kept)
    Remove {
        /// Member ID
        id: String,
    },
}

#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// Record a new expense
    Add {
        /// Trip ID
        trip: String,

        /// What the expense was for
        description: String,

        /// Amount (e.g., "90.00")
        amount: String,

        /// Category (e.g., "food", "transport")
        #[arg(short, long)]
        category: String,

        /// Member ID of the payer
        #[arg(long)]
        paid_by: String,

        /// Expense date (YYYY-MM-DD)
        #[arg(long)]
        date: String,

        /// Comma-separated member IDs to split among (omit to let the payer
        /// absorb the whole cost)
        #[arg(long)]
        split_among: Option<String>,
    },

    /// List expenses for a trip
    List {
        /// Trip ID
        trip: String,
    },

    /// Update expense fields; amount and/or debtor changes recompute splits
    Update {
        /// Expense ID
        id: String,

        #[arg(long)]
        description: Option<String>,

        #[arg(short, long)]
        category: Option<String>,

        /// New amount (e.g., "120.00")
        #[arg(long)]
        amount: Option<String>,

        /// New payer member ID
        #[arg(long)]
        paid_by: Option<String>,

        /// New expense date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,

        /// New comma-separated debtor member IDs (pass "" to clear splits)
        #[arg(long)]
        split_among: Option<String>,
    },

    /// Delete an expense and its splits
    Delete {
        /// Expense ID
        id: String,
    },
}

#[derive(Subcommand)]
pub enum ActivityCommands {
    /// Add an activity to the itinerary
    Add {
        /// Trip ID
        trip: String,

        /// Activity title
        title: String,

        /// Location
        #[arg(long)]
        location: String,

        /// Date (YYYY-MM-DD)
        #[arg(long)]
        date: String,

        /// Time (free-form, e.g., "14:30")
        #[arg(long)]
        time: Option<String>,

        /// Description
        #[arg(short = 'D', long)]
        description: Option<String>,

        /// Cost (e.g., "25.00")
        #[arg(long)]
        cost: Option<String>,
    },

    /// List activities for a trip
    List {
        /// Trip ID
        trip: String,
    },

    /// Update activity fields
    Update {
        /// Activity ID
        id: String,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        location: Option<String>,

        /// Date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,

        /// Time (free-form, e.g., "14:30")
        #[arg(long)]
        time: Option<String>,

        /// Description
        #[arg(short = 'D', long)]
        description: Option<String>,

        /// Cost (e.g., "25.00")
        #[arg(long)]
        cost: Option<String>,
    },

    /// Delete an activity
    Delete {
        /// Activity ID
        id: String,
    },
}

#[derive(Subcommand)]
pub enum DriverCommands {
    /// Hire a driver for a leg of the trip
    Hire {
        /// Trip ID
        trip: String,

        /// Driver name
        name: String,

        /// Contact (phone/email)
        #[arg(long)]
        contact: String,

        /// Vehicle type (e.g., "van")
        #[arg(long)]
        vehicle: String,

        /// Pickup location
        #[arg(long)]
        pickup: String,

        /// Dropoff location
        #[arg(long)]
        dropoff: String,

        /// Date (YYYY-MM-DD)
        #[arg(long)]
        date: String,

        /// Time (free-form)
        #[arg(long)]
        time: Option<String>,

        /// Cost (e.g., "80.00")
        #[arg(long)]
        cost: String,
    },

    /// List driver bookings for a trip
    List {
        /// Trip ID
        trip: String,
    },

    /// Set a driver booking's status
    SetStatus {
        /// Driver ID
        id: String,

        /// New status: pending, confirmed, cancelled
        status: String,
    },

    /// Cancel (delete) a driver booking
    Cancel {
        /// Driver ID
        id: String,
    },
}

#[derive(Subcommand)]
pub enum HotelCommands {
    /// Book a hotel
    Book {
        /// Trip ID
        trip: String,

        /// Hotel name
        name: String,

        /// Location
        #[arg(long)]
        location: String,

        /// Check-in date (YYYY-MM-DD)
        #[arg(long)]
        check_in: String,

        /// Check-out date (YYYY-MM-DD)
        #[arg(long)]
        check_out: String,

        /// Room type (e.g., "double")
        #[arg(long)]
        room: String,

        /// Number of guests
        #[arg(long, default_value = "1")]
        guests: i64,

        /// Cost (e.g., "210.00")
        #[arg(long)]
        cost: String,
    },

    /// List hotel bookings for a trip
    List {
        /// Trip ID
        trip: String,
    },

    /// Set a hotel booking's status
    SetStatus {
        /// Hotel ID
        id: String,

        /// New status: pending, confirmed, cancelled
        status: String,
    },

    /// Cancel (delete) a hotel booking
    Cancel {
        /// Hotel ID
        id: String,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Commands::Init => {
                TripService::init(&self.database).await?;
                println!("Database initialized: {}", self.database);
            }

            Commands::Trip(trip_cmd) => {
                let service = TripService::connect(&self.database).await?;
                run_trip_command(&service, trip_cmd).await?;
            }

            Commands::Member(member_cmd) => {
                let service = TripService::connect(&self.database).await?;
                run_member_command(&service, member_cmd).await?;
            }

            Commands::Expense(expense_cmd) => {
                let service = TripService::connect(&self.database).await?;
                run_expense_command(&service, expense_cmd).await?;
            }

            Commands::Balance { trip } => {
                let service = TripService::connect(&self.database).await?;
                run_balance_command(&service, &trip).await?;
            }

            Commands::Activity(activity_cmd) => {
                let service = TripService::connect(&self.database).await?;
                run_activity_command(&service, activity_cmd).await?;
            }

            Commands::Driver(driver_cmd) => {
                let service = TripService::connect(&self.database).await?;
                run_driver_command(&service, driver_cmd).await?;
            }

            Commands::Hotel(hotel_cmd) => {
                let service = TripService::connect(&self.database).await?;
                run_hotel_command(&service, hotel_cmd).await?;
            }
        }

        Ok(())
    }
}

fn parse_id(input: &str) -> Result<Uuid> {
    Uuid::parse_str(input).with_context(|| format!("Invalid ID '{}' (expected UUID)", input))
}

fn parse_date(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}'. Use YYYY-MM-DD", input))
}

fn parse_amount(input: &str) -> Result<i64> {
    parse_cents(input).context("Invalid amount format. Use '50.00' or '50'")
}

/// Parse a comma-separated member ID list. An empty string means "no
/// debtors", which clears splits on update.
fn parse_member_ids(input: &str) -> Result<Vec<MemberId>> {
    input
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(parse_id)
        .collect()
}

fn parse_status(input: &str) -> Result<BookingStatus> {
    BookingStatus::from_str(input).with_context(|| {
        format!(
            "Invalid status '{}'. Use pending, confirmed or cancelled",
            input
        )
    })
}

async fn run_trip_command(service: &TripService, cmd: TripCommands) -> Result<()> {
    match cmd {
        TripCommands::Create {
            name,
            destination,
            start,
            end,
            budget,
            description,
        } => {
            let trip = service
                .create_trip(
                    name,
                    destination,
                    parse_date(&start)?,
                    parse_date(&end)?,
                    parse_amount(&budget)?,
                    description,
                    None,
                )
                .await?;
            println!(
                "Created trip '{}' to {} ({})",
                trip.name, trip.destination, trip.id
            );
        }

        TripCommands::List => {
            let trips = service.list_trips().await?;
            if trips.is_empty() {
                println!("No trips yet.");
            }
            for trip in trips {
                println!(
                    "{}  {} -> {}  budget {}  [{}]",
                    trip.name,
                    trip.start_date,
                    trip.end_date,
                    format_cents(trip.budget_cents),
                    trip.id
                );
            }
        }

        TripCommands::Show { id, json } => {
            let overview = service.trip_overview(parse_id(&id)?).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&overview)?);
                return Ok(());
            }

            println!("{} ({})", overview.name, overview.destination);
            println!(
                "  {} -> {}  budget {}",
                overview.start_date, overview.end_date, overview.budget
            );
            if let Some(desc) = &overview.description {
                println!("  {}", desc);
            }

            println!("Members:");
            for member in &overview.members {
                let owner = if member.is_owner { " (owner)" } else { "" };
                println!("  {}{}  balance {}", member.name, owner, member.balance);
            }

            println!("Expenses:");
            for expense in &overview.expenses {
                println!(
                    "  {}  {}  paid by {}  ({} way split)  [{}]",
                    expense.date,
                    expense.amount,
                    expense.paid_by.name,
                    expense.split_among.len(),
                    expense.id
                );
            }

            if !overview.activities.is_empty() {
                println!("Activities:");
                for activity in &overview.activities {
                    println!(
                        "  {}  {} @ {}",
                        activity.date, activity.title, activity.location
                    );
                }
            }
        }

        TripCommands::Update {
            id,
            name,
            destination,
            start,
            end,
            budget,
        } => {
            let patch = TripPatch {
                name,
                destination,
                start_date: start.as_deref().map(parse_date).transpose()?,
                end_date: end.as_deref().map(parse_date).transpose()?,
                budget_cents: budget.as_deref().map(parse_amount).transpose()?,
                description: None,
            };
            let trip = service.update_trip(parse_id(&id)?, patch).await?;
            println!("Updated trip '{}'", trip.name);
        }

        TripCommands::Delete { id } => {
            let trip = service.delete_trip(parse_id(&id)?).await?;
            println!("Deleted trip '{}' and everything it owned", trip.name);
        }
    }

    Ok(())
}

async fn run_member_command(service: &TripService, cmd: MemberCommands) -> Result<()> {
    match cmd {
        MemberCommands::Add {
            trip,
            name,
            email,
            admin,
        } => {
            let member = service
                .add_member(parse_id(&trip)?, name, email, None, admin)
                .await?;
            println!("Added member '{}' ({})", member.name, member.id);
        }

        MemberCommands::List { trip } => {
            let members = service.list_members(parse_id(&trip)?).await?;
            for member in members {
                let admin = if member.is_admin { " (admin)" } else { "" };
                println!("{}{}  [{}]", member.name, admin, member.id);
            }
        }

        MemberCommands::Update {
            id,
            name,
            email,
            admin,
        } => {
            let patch = MemberPatch {
                name,
                email,
                is_admin: admin,
            };
            let member = service.update_member(parse_id(&id)?, patch).await?;
            println!("Updated member '{}'", member.name);
        }

        MemberCommands::Remove { id } => {
            let member = service.remove_member(parse_id(&id)?).await?;
            println!(
                "Removed member '{}' (historical expenses are kept)",
                member.name
            );
        }
    }

    Ok(())
}

async fn run_expense_command(service: &TripService, cmd: ExpenseCommands) -> Result<()> {
    match cmd {
        ExpenseCommands::Add {
            trip,
            description,
            amount,
            category,
            paid_by,
            date,
            split_among,
        } => {
            let split_among = match split_among {
                Some(list) => parse_member_ids(&list)?,
                None => Vec::new(),
            };
            let expense = service
                .create_expense(
                    parse_id(&trip)?,
                    NewExpense {
                        description,
                        amount_cents: parse_amount(&amount)?,
                        category,
                        paid_by: parse_id(&paid_by)?,
                        date: parse_date(&date)?,
                        split_method: None,
                        split_among,
                    },
                )
                .await?;

            println!(
                "Recorded expense '{}' for {} ({})",
                expense.description,
                format_cents(expense.amount_cents),
                expense.id
            );
            for split in &expense.splits {
                println!("  {} owes {}", split.member_id, format_cents(split.amount_cents));
            }
        }

        ExpenseCommands::List { trip } => {
            let expenses = service.list_expenses(parse_id(&trip)?).await?;
            for expense in expenses {
                println!(
                    "{}  {}  {} ({})  [{}]",
                    expense.date,
                    format_cents(expense.amount_cents),
                    expense.description,
                    expense.category,
                    expense.id
                );
            }
        }

        ExpenseCommands::Update {
            id,
            description,
            category,
            amount,
            paid_by,
            date,
            split_among,
        } => {
            let patch = ExpensePatch {
                description,
                category,
                paid_by: paid_by.as_deref().map(parse_id).transpose()?,
                date: date.as_deref().map(parse_date).transpose()?,
                split_method: None,
                amount_cents: amount.as_deref().map(parse_amount).transpose()?,
                split_among: split_among.as_deref().map(parse_member_ids).transpose()?,
            };
            let expense = service.update_expense(parse_id(&id)?, patch).await?;

            println!(
                "Updated expense '{}' ({})",
                expense.description,
                format_cents(expense.amount_cents)
            );
            for split in &expense.splits {
                println!("  {} owes {}", split.member_id, format_cents(split.amount_cents));
            }
        }

        ExpenseCommands::Delete { id } => {
            let expense = service.delete_expense(parse_id(&id)?).await?;
            println!("Deleted expense '{}' and its splits", expense.description);
        }
    }

    Ok(())
}

async fn run_balance_command(service: &TripService, trip: &str) -> Result<()> {
    let report = service.trip_balances(parse_id(trip)?).await?;

    for entry in &report.entries {
        println!(
            "{:<20} {}",
            entry.member.name,
            format_cents(entry.balance)
        );
    }

    if !report.sheet.is_complete() {
        println!(
            "Note: {} split(s) and {} payment(s) reference removed members and were excluded",
            report.sheet.dropped_splits, report.sheet.dropped_payments
        );
    }

    Ok(())
}

async fn run_activity_command(service: &TripService, cmd: ActivityCommands) -> Result<()> {
    match cmd {
        ActivityCommands::Add {
            trip,
            title,
            location,
            date,
            time,
            description,
            cost,
        } => {
            let activity = service
                .add_activity(
                    parse_id(&trip)?,
                    title,
                    location,
                    parse_date(&date)?,
                    time,
                    description,
                    cost.as_deref().map(parse_amount).transpose()?,
                )
                .await?;
            println!("Added activity '{}' ({})", activity.title, activity.id);
        }

        ActivityCommands::List { trip } => {
            let activities = service.list_activities(parse_id(&trip)?).await?;
            for activity in activities {
                let cost = activity
                    .cost_cents
                    .map(format_cents)
                    .unwrap_or_else(|| "-".to_string());
                println!(
                    "{}  {} @ {}  cost {}  [{}]",
                    activity.date, activity.title, activity.location, cost, activity.id
                );
            }
        }

        ActivityCommands::Update {
            id,
            title,
            location,
            date,
            time,
            description,
            cost,
        } => {
            let patch = ActivityPatch {
                title,
                location,
                date: date.as_deref().map(parse_date).transpose()?,
                time,
                description,
                cost_cents: cost.as_deref().map(parse_amount).transpose()?,
            };
            let activity = service.update_activity(parse_id(&id)?, patch).await?;
            println!("Updated activity '{}'", activity.title);
        }

        ActivityCommands::Delete { id } => {
            let activity = service.delete_activity(parse_id(&id)?).await?;
            println!("Deleted activity '{}'", activity.title);
        }
    }

    Ok(())
}

async fn run_driver_command(service: &TripService, cmd: DriverCommands) -> Result<()> {
    match cmd {
        DriverCommands::Hire {
            trip,
            name,
            contact,
            vehicle,
            pickup,
            dropoff,
            date,
            time,
            cost,
        } => {
            let driver = service
                .hire_driver(
                    parse_id(&trip)?,
                    name,
                    contact,
                    vehicle,
                    pickup,
                    dropoff,
                    parse_date(&date)?,
                    time,
                    parse_amount(&cost)?,
                )
                .await?;
            println!("Hired driver '{}' ({})", driver.name, driver.id);
        }

        DriverCommands::List { trip } => {
            let drivers = service.list_drivers(parse_id(&trip)?).await?;
            for driver in drivers {
                println!(
                    "{}  {}  {} -> {}  {}  {}  [{}]",
                    driver.date,
                    driver.name,
                    driver.pickup_location,
                    driver.dropoff_location,
                    format_cents(driver.cost_cents),
                    driver.status,
                    driver.id
                );
            }
        }

        DriverCommands::SetStatus { id, status } => {
            let patch = DriverPatch {
                status: Some(parse_status(&status)?),
                ..Default::default()
            };
            let driver = service.update_driver(parse_id(&id)?, patch).await?;
            println!("Driver '{}' is now {}", driver.name, driver.status);
        }

        DriverCommands::Cancel { id } => {
            let driver = service.cancel_driver(parse_id(&id)?).await?;
            println!("Cancelled driver booking '{}'", driver.name);
        }
    }

    Ok(())
}

async fn run_hotel_command(service: &TripService, cmd: HotelCommands) -> Result<()> {
    match cmd {
        HotelCommands::Book {
            trip,
            name,
            location,
            check_in,
            check_out,
            room,
            guests,
            cost,
        } => {
            let hotel = service
                .book_hotel(
                    parse_id(&trip)?,
                    name,
                    location,
                    parse_date(&check_in)?,
                    parse_date(&check_out)?,
                    room,
                    guests,
                    parse_amount(&cost)?,
                )
                .await?;
            println!("Booked hotel '{}' ({})", hotel.name, hotel.id);
        }

        HotelCommands::List { trip } => {
            let hotels = service.list_hotels(parse_id(&trip)?).await?;
            for hotel in hotels {
                println!(
                    "{} -> {}  {}  {}  {}  [{}]",
                    hotel.check_in,
                    hotel.check_out,
                    hotel.name,
                    format_cents(hotel.cost_cents),
                    hotel.status,
                    hotel.id
                );
            }
        }

        HotelCommands::SetStatus { id, status } => {
            let patch = HotelPatch {
                status: Some(parse_status(&status)?),
                ..Default::default()
            };
            let hotel = service.update_hotel(parse_id(&id)?, patch).await?;
            println!("Hotel '{}' is now {}", hotel.name, hotel.status);
        }

        HotelCommands::Cancel { id } => {
            let hotel = service.cancel_hotel(parse_id(&id)?).await?;
            println!("Cancelled hotel booking '{}'", hotel.name);
        }
    }

    Ok(())
}
