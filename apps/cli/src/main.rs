use std::env;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use chrono::{Local, NaiveDate};
use dotenv::dotenv;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use auth_cell::models::LoginRequest;
use auth_cell::{AuthService, SessionStore};
use booking_cell::services::booking::BookingService;
use booking_cell::BookingController;
use shared_config::AppConfig;

const USAGE: &str = "Usage:
  medibook availability <doctor_id> [YYYY-MM-DD]
  medibook book <doctor_id> <YYYY-MM-DD> <HH:MM> [description]
  medibook appointments

Credentials are read from CLINIC_USERNAME / CLINIC_PASSWORD; the service
base URL from CLINIC_API_URL.";

#[tokio::main]
async fn main() -> Result<()> {
    // Loading Env Vars
    dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env();
    let sessions = Arc::new(SessionStore::new());

    let args: Vec<String> = env::args().skip(1).collect();
    let Some(command) = args.first() else {
        bail!("{}", USAGE);
    };

    login(&config, Arc::clone(&sessions)).await?;

    match command.as_str() {
        "availability" => {
            let doctor_id = parse_doctor_id(args.get(1))?;
            let date = args.get(2).map(|raw| parse_date(raw)).transpose()?;
            show_availability(&config, sessions, doctor_id, date).await
        }
        "book" => {
            let doctor_id = parse_doctor_id(args.get(1))?;
            let date = parse_date(args.get(2).context("missing appointment date")?)?;
            let time = args.get(3).context("missing appointment time")?;
            let description = args.get(4).cloned().unwrap_or_default();
            book(&config, sessions, doctor_id, date, time, &description).await
        }
        "appointments" => list_appointments(&config, sessions).await,
        _ => bail!("Unknown command '{}'\n\n{}", command, USAGE),
    }
}

async fn login(config: &AppConfig, sessions: Arc<SessionStore>) -> Result<()> {
    let request = LoginRequest {
        username: env::var("CLINIC_USERNAME").unwrap_or_default(),
        password: env::var("CLINIC_PASSWORD").unwrap_or_default(),
    };

    let auth = AuthService::new(config, sessions);
    let redirect = auth
        .login(&request)
        .await
        .context("login failed")?;

    info!("Logged in, landing page: {}", redirect.location);
    Ok(())
}

async fn show_availability(
    config: &AppConfig,
    sessions: Arc<SessionStore>,
    doctor_id: i64,
    date: Option<NaiveDate>,
) -> Result<()> {
    let mut controller = BookingController::new(config, sessions, Local::now().date_naive());

    controller
        .doctor_changed(Some(doctor_id))
        .await
        .context("could not fetch doctor availability")?;

    let calendar = controller
        .workflow()
        .calendar()
        .context("no availability returned")?;

    println!("Selectable dates over the next two weeks:");
    for date in calendar.selectable_through(14) {
        println!("  {}", date);
    }

    if let Some(date) = date {
        controller
            .date_picked(date)
            .await
            .context("could not fetch time slots")?;

        if let Some(slots) = controller.workflow().slots() {
            println!("Time slots on {}:", date);
            for option in slots.options() {
                println!("  {}", option);
            }
        }
        if let Some(status) = controller.workflow().status() {
            println!("{}", status.text);
        }
    }

    Ok(())
}

async fn book(
    config: &AppConfig,
    sessions: Arc<SessionStore>,
    doctor_id: i64,
    date: NaiveDate,
    time: &str,
    description: &str,
) -> Result<()> {
    let mut controller = BookingController::new(config, sessions, Local::now().date_naive());

    controller.doctor_changed(Some(doctor_id)).await?;
    controller.date_picked(date).await?;
    controller.time_picked(time)?;

    let redirect = controller.submit(description).await?;

    if let Some(status) = controller.workflow().status() {
        println!("{}", status.text);
    }

    tokio::time::sleep(redirect.delay).await;
    info!("Navigating to {}", redirect.location);
    Ok(())
}

async fn list_appointments(config: &AppConfig, sessions: Arc<SessionStore>) -> Result<()> {
    let booking = BookingService::new(config, sessions);
    let appointments = booking.my_appointments().await?;

    if appointments.is_empty() {
        println!("No appointments booked yet");
        return Ok(());
    }

    for appointment in appointments {
        println!(
            "#{} doctor {} at {}",
            appointment.appointment_id, appointment.doctor_id, appointment.appointment_date
        );
    }
    Ok(())
}

fn parse_doctor_id(raw: Option<&String>) -> Result<i64> {
    raw.context("missing doctor id")?
        .parse()
        .context("doctor id must be a number")
}

fn parse_date(raw: &str) -> Result<NaiveDate> {
    raw.parse().context("dates must be YYYY-MM-DD")
}
