//! # Scripted Session
//!
//! A headless walk through the showroom: search, filter, pick a vehicle,
//! fill both wizard steps and submit. The binary runs it on startup; it is
//! also the end-to-end test of the controller.

use chrono::{Days, NaiveDate};
use rental_booking::BookingConfirmation;
use rental_core::{PaymentDetails, PersonalInfo};
use tracing::info;

use crate::commands::booking::SubmitResponse;
use crate::error::ApiError;
use crate::showroom::Showroom;

/// Days between "today" and the scripted pickup date.
const LEAD_DAYS: u64 = 7;

/// Length of the scripted rental, in nights.
const NIGHTS: u64 = 3;

/// Books the first available SUV in Santo Domingo a week from `today`.
pub async fn scripted_session(showroom: &Showroom, today: NaiveDate) -> Result<BookingConfirmation, ApiError> {
    let pickup = today + Days::new(LEAD_DAYS);
    let dropoff = pickup + Days::new(NIGHTS);

    showroom.search("santo-domingo", &pickup.to_string(), &dropoff.to_string(), today)?;
    showroom.apply_filter(Some("SUV".to_string()), None);

    let view = showroom.view().await?;
    info!(
        matches = view.vehicles.len(),
        popular = view.popular.len(),
        %pickup,
        %dropoff,
        "Search applied"
    );

    let card = view
        .vehicles
        .first()
        .ok_or_else(|| ApiError::not_found("Vehicle", "SUV in Santo Domingo"))?;
    info!(vehicle = %card.vehicle.name, quote = %card.quote, days = card.days, "Vehicle selected");

    if let Some(applied) = showroom.offer_for(card.vehicle.id, today)? {
        info!(offer = applied.offer.title(), total = %applied.total, "Offer available");
    }

    showroom.start_booking(card.vehicle.id).await?;
    showroom
        .update_personal(PersonalInfo {
            full_name: "María Rodríguez".to_string(),
            national_id: "402-2345678-1".to_string(),
            phone: "829-555-0199".to_string(),
        })
        .await?;
    expect_step(showroom.submit_booking().await?, "advance to payment")?;

    let summary = showroom
        .update_payment(PaymentDetails {
            cardholder_name: "MARIA RODRIGUEZ".to_string(),
            card_number: "4111111111111111".to_string(),
            expiry: "0929".to_string(),
            cvv: "321".to_string(),
        })
        .await?;
    info!(total = %summary.total, phase = %summary.phase, "Payment entered");

    match showroom.submit_booking().await? {
        SubmitResponse::Completed { confirmation } => Ok(confirmation),
        other => Err(unexpected(&other, "complete")),
    }
}

fn expect_step(response: SubmitResponse, action: &str) -> Result<(), ApiError> {
    match response {
        SubmitResponse::AdvancedToPayment { .. } => Ok(()),
        other => Err(unexpected(&other, action)),
    }
}

fn unexpected(response: &SubmitResponse, action: &str) -> ApiError {
    ApiError::internal(format!("Booking did not {}: {:?}", action, response))
}
