//! # Booking Flow
//!
//! The two-step booking wizard as an explicit state machine.
//!
//! ## State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Booking Flow States                              │
//! │                                                                         │
//! │   ┌──────────────┐  submit   ┌──────────┐  submit   ┌────────────┐      │
//! │   │ PersonalInfo │─────────► │ Payment  │─────────► │ Submitting │      │
//! │   └──────┬───────┘  (valid)  └────┬─────┘  (valid)  └─────┬──────┘      │
//! │          │                        │   ▲                   │             │
//! │          │ invalid: stay,         │   │ fail_submission() │ complete()  │
//! │          │ report fields          │   └───────────────────┤             │
//! │          │                        │                       ▼             │
//! │          │                        │               ┌─────────────┐       │
//! │          │                        │               │  Completed  │       │
//! │          │                        │               └─────────────┘       │
//! │          ▼                        ▼                                     │
//! │      close(): the owner drops the draft from any state                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Internally the draft keeps two fields, `step` and `status`; the four
//! observable states are [`BookingPhase`]. There is no transition back from
//! `Payment` to `PersonalInfo`.
//!
//! This module performs no I/O. The asynchronous confirmation call and its
//! single-flight/cancellation rules live in `rental-booking`, which drives
//! the draft through [`BookingDraft::submit`], [`BookingDraft::complete`]
//! and [`BookingDraft::fail_submission`].

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::{CoreError, CoreResult, ValidationErrors};
use crate::input::{format_card_number, format_cvv, format_expiry};
use crate::money::Money;
use crate::quote::{billed_days, quote};
use crate::types::{Location, RentalPeriod, Vehicle, VehicleId};
use crate::validation::{
    validate_card_number, validate_cardholder_name, validate_cvv, validate_expiry,
    validate_full_name, validate_national_id, validate_phone,
};

// =============================================================================
// States
// =============================================================================

/// Which form the wizard is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub enum BookingStep {
    #[default]
    PersonalInfo,
    Payment,
}

/// Progress of the confirmation call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Submitting,
    Completed,
}

/// The observable state of a draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub enum BookingPhase {
    PersonalInfo,
    Payment,
    Submitting,
    Completed,
}

impl BookingPhase {
    pub const fn as_str(&self) -> &'static str {
        match self {
            BookingPhase::PersonalInfo => "collecting personal info",
            BookingPhase::Payment => "collecting payment",
            BookingPhase::Submitting => "submitting",
            BookingPhase::Completed => "completed",
        }
    }
}

impl fmt::Display for BookingPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Form Data
// =============================================================================

/// Step one of the wizard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInfo {
    pub full_name: String,
    /// Cédula or passport number.
    pub national_id: String,
    pub phone: String,
}

impl PersonalInfo {
    /// Checks every field, reporting all failures at once.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.check(validate_full_name(&self.full_name));
        errors.check(validate_national_id(&self.national_id));
        errors.check(validate_phone(&self.phone));
        errors.into_result()
    }
}

/// Step two of the wizard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDetails {
    pub cardholder_name: String,
    /// Digits grouped in fours, e.g. `4111 1111 1111 1111`.
    pub card_number: String,
    /// `MM/YY`.
    pub expiry: String,
    pub cvv: String,
}

impl PaymentDetails {
    /// Applies the input formatters to raw form text.
    pub fn normalized(self) -> Self {
        PaymentDetails {
            card_number: format_card_number(&self.card_number),
            expiry: format_expiry(&self.expiry),
            cvv: format_cvv(&self.cvv),
            cardholder_name: self.cardholder_name,
        }
    }

    /// Checks every field, reporting all failures at once.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.check(validate_cardholder_name(&self.cardholder_name));
        errors.check(validate_card_number(&self.card_number));
        errors.check(validate_expiry(&self.expiry));
        errors.check(validate_cvv(&self.cvv));
        errors.into_result()
    }
}

// =============================================================================
// Booking Request
// =============================================================================

/// Everything the booking service needs, frozen at submission time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    #[ts(as = "String")]
    pub draft_id: Uuid,
    pub vehicle_id: VehicleId,
    pub vehicle_name: String,
    #[ts(as = "Option<String>")]
    pub start_date: Option<NaiveDate>,
    #[ts(as = "Option<String>")]
    pub end_date: Option<NaiveDate>,
    /// Pickup location label.
    pub location: String,
    pub personal: PersonalInfo,
    pub payment: PaymentDetails,
    pub days: i64,
    pub total: Money,
}

/// What a call to [`BookingDraft::submit`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Personal info was valid; the wizard now shows the payment form.
    AdvancedToPayment,
    /// Payment was valid; the draft is `Submitting` and the request must be
    /// sent to the booking service.
    ReadyToSubmit(BookingRequest),
    /// A submission is already in flight. Nothing changed.
    Ignored,
}

/// Read-only summary of a draft for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct BookingSummary {
    #[ts(as = "String")]
    pub draft_id: Uuid,
    pub vehicle_id: VehicleId,
    pub vehicle_name: String,
    pub location: String,
    pub period: Option<RentalPeriod>,
    pub days: i64,
    pub daily_price: Money,
    pub total: Money,
    pub phase: BookingPhase,
    pub personal: PersonalInfo,
    pub payment: PaymentDetails,
}

// =============================================================================
// Booking Draft
// =============================================================================

/// An in-progress booking for one vehicle.
///
/// The draft refers to its vehicle by id and snapshots only the name and
/// daily price, so a quote shown in the wizard cannot drift from the one
/// shown on the vehicle card.
#[derive(Debug, Clone)]
pub struct BookingDraft {
    id: Uuid,
    vehicle_id: VehicleId,
    vehicle_name: String,
    daily_price: Money,
    location: String,
    period: Option<RentalPeriod>,
    personal: PersonalInfo,
    payment: PaymentDetails,
    step: BookingStep,
    status: SubmissionStatus,
}

impl BookingDraft {
    /// Starts a draft at `PersonalInfo`.
    ///
    /// `period` comes from already validated search criteria.
    pub fn new(vehicle: &Vehicle, location: &str, period: Option<RentalPeriod>) -> Self {
        BookingDraft {
            id: Uuid::new_v4(),
            vehicle_id: vehicle.id,
            vehicle_name: vehicle.name.clone(),
            daily_price: vehicle.price(),
            location: location.to_string(),
            period,
            personal: PersonalInfo::default(),
            payment: PaymentDetails::default(),
            step: BookingStep::default(),
            status: SubmissionStatus::default(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn vehicle_id(&self) -> VehicleId {
        self.vehicle_id
    }

    pub fn step(&self) -> BookingStep {
        self.step
    }

    pub fn status(&self) -> SubmissionStatus {
        self.status
    }

    pub fn personal(&self) -> &PersonalInfo {
        &self.personal
    }

    pub fn payment(&self) -> &PaymentDetails {
        &self.payment
    }

    pub fn period(&self) -> Option<RentalPeriod> {
        self.period
    }

    /// The current observable state.
    pub fn phase(&self) -> BookingPhase {
        match (self.status, self.step) {
            (SubmissionStatus::Completed, _) => BookingPhase::Completed,
            (SubmissionStatus::Submitting, _) => BookingPhase::Submitting,
            (SubmissionStatus::Idle, BookingStep::PersonalInfo) => BookingPhase::PersonalInfo,
            (SubmissionStatus::Idle, BookingStep::Payment) => BookingPhase::Payment,
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.status == SubmissionStatus::Submitting
    }

    /// Pickup location as displayed to the user.
    pub fn location_label(&self) -> String {
        Location::pickup_label(&self.location)
    }

    /// Rental total via the quote calculator.
    pub fn total(&self) -> Money {
        quote(self.daily_price, self.period)
    }

    /// Replaces the personal fields.
    ///
    /// Only allowed while the personal form is showing.
    pub fn update_personal(&mut self, personal: PersonalInfo) -> CoreResult<()> {
        self.require_phase(BookingPhase::PersonalInfo, "edit personal details")?;
        self.personal = personal;
        Ok(())
    }

    /// Replaces the payment fields, normalizing card number, expiry and CVV.
    ///
    /// Only allowed while the payment form is showing and nothing is in
    /// flight.
    pub fn update_payment(&mut self, payment: PaymentDetails) -> CoreResult<()> {
        self.require_phase(BookingPhase::Payment, "edit payment details")?;
        self.payment = payment.normalized();
        Ok(())
    }

    /// Handles the form's submit action for the current step.
    ///
    /// ## Errors
    /// - `InvalidFields` listing every failed field; the state is unchanged
    /// - `InvalidTransition` once the booking is completed
    ///
    /// ## Example
    /// ```rust
    /// use rental_core::booking::{BookingDraft, BookingPhase, PersonalInfo, SubmitOutcome};
    /// use rental_core::catalog::Catalog;
    ///
    /// let catalog = Catalog::fleet();
    /// let mut draft = BookingDraft::new(catalog.get(1).unwrap(), "punta-cana", None);
    /// draft.update_personal(PersonalInfo {
    ///     full_name: "Ana Pérez".into(),
    ///     national_id: "001-1234567-8".into(),
    ///     phone: "809-555-0101".into(),
    /// }).unwrap();
    ///
    /// assert_eq!(draft.submit().unwrap(), SubmitOutcome::AdvancedToPayment);
    /// assert_eq!(draft.phase(), BookingPhase::Payment);
    /// ```
    pub fn submit(&mut self) -> CoreResult<SubmitOutcome> {
        match self.phase() {
            BookingPhase::Submitting => Ok(SubmitOutcome::Ignored),
            BookingPhase::Completed => Err(self.invalid_transition("submit")),
            BookingPhase::PersonalInfo => {
                self.personal.validate()?;
                self.step = BookingStep::Payment;
                Ok(SubmitOutcome::AdvancedToPayment)
            }
            BookingPhase::Payment => {
                self.payment.validate()?;
                self.status = SubmissionStatus::Submitting;
                Ok(SubmitOutcome::ReadyToSubmit(self.request()))
            }
        }
    }

    /// The booking service confirmed: `Submitting → Completed`.
    pub fn complete(&mut self) -> CoreResult<()> {
        self.require_phase(BookingPhase::Submitting, "complete")?;
        self.status = SubmissionStatus::Completed;
        Ok(())
    }

    /// The booking service failed: `Submitting → Payment`, keeping every
    /// entered field so the user can retry.
    pub fn fail_submission(&mut self) -> CoreResult<()> {
        self.require_phase(BookingPhase::Submitting, "record a failed submission")?;
        self.status = SubmissionStatus::Idle;
        Ok(())
    }

    /// Freezes the draft into a service request.
    pub fn request(&self) -> BookingRequest {
        BookingRequest {
            draft_id: self.id,
            vehicle_id: self.vehicle_id,
            vehicle_name: self.vehicle_name.clone(),
            start_date: self.period.map(|p| p.start()),
            end_date: self.period.map(|p| p.end()),
            location: self.location_label(),
            personal: self.personal.clone(),
            payment: self.payment.clone(),
            days: billed_days(self.period),
            total: self.total(),
        }
    }

    pub fn summary(&self) -> BookingSummary {
        BookingSummary {
            draft_id: self.id,
            vehicle_id: self.vehicle_id,
            vehicle_name: self.vehicle_name.clone(),
            location: self.location_label(),
            period: self.period,
            days: billed_days(self.period),
            daily_price: self.daily_price,
            total: self.total(),
            phase: self.phase(),
            personal: self.personal.clone(),
            payment: self.payment.clone(),
        }
    }

    fn require_phase(&self, expected: BookingPhase, action: &str) -> CoreResult<()> {
        if self.phase() == expected {
            Ok(())
        } else {
            Err(self.invalid_transition(action))
        }
    }

    fn invalid_transition(&self, action: &str) -> CoreError {
        CoreError::InvalidTransition {
            state: self.phase().to_string(),
            action: action.to_string(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
