//! # Special Offers
//!
//! Promotions advertised on the landing page, evaluated against a quote.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Offer                  Condition                       Discount        │
//! │  ─────────────────────  ──────────────────────────────  ─────────────   │
//! │  Reserva Anticipada     pickup >= booked_on + 7 days    10% of quote    │
//! │  Fin de Semana 3x2      Friday pickup, 4 inclusive days one daily price │
//! │                         (Friday to Monday)                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Offers never stack: [`best_offer`] picks the larger discount, preferring
//! early booking on a tie. The plain quote from [`quote`](crate::quote) is
//! never changed by this module.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::quote::quote;
use crate::types::RentalPeriod;
use crate::{EARLY_BOOKING_DISCOUNT_BPS, EARLY_BOOKING_MIN_DAYS};

/// Days covered by the weekend offer (Friday through Monday).
const WEEKEND_OFFER_DAYS: i64 = 4;

/// A promotion a rental can qualify for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub enum Offer {
    /// 10% off when booking at least a week ahead.
    EarlyBooking,
    /// Rent Friday to Monday, pay one day less.
    WeekendThreeForTwo,
}

impl Offer {
    /// Every offer, in tie-break order.
    pub const ALL: [Offer; 2] = [Offer::EarlyBooking, Offer::WeekendThreeForTwo];

    pub const fn title(&self) -> &'static str {
        match self {
            Offer::EarlyBooking => "Reserva Anticipada",
            Offer::WeekendThreeForTwo => "Oferta de Fin de Semana",
        }
    }

    /// Discount this offer grants, or `None` if the rental does not qualify.
    pub fn discount(&self, daily: Money, period: RentalPeriod, booked_on: NaiveDate) -> Option<Money> {
        match self {
            Offer::EarlyBooking => {
                let lead_days = (period.start() - booked_on).num_days();
                (lead_days >= EARLY_BOOKING_MIN_DAYS)
                    .then(|| quote(daily, Some(period)).percentage(EARLY_BOOKING_DISCOUNT_BPS))
            }
            Offer::WeekendThreeForTwo => {
                let qualifies = period.start().weekday() == Weekday::Fri
                    && period.days() == WEEKEND_OFFER_DAYS;
                qualifies.then_some(daily)
            }
        }
    }
}

/// An offer applied to a specific quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct AppliedOffer {
    pub offer: Offer,
    pub discount: Money,
    /// Quote after the discount; never negative.
    pub total: Money,
}

/// Returns the best offer for renting at `daily` over `period`, booked on
/// `booked_on`.
///
/// Rentals without a period and zero-value discounts yield `None`.
///
/// ## Example
/// ```rust
/// use chrono::NaiveDate;
/// use rental_core::money::Money;
/// use rental_core::offers::{best_offer, Offer};
/// use rental_core::types::RentalPeriod;
///
/// let booked_on = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
/// let period = RentalPeriod::new(
///     NaiveDate::from_ymd_opt(2024, 6, 10).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 6, 11).unwrap(),
/// ).unwrap();
///
/// let applied = best_offer(Money::from_pesos(3000), Some(period), booked_on).unwrap();
/// assert_eq!(applied.offer, Offer::EarlyBooking);
/// assert_eq!(applied.total, Money::from_pesos(5400));
/// ```
pub fn best_offer(daily: Money, period: Option<RentalPeriod>, booked_on: NaiveDate) -> Option<AppliedOffer> {
    let period = period?;
    let full = quote(daily, Some(period));

    let mut best: Option<(Offer, Money)> = None;
    for offer in Offer::ALL {
        let Some(discount) = offer.discount(daily, period, booked_on) else {
            continue;
        };
        // Strictly greater keeps the earlier offer on a tie
        if best.map_or(true, |(_, current)| discount > current) {
            best = Some((offer, discount));
        }
    }

    let (offer, discount) = best?;
    let discount = discount.min(full);
    if discount.is_zero() || discount.is_negative() {
        return None;
    }

    Some(AppliedOffer {
        offer,
        discount,
        total: full - discount,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn period(start: NaiveDate, end: NaiveDate) -> RentalPeriod {
        RentalPeriod::new(start, end).unwrap()
    }

    #[test]
    fn test_no_period_no_offer() {
        assert!(best_offer(Money::from_pesos(3000), None, date(2024, 6, 1)).is_none());
    }

    #[test]
    fn test_early_booking_threshold() {
        let daily = Money::from_pesos(1000);
        let booked_on = date(2024, 6, 3); // Monday

        // Six days ahead: not early enough
        let p = period(date(2024, 6, 9), date(2024, 6, 10));
        assert!(best_offer(daily, Some(p), booked_on).is_none());

        // Exactly seven days ahead
        let p = period(date(2024, 6, 10), date(2024, 6, 11));
        let applied = best_offer(daily, Some(p), booked_on).unwrap();
        assert_eq!(applied.offer, Offer::EarlyBooking);
        assert_eq!(applied.discount, Money::from_pesos(200));
        assert_eq!(applied.total, Money::from_pesos(1800));
    }

    #[test]
    fn test_weekend_three_for_two() {
        let daily = Money::from_pesos(4500);
        // 2024-06-07 is a Friday; booked the day before
        let p = period(date(2024, 6, 7), date(2024, 6, 10));
        let applied = best_offer(daily, Some(p), date(2024, 6, 6)).unwrap();
        assert_eq!(applied.offer, Offer::WeekendThreeForTwo);
        assert_eq!(applied.discount, daily);
        assert_eq!(applied.total, Money::from_pesos(13_500));
    }

    #[test]
    fn test_weekend_offer_needs_friday_to_monday() {
        let daily = Money::from_pesos(4500);
        let booked_on = date(2024, 6, 6);
        // Friday to Sunday is only three days
        let p = period(date(2024, 6, 7), date(2024, 6, 9));
        assert!(best_offer(daily, Some(p), booked_on).is_none());
        // Saturday start
        let p = period(date(2024, 6, 8), date(2024, 6, 11));
        assert!(best_offer(daily, Some(p), booked_on).is_none());
    }

    #[test]
    fn test_larger_discount_wins() {
        let daily = Money::from_pesos(1000);
        // Friday to Monday, booked two weeks ahead:
        // early booking = 10% of 4000 = 400; weekend = 1000
        let p = period(date(2024, 6, 21), date(2024, 6, 24));
        let applied = best_offer(daily, Some(p), date(2024, 6, 7)).unwrap();
        assert_eq!(applied.offer, Offer::WeekendThreeForTwo);
        assert_eq!(applied.total, Money::from_pesos(3000));
    }

    #[test]
    fn test_offers_never_stack() {
        let daily = Money::from_pesos(1000);
        let p = period(date(2024, 6, 21), date(2024, 6, 24));
        let applied = best_offer(daily, Some(p), date(2024, 6, 7)).unwrap();
        let full = quote(daily, Some(p));
        assert_eq!(applied.total + applied.discount, full);
    }

    #[test]
    fn test_free_vehicle_has_no_offer() {
        let p = period(date(2024, 6, 21), date(2024, 6, 24));
        assert!(best_offer(Money::zero(), Some(p), date(2024, 6, 1)).is_none());
    }

    #[test]
    fn test_offer_titles() {
        assert_eq!(Offer::EarlyBooking.title(), "Reserva Anticipada");
        assert_eq!(Offer::WeekendThreeForTwo.title(), "Oferta de Fin de Semana");
    }
}
