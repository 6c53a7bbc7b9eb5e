//! Auction bids.
//!
//! The board shows the visitor's own bids first, newest at the top, followed
//! by the seeded auctions from `bids.json`.

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::catalog::Product;
use crate::types::{BidId, BidStatus, Price, ProductId};

/// How long a newly placed auction runs.
pub const AUCTION_DAYS: i64 = 7;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BidError {
    #[error("Please enter a whole-rupee bid amount.")]
    InvalidAmount,
    #[error("Bid must be higher than {minimum}")]
    TooLow { minimum: String },
}

/// One auction entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bid {
    pub id: BidId,
    pub product_id: ProductId,
    pub product_name: String,
    #[serde(default)]
    pub product_image: Option<String>,
    pub current_bid: Decimal,
    pub your_bid: Decimal,
    #[serde(default)]
    pub final_price: Option<Decimal>,
    pub time_left: String,
    pub status: BidStatus,
    pub bids: u32,
    pub end_date: DateTime<Utc>,
    pub is_active: bool,
}

impl Bid {
    #[must_use]
    pub fn current_bid_display(&self) -> String {
        Price::store(self.current_bid).display_grouped()
    }

    #[must_use]
    pub fn your_bid_display(&self) -> String {
        Price::store(self.your_bid).display_grouped()
    }

    /// Final price, falling back to the last current bid for ended auctions
    /// that never recorded one.
    #[must_use]
    pub fn final_price_display(&self) -> String {
        Price::store(self.final_price.unwrap_or(self.current_bid)).display_grouped()
    }
}

/// The bid list, shaped like `bids.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BidBoard {
    #[serde(default)]
    pub bids: Vec<Bid>,
}

impl BidBoard {
    /// Visitor bids (newest first) ahead of the seeded ones.
    #[must_use]
    pub fn combine(placed: &[Bid], seeded: &[Bid]) -> Self {
        Self {
            bids: placed.iter().chain(seeded).cloned().collect(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bids.is_empty()
    }

    pub fn active(&self) -> impl Iterator<Item = &Bid> {
        self.bids.iter().filter(|bid| bid.is_active)
    }

    pub fn past(&self) -> impl Iterator<Item = &Bid> {
        self.bids.iter().filter(|bid| !bid.is_active)
    }

    /// Id for the next bid: one past the board length.
    #[must_use]
    pub fn next_id(&self) -> BidId {
        BidId::new(i32::try_from(self.bids.len()).unwrap_or(i32::MAX - 1) + 1)
    }
}

/// Open a new auction bid on `product`.
///
/// # Errors
///
/// Returns [`BidError::InvalidAmount`] if `amount` is not a whole number and
/// [`BidError::TooLow`] unless it is strictly above the product price.
pub fn place_bid(
    product: &Product,
    amount: &str,
    id: BidId,
    now: DateTime<Utc>,
) -> Result<Bid, BidError> {
    let amount: u64 = amount.trim().parse().map_err(|_| BidError::InvalidAmount)?;
    let amount = Decimal::from(amount);
    if amount <= product.price {
        return Err(BidError::TooLow {
            minimum: Price::store(product.price).display_grouped(),
        });
    }

    Ok(Bid {
        id,
        product_id: product.id,
        product_name: product.name.clone(),
        product_image: product.primary_image().map(str::to_string),
        current_bid: amount,
        your_bid: amount,
        final_price: None,
        time_left: format!("{AUCTION_DAYS}d 0h 0m"),
        status: BidStatus::Leading,
        bids: 1,
        end_date: now + Duration::days(AUCTION_DAYS),
        is_active: true,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::cart::tests::product;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 5, 1, 10, 0, 0).unwrap()
    }

    #[test]
    fn test_place_bid_above_price() {
        let p = product(3, Decimal::from(1500));
        let bid = place_bid(&p, "1600", BidId::new(4), now()).unwrap();
        assert_eq!(bid.id, BidId::new(4));
        assert_eq!(bid.current_bid, Decimal::from(1600));
        assert_eq!(bid.your_bid, Decimal::from(1600));
        assert_eq!(bid.status, BidStatus::Leading);
        assert_eq!(bid.time_left, "7d 0h 0m");
        assert_eq!(bid.bids, 1);
        assert!(bid.is_active);
        assert_eq!(bid.end_date, Utc.with_ymd_and_hms(2026, 5, 8, 10, 0, 0).unwrap());
    }

    #[test]
    fn test_place_bid_at_or_below_price_rejected() {
        let p = product(3, Decimal::from(125_000));
        let err = place_bid(&p, "125000", BidId::new(1), now()).unwrap_err();
        assert_eq!(err.to_string(), "Bid must be higher than ₹1,25,000");
        assert!(place_bid(&p, "100", BidId::new(1), now()).is_err());
    }

    #[test]
    fn test_place_bid_rejects_non_integer() {
        let p = product(3, Decimal::from(10));
        assert_eq!(
            place_bid(&p, "12.5", BidId::new(1), now()),
            Err(BidError::InvalidAmount)
        );
        assert_eq!(
            place_bid(&p, "", BidId::new(1), now()),
            Err(BidError::InvalidAmount)
        );
    }

    #[test]
    fn test_board_split_and_next_id() {
        let p = product(1, Decimal::from(10));
        let mine = place_bid(&p, "20", BidId::new(3), now()).unwrap();
        let mut ended = mine.clone();
        ended.id = BidId::new(1);
        ended.is_active = false;
        ended.status = BidStatus::Won;

        let board = BidBoard::combine(std::slice::from_ref(&mine), &[ended]);
        assert_eq!(board.len(), 2);
        assert_eq!(board.active().count(), 1);
        assert_eq!(board.past().next().unwrap().status, BidStatus::Won);
        assert_eq!(board.next_id(), BidId::new(3));
        assert_eq!(board.bids[0], mine);
    }

    #[test]
    fn test_fixture_shape() {
        let json = r#"{ "bids": [ {
            "id": 1, "productId": 2, "productName": "Watch", "productImage": "/w.png",
            "currentBid": 15000, "yourBid": 14500, "finalPrice": 16000,
            "timeLeft": "0d 0h 0m", "status": "lost", "bids": 12,
            "endDate": "2026-02-01T10:00:00Z", "isActive": false
        } ] }"#;
        let board: BidBoard = serde_json::from_str(json).unwrap();
        let bid = &board.bids[0];
        assert_eq!(bid.status, BidStatus::Lost);
        assert_eq!(bid.final_price_display(), "₹16,000");
        assert_eq!(bid.your_bid_display(), "₹14,500");
    }
}
