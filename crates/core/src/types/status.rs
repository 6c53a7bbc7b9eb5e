//! Status enums for orders and bids.

use serde::{Deserialize, Serialize};

/// Status recorded on an order when it is created.
///
/// Orders are never updated after creation, so this only records which flow
/// produced them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    /// Placed from the checkout page without going through payment.
    #[serde(rename = "Order Placed")]
    OrderPlaced,
    /// Paid through the payment gateway.
    #[serde(rename = "Confirmed")]
    Confirmed,
}

impl OrderStatus {
    /// The label shown to shoppers.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::OrderPlaced => "Order Placed",
            Self::Confirmed => "Confirmed",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Standing of the shopper's bid in an auction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BidStatus {
    /// Active auction, shopper holds the highest bid.
    Leading,
    /// Active auction, someone bid higher.
    Outbid,
    /// Ended auction the shopper won.
    Won,
    /// Ended auction the shopper lost.
    Lost,
}

impl BidStatus {
    /// The label shown on the bid chip.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Leading => "Leading",
            Self::Outbid => "Outbid",
            Self::Won => "Won",
            Self::Lost => "Lost",
        }
    }

    /// Whether the chip is rendered in the success colour.
    #[must_use]
    pub const fn is_favourable(self) -> bool {
        matches!(self, Self::Leading | Self::Won)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_order_status_serializes_as_label() {
        assert_eq!(
            serde_json::to_string(&OrderStatus::OrderPlaced).unwrap(),
            "\"Order Placed\""
        );
        assert_eq!(
            serde_json::from_str::<OrderStatus>("\"Confirmed\"").unwrap(),
            OrderStatus::Confirmed
        );
    }

    #[test]
    fn test_bid_status_snake_case() {
        assert_eq!(
            serde_json::from_str::<BidStatus>("\"outbid\"").unwrap(),
            BidStatus::Outbid
        );
        assert!(BidStatus::Won.is_favourable());
        assert!(!BidStatus::Lost.is_favourable());
    }
}
