//! Daily balance ledger models.
//!
//! One [`AssetBalance`] row exists per (date, base, equipment type). Every
//! movement is turned into a [`BalanceDelta`] and added to that row, so the
//! row always satisfies:
//!
//! ```text
//! closing_balance = opening_balance + purchases + transfers_in - transfers_out - expended
//! net_movement    = purchases + transfers_in - transfers_out - expended
//! ```
//!
//! `assigned` is counted but does not move inventory.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// The counter a movement increments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BalanceField {
    Purchases,
    TransfersIn,
    TransfersOut,
    Assigned,
    Expended,
}

impl BalanceField {
    pub fn as_str(&self) -> &'static str {
        match self {
            BalanceField::Purchases => "purchases",
            BalanceField::TransfersIn => "transfers_in",
            BalanceField::TransfersOut => "transfers_out",
            BalanceField::Assigned => "assigned",
            BalanceField::Expended => "expended",
        }
    }

    /// Direction in which this counter moves closing balance and net movement.
    pub fn inventory_sign(&self) -> i32 {
        match self {
            BalanceField::Purchases | BalanceField::TransfersIn => 1,
            BalanceField::TransfersOut | BalanceField::Expended => -1,
            BalanceField::Assigned => 0,
        }
    }
}

impl fmt::Display for BalanceField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Per-column increments applied to one balance row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BalanceDelta {
    pub purchases: i32,
    pub transfers_in: i32,
    pub transfers_out: i32,
    pub assigned: i32,
    pub expended: i32,
    pub closing_balance: i32,
    pub net_movement: i32,
}

impl BalanceDelta {
    /// Builds the increments for adding `amount` to `field`.
    pub fn for_field(field: BalanceField, amount: i32) -> Self {
        let mut delta = Self::default();
        match field {
            BalanceField::Purchases => delta.purchases = amount,
            BalanceField::TransfersIn => delta.transfers_in = amount,
            BalanceField::TransfersOut => delta.transfers_out = amount,
            BalanceField::Assigned => delta.assigned = amount,
            BalanceField::Expended => delta.expended = amount,
        }
        let inventory_change = field.inventory_sign() * amount;
        delta.closing_balance = inventory_change;
        delta.net_movement = inventory_change;
        delta
    }
}

/// Aggregate row of the daily ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetBalance {
    pub id: Uuid,
    pub balance_date: NaiveDate,
    pub base_id: Uuid,
    pub equipment_type_id: Uuid,
    pub opening_balance: i32,
    pub purchases: i32,
    pub transfers_in: i32,
    pub transfers_out: i32,
    pub assigned: i32,
    pub expended: i32,
    pub closing_balance: i32,
    pub net_movement: i32,
    pub last_calculated_at: DateTime<Utc>,
}

impl AssetBalance {
    /// An empty row, as the upsert creates it before applying the first delta.
    pub fn empty(balance_date: NaiveDate, base_id: Uuid, equipment_type_id: Uuid) -> Self {
        Self {
            id: Uuid::nil(),
            balance_date,
            base_id,
            equipment_type_id,
            opening_balance: 0,
            purchases: 0,
            transfers_in: 0,
            transfers_out: 0,
            assigned: 0,
            expended: 0,
            closing_balance: 0,
            net_movement: 0,
            last_calculated_at: Utc::now(),
        }
    }

    /// Adds a delta in place, mirroring the SQL upsert.
    pub fn apply(&mut self, delta: &BalanceDelta) {
        self.purchases += delta.purchases;
        self.transfers_in += delta.transfers_in;
        self.transfers_out += delta.transfers_out;
        self.assigned += delta.assigned;
        self.expended += delta.expended;
        self.closing_balance += delta.closing_balance;
        self.net_movement += delta.net_movement;
    }

    pub fn expected_net_movement(&self) -> i32 {
        self.purchases + self.transfers_in - self.transfers_out - self.expended
    }

    pub fn expected_closing_balance(&self) -> i32 {
        self.opening_balance + self.expected_net_movement()
    }

    /// True when the stored totals agree with the counters.
    pub fn is_consistent(&self) -> bool {
        self.net_movement == self.expected_net_movement()
            && self.closing_balance == self.expected_closing_balance()
    }
}
