use serde::{Deserialize, Serialize};

/// how a milestone expands into schedule items
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchedulePatternType {
    /// exactly one schedule item
    Single,
    /// a run of items at a fixed interval
    Recurring,
}

/// what a milestone's base due date is anchored to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnchorType {
    /// milestones do not carry their own calendar date yet, so this
    /// resolves to plan start like relative_to_plan_start
    AbsoluteDate,
    RelativeToPlanStart,
    RelativeToEvent,
}

/// plan-level event a milestone can anchor to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnchorEventType {
    Booking,
    ContractSigning,
    Handover,
}

/// unit for recurring milestone steps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntervalUnit {
    Days,
    Months,
}

/// how a milestone's principal amount is computed
///
/// unrecognized modes deserialize to Unknown and produce a zero amount,
/// partial templates must keep generating rather than crash
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmountMode {
    FixedAmount,
    PercentageOfPrincipal,
    PercentageOfRemainingPrincipal,
    /// placeholder for custom formulas, currently identical to
    /// percentage_of_principal
    Formula,
    #[serde(other)]
    Unknown,
}

/// when a fee rule fires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerTiming {
    OnMilestoneDue,
    /// standalone one-time charge, never attached to a milestone item
    OnPlanCreation,
    OnBooking,
    OnContractSigning,
    OnHandover,
    #[serde(other)]
    Unknown,
}

/// what a fee rule is charged against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChargeScope {
    /// whole-plan fee, reserved for a separate plan-level fee path
    Plan,
    Installment,
    #[serde(other)]
    Other,
}

impl ChargeScope {
    /// plan-scoped rules are never evaluated per schedule item
    pub fn applies_per_item(&self) -> bool {
        !matches!(self, ChargeScope::Plan)
    }
}

/// how a fee amount is computed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeeCalculationType {
    Fixed,
    PercentageOfPrincipal,
    PercentageOfInstallment,
    PercentageOfOutstanding,
    #[serde(other)]
    Unknown,
}

/// lifecycle status of a schedule item
///
/// the generator only emits Pending, the rest belong to the persisted
/// plan-instance lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemStatus {
    Pending,
    Paid,
    Overdue,
    Waived,
    Cancelled,
}
