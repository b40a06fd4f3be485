use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::decimal::Money;
use crate::errors::Result;
use crate::types::{
    AmountMode, AnchorEventType, AnchorType, ChargeScope, FeeCalculationType, IntervalUnit,
    SchedulePatternType, TriggerTiming,
};

/// one scheduled obligation definition within a template
///
/// field names follow the stored-template wire format (camelCase json)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateMilestone {
    pub code: String,
    pub label: String,
    /// evaluation order; ties keep input order
    pub sequence_number: i32,
    pub schedule_pattern_type: SchedulePatternType,
    pub anchor_type: AnchorType,
    /// only meaningful when anchor_type is relative_to_event
    #[serde(default)]
    pub anchor_event_type: Option<AnchorEventType>,
    /// applied to the anchor before the month offset
    #[serde(default)]
    pub anchor_offset_days: Option<i64>,
    #[serde(default)]
    pub anchor_offset_months: Option<i32>,
    /// required together with interval_value and interval_occurrences
    /// when schedule_pattern_type is recurring
    #[serde(default)]
    pub interval_unit: Option<IntervalUnit>,
    #[serde(default)]
    pub interval_value: Option<i64>,
    #[serde(default)]
    pub interval_occurrences: Option<u32>,
    pub amount_mode: AmountMode,
    /// absolute currency for fixed_amount, percentage points otherwise
    pub amount_value: Decimal,
    #[serde(default)]
    pub min_amount: Option<Money>,
    #[serde(default)]
    pub max_amount: Option<Money>,
    /// opaque, carried through to schedule items unchanged
    #[serde(default)]
    pub metadata: Map<String, Value>,
}

impl TemplateMilestone {
    /// single-occurrence milestone anchored to plan start
    pub fn single(
        code: impl Into<String>,
        label: impl Into<String>,
        sequence_number: i32,
        amount_mode: AmountMode,
        amount_value: Decimal,
    ) -> Self {
        Self {
            code: code.into(),
            label: label.into(),
            sequence_number,
            schedule_pattern_type: SchedulePatternType::Single,
            anchor_type: AnchorType::RelativeToPlanStart,
            anchor_event_type: None,
            anchor_offset_days: None,
            anchor_offset_months: None,
            interval_unit: None,
            interval_value: None,
            interval_occurrences: None,
            amount_mode,
            amount_value,
            min_amount: None,
            max_amount: None,
            metadata: Map::new(),
        }
    }

    /// recurring milestone anchored to plan start
    pub fn recurring(
        code: impl Into<String>,
        label: impl Into<String>,
        sequence_number: i32,
        amount_mode: AmountMode,
        amount_value: Decimal,
        interval_unit: IntervalUnit,
        interval_value: i64,
        interval_occurrences: u32,
    ) -> Self {
        Self {
            interval_unit: Some(interval_unit),
            interval_value: Some(interval_value),
            interval_occurrences: Some(interval_occurrences),
            schedule_pattern_type: SchedulePatternType::Recurring,
            ..Self::single(code, label, sequence_number, amount_mode, amount_value)
        }
    }

    /// anchor to a plan-level event instead of plan start
    pub fn anchored_to_event(mut self, event: AnchorEventType) -> Self {
        self.anchor_type = AnchorType::RelativeToEvent;
        self.anchor_event_type = Some(event);
        self
    }

    /// day and month offsets from the anchor date
    pub fn with_offsets(mut self, days: Option<i64>, months: Option<i32>) -> Self {
        self.anchor_offset_days = days;
        self.anchor_offset_months = months;
        self
    }

    /// min/max clamps applied after the amount formula
    pub fn with_clamps(mut self, min: Option<Money>, max: Option<Money>) -> Self {
        self.min_amount = min;
        self.max_amount = max;
        self
    }
}

/// one fee definition within a template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateFeeRule {
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// when set, the rule only applies to items from that milestone
    #[serde(default)]
    pub milestone_code: Option<String>,
    pub trigger_timing: TriggerTiming,
    pub charge_scope: ChargeScope,
    pub calculation_type: FeeCalculationType,
    /// absolute amount for fixed, percentage points otherwise
    pub rate_value: Decimal,
    #[serde(default)]
    pub min_amount: Option<Money>,
    #[serde(default)]
    pub max_amount: Option<Money>,
}

impl TemplateFeeRule {
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        trigger_timing: TriggerTiming,
        charge_scope: ChargeScope,
        calculation_type: FeeCalculationType,
        rate_value: Decimal,
    ) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            description: None,
            milestone_code: None,
            trigger_timing,
            charge_scope,
            calculation_type,
            rate_value,
            min_amount: None,
            max_amount: None,
        }
    }

    /// restrict the rule to items generated from one milestone
    pub fn for_milestone(mut self, code: impl Into<String>) -> Self {
        self.milestone_code = Some(code.into());
        self
    }

    /// min/max clamps applied after the fee formula
    pub fn with_clamps(mut self, min: Option<Money>, max: Option<Money>) -> Self {
        self.min_amount = min;
        self.max_amount = max;
        self
    }
}

/// plan-level event dates used by relative_to_event anchors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanEvents {
    #[serde(default)]
    pub booking_date: Option<NaiveDate>,
    #[serde(default)]
    pub contract_signing_date: Option<NaiveDate>,
    #[serde(default)]
    pub handover_date: Option<NaiveDate>,
}

impl PlanEvents {
    /// date recorded for the given event, if any
    pub fn event_date(&self, event: AnchorEventType) -> Option<NaiveDate> {
        match event {
            AnchorEventType::Booking => self.booking_date,
            AnchorEventType::ContractSigning => self.contract_signing_date,
            AnchorEventType::Handover => self.handover_date,
        }
    }
}

/// declarative payment-plan template: milestones plus fee rules
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateConfig {
    #[serde(default)]
    pub milestones: Vec<TemplateMilestone>,
    #[serde(default)]
    pub fee_rules: Vec<TemplateFeeRule>,
}

impl TemplateConfig {
    pub fn new(milestones: Vec<TemplateMilestone>, fee_rules: Vec<TemplateFeeRule>) -> Self {
        Self { milestones, fee_rules }
    }

    /// load a template from a stored json record
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// serialize for storage
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// serialize for display/debugging
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
