use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::amounts::calculate_milestone_amount;
use crate::anchor::{advance_due_date, apply_anchor_offsets, resolve_anchor_date};
use crate::decimal::Money;
use crate::errors::{PlanError, Result};
use crate::fees::calculate_fees_for_item;
use crate::template::{PlanEvents, TemplateConfig, TemplateMilestone};
use crate::types::{AnchorType, IntervalUnit, ItemStatus, SchedulePatternType};

/// input to schedule generation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleGenerationParams {
    pub template: TemplateConfig,
    pub principal_amount: Money,
    pub currency: String,
    pub start_date: NaiveDate,
    #[serde(default)]
    pub events: PlanEvents,
}

/// one concrete payment obligation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleItem {
    /// stable per occurrence: milestone code plus sequence position
    pub id: String,
    pub template_milestone_code: String,
    /// 1-based within the milestone's recurrence
    pub occurrence_index: u32,
    /// None only when calendar arithmetic overflowed; such items sort last
    pub due_date: Option<NaiveDate>,
    /// true whenever the milestone is not anchored to an absolute date
    pub is_due_date_estimated: bool,
    pub principal_due: Money,
    /// interest is out of scope for plan templates, always zero
    pub interest_due: Money,
    pub fees_due: Money,
    pub amount_due: Money,
    pub status: ItemStatus,
    /// copied from the originating milestone unchanged
    pub metadata: Map<String, Value>,
}

/// generated schedule with reconciled totals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleGenerationResult {
    pub schedule_items: Vec<ScheduleItem>,
    pub total_principal: Money,
    pub total_interest: Money,
    pub total_fees: Money,
    pub total_amount: Money,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// generate a payment schedule from a template
///
/// computation runs in milestone-sequence order so that the running
/// remaining-principal balance is well defined; the item list is then
/// re-sorted by due date for presentation. the two orderings are distinct
/// and must stay that way, percentage_of_remaining amounts depend on it.
///
/// malformed templates degrade instead of failing: unknown modes produce
/// zero amounts, missing event dates fall back to plan start. callers that
/// want hard validation run `validate_template_config` first.
pub fn generate_schedule(params: &ScheduleGenerationParams) -> Result<ScheduleGenerationResult> {
    if params.principal_amount.is_negative() {
        return Err(PlanError::InvalidPrincipal {
            amount: params.principal_amount,
        });
    }

    let mut milestones: Vec<&TemplateMilestone> = params.template.milestones.iter().collect();
    milestones.sort_by_key(|m| m.sequence_number);

    let principal_amount = params.principal_amount;
    let fee_rules = params.template.fee_rules.as_slice();

    let mut remaining_principal = principal_amount;
    let mut sequence_counter: u32 = 1;
    let mut items: Vec<ScheduleItem> = Vec::new();

    for milestone in milestones {
        let anchor = resolve_anchor_date(
            params.start_date,
            &params.events,
            milestone.anchor_type,
            milestone.anchor_event_type,
        );
        let base_due = apply_anchor_offsets(
            anchor,
            milestone.anchor_offset_days,
            milestone.anchor_offset_months,
        );
        let estimated = milestone.anchor_type != AnchorType::AbsoluteDate;

        match milestone.schedule_pattern_type {
            SchedulePatternType::Single => {
                let principal_due =
                    calculate_milestone_amount(milestone, principal_amount, remaining_principal);
                let fees_due = calculate_fees_for_item(
                    &milestone.code,
                    principal_due,
                    fee_rules,
                    principal_amount,
                    remaining_principal,
                );
                remaining_principal -= principal_due;

                items.push(build_item(
                    milestone,
                    1,
                    sequence_counter,
                    base_due,
                    estimated,
                    principal_due,
                    fees_due,
                ));
                sequence_counter += 1;
            }
            SchedulePatternType::Recurring => {
                let occurrences = milestone.interval_occurrences.unwrap_or(1).max(1);
                let unit = milestone.interval_unit.unwrap_or(IntervalUnit::Days);
                let step = milestone.interval_value.unwrap_or(0);
                let mut current_due = base_due;

                for occurrence in 1..=occurrences {
                    let principal_due =
                        calculate_milestone_amount(milestone, principal_amount, remaining_principal);
                    let fees_due = calculate_fees_for_item(
                        &milestone.code,
                        principal_due,
                        fee_rules,
                        principal_amount,
                        remaining_principal,
                    );
                    remaining_principal -= principal_due;

                    items.push(build_item(
                        milestone,
                        occurrence,
                        sequence_counter + occurrence - 1,
                        current_due,
                        estimated,
                        principal_due,
                        fees_due,
                    ));

                    // advance after the occurrence, never before the first
                    current_due = current_due.and_then(|date| advance_due_date(date, unit, step));
                }
                sequence_counter += occurrences;
            }
        }
    }

    // presentation order: due date ascending, undated items last
    items.sort_by_key(|item| (item.due_date.is_none(), item.due_date));

    for (index, item) in items.iter_mut().enumerate() {
        if item.id.is_empty() {
            item.id = format!("item-{}", index + 1);
        }
    }

    let total_principal = items
        .iter()
        .map(|item| item.principal_due)
        .fold(Money::ZERO, |acc, x| acc + x);
    let total_fees = items
        .iter()
        .map(|item| item.fees_due)
        .fold(Money::ZERO, |acc, x| acc + x);
    let total_amount = total_principal + total_fees;
    let end_date = items
        .iter()
        .rev()
        .find_map(|item| item.due_date)
        .unwrap_or(params.start_date);

    Ok(ScheduleGenerationResult {
        schedule_items: items,
        total_principal,
        total_interest: Money::ZERO,
        total_fees,
        total_amount,
        start_date: params.start_date,
        end_date,
    })
}

fn build_item(
    milestone: &TemplateMilestone,
    occurrence_index: u32,
    sequence_position: u32,
    due_date: Option<NaiveDate>,
    is_due_date_estimated: bool,
    principal_due: Money,
    fees_due: Money,
) -> ScheduleItem {
    ScheduleItem {
        id: format!("{}-{}", milestone.code, sequence_position),
        template_milestone_code: milestone.code.clone(),
        occurrence_index,
        due_date,
        is_due_date_estimated,
        principal_due,
        interest_due: Money::ZERO,
        fees_due,
        amount_due: principal_due + fees_due,
        status: ItemStatus::Pending,
        metadata: milestone.metadata.clone(),
    }
}
