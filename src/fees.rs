use crate::amounts::clamp_amount;
use crate::decimal::Money;
use crate::template::TemplateFeeRule;
use crate::types::{FeeCalculationType, TriggerTiming};

/// whether a fee rule attaches to items generated from the given milestone
///
/// this is the single applicability filter; schedule generation and any
/// display-side fee breakdown must both go through it so the two never
/// diverge
pub fn fee_rule_applies(rule: &TemplateFeeRule, milestone_code: &str) -> bool {
    if !rule.charge_scope.applies_per_item() {
        return false;
    }

    match rule.trigger_timing {
        // becomes a standalone one-time charge at plan creation, never
        // attached to a milestone's item
        TriggerTiming::OnPlanCreation => false,
        // event triggers do not gate on the event date being recorded;
        // they match exactly like on_milestone_due
        TriggerTiming::OnMilestoneDue
        | TriggerTiming::OnBooking
        | TriggerTiming::OnContractSigning
        | TriggerTiming::OnHandover
        | TriggerTiming::Unknown => rule
            .milestone_code
            .as_deref()
            .map_or(true, |code| code == milestone_code),
    }
}

/// fee rules that attach to items from the given milestone, in template
/// order; the display-side breakdown helper
pub fn applicable_fee_rules<'a>(
    fee_rules: &'a [TemplateFeeRule],
    milestone_code: &str,
) -> Vec<&'a TemplateFeeRule> {
    fee_rules
        .iter()
        .filter(|rule| fee_rule_applies(rule, milestone_code))
        .collect()
}

/// amount of a single fee, rounded to cents
pub fn calculate_fee_amount(
    rule: &TemplateFeeRule,
    principal_amount: Money,
    installment_amount: Money,
    outstanding_balance: Money,
) -> Money {
    let raw = match rule.calculation_type {
        FeeCalculationType::Fixed => Money::from_decimal(rule.rate_value),
        FeeCalculationType::PercentageOfPrincipal => principal_amount.percentage(rule.rate_value),
        FeeCalculationType::PercentageOfInstallment => installment_amount.percentage(rule.rate_value),
        FeeCalculationType::PercentageOfOutstanding => {
            outstanding_balance.percentage(rule.rate_value)
        }
        FeeCalculationType::Unknown => Money::ZERO,
    };

    clamp_amount(raw, rule.min_amount, rule.max_amount)
}

/// total fees due for one schedule item: every applicable fee is rounded
/// individually, then summed
///
/// `installment_amount` is the item's principal due at calculation time,
/// before any fee has been added; `outstanding_balance` is the remaining
/// principal when the item is generated, before its own decrement
pub fn calculate_fees_for_item(
    milestone_code: &str,
    installment_amount: Money,
    fee_rules: &[TemplateFeeRule],
    principal_amount: Money,
    outstanding_balance: Money,
) -> Money {
    fee_rules
        .iter()
        .filter(|rule| fee_rule_applies(rule, milestone_code))
        .map(|rule| calculate_fee_amount(rule, principal_amount, installment_amount, outstanding_balance))
        .fold(Money::ZERO, |acc, fee| acc + fee)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ChargeScope;
    use rust_decimal_macros::dec;

    fn fixed_fee(rate: rust_decimal::Decimal) -> TemplateFeeRule {
        TemplateFeeRule::new(
            "FEE",
            "Fee",
            TriggerTiming::OnMilestoneDue,
            ChargeScope::Installment,
            FeeCalculationType::Fixed,
            rate,
        )
    }

    #[test]
    fn test_plan_scope_never_applies_per_item() {
        let mut rule = fixed_fee(dec!(100));
        rule.charge_scope = ChargeScope::Plan;
        assert!(!fee_rule_applies(&rule, "DP"));
    }

    #[test]
    fn test_plan_creation_trigger_never_attaches() {
        let mut rule = fixed_fee(dec!(100));
        rule.trigger_timing = TriggerTiming::OnPlanCreation;
        assert!(!fee_rule_applies(&rule, "DP"));
    }

    #[test]
    fn test_milestone_code_gating() {
        let unrestricted = fixed_fee(dec!(100));
        assert!(fee_rule_applies(&unrestricted, "DP"));
        assert!(fee_rule_applies(&unrestricted, "INST"));

        let restricted = fixed_fee(dec!(100)).for_milestone("DP");
        assert!(fee_rule_applies(&restricted, "DP"));
        assert!(!fee_rule_applies(&restricted, "INST"));
    }

    #[test]
    fn test_event_triggers_match_like_milestone_due() {
        // on_handover does not check whether the handover date was
        // recorded; this is intentional and pinned here
        let mut rule = fixed_fee(dec!(250));
        rule.trigger_timing = TriggerTiming::OnHandover;
        assert!(fee_rule_applies(&rule, "DP"));

        rule.milestone_code = Some("HANDOVER".to_string());
        assert!(!fee_rule_applies(&rule, "DP"));
        assert!(fee_rule_applies(&rule, "HANDOVER"));
    }

    #[test]
    fn test_fee_formulas() {
        let principal = Money::from_major(100_000);
        let installment = Money::from_major(5_000);
        let outstanding = Money::from_major(60_000);

        let fixed = fixed_fee(dec!(150));
        assert_eq!(
            calculate_fee_amount(&fixed, principal, installment, outstanding),
            Money::from_major(150)
        );

        let mut rule = fixed_fee(dec!(2));
        rule.calculation_type = FeeCalculationType::PercentageOfPrincipal;
        assert_eq!(
            calculate_fee_amount(&rule, principal, installment, outstanding),
            Money::from_major(2_000)
        );

        rule.calculation_type = FeeCalculationType::PercentageOfInstallment;
        assert_eq!(
            calculate_fee_amount(&rule, principal, installment, outstanding),
            Money::from_major(100)
        );

        rule.calculation_type = FeeCalculationType::PercentageOfOutstanding;
        assert_eq!(
            calculate_fee_amount(&rule, principal, installment, outstanding),
            Money::from_major(1_200)
        );

        rule.calculation_type = FeeCalculationType::Unknown;
        assert_eq!(
            calculate_fee_amount(&rule, principal, installment, outstanding),
            Money::ZERO
        );
    }

    #[test]
    fn test_fee_clamps() {
        let mut rule = fixed_fee(dec!(1));
        rule.calculation_type = FeeCalculationType::PercentageOfInstallment;
        rule = rule.with_clamps(Some(Money::from_major(50)), Some(Money::from_major(500)));

        // 1% of 1000 = 10, raised to 50
        assert_eq!(
            calculate_fee_amount(&rule, Money::ZERO, Money::from_major(1_000), Money::ZERO),
            Money::from_major(50)
        );
        // 1% of 100000 = 1000, capped at 500
        assert_eq!(
            calculate_fee_amount(&rule, Money::ZERO, Money::from_major(100_000), Money::ZERO),
            Money::from_major(500)
        );
    }

    #[test]
    fn test_fees_sum_individually_rounded() {
        let mut pct = fixed_fee(dec!(0.333));
        pct.calculation_type = FeeCalculationType::PercentageOfInstallment;
        let rules = vec![pct.clone(), pct];

        // each fee rounds to 0.33 before summing: 0.66, not 0.67
        let total = calculate_fees_for_item(
            "M",
            Money::from_major(100),
            &rules,
            Money::ZERO,
            Money::ZERO,
        );
        assert_eq!(total, Money::from_str_exact("0.66").unwrap());
    }

    #[test]
    fn test_breakdown_matches_generation_filter() {
        let rules = vec![
            fixed_fee(dec!(100)),
            fixed_fee(dec!(50)).for_milestone("DP"),
            {
                let mut plan = fixed_fee(dec!(10));
                plan.charge_scope = ChargeScope::Plan;
                plan
            },
        ];

        let shown = applicable_fee_rules(&rules, "DP");
        assert_eq!(shown.len(), 2);

        let total = calculate_fees_for_item("DP", Money::ZERO, &rules, Money::ZERO, Money::ZERO);
        let shown_total = shown
            .iter()
            .map(|r| calculate_fee_amount(r, Money::ZERO, Money::ZERO, Money::ZERO))
            .fold(Money::ZERO, |acc, fee| acc + fee);
        assert_eq!(total, shown_total);
    }
}
