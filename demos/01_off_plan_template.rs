//! realistic off-plan real-estate plan: event-anchored milestones,
//! declining-balance installments, and layered fee rules

use chrono::NaiveDate;
use payment_plan_rs::{
    applicable_fee_rules, generate_schedule, validate_template_config, AmountMode, AnchorEventType,
    ChargeScope, FeeCalculationType, IntervalUnit, Money, PlanEvents, ScheduleGenerationParams,
    TemplateConfig, TemplateFeeRule, TemplateMilestone, TriggerTiming,
};
use rust_decimal_macros::dec;

fn main() -> payment_plan_rs::Result<()> {
    let template = TemplateConfig::new(
        vec![
            TemplateMilestone::single("BOOK", "Booking Deposit", 1, AmountMode::PercentageOfPrincipal, dec!(5))
                .anchored_to_event(AnchorEventType::Booking),
            TemplateMilestone::single("SIGN", "On Contract Signing", 2, AmountMode::PercentageOfPrincipal, dec!(15))
                .anchored_to_event(AnchorEventType::ContractSigning)
                .with_offsets(Some(7), None),
            TemplateMilestone::recurring(
                "CONST",
                "Construction Installment",
                3,
                AmountMode::PercentageOfRemainingPrincipal,
                dec!(12.5),
                IntervalUnit::Months,
                2,
                6,
            )
            .with_offsets(None, Some(1))
            .with_clamps(Some(Money::from_major(5_000)), None),
            TemplateMilestone::single("HAND", "On Handover", 4, AmountMode::PercentageOfRemainingPrincipal, dec!(100))
                .anchored_to_event(AnchorEventType::Handover),
        ],
        vec![
            TemplateFeeRule::new(
                "ADMIN",
                "Administration Fee",
                TriggerTiming::OnMilestoneDue,
                ChargeScope::Installment,
                FeeCalculationType::Fixed,
                dec!(250),
            )
            .for_milestone("CONST"),
            TemplateFeeRule::new(
                "DLD",
                "Registration Fee",
                TriggerTiming::OnContractSigning,
                ChargeScope::Installment,
                FeeCalculationType::PercentageOfPrincipal,
                dec!(4),
            )
            .for_milestone("SIGN"),
            TemplateFeeRule::new(
                "SVC",
                "Service Charge",
                TriggerTiming::OnHandover,
                ChargeScope::Installment,
                FeeCalculationType::PercentageOfInstallment,
                dec!(1.5),
            )
            .for_milestone("HAND")
            .with_clamps(None, Some(Money::from_major(10_000))),
        ],
    );

    let report = validate_template_config(&template);
    println!("template valid: {}", report.valid);
    for warning in &report.warnings {
        println!("  warning: {warning}");
    }

    let params = ScheduleGenerationParams {
        template,
        principal_amount: Money::from_major(1_200_000),
        currency: "AED".to_string(),
        start_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        events: PlanEvents {
            booking_date: NaiveDate::from_ymd_opt(2024, 3, 1),
            contract_signing_date: NaiveDate::from_ymd_opt(2024, 3, 20),
            // handover not yet scheduled, milestone falls back to plan start
            handover_date: None,
        },
    };

    let result = generate_schedule(&params)?;

    println!();
    println!(
        "{:<10} {:<12} {:>14} {:>10} {:>14}  est",
        "id", "due", "principal", "fees", "total"
    );
    for item in &result.schedule_items {
        println!(
            "{:<10} {:<12} {:>14} {:>10} {:>14}  {}",
            item.id,
            item.due_date.map(|d| d.to_string()).unwrap_or_else(|| "-".to_string()),
            item.principal_due.to_string(),
            item.fees_due.to_string(),
            item.amount_due.to_string(),
            if item.is_due_date_estimated { "~" } else { "" },
        );
    }

    println!();
    println!("total principal: {}", result.total_principal);
    println!("total fees:      {}", result.total_fees);
    println!("total amount:    {}", result.total_amount);
    println!("spans:           {} -> {}", result.start_date, result.end_date);

    // fee breakdown for the handover item, same filter generation used
    println!();
    println!("fees shown for HAND:");
    for rule in applicable_fee_rules(&params.template.fee_rules, "HAND") {
        println!("  {} ({})", rule.name, rule.code);
    }

    Ok(())
}
