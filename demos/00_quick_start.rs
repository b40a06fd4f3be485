//! minimal schedule: one fixed down payment plus quarterly installments

use chrono::NaiveDate;
use payment_plan_rs::{
    generate_schedule, AmountMode, IntervalUnit, Money, PlanEvents, ScheduleGenerationParams,
    TemplateConfig, TemplateMilestone,
};
use rust_decimal_macros::dec;

fn main() -> payment_plan_rs::Result<()> {
    let template = TemplateConfig::new(
        vec![
            TemplateMilestone::single("DP", "Down Payment", 1, AmountMode::FixedAmount, dec!(20000)),
            TemplateMilestone::recurring(
                "INST",
                "Quarterly Installment",
                2,
                AmountMode::PercentageOfPrincipal,
                dec!(10),
                IntervalUnit::Months,
                3,
                8,
            ),
        ],
        vec![],
    );

    let params = ScheduleGenerationParams {
        template,
        principal_amount: Money::from_major(100_000),
        currency: "AED".to_string(),
        start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        events: PlanEvents::default(),
    };

    let result = generate_schedule(&params)?;

    println!("{:<10} {:<12} {:>12} {:>10} {:>12}", "id", "due", "principal", "fees", "total");
    for item in &result.schedule_items {
        println!(
            "{:<10} {:<12} {:>12} {:>10} {:>12}",
            item.id,
            item.due_date.map(|d| d.to_string()).unwrap_or_else(|| "-".to_string()),
            item.principal_due.to_string(),
            item.fees_due.to_string(),
            item.amount_due.to_string(),
        );
    }
    println!();
    println!("total principal: {}", result.total_principal);
    println!("total amount:    {}", result.total_amount);
    println!("end date:        {}", result.end_date);

    Ok(())
}
