use crate::decimal::Money;
use crate::template::TemplateMilestone;
use crate::types::AmountMode;

/// principal amount due for one milestone occurrence, rounded to cents
///
/// percentage_of_remaining_principal reads the running balance at the
/// moment the occurrence is generated, not the original principal
pub fn calculate_milestone_amount(
    milestone: &TemplateMilestone,
    principal_amount: Money,
    remaining_principal: Money,
) -> Money {
    let raw = match milestone.amount_mode {
        AmountMode::FixedAmount => Money::from_decimal(milestone.amount_value),
        // formula falls back to percentage-of-principal until custom
        // formulas are supported
        AmountMode::PercentageOfPrincipal | AmountMode::Formula => {
            principal_amount.percentage(milestone.amount_value)
        }
        AmountMode::PercentageOfRemainingPrincipal => {
            remaining_principal.percentage(milestone.amount_value)
        }
        AmountMode::Unknown => Money::ZERO,
    };

    clamp_amount(raw, milestone.min_amount, milestone.max_amount)
}

/// clamp to [min, max]; runs after the mode formula, never before
pub fn clamp_amount(value: Money, min: Option<Money>, max: Option<Money>) -> Money {
    let mut clamped = value;
    if let Some(min) = min {
        if clamped < min {
            clamped = min;
        }
    }
    if let Some(max) = max {
        if clamped > max {
            clamped = max;
        }
    }
    clamped
}
