use std::collections::HashSet;

use rust_decimal_macros::dec;
use serde::Serialize;

use crate::errors::{PlanError, Result};
use crate::template::TemplateConfig;
use crate::types::{AmountMode, SchedulePatternType};

/// outcome of advisory template checks
///
/// errors make the template invalid for authoring; warnings are surfaced
/// but do not flip `valid`. generation never consults this, integrators
/// call it before save when they want hard validation
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationReport {
    /// fail-fast view for integrators that treat errors as hard
    pub fn into_result(self) -> Result<()> {
        if self.valid {
            Ok(())
        } else {
            Err(PlanError::InvalidConfiguration {
                message: self.errors.join("; "),
            })
        }
    }
}

/// advisory checks over a template: duplicate codes, incomplete recurring
/// config, suspicious percentages
pub fn validate_template_config(config: &TemplateConfig) -> ValidationReport {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    let mut milestone_codes = HashSet::new();
    for milestone in &config.milestones {
        if !milestone_codes.insert(milestone.code.as_str()) {
            errors.push(format!("duplicate milestone code: {}", milestone.code));
        }
    }

    let mut fee_codes = HashSet::new();
    for rule in &config.fee_rules {
        if !fee_codes.insert(rule.code.as_str()) {
            errors.push(format!("duplicate fee rule code: {}", rule.code));
        }
    }

    for milestone in &config.milestones {
        if milestone.schedule_pattern_type == SchedulePatternType::Recurring {
            if milestone.interval_unit.is_none() {
                errors.push(format!(
                    "recurring milestone {} is missing intervalUnit",
                    milestone.code
                ));
            }
            if milestone.interval_value.is_none() {
                errors.push(format!(
                    "recurring milestone {} is missing intervalValue",
                    milestone.code
                ));
            }
        }

        let percentage_mode = matches!(
            milestone.amount_mode,
            AmountMode::PercentageOfPrincipal
                | AmountMode::PercentageOfRemainingPrincipal
                | AmountMode::Formula
        );
        if percentage_mode && milestone.amount_value > dec!(100) {
            warnings.push(format!(
                "milestone {} percentage amount exceeds 100",
                milestone.code
            ));
        }
    }

    ValidationReport {
        valid: errors.is_empty(),
        errors,
        warnings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::TemplateMilestone;
    use crate::types::IntervalUnit;

    #[test]
    fn test_clean_template_is_valid() {
        let config = TemplateConfig::new(
            vec![
                TemplateMilestone::single("DP", "Down Payment", 1, AmountMode::FixedAmount, dec!(20000)),
                TemplateMilestone::recurring(
                    "INST",
                    "Installment",
                    2,
                    AmountMode::PercentageOfPrincipal,
                    dec!(10),
                    IntervalUnit::Months,
                    1,
                    8,
                ),
            ],
            vec![],
        );

        let report = validate_template_config(&config);
        assert!(report.valid);
        assert!(report.errors.is_empty());
        assert!(report.warnings.is_empty());
        assert!(report.into_result().is_ok());
    }

    #[test]
    fn test_duplicate_milestone_code() {
        let config = TemplateConfig::new(
            vec![
                TemplateMilestone::single("A", "First", 1, AmountMode::FixedAmount, dec!(100)),
                TemplateMilestone::single("A", "Second", 2, AmountMode::FixedAmount, dec!(200)),
            ],
            vec![],
        );

        let report = validate_template_config(&config);
        assert!(!report.valid);
        assert!(report.errors.iter().any(|e| e.contains("duplicate milestone code: A")));
        assert!(report.into_result().is_err());
    }

    #[test]
    fn test_duplicate_fee_rule_code() {
        use crate::template::TemplateFeeRule;
        use crate::types::{ChargeScope, FeeCalculationType, TriggerTiming};

        let fee = TemplateFeeRule::new(
            "ADMIN",
            "Admin Fee",
            TriggerTiming::OnMilestoneDue,
            ChargeScope::Installment,
            FeeCalculationType::Fixed,
            dec!(100),
        );
        let config = TemplateConfig::new(vec![], vec![fee.clone(), fee]);

        let report = validate_template_config(&config);
        assert!(!report.valid);
        assert!(report.errors.iter().any(|e| e.contains("duplicate fee rule code: ADMIN")));
    }

    #[test]
    fn test_recurring_missing_interval_fields() {
        let mut milestone = TemplateMilestone::recurring(
            "INST",
            "Installment",
            1,
            AmountMode::PercentageOfPrincipal,
            dec!(10),
            IntervalUnit::Months,
            1,
            4,
        );
        milestone.interval_unit = None;
        milestone.interval_value = None;

        let report = validate_template_config(&TemplateConfig::new(vec![milestone], vec![]));
        assert!(!report.valid);
        assert!(report.errors.iter().any(|e| e.contains("INST") && e.contains("intervalUnit")));
        assert!(report.errors.iter().any(|e| e.contains("INST") && e.contains("intervalValue")));
    }

    #[test]
    fn test_percentage_over_100_is_warning_only() {
        let config = TemplateConfig::new(
            vec![TemplateMilestone::single(
                "BIG",
                "Oversized",
                1,
                AmountMode::PercentageOfPrincipal,
                dec!(150),
            )],
            vec![],
        );

        let report = validate_template_config(&config);
        assert!(report.valid);
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].contains("BIG"));

        // a fixed amount over 100 is currency, not a percentage
        let fixed = TemplateConfig::new(
            vec![TemplateMilestone::single("DP", "Down", 1, AmountMode::FixedAmount, dec!(20000))],
            vec![],
        );
        assert!(validate_template_config(&fixed).warnings.is_empty());
    }
}
