pub mod amounts;
pub mod anchor;
pub mod decimal;
pub mod errors;
pub mod fees;
pub mod schedule;
pub mod template;
pub mod types;
pub mod validation;

// re-export key types
pub use amounts::{calculate_milestone_amount, clamp_amount};
pub use anchor::{advance_due_date, apply_anchor_offsets, resolve_anchor_date};
pub use decimal::Money;
pub use errors::{PlanError, Result};
pub use fees::{
    applicable_fee_rules, calculate_fee_amount, calculate_fees_for_item, fee_rule_applies,
};
pub use schedule::{
    generate_schedule, ScheduleGenerationParams, ScheduleGenerationResult, ScheduleItem,
};
pub use template::{PlanEvents, TemplateConfig, TemplateFeeRule, TemplateMilestone};
pub use types::{
    AmountMode, AnchorEventType, AnchorType, ChargeScope, FeeCalculationType, IntervalUnit,
    ItemStatus, SchedulePatternType, TriggerTiming,
};
pub use validation::{validate_template_config, ValidationReport};

// re-export external dependencies that users will need
pub use chrono;
pub use rust_decimal::Decimal;
