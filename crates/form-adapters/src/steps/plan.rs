use form_core::{Field, FieldKind, StepForm, StepValidator, ValidationIssue};

pub const PLANS: &[&str] = &["free", "pro", "team"];

pub struct PlanForm;

impl StepForm for PlanForm {
    fn fields(&self) -> Option<Vec<Field>> {
        let choices = PLANS.iter().map(|p| p.to_string()).collect();
        Some(vec![Field::new("plan", "Plan", FieldKind::Choice(choices)).required()])
    }

    fn validator(&self) -> Option<StepValidator> {
        Some(StepValidator::new().require("plan", "Choose a plan").check(|ctx| {
                                                                      let plan = ctx.text("plan");
                                                                      if plan.is_empty() || PLANS.contains(&plan.as_str()) {
                                                                          vec![]
                                                                      } else {
                                                                          vec![ValidationIssue::field("plan", format!("Unknown plan '{plan}'"))]
                                                                      }
                                                                  }))
    }
}
