use form_core::step::validation::min_length;
use form_core::{step_types, ConfigurationError, CoreFormError, ExtraAction, Field, FieldKind, FormEngine,
                InMemoryStepStore, LinkConfig, StepData, StepDefinition, StepForm, StepRegistry, StepStore,
                StepValidator, SubmitOutcome, ValidationIssue};
use serde_json::{json, Value};

step_types! {
    pub enum Order {
        Cart => "cart",
        Address => "address",
        Review => "review",
    }
}

struct CartForm;
impl StepForm for CartForm {
    fn fields(&self) -> Option<Vec<Field>> {
        Some(vec![Field::new("sku", "Product", FieldKind::Text).required()])
    }

    fn validator(&self) -> Option<StepValidator> {
        Some(StepValidator::new().require("sku", "Pick a product"))
    }
}

struct AddressForm;
impl StepForm for AddressForm {
    fn fields(&self) -> Option<Vec<Field>> {
        Some(vec![Field::new("street", "Street", FieldKind::Text).required(),
                  Field::new("notes", "Notes", FieldKind::TextArea)])
    }

    fn extra_actions(&self) -> Vec<ExtraAction> {
        vec![ExtraAction::new("save_later", "Save and finish later")]
    }

    fn validator(&self) -> Option<StepValidator> {
        Some(StepValidator::new().require("street", "Street is required")
                                 .rule("street", min_length(3))
                                 .check(|ctx| {
                                     if ctx.is_empty("notes") {
                                         vec![ValidationIssue::field("notes", "No delivery notes").warning()]
                                     } else {
                                         vec![]
                                     }
                                 }))
    }
}

// Sin fields ni validador.
struct ReviewForm;
impl StepForm for ReviewForm {}

fn engine() -> FormEngine<Order, InMemoryStepStore<Order>> {
    let registry = StepRegistry::new().with(StepDefinition::new(Order::Cart, "Your cart").then(Order::Address),
                                            CartForm)
                                      .with(StepDefinition::new(Order::Address, "Shipping").then(Order::Review),
                                            AddressForm)
                                      .with(StepDefinition::new(Order::Review, "Review").final_step(), ReviewForm);
    FormEngine::new(registry, InMemoryStepStore::new()).with_links(LinkConfig::new("/checkout"))
}

fn data(v: Value) -> StepData {
    v.as_object().cloned().expect("object")
}

#[test]
fn full_walkthrough_reaches_completion() {
    let mut engine = engine();
    let session = engine.start().expect("start");
    assert_eq!(session.current_step, Some(Order::Cart));
    assert!(!session.is_persistent());

    let outcome = engine.submit(session.id, Order::Cart, data(json!({ "sku": "A-1" }))).expect("cart");
    assert_eq!(outcome, SubmitOutcome::Advanced { next: Order::Address, warnings: vec![] });
    let session = engine.store().get_session(session.id).expect("session");
    assert!(session.is_persistent());
    assert_eq!(session.current_step, Some(Order::Address));

    let outcome = engine.submit(session.id, Order::Address, data(json!({ "street": "Gran Via 1" })))
                        .expect("address");
    match outcome {
        SubmitOutcome::Advanced { next, warnings } => {
            assert_eq!(next, Order::Review);
            assert_eq!(warnings.len(), 1);
            assert!(!warnings[0].is_error());
        }
        other => panic!("unexpected outcome {other:?}"),
    }

    let outcome = engine.submit(session.id, Order::Review, StepData::new()).expect("review");
    assert_eq!(outcome, SubmitOutcome::Completed { warnings: vec![] });
    assert!(engine.current(session.id).expect("current").is_none());
}

#[test]
fn invalid_submit_saves_nothing_and_keeps_pointer() {
    let mut engine = engine();
    let session = engine.start().expect("start");
    let outcome = engine.submit(session.id, Order::Cart, StepData::new()).expect("submit");
    assert_eq!(outcome, SubmitOutcome::Invalid(vec![ValidationIssue::field("sku", "Pick a product")]));
    let session = engine.store().get_session(session.id).expect("session");
    assert_eq!(session.current_step, Some(Order::Cart));
    assert!(!session.is_persistent());
    assert!(engine.store().list_records(session.id).expect("records").is_empty());
}

#[test]
fn form_step_exposes_controller_contract() {
    let mut engine = engine();
    let session = engine.start().expect("start");
    engine.submit(session.id, Order::Cart, data(json!({ "sku": "B-2" }))).expect("cart");
    let hash = engine.store().get_session(session.id).expect("session").hash.expect("hash");

    let mut step = engine.open(session.id, Order::Address).expect("open");
    assert_eq!(step.step_type(), Order::Address);
    assert_eq!(step.session().hash.as_deref(), Some(hash.as_str()));
    assert_eq!(step.get_title().expect("title"), "Shipping");
    assert_eq!(step.get_fields().expect("fields").len(), 2);
    assert_eq!(step.get_extra_actions().expect("actions")[0].name, "save_later");
    assert!(step.get_validator().expect("validator").is_some());
    let issues = step.validate(&data(json!({ "street": "x" }))).expect("validate");
    assert_eq!(issues.iter().filter(|i| i.is_error()).count(), 1);
    assert_eq!(issues.len(), 2);
    assert!(step.is_current_step());
    assert!(!step.is_final_step().expect("final"));
    assert_eq!(step.link(), format!("/checkout/{hash}/address"));
    assert_eq!(step.get_next_step().expect("next"), Some(Order::Review));
    assert_eq!(step.get_next_step_from_database().expect("next record"), None);
    assert_eq!(step.get_previous_step().expect("prev"), Some(Order::Cart));
    let prev = step.get_previous_step_from_database().expect("prev record").expect("cart record");
    assert_eq!(prev.load_data().expect("load"), data(json!({ "sku": "B-2" })));

    let before = step.record().modified_at;
    step.save_data(&data(json!({ "street": "Calle Mayor 5" }))).expect("save");
    assert!(step.record().modified_at > before);
    assert_eq!(step.load_data().expect("load"), data(json!({ "street": "Calle Mayor 5" })));
}

#[test]
fn step_without_fields_is_configuration_error_but_missing_validator_is_not() {
    let mut engine = engine();
    let session = engine.start().expect("start");
    let step = engine.open(session.id, Order::Review).expect("open");
    assert_eq!(step.get_fields().unwrap_err(),
               CoreFormError::Configuration(ConfigurationError::FieldsNotImplemented { step: "review".into() }));
    assert!(step.get_validator().expect("validator").is_none());
    assert!(step.get_extra_actions().expect("actions").is_empty());
    assert!(step.is_final_step().expect("final"));
    assert!(!step.is_current_step());
}

#[test]
fn back_then_forward_revisits_existing_record() {
    let mut engine = engine();
    let session = engine.start().expect("start");
    engine.submit(session.id, Order::Cart, data(json!({ "sku": "C-3" }))).expect("cart");
    engine.submit(session.id, Order::Address, data(json!({ "street": "Plaza 2", "notes": "bell" })))
          .expect("address");

    assert_eq!(engine.back(session.id, Order::Review).expect("back"), Some(Order::Address));
    assert_eq!(engine.back(session.id, Order::Address).expect("back"), Some(Order::Cart));
    assert_eq!(engine.back(session.id, Order::Cart).expect("back"), None);
    assert_eq!(engine.store().get_session(session.id).expect("session").current_step, Some(Order::Cart));

    let cart = engine.open(session.id, Order::Cart).expect("open cart");
    let address = cart.get_next_step_from_database().expect("next").expect("address record");
    assert_eq!(address.load_data().expect("load")["street"], json!("Plaza 2"));

    // Re-submit reutiliza el record existente: uno por variante.
    engine.submit(session.id, Order::Cart, data(json!({ "sku": "D-4" }))).expect("cart again");
    let records = engine.store().list_records(session.id).expect("records");
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].step_type, Order::Cart);
}

#[test]
fn resume_accepts_hash_once_persistent() {
    let mut engine = engine();
    let session = engine.start().expect("start");
    assert_eq!(engine.resume(&session.id.to_string()).expect("by id").id, session.id);
    engine.submit(session.id, Order::Cart, data(json!({ "sku": "E-5" }))).expect("cart");
    let hash = engine.store().get_session(session.id).expect("session").hash.expect("hash");
    assert_eq!(engine.resume(&hash).expect("by hash").current_step, Some(Order::Address));
    assert!(matches!(engine.resume(&session.id.to_string()), Err(CoreFormError::InvalidToken(_))));
}

#[test]
fn starting_with_empty_registry_fails() {
    let mut engine: FormEngine<Order, _> = FormEngine::new(StepRegistry::new(), InMemoryStepStore::new());
    assert_eq!(engine.start().unwrap_err(), CoreFormError::Configuration(ConfigurationError::EmptyRegistry));
}
