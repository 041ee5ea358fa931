use contacts_core::db::open_db_in_memory;
use contacts_core::{
    CategoryRepository, CategorySeed, ContactAction, ContactField, ContactForm,
    ContactRepository, ContactService, ContactServiceError, FormMode, SqliteCategoryRepository,
    SqliteContactRepository, SubmitOutcome,
};
use rusqlite::Connection;

const FIXED_NOW_MS: i64 = 1_700_000_000_000;

fn fixed_clock() -> i64 {
    FIXED_NOW_MS
}

fn later_clock() -> i64 {
    FIXED_NOW_MS + 86_400_000
}

fn seeded_db() -> Connection {
    let conn = open_db_in_memory().unwrap();
    SqliteCategoryRepository::try_new(&conn)
        .unwrap()
        .seed_categories(&CategorySeed::defaults())
        .unwrap();
    conn
}

fn service(
    conn: &Connection,
) -> ContactService<SqliteContactRepository<'_>, SqliteCategoryRepository<'_>> {
    ContactService::new(
        SqliteContactRepository::try_new(conn).unwrap(),
        SqliteCategoryRepository::try_new(conn).unwrap(),
    )
    .with_clock(fixed_clock)
}

fn ana_form() -> ContactForm {
    ContactForm {
        id: String::new(),
        first_name: "Ana".to_string(),
        last_name: "Lee".to_string(),
        phone: "555-1000".to_string(),
        email: "a@x.com".to_string(),
        category_id: "2".to_string(),
    }
}

fn create(service: &ContactService<SqliteContactRepository<'_>, SqliteCategoryRepository<'_>>) -> i64 {
    match service.create_contact(ana_form()).unwrap() {
        SubmitOutcome::Saved(contact) => contact.id,
        SubmitOutcome::Rejected(page) => panic!("unexpected rejection: {}", page.errors),
    }
}

fn assert_not_found<T: std::fmt::Debug>(
    result: Result<T, ContactServiceError>,
    expected_action: ContactAction,
    expected_id: Option<i64>,
) {
    match result {
        Err(ContactServiceError::NotFound { action, contact_id }) => {
            assert_eq!(action, expected_action);
            assert_eq!(contact_id, expected_id);
        }
        other => panic!("expected not found, got {other:?}"),
    }
}

#[test]
fn create_then_detail_returns_input_and_category_name() {
    let conn = seeded_db();
    let service = service(&conn);

    let id = create(&service);
    let view = service.contact_details(Some(id)).unwrap();

    assert_eq!(view.first_name, "Ana");
    assert_eq!(view.last_name, "Lee");
    assert_eq!(view.phone, "555-1000");
    assert_eq!(view.email, "a@x.com");
    assert_eq!(view.category_id, 2);
    assert_eq!(view.category_name.as_deref(), Some("Work"));
    assert_eq!(view.date_added, FIXED_NOW_MS);
}

#[test]
fn surrounding_whitespace_survives_create_then_detail() {
    let conn = seeded_db();
    let service = service(&conn);
    let mut form = ana_form();
    form.first_name = " Ana".to_string();
    form.last_name = "Lee ".to_string();
    form.phone = " 555-1000 ".to_string();

    let SubmitOutcome::Saved(contact) = service.create_contact(form.clone()).unwrap() else {
        panic!("padded but valid form was rejected");
    };
    let view = service.contact_details(Some(contact.id)).unwrap();

    assert_eq!(view.first_name, form.first_name);
    assert_eq!(view.last_name, form.last_name);
    assert_eq!(view.phone, form.phone);
    assert_eq!(view.full_name, " Ana Lee ");
}

#[test]
fn every_seeded_category_resolves_by_submitted_id() {
    let conn = seeded_db();
    let service = service(&conn);

    for (category_id, name) in [(1, "Friend"), (2, "Work"), (3, "Family")] {
        let mut form = ana_form();
        form.category_id = category_id.to_string();
        let SubmitOutcome::Saved(contact) = service.create_contact(form).unwrap() else {
            panic!("valid form was rejected");
        };
        let view = service.contact_details(Some(contact.id)).unwrap();
        assert_eq!(view.category_label(), name);
    }
}

#[test]
fn list_projects_every_contact() {
    let conn = seeded_db();
    let service = service(&conn);
    create(&service);
    let mut form = ana_form();
    form.first_name = "Ben".to_string();
    form.category_id = "1".to_string();
    service.create_contact(form).unwrap();

    let views = service.list_contacts().unwrap();
    let summary: Vec<(&str, &str)> = views
        .iter()
        .map(|view| (view.first_name.as_str(), view.category_label()))
        .collect();
    assert_eq!(summary, [("Ana", "Work"), ("Ben", "Friend")]);
}

#[test]
fn edit_never_changes_creation_timestamp() {
    let conn = seeded_db();
    let id = create(&service(&conn));

    let later = ContactService::new(
        SqliteContactRepository::try_new(&conn).unwrap(),
        SqliteCategoryRepository::try_new(&conn).unwrap(),
    )
    .with_clock(later_clock);
    let mut form = ana_form();
    form.id = id.to_string();
    form.last_name = "Park".to_string();

    let SubmitOutcome::Saved(updated) = later.update_contact(id, form).unwrap() else {
        panic!("valid edit was rejected");
    };
    assert_eq!(updated.last_name, "Park");
    assert_eq!(updated.date_added, FIXED_NOW_MS);
}

#[test]
fn deleted_contact_is_not_found_everywhere() {
    let conn = seeded_db();
    let service = service(&conn);
    let id = create(&service);

    service.delete_contact(id).unwrap();

    assert_not_found(service.contact_details(Some(id)), ContactAction::Details, Some(id));
    assert_not_found(service.edit_form(Some(id)), ContactAction::Edit, Some(id));
    assert_not_found(
        service.delete_confirmation(Some(id)),
        ContactAction::Delete,
        Some(id),
    );
    assert_not_found(service.delete_contact(id), ContactAction::DeleteSubmit, Some(id));
}

#[test]
fn missing_id_is_not_found() {
    let conn = seeded_db();
    let service = service(&conn);

    assert_not_found(service.contact_details(None), ContactAction::Details, None);
    assert_not_found(service.edit_form(None), ContactAction::Edit, None);
    assert_not_found(service.delete_confirmation(None), ContactAction::Delete, None);
}

#[test]
fn unknown_category_projects_to_empty_name() {
    let conn = seeded_db();
    let service = service(&conn);
    let mut form = ana_form();
    form.category_id = "42".to_string();

    let SubmitOutcome::Saved(contact) = service.create_contact(form).unwrap() else {
        panic!("category existence is not validated on submit");
    };
    let view = service.contact_details(Some(contact.id)).unwrap();
    assert_eq!(view.category_name, None);
    assert_eq!(view.category_label(), "");
}

#[test]
fn empty_first_name_is_rejected_without_mutation() {
    let conn = seeded_db();
    let service = service(&conn);
    create(&service);
    let before = service.list_contacts().unwrap().len();

    let mut form = ana_form();
    form.first_name = String::new();
    let SubmitOutcome::Rejected(page) = service.create_contact(form.clone()).unwrap() else {
        panic!("empty first name was accepted");
    };

    assert_eq!(page.mode, FormMode::Create);
    assert_eq!(page.form, form);
    assert!(page.errors.message_for(ContactField::FirstName).is_some());
    assert_eq!(page.errors.errors().len(), 1);
    assert_eq!(page.categories.len(), 3);
    assert!(page
        .categories
        .iter()
        .any(|option| option.id == 2 && option.selected));
    assert_eq!(service.list_contacts().unwrap().len(), before);
}

#[test]
fn rejected_edit_rerenders_edit_form() {
    let conn = seeded_db();
    let service = service(&conn);
    let id = create(&service);

    let mut form = ana_form();
    form.id = id.to_string();
    form.email = "not-an-email".to_string();
    form.category_id = "0".to_string();
    let SubmitOutcome::Rejected(page) = service.update_contact(id, form).unwrap() else {
        panic!("invalid edit was accepted");
    };

    assert_eq!(page.mode, FormMode::Edit(id));
    assert!(page.errors.message_for(ContactField::Email).is_some());
    assert!(page.errors.message_for(ContactField::CategoryId).is_some());
    assert!(page.categories.iter().all(|option| !option.selected));
    assert_eq!(service.contact_details(Some(id)).unwrap().email, "a@x.com");
}

#[test]
fn edit_with_mismatched_ids_is_not_found_without_mutation() {
    let conn = seeded_db();
    let service = service(&conn);
    let id = create(&service);

    let mut form = ana_form();
    form.id = (id + 1).to_string();
    form.first_name = "Changed".to_string();
    assert_not_found(
        service.update_contact(id, form),
        ContactAction::EditSubmit,
        Some(id),
    );

    let mut missing_body_id = ana_form();
    missing_body_id.first_name = "Changed".to_string();
    assert_not_found(
        service.update_contact(id, missing_body_id),
        ContactAction::EditSubmit,
        Some(id),
    );

    assert_eq!(service.contact_details(Some(id)).unwrap().first_name, "Ana");
}

#[test]
fn edit_of_missing_record_is_not_found() {
    let conn = seeded_db();
    let service = service(&conn);

    let mut form = ana_form();
    form.id = "5".to_string();
    assert_not_found(service.update_contact(5, form), ContactAction::EditSubmit, Some(5));
}

#[test]
fn create_form_is_empty_with_category_choices() {
    let conn = seeded_db();
    let service = service(&conn);

    let page = service.create_form().unwrap();
    assert_eq!(page.mode, FormMode::Create);
    assert_eq!(page.form, ContactForm::default());
    assert!(page.errors.is_empty());
    let names: Vec<&str> = page.categories.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["Friend", "Work", "Family"]);
}

#[test]
fn edit_form_is_prefilled_from_record() {
    let conn = seeded_db();
    let service = service(&conn);
    let id = create(&service);

    let page = service.edit_form(Some(id)).unwrap();
    assert_eq!(page.mode, FormMode::Edit(id));
    assert_eq!(page.form.id, id.to_string());
    assert_eq!(page.form.first_name, "Ana");
    assert_eq!(page.form.category_id, "2");
    assert!(page
        .categories
        .iter()
        .any(|option| option.name == "Work" && option.selected));
}

#[test]
fn ana_lee_example_flow() {
    let conn = seeded_db();
    let service = service(&conn);

    let id = create(&service);
    assert_eq!(
        service.contact_details(Some(id)).unwrap().category_label(),
        "Work"
    );

    service.delete_contact(id).unwrap();
    assert_not_found(service.contact_details(Some(id)), ContactAction::Details, Some(id));

    let contacts = SqliteContactRepository::try_new(&conn).unwrap();
    assert!(contacts.list_contacts().unwrap().is_empty());
    let categories = SqliteCategoryRepository::try_new(&conn).unwrap();
    assert_eq!(categories.list_categories().unwrap().len(), 3);
}
