use contacts_core::db::open_db_in_memory;
use contacts_core::{
    Category, CategoryRepository, CategorySeed, ContactDraft, ContactRepository, RepoError,
    SqliteCategoryRepository, SqliteContactRepository,
};

#[test]
fn seed_inserts_default_categories_once() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCategoryRepository::try_new(&conn).unwrap();

    assert_eq!(repo.seed_categories(&CategorySeed::defaults()).unwrap(), 3);
    assert_eq!(repo.seed_categories(&CategorySeed::defaults()).unwrap(), 0);

    let categories = repo.list_categories().unwrap();
    assert_eq!(
        categories,
        vec![
            Category::new(1, "Friend"),
            Category::new(2, "Work"),
            Category::new(3, "Family"),
        ]
    );
}

#[test]
fn seed_is_skipped_when_table_already_has_rows() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCategoryRepository::try_new(&conn).unwrap();
    repo.seed_categories(&CategorySeed::new(vec![Category::new(5, "Gym")]))
        .unwrap();

    assert_eq!(repo.seed_categories(&CategorySeed::defaults()).unwrap(), 0);
    assert_eq!(repo.list_categories().unwrap(), vec![Category::new(5, "Gym")]);
}

#[test]
fn seed_rejects_invalid_rows() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCategoryRepository::try_new(&conn).unwrap();

    let err = repo
        .seed_categories(&CategorySeed::new(vec![Category::new(1, "")]))
        .unwrap_err();
    assert!(matches!(err, RepoError::InvalidCategory(_)));
    assert!(repo.list_categories().unwrap().is_empty());
}

#[test]
fn get_category_by_id() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCategoryRepository::try_new(&conn).unwrap();
    repo.seed_categories(&CategorySeed::defaults()).unwrap();

    assert_eq!(
        repo.get_category(2).unwrap(),
        Some(Category::new(2, "Work"))
    );
    assert_eq!(repo.get_category(9).unwrap(), None);
}

#[test]
fn delete_category_is_blocked_while_referenced() {
    let conn = open_db_in_memory().unwrap();
    let categories = SqliteCategoryRepository::try_new(&conn).unwrap();
    let contacts = SqliteContactRepository::try_new(&conn).unwrap();
    categories
        .seed_categories(&CategorySeed::defaults())
        .unwrap();

    let draft = ContactDraft {
        first_name: "Ana".to_string(),
        last_name: "Lee".to_string(),
        phone: "555-1000".to_string(),
        email: "a@x.com".to_string(),
        category_id: 2,
    };
    let contact = contacts.create_contact(&draft, 1).unwrap();

    let err = categories.delete_category(2).unwrap_err();
    assert!(matches!(
        err,
        RepoError::CategoryInUse {
            category_id: 2,
            contact_count: 1
        }
    ));
    assert!(categories.get_category(2).unwrap().is_some());

    contacts.delete_contact(contact.id).unwrap();
    categories.delete_category(2).unwrap();
    assert!(categories.get_category(2).unwrap().is_none());
}

#[test]
fn delete_missing_category_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCategoryRepository::try_new(&conn).unwrap();

    let err = repo.delete_category(4).unwrap_err();
    assert!(matches!(err, RepoError::CategoryNotFound(4)));
}
