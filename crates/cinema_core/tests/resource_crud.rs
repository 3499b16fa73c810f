use cinema_core::db::open_db_in_memory;
use cinema_core::{
    Movie, Payload, RepoError, ResourceRepository, SqliteResourceRepository, Store, User,
};
use serde_json::json;

fn payload(value: serde_json::Value) -> Payload {
    match value {
        serde_json::Value::Object(map) => map,
        other => panic!("expected object, got {other}"),
    }
}

fn marie() -> Payload {
    payload(json!({
        "firstname": "Marie",
        "lastname": "Martin",
        "email": "marie.martin@example.com",
        "city": "Paris",
        "language": "French",
    }))
}

fn alien() -> Payload {
    payload(json!({
        "title": "Alien",
        "director": "Ridley Scott",
        "year": "1979",
        "color": "1",
        "duration": 117,
    }))
}

#[test]
fn insert_and_get_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteResourceRepository::<User>::new(&conn);

    let id = repo.insert(&marie()).unwrap();

    let loaded = repo.get_by_id(id).unwrap().unwrap();
    assert_eq!(
        loaded,
        User {
            id,
            firstname: "Marie".to_string(),
            lastname: "Martin".to_string(),
            email: "marie.martin@example.com".to_string(),
            city: "Paris".to_string(),
            language: "French".to_string(),
        }
    );
}

#[test]
fn insert_assigns_increasing_ids() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteResourceRepository::<Movie>::new(&conn);

    let first = repo.insert(&alien()).unwrap();
    let mut second_payload = alien();
    second_payload.insert("title".to_string(), json!("Aliens"));
    let second = repo.insert(&second_payload).unwrap();

    assert!(first > 0);
    assert!(second > first);
}

#[test]
fn insert_ignores_unknown_fields() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteResourceRepository::<Movie>::new(&conn);

    let mut body = alien();
    body.insert("rating".to_string(), json!("R"));
    let id = repo.insert(&body).unwrap();

    let loaded = repo.get_by_id(id).unwrap().unwrap();
    assert_eq!(loaded.title, "Alien");
    assert_eq!(loaded.duration, 117);
}

#[test]
fn insert_with_missing_field_is_a_store_error() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteResourceRepository::<User>::new(&conn);

    let err = repo
        .insert(&payload(json!({ "firstname": "Harry" })))
        .unwrap_err();
    assert!(matches!(err, RepoError::Db(_)));
    assert!(repo.list().unwrap().is_empty());
}

#[test]
fn duplicate_email_is_a_store_error() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteResourceRepository::<User>::new(&conn);

    repo.insert(&marie()).unwrap();
    let err = repo.insert(&marie()).unwrap_err();
    assert!(matches!(err, RepoError::Db(_)));
}

#[test]
fn get_missing_id_returns_none() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteResourceRepository::<User>::new(&conn);

    assert!(repo.get_by_id(0).unwrap().is_none());
    assert!(repo.get_by_id(42).unwrap().is_none());
}

#[test]
fn list_returns_rows_in_insertion_order() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteResourceRepository::<Movie>::new(&conn);
    assert!(repo.list().unwrap().is_empty());

    let titles = ["Alien", "Blade Runner", "Gladiator"];
    for title in titles {
        let mut body = alien();
        body.insert("title".to_string(), json!(title));
        repo.insert(&body).unwrap();
    }

    let listed = repo.list().unwrap();
    let listed_titles: Vec<&str> = listed.iter().map(|movie| movie.title.as_str()).collect();
    assert_eq!(listed_titles, titles);
}

#[test]
fn update_overwrites_every_field() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteResourceRepository::<User>::new(&conn);
    let id = repo.insert(&marie()).unwrap();

    repo.update(
        id,
        &payload(json!({
            "firstname": "Jax",
            "lastname": "Dorms",
            "email": "jax.dorms@example.com",
            "city": "Los Angeles",
            "language": "English",
        })),
    )
    .unwrap();

    let loaded = repo.get_by_id(id).unwrap().unwrap();
    assert_eq!(loaded.id, id);
    assert_eq!(loaded.firstname, "Jax");
    assert_eq!(loaded.lastname, "Dorms");
    assert_eq!(loaded.email, "jax.dorms@example.com");
    assert_eq!(loaded.city, "Los Angeles");
    assert_eq!(loaded.language, "English");
}

#[test]
fn update_not_found_returns_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteResourceRepository::<User>::new(&conn);

    let err = repo.update(0, &marie()).unwrap_err();
    assert!(matches!(err, RepoError::NotFound { resource: "user", id: 0 }));
}

#[test]
fn partial_update_of_existing_row_fails_and_keeps_row() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteResourceRepository::<User>::new(&conn);
    let id = repo.insert(&marie()).unwrap();

    let err = repo
        .update(id, &payload(json!({ "title": "Marie" })))
        .unwrap_err();
    assert!(matches!(err, RepoError::Db(_)));

    let loaded = repo.get_by_id(id).unwrap().unwrap();
    assert_eq!(loaded.firstname, "Marie");
}

#[test]
fn delete_removes_row_and_second_delete_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteResourceRepository::<Movie>::new(&conn);
    let id = repo.insert(&alien()).unwrap();

    repo.delete(id).unwrap();
    assert!(repo.get_by_id(id).unwrap().is_none());

    let err = repo.delete(id).unwrap_err();
    assert!(matches!(err, RepoError::NotFound { resource: "movie", .. }));
}

#[test]
fn injection_attempts_are_stored_verbatim() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteResourceRepository::<User>::new(&conn);

    let mut body = marie();
    body.insert(
        "city".to_string(),
        json!("Paris'); DROP TABLE users; --"),
    );
    let id = repo.insert(&body).unwrap();

    let loaded = repo.get_by_id(id).unwrap().unwrap();
    assert_eq!(loaded.city, "Paris'); DROP TABLE users; --");
    assert_eq!(repo.list().unwrap().len(), 1);
}

#[test]
fn store_shares_one_connection_between_handles() {
    let store = Store::new(open_db_in_memory().unwrap());
    let other = store.clone();

    let id = store
        .with_conn(|conn| SqliteResourceRepository::<Movie>::new(conn).insert(&alien()))
        .unwrap();
    let loaded = other
        .with_conn(|conn| SqliteResourceRepository::<Movie>::new(conn).get_by_id(id))
        .unwrap();
    assert_eq!(loaded.map(|movie| movie.title), Some("Alien".to_string()));

    drop(other);
    store.close().unwrap();
}
