use airline_core::db::open_db_in_memory;
use airline_core::{
    Airline, AirlineDraft, AirlinePatch, AirlineRepository, AirlineService,
    AirlineValidationError, BusinessError, BusinessErrorKind, RepoError,
    SqliteAirlineRepository,
};
use chrono::NaiveDate;
use rusqlite::Connection;
use uuid::Uuid;

fn draft(name: &str) -> AirlineDraft {
    AirlineDraft {
        name: name.to_string(),
        description: format!("{name} flies passengers and cargo"),
        foundation_date: "1919-12-05".to_string(),
        web_page: "https://www.example-airline.com".to_string(),
    }
}

fn service(conn: &Connection) -> AirlineService<SqliteAirlineRepository<'_>> {
    AirlineService::new(SqliteAirlineRepository::try_new(conn).unwrap())
}

#[test]
fn create_and_find_one_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    let created = service.create(&draft("Avianca")).unwrap();
    let stored = service.find_one(created.id).unwrap();

    assert_eq!(stored.name, "Avianca");
    assert_eq!(stored.description, created.description);
    assert_eq!(
        stored.foundation_date,
        NaiveDate::from_ymd_opt(1919, 12, 5).unwrap()
    );
    assert_eq!(stored.web_page, "https://www.example-airline.com");
    assert!(stored.airports.is_empty());
}

#[test]
fn find_all_returns_every_airline_sorted_by_name() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    for name in ["LATAM", "Avianca", "Copa", "Iberia", "KLM"] {
        service.create(&draft(name)).unwrap();
    }

    let names: Vec<String> = service
        .find_all()
        .unwrap()
        .into_iter()
        .map(|airline| airline.name)
        .collect();
    assert_eq!(names, vec!["Avianca", "Copa", "Iberia", "KLM", "LATAM"]);
}

#[test]
fn find_one_unknown_id_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    let err = service.find_one(Uuid::new_v4()).unwrap_err();
    assert_eq!(err.kind(), BusinessErrorKind::NotFound);
    assert_eq!(err.to_string(), "The airline with the given id was not found");
}

#[test]
fn create_rejects_invalid_draft_before_persistence() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    let mut bad_url = draft("Avianca");
    bad_url.web_page = "avianca dot com".to_string();
    let err = service.create(&bad_url).unwrap_err();
    assert!(matches!(
        err,
        BusinessError::InvalidAirline(AirlineValidationError::InvalidWebPage(_))
    ));
    assert_eq!(err.kind(), BusinessErrorKind::PreconditionFailed);

    let mut bad_date = draft("Avianca");
    bad_date.foundation_date = "05/12/1919".to_string();
    let err = service.create(&bad_date).unwrap_err();
    assert!(matches!(
        err,
        BusinessError::InvalidAirline(AirlineValidationError::InvalidFoundationDate(_))
    ));

    let mut blank_name = draft("Avianca");
    blank_name.name = "  ".to_string();
    let err = service.create(&blank_name).unwrap_err();
    assert!(matches!(
        err,
        BusinessError::InvalidAirline(AirlineValidationError::EmptyField("name"))
    ));

    assert!(service.find_all().unwrap().is_empty());
}

#[test]
fn update_merges_only_provided_fields() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    let created = service.create(&draft("Avianca")).unwrap();

    let patch = AirlinePatch {
        name: Some("New name".to_string()),
        description: Some("New description".to_string()),
        ..AirlinePatch::default()
    };
    let updated = service.update(created.id, &patch).unwrap();
    assert_eq!(updated.name, "New name");
    assert_eq!(updated.description, "New description");
    assert_eq!(updated.web_page, created.web_page);
    assert_eq!(updated.foundation_date, created.foundation_date);

    let stored = service.find_one(created.id).unwrap();
    assert_eq!(stored, updated);
}

#[test]
fn update_with_invalid_patch_leaves_record_untouched() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    let created = service.create(&draft("Avianca")).unwrap();

    let patch = AirlinePatch {
        name: Some("Renamed".to_string()),
        web_page: Some("mailto:ops@example.com".to_string()),
        ..AirlinePatch::default()
    };
    let err = service.update(created.id, &patch).unwrap_err();
    assert_eq!(err.kind(), BusinessErrorKind::PreconditionFailed);

    assert_eq!(service.find_one(created.id).unwrap().name, "Avianca");
}

#[test]
fn update_unknown_id_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    let patch = AirlinePatch {
        name: Some("New name".to_string()),
        ..AirlinePatch::default()
    };
    let err = service.update(Uuid::new_v4(), &patch).unwrap_err();
    assert_eq!(err.to_string(), "The airline with the given id was not found");
}

#[test]
fn delete_removes_airline_and_second_delete_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    let created = service.create(&draft("Avianca")).unwrap();

    service.delete(created.id).unwrap();
    assert!(matches!(
        service.find_one(created.id),
        Err(BusinessError::AirlineNotFound(id)) if id == created.id
    ));

    let err = service.delete(created.id).unwrap_err();
    assert_eq!(err.to_string(), "The airline with the given id was not found");
}

#[test]
fn repository_update_of_missing_row_returns_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteAirlineRepository::try_new(&conn).unwrap();

    let ghost = Airline::new(
        "Ghost",
        "never stored",
        NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(),
        "https://ghost.example.com",
    );
    let err = repo.update_airline(&ghost).unwrap_err();
    assert!(matches!(err, RepoError::AirlineNotFound(id) if id == ghost.id));
}

#[test]
fn repository_rejects_corrupted_rows_on_read() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteAirlineRepository::try_new(&conn).unwrap();
    let id = Uuid::new_v4();
    conn.execute(
        "INSERT INTO airlines (id, name, description, foundation_date, web_page)
         VALUES (?1, 'Broken', 'bad date', 'yesterday', 'https://broken.example.com');",
        [id.to_string()],
    )
    .unwrap();

    let err = repo.get_airline(id, false).unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(_)));
}

#[test]
fn stored_airline_failing_validation_surfaces_as_internal() {
    let conn = open_db_in_memory().unwrap();
    let id = Uuid::new_v4();
    conn.execute(
        "INSERT INTO airlines (id, name, description, foundation_date, web_page)
         VALUES (?1, 'Broken', 'bad url', '1990-01-01', 'not a url');",
        [id.to_string()],
    )
    .unwrap();

    let repo = SqliteAirlineRepository::try_new(&conn).unwrap();
    let err = repo.get_airline(id, false).unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(_)));

    let err = service(&conn).find_all().unwrap_err();
    assert_eq!(err.kind(), BusinessErrorKind::Internal);
    assert!(matches!(err, BusinessError::Repo(RepoError::InvalidData(_))));
}
