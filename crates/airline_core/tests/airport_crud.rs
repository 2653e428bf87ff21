use airline_core::db::open_db_in_memory;
use airline_core::{
    Airport, AirportPatch, AirportRepository, AirportService, AirportValidationError,
    BusinessError, BusinessErrorKind, RepoError, SqliteAirportRepository,
};
use rusqlite::Connection;
use uuid::Uuid;

fn service(conn: &Connection) -> AirportService<SqliteAirportRepository<'_>> {
    AirportService::new(SqliteAirportRepository::try_new(conn).unwrap())
}

fn el_dorado() -> Airport {
    Airport::new("El Dorado", "BOG", "Colombia", "Bogotá")
}

#[test]
fn create_with_three_character_code_succeeds() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    let airport = el_dorado();
    let created = service.create(&airport).unwrap();
    assert_eq!(created.id, airport.id);

    let stored = service.find_one(airport.id).unwrap();
    assert_eq!(stored.name, "El Dorado");
    assert_eq!(stored.code, "BOG");
    assert_eq!(stored.country, "Colombia");
    assert_eq!(stored.city, "Bogotá");
    assert!(stored.airline_ids.is_empty());
}

#[test]
fn create_with_wrong_code_length_fails_with_precondition_error() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    for code in ["", "BO", "SKBO", "ABCDEFGH"] {
        let airport = Airport::new("El Dorado", code, "Colombia", "Bogotá");
        let err = service.create(&airport).unwrap_err();
        assert_eq!(err.kind(), BusinessErrorKind::PreconditionFailed);
        assert_eq!(
            err.to_string(),
            "The airport code must contain three characters"
        );
    }

    assert!(service.find_all().unwrap().is_empty());
}

#[test]
fn find_all_returns_every_airport() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    let seeded = [
        Airport::new("José María Córdova", "MDE", "Colombia", "Rionegro"),
        Airport::new("Alfonso Bonilla Aragón", "CLO", "Colombia", "Palmira"),
        el_dorado(),
    ];
    for airport in &seeded {
        service.create(airport).unwrap();
    }

    let listed = service.find_all().unwrap();
    assert_eq!(listed.len(), 3);
    assert_eq!(listed[0].code, "CLO");
    assert_eq!(listed[1].code, "BOG");
    assert_eq!(listed[2].code, "MDE");
}

#[test]
fn find_one_unknown_id_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    let err = service.find_one(Uuid::new_v4()).unwrap_err();
    assert_eq!(err.kind(), BusinessErrorKind::NotFound);
    assert_eq!(err.to_string(), "The airport with the given id was not found");
}

#[test]
fn update_merges_fields_and_checks_code() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    let airport = service.create(&el_dorado()).unwrap();

    let rename = AirportPatch {
        name: Some("New name".to_string()),
        ..AirportPatch::default()
    };
    let updated = service.update(airport.id, &rename).unwrap();
    assert_eq!(updated.name, "New name");
    assert_eq!(updated.code, "BOG");

    let bad_code = AirportPatch {
        code: Some("SKBO".to_string()),
        ..AirportPatch::default()
    };
    let err = service.update(airport.id, &bad_code).unwrap_err();
    assert!(matches!(
        err,
        BusinessError::InvalidAirport(AirportValidationError::InvalidCode { len: 4 })
    ));
    assert_eq!(service.find_one(airport.id).unwrap().code, "BOG");
}

#[test]
fn update_unknown_id_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);

    let patch = AirportPatch {
        name: Some("New name".to_string()),
        ..AirportPatch::default()
    };
    let err = service.update(Uuid::new_v4(), &patch).unwrap_err();
    assert_eq!(err.to_string(), "The airport with the given id was not found");
}

#[test]
fn delete_removes_airport_and_unknown_id_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let service = service(&conn);
    let airport = service.create(&el_dorado()).unwrap();

    service.delete(airport.id).unwrap();
    assert!(service.find_all().unwrap().is_empty());

    let err = service.delete(airport.id).unwrap_err();
    assert_eq!(err.kind(), BusinessErrorKind::NotFound);
}

#[test]
fn repository_validates_before_writing() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteAirportRepository::try_new(&conn).unwrap();

    let blank_city = Airport::new("El Dorado", "BOG", "Colombia", " ");
    let err = repo.create_airport(&blank_city).unwrap_err();
    assert!(matches!(
        err,
        RepoError::AirportValidation(AirportValidationError::EmptyField("city"))
    ));
    assert!(repo.get_airport(blank_city.id).unwrap().is_none());
}

#[test]
fn stored_airport_with_wrong_code_length_surfaces_as_internal() {
    let conn = open_db_in_memory().unwrap();
    let id = Uuid::new_v4();
    conn.execute(
        "INSERT INTO airports (id, name, code, country, city)
         VALUES (?1, 'El Dorado', 'BOGX', 'Colombia', 'Bogotá');",
        [id.to_string()],
    )
    .unwrap();

    let repo = SqliteAirportRepository::try_new(&conn).unwrap();
    let err = repo.get_airport(id).unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(_)));

    let service = service(&conn);
    for err in [
        service.find_all().unwrap_err(),
        service.find_one(id).unwrap_err(),
    ] {
        assert_eq!(err.kind(), BusinessErrorKind::Internal);
        assert_ne!(
            err.to_string(),
            "The airport code must contain three characters"
        );
    }
}
