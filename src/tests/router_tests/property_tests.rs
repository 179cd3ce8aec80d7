use crate::errors::ServerError;
use crate::router::handle;
use crate::tests::utils::{
    body_string, get, location, post_form, record, Lookup, TestApp, RUA_A_FORM,
};

#[test]
fn create_redirects_and_persists() {
    let app = TestApp::new(Lookup::Found(-23.5, -46.6));

    let resp = handle(post_form("/properties", RUA_A_FORM), &app.state).expect("create failed");

    assert_eq!(resp.status(), 303);
    assert_eq!(location(&resp), "/properties?notice=Property+saved");

    let records = app.records();
    assert_eq!(records.len(), 1);
    let r = &records[0];
    assert_eq!(r.address, "Rua A, 100, São Paulo");
    assert_eq!((r.size_sq_m, r.bedrooms, r.bathrooms), (50.0, 2, 1));
    assert_eq!((r.rent_price, r.quality), (2000.0, 4));
    assert_eq!((r.latitude, r.longitude), (-23.5, -46.6));
}

#[test]
fn empty_address_is_rejected_before_lookup() {
    let app = TestApp::new(Lookup::Found(-23.5, -46.6));

    let resp = handle(
        post_form("/properties", "address=+&size_sq_m=50&rent_price=100"),
        &app.state,
    )
    .unwrap();

    assert_eq!(resp.status(), 422);
    assert!(body_string(resp).contains("Address is required"));
    assert_eq!(app.geocoder_calls(), 0);
    assert!(!app.data_file().exists());
}

#[test]
fn unparsable_number_re_renders_form() {
    let app = TestApp::new(Lookup::Found(-23.5, -46.6));

    let resp = handle(
        post_form("/properties", "address=Rua+A&size_sq_m=big&rent_price=100"),
        &app.state,
    )
    .unwrap();

    assert_eq!(resp.status(), 422);
    let body = body_string(resp);
    assert!(body.contains("Size must be a number"));
    assert!(body.contains("value=\"Rua A\""));
    assert_eq!(app.geocoder_calls(), 0);
}

#[test]
fn unresolvable_address_keeps_draft() {
    let app = TestApp::new(Lookup::NotFound);

    let resp = handle(post_form("/properties", RUA_A_FORM), &app.state).unwrap();

    assert_eq!(resp.status(), 422);
    let body = body_string(resp);
    assert!(body.contains("Address not found"));
    assert!(body.contains("value=\"Rua A, 100, São Paulo\""));
    assert!(app.records().is_empty());
}

#[test]
fn lookup_outage_is_bad_gateway() {
    let app = TestApp::new(Lookup::Down);

    let resp = handle(post_form("/properties", RUA_A_FORM), &app.state).unwrap();

    assert_eq!(resp.status(), 502);
    assert!(body_string(resp).contains("Try again later"));
    assert!(app.records().is_empty());
}

#[test]
fn save_failure_is_server_error() {
    let app = TestApp::unwritable();

    let resp = handle(post_form("/properties", RUA_A_FORM), &app.state).unwrap();

    assert_eq!(resp.status(), 500);
    assert!(body_string(resp).contains("Could not save the property"));
}

#[test]
fn edit_form_is_prefilled() {
    let app = TestApp::new(Lookup::Found(-23.5, -46.6));
    app.seed(&[record("a1", "Rua A", 1000.0, 1, 2)]);

    let resp = handle(get("/properties/a1/edit"), &app.state).unwrap();
    assert_eq!(resp.status(), 200);

    let body = body_string(resp);
    assert!(body.contains("action=\"/properties/a1\""));
    assert!(body.contains("value=\"Rua A\""));
    assert!(body.contains("value=\"1000.00\""));
    assert!(!body.contains("Auto-fill from page"));

    assert!(matches!(
        handle(get("/properties/zz/edit"), &app.state),
        Err(ServerError::NotFound)
    ));
}

#[test]
fn update_replaces_record_in_place() {
    let app = TestApp::new(Lookup::Found(-22.9, -43.2));
    app.seed(&[
        record("a1", "Rua A", 1000.0, 1, 2),
        record("b2", "Rua B", 2000.0, 2, 3),
    ]);

    let resp = handle(
        post_form(
            "/properties/a1",
            "address=Rua+A%2C+200&size_sq_m=75&bedrooms=3&bathrooms=2&rent_price=1800&quality=0&visit_date=2024-04-01",
        ),
        &app.state,
    )
    .unwrap();

    assert_eq!(resp.status(), 303);
    assert_eq!(location(&resp), "/properties?notice=Property+updated");

    let records = app.records();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].id, "a1");
    assert_eq!(records[0].address, "Rua A, 200");
    assert_eq!(records[0].quality, 1);
    assert_eq!((records[0].latitude, records[0].longitude), (-22.9, -43.2));
    assert_eq!(records[1].address, "Rua B");
}

#[test]
fn update_of_missing_record_is_not_found() {
    let app = TestApp::new(Lookup::Found(-23.5, -46.6));

    assert!(matches!(
        handle(post_form("/properties/zz", RUA_A_FORM), &app.state),
        Err(ServerError::NotFound)
    ));
}

#[test]
fn delete_removes_one_record() {
    let app = TestApp::new(Lookup::Found(-23.5, -46.6));
    app.seed(&[
        record("a1", "Rua A", 1000.0, 1, 2),
        record("b2", "Rua B", 2000.0, 2, 3),
        record("c3", "Rua C", 3000.0, 3, 4),
    ]);

    let resp = handle(post_form("/properties/b2/delete", ""), &app.state).unwrap();

    assert_eq!(resp.status(), 303);
    assert!(location(&resp).starts_with("/properties?notice=Deleted+Rua+B"));

    let ids: Vec<String> = app.records().into_iter().map(|r| r.id).collect();
    assert_eq!(ids, vec!["a1", "c3"]);

    assert!(matches!(
        handle(post_form("/properties/b2/delete", ""), &app.state),
        Err(ServerError::NotFound)
    ));
}

#[test]
fn script_listing_url_is_rejected() {
    let app = TestApp::new(Lookup::Found(-23.5, -46.6));

    let form = RUA_A_FORM.replace("source_url=", "source_url=javascript%3Aalert(1)");
    let resp = handle(post_form("/properties", &form), &app.state).unwrap();

    assert_eq!(resp.status(), 422);
    assert!(body_string(resp).contains("Listing URL must start with http"));
    assert_eq!(app.geocoder_calls(), 0);
    assert!(app.records().is_empty());
}

#[test]
fn legacy_rows_are_deleted_by_listed_id() {
    let app = TestApp::new(Lookup::Found(-23.5, -46.6));
    std::fs::write(
        app.data_file(),
        "Endereço,Tamanho (m²),Quartos,Banheiros,Preço do Aluguel (R$),Observações,Qualidade,Data da Visita,Latitude,Longitude,URL\n\
         Rua A,40,1,1,900,,3,2023-10-27,-22.9,-43.2,\n\
         Rua B,55,2,1,1200,,4,2023-10-28,-22.8,-43.1,\n",
    )
    .unwrap();
    let ids: Vec<String> = app.records().into_iter().map(|r| r.id).collect();

    let resp = handle(post_form(&format!("/properties/{}/delete", ids[0]), ""), &app.state).unwrap();
    assert_eq!(resp.status(), 303);

    let remaining = app.records();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].address, "Rua B");
    assert_eq!(remaining[0].id, ids[1]);
}
