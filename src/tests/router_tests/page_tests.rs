use crate::errors::ServerError;
use crate::responses::error_to_response;
use crate::router::handle;
use crate::tests::utils::{body_string, get, record, Lookup, TestApp};

#[test]
fn home_without_data_has_no_summary() {
    let app = TestApp::new(Lookup::NotFound);

    let resp = handle(get("/"), &app.state).expect("home failed");
    assert_eq!(resp.status(), 200);

    let body = body_string(resp);
    assert!(body.contains("Rental Visits"));
    assert!(!body.contains("Quick summary"));
}

#[test]
fn home_summarises_collection() {
    let app = TestApp::new(Lookup::NotFound);
    app.seed(&[
        record("a1", "Rua A", 1000.0, 1, 2),
        record("b2", "Rua B", 3000.0, 2, 5),
    ]);

    let body = body_string(handle(get("/"), &app.state).unwrap());

    assert!(body.contains("Quick summary"));
    assert!(body.contains("R$ 2,000.00"));
    assert!(body.contains("★★★★★"));
}

#[test]
fn list_shows_rows_and_notice() {
    let app = TestApp::new(Lookup::NotFound);
    app.seed(&[record("a1", "Rua A", 1000.0, 1, 2)]);

    let resp = handle(get("/properties?notice=Property+saved"), &app.state).unwrap();
    assert_eq!(resp.status(), 200);

    let body = body_string(resp);
    assert!(body.contains("Property saved"));
    assert!(body.contains("Rua A"));
    assert!(body.contains("/properties/a1/edit"));
    assert!(body.contains("/properties/a1/delete"));
}

#[test]
fn empty_list_invites_first_entry() {
    let app = TestApp::new(Lookup::NotFound);
    let body = body_string(handle(get("/properties"), &app.state).unwrap());
    assert!(body.contains("No properties yet"));
}

#[test]
fn map_renders_markers_by_tier() {
    let app = TestApp::new(Lookup::NotFound);
    let mut listed = record("b2", "Rua B", 3000.0, 2, 5);
    listed.source_url = "https://example.com/b".to_string();
    app.seed(&[record("a1", "Rua A", 1000.0, 1, 1), listed]);

    let body = body_string(handle(get("/map"), &app.state).unwrap());

    assert!(body.contains("L.map('map')"));
    assert!(body.contains("\"color\":\"red\""));
    assert!(body.contains("\"color\":\"blue\""));
    assert!(body.contains("View listing"));
}

#[test]
fn map_filters_can_exclude_everything() {
    let app = TestApp::new(Lookup::NotFound);
    app.seed(&[record("a1", "Rua A", 1000.0, 1, 3)]);

    let body = body_string(handle(get("/map?price_min=5000"), &app.state).unwrap());

    assert!(body.contains("No properties match the selected filters"));
    assert!(!body.contains("L.map('map')"));
    // Single-valued data gets a widened range.
    assert!(body.contains("All properties have the same rent"));
}

#[test]
fn stats_page_sections() {
    let app = TestApp::new(Lookup::NotFound);
    let mut listed = record("b2", "Rua B", 3000.0, 2, 5);
    listed.source_url = "https://example.com/b".to_string();
    app.seed(&[record("a1", "Rua A", 1000.0, 1, 2), listed]);

    let body = body_string(handle(get("/stats"), &app.state).unwrap());

    assert!(body.contains("Rent by quality"));
    assert!(body.contains("Properties by number of bedrooms"));
    assert!(body.contains("Best rated"));
    assert!(body.contains("50.0%"));
    assert!(body.contains("https://example.com/b"));
}

#[test]
fn export_returns_workbook() {
    let app = TestApp::new(Lookup::NotFound);
    app.seed(&[record("a1", "Rua A", 1000.0, 1, 2)]);

    let resp = handle(get("/export"), &app.state).unwrap();
    assert_eq!(resp.status(), 200);

    let disposition = resp
        .headers()
        .get("Content-Disposition")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();
    assert!(disposition.contains("properties.xlsx"));

    let mut bytes = Vec::new();
    std::io::Read::read_to_end(&mut resp.into_body().reader(), &mut bytes).unwrap();
    assert!(bytes.starts_with(b"PK"));
}

#[test]
fn unknown_route_is_not_found() {
    let app = TestApp::new(Lookup::NotFound);

    let err = handle(get("/nope"), &app.state).unwrap_err();
    assert!(matches!(err, ServerError::NotFound));

    let resp = error_to_response(err);
    assert_eq!(resp.status(), 404);
    assert!(body_string(resp).contains("Error 404"));
}

#[test]
fn stored_script_urls_are_not_linked() {
    let app = TestApp::new(Lookup::NotFound);
    let mut legacy = record("a1", "Rua A", 1000.0, 1, 2);
    legacy.source_url = "javascript:alert(1)".to_string();
    app.seed(&[legacy]);

    for path in ["/properties", "/map", "/stats"] {
        let body = body_string(handle(get(path), &app.state).unwrap());
        assert!(!body.contains("href=\"javascript:"), "{path} links a script URL");
    }
}

#[test]
fn pages_leave_legacy_file_untouched() {
    let app = TestApp::new(Lookup::NotFound);
    let legacy = "Endereço,Tamanho (m²),Quartos,Banheiros,Preço do Aluguel (R$),Observações,Qualidade,Data da Visita,Latitude,Longitude,URL\n\
                  Rua A,40,1,1,900,,3,2023-10-27,-22.9,-43.2,\n";
    std::fs::write(app.data_file(), legacy).unwrap();

    for path in ["/", "/properties", "/map", "/stats", "/export"] {
        let resp = handle(get(path), &app.state).unwrap();
        assert_eq!(resp.status(), 200, "{path}");
    }
    assert_eq!(std::fs::read_to_string(app.data_file()).unwrap(), legacy);

    // The id shown in the list still resolves on the next request.
    let id = app.records()[0].id.clone();
    let list = body_string(handle(get("/properties"), &app.state).unwrap());
    assert!(list.contains(&format!("/properties/{id}/edit")));
    let edit = handle(get(&format!("/properties/{id}/edit")), &app.state).unwrap();
    assert_eq!(edit.status(), 200);
}
