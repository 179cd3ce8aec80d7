use crate::domain::ExtractedFields;
use crate::router::handle;
use crate::tests::utils::{body_string, get, post_form, Lookup, TestApp};

fn extracted() -> ExtractedFields {
    ExtractedFields {
        address: Some("Rua das Flores, 45, Campinas".to_string()),
        size_sq_m: Some(68.0),
        bedrooms: Some(2),
        bathrooms: Some(1),
        rent_price: Some(1750.0),
        notes: Some("Varanda".to_string()),
        quality: Some(4),
        visit_date: None,
    }
}

#[test]
fn new_form_offers_auto_fill_when_configured() {
    let app = TestApp::with_auto_fill("listing", extracted());

    let body = body_string(handle(get("/properties/new"), &app.state).unwrap());

    assert!(body.contains("formaction=\"/properties/autofill\""));
    assert!(!body.contains("Auto-fill is disabled"));
}

#[test]
fn new_form_disables_auto_fill_without_credentials() {
    let app = TestApp::new(Lookup::NotFound);

    let body = body_string(handle(get("/properties/new"), &app.state).unwrap());

    assert!(body.contains("Auto-fill is disabled"));
    assert!(body.contains("disabled"));
}

#[test]
fn auto_fill_prefills_form() {
    let app = TestApp::with_auto_fill("Apartamento na Rua das Flores", extracted());

    let resp = handle(
        post_form(
            "/properties/autofill",
            "source_url=https%3A%2F%2Fwww.olx.com.br%2Fanuncio%2F9&address=&size_sq_m=1",
        ),
        &app.state,
    )
    .unwrap();

    assert_eq!(resp.status(), 200);
    let body = body_string(resp);
    assert!(body.contains("Review the values before saving"));
    assert!(body.contains("value=\"Rua das Flores, 45, Campinas\""));
    assert!(body.contains("value=\"1750.00\""));
    assert!(body.contains("value=\"https://www.olx.com.br/anuncio/9\""));
    assert!(app.records().is_empty());
    assert_eq!(app.geocoder_calls(), 0);
}

#[test]
fn unreachable_page_keeps_typed_values() {
    let app = TestApp::with_auto_fill("", extracted());

    let body = body_string(
        handle(
            post_form(
                "/properties/autofill",
                "source_url=https%3A%2F%2Fexample.com%2Fx&address=Rua+Minha%2C+1&rent_price=900",
            ),
            &app.state,
        )
        .unwrap(),
    );

    assert!(body.contains("Could not load the page"));
    assert!(body.contains("value=\"Rua Minha, 1\""));
    assert!(body.contains("value=\"900.00\""));
}

#[test]
fn empty_extraction_is_reported() {
    let app = TestApp::with_auto_fill("some page text", ExtractedFields::default());

    let body = body_string(
        handle(
            post_form("/properties/autofill", "source_url=https%3A%2F%2Fexample.com%2Fx"),
            &app.state,
        )
        .unwrap(),
    );

    assert!(body.contains("Could not extract data from the page"));
}

#[test]
fn auto_fill_without_credentials_is_reported() {
    let app = TestApp::new(Lookup::NotFound);

    let body = body_string(
        handle(
            post_form("/properties/autofill", "source_url=https%3A%2F%2Fexample.com%2Fx"),
            &app.state,
        )
        .unwrap(),
    );

    assert!(body.contains("no LLM API key is configured"));
}
