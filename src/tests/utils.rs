use crate::domain::{Coordinates, ExtractedFields, PropertyRecord};
use crate::extract::{ExtractError, Extractor};
use crate::fetch::ContentFetcher;
use crate::geocode::{GeocodeError, Geocoded, Geocoder};
use crate::router::AppState;
use crate::storage::PropertyStore;
use astra::{Body, Request, Response};
use chrono::NaiveDate;
use std::io::Read;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tempfile::TempDir;

#[derive(Clone, Copy)]
pub enum Lookup {
    Found(f64, f64),
    NotFound,
    Down,
}

pub struct StubGeocoder {
    lookup: Lookup,
    calls: Arc<AtomicUsize>,
}

impl Geocoder for StubGeocoder {
    fn geocode(&self, _address: &str) -> Result<Geocoded, GeocodeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.lookup {
            Lookup::Found(latitude, longitude) => Ok(Geocoded::Found(Coordinates {
                latitude,
                longitude,
            })),
            Lookup::NotFound => Ok(Geocoded::NotFound),
            Lookup::Down => Err(GeocodeError::Transient("operation timed out".to_string())),
        }
    }
}

pub struct StubFetcher(pub String);

impl ContentFetcher for StubFetcher {
    fn fetch(&self, _url: &str) -> String {
        self.0.clone()
    }
}

pub struct StubExtractor(pub ExtractedFields);

impl Extractor for StubExtractor {
    fn extract(&self, text: &str) -> Result<ExtractedFields, ExtractError> {
        if text.trim().is_empty() {
            return Err(ExtractError::EmptyInput);
        }
        Ok(self.0.clone())
    }
}

/// Application state over a temporary data file.
pub struct TestApp {
    _dir: TempDir,
    pub state: AppState,
    geocoder_calls: Arc<AtomicUsize>,
}

impl TestApp {
    pub fn new(lookup: Lookup) -> Self {
        Self::build(lookup, "", None, "imoveis.csv")
    }

    pub fn with_auto_fill(page: &str, extracted: ExtractedFields) -> Self {
        Self::build(Lookup::Found(-23.5, -46.6), page, Some(extracted), "imoveis.csv")
    }

    /// The data file sits in a directory that does not exist, so every save fails.
    pub fn unwritable() -> Self {
        Self::build(Lookup::Found(-23.5, -46.6), "", None, "missing/imoveis.csv")
    }

    fn build(lookup: Lookup, page: &str, extracted: Option<ExtractedFields>, file: &str) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let calls = Arc::new(AtomicUsize::new(0));

        let state = AppState {
            store: PropertyStore::new(dir.path().join(file)),
            geocoder: Box::new(StubGeocoder {
                lookup,
                calls: Arc::clone(&calls),
            }),
            fetcher: Box::new(StubFetcher(page.to_string())),
            extractor: extracted.map(|f| Box::new(StubExtractor(f)) as Box<dyn Extractor>),
        };

        Self {
            _dir: dir,
            state,
            geocoder_calls: calls,
        }
    }

    pub fn geocoder_calls(&self) -> usize {
        self.geocoder_calls.load(Ordering::SeqCst)
    }

    pub fn data_file(&self) -> &Path {
        self.state.store.path()
    }

    pub fn records(&self) -> Vec<PropertyRecord> {
        self.state.store.load().unwrap()
    }

    pub fn seed(&self, records: &[PropertyRecord]) {
        self.state.store.save(records).unwrap();
    }
}

pub fn record(id: &str, address: &str, price: f64, bedrooms: u32, quality: u8) -> PropertyRecord {
    PropertyRecord {
        address: address.to_string(),
        size_sq_m: 60.0,
        bedrooms,
        bathrooms: 1,
        rent_price: price,
        notes: String::new(),
        quality,
        visit_date: NaiveDate::from_ymd_opt(2024, 3, 10).unwrap(),
        latitude: -23.55,
        longitude: -46.63,
        source_url: String::new(),
        id: id.to_string(),
    }
}

pub fn get(uri: &str) -> Request {
    let mut req = Request::new(Body::empty());
    *req.method_mut() = "GET".parse().unwrap();
    *req.uri_mut() = uri.parse().unwrap();
    req
}

pub fn post_form(uri: &str, body: &str) -> Request {
    let mut req = Request::new(Body::from(body.to_string()));
    *req.method_mut() = "POST".parse().unwrap();
    *req.uri_mut() = uri.parse().unwrap();
    req.headers_mut().insert(
        "Content-Type",
        "application/x-www-form-urlencoded".parse().unwrap(),
    );
    req
}

pub fn body_string(resp: Response) -> String {
    let mut body = String::new();
    resp.into_body().reader().read_to_string(&mut body).unwrap();
    body
}

pub fn location(resp: &Response) -> &str {
    resp.headers()
        .get("Location")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
}

/// A complete, valid create form for Rua A.
pub const RUA_A_FORM: &str = "address=Rua+A%2C+100%2C+S%C3%A3o+Paulo&size_sq_m=50&bedrooms=2\
    &bathrooms=1&rent_price=2000&notes=&quality=4&visit_date=2024-03-10&source_url=";
