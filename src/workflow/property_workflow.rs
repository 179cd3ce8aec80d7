// src/workflow/property_workflow.rs

use crate::domain::{generate_record_id, Coordinates, PropertyDraft, PropertyRecord};
use crate::extract::{extract_or_empty, Extractor};
use crate::fetch::ContentFetcher;
use crate::geocode::{Geocoded, Geocoder};
use crate::storage::PropertyStore;
use crate::workflow::{AutoFillError, WorkflowError};

/// Orchestrates every change to the collection.
///
/// Each operation is independent: load, change, save. Geocoding always happens
/// before the save, so a record never reaches the file without coordinates.
pub struct PropertyWorkflow<'a> {
    store: &'a PropertyStore,
    geocoder: &'a dyn Geocoder,
    fetcher: &'a dyn ContentFetcher,
    extractor: Option<&'a dyn Extractor>,
}

impl<'a> PropertyWorkflow<'a> {
    pub fn new(
        store: &'a PropertyStore,
        geocoder: &'a dyn Geocoder,
        fetcher: &'a dyn ContentFetcher,
        extractor: Option<&'a dyn Extractor>,
    ) -> Self {
        Self {
            store,
            geocoder,
            fetcher,
            extractor,
        }
    }

    pub fn auto_fill_enabled(&self) -> bool {
        self.extractor.is_some()
    }

    fn resolve(&self, address: &str) -> Result<Coordinates, WorkflowError> {
        let address = address.trim();
        match self.geocoder.geocode(address) {
            Ok(Geocoded::Found(coords)) => Ok(coords),
            Ok(Geocoded::NotFound) => {
                tracing::info!(address, "Address not found");
                Err(WorkflowError::UnresolvableAddress(address.to_string()))
            }
            Err(e) => {
                tracing::warn!(address, error = %e, "Geocoding failed");
                Err(WorkflowError::LookupFailure(e))
            }
        }
    }

    /// Validate, geocode, append, save.
    pub fn create(&self, draft: PropertyDraft) -> Result<PropertyRecord, WorkflowError> {
        draft.validate().map_err(WorkflowError::Validation)?;
        let coords = self.resolve(&draft.address)?;

        let record = draft.into_record(generate_record_id(), coords);
        let mut records = self.store.load()?;
        records.push(record.clone());
        self.store.save(&records)?;

        tracing::info!(id = %record.id, address = %record.address, "Property created");
        Ok(record)
    }

    pub fn update(&self, id: &str, draft: PropertyDraft) -> Result<PropertyRecord, WorkflowError> {
        draft.validate().map_err(WorkflowError::Validation)?;

        let records = self.store.load()?;
        let position = records
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| WorkflowError::RecordNotFound(id.to_string()))?;

        self.replace(records, position, draft)
    }

    fn replace(
        &self,
        mut records: Vec<PropertyRecord>,
        position: usize,
        draft: PropertyDraft,
    ) -> Result<PropertyRecord, WorkflowError> {
        let coords = self.resolve(&draft.address)?;

        let id = std::mem::take(&mut records[position].id);
        let record = draft.into_record(id, coords);
        records[position] = record.clone();
        self.store.save(&records)?;

        tracing::info!(id = %record.id, position, "Property updated");
        Ok(record)
    }

    pub fn delete(&self, id: &str) -> Result<PropertyRecord, WorkflowError> {
        let records = self.store.load()?;
        let position = records
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| WorkflowError::RecordNotFound(id.to_string()))?;

        self.remove(records, position)
    }

    fn remove(
        &self,
        mut records: Vec<PropertyRecord>,
        position: usize,
    ) -> Result<PropertyRecord, WorkflowError> {
        // Vec::remove shifts the tail down, which keeps positions contiguous.
        let removed = records.remove(position);
        self.store.save(&records)?;

        tracing::info!(id = %removed.id, position, "Property deleted");
        Ok(removed)
    }

    /// Fill `draft` from the listing at `url`. On any failure the draft is
    /// left exactly as it was.
    pub fn auto_fill(&self, url: &str, draft: &mut PropertyDraft) -> Result<(), AutoFillError> {
        let url = url.trim();
        if url.is_empty() {
            return Err(AutoFillError::MissingUrl);
        }
        let extractor = self.extractor.ok_or(AutoFillError::Disabled)?;

        let text = self.fetcher.fetch(url);
        if text.is_empty() {
            return Err(AutoFillError::FetchFailure);
        }

        let fields = extract_or_empty(extractor, &text);
        if fields.is_empty() {
            return Err(AutoFillError::ExtractionFailure);
        }

        draft.apply_extracted(&fields, url);
        tracing::info!(url, "Draft auto-filled");
        Ok(())
    }
}
