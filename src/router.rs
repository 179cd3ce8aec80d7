use crate::config::AppConfig;
use crate::domain::PropertyDraft;
use crate::errors::{ResultResp, ServerError};
use crate::extract::{Extractor, GroqExtractor};
use crate::fetch::{ContentFetcher, PageFetcher};
use crate::forms::{draft_from_form, map_filter, parse_query, query_location, read_form};
use crate::geocode::{Geocoder, NominatimGeocoder};
use crate::responses::{html_response, html_with_status, see_other};
use crate::spreadsheets::export_properties_xlsx;
use crate::storage::PropertyStore;
use crate::templates::pages::{self, FormMode, FormVm};
use crate::templates::Notice;
use crate::views;
use crate::workflow::{AutoFillError, PropertyWorkflow, WorkflowError};
use astra::Request;

/// Everything a request handler needs. Built once at startup.
pub struct AppState {
    pub store: PropertyStore,
    pub geocoder: Box<dyn Geocoder>,
    pub fetcher: Box<dyn ContentFetcher>,
    pub extractor: Option<Box<dyn Extractor>>,
}

impl AppState {
    pub fn from_config(config: &AppConfig) -> Result<Self, Box<dyn std::error::Error>> {
        let extractor = GroqExtractor::from_config(&config.llm)?;
        if extractor.is_none() {
            tracing::warn!("GROQ_API_KEY is not set; auto-fill is disabled");
        }

        Ok(Self {
            store: PropertyStore::new(&config.data_file),
            geocoder: Box::new(NominatimGeocoder::new(&config.geocoder)?),
            fetcher: Box::new(PageFetcher::new(&config.fetch)?),
            extractor: extractor.map(|e| Box::new(e) as Box<dyn Extractor>),
        })
    }

    pub fn workflow(&self) -> PropertyWorkflow<'_> {
        PropertyWorkflow::new(
            &self.store,
            self.geocoder.as_ref(),
            self.fetcher.as_ref(),
            self.extractor.as_deref(),
        )
    }
}

pub fn handle(req: Request, state: &AppState) -> ResultResp {
    let method = req.method().as_str().to_owned();
    let path = req.uri().path().to_owned();
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    match (method.as_str(), segments.as_slice()) {
        ("GET", []) => home(state),
        ("GET", ["properties"]) => list(&req, state),
        ("GET", ["properties", "new"]) => new_form(state),
        ("POST", ["properties"]) => create(req, state),
        ("POST", ["properties", "autofill"]) => auto_fill(req, state),
        ("GET", ["properties", id, "edit"]) => edit_form(state, id),
        ("POST", ["properties", id]) => update(req, state, id),
        ("POST", ["properties", id, "delete"]) => delete(state, id),
        ("GET", ["map"]) => map(&req, state),
        ("GET", ["stats"]) => stats(state),
        ("GET", ["export"]) => export_properties_xlsx(&state.store.load()?),
        _ => Err(ServerError::NotFound),
    }
}

fn home(state: &AppState) -> ResultResp {
    let records = state.store.load()?;
    html_response(pages::home_page(views::summary(&records).as_ref()))
}

fn list(req: &Request, state: &AppState) -> ResultResp {
    let records = state.store.load()?;
    let flash = parse_query(req).remove("notice").map(Notice::success);
    html_response(pages::list_page(&views::list_rows(&records), flash.as_ref()))
}

fn map(req: &Request, state: &AppState) -> ResultResp {
    let records = state.store.load()?;
    let filter = map_filter(&parse_query(req));
    html_response(pages::map_page(views::build_map(&records, &filter).as_ref()))
}

fn stats(state: &AppState) -> ResultResp {
    let records = state.store.load()?;
    html_response(pages::stats_page(views::statistics(&records).as_ref()))
}

fn form_page(
    status: u16,
    state: &AppState,
    mode: FormMode<'_>,
    draft: &PropertyDraft,
    notices: Vec<Notice>,
) -> ResultResp {
    let vm = FormVm {
        mode,
        draft,
        auto_fill_enabled: state.workflow().auto_fill_enabled(),
        notices,
    };
    html_with_status(status, pages::property_form_page(&vm))
}

fn new_form(state: &AppState) -> ResultResp {
    form_page(200, state, FormMode::Create, &PropertyDraft::default(), Vec::new())
}

fn edit_form(state: &AppState, id: &str) -> ResultResp {
    let records = state.store.load()?;
    let record = records
        .iter()
        .find(|r| r.id == id)
        .ok_or(ServerError::NotFound)?;

    let draft = PropertyDraft::from_record(record);
    form_page(200, state, FormMode::Edit { id }, &draft, Vec::new())
}

/// Outcome of a failed save, shown on the re-rendered form.
fn rejected(
    state: &AppState,
    mode: FormMode<'_>,
    draft: &PropertyDraft,
    err: WorkflowError,
) -> ResultResp {
    let status = match &err {
        WorkflowError::Validation(_) | WorkflowError::UnresolvableAddress(_) => 422,
        WorkflowError::LookupFailure(_) => 502,
        WorkflowError::Persistence(e) => {
            tracing::error!(error = %e, "Could not save property");
            500
        }
        WorkflowError::RecordNotFound(_) => return Err(ServerError::NotFound),
    };
    form_page(status, state, mode, draft, vec![Notice::error(err.to_string())])
}

fn invalid_form(
    state: &AppState,
    mode: FormMode<'_>,
    draft: &PropertyDraft,
    problems: Vec<String>,
) -> ResultResp {
    let notices = problems.into_iter().map(Notice::error).collect();
    form_page(422, state, mode, draft, notices)
}

fn create(req: Request, state: &AppState) -> ResultResp {
    let (draft, problems) = draft_from_form(&read_form(req)?);
    if !problems.is_empty() {
        return invalid_form(state, FormMode::Create, &draft, problems);
    }

    match state.workflow().create(draft.clone()) {
        Ok(_) => see_other(&query_location("/properties", "notice", "Property saved")),
        Err(e) => rejected(state, FormMode::Create, &draft, e),
    }
}

fn update(req: Request, state: &AppState, id: &str) -> ResultResp {
    let mode = FormMode::Edit { id };
    let (draft, problems) = draft_from_form(&read_form(req)?);
    if !problems.is_empty() {
        return invalid_form(state, mode, &draft, problems);
    }

    match state.workflow().update(id, draft.clone()) {
        Ok(_) => see_other(&query_location("/properties", "notice", "Property updated")),
        Err(e) => rejected(state, mode, &draft, e),
    }
}

fn delete(state: &AppState, id: &str) -> ResultResp {
    match state.workflow().delete(id) {
        Ok(removed) => see_other(&query_location(
            "/properties",
            "notice",
            &format!("Deleted {}", removed.address),
        )),
        Err(WorkflowError::RecordNotFound(_)) => Err(ServerError::NotFound),
        Err(WorkflowError::Persistence(e)) => Err(ServerError::Storage(e)),
        Err(e) => {
            tracing::error!(error = %e, "Unexpected delete failure");
            Err(ServerError::Internal)
        }
    }
}

fn auto_fill(req: Request, state: &AppState) -> ResultResp {
    let form = read_form(req)?;
    // Half-typed values are fine here; they are only carried back to the form.
    let (mut draft, _) = draft_from_form(&form);
    let url = draft.source_url.clone();

    let notice = match state.workflow().auto_fill(&url, &mut draft) {
        Ok(()) => Notice::success("Form filled from the listing. Review the values before saving."),
        Err(e @ AutoFillError::MissingUrl) => Notice::warning(e.to_string()),
        Err(e) => Notice::error(format!("{e}. Check the URL or fill in the form manually.")),
    };

    form_page(200, state, FormMode::Create, &draft, vec![notice])
}
