mod fetch_error;
mod fetcher;

pub use fetch_error::FetchError;
pub use fetcher::PageFetcher;

pub trait ContentFetcher: Send + Sync {
    /// Visible text of the page at `url`, or an empty string if it could not
    /// be loaded. Failures are logged, never returned.
    fn fetch(&self, url: &str) -> String;
}
