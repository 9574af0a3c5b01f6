//! Resolving the graph description from a page location.
//!
//! A location carries its graph in one of two places:
//!
//! - the fragment: `https://host/viewer#digraph%20G%20%7B%20A-%3EB%20%7D`
//! - a `path` query parameter naming a file to fetch: `https://host/viewer?path=graph.dot`
//!
//! The fragment always wins. The file is fetched first (if named), and only
//! then is the fragment consulted, so fragment content deterministically
//! overrides fetched content no matter how the fetch went.

use std::{fs, io, time::Duration};

use log::{debug, info, warn};
use percent_encoding::percent_decode_str;
use thiserror::Error;
use url::Url;

/// Query parameter naming a remote graph description file.
pub const PATH_PARAM: &str = "path";

/// Where a [`GraphSource`] came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceOrigin {
    /// Decoded from the location fragment.
    Fragment,
    /// Fetched from the given URL.
    File(Url),
}

/// A graph description ready to be handed to a layout engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphSource {
    text: String,
    origin: SourceOrigin,
}

impl GraphSource {
    pub fn new(text: impl Into<String>, origin: SourceOrigin) -> Self {
        Self {
            text: text.into(),
            origin,
        }
    }

    /// Returns the graph description text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns where the text came from.
    pub fn origin(&self) -> &SourceOrigin {
        &self.origin
    }

    /// Consumes the source, returning its text.
    pub fn into_text(self) -> String {
        self.text
    }
}

/// Why no graph description could be resolved.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("no graph source found in the location fragment or `path` parameter")]
    NoSource,

    #[error("location fragment is not valid percent-encoded UTF-8")]
    MalformedFragment,
}

/// Failure to retrieve a `path=` file.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("{url} answered with status {status}")]
    Status { url: Url, status: u16 },

    #[error("request to {url} failed: {source}")]
    Transport {
        url: Url,
        #[source]
        source: Box<ureq::Error>,
    },

    #[error("failed to read {url}: {source}")]
    Io {
        url: Url,
        #[source]
        source: io::Error,
    },

    #[error("unsupported scheme `{0}`")]
    UnsupportedScheme(String),
}

/// Retrieves the contents of a remote graph description file.
pub trait Fetch {
    /// Returns the body of `url` verbatim.
    fn fetch(&self, url: &Url) -> Result<String, FetchError>;
}

/// Fetches `http`/`https` URLs over the network and `file` URLs from disk.
pub struct UrlFetcher {
    agent: ureq::Agent,
}

impl UrlFetcher {
    /// Creates a fetcher whose requests give up after `timeout`.
    pub fn new(timeout: Duration) -> Self {
        let config = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .build();
        Self {
            agent: ureq::Agent::new_with_config(config),
        }
    }

    fn fetch_http(&self, url: &Url) -> Result<String, FetchError> {
        let mut response = self.agent.get(url.as_str()).call().map_err(|err| match err {
            ureq::Error::StatusCode(status) => FetchError::Status {
                url: url.clone(),
                status,
            },
            other => FetchError::Transport {
                url: url.clone(),
                source: Box::new(other),
            },
        })?;

        response
            .body_mut()
            .read_to_string()
            .map_err(|err| FetchError::Transport {
                url: url.clone(),
                source: Box::new(err),
            })
    }

    fn fetch_file(url: &Url) -> Result<String, FetchError> {
        let path = url
            .to_file_path()
            .map_err(|()| FetchError::UnsupportedScheme(url.scheme().to_string()))?;
        fs::read_to_string(path).map_err(|source| FetchError::Io {
            url: url.clone(),
            source,
        })
    }
}

impl Fetch for UrlFetcher {
    fn fetch(&self, url: &Url) -> Result<String, FetchError> {
        match url.scheme() {
            "http" | "https" => self.fetch_http(url),
            "file" => Self::fetch_file(url),
            scheme => Err(FetchError::UnsupportedScheme(scheme.to_string())),
        }
    }
}

/// Determines the graph description for `location`.
///
/// 1. If a `path` query parameter is present, it is resolved against the
///    location and fetched. Failures are logged and treated as "no file".
/// 2. A non-empty fragment is percent-decoded and overrides any fetched text.
/// 3. If neither produced non-empty text, resolution fails.
///
/// # Errors
///
/// Returns [`ResolveError::NoSource`] when nothing was found and
/// [`ResolveError::MalformedFragment`] when the fragment does not decode to
/// UTF-8 text.
pub fn resolve(location: &Url, fetcher: &dyn Fetch) -> Result<GraphSource, ResolveError> {
    let mut source = fetch_path_parameter(location, fetcher);

    if let Some(text) = fragment_text(location)? {
        if source.is_some() {
            debug!("Fragment overrides fetched source");
        }
        source = Some(GraphSource::new(text, SourceOrigin::Fragment));
    }

    match source {
        Some(source) if !source.text().is_empty() => {
            info!(origin:? = source.origin(), bytes = source.text().len(); "Resolved graph source");
            Ok(source)
        }
        _ => Err(ResolveError::NoSource),
    }
}

fn fetch_path_parameter(location: &Url, fetcher: &dyn Fetch) -> Option<GraphSource> {
    let path = location
        .query_pairs()
        .find(|(key, _)| key == PATH_PARAM)
        .map(|(_, value)| value.into_owned())?;

    let url = match location.join(&path) {
        Ok(url) => url,
        Err(err) => {
            warn!(path, err:%; "Ignoring unresolvable `path` parameter");
            return None;
        }
    };

    debug!(url:% = url; "Fetching graph source");
    match fetcher.fetch(&url) {
        Ok(text) => Some(GraphSource::new(text, SourceOrigin::File(url))),
        Err(err) => {
            warn!(err:%; "Could not fetch graph source");
            None
        }
    }
}

/// Returns the decoded fragment, or `None` if it is absent or empty.
fn fragment_text(location: &Url) -> Result<Option<String>, ResolveError> {
    match location.fragment() {
        Some(fragment) if !fragment.is_empty() => percent_decode_str(fragment)
            .decode_utf8()
            .map(|text| Some(text.into_owned()))
            .map_err(|_| ResolveError::MalformedFragment),
        _ => Ok(None),
    }
}


#[cfg(test)]
mod proptest_tests {
    use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
    use proptest::prelude::*;

    use super::*;

    struct FixedFetcher(Option<String>);

    impl Fetch for FixedFetcher {
        fn fetch(&self, url: &Url) -> Result<String, FetchError> {
            self.0.clone().ok_or_else(|| FetchError::Status {
                url: url.clone(),
                status: 503,
            })
        }
    }

    fn fetch_outcome_strategy() -> impl Strategy<Value = Option<String>> {
        prop_oneof![Just(None), any::<String>().prop_map(Some)]
    }

    /// A non-empty fragment is the resolved source whatever the fetch returned.
    fn check_fragment_precedence(text: String, fetched: Option<String>) -> Result<(), TestCaseError> {
        let encoded = utf8_percent_encode(&text, NON_ALPHANUMERIC).to_string();
        let location = Url::parse(&format!("https://viewer.test/?path=g.dot#{encoded}")).unwrap();

        let source = resolve(&location, &FixedFetcher(fetched)).unwrap();

        prop_assert_eq!(source.text(), text.as_str());
        prop_assert_eq!(source.origin(), &SourceOrigin::Fragment);
        Ok(())
    }

    proptest! {
        #[test]
        fn fragment_always_wins(text in ".+", fetched in fetch_outcome_strategy()) {
            check_fragment_precedence(text, fetched)?;
        }
    }
}
