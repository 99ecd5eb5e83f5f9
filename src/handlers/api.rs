//! `api` placeholder - fetch a value out of a remote JSON endpoint

use crate::cache::ExpiringCache;
use crate::error::HttpError;
use crate::extract::extract;
use crate::model::{JsonCodec, SerdeJsonCodec, Structured};
use crate::net::{HttpDispatch, HttpRequestSpec, ReqwestDispatch};
use crate::placeholder::{HandlerId, Invocation, Placeholder};
use log::warn;
use regex::Regex;
use std::any::Any;
use std::sync::{Arc, LazyLock};
use std::time::Duration;

/// Rewrites a matched occurrence with the extraction-path argument blanked,
/// producing the canonical cache key: distinct paths against the same
/// request share one cached response document.
static CUT_ORIGIN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"api\((.+?),(.*?),(.*?),(.*?),(.*?)\)").unwrap());

const CACHE_TTL: Duration = Duration::from_secs(30);
const CACHE_CAPACITY: usize = 1_500;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Pair separator inside the header and body arguments.
const PAIR_SEPARATOR: &str = ";;";

/// Fetches JSON from an endpoint and substitutes a path-extracted value.
///
/// `<api(url,path,method,headers,body)>`: `headers` and `body` are
/// `;;`-separated `key=value` lists (malformed pairs are skipped).
/// GET and DELETE send no body; POST and PUT serialize the body pairs as a
/// JSON object; any other method echoes the origin. The deserialized
/// response is cached for 30 seconds, keyed by the canonicalized match
/// text, and cache hits navigate an independent copy of the document.
pub struct ApiPlaceholder {
    codec: Arc<dyn JsonCodec>,
    http: Arc<dyn HttpDispatch>,
    cache: ExpiringCache<Arc<dyn Structured>>,
}

impl ApiPlaceholder {
    /// Registry identity for this handler type.
    pub const ID: HandlerId = HandlerId("api");

    /// Build with explicit codec and dispatcher collaborators.
    pub fn new(codec: Arc<dyn JsonCodec>, http: Arc<dyn HttpDispatch>) -> Self {
        Self {
            codec,
            http,
            cache: ExpiringCache::new(CACHE_TTL, CACHE_CAPACITY),
        }
    }

    /// Build with the `serde_json` codec and a blocking `reqwest`
    /// dispatcher using a 10 second request timeout.
    pub fn with_defaults() -> Result<Self, HttpError> {
        Ok(Self::new(
            Arc::new(SerdeJsonCodec),
            Arc::new(ReqwestDispatch::new(REQUEST_TIMEOUT)?),
        ))
    }

    /// Release the cached response documents.
    pub fn destroy(&self) {
        self.cache.clear();
    }

    fn fetch_and_extract(&self, invocation: &Invocation<'_>) -> Option<String> {
        let arguments = &invocation.arguments;
        if arguments.len() < 5 {
            return None;
        }
        let path = &arguments[1];

        let cache_key = cut_origin(invocation.origin)?;

        if let Some(document) = self.cache.get(&cache_key) {
            return render_extracted(extract(document.independent_copy(), path));
        }

        let request = HttpRequestSpec {
            method: arguments[2].clone(),
            uri: arguments[0].clone(),
            headers: request_headers(&arguments[3]),
            body: self.request_body(&arguments[2], &arguments[4])?,
        };
        let response = match self.http.dispatch(&request) {
            Ok(response) => response,
            Err(error) => {
                warn!("api placeholder request to {} failed: {error}", request.uri);
                return None;
            }
        };

        let document: Arc<dyn Structured> = Arc::from(self.codec.deserialize(&response));
        self.cache.insert(cache_key, Arc::clone(&document));
        render_extracted(extract(document.independent_copy(), path))
    }

    /// `None` means the method is unsupported; `Some(None)` is a bodyless
    /// request.
    fn request_body(&self, method: &str, raw_pairs: &str) -> Option<Option<String>> {
        match method {
            "GET" | "DELETE" => Some(None),
            "POST" | "PUT" => Some(Some(self.codec.serialize_pairs(&split_pairs(raw_pairs)))),
            _ => None,
        }
    }
}

impl Placeholder for ApiPlaceholder {
    fn identity(&self) -> HandlerId {
        Self::ID
    }

    fn tag(&self) -> &str {
        "api"
    }

    fn parse(&self, _context: Option<&dyn Any>, invocation: &Invocation<'_>) -> String {
        self.fetch_and_extract(invocation)
            .unwrap_or_else(|| invocation.origin.to_string())
    }
}

/// Blank the path argument (group 2) out of the matched span. The
/// surrounding delimiters are left as they were matched.
fn cut_origin(origin: &str) -> Option<String> {
    if !CUT_ORIGIN_PATTERN.is_match(origin) {
        return None;
    }
    Some(
        CUT_ORIGIN_PATTERN
            .replace(origin, "api(${1},,${3},${4},${5})")
            .into_owned(),
    )
}

fn split_pairs(raw: &str) -> Vec<(String, String)> {
    raw.split(PAIR_SEPARATOR)
        .filter_map(|pair| {
            let parts: Vec<&str> = pair.split('=').collect();
            if parts.len() < 2 {
                return None;
            }
            Some((parts[0].to_string(), parts[1].to_string()))
        })
        .collect()
}

fn request_headers(raw: &str) -> Vec<(String, String)> {
    let mut headers = split_pairs(raw);
    // Always overridden, whatever the occurrence supplied.
    headers.push(("User-Agent".to_string(), "tagexpand".to_string()));
    headers.push(("Content-Type".to_string(), "application/json".to_string()));
    headers
}

fn render_extracted(extracted: Option<Box<dyn Structured>>) -> Option<String> {
    let value = extracted?;
    if value.is_absent() {
        return None;
    }
    Some(value.render())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CannedDispatch {
        response: String,
        requests: AtomicUsize,
        last_body: Mutex<Option<String>>,
    }

    impl CannedDispatch {
        fn new(response: &str) -> Arc<Self> {
            Arc::new(Self {
                response: response.to_string(),
                requests: AtomicUsize::new(0),
                last_body: Mutex::new(None),
            })
        }
    }

    impl HttpDispatch for CannedDispatch {
        fn dispatch(&self, request: &HttpRequestSpec) -> Result<String, HttpError> {
            self.requests.fetch_add(1, Ordering::SeqCst);
            *self.last_body.lock().unwrap() = request.body.clone();
            Ok(self.response.clone())
        }
    }

    struct FailingDispatch;

    impl HttpDispatch for FailingDispatch {
        fn dispatch(&self, request: &HttpRequestSpec) -> Result<String, HttpError> {
            Err(HttpError::UnsupportedMethod {
                method: request.method.clone(),
            })
        }
    }

    fn handler_with(dispatch: Arc<dyn HttpDispatch>) -> ApiPlaceholder {
        ApiPlaceholder::new(Arc::new(SerdeJsonCodec), dispatch)
    }

    fn invocation<'a>(origin: &'a str, arguments: &[&str]) -> Invocation<'a> {
        Invocation {
            origin,
            arguments: arguments.iter().map(|s| s.to_string()).collect(),
            start_delimiter: '<',
            end_delimiter: '>',
        }
    }

    const ORIGIN: &str = "<api(http://localhost:4000/example,user.name,GET,,)>";
    const ARGS: [&str; 5] = ["http://localhost:4000/example", "user.name", "GET", "", ""];

    #[test]
    fn extracts_from_the_response_body() {
        let handler = handler_with(CannedDispatch::new(r#"{"user":{"name":"Oliwer"}}"#));
        assert_eq!(handler.parse(None, &invocation(ORIGIN, &ARGS)), "Oliwer");
    }

    #[test]
    fn second_occurrence_with_same_canonical_key_hits_the_cache() {
        let dispatch = CannedDispatch::new(r#"{"user":{"name":"Oliwer","age":18}}"#);
        let handler = handler_with(dispatch.clone());

        assert_eq!(handler.parse(None, &invocation(ORIGIN, &ARGS)), "Oliwer");

        // Same request, different path: served from cache.
        let age_origin = "<api(http://localhost:4000/example,user.age,GET,,)>";
        let age_args = ["http://localhost:4000/example", "user.age", "GET", "", ""];
        assert_eq!(handler.parse(None, &invocation(age_origin, &age_args)), "18");

        assert_eq!(dispatch.requests.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn post_serializes_body_pairs_as_json() {
        let dispatch = CannedDispatch::new(r#"{"ok":true}"#);
        let handler = handler_with(dispatch.clone());

        let origin = "<api(http://localhost:4000/example,ok,POST,,name=Oliwer;;age=18)>";
        let args = [
            "http://localhost:4000/example",
            "ok",
            "POST",
            "",
            "name=Oliwer;;age=18",
        ];
        assert_eq!(handler.parse(None, &invocation(origin, &args)), "true");

        let body = dispatch.last_body.lock().unwrap().clone().unwrap();
        let value: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(value["name"], "Oliwer");
        assert_eq!(value["age"], "18");
    }

    #[test]
    fn malformed_header_pairs_are_skipped() {
        let headers = request_headers("ok=1;;broken;;also=2");
        assert!(headers.contains(&("ok".to_string(), "1".to_string())));
        assert!(headers.contains(&("also".to_string(), "2".to_string())));
        assert!(!headers.iter().any(|(name, _)| name == "broken"));
        // The overrides are always appended last.
        assert_eq!(headers.last().unwrap().0, "Content-Type");
    }

    #[test]
    fn unsupported_method_echoes_origin() {
        let handler = handler_with(CannedDispatch::new("{}"));
        let origin = "<api(http://localhost:4000/example,a,PATCH,,)>";
        let args = ["http://localhost:4000/example", "a", "PATCH", "", ""];
        assert_eq!(handler.parse(None, &invocation(origin, &args)), origin);
    }

    #[test]
    fn network_failure_echoes_origin() {
        let handler = handler_with(Arc::new(FailingDispatch));
        assert_eq!(handler.parse(None, &invocation(ORIGIN, &ARGS)), ORIGIN);
    }

    #[test]
    fn absent_extraction_echoes_origin() {
        let handler = handler_with(CannedDispatch::new(r#"{"other":1}"#));
        assert_eq!(handler.parse(None, &invocation(ORIGIN, &ARGS)), ORIGIN);
    }

    #[test]
    fn too_few_arguments_echoes_origin() {
        let handler = handler_with(CannedDispatch::new("{}"));
        let origin = "<api(http://localhost:4000/example)>";
        assert_eq!(
            handler.parse(None, &invocation(origin, &["http://localhost:4000/example"])),
            origin
        );
    }

    #[test]
    fn destroy_clears_the_cache() {
        let dispatch = CannedDispatch::new(r#"{"user":{"name":"Oliwer"}}"#);
        let handler = handler_with(dispatch.clone());

        handler.parse(None, &invocation(ORIGIN, &ARGS));
        handler.destroy();
        handler.parse(None, &invocation(ORIGIN, &ARGS));

        assert_eq!(dispatch.requests.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn cut_origin_blanks_only_the_path_argument() {
        let cut = cut_origin(ORIGIN).unwrap();
        assert_eq!(cut, "<api(http://localhost:4000/example,,GET,,)>");
    }
}
