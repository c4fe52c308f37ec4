use vercel_runtime::{Body, Error, Response};

/// Sent on every response, preflight included, so the WordPress widget can
/// call the function from any origin.
pub const CORS_HEADERS: [(&str, &str); 3] = [
    ("Access-Control-Allow-Origin", "*"),
    ("Access-Control-Allow-Headers", "Content-Type"),
    ("Access-Control-Allow-Methods", "POST, OPTIONS"),
];

pub fn add_cors(mut resp: Response<Body>) -> Result<Response<Body>, Error> {
    let h = resp.headers_mut();
    for (name, value) in CORS_HEADERS {
        h.insert(name, value.parse()?);
    }
    Ok(resp)
}
