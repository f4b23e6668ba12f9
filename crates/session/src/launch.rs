//! Launch URL inspection

use url::Url;

/// Extract the charge identifier from the launch URL's query parameters
///
/// Present when the buyer was redirected back from a confirmation page; an
/// empty value counts as absent.
pub fn charge_id_from_url(launch_url: &str) -> Option<String> {
    let url = Url::parse(launch_url).ok()?;
    url.query_pairs()
        .find(|(key, _)| key == "id")
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
}
