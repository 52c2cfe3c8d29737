use serde::Deserialize;

use crate::request::{Credential, RequestSpec};

pub const DEFAULT_BASE_URL: &str = "http://api.ipstack.com";

/// Location of the caller's public IP.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Location {
    pub city: Option<String>,
    pub region_code: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
}

/// `GET /check`: geolocate the requesting IP.
pub fn locate_request(base_url: &str, access_key: &str) -> RequestSpec {
    RequestSpec::get(format!("{base_url}/check"))
        .credential(Credential::QueryToken {
            name: "access_key".into(),
            value: access_key.into(),
        })
        .error_field("error")
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::{redacted_url, resolve};

    #[test]
    fn access_key_goes_into_query() {
        let req = resolve(&locate_request(DEFAULT_BASE_URL, "KEY")).unwrap();
        assert_eq!(req.url.as_str(), "http://api.ipstack.com/check?access_key=KEY");
    }

    #[test]
    fn logged_url_hides_access_key() {
        let spec = locate_request(DEFAULT_BASE_URL, "ab+c/d=e");
        assert_eq!(redacted_url(&spec), "http://api.ipstack.com/check?access_key=***");
    }

    #[test]
    fn location_tolerates_missing_city() {
        let loc: Location =
            serde_json::from_str(r#"{"city":null,"region_code":"ON","latitude":43.6,"longitude":-79.4}"#)
                .unwrap();

        assert!(loc.city.is_none());
        assert_eq!(loc.region_code.as_deref(), Some("ON"));
        assert_eq!(loc.longitude, -79.4);
    }
}
