use serde::Deserialize;
use serde_json::json;

use crate::request::{Credential, RequestSpec};

pub const DEFAULT_BASE_URL: &str = "https://gateway.watsonplatform.net/language-translator/api";
pub const DEFAULT_MODEL: &str = "en-es-conversational";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Translation {
    pub translation: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TranslationResponse {
    pub translations: Vec<Translation>,
}

/// `POST /v2/translate` with basic auth in the URL.
pub fn translate_request<S: AsRef<str>>(
    base_url: &str,
    username: &str,
    password: &str,
    texts: &[S],
    model_id: &str,
) -> RequestSpec {
    let text: Vec<&str> = texts.iter().map(AsRef::as_ref).collect();

    RequestSpec::post(format!("{base_url}/v2/translate"))
        .credential(Credential::BasicAuth {
            username: username.into(),
            password: password.into(),
        })
        .json_body(json!({ "text": text, "model_id": model_id }))
        .error_field("error")
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{adapter::resolve, request::Method};

    #[test]
    fn request_posts_texts_with_model() {
        let spec = translate_request(DEFAULT_BASE_URL, "u", "p", &["hello", "goodbye"], DEFAULT_MODEL);
        let req = resolve(&spec).unwrap();

        assert_eq!(req.method, Method::Post);
        assert_eq!(req.url.username(), "u");
        assert_eq!(req.url.password(), Some("p"));
        assert_eq!(req.url.path(), "/language-translator/api/v2/translate");
        assert_eq!(
            req.body,
            Some(json!({"text": ["hello", "goodbye"], "model_id": "en-es-conversational"}))
        );
    }
}
