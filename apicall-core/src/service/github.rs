use serde::Deserialize;

use crate::request::{Credential, RequestSpec};

pub const DEFAULT_BASE_URL: &str = "https://api.github.com";
pub const DEFAULT_SORT: &str = "created";

const USER_AGENT: &str = "apicall";
const ACCEPT: &str = "application/vnd.github+json";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Repo {
    pub name: String,
}

/// `GET /users/{user}/repos`. The token is optional: anonymous listing works,
/// only with a lower rate limit.
pub fn list_repos_request(base_url: &str, user: &str, sort: &str, token: Option<&str>) -> RequestSpec {
    let mut builder = RequestSpec::get(format!("{base_url}/users/{{user}}/repos"))
        .path_param("user", user)
        .query("sort", sort)
        .header("User-Agent", USER_AGENT)
        .header("Accept", ACCEPT)
        .error_field("message");

    if let Some(token) = token {
        builder = builder.credential(Credential::Header {
            name: "Authorization".into(),
            value: format!("token {token}"),
        });
    }

    builder.build()
}
