//! The four console flows, each built on one (or two chained) adapter calls.

use std::{fmt::Display, io::Write};

use anyhow::{Context, Result};
use chrono::{Local, TimeZone};
use tracing::info;

use crate::{
    adapter::ApiAdapter,
    config::{Config, CredentialKey},
    error::ApiResult,
    report,
    service::{
        Endpoints,
        darksky::{self, Forecast},
        github::{self, Repo},
        ipstack::{self, Location},
        watson::{self, TranslationResponse},
    },
    transport::Transport,
};

/// Adapter, credentials and service locations shared by the scripts.
#[derive(Debug)]
pub struct Scripts<T: Transport> {
    adapter: ApiAdapter<T>,
    config: Config,
    endpoints: Endpoints,
}

impl<T: Transport> Scripts<T> {
    pub fn new(adapter: ApiAdapter<T>, config: Config) -> Self {
        Self {
            adapter,
            config,
            endpoints: Endpoints::default(),
        }
    }

    pub fn with_endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    pub fn adapter(&self) -> &ApiAdapter<T> {
        &self.adapter
    }

    /// Print every repository name of `user`, then the count.
    pub async fn list_repos<W: Write + ?Sized>(&self, user: &str, sort: &str, out: &mut W) -> Result<usize> {
        let spec = github::list_repos_request(
            &self.endpoints.github,
            user,
            sort,
            self.config.credential(CredentialKey::GithubToken),
        );

        let repos: Vec<Repo> = self
            .adapter
            .call(&spec)
            .await
            .with_context(|| format!("Failed to list repositories of '{user}'"))?;

        info!(user, count = repos.len(), "listed repositories");
        report::write_lines(out, report::repo_lines(&repos))?;

        Ok(repos.len())
    }

    /// Banner, location of this machine, then a week of forecast in local time.
    pub async fn weekly_forecast<W: Write + ?Sized>(&self, out: &mut W) -> Result<()> {
        self.weekly_forecast_in(&Local, out).await
    }

    pub async fn weekly_forecast_in<Tz, W>(&self, tz: &Tz, out: &mut W) -> Result<()>
    where
        Tz: TimeZone,
        Tz::Offset: Display,
        W: Write + ?Sized,
    {
        report::write_lines(out, report::LEGAL_LINES)?;

        let location = self.locate().await.context("Failed to look up location")?;
        report::write_lines(out, [report::location_line(&location)])?;

        let spec = darksky::forecast_request(
            &self.endpoints.darksky,
            self.config.credential_or_empty(CredentialKey::DarkskySecretKey),
            location.latitude,
            location.longitude,
        );
        let forecast: Forecast = self
            .adapter
            .call(&spec)
            .await
            .context("Failed to retrieve forecast")?;

        report::write_lines(out, report::forecast_lines(&forecast, tz))?;
        Ok(())
    }

    async fn locate(&self) -> ApiResult<Location> {
        let spec = ipstack::locate_request(
            &self.endpoints.ipstack,
            self.config.credential_or_empty(CredentialKey::IpstackAccessKey),
        );
        let location: Location = self.adapter.call(&spec).await?;
        info!(
            latitude = location.latitude,
            longitude = location.longitude,
            "located"
        );
        Ok(location)
    }

    /// Translate `texts` with `model_id` and print one translation per line.
    pub async fn translate<S, W>(&self, texts: &[S], model_id: &str, out: &mut W) -> Result<()>
    where
        S: AsRef<str>,
        W: Write + ?Sized,
    {
        let spec = watson::translate_request(
            &self.endpoints.watson,
            self.config.credential_or_empty(CredentialKey::WatsonUsername),
            self.config.credential_or_empty(CredentialKey::WatsonPassword),
            texts,
            model_id,
        );

        self.adapter
            .call_with(&spec, |result: ApiResult<TranslationResponse>| -> Result<()> {
                let response = result.context("Translation failed")?;
                report::write_lines(out, report::translation_lines(&response))?;
                Ok(())
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::ApiFailure, transport::ReqwestTransport};
    use chrono::Utc;
    use serde_json::json;
    use wiremock::matchers::{basic_auth, body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config() -> Config {
        Config::default()
            .with_env(
                [
                    ("IPSTACK_SK", "IPKEY"),
                    ("DARKSKY_SK", "DSKEY"),
                    ("WATSON_USERNAME", "user"),
                    ("WATSON_PASSWORD", "pass"),
                ]
                .map(|(k, v)| (k.to_string(), v.to_string())),
            )
            .unwrap()
    }

    fn scripts(server: &MockServer) -> Scripts<ReqwestTransport> {
        Scripts::new(ApiAdapter::new(ReqwestTransport::new()), config())
            .with_endpoints(Endpoints::all_at(&server.uri()))
    }

    fn output(out: Vec<u8>) -> Vec<String> {
        String::from_utf8(out).unwrap().lines().map(str::to_owned).collect()
    }

    #[tokio::test]
    async fn list_repos_prints_names_then_count() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/jensen/repos"))
            .and(query_param("sort", "created"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!([{"name": "a"}, {"name": "b"}])),
            )
            .expect(1)
            .mount(&server)
            .await;

        let mut out = Vec::new();
        let count = scripts(&server)
            .list_repos("jensen", github::DEFAULT_SORT, &mut out)
            .await
            .unwrap();

        assert_eq!(count, 2);
        assert_eq!(output(out), vec!["a", "b", "2 repos"]);
    }

    #[tokio::test]
    async fn list_repos_reports_github_message() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "Not Found"})))
            .mount(&server)
            .await;

        let mut out = Vec::new();
        let err = scripts(&server)
            .list_repos("nobody", github::DEFAULT_SORT, &mut out)
            .await
            .unwrap_err();

        let failure = err.downcast_ref::<ApiFailure>().expect("adapter failure");
        assert_eq!(failure.application_message(), Some("Not Found"));
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn weekly_forecast_chains_location_into_forecast() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/check"))
            .and(query_param("access_key", "IPKEY"))
            .respond_with(ResponseTemplate::new(200).set_body_json(
                json!({"city": "X", "region_code": "Y", "latitude": 1, "longitude": 2}),
            ))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/forecast/DSKEY/1,2/"))
            .and(query_param("units", "ca"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "daily": {"data": [
                    {"time": 1_520_208_000, "icon": "clear-day", "temperatureHigh": 20.4, "temperatureLow": 9.6},
                    {"time": 1_520_294_400, "icon": "snow", "temperatureHigh": -1.2, "temperatureLow": -7.5}
                ]}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let mut out = Vec::new();
        scripts(&server).weekly_forecast_in(&Utc, &mut out).await.unwrap();

        assert_eq!(
            output(out),
            vec![
                "Powered by Dark Sky",
                "https://darksky.net/poweredby/",
                "------------------------------",
                "Location: X, Y",
                "Monday, March 5th\t\t10° to 20° ☀️",
                "Tuesday, March 6th\t\t-7° to -1° ❄️",
            ]
        );
    }

    #[tokio::test]
    async fn failed_location_skips_forecast() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/check"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": false,
                "error": {"code": 101, "type": "invalid_access_key", "info": "bad key"}
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/forecast/DSKEY/1,2/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"daily": {"data": []}})))
            .expect(0)
            .mount(&server)
            .await;

        let mut out = Vec::new();
        let err = scripts(&server).weekly_forecast_in(&Utc, &mut out).await.unwrap_err();

        let failure = err.downcast_ref::<ApiFailure>().expect("adapter failure");
        assert_eq!(failure.application_message(), Some("bad key"));
        assert_eq!(output(out).len(), report::LEGAL_LINES.len());
    }

    #[tokio::test]
    async fn translate_prints_each_translation() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v2/translate"))
            .and(basic_auth("user", "pass"))
            .and(body_json(json!({"text": ["hello", "goodbye"], "model_id": watson::DEFAULT_MODEL})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "translations": [{"translation": "hola"}, {"translation": "adiós"}],
                "word_count": 2,
                "character_count": 12
            })))
            .expect(1)
            .mount(&server)
            .await;

        let mut out = Vec::new();
        scripts(&server)
            .translate(&["hello", "goodbye"], watson::DEFAULT_MODEL, &mut out)
            .await
            .unwrap();

        assert_eq!(output(out), vec!["hola", "adiós"]);
    }

    #[tokio::test]
    async fn translate_error_body_prints_nothing() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v2/translate"))
            .respond_with(
                ResponseTemplate::new(404).set_body_json(json!({"code": 404, "error": "invalid model"})),
            )
            .mount(&server)
            .await;

        let mut out = Vec::new();
        let err = scripts(&server)
            .translate(&["hello"], "xx-yy", &mut out)
            .await
            .unwrap_err();

        let failure = err.downcast_ref::<ApiFailure>().expect("adapter failure");
        assert_eq!(failure.to_string(), "invalid model");
        assert!(out.is_empty());
    }
}
