// Test Execution Engine
//
// Walks a `MethodTests` table bucket by bucket, resolves each scenario's
// references, dispatches it to the resource operation for the bucket's verb
// and runs every expectation against the outcome. Scenarios run strictly one
// after another: they share server-side state.

use async_trait::async_trait;
use serde::Serialize;
use std::fmt::Debug;
use tracing::Instrument;

use super::case::{MethodTests, Scenario, TestCase};
use super::checks;
use super::reference::{resolve_body, IdRef, Resolve, Resolver};
use super::report::{Report, ScenarioResult, Verdict};
use super::verb::Verb;
use crate::client::{Outcome, RequestOptions};
use crate::core::{HarnessError, Result};

/// An API resource the engine can drive
///
/// Operations a resource does not implement report
/// `HarnessError::UnsupportedOperation`.
#[async_trait]
pub trait Resource: Send + Sync {
    /// Client session type the scenarios are issued through
    type Session: Send + Sync;
    /// Response item handed to checkers
    type Item: Serialize + Debug + Send + Sync;
    /// Request body, with references resolved before dispatch
    type Body: Serialize + Resolve + Debug + Send + Sync;

    fn name(&self) -> &'static str;

    async fn read(
        &self,
        _session: &Self::Session,
        _endpoint: Option<i64>,
        _options: &RequestOptions,
    ) -> Result<Outcome<Self::Item>> {
        Err(HarnessError::unsupported(self.name(), Verb::Get))
    }

    async fn create(
        &self,
        _session: &Self::Session,
        _endpoint: Option<i64>,
        _body: Option<&Self::Body>,
        _options: &RequestOptions,
    ) -> Result<Outcome<Self::Item>> {
        Err(HarnessError::unsupported(self.name(), Verb::Post))
    }

    async fn update(
        &self,
        _session: &Self::Session,
        _endpoint: Option<i64>,
        _body: Option<&Self::Body>,
        _options: &RequestOptions,
    ) -> Result<Outcome<Self::Item>> {
        Err(HarnessError::unsupported(self.name(), Verb::Put))
    }

    async fn delete(
        &self,
        _session: &Self::Session,
        _endpoint: Option<i64>,
        _body: Option<&Self::Body>,
        _options: &RequestOptions,
    ) -> Result<Outcome<Self::Item>> {
        Err(HarnessError::unsupported(self.name(), Verb::Delete))
    }
}

/// Require an endpoint id for operations addressed by path
pub fn require_endpoint(resource: &'static str, endpoint: Option<i64>) -> Result<i64> {
    endpoint.ok_or(HarnessError::MissingEndpoint(resource))
}

/// A scenario after its resolution phase
struct Prepared<B> {
    endpoint: Option<i64>,
    body: Option<B>,
    options: RequestOptions,
}

/// Runs tables against resources, resolving references through `resolver`
pub struct Engine<'r> {
    resolver: &'r dyn Resolver,
}

impl<'r> Engine<'r> {
    pub fn new(resolver: &'r dyn Resolver) -> Self {
        Self { resolver }
    }

    /// Run every bucket and scenario in declaration order
    pub async fn run<R: Resource>(&self, resource: &R, tests: MethodTests<R>) -> Report {
        let mut report = Report::new(resource.name());

        for bucket in tests.into_buckets() {
            let verb = Verb::from_bucket(&bucket.method);

            for Scenario { name, case } in bucket.scenarios {
                let span = tracing::info_span!(
                    "scenario",
                    resource = resource.name(),
                    method = %bucket.method,
                    scenario = %name
                );

                let verdict = match verb {
                    Some(verb) => self.execute(resource, verb, case).instrument(span.clone()).await,
                    None => Verdict::Errored(HarnessError::UnsupportedVerb(bucket.method.clone())),
                };

                span.in_scope(|| match &verdict {
                    Verdict::Passed => tracing::info!("Scenario passed"),
                    Verdict::Failed(failures) => {
                        for failure in failures {
                            tracing::warn!(failure = %failure, "Expectation failed");
                        }
                    }
                    Verdict::Errored(error) => tracing::error!(error = %error, "Scenario errored"),
                });

                report.push(ScenarioResult {
                    method: bucket.method.clone(),
                    name,
                    verdict,
                });
            }
        }

        report
    }

    async fn execute<R: Resource>(&self, resource: &R, verb: Verb, case: TestCase<R>) -> Verdict {
        let TestCase {
            session,
            endpoint,
            params,
            headers,
            body,
            expectations,
        } = case;

        let prepared = match self.prepare(endpoint, params, headers, body).await {
            Ok(prepared) => prepared,
            Err(error) => return Verdict::Errored(error),
        };

        let body = prepared.body.as_ref();
        let dispatched = match verb {
            Verb::Get => resource.read(&*session, prepared.endpoint, &prepared.options).await,
            Verb::Post => {
                resource
                    .create(&*session, prepared.endpoint, body, &prepared.options)
                    .await
            }
            Verb::Put => {
                resource
                    .update(&*session, prepared.endpoint, body, &prepared.options)
                    .await
            }
            Verb::Delete => {
                resource
                    .delete(&*session, prepared.endpoint, body, &prepared.options)
                    .await
            }
        };

        let outcome = match dispatched {
            Ok(outcome) => outcome,
            Err(error) => return Verdict::Errored(error),
        };

        let failures = checks::run_all(&expectations, &outcome);
        if failures.is_empty() {
            Verdict::Passed
        } else {
            Verdict::Failed(failures)
        }
    }

    /// Resolution phase: endpoint id, query parameters, body references
    async fn prepare<B: Resolve>(
        &self,
        endpoint: Option<IdRef>,
        params: Vec<(String, super::reference::ParamValue)>,
        headers: Vec<(reqwest::header::HeaderName, String)>,
        body: Option<B>,
    ) -> Result<Prepared<B>> {
        let endpoint = match endpoint {
            Some(mut id) => Some(id.resolve(self.resolver).await?),
            None => None,
        };

        let mut options = RequestOptions::new();
        for (key, value) in params {
            let value = value.resolve(self.resolver).await?;
            options = options.query(key, value);
        }
        for (name, value) in headers {
            options = options.header(name, &value)?;
        }

        let body = match body {
            Some(mut body) => {
                resolve_body(&mut body, self.resolver).await?;
                Some(body)
            }
            None => None,
        };

        Ok(Prepared {
            endpoint,
            body,
            options,
        })
    }
}
