// Test Case Table
//
// Method bucket → scenario name → declarative case. Buckets and scenarios
// keep declaration order: later buckets rely on the side effects of earlier
// ones (a "GET AFTER CHANGES" bucket reads what "PUT" wrote).

use reqwest::header::HeaderName;
use std::sync::Arc;

use super::checks::Check;
use super::engine::Resource;
use super::reference::{IdRef, ParamValue};

/// One declarative scenario
pub struct TestCase<R: Resource> {
    pub(crate) session: Arc<R::Session>,
    pub(crate) endpoint: Option<IdRef>,
    pub(crate) params: Vec<(String, ParamValue)>,
    pub(crate) headers: Vec<(HeaderName, String)>,
    pub(crate) body: Option<R::Body>,
    pub(crate) expectations: Vec<Check<R::Item>>,
}

impl<R: Resource> TestCase<R> {
    /// Scenario issued through `session`
    pub fn new(session: Arc<R::Session>) -> Self {
        Self {
            session,
            endpoint: None,
            params: Vec::new(),
            headers: Vec::new(),
            body: None,
            expectations: Vec::new(),
        }
    }

    /// Entity the operation targets (path id)
    pub fn endpoint(mut self, id: impl Into<IdRef>) -> Self {
        self.endpoint = Some(id.into());
        self
    }

    pub fn param(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    pub fn header(mut self, name: HeaderName, value: impl Into<String>) -> Self {
        self.headers.push((name, value.into()));
        self
    }

    pub fn body(mut self, body: R::Body) -> Self {
        self.body = Some(body);
        self
    }

    pub fn expect(mut self, check: Check<R::Item>) -> Self {
        self.expectations.push(check);
        self
    }
}

/// A named scenario inside a method bucket
pub struct Scenario<R: Resource> {
    pub name: String,
    pub case: TestCase<R>,
}

/// Ordered scenarios of one method bucket
pub struct Scenarios<R: Resource> {
    scenarios: Vec<Scenario<R>>,
}

impl<R: Resource> Scenarios<R> {
    pub fn new() -> Self {
        Self {
            scenarios: Vec::new(),
        }
    }

    pub fn scenario(mut self, name: impl Into<String>, case: TestCase<R>) -> Self {
        self.scenarios.push(Scenario {
            name: name.into(),
            case,
        });
        self
    }

    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }
}

impl<R: Resource> Default for Scenarios<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Resource> IntoIterator for Scenarios<R> {
    type Item = Scenario<R>;
    type IntoIter = std::vec::IntoIter<Scenario<R>>;

    fn into_iter(self) -> Self::IntoIter {
        self.scenarios.into_iter()
    }
}

/// Method bucket name plus its scenarios
pub struct MethodBucket<R: Resource> {
    pub method: String,
    pub scenarios: Scenarios<R>,
}

/// The whole table for one resource
pub struct MethodTests<R: Resource> {
    buckets: Vec<MethodBucket<R>>,
}

impl<R: Resource> MethodTests<R> {
    pub fn new() -> Self {
        Self {
            buckets: Vec::new(),
        }
    }

    /// Append a bucket; buckets run in the order they are added
    pub fn method(mut self, method: impl Into<String>, scenarios: Scenarios<R>) -> Self {
        self.buckets.push(MethodBucket {
            method: method.into(),
            scenarios,
        });
        self
    }

    pub fn scenario_count(&self) -> usize {
        self.buckets.iter().map(|bucket| bucket.scenarios.len()).sum()
    }

    pub(crate) fn into_buckets(self) -> Vec<MethodBucket<R>> {
        self.buckets
    }
}

impl<R: Resource> Default for MethodTests<R> {
    fn default() -> Self {
        Self::new()
    }
}
