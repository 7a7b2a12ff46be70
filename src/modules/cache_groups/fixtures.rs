use super::models::{CacheGroup, CacheGroupRequest};
use crate::client::{Outcome, RequestOptions, TrafficOpsClient};
use crate::core::{HarnessError, Result};
use crate::harness::resolve_body;

/// Create every fixture cache group, in order
///
/// Parents must come before their children in `fixtures`. The create
/// response must carry the join fields the server fills in (parent names,
/// type name) and non-null localization methods and fallbacks.
pub async fn create_test_cache_groups(
    session: &TrafficOpsClient,
    fixtures: &[CacheGroup],
) -> Result<()> {
    let mut problems = Vec::new();

    for fixture in fixtures {
        let name = fixture.name.as_deref().unwrap_or("<unnamed>");
        let mut request = CacheGroupRequest::from_fixture(fixture);

        if let Err(e) = resolve_body(&mut request, session).await {
            problems.push(format!("could not resolve cache group '{}': {}", name, e));
            continue;
        }

        let outcome: Outcome<CacheGroup> =
            match session.post("cachegroups", Some(&request), &RequestOptions::new()).await {
                Ok(outcome) => outcome,
                Err(e) => {
                    problems.push(format!("could not CREATE cache group '{}': {}", name, e));
                    continue;
                }
            };

        if let Some(error) = outcome.error {
            problems.push(format!("could not CREATE cache group '{}': {}", name, error));
            continue;
        }

        let Some(created) = outcome.response.first() else {
            problems.push(format!("CREATE cache group '{}' returned no cache group", name));
            continue;
        };

        problems.extend(join_problems(fixture, created));
        tracing::debug!(cache_group = name, id = ?created.id, "Created fixture cache group");
    }

    HarnessError::from_problems(problems)
}

/// Join and default fields missing from a create response
fn join_problems(fixture: &CacheGroup, created: &CacheGroup) -> Vec<String> {
    let name = fixture.name.as_deref().unwrap_or("<unnamed>");
    let mut problems = Vec::new();

    if fixture.parent_name.is_some() && created.parent_name.is_none() {
        problems.push(format!("cache group '{}': parent name is null in response", name));
    }
    if fixture.secondary_parent_name.is_some() && created.secondary_parent_name.is_none() {
        problems.push(format!(
            "cache group '{}': secondary parent name is null in response",
            name
        ));
    }
    if fixture.type_name.is_some() && created.type_name.is_none() {
        problems.push(format!("cache group '{}': type name is null in response", name));
    }
    if created.localization_methods.is_none() {
        problems.push(format!("cache group '{}': localization methods are null", name));
    }
    if created.fallbacks.is_none() {
        problems.push(format!("cache group '{}': fallbacks are null", name));
    }

    problems
}

/// Delete every fixture cache group
///
/// Cache groups with a parent go first; parentless ones (usually the
/// parents themselves) are deleted after all their children are gone. Each
/// delete is confirmed by reading the name back and expecting nothing.
pub async fn delete_test_cache_groups(
    session: &TrafficOpsClient,
    fixtures: &[CacheGroup],
) -> Result<()> {
    let mut problems = Vec::new();
    let mut parentless = Vec::new();

    for fixture in fixtures {
        let Some(name) = fixture.name.as_deref() else {
            continue;
        };

        let existing = match by_name(session, name).await {
            Ok(existing) => existing,
            Err(e) => {
                problems.push(e.to_string());
                continue;
            }
        };

        let Some(current) = existing.into_iter().next() else {
            problems.push(format!("cache group '{}' not found for deletion", name));
            continue;
        };

        if current.has_parent() {
            delete_and_confirm(session, name, &current, &mut problems).await;
        } else {
            parentless.push((name, current));
        }
    }

    for (name, current) in parentless {
        delete_and_confirm(session, name, &current, &mut problems).await;
    }

    HarnessError::from_problems(problems)
}

async fn by_name(session: &TrafficOpsClient, name: &str) -> Result<Vec<CacheGroup>> {
    let outcome: Outcome<CacheGroup> = session
        .get("cachegroups", &RequestOptions::new().query("name", name))
        .await?;
    match outcome.error {
        Some(error) => Err(HarnessError::lookup(format!(
            "cannot GET cache group '{}': {}",
            name, error
        ))),
        None => Ok(outcome.response),
    }
}

async fn delete_and_confirm(
    session: &TrafficOpsClient,
    name: &str,
    current: &CacheGroup,
    problems: &mut Vec<String>,
) {
    let Some(id) = current.id else {
        problems.push(format!("cache group '{}' has a null id", name));
        return;
    };

    match session
        .delete::<CacheGroup>(&format!("cachegroups/{}", id), &RequestOptions::new())
        .await
    {
        Ok(outcome) => {
            if let Some(error) = outcome.error {
                problems.push(format!("cannot delete cache group '{}': {}", name, error));
                return;
            }
        }
        Err(e) => {
            problems.push(format!("cannot delete cache group '{}': {}", name, e));
            return;
        }
    }

    match by_name(session, name).await {
        Ok(remaining) if remaining.is_empty() => {
            tracing::debug!(cache_group = name, id, "Deleted fixture cache group");
        }
        Ok(remaining) => problems.push(format!(
            "expected cache group '{}' to be deleted, {} remain",
            name,
            remaining.len()
        )),
        Err(e) => problems.push(e.to_string()),
    }
}
