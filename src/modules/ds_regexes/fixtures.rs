use sqlx::PgPool;

use super::models::{DeliveryServiceRegex, DeliveryServiceRegexFixture, DeliveryServiceRegexPost};
use crate::client::{Outcome, RequestOptions, TrafficOpsClient};
use crate::core::{HarnessError, Result};
use crate::harness::{resolve_body, EntityRef, Resolver};

/// Attach every fixture regex to its delivery service through the API
pub async fn create_test_ds_regexes(
    session: &TrafficOpsClient,
    fixtures: &[DeliveryServiceRegexFixture],
) -> Result<()> {
    let mut problems = Vec::new();

    for fixture in fixtures {
        let ds = match session.resolve(&EntityRef::delivery_service(&fixture.ds_name)).await {
            Ok(ds) => ds,
            Err(e) => {
                problems.push(format!("regex '{}': {}", fixture.pattern, e));
                continue;
            }
        };

        let mut post = DeliveryServiceRegexPost::from(fixture);
        if let Err(e) = resolve_body(&mut post, session).await {
            problems.push(format!("regex '{}': {}", fixture.pattern, e));
            continue;
        }

        let created: Result<Outcome<DeliveryServiceRegex>> = session
            .post(&format!("deliveryservices/{}/regexes", ds), Some(&post), &RequestOptions::new())
            .await;
        match created {
            Ok(outcome) => match outcome.error {
                Some(error) => problems.push(format!(
                    "could not create regex '{}' on '{}': {}",
                    fixture.pattern, fixture.ds_name, error
                )),
                None => tracing::debug!(
                    delivery_service = %fixture.ds_name,
                    pattern = %fixture.pattern,
                    "Created fixture delivery service regex"
                ),
            },
            Err(e) => problems.push(format!(
                "could not create regex '{}' on '{}': {}",
                fixture.pattern, fixture.ds_name, e
            )),
        }
    }

    HarnessError::from_problems(problems)
}

/// Remove fixture regexes straight from the database
///
/// There is no API path for removing a regex from a delivery service, so the
/// junction row and the regex row are deleted in one transaction. Ids are
/// looked up through the API first, and the pattern must be gone afterwards.
pub async fn delete_test_ds_regexes(
    session: &TrafficOpsClient,
    pool: &PgPool,
    fixtures: &[DeliveryServiceRegexFixture],
) -> Result<()> {
    let mut problems = Vec::new();

    for fixture in fixtures {
        let ds = match session.resolve(&EntityRef::delivery_service(&fixture.ds_name)).await {
            Ok(ds) => ds,
            Err(e) => {
                problems.push(format!("regex '{}': {}", fixture.pattern, e));
                continue;
            }
        };

        let matching = match regexes_with_pattern(session, ds, &fixture.pattern).await {
            Ok(matching) => matching,
            Err(e) => {
                problems.push(e.to_string());
                continue;
            }
        };

        for regex_id in matching.iter().filter_map(|regex| regex.id) {
            if let Err(e) = delete_regex_rows(pool, ds, regex_id).await {
                problems.push(format!(
                    "unable to delete regex {} of '{}': {}",
                    regex_id, fixture.ds_name, e
                ));
            }
        }

        match regexes_with_pattern(session, ds, &fixture.pattern).await {
            Ok(remaining) if remaining.is_empty() => {}
            Ok(remaining) => problems.push(format!(
                "expected regex '{}' of '{}' to be deleted, {} remain",
                fixture.pattern,
                fixture.ds_name,
                remaining.len()
            )),
            Err(e) => problems.push(e.to_string()),
        }
    }

    HarnessError::from_problems(problems)
}

async fn regexes_with_pattern(
    session: &TrafficOpsClient,
    ds: i64,
    pattern: &str,
) -> Result<Vec<DeliveryServiceRegex>> {
    let outcome: Outcome<DeliveryServiceRegex> = session
        .get(&format!("deliveryservices/{}/regexes", ds), &RequestOptions::new())
        .await?;

    if let Some(error) = outcome.error {
        return Err(HarnessError::lookup(format!(
            "cannot GET regexes of delivery service {}: {}",
            ds, error
        )));
    }

    Ok(with_pattern(outcome.response, pattern))
}

fn with_pattern(regexes: Vec<DeliveryServiceRegex>, pattern: &str) -> Vec<DeliveryServiceRegex> {
    regexes
        .into_iter()
        .filter(|regex| regex.pattern.as_deref() == Some(pattern))
        .collect()
}

async fn delete_regex_rows(pool: &PgPool, ds: i64, regex_id: i64) -> Result<()> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM deliveryservice_regex WHERE deliveryservice = $1 AND regex = $2")
        .bind(ds)
        .bind(regex_id)
        .execute(&mut *tx)
        .await?;

    sqlx::query("DELETE FROM regex WHERE id = $1")
        .bind(regex_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    tracing::debug!(delivery_service = ds, regex = regex_id, "Deleted delivery service regex rows");
    Ok(())
}
