use super::models::{SteeringTarget, SteeringTargetRequest};
use crate::client::{Outcome, RequestOptions, TrafficOpsClient};
use crate::core::{HarnessError, Result};
use crate::harness::{resolve_body, EntityRef, IdRef, Resolver};

/// Create every fixture steering target through the steering user's session
pub async fn create_test_steering_targets(
    steering: &TrafficOpsClient,
    fixtures: &[SteeringTarget],
) -> Result<()> {
    let mut problems = Vec::new();

    for fixture in fixtures {
        let label = label(fixture);
        let mut request = SteeringTargetRequest::from_fixture(fixture);

        if let Err(e) = resolve_body(&mut request, steering).await {
            problems.push(format!("could not resolve steering target {}: {}", label, e));
            continue;
        }

        let Some(ds) = request.delivery_service_id.as_ref().and_then(IdRef::id) else {
            problems.push(format!("steering target {} has no delivery service", label));
            continue;
        };

        let created: Result<Outcome<SteeringTarget>> = steering
            .post(&format!("steering/{}/targets", ds), Some(&request), &RequestOptions::new())
            .await;

        match created {
            Ok(outcome) => match outcome.error {
                Some(error) => {
                    problems.push(format!("creating steering target {}: {}", label, error))
                }
                None => tracing::debug!(steering_target = %label, "Created fixture steering target"),
            },
            Err(e) => problems.push(format!("creating steering target {}: {}", label, e)),
        }
    }

    HarnessError::from_problems(problems)
}

/// Delete every fixture steering target, confirming none remain per delivery service
pub async fn delete_test_steering_targets(
    steering: &TrafficOpsClient,
    fixtures: &[SteeringTarget],
) -> Result<()> {
    let mut problems = Vec::new();
    let mut deleted_from: Vec<(i64, &str)> = Vec::new();

    for fixture in fixtures {
        let label = label(fixture);
        let (Some(ds_xml_id), Some(target_xml_id)) =
            (fixture.delivery_service.as_deref(), fixture.target.as_deref())
        else {
            problems.push(format!("steering target {} is missing a delivery service", label));
            continue;
        };

        let ids = async {
            let ds = steering.resolve(&EntityRef::delivery_service(ds_xml_id)).await?;
            let target = steering.resolve(&EntityRef::delivery_service(target_xml_id)).await?;
            Ok::<_, HarnessError>((ds, target))
        };
        let (ds, target) = match ids.await {
            Ok(ids) => ids,
            Err(e) => {
                problems.push(format!("deleting steering target {}: {}", label, e));
                continue;
            }
        };

        let deleted: Result<Outcome<SteeringTarget>> = steering
            .delete(&format!("steering/{}/targets/{}", ds, target), &RequestOptions::new())
            .await;
        match deleted {
            Ok(outcome) => {
                if let Some(error) = outcome.error {
                    problems.push(format!("deleting steering target {}: {}", label, error));
                }
            }
            Err(e) => problems.push(format!("deleting steering target {}: {}", label, e)),
        }

        if !deleted_from.iter().any(|(id, _)| *id == ds) {
            deleted_from.push((ds, ds_xml_id));
        }
    }

    // A delivery service can carry several fixture targets; check each once
    for (ds, ds_xml_id) in deleted_from {
        let remaining: Result<Outcome<SteeringTarget>> = steering
            .get(&format!("steering/{}/targets", ds), &RequestOptions::new())
            .await;
        match remaining {
            Ok(outcome) if outcome.error.is_none() && outcome.response.is_empty() => {}
            Ok(outcome) => problems.push(format!(
                "expected 0 steering targets for '{}' after deletion, got {}",
                ds_xml_id,
                outcome.response.len()
            )),
            Err(e) => problems.push(format!("reading back steering targets of '{}': {}", ds_xml_id, e)),
        }
    }

    HarnessError::from_problems(problems)
}

fn label(fixture: &SteeringTarget) -> String {
    format!(
        "{} -> {}",
        fixture.delivery_service.as_deref().unwrap_or("?"),
        fixture.target.as_deref().unwrap_or("?")
    )
}
