use axum::{extract::State, http::StatusCode, Json};

use crate::health::{HealthEndpoint, HealthStatus, LivenessStatus, ReadinessStatus, ServiceInfo};
use crate::observability::metrics;

pub async fn health(State(endpoint): State<HealthEndpoint>) -> Json<HealthStatus> {
    let status = endpoint.health();
    metrics::record_probe("health", status.status.as_str());
    Json(status)
}

pub async fn liveness(State(endpoint): State<HealthEndpoint>) -> Json<LivenessStatus> {
    let status = endpoint.liveness();
    metrics::record_probe("liveness", status.status.as_str());
    Json(status)
}

/// 200 when ready, 503 while any gate fails.
pub async fn readiness(
    State(endpoint): State<HealthEndpoint>,
) -> (StatusCode, Json<ReadinessStatus>) {
    let status = endpoint.readiness();
    metrics::record_probe("readiness", status.status.as_str());

    let code = if status.is_ready() {
        StatusCode::OK
    } else {
        tracing::debug!(failing = ?status.failing, "Readiness gates failing");
        StatusCode::SERVICE_UNAVAILABLE
    };
    (code, Json(status))
}

pub async fn info(State(endpoint): State<HealthEndpoint>) -> Json<ServiceInfo> {
    metrics::record_probe("info", "ok");
    Json(endpoint.info())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::health::FnGate;
    use ::metrics::{
        Counter, CounterFn, Gauge, Histogram, Key, KeyName, Metadata, Recorder, SharedString,
        Unit,
    };
    use std::future::Future;
    use std::sync::{Arc, Mutex};

    type Hits = Arc<Mutex<Vec<String>>>;

    struct Hit {
        hits: Hits,
        key: String,
    }

    impl CounterFn for Hit {
        fn increment(&self, _value: u64) {
            self.hits.lock().unwrap().push(self.key.clone());
        }

        fn absolute(&self, _value: u64) {}
    }

    /// Keeps `name{label=value,..}` for every counter increment.
    #[derive(Default)]
    struct CountingRecorder {
        hits: Hits,
    }

    impl Recorder for CountingRecorder {
        fn describe_counter(&self, _: KeyName, _: Option<Unit>, _: SharedString) {}
        fn describe_gauge(&self, _: KeyName, _: Option<Unit>, _: SharedString) {}
        fn describe_histogram(&self, _: KeyName, _: Option<Unit>, _: SharedString) {}

        fn register_counter(&self, key: &Key, _metadata: &Metadata<'_>) -> Counter {
            let labels: Vec<String> = key
                .labels()
                .map(|l| format!("{}={}", l.key(), l.value()))
                .collect();
            Counter::from_arc(Arc::new(Hit {
                hits: self.hits.clone(),
                key: format!("{}{{{}}}", key.name(), labels.join(",")),
            }))
        }

        fn register_gauge(&self, _key: &Key, _metadata: &Metadata<'_>) -> Gauge {
            Gauge::noop()
        }

        fn register_histogram(&self, _key: &Key, _metadata: &Metadata<'_>) -> Histogram {
            Histogram::noop()
        }
    }

    fn block_on<F: Future>(future: F) -> F::Output {
        tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap()
            .block_on(future)
    }

    #[test]
    fn test_every_route_answer_is_counted() {
        let endpoint = HealthEndpoint::builder("trade-service", 28083)
            .gate(Arc::new(FnGate::new("datastore", || false)))
            .build();
        let recorder = CountingRecorder::default();

        ::metrics::with_local_recorder(&recorder, || {
            block_on(async {
                health(State(endpoint.clone())).await;
                liveness(State(endpoint.clone())).await;
                readiness(State(endpoint.clone())).await;
                info(State(endpoint.clone())).await;
            })
        });

        let hits = recorder.hits.lock().unwrap().clone();
        assert_eq!(
            hits,
            [
                "bootstrap_probe_requests_total{probe=health,status=UP}",
                "bootstrap_probe_requests_total{probe=liveness,status=alive}",
                "bootstrap_probe_requests_total{probe=readiness,status=not_ready}",
                "bootstrap_probe_requests_total{probe=info,status=ok}",
            ]
        );
    }
}
