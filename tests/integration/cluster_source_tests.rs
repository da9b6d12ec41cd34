//! Reconciliation driven by cluster secrets

#[cfg(test)]
mod tests {
    use crate::assert_all_results;
    use crate::common::{MockCluster, MockRegistry, collect_for, fast_settings, http_prober};
    use registry_monitor::cluster::{ClusterClient, PodIdentityResolver};
    use registry_monitor::monitoring::result_stream;
    use registry_monitor::source::KubeSecretSource;
    use registry_monitor::{MonitorError, Reconciler};
    use std::sync::Arc;
    use std::time::Duration;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, ResponseTemplate};

    /// Credentials from a secret reach the registry as basic auth
    #[tokio::test]
    async fn test_secret_credentials_are_used_for_probes() {
        let registry = MockRegistry::healthy().await;
        let host = registry.host();
        Mock::given(method("GET"))
            .and(path("/v2/_catalog"))
            .and(header("authorization", "Basic dXNlcjpwYXNz"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"repositories":["app"]}"#))
            .with_priority(1)
            .mount(&registry.server)
            .await;

        let cluster = MockCluster::start().await;
        cluster
            .serve_secrets("infra", &[("pull-secret", host.as_str(), "user", "pass")])
            .await;

        let client = ClusterClient::new(cluster.base_url(), Some("token".to_string())).unwrap();
        let (tx, mut rx) = result_stream(16);
        let mut reconciler = Reconciler::new(
            Arc::new(KubeSecretSource::new(client)),
            http_prober(),
            tx,
            fast_settings("infra"),
        );

        reconciler.reconcile_once().await.unwrap();
        let results = collect_for(&mut rx, Duration::from_millis(100)).await;

        assert_all_results!(results, host.as_str(), success = true);
        assert!(results[0].message.contains("app"));
        assert!(results[0].source.is_none());
    }

    /// A failing cluster API leaves existing checkers running
    #[tokio::test]
    async fn test_cluster_outage_is_fail_soft() {
        let registry = MockRegistry::healthy().await;
        let host = registry.host();
        let cluster = MockCluster::start().await;
        cluster
            .serve_secrets("infra", &[("pull-secret", host.as_str(), "user", "pass")])
            .await;

        let client = ClusterClient::new(cluster.base_url(), None).unwrap();
        let (tx, mut rx) = result_stream(16);
        let mut reconciler = Reconciler::new(
            Arc::new(KubeSecretSource::new(client)),
            http_prober(),
            tx,
            fast_settings("infra"),
        );
        reconciler.reconcile_once().await.unwrap();

        cluster.server.reset().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&cluster.server)
            .await;

        assert!(reconciler.reconcile_once().await.is_err());
        assert_eq!(reconciler.live_urls(), vec![host.clone()]);

        let _ = collect_for(&mut rx, Duration::from_millis(50)).await;
        let results = collect_for(&mut rx, Duration::from_millis(100)).await;
        assert_all_results!(results, host.as_str(), success = true);
    }

    /// Source tagging that finds no matching pod ends the run
    #[tokio::test]
    async fn test_unresolvable_identity_is_fatal() {
        let cluster = MockCluster::start().await;
        cluster.serve_secrets("infra", &[]).await;
        // Documentation range address, never assigned to a local interface
        cluster.serve_pod("infra", "someone-else", "192.0.2.10").await;

        let client = ClusterClient::new(cluster.base_url(), None).unwrap();
        let mut settings = fast_settings("infra");
        settings.discovery_hint = Some("app=registry-monitor".to_string());

        let (tx, _rx) = result_stream(16);
        let reconciler = Reconciler::new(
            Arc::new(KubeSecretSource::new(client.clone())),
            http_prober(),
            tx,
            settings,
        )
        .with_identity_resolver(Arc::new(PodIdentityResolver::new(client)));

        let outcome = tokio::time::timeout(Duration::from_secs(5), reconciler.run())
            .await
            .expect("run should return promptly");
        let err = outcome.unwrap_err();
        assert!(matches!(err, MonitorError::Identity(_)));
        assert!(err.is_fatal());
    }
}
