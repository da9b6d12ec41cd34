//! Reconciliation driven by a registry file

#[cfg(test)]
mod tests {
    use crate::assert_all_results;
    use crate::common::{MockRegistry, RegistryFileFixture, collect_for, fast_settings, http_prober, urls_seen};
    use registry_monitor::monitoring::result_stream;
    use registry_monitor::source::FileSource;
    use registry_monitor::Reconciler;
    use std::sync::Arc;
    use std::time::Duration;

    /// Checkers converge onto the file contents as it changes: A,B then B,C
    #[tokio::test]
    async fn test_replacing_registries_converges() {
        let a = MockRegistry::healthy().await;
        let b = MockRegistry::healthy().await;
        let c = MockRegistry::healthy().await;
        let (a_host, b_host, c_host) = (a.host(), b.host(), c.host());

        let mut file = RegistryFileFixture::new(&[("a", a_host.as_str()), ("b", b_host.as_str())]);
        let (tx, mut rx) = result_stream(64);
        let mut reconciler = Reconciler::new(
            Arc::new(FileSource::new(file.path())),
            http_prober(),
            tx,
            fast_settings("default"),
        );

        let report = reconciler.reconcile_once().await.unwrap();
        assert_eq!(report.started.len(), 2);
        let first = collect_for(&mut rx, Duration::from_millis(150)).await;
        assert!(urls_seen(&first).contains(&a_host));
        assert!(urls_seen(&first).contains(&b_host));

        file.write(&[("b", b_host.as_str()), ("c", c_host.as_str())]);
        let report = reconciler.reconcile_once().await.unwrap();
        assert_eq!(report.started, vec![c_host.clone()]);
        assert_eq!(report.stopped, vec![a_host.clone()]);

        let mut expected = vec![b_host.clone(), c_host.clone()];
        expected.sort();
        assert_eq!(reconciler.live_urls(), expected);

        // Let any in-flight probe for A drain, then A must stay silent.
        let _ = collect_for(&mut rx, Duration::from_millis(100)).await;
        let later = collect_for(&mut rx, Duration::from_millis(150)).await;
        let seen = urls_seen(&later);
        assert!(!seen.contains(&a_host));
        assert!(seen.contains(&b_host));
        assert!(seen.contains(&c_host));
        assert_all_results!(later, c_host.as_str(), success = true);
    }

    /// The same URL listed twice runs one checker
    #[tokio::test]
    async fn test_duplicate_entries_run_one_checker() {
        let registry = MockRegistry::healthy().await;
        let host = registry.host();
        let file = RegistryFileFixture::new(&[("first", host.as_str()), ("second", host.as_str())]);

        let (tx, _rx) = result_stream(16);
        let mut reconciler = Reconciler::new(
            Arc::new(FileSource::new(file.path())),
            http_prober(),
            tx,
            fast_settings("default"),
        );

        reconciler.reconcile_once().await.unwrap();
        reconciler.reconcile_once().await.unwrap();
        assert_eq!(reconciler.live_urls(), vec![host]);
    }

    /// A rejecting registry yields failed results without stopping its checker
    #[tokio::test]
    async fn test_failing_registry_keeps_reporting() {
        let registry = MockRegistry::unauthorized().await;
        let host = registry.host();
        let file = RegistryFileFixture::new(&[("locked", host.as_str())]);

        let (tx, mut rx) = result_stream(16);
        let mut reconciler = Reconciler::new(
            Arc::new(FileSource::new(file.path())),
            http_prober(),
            tx,
            fast_settings("default"),
        );
        reconciler.reconcile_once().await.unwrap();

        let results = collect_for(&mut rx, Duration::from_millis(200)).await;
        assert!(results.len() >= 2, "expected repeated probes, got {}", results.len());
        assert_all_results!(results, host.as_str(), success = false);
        assert!(results[0].message.contains("401"));
        assert_eq!(reconciler.live_count(), 1);
    }

    /// A vanished file keeps the running checkers alive
    #[tokio::test]
    async fn test_unreadable_file_keeps_live_set() {
        let registry = MockRegistry::healthy().await;
        let host = registry.host();
        let file = RegistryFileFixture::new(&[("a", host.as_str())]);
        let path = file.path().to_path_buf();

        let (tx, _rx) = result_stream(16);
        let mut reconciler = Reconciler::new(
            Arc::new(FileSource::new(&path)),
            http_prober(),
            tx,
            fast_settings("default"),
        );
        reconciler.reconcile_once().await.unwrap();

        drop(file);
        assert!(reconciler.reconcile_once().await.is_err());
        assert_eq!(reconciler.live_urls(), vec![host]);
    }

    /// An empty file stops every checker
    #[tokio::test]
    async fn test_empty_file_stops_everything() {
        let registry = MockRegistry::healthy().await;
        let host = registry.host();
        let mut file = RegistryFileFixture::new(&[("a", host.as_str())]);

        let (tx, _rx) = result_stream(16);
        let mut reconciler = Reconciler::new(
            Arc::new(FileSource::new(file.path())),
            http_prober(),
            tx,
            fast_settings("default"),
        );
        reconciler.reconcile_once().await.unwrap();

        file.write(&[]);
        let report = reconciler.reconcile_once().await.unwrap();
        assert_eq!(report.stopped, vec![host]);
        assert_eq!(reconciler.live_count(), 0);
    }
}
