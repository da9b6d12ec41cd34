//! Whole-monitor wiring

#[cfg(test)]
mod tests {
    use crate::common::{MockRegistry, RegistryFileFixture, collect_for, urls_seen};
    use registry_monitor::config::SourceKind;
    use registry_monitor::{Config, Monitor};
    use std::time::Duration;

    fn file_config(path: &std::path::Path) -> Config {
        let mut config = Config::default();
        config.monitor.source.kind = SourceKind::File;
        config.monitor.source.path = Some(path.to_path_buf());
        config.monitor.probe.scheme = "http".to_string();
        config.monitor.refresh_interval_secs = 1;
        config.monitor.check_interval_secs = 1;
        config
    }

    /// A monitor built from configuration streams results for every registry
    #[tokio::test]
    async fn test_monitor_streams_results() {
        let a = MockRegistry::healthy().await;
        let b = MockRegistry::unauthorized().await;
        let file = RegistryFileFixture::new(&[("a", a.host().as_str()), ("b", b.host().as_str())]);

        let monitor = Monitor::from_config(file_config(file.path())).await.unwrap();
        let (reconciler, mut results) = monitor.start();

        let seen = collect_for(&mut results, Duration::from_millis(600)).await;
        reconciler.abort();

        let urls = urls_seen(&seen);
        assert!(urls.contains(&a.host()));
        assert!(urls.contains(&b.host()));
        for result in &seen {
            assert_eq!(result.success, result.url == a.host(), "{}", result.message);
            assert!(result.source.is_none());
        }
    }

    /// Stopping the reconciler closes the result stream
    #[tokio::test]
    async fn test_stream_closes_when_reconciler_stops() {
        let file = RegistryFileFixture::new(&[]);
        let monitor = Monitor::from_config(file_config(file.path())).await.unwrap();
        let (reconciler, mut results) = monitor.start();

        reconciler.abort();
        let _ = reconciler.await;

        let closed = tokio::time::timeout(Duration::from_secs(2), results.recv())
            .await
            .expect("stream should close");
        assert!(closed.is_none());
    }
}
