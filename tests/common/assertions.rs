//! Result stream helpers and assertions

use registry_monitor::CheckResult;
use std::collections::BTreeSet;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::Instant;

/// Collect every result published within `window`
pub async fn collect_for(rx: &mut mpsc::Receiver<CheckResult>, window: Duration) -> Vec<CheckResult> {
    let deadline = Instant::now() + window;
    let mut results = Vec::new();
    while let Ok(Some(result)) = tokio::time::timeout_at(deadline, rx.recv()).await {
        results.push(result);
    }
    results
}

/// Distinct URLs present in `results`
pub fn urls_seen(results: &[CheckResult]) -> BTreeSet<String> {
    results.iter().map(|r| r.url.clone()).collect()
}

/// Assert that every result for `url` has the expected outcome
#[macro_export]
macro_rules! assert_all_results {
    ($results:expr, $url:expr, success = $success:expr) => {
        let matching: Vec<_> = $results.iter().filter(|r| r.url == $url).collect();
        assert!(!matching.is_empty(), "no results for {}", $url);
        for result in matching {
            assert_eq!(
                result.success, $success,
                "unexpected outcome for {}: {}",
                $url, result.message
            );
        }
    };
}
