mod utils;
#[allow(unused)]
use utils::*;

#[cfg(feature = "integration")]
mod tests {
    use super::*;

    use std::collections::BTreeMap;
    use std::time::Duration;
    use volley::{run_load_test, LoadTest, ReqwestClient, RunConfig};

    const TICK: Duration = Duration::from_millis(100);

    fn client() -> ReqwestClient {
        ReqwestClient::new(Some(Duration::from_secs(5))).unwrap()
    }

    #[tokio::test]
    async fn all_requests_succeed() {
        init().await;

        let report = LoadTest::new(mock_url("/delay/ms/5"), client())
            .requests(10)
            .rate(10)
            .concurrency(5)
            .interval(TICK)
            .await
            .unwrap();

        assert_eq!(report.success_count, 10);
        assert_eq!(report.failure_count, 0);
        assert!(report.failures.is_empty());
        assert!(report.average_duration().unwrap() >= Duration::from_millis(5));
    }

    #[tokio::test]
    async fn status_codes_are_recorded() {
        init().await;

        let config = RunConfig::try_new(mock_url("/status/503"), 6, 3, 3, TICK).unwrap();
        let report = run_load_test(config, client()).await.unwrap();

        assert_eq!(report.success_count, 0);
        assert_eq!(report.failure_count, 6);
        assert_eq!(report.http_failures(), 6);
        assert!(report.failure_codes().values().all(|code| *code == 503));
    }

    #[tokio::test]
    async fn alternating_failures_keyed_by_index() {
        init().await;

        // A single slot keeps server hit order identical to admission order.
        let config =
            RunConfig::try_new(mock_url("/alternate/500/server/isolated"), 4, 1, 4, TICK).unwrap();
        let report = run_load_test(config, client()).await.unwrap();

        assert_eq!(report.success_count, 2);
        assert_eq!(report.failure_count, 2);
        assert_eq!(report.failure_codes(), BTreeMap::from([(1, 500), (3, 500)]));
    }

    #[tokio::test]
    async fn unreachable_target_is_transport_failure() {
        init().await;

        // Nothing listens on the discard port.
        let config = RunConfig::try_new("http://127.0.0.1:9/", 3, 3, 3, TICK).unwrap();
        let report = run_load_test(config, client()).await.unwrap();

        assert_eq!(report.success_count, 0);
        assert_eq!(report.failure_count, 3);
        assert_eq!(
            report.failure_codes(),
            BTreeMap::from([(0, -1), (1, -1), (2, -1)])
        );
    }

    #[tokio::test]
    async fn rate_limited_target() {
        init().await;

        let config = RunConfig::try_new(
            mock_url("/max/20/delay/ms/1/server/isolated"),
            60,
            10,
            30,
            TICK,
        )
        .unwrap();
        let report = run_load_test(config, client()).await.unwrap();

        assert_eq!(report.completed(), 60);
        assert!(report.success_count >= 1);
        assert!(report.failure_codes().values().all(|code| *code == 500));
    }

    #[tokio::test]
    async fn zero_requests() {
        init().await;

        let config = RunConfig::try_new(mock_url("/delay/ms/1"), 0, 1, 1, TICK).unwrap();
        let report = run_load_test(config, client()).await.unwrap();

        assert_eq!(report.completed(), 0);
        assert_eq!(report.average_duration(), None);
        assert!(report.to_string().contains("no completed requests"));
    }
}
