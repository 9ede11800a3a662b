//! Lifecycle controller and headless surface tests.

use std::io;
use std::time::Duration;

use metrics_exporter_prometheus::PrometheusBuilder;
use tokio::sync::oneshot;
use vision_service::control::run_headless_until;
use vision_service::lifecycle::{LifecycleController, LifecycleError};

mod common;

#[tokio::test]
async fn test_health_reachable_only_while_running() {
    let mut controller = LifecycleController::new(common::test_config(0));
    let client = common::client();

    let addr = controller.start().await.unwrap();
    assert!(controller.is_running());
    assert_eq!(controller.local_addr(), Some(addr));

    let res = client.get(common::health_url(addr)).send().await.expect("Service unreachable");
    assert_eq!(res.status(), 200);
    assert_eq!(res.text().await.unwrap(), "Service is healthy");

    controller.stop().await.unwrap();
    assert!(!controller.is_running());
    assert_eq!(controller.local_addr(), None);

    let after = client.get(common::health_url(addr)).send().await;
    assert!(after.is_err(), "Health check should fail after stop");
}

#[tokio::test]
async fn test_health_unreachable_before_start() {
    let controller = LifecycleController::new(common::test_config(28_401));
    assert!(!controller.is_running());

    let res = common::client()
        .get("http://127.0.0.1:28401/health")
        .send()
        .await;
    assert!(res.is_err(), "Nothing should be listening before start");
}

#[tokio::test]
async fn test_restart_on_same_port() {
    let mut controller = LifecycleController::new(common::test_config(28_402));

    for _ in 0..3 {
        let addr = controller.start().await.expect("Port should be free again");
        assert_eq!(addr.port(), 28_402);
        common::wait_for_health(addr).await;
        controller.stop().await.unwrap();
    }
}

#[tokio::test]
async fn test_stop_without_server_is_noop() {
    let mut controller = LifecycleController::new(common::test_config(0));
    controller.stop().await.unwrap();
    controller.stop().await.unwrap();
    assert!(!controller.is_running());
}

#[tokio::test]
async fn test_second_start_is_refused() {
    let mut controller = LifecycleController::new(common::test_config(0));
    let addr = controller.start().await.unwrap();

    match controller.start().await {
        Err(LifecycleError::AlreadyRunning(running)) => assert_eq!(running, addr),
        other => panic!("expected AlreadyRunning, got {:?}", other),
    }

    // The first listener keeps serving.
    let res = common::client().get(common::health_url(addr)).send().await.unwrap();
    assert_eq!(res.status(), 200);

    controller.stop().await.unwrap();
}

#[tokio::test]
async fn test_bind_failure_is_reported() {
    let occupied = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = occupied.local_addr().unwrap().port();

    let mut controller = LifecycleController::new(common::test_config(port));
    match controller.start().await {
        Err(LifecycleError::Bind { address, source }) => {
            assert_eq!(address, format!("127.0.0.1:{}", port));
            assert_eq!(source.kind(), io::ErrorKind::AddrInUse);
        }
        other => panic!("expected Bind error, got {:?}", other),
    }
    assert!(!controller.is_running());
}

#[tokio::test]
async fn test_in_flight_request_drains_before_stop_returns() {
    let config = common::test_config(0);
    let mut controller =
        LifecycleController::with_router(config, common::slow_router(Duration::from_millis(300)));
    let addr = controller.start().await.unwrap();

    let client = common::client();
    let in_flight = tokio::spawn(async move {
        client.get(format!("http://{}/slow", addr)).send().await
    });
    tokio::time::sleep(Duration::from_millis(100)).await;

    controller.stop().await.expect("Drain should finish within the deadline");

    let res = in_flight.await.unwrap().expect("In-flight request should complete");
    assert_eq!(res.status(), 200);
    assert_eq!(res.text().await.unwrap(), "done");
}

#[tokio::test]
async fn test_shutdown_deadline_exceeded() {
    let mut config = common::test_config(0);
    config.timeouts.shutdown_ms = 200;
    let mut controller =
        LifecycleController::with_router(config, common::slow_router(Duration::from_secs(3)));
    let addr = controller.start().await.unwrap();

    let client = common::client();
    let _in_flight = tokio::spawn(async move {
        let _ = client.get(format!("http://{}/slow", addr)).send().await;
    });
    tokio::time::sleep(Duration::from_millis(100)).await;

    match controller.stop().await {
        Err(LifecycleError::ShutdownTimeout(deadline)) => {
            assert_eq!(deadline, Duration::from_millis(200));
        }
        other => panic!("expected ShutdownTimeout, got {:?}", other),
    }
    assert!(!controller.is_running());
}

#[tokio::test]
async fn test_running_gauge_cleared_when_drain_times_out() {
    let recorder = PrometheusBuilder::new().build_recorder();
    let handle = recorder.handle();
    let _recorder = metrics::set_default_local_recorder(&recorder);

    let mut config = common::test_config(0);
    config.timeouts.shutdown_ms = 100;
    let mut controller =
        LifecycleController::with_router(config, common::slow_router(Duration::from_secs(3)));
    let addr = controller.start().await.unwrap();
    assert_eq!(running_gauge(&handle.render()), Some(1.0));

    let client = common::client();
    let _in_flight = tokio::spawn(async move {
        let _ = client.get(format!("http://{}/slow", addr)).send().await;
    });
    tokio::time::sleep(Duration::from_millis(100)).await;

    let outcome = controller.stop().await;
    assert!(matches!(outcome, Err(LifecycleError::ShutdownTimeout(_))));

    let rendered = handle.render();
    assert_eq!(
        running_gauge(&rendered),
        Some(0.0),
        "gauge still set after forced shutdown:\n{}",
        rendered
    );
}

fn running_gauge(rendered: &str) -> Option<f64> {
    rendered
        .lines()
        .find_map(|line| line.strip_prefix("service_running "))
        .and_then(|value| value.trim().parse().ok())
}

#[tokio::test]
async fn test_headless_runs_until_signal() {
    let mut controller = LifecycleController::new(common::test_config(28_403));
    let (signal_tx, signal_rx) = oneshot::channel::<()>();

    let run = tokio::spawn(async move {
        let outcome = run_headless_until(&mut controller, async {
            let _ = signal_rx.await;
            Ok(())
        })
        .await;
        (outcome, controller)
    });

    let addr = "127.0.0.1:28403".parse().unwrap();
    common::wait_for_health(addr).await;

    signal_tx.send(()).unwrap();
    let (outcome, controller) = run.await.unwrap();
    outcome.unwrap();
    assert!(!controller.is_running());

    let after = common::client().get(common::health_url(addr)).send().await;
    assert!(after.is_err(), "Headless stop should release the port");
}

#[tokio::test]
async fn test_headless_stops_when_signal_setup_fails() {
    let mut controller = LifecycleController::new(common::test_config(0));

    let outcome = run_headless_until(&mut controller, async {
        Err(io::Error::other("signal handlers unavailable"))
    })
    .await;

    assert!(matches!(outcome, Err(LifecycleError::Signal(_))));
    assert!(!controller.is_running());
}
