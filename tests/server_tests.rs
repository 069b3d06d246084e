use inventory_status_service::{metrics::LoggingMetrics, server::serve, state::AppState};
use std::{sync::Arc, time::Duration};
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::{TcpListener, TcpStream},
    sync::oneshot,
    time::{Instant, sleep, timeout},
};

async fn raw_request(addr: std::net::SocketAddr, request: &str) -> String {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream.write_all(request.as_bytes()).await.unwrap();

    let mut response = Vec::new();
    stream.read_to_end(&mut response).await.unwrap();
    String::from_utf8(response).unwrap()
}

#[tokio::test]
async fn test_serves_inventory_over_tcp_and_shuts_down() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    let server = tokio::spawn(serve(
        listener,
        AppState::new(Arc::new(LoggingMetrics)),
        async move {
            let _ = shutdown_rx.await;
        },
        Duration::from_secs(5),
    ));

    let response = raw_request(
        addr,
        "GET /inventory?foo=bar HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n",
    )
    .await;

    assert!(response.starts_with("HTTP/1.1 200 OK"), "{response}");
    assert!(response.ends_with("\r\n\r\nInventory in stock"), "{response}");

    shutdown_tx.send(()).unwrap();
    let result = timeout(Duration::from_secs(5), server)
        .await
        .expect("server did not stop after shutdown signal")
        .unwrap();

    assert!(result.is_ok());
}

#[tokio::test]
async fn test_unmatched_path_over_tcp_is_404() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    let server = tokio::spawn(serve(
        listener,
        AppState::new(Arc::new(LoggingMetrics)),
        async move {
            let _ = shutdown_rx.await;
        },
        Duration::from_secs(5),
    ));

    let response = raw_request(
        addr,
        "GET /nonexistent HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n",
    )
    .await;

    assert!(response.starts_with("HTTP/1.1 404 Not Found"), "{response}");

    shutdown_tx.send(()).unwrap();
    let result = timeout(Duration::from_secs(5), server)
        .await
        .expect("server did not stop after shutdown signal")
        .unwrap();

    assert!(result.is_ok());
}

#[tokio::test]
async fn test_shutdown_gives_up_on_stalled_connection_after_drain_timeout() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
    let drain_timeout = Duration::from_secs(1);

    let server = tokio::spawn(serve(
        listener,
        AppState::new(Arc::new(LoggingMetrics)),
        async move {
            let _ = shutdown_rx.await;
        },
        drain_timeout,
    ));

    // Headers never finish, so the connection stays in flight
    let mut stalled = TcpStream::connect(addr).await.unwrap();
    stalled
        .write_all(b"GET /inventory HTTP/1.1\r\nHost: localhost\r\n")
        .await
        .unwrap();
    sleep(Duration::from_millis(100)).await;

    let started = Instant::now();
    shutdown_tx.send(()).unwrap();
    let result = timeout(Duration::from_secs(5), server)
        .await
        .expect("server ignored drain timeout")
        .unwrap();
    let elapsed = started.elapsed();

    assert!(result.is_ok());
    assert!(elapsed >= drain_timeout, "returned after {elapsed:?}");
    assert!(elapsed < Duration::from_secs(4), "returned after {elapsed:?}");

    drop(stalled);
}
