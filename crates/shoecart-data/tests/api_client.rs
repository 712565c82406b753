//! ApiClient against a local HTTP server.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use shoecart_core::catalog::{CatalogClient, LookupError, StockClient};
use shoecart_core::ProductId;
use shoecart_data::{ApiClient, BackoffStrategy, FetchError, FetchPolicy, RetryPolicy};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// A canned reply. `delay` holds the response back to trigger timeouts.
struct Reply {
    status: u16,
    body: &'static str,
    delay: Duration,
}

fn ok(body: &'static str) -> Reply {
    Reply {
        status: 200,
        body,
        delay: Duration::ZERO,
    }
}

fn status(status: u16) -> Reply {
    Reply {
        status,
        body: "{}",
        delay: Duration::ZERO,
    }
}

/// Serve `routes` on an ephemeral port. The handler gets the request path
/// and how many requests the server has seen before this one.
async fn serve<F>(routes: F) -> (String, Arc<AtomicUsize>)
where
    F: Fn(&str, usize) -> Reply + Send + Sync + 'static,
{
    let routes = Arc::new(routes);
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&hits);

    tokio::spawn(async move {
        loop {
            let (mut socket, _) = listener.accept().await.unwrap();
            let routes = Arc::clone(&routes);
            let seen = counter.fetch_add(1, Ordering::SeqCst);

            tokio::spawn(async move {
                let mut buf = Vec::new();
                let mut chunk = [0u8; 1024];
                while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
                    let n = socket.read(&mut chunk).await.unwrap();
                    if n == 0 {
                        return;
                    }
                    buf.extend_from_slice(&chunk[..n]);
                }

                let head = String::from_utf8_lossy(&buf);
                let path = head.split_whitespace().nth(1).unwrap_or("/").to_string();
                let reply = routes(&path, seen);
                tokio::time::sleep(reply.delay).await;

                let response = format!(
                    "HTTP/1.1 {} X\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                    reply.status,
                    reply.body.len(),
                    reply.body
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    (format!("http://{}", addr), hits)
}

fn quick_policy(max_retries: u32) -> FetchPolicy {
    FetchPolicy::new(
        Duration::from_millis(300),
        RetryPolicy::new(max_retries)
            .with_backoff(BackoffStrategy::Fixed(Duration::from_millis(5))),
    )
}

const PRODUCT: &str =
    r#"{"id":42,"title":"Tênis de Caminhada","price":179.9,"image":"https://cdn/tenis42.jpg"}"#;

#[tokio::test]
async fn fetches_product_and_stock() {
    let (base, _) = serve(|path, _| match path {
        "/products/42" => ok(PRODUCT),
        "/stock/42" => ok(r#"{"id":42,"amount":3}"#),
        _ => status(404),
    })
    .await;
    let api = ApiClient::with_policy(base, quick_policy(0)).unwrap();

    let product = api.product_by_id(ProductId::new(42)).await.unwrap();
    assert_eq!(product.title, "Tênis de Caminhada");
    assert_eq!(product.price, 179.9);

    let stock = api.stock_by_product_id(ProductId::new(42)).await.unwrap();
    assert_eq!(stock.amount, 3);
}

#[tokio::test]
async fn lists_products() {
    let (base, _) = serve(|path, _| match path {
        "/products" => ok(r#"[
            {"id":1,"title":"a","price":1.5,"image":"a.jpg"},
            {"id":2,"title":"b","price":2.5,"image":"b.jpg"}
        ]"#),
        _ => status(404),
    })
    .await;
    let api = ApiClient::with_policy(base, quick_policy(0)).unwrap();

    let products = api.list_products().await.unwrap();
    let ids: Vec<u64> = products.iter().map(|p| p.id.get()).collect();
    assert_eq!(ids, vec![1, 2]);
}

#[tokio::test]
async fn missing_product_is_not_found_and_not_retried() {
    let (base, hits) = serve(|_, _| status(404)).await;
    let api = ApiClient::with_policy(base, quick_policy(3)).unwrap();

    let err = api.stock_by_product_id(ProductId::new(9)).await.unwrap_err();
    assert_eq!(err, LookupError::NotFound(ProductId::new(9)));
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn server_errors_are_retried() {
    let (base, hits) = serve(|_, seen| {
        if seen < 2 {
            status(503)
        } else {
            ok(r#"{"id":5,"amount":7}"#)
        }
    })
    .await;
    let api = ApiClient::with_policy(base, quick_policy(2)).unwrap();

    let stock = api.stock(ProductId::new(5)).await.unwrap();
    assert_eq!(stock.amount, 7);
    assert_eq!(hits.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn exhausted_retries_surface_as_transport() {
    let (base, hits) = serve(|_, _| status(500)).await;
    let api = ApiClient::with_policy(base, quick_policy(1)).unwrap();

    let err = api.product_by_id(ProductId::new(1)).await.unwrap_err();
    assert!(matches!(err, LookupError::Transport(_)));
    assert_eq!(hits.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn slow_response_times_out() {
    let (base, _) = serve(|_, _| Reply {
        status: 200,
        body: r#"{"id":1,"amount":1}"#,
        delay: Duration::from_secs(2),
    })
    .await;
    let api = ApiClient::with_policy(base, quick_policy(0)).unwrap();

    let err = api.stock(ProductId::new(1)).await.unwrap_err();
    assert!(matches!(err, FetchError::Timeout(_)), "got {:?}", err);
}

#[tokio::test]
async fn malformed_body_is_a_decode_error() {
    let (base, _) = serve(|_, _| ok(r#"{"id":1}"#)).await;
    let api = ApiClient::with_policy(base, quick_policy(2)).unwrap();

    let err = api.stock(ProductId::new(1)).await.unwrap_err();
    assert!(matches!(err, FetchError::Decode(_)));
}

#[tokio::test]
async fn unreachable_server_is_transport() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let api = ApiClient::with_policy(base, quick_policy(0)).unwrap();
    let err = api.stock_by_product_id(ProductId::new(1)).await.unwrap_err();
    assert!(matches!(err, LookupError::Transport(_)));
}
