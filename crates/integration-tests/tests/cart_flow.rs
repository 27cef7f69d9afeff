//! Cart flows driven through the storefront router.

#![allow(clippy::unwrap_used)]

use axum::http::StatusCode;
use tienda_integration_tests::{TestApp, badge_count, element_text};

async fn add(app: &mut TestApp, id: &str) -> tienda_integration_tests::TestResponse {
    app.post_form("/cart/add", &[("product_id", id)]).await
}

#[tokio::test]
async fn test_adding_twice_accumulates_quantity() {
    let mut app = TestApp::new().unwrap();

    let first = add(&mut app, "A").await;
    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(first.header("hx-trigger"), Some("cart-updated"));
    assert_eq!(badge_count(&first.body), Some(1));

    let second = add(&mut app, "A").await;
    assert_eq!(badge_count(&second.body), Some(2));

    let page = app.get("/cart").await;
    assert_eq!(page.status, StatusCode::OK);
    assert_eq!(page.body.matches("class=\"fila-carrito\"").count(), 1);
    assert!(page.body.contains("value=\"2\""));
    assert_eq!(element_text(&page.body, "subtotal-valor"), Some("$20.000"));
    assert_eq!(element_text(&page.body, "envio-valor"), Some("$8.000"));
    assert_eq!(element_text(&page.body, "total-valor"), Some("$28.000"));
    assert_eq!(badge_count(&page.body), Some(2));

    let count = app.get("/cart/count").await;
    assert_eq!(badge_count(&count.body), Some(2));
}

#[tokio::test]
async fn test_totals_across_products() {
    let mut app = TestApp::new().unwrap();
    add(&mut app, "A").await;
    add(&mut app, "A").await;
    add(&mut app, "B").await;

    let page = app.get("/cart").await;
    assert_eq!(element_text(&page.body, "subtotal-valor"), Some("$25.000"));
    assert_eq!(element_text(&page.body, "total-valor"), Some("$33.000"));
    assert_eq!(badge_count(&page.body), Some(3));
}

#[tokio::test]
async fn test_rows_keep_insertion_order() {
    let mut app = TestApp::new().unwrap();
    add(&mut app, "B").await;
    add(&mut app, "A").await;
    add(&mut app, "B").await;

    let page = app.get("/cart").await;
    let bolso = page.body.find("data-id=\"B\"").unwrap();
    let widget = page.body.find("data-id=\"A\"").unwrap();
    assert!(bolso < widget);
}

#[tokio::test]
async fn test_remove_then_add_starts_fresh() {
    let mut app = TestApp::new().unwrap();
    add(&mut app, "A").await;
    add(&mut app, "A").await;

    let removed = app.post_form("/cart/remove", &[("product_id", "A")]).await;
    assert_eq!(removed.status, StatusCode::OK);
    assert_eq!(removed.header("hx-trigger"), Some("cart-updated"));
    assert!(removed.body.contains("carrito-vacio"));
    assert!(!removed.body.contains("resumen-carrito"));
    assert!(removed.body.contains("Producto eliminado del carrito."));

    let readded = add(&mut app, "A").await;
    assert_eq!(badge_count(&readded.body), Some(1));
}

#[tokio::test]
async fn test_remove_unknown_line_is_noop() {
    let mut app = TestApp::new().unwrap();
    add(&mut app, "A").await;

    let response = app.post_form("/cart/remove", &[("product_id", "B")]).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body.matches("class=\"fila-carrito\"").count(), 1);
    assert_eq!(badge_count(&app.get("/cart/count").await.body), Some(1));
}

#[tokio::test]
async fn test_invalid_quantities_are_ignored() {
    let mut app = TestApp::new().unwrap();
    add(&mut app, "A").await;

    for input in ["0", "-3", "muchos", ""] {
        let response = app
            .post_form("/cart/update", &[("product_id", "A"), ("quantity", input)])
            .await;
        assert_eq!(response.status, StatusCode::OK, "input {input:?}");
        assert!(response.body.contains("value=\"1\""), "input {input:?}");
        assert_eq!(element_text(&response.body, "total-valor"), Some("$18.000"));
    }

    assert_eq!(badge_count(&app.get("/cart/count").await.body), Some(1));
}

#[tokio::test]
async fn test_valid_quantity_replaces() {
    let mut app = TestApp::new().unwrap();
    add(&mut app, "A").await;

    let response = app
        .post_form("/cart/update", &[("product_id", "A"), ("quantity", "4")])
        .await;
    assert_eq!(response.header("hx-trigger"), Some("cart-updated"));
    assert!(response.body.contains("value=\"4\""));
    assert_eq!(element_text(&response.body, "subtotal-valor"), Some("$40.000"));
    assert_eq!(element_text(&response.body, "total-valor"), Some("$48.000"));

    assert_eq!(badge_count(&app.get("/cart/count").await.body), Some(4));
}

#[tokio::test]
async fn test_unknown_product_is_not_found() {
    let mut app = TestApp::new().unwrap();

    let response = add(&mut app, "Z").await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert!(response.header("hx-trigger").is_none());

    assert_eq!(badge_count(&app.get("/cart/count").await.body), Some(0));
    assert!(app.get("/cart").await.body.contains("carrito-vacio"));
}

#[tokio::test]
async fn test_blank_product_id_is_bad_request() {
    let mut app = TestApp::new().unwrap();
    let response = add(&mut app, "   ").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_empty_cart_page() {
    let mut app = TestApp::new().unwrap();
    let page = app.get("/cart").await;

    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("carrito-vacio"));
    assert!(!page.body.contains("tabla-carrito"));
    assert!(!page.body.contains("resumen-carrito"));
    assert_eq!(badge_count(&page.body), Some(0));
}

#[tokio::test]
async fn test_shoppers_have_separate_carts() {
    let mut alice = TestApp::new().unwrap();
    let mut bob = alice.new_shopper();

    add(&mut alice, "A").await;
    add(&mut alice, "A").await;

    assert_eq!(badge_count(&bob.get("/cart/count").await.body), Some(0));
    assert_eq!(badge_count(&alice.get("/cart/count").await.body), Some(2));
}

#[tokio::test]
async fn test_add_shows_notification() {
    let mut app = TestApp::new().unwrap();

    let response = add(&mut app, "A").await;
    assert!(response.body.contains("id=\"notificacion\""));
    assert!(response.body.contains("hx-swap-oob=\"true\""));
    assert!(response.body.contains("fue añadido al carrito."));

    let banner = app.get("/notification").await;
    assert!(banner.body.contains("mostrar"));
    assert!(banner.body.contains("Widget"));
    assert!(banner.body.contains("hx-get=\"/notification\""));

    let mut other = app.new_shopper();
    let quiet = other.get("/notification").await;
    assert_eq!(quiet.status, StatusCode::OK);
    assert!(!quiet.body.contains("mostrar"));
}

#[tokio::test]
async fn test_pages_without_notice_do_not_poll() {
    let mut app = TestApp::new().unwrap();

    for uri in ["/", "/cart", "/contact", "/notification"] {
        let response = app.get(uri).await;
        assert_eq!(response.status, StatusCode::OK, "{uri}");
        assert!(response.body.contains("id=\"notificacion\""), "{uri}");
        assert!(!response.body.contains("hx-get=\"/notification\""), "{uri}");
    }
}

#[tokio::test]
async fn test_latest_notification_wins() {
    let mut app = TestApp::new().unwrap();
    add(&mut app, "A").await;
    app.post_form("/cart/remove", &[("product_id", "A")]).await;

    let banner = app.get("/notification").await;
    assert!(banner.body.contains("Producto eliminado del carrito."));
    assert!(!banner.body.contains("Widget"));
}
