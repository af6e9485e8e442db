//! End-to-end tests against a running server.

use preroute::config::AppConfig;

mod common;

fn config(site: &common::Site) -> AppConfig {
    let mut config = AppConfig::default();
    config.router.root_path = site.root.clone();
    config.router.routes.insert("/".into(), "index.html".into());
    config.router.routes.insert("/about".into(), "pages/about.html".into());
    config.router.routes.insert("/ghost/".into(), "missing.html".into());
    config
}

#[tokio::test]
async fn test_serves_resolved_file() {
    let site = common::Site::new(&[("index.html", "home"), ("pages/about.html", "about us")]);
    let (addr, shutdown) = common::start_server(config(&site)).await;

    let res = common::client()
        .get(format!("http://{}/about/", addr))
        .send()
        .await
        .expect("server unreachable");

    assert_eq!(res.status(), 200);
    assert!(res.headers().contains_key("x-request-id"));
    assert_eq!(res.text().await.unwrap(), "about us");

    shutdown.trigger();
}

#[tokio::test]
async fn test_not_found_and_missing_file() {
    let site = common::Site::new(&[("index.html", "home")]);
    let (addr, shutdown) = common::start_server(config(&site)).await;
    let client = common::client();

    let res = client.get(format!("http://{}/nope/", addr)).send().await.unwrap();
    assert_eq!(res.status(), 404);
    assert_eq!(res.text().await.unwrap(), "Not Found");

    // Routed, but the file is not on disk
    let res = client.get(format!("http://{}/ghost/", addr)).send().await.unwrap();
    assert_eq!(res.status(), 404);

    shutdown.trigger();
}

#[tokio::test]
async fn test_script_access_rejected() {
    let site = common::Site::new(&[("index.html", "home")]);
    let (addr, shutdown) = common::start_server(config(&site)).await;

    let res = common::client()
        .get(format!("http://{}/wp-login.php?x=1", addr))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 404);
    assert_eq!(res.text().await.unwrap(), "Silence is golden!");

    shutdown.trigger();
}

#[tokio::test]
async fn test_trailing_slash_redirect() {
    let site = common::Site::new(&[("pages/about.html", "about us")]);
    let (addr, shutdown) = common::start_server(config(&site)).await;
    let client = common::client();

    let res = client.get(format!("http://{}/about", addr)).send().await.unwrap();
    assert_eq!(res.status(), 301);
    assert_eq!(res.headers()["location"], "/about/");

    let res = client.get(format!("http://{}/about?ref=nav", addr)).send().await.unwrap();
    assert_eq!(res.headers()["location"], "/about/?ref=nav");

    shutdown.trigger();
}

#[tokio::test]
async fn test_host_and_scheme_redirects() {
    let site = common::Site::new(&[("pages/about.html", "about us")]);
    let mut config = config(&site);
    config.redirect.force_https = true;
    config.redirect.redirect_status = 308;
    let (addr, shutdown) = common::start_server(config).await;
    let client = common::client();
    let url = format!("http://{}/about/", addr);

    let res = client
        .get(&url)
        .header("Host", "www.example.com")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 308);
    assert_eq!(res.headers()["location"], "http://example.com/about/");

    let res = client
        .get(&url)
        .header("Host", "example.com")
        .send()
        .await
        .unwrap();
    assert_eq!(res.headers()["location"], "https://example.com/about/");

    // TLS terminated upstream
    let res = client
        .get(&url)
        .header("Host", "example.com")
        .header("X-Forwarded-Ssl", "on")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);

    shutdown.trigger();
}
