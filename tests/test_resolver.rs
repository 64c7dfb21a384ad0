//! Tests for mapping requests onto files

use std::path::PathBuf;

use plainserve::http::error::HttpError;
use plainserve::http::request::{Method, Request, RequestBuilder};
use plainserve::static_files::{LocalFs, MemoryFs, Resolver};

fn get(path: &str) -> Request {
    RequestBuilder::new()
        .method(Method::GET)
        .path(path)
        .build()
        .unwrap()
}

fn site() -> MemoryFs {
    MemoryFs::new()
        .with_file("/www/index.html", &b"<h1>home</h1>"[..])
        .with_file("/www/style.CSS", &b"body{}"[..])
        .with_file("/www/data.bin", vec![0u8, 1, 2, 3])
        .with_file("/www/README", &b"read me"[..])
        .with_file("/www/docs/index.html", &b"<h1>docs</h1>"[..])
        .with_dir("/www/empty")
        .with_broken("/www/secret.txt")
}

#[tokio::test]
async fn test_resolve_regular_file() {
    let resolver = Resolver::new("/www", site());

    let (file, content) = resolver.load(&get("/index.html")).await.unwrap();

    assert_eq!(file.path, "/www/index.html");
    assert_eq!(file.mime_type, "text/html");
    assert_eq!(&content[..], b"<h1>home</h1>");
}

#[tokio::test]
async fn test_resolve_mime_is_case_insensitive() {
    let resolver = Resolver::new("/www", site());

    let file = resolver.resolve(&get("/style.CSS")).await.unwrap();
    assert_eq!(file.mime_type, "text/css");
}

#[tokio::test]
async fn test_resolve_unknown_and_missing_extension() {
    let resolver = Resolver::new("/www", site());

    let file = resolver.resolve(&get("/data.bin")).await.unwrap();
    assert_eq!(file.mime_type, "application/octet-stream");

    let file = resolver.resolve(&get("/README")).await.unwrap();
    assert_eq!(file.mime_type, "application/octet-stream");
}

#[tokio::test]
async fn test_resolve_directory_serves_index() {
    let resolver = Resolver::new("/www", site());

    for target in ["/", "/docs", "/docs/"] {
        let (file, content) = resolver.load(&get(target)).await.unwrap();
        assert!(file.path.ends_with("index.html"), "{target}");
        assert_eq!(file.mime_type, "text/html");
        if target == "/" {
            assert_eq!(&content[..], b"<h1>home</h1>");
        } else {
            assert_eq!(&content[..], b"<h1>docs</h1>");
        }
    }
}

#[tokio::test]
async fn test_resolve_directory_without_index_is_not_found() {
    let resolver = Resolver::new("/www", site());

    assert_eq!(
        resolver.resolve(&get("/empty")).await,
        Err(HttpError::NotFound)
    );
}

#[tokio::test]
async fn test_resolve_missing_path() {
    let resolver = Resolver::new("/www", site());

    assert_eq!(
        resolver.resolve(&get("/nope.html")).await,
        Err(HttpError::NotFound)
    );
}

#[tokio::test]
async fn test_resolve_non_get_methods_rejected_before_fs_access() {
    // A broken filesystem entry would raise Internal if it were touched
    let resolver = Resolver::new("/www", site());

    for method in [
        Method::POST,
        Method::PUT,
        Method::DELETE,
        Method::HEAD,
        Method::OPTIONS,
        Method::PATCH,
    ] {
        let req = RequestBuilder::new()
            .method(method)
            .path("/secret.txt")
            .build()
            .unwrap();
        assert_eq!(
            resolver.resolve(&req).await,
            Err(HttpError::MethodNotAllowed),
            "{method}"
        );
    }
}

#[tokio::test]
async fn test_resolve_other_fs_errors_are_internal() {
    let resolver = Resolver::new("/www", site());

    let result = resolver.resolve(&get("/secret.txt")).await;
    assert!(matches!(result, Err(HttpError::Internal(_))));
}

#[tokio::test]
async fn test_resolve_refuses_parent_segments() {
    let fs = site().with_file("/etc/passwd", &b"root"[..]);
    let resolver = Resolver::new("/www", fs);

    assert_eq!(
        resolver.resolve(&get("/../etc/passwd")).await,
        Err(HttpError::NotFound)
    );
}

#[tokio::test]
async fn test_resolve_refuses_target_without_leading_slash() {
    let fs = site().with_file("/www-private/secret.txt", &b"TOP SECRET"[..]);
    let resolver = Resolver::new("/www", fs);

    assert_eq!(
        resolver.load(&get("-private/secret.txt")).await.map(|_| ()),
        Err(HttpError::NotFound)
    );
    assert_eq!(
        resolver.resolve(&get("index.html")).await,
        Err(HttpError::NotFound)
    );
}

fn temp_root(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "plainserve-resolver-{}-{}",
        name,
        std::process::id()
    ));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[tokio::test]
async fn test_local_fs_serves_real_files() {
    let root = temp_root("local");
    std::fs::write(root.join("logo.png"), [0x89, b'P', b'N', b'G']).unwrap();
    std::fs::create_dir(root.join("blog")).unwrap();
    std::fs::write(root.join("blog").join("index.html"), "<p>blog</p>").unwrap();

    let resolver = Resolver::new(root.to_string_lossy().to_string(), LocalFs);

    let (file, content) = resolver.load(&get("/logo.png")).await.unwrap();
    assert_eq!(file.mime_type, "image/png");
    assert_eq!(&content[..], &[0x89, b'P', b'N', b'G']);

    let (_, content) = resolver.load(&get("/blog")).await.unwrap();
    assert_eq!(&content[..], b"<p>blog</p>");

    assert_eq!(
        resolver.load(&get("/missing.txt")).await.map(|_| ()),
        Err(HttpError::NotFound)
    );

    std::fs::remove_dir_all(&root).unwrap();
}
