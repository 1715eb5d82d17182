//! Fixture trees shared by the catalog, route and viewer tests.

use std::fs;
use std::path::Path;
use tempfile::TempDir;

pub fn touch(path: &Path) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, b"x").unwrap();
}

pub fn write(path: &Path, contents: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, contents).unwrap();
}

/// A small comics root:
///
/// ```text
/// dew/       meta.json, cover.png
///            chapters/chapter-1  meta.json, 1.jpg, 3.jpg, notes.txt, extra.png/ (dir)
///            chapters/chapter-2  1.jpg, 2.jpg, 3.png, 10.PNG, Thumbs.db
/// bare/      chapters/10  meta.json (malformed), 1.png
///            chapters/2   1.png, 2.png
/// no-pages/  chapters/empty/
/// ```
pub fn sample_library() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();

    write(
        &root.join("dew/meta.json"),
        r#"{"title": "Dew", "description": "A comic about dew"}"#,
    );
    touch(&root.join("dew/cover.png"));

    let ch1 = root.join("dew/chapters/chapter-1");
    write(&ch1.join("meta.json"), r#"{"title": "Chapter 1 - wake up"}"#);
    touch(&ch1.join("1.jpg"));
    touch(&ch1.join("3.jpg"));
    touch(&ch1.join("notes.txt"));
    fs::create_dir_all(ch1.join("extra.png")).unwrap();

    let ch2 = root.join("dew/chapters/chapter-2");
    for page in ["1.jpg", "2.jpg", "3.png", "10.PNG", "Thumbs.db"] {
        touch(&ch2.join(page));
    }

    write(&root.join("bare/chapters/10/meta.json"), "{ title: ");
    touch(&root.join("bare/chapters/10/1.png"));
    touch(&root.join("bare/chapters/2/1.png"));
    touch(&root.join("bare/chapters/2/2.png"));

    fs::create_dir_all(root.join("no-pages/chapters/empty")).unwrap();

    tmp
}

/// Launch the full server over `comics` on a free local port and wait for liftoff.
///
/// Returns the base URL and the (empty) public directory, which must outlive the server.
pub async fn spawn_server(comics: &Path) -> (url::Url, TempDir) {
    use std::sync::Arc;

    use rocket::fairing::AdHoc;
    use tokio::sync::Notify;

    use crate::config::AppConfig;

    let public = TempDir::new().unwrap();
    let port = std::net::TcpListener::bind(("127.0.0.1", 0))
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    let config = AppConfig {
        comics_dir: comics.to_path_buf(),
        public_dir: public.path().to_path_buf(),
        port,
        ..AppConfig::default()
    };

    let ready = Arc::new(Notify::new());
    let notify = ready.clone();
    let rocket = crate::build_rocket(config).attach(AdHoc::on_liftoff("Test ready", move |_| {
        Box::pin(async move { notify.notify_one() })
    }));
    let _server = tokio::spawn(rocket.launch());
    ready.notified().await;

    let base = url::Url::parse(&format!("http://127.0.0.1:{}/", port)).unwrap();
    (base, public)
}
