use std::{fs, path::Path, sync::OnceLock};

use axum::{
    body::Body,
    http::{Method, Request},
    response::Response,
    Router,
};
use http_body_util::BodyExt;
use tempfile::TempDir;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    category::Category,
    config::Disposition,
    state::AppState,
    storage::{BaseDirs, LocalStorage, Storage},
    web::app_router,
};

// ------------------------------------------------
// test facility for tracing
// ------------------------------------------------

/// When we initialize the global tracing subscriber, this must only happen once.
/// During tests, each test will initialize, to make sure we have at least tracing once.
static TRACER: OnceLock<()> = OnceLock::new();

pub(crate) fn init_tracing() {
    let _ = TRACER.get_or_init(|| {
        let _ = tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "exam_server=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().with_test_writer())
            .try_init();
    });
}

// ------------------------------------------------
// test facility for a throwaway exams / answer_keys tree
// ------------------------------------------------

/// A temporary project root holding an `exams` and an `answer_keys` directory.
///
/// Everything is removed again when the value is dropped.
pub(crate) struct TestDirs {
    tmp: TempDir,
    dirs: BaseDirs,
}

impl TestDirs {
    pub(crate) fn new() -> Self {
        init_tracing();

        let tmp = tempfile::tempdir().unwrap();
        let dirs = BaseDirs::new(tmp.path(), "exams", "answer_keys").unwrap();
        fs::create_dir_all(dirs.get(Category::Exams)).unwrap();
        fs::create_dir_all(dirs.get(Category::AnswerKeys)).unwrap();

        Self { tmp, dirs }
    }

    pub(crate) fn root(&self) -> &Path {
        self.tmp.path()
    }

    pub(crate) fn dir(&self, category: Category) -> &Path {
        self.dirs.get(category)
    }

    pub(crate) fn write(&self, category: Category, name: &str, contents: &[u8]) {
        fs::write(self.dir(category).join(name), contents).unwrap();
    }

    pub(crate) fn storage(&self) -> LocalStorage {
        LocalStorage::init(self.dirs.clone(), None).unwrap()
    }

    pub(crate) fn storage_with_extension(&self, extension: &str) -> LocalStorage {
        LocalStorage::init(self.dirs.clone(), Some(extension)).unwrap()
    }

    pub(crate) fn state(&self) -> AppState<LocalStorage> {
        AppState::new(self.storage(), Disposition::default())
    }

    /// The complete application router, serving from this tree
    pub(crate) fn app(&self) -> Router {
        app_router(self.state())
    }
}

// ------------------------------------------------
// test facility for requests and responses
// ------------------------------------------------

pub(crate) fn request_uri_for_test(uri: &str, method: Method) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .method(method)
        .body(Body::empty())
        .unwrap()
}

pub(crate) async fn body_bytes(resp: Response) -> Vec<u8> {
    resp.into_body().collect().await.unwrap().to_bytes().to_vec()
}

pub(crate) async fn body_string(resp: Response) -> String {
    String::from_utf8(body_bytes(resp).await).unwrap()
}
