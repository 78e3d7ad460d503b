#![allow(dead_code)]

use async_trait::async_trait;
use curator_notes::{
    ArtworkRecord, CuratorError, FetchConfig, ImageFetcher, InterpretationGenerator, Interpreter, MockLlmAdapter,
    Result,
};
use interfaces::{ArtistRecord, CollectionRecord, GalleryRepository, InMemoryGallery};
use std::io;
use std::net::TcpListener;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, Once};

static INIT: Once = Once::new();

pub fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .try_init()
            .ok();
    });
}

/// Formatted log output collected while a capture is active.
#[derive(Clone, Default)]
pub struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }

    pub fn error_lines(&self) -> Vec<String> {
        self.contents()
            .lines()
            .filter(|line| line.contains(" ERROR "))
            .map(str::to_string)
            .collect()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Route this thread's events into a buffer until the guard drops.
///
/// `#[tokio::test]` runs on a current-thread runtime, so the whole test body
/// sees the capture.
pub fn capture_logs() -> (CapturedLogs, tracing::subscriber::DefaultGuard) {
    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    (logs, tracing::subscriber::set_default(subscriber))
}

pub const TEST_ARTIST_NAME: &str = "Vincent Example";
pub const TEST_TITLE_1: &str = "Starry Harbour";

pub fn test_artist() -> ArtistRecord {
    ArtistRecord {
        id: 1,
        name: TEST_ARTIST_NAME.to_string(),
        bio: None,
    }
}

/// Artworks 1 and 2 in collection 1, pointing at the given image URLs.
pub fn test_gallery(image_url_1: &str, image_url_2: &str) -> InMemoryGallery {
    InMemoryGallery::new()
        .with_artist(test_artist())
        .with_collection(CollectionRecord {
            id: 1,
            title: "Test Collection".to_string(),
            description: None,
        })
        .with_artwork(ArtworkRecord {
            id: 1,
            title: TEST_TITLE_1.to_string(),
            image_url: image_url_1.to_string(),
            artist: test_artist(),
            collection_id: Some(1),
        })
        .with_artwork(ArtworkRecord {
            id: 2,
            title: "Test Artwork 2".to_string(),
            image_url: image_url_2.to_string(),
            artist: test_artist(),
            collection_id: Some(1),
        })
}

pub fn test_fetch_config(timeout_seconds: u64) -> FetchConfig {
    FetchConfig {
        user_agent: "Curator-Notes-Test/1.0".to_string(),
        timeout_seconds,
    }
}

pub fn generator_with(adapter: MockLlmAdapter) -> InterpretationGenerator {
    generator_with_timeout(adapter, 10)
}

pub fn generator_with_timeout(adapter: MockLlmAdapter, timeout_seconds: u64) -> InterpretationGenerator {
    let fetcher = ImageFetcher::new(test_fetch_config(timeout_seconds)).expect("fetcher should build");
    InterpretationGenerator::with_adapter(fetcher, Box::new(adapter), 0.7, 200)
}

/// A socket that completes the TCP handshake but never answers.
pub fn silent_listener() -> (TcpListener, String) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind should succeed");
    let url = format!("http://{}/slow.jpg", listener.local_addr().expect("local addr"));
    (listener, url)
}

/// Interpreter double that answers without touching the network.
pub struct StubInterpreter {
    respond: Box<dyn Fn(&ArtworkRecord) -> Result<String> + Send + Sync>,
    delay_ms: u64,
    stagger_ms: u64,
    calls: AtomicUsize,
}

impl StubInterpreter {
    pub fn text(text: &str) -> Self {
        let text = text.to_string();
        Self::new(move |_| Ok(text.clone()))
    }

    pub fn failing(reason: &str) -> Self {
        let reason = reason.to_string();
        Self::new(move |_| Err(CuratorError::generation(reason.clone())))
    }

    pub fn empty() -> Self {
        Self::new(|_| Err(CuratorError::EmptyOutput))
    }

    pub fn new<F>(respond: F) -> Self
    where
        F: Fn(&ArtworkRecord) -> Result<String> + Send + Sync + 'static,
    {
        Self {
            respond: Box::new(respond),
            delay_ms: 0,
            stagger_ms: 0,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_delay(mut self, delay_ms: u64) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    /// Each call waits `stagger_ms` longer than the one before it.
    pub fn staggered(mut self, stagger_ms: u64) -> Self {
        self.stagger_ms = stagger_ms;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Interpreter for StubInterpreter {
    async fn interpret_artwork(&self, artwork: &ArtworkRecord) -> Result<String> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) as u64;
        let delay_ms = self.delay_ms + self.stagger_ms * call;
        if delay_ms > 0 {
            tokio::time::sleep(std::time::Duration::from_millis(delay_ms)).await;
        }
        (self.respond)(artwork)
    }
}

/// Repository whose every call fails, as a broken database would.
pub struct BrokenRepository;

#[async_trait]
impl GalleryRepository for BrokenRepository {
    async fn get_artist(&self) -> anyhow::Result<Option<ArtistRecord>> {
        anyhow::bail!("database is unavailable")
    }

    async fn list_collections(&self) -> anyhow::Result<Vec<CollectionRecord>> {
        anyhow::bail!("database is unavailable")
    }

    async fn get_collection(&self, _id: i64) -> anyhow::Result<Option<CollectionRecord>> {
        anyhow::bail!("database is unavailable")
    }

    async fn list_artworks_in_collection(&self, _collection_id: i64) -> anyhow::Result<Vec<ArtworkRecord>> {
        anyhow::bail!("database is unavailable")
    }

    async fn resolve_artwork_by_id(&self, _id: i64) -> anyhow::Result<Option<ArtworkRecord>> {
        anyhow::bail!("database is unavailable")
    }
}
