use anki_tts::controllers::enrich::EnrichController;
use anki_tts::domain::enrichment::{EnrichmentService, EnrichmentSettings};
use anki_tts::infrastructure::anki::{AnkiConnectClient, RetryPolicy};
use anki_tts::infrastructure::repositories::{AnkiCardRepository, AudioFileRepository};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use test_context::AsyncTestContext;

pub mod fake_tts;

pub use anki_mock::MockAnki;
pub use fake_tts::FakeTts;

/// Retry policy without the production pacing
pub fn fast_policy(max_attempts: u32) -> RetryPolicy {
    RetryPolicy {
        request_delay: Duration::from_millis(1),
        retry_delay: Duration::from_millis(1),
        max_attempts,
    }
}

pub struct TestContext {
    pub anki: Arc<MockAnki>,
    pub base_url: String,
    pub tts: Arc<FakeTts>,
    pub assets: TempDir,
}

impl AsyncTestContext for TestContext {
    fn setup() -> impl std::future::Future<Output = Self> + Send {
        async {
            let anki = Arc::new(MockAnki::default());
            let base_url = anki_mock::serve(anki.clone()).await;
            let assets = tempfile::tempdir().expect("Failed to create assets dir");

            Self {
                anki,
                base_url,
                tts: Arc::new(FakeTts::default()),
                assets,
            }
        }
    }

    fn teardown(self) -> impl std::future::Future<Output = ()> + Send {
        async {
            // The temp dir is removed on drop; the server task ends with the runtime
        }
    }
}

impl TestContext {
    pub fn client(&self, max_attempts: u32) -> Arc<AnkiConnectClient> {
        Arc::new(AnkiConnectClient::new(
            self.base_url.clone(),
            fast_policy(max_attempts),
        ))
    }

    pub fn settings(&self) -> EnrichmentSettings {
        EnrichmentSettings {
            query: "deck:English".to_string(),
            front_field: "Front".to_string(),
            max_cards: 100,
            max_concurrent: 2,
            voice: None,
        }
    }

    pub fn controller(&self, settings: EnrichmentSettings) -> EnrichController {
        let service = EnrichmentService::new(
            Arc::new(AnkiCardRepository::new(self.client(2))),
            self.tts.clone(),
            Arc::new(AudioFileRepository::new(self.assets.path())),
            settings,
        );
        EnrichController::new(Arc::new(service))
    }

    /// Number of mp3 files written to the assets dir
    pub fn saved_audio_files(&self) -> usize {
        std::fs::read_dir(self.assets.path())
            .map(|entries| {
                entries
                    .filter_map(Result::ok)
                    .filter(|entry| entry.path().extension().is_some_and(|ext| ext == "mp3"))
                    .count()
            })
            .unwrap_or(0)
    }
}
