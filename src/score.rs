use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::error::ScoreError;

const APP_DIR_NAME: &str = "grid-snake";
const SCORE_FILE_NAME: &str = "scores.json";
const HIGH_SCORE_PATH: &str = "highscore";

/// External high-score store.
///
/// Implementations may block; callers in the game loop go through
/// [`ScoreKeeper`], which runs them off the loop thread.
pub trait ScoreBridge: Send + Sync {
    /// Reads the persisted high score.
    fn fetch_high_score(&self) -> Result<u32, ScoreError>;

    /// Offers `score` to the store and returns the store's high score
    /// afterwards. Whether a lower score is ignored is up to the store.
    fn submit_score(&self, score: u32) -> Result<u32, ScoreError>;
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct HighScorePayload {
    high_score: u32,
}

#[derive(Debug, Clone, Copy, Serialize)]
struct SubmitPayload {
    score: u32,
}

/// Talks to the score service over `GET`/`POST {base}/highscore`.
#[derive(Debug, Clone)]
pub struct HttpScoreBridge {
    endpoint: String,
    agent: ureq::Agent,
}

impl HttpScoreBridge {
    #[must_use]
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        let endpoint = format!("{}/{HIGH_SCORE_PATH}", base_url.trim_end_matches('/'));
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();

        Self { endpoint, agent }
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl ScoreBridge for HttpScoreBridge {
    fn fetch_high_score(&self) -> Result<u32, ScoreError> {
        let payload: HighScorePayload = self.agent.get(&self.endpoint).call()?.into_json()?;
        Ok(payload.high_score)
    }

    /// A 2xx reply without a `high_score` field still counts as accepted.
    fn submit_score(&self, score: u32) -> Result<u32, ScoreError> {
        let response = self
            .agent
            .post(&self.endpoint)
            .send_json(SubmitPayload { score })?;

        match response.into_json::<HighScorePayload>() {
            Ok(payload) => Ok(payload.high_score),
            Err(error) => {
                debug!("score service reply had no high score ({error}); assuming {score}");
                Ok(score)
            }
        }
    }
}

/// Keeps the high score in a local JSON file; keeps only higher scores.
#[derive(Debug, Clone)]
pub struct FileScoreBridge {
    path: PathBuf,
}

impl FileScoreBridge {
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Uses the platform data directory.
    #[must_use]
    pub fn at_default_path() -> Self {
        Self::new(default_scores_path())
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ScoreBridge for FileScoreBridge {
    fn fetch_high_score(&self) -> Result<u32, ScoreError> {
        load_high_score_from_path(&self.path)
    }

    /// A malformed file counts as zero so the next score replaces it.
    fn submit_score(&self, score: u32) -> Result<u32, ScoreError> {
        let current = match load_high_score_from_path(&self.path) {
            Ok(current) => current,
            Err(ScoreError::Json(error)) => {
                warn!("score file {} is malformed ({error}); overwriting", self.path.display());
                0
            }
            Err(error) => return Err(error),
        };
        if score <= current {
            return Ok(current);
        }

        save_high_score_to_path(&self.path, score)?;
        Ok(score)
    }
}

/// Returns the platform-correct score file path.
#[must_use]
pub fn default_scores_path() -> PathBuf {
    let mut base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(APP_DIR_NAME);
    base.push(SCORE_FILE_NAME);
    base
}

/// A missing file reads as zero; an unreadable or malformed one is an error.
fn load_high_score_from_path(path: &Path) -> Result<u32, ScoreError> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(0),
        Err(error) => return Err(error.into()),
    };

    let file: HighScorePayload = serde_json::from_str(&raw)?;
    Ok(file.high_score)
}

fn save_high_score_to_path(path: &Path, score: u32) -> Result<(), ScoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(&HighScorePayload { high_score: score })?;
    fs::write(path, json)?;
    Ok(())
}

enum ScoreRequest {
    Fetch,
    Submit(u32),
}

/// Shell-side view of the high score.
///
/// Bridge calls run on a worker thread; results are picked up with
/// [`ScoreKeeper::poll`] so the game loop never waits on the store. Failures
/// are logged and leave the known high score unchanged.
pub struct ScoreKeeper {
    high_score: u32,
    requests: Option<Sender<ScoreRequest>>,
    results: Receiver<u32>,
    worker: Option<JoinHandle<()>>,
}

impl ScoreKeeper {
    /// Spawns the worker and queues an initial fetch.
    pub fn spawn(bridge: Arc<dyn ScoreBridge>) -> io::Result<Self> {
        let (request_tx, request_rx) = mpsc::channel::<ScoreRequest>();
        let (result_tx, result_rx) = mpsc::channel::<u32>();

        let worker = thread::Builder::new()
            .name("score-bridge".to_owned())
            .spawn(move || run_worker(bridge.as_ref(), &request_rx, &result_tx))?;

        let keeper = Self {
            high_score: 0,
            requests: Some(request_tx),
            results: result_rx,
            worker: Some(worker),
        };
        keeper.send(ScoreRequest::Fetch);
        Ok(keeper)
    }

    /// Last high score the store confirmed.
    #[must_use]
    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    /// Applies any results the worker has finished. Returns true when the
    /// known high score changed.
    pub fn poll(&mut self) -> bool {
        let previous = self.high_score;
        while let Ok(high_score) = self.results.try_recv() {
            self.high_score = high_score;
        }
        self.high_score != previous
    }

    /// Handles a game-over notification; submits only a new record.
    pub fn record_game_over(&mut self, final_score: u32) -> bool {
        if final_score <= self.high_score {
            return false;
        }

        info!("submitting new high score {final_score}");
        self.send(ScoreRequest::Submit(final_score));
        true
    }

    /// Lets queued submissions finish, then stops the worker.
    pub fn shutdown(mut self) {
        self.requests = None;
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                warn!("score worker panicked");
            }
        }
    }

    fn send(&self, request: ScoreRequest) {
        let Some(requests) = &self.requests else {
            return;
        };
        if requests.send(request).is_err() {
            warn!("score worker is gone; request dropped");
        }
    }
}

fn run_worker(bridge: &dyn ScoreBridge, requests: &Receiver<ScoreRequest>, results: &Sender<u32>) {
    for request in requests {
        let outcome = match request {
            ScoreRequest::Fetch => bridge.fetch_high_score().inspect_err(|error| {
                warn!("could not fetch high score: {error}");
            }),
            ScoreRequest::Submit(score) => bridge.submit_score(score).inspect_err(|error| {
                warn!("could not submit score {score}: {error}");
            }),
        };

        if let Ok(high_score) = outcome {
            if results.send(high_score).is_err() {
                return;
            }
        }
    }
}
