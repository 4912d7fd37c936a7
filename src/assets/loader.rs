use std::sync::Arc;
use std::time::{Duration, Instant};

use futures::future::BoxFuture;
use glam::Vec3;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tokio::runtime::Runtime;

use crate::assets::prefab::Prefab;
use crate::errors::{Error, Result};

/// Produces a [`Prefab`] from a path or URI.
///
/// The returned future is spawned on the loader runtime, so it must own
/// everything it needs.
pub trait AssetLoader: Send + Sync + 'static {
    fn load(&self, path: &str) -> BoxFuture<'static, Result<Prefab>>;
}

/// Where and how big a loaded model appears in the scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelPlacement {
    pub path: String,
    pub position: Vec3,
    /// Uniform scale applied to the model root.
    pub scale: f32,
}

impl Default for ModelPlacement {
    fn default() -> Self {
        Self {
            path: String::new(),
            position: Vec3::ZERO,
            scale: 1.0,
        }
    }
}

impl ModelPlacement {
    #[must_use]
    pub fn new(path: impl Into<String>, position: Vec3, scale: f32) -> Self {
        Self {
            path: path.into(),
            position,
            scale,
        }
    }
}

/// A finished load, successful or not.
#[derive(Debug)]
pub struct LoadResult {
    pub placement: ModelPlacement,
    pub prefab: Result<Prefab>,
}

/// Runs model loads in the background.
///
/// Each request is spawned on a small tokio runtime owned by the loader.
/// Results come back over a channel and are only observed when the owner
/// calls [`drain`](Self::drain), which keeps scene mutation on the owner's
/// thread.
pub struct ModelLoader {
    runtime: Runtime,
    source: Arc<dyn AssetLoader>,
    sender: flume::Sender<LoadResult>,
    receiver: flume::Receiver<LoadResult>,
    in_flight: usize,
}

impl std::fmt::Debug for ModelLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelLoader")
            .field("in_flight", &self.in_flight)
            .finish_non_exhaustive()
    }
}

impl ModelLoader {
    pub fn new(source: Arc<dyn AssetLoader>) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("diorama-loader")
            .build()?;
        let (sender, receiver) = flume::unbounded();

        Ok(Self {
            runtime,
            source,
            sender,
            receiver,
            in_flight: 0,
        })
    }

    /// Starts loading `placement.path`. Returns immediately.
    pub fn request(&mut self, placement: ModelPlacement) {
        log::info!("Loading model '{}'", placement.path);

        let future = self.source.load(&placement.path);
        let sender = self.sender.clone();
        self.in_flight += 1;

        self.runtime.spawn(async move {
            let prefab = future.await;
            // The receiver lives as long as the loader.
            let _ = sender.send(LoadResult { placement, prefab });
        });
    }

    /// Number of requests whose result has not been drained yet.
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Returns every result that has arrived since the previous call.
    pub fn drain(&mut self) -> Vec<LoadResult> {
        let results: Vec<LoadResult> = self.receiver.try_iter().collect();
        self.in_flight = self.in_flight.saturating_sub(results.len());
        results
    }

    /// Blocks until every pending request has finished or `timeout` elapses,
    /// then returns what arrived.
    pub fn wait_all(&mut self, timeout: Duration) -> Vec<LoadResult> {
        let deadline = Instant::now() + timeout;
        let mut results = Vec::new();
        while self.in_flight > 0 {
            match self.receiver.recv_deadline(deadline) {
                Ok(result) => {
                    self.in_flight -= 1;
                    results.push(result);
                }
                Err(_) => break,
            }
        }
        results
    }
}

/// Serves prefabs registered in memory. Unknown paths fail with
/// [`Error::AssetLoad`].
#[derive(Debug, Default)]
pub struct MemoryLoader {
    prefabs: FxHashMap<String, Arc<Prefab>>,
}

impl MemoryLoader {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, path: impl Into<String>, prefab: Prefab) -> Self {
        self.insert(path, prefab);
        self
    }

    pub fn insert(&mut self, path: impl Into<String>, prefab: Prefab) {
        self.prefabs.insert(path.into(), Arc::new(prefab));
    }
}

impl AssetLoader for MemoryLoader {
    fn load(&self, path: &str) -> BoxFuture<'static, Result<Prefab>> {
        let found = self.prefabs.get(path).cloned();
        let path = path.to_string();
        Box::pin(async move {
            found.map(|p| (*p).clone()).ok_or_else(|| Error::AssetLoad {
                path,
                reason: "not found".to_string(),
            })
        })
    }
}
