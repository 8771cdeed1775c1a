//! Enhancement request pipeline
//!
//! Owns the end-to-end flow for one enhancement: single-flight admission,
//! codebase-context gathering, prompt assembly, the outbound LLM call,
//! response cleaning, and the history append. Status and completion are
//! published on the event bus so the coordinating task is the only place
//! UI-adjacent state changes.
//!
//! The in-flight flag is the only shared mutable state guarded for the
//! single-flight contract. It is acquired with a compare-exchange and
//! released by a Drop guard, so the flag is cleared on every exit path,
//! including upstream failures and missing credentials.

use crate::clean::ResponseCleaner;
use crate::config::{Config, GroqConfig};
use crate::errors::EngineError;
use crate::events::{Event, EventBus};
use crate::history::EnhancementHistory;
use crate::keywords;
use crate::llm::{groq::GroqProvider, LLMProvider};
use crate::prompt;
use crate::relevance;
use crate::secrets::{SecretCache, SecretManager, GROQ_API_KEY, SERVICE_NAME};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex as StdMutex};
use tokio::sync::Mutex;

/// Lazy client state: the provider is constructed on first use and torn
/// down whenever the credential or model changes, so there is never a
/// stale client hiding in a field.
enum ClientState {
    Unconfigured,
    Ready(Arc<dyn LLMProvider>),
}

/// Clears the in-flight flag on every exit path.
struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// The enhancement request pipeline.
///
/// One instance serves the whole process; `enhance` may be spawned onto
/// worker tasks freely because admission is guarded by the in-flight flag.
pub struct EnhancementPipeline {
    codebase: Option<PathBuf>,
    groq: StdMutex<GroqConfig>,
    client: StdMutex<ClientState>,
    secret_manager: Arc<SecretManager>,
    secret_cache: Arc<SecretCache>,
    bus: Arc<EventBus>,
    history: Mutex<EnhancementHistory>,
    cleaner: ResponseCleaner,
    in_flight: AtomicBool,
}

impl EnhancementPipeline {
    pub fn new(config: &Config, bus: Arc<EventBus>) -> Self {
        let secret_manager = Arc::new(SecretManager::new(SERVICE_NAME));
        let secret_cache = Arc::new(SecretCache::new(Arc::clone(&secret_manager)));
        let history = EnhancementHistory::load(config.history_path(), config.history.max_entries);

        Self {
            codebase: config.core.codebase.clone(),
            groq: StdMutex::new(config.llm.groq.clone()),
            client: StdMutex::new(ClientState::Unconfigured),
            secret_manager,
            secret_cache,
            bus,
            history: Mutex::new(history),
            cleaner: ResponseCleaner::new(),
            in_flight: AtomicBool::new(false),
        }
    }

    /// Whether a request is currently in flight.
    pub fn is_enhancing(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// History entries, most recent first.
    pub async fn history(&self) -> Vec<String> {
        self.history.lock().await.entries().to_vec()
    }

    /// Tear the client back down to Unconfigured, optionally switching the
    /// model. Called whenever the credential or model changes; the next
    /// enhancement rebuilds the provider from current state.
    pub fn reconfigure(&self, model: Option<String>) {
        if let Some(model) = model {
            self.groq.lock().expect("groq config lock poisoned").model = model;
        }
        self.secret_cache.invalidate(GROQ_API_KEY);
        *self.client.lock().expect("client state lock poisoned") = ClientState::Unconfigured;
        tracing::debug!("LLM client invalidated");
    }

    /// Get or lazily construct the provider.
    ///
    /// Fails with `MissingApiKey` before any network traffic when no
    /// credential is available.
    fn provider(&self) -> Result<Arc<dyn LLMProvider>, EngineError> {
        let mut state = self.client.lock().expect("client state lock poisoned");

        if let ClientState::Ready(provider) = &*state {
            return Ok(Arc::clone(provider));
        }

        if !self.secret_manager.has_secret(GROQ_API_KEY) {
            return Err(EngineError::MissingApiKey);
        }

        let groq = self.groq.lock().expect("groq config lock poisoned").clone();
        let provider: Arc<dyn LLMProvider> =
            Arc::new(GroqProvider::new(groq, Arc::clone(&self.secret_cache)));
        *state = ClientState::Ready(Arc::clone(&provider));

        Ok(provider)
    }

    /// Run one enhancement to completion.
    ///
    /// Rejects immediately (no queueing) when another request is in
    /// flight. On success the cleaned result is appended to the history
    /// and published as `EnhancementCompleted`; every failure after
    /// admission is published as `EnhancementFailed`.
    pub async fn enhance(
        &self,
        text: &str,
        codebase_override: Option<&Path>,
    ) -> Result<String, EngineError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(EngineError::EmptyInput);
        }

        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(EngineError::EnhancementInFlight);
        }
        let _guard = InFlightGuard(&self.in_flight);

        self.bus
            .publish(Event::EnhancementStarted {
                input: text.to_string(),
            })
            .await;
        self.bus
            .publish(Event::Status {
                message: "Enhancing...".to_string(),
            })
            .await;

        match self.run(text, codebase_override).await {
            Ok(result) => {
                self.bus
                    .publish(Event::EnhancementCompleted {
                        result: result.clone(),
                    })
                    .await;
                Ok(result)
            }
            Err(e) => {
                self.bus
                    .publish(Event::EnhancementFailed {
                        error: self.secret_manager.scrub(&e.to_string()),
                    })
                    .await;
                Err(e)
            }
        }
    }

    async fn run(&self, text: &str, codebase_override: Option<&Path>) -> Result<String, EngineError> {
        // Credential check happens before any context gathering or network call
        let provider = self.provider()?;

        let relevance_block = match self.codebase_root(codebase_override) {
            Some(root) => {
                let keywords = keywords::extract(text);
                relevance::gather_context(&root, &keywords, &self.bus).await
            }
            None => String::new(),
        };

        let full_prompt = prompt::build_prompt(text, &relevance_block);

        tracing::debug!(model = provider.model(), "Dispatching enhancement request");
        let raw = provider
            .complete(&full_prompt)
            .await
            .map_err(|e| EngineError::Upstream(self.secret_manager.scrub(&e.to_string())))?;

        let cleaned = self.cleaner.clean(&raw);

        // A history write failure downgrades to a warning; the caller
        // still gets the result.
        if let Err(e) = self.history.lock().await.add(&cleaned) {
            tracing::warn!("Failed to persist history: {}", e);
        }

        Ok(cleaned)
    }

    /// Effective codebase root: per-request override wins over config;
    /// a root that is not an existing directory disables context.
    fn codebase_root(&self, codebase_override: Option<&Path>) -> Option<PathBuf> {
        let root = codebase_override
            .map(Path::to_path_buf)
            .or_else(|| self.codebase.clone())?;

        if root.is_dir() {
            Some(root)
        } else {
            tracing::warn!("Codebase root {:?} is not a directory, skipping context", root);
            None
        }
    }
}
