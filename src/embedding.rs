//! Embedding capability.
//!
//! Providers are registered by name. Only the deterministic `fake`
//! provider ships with the crate; it needs no model or network.

use std::collections::BTreeMap;

use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::error::{HarnessError, Result};

pub const FAKE_PROVIDER: &str = "fake";

/// Number of values in a fake embedding: the first 16 hex characters of
/// the digest, read as 2-character groups.
pub const FAKE_DIMENSIONS: usize = 8;

pub type Embedding = Vec<f32>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct EmbedError(pub String);

pub trait EmbeddingProvider {
    fn name(&self) -> &str;

    fn dimensions(&self) -> usize;

    fn embed_batch(&self, texts: &[String]) -> std::result::Result<Vec<Embedding>, EmbedError>;
}

/// Derives each vector from a SHA-256 digest of the text bytes.
///
/// Identical text always yields an identical vector, independent of batch
/// order or any prior calls.
#[derive(Debug, Clone, Copy, Default)]
pub struct FakeEmbedder;

impl FakeEmbedder {
    pub fn embed(text: &str) -> Embedding {
        let digest = Sha256::digest(text.as_bytes());
        // Each byte is one 2-hex-character group of the digest.
        digest[..FAKE_DIMENSIONS]
            .iter()
            .map(|&b| f32::from(b) / 256.0)
            .collect()
    }
}

impl EmbeddingProvider for FakeEmbedder {
    fn name(&self) -> &str {
        FAKE_PROVIDER
    }

    fn dimensions(&self) -> usize {
        FAKE_DIMENSIONS
    }

    fn embed_batch(&self, texts: &[String]) -> std::result::Result<Vec<Embedding>, EmbedError> {
        Ok(texts.iter().map(|t| Self::embed(t)).collect())
    }
}

#[derive(Default)]
pub struct EmbeddingRegistry {
    providers: BTreeMap<String, Box<dyn EmbeddingProvider>>,
}

impl EmbeddingRegistry {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn builtin() -> Self {
        let mut reg = Self::empty();
        reg.register(Box::new(FakeEmbedder));
        reg
    }

    pub fn register(&mut self, provider: Box<dyn EmbeddingProvider>) {
        self.providers.insert(provider.name().to_string(), provider);
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.providers.keys().map(String::as_str)
    }

    pub fn get(&self, name: &str) -> Result<&dyn EmbeddingProvider> {
        self.providers
            .get(name)
            .map(|p| p.as_ref())
            .ok_or_else(|| HarnessError::UnknownProvider(name.to_string()))
    }
}
