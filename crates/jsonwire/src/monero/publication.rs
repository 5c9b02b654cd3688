//! Messages from a daemon's publish socket.
//!
//! Each message is `topic:contents`, where `contents` is one JSON document
//! whose schema depends on the topic. Splitting never copies; both halves
//! share the received buffer.

use bstr::ByteSlice;
use bytes::Bytes;

use super::{FullChain, MinimalChain, MinimalTxpool};
use crate::{Error, from_bytes};

/// A raw publication split at its first `:`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Everything before the first `:`.
    pub topic: Bytes,
    /// Everything after the first `:`.
    pub contents: Bytes,
}

impl Message {
    /// Splits `raw` at the first `:`. Without a separator the topic is empty
    /// and the whole buffer is the contents.
    pub fn new(raw: impl Into<Bytes>) -> Self {
        let raw = raw.into();
        let Some(at) = raw.find_byte(b':') else {
            tracing::debug!(len = raw.len(), "publication without topic separator");
            return Self {
                topic: Bytes::new(),
                contents: raw,
            };
        };
        Self {
            topic: raw.slice(..at),
            contents: raw.slice(at + 1..),
        }
    }

    /// The registered topic of this message, if any.
    #[must_use]
    pub fn known_topic(&self) -> Option<Topic> {
        Topic::from_name(&self.topic)
    }

    /// Decodes the contents according to the topic.
    ///
    /// Returns `Ok(None)` for topics that are not registered.
    ///
    /// # Errors
    ///
    /// Any decode error of the contents. The message should then be dropped.
    pub fn decode(&self) -> Result<Option<Publication>, Error> {
        let Some(topic) = self.known_topic() else {
            tracing::trace!(topic = %self.topic.as_bstr(), "ignoring unregistered topic");
            return Ok(None);
        };
        let contents = self.contents.clone();
        let publication = match topic {
            Topic::FullChain => Publication::FullChain(from_bytes(contents)?),
            Topic::MinimalChain => Publication::MinimalChain(from_bytes(contents)?),
            Topic::MinimalTxpool => Publication::MinimalTxpool(from_bytes(contents)?),
        };
        Ok(Some(publication))
    }
}

/// Registered publication topics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    /// Every block of the main chain, with its transaction hashes.
    FullChain,
    /// Block ids of the main chain.
    MinimalChain,
    /// Transactions added to the pool.
    MinimalTxpool,
}

impl Topic {
    /// Every registered topic.
    pub const ALL: [Self; 3] = [Self::FullChain, Self::MinimalChain, Self::MinimalTxpool];

    /// Topic as it appears before the `:`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::FullChain => "json-full-chain_main",
            Self::MinimalChain => "json-minimal-chain_main",
            Self::MinimalTxpool => "json-minimal-txpool_add",
        }
    }

    /// Looks up a topic by its exact name.
    #[must_use]
    pub fn from_name(name: &[u8]) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|topic| topic.name().as_bytes() == name)
    }
}

/// Decoded contents of a registered publication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Publication {
    /// Decoded [`Topic::FullChain`] contents.
    FullChain(FullChain),
    /// Decoded [`Topic::MinimalChain`] contents.
    MinimalChain(MinimalChain),
    /// Decoded [`Topic::MinimalTxpool`] contents.
    MinimalTxpool(MinimalTxpool),
}

impl Publication {
    /// Topic the contents were published under.
    #[must_use]
    pub fn topic(&self) -> Topic {
        match self {
            Self::FullChain(_) => Topic::FullChain,
            Self::MinimalChain(_) => Topic::MinimalChain,
            Self::MinimalTxpool(_) => Topic::MinimalTxpool,
        }
    }
}
