use serde::{Deserialize, Serialize};

/// Domain-oriented invalidation topic used to classify repaint requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InvalidationTopic {
    /// Offer set replaced or canonicalized.
    Data,
    /// Domain bounds changed (fit, expansion, host overwrite).
    Domain,
    /// Surface size changed.
    Viewport,
    /// Pointer moved, hover or drag visuals need repaint.
    Cursor,
    /// Styling or configuration changed.
    Style,
    /// Density overlay toggled or reconfigured.
    Density,
}

impl InvalidationTopic {
    const fn bit(self) -> u8 {
        match self {
            Self::Data => 1 << 0,
            Self::Domain => 1 << 1,
            Self::Viewport => 1 << 2,
            Self::Cursor => 1 << 3,
            Self::Style => 1 << 4,
            Self::Density => 1 << 5,
        }
    }
}

/// Bitmask of invalidation topics used to gate recompute and redraw work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct InvalidationTopics {
    bits: u8,
}

impl InvalidationTopics {
    const ALL_BITS: u8 = InvalidationTopic::Data.bit()
        | InvalidationTopic::Domain.bit()
        | InvalidationTopic::Viewport.bit()
        | InvalidationTopic::Cursor.bit()
        | InvalidationTopic::Style.bit()
        | InvalidationTopic::Density.bit();

    #[must_use]
    pub const fn none() -> Self {
        Self { bits: 0 }
    }

    #[must_use]
    pub const fn all() -> Self {
        Self {
            bits: Self::ALL_BITS,
        }
    }

    #[must_use]
    pub const fn from_topic(topic: InvalidationTopic) -> Self {
        Self { bits: topic.bit() }
    }

    #[must_use]
    pub const fn with_topic(self, topic: InvalidationTopic) -> Self {
        Self {
            bits: self.bits | topic.bit(),
        }
    }

    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self {
            bits: self.bits | other.bits,
        }
    }

    #[must_use]
    pub const fn contains_topic(self, topic: InvalidationTopic) -> bool {
        (self.bits & topic.bit()) != 0
    }

    #[must_use]
    pub const fn is_none(self) -> bool {
        self.bits == 0
    }

    pub fn insert(&mut self, topic: InvalidationTopic) {
        self.bits |= topic.bit();
    }

    /// Drains the accumulated topics, leaving the set empty.
    pub fn take(&mut self) -> Self {
        let taken = *self;
        self.bits = 0;
        taken
    }
}
