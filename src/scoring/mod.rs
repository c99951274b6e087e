//! Maturity classification, weight matrix and the API quality index.
//!
//! The index weighs four behavior dimensions (auth, integrity, success,
//! responsibility) by how much each matters at the service's maturity level:
//!
//! | level | auth | integrity | success | responsibility |
//! |---|---|---|---|---|
//! | 0 Open | High | Medium | Medium | Low |
//! | 1 Authenticated | High | Medium | Medium | Medium |
//! | 2 Access controlled | Medium | Medium | High | Medium |
//! | 3 Identity managed | Low | Medium | High | High |

mod index;
mod maturity;
mod weights;

pub use index::{
    weighted_sum, BehaviorInputs, BehaviorMetrics, QualityIndexReport, QualityIndexScorer,
    DEFAULT_RESPONSIBILITY, DEFAULT_SUCCESS,
};
pub use maturity::{MaturityLevel, SecurityPosture};
pub use weights::{Dimension, WeightRow, WeightTier};
