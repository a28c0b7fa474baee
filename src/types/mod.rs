//! Common types used across the ThingSpeak client library.

pub mod normalize;
pub mod params;
pub mod serde_helpers;

pub use normalize::{NAN_SENTINEL, NormalizedResponse, is_nan_sentinel, normalize_response};
pub use params::{API_KEY_PARAM, ParamValue, Parameters};
