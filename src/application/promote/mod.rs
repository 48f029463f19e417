//! Promote Module
//!
//! Moves staged artifacts into the live tree when their content differs.
//!
//! ## Structure
//!
//! - `result` - Result types (`PromotionReport`, `PreviewEntry`)
//! - `use_case` - Hash comparison and replacement (`PromotionEngine`)

mod result;
mod use_case;

pub use result::{PreviewEntry, PromotionReport};
pub use use_case::PromotionEngine;
