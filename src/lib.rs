//! Persona Diversity Monitor
//!
//! Measures whether a population of synthetic persona records is genuinely
//! diverse across a fixed personality/behaviour schema, or only superficially
//! varied.
//!
//! ```no_run
//! use persona_diversity::analysis::{DiversityMonitor, MonitorOptions};
//! use persona_diversity::input::load_personas;
//!
//! # fn main() -> persona_diversity::error::Result<()> {
//! let personas = load_personas(&["personas.json"])?;
//! let outcome = DiversityMonitor::new(MonitorOptions::default()).compute(&personas);
//! if let Some(metrics) = outcome.metrics() {
//!     println!("{}", metrics.diversity_health.status);
//! }
//! # Ok(())
//! # }
//! ```

pub mod analysis;
pub mod config;
pub mod error;
pub mod input;
pub mod logging;
pub mod persona;
pub mod registry;
pub mod report;
pub mod version;

pub use analysis::{DiversityMetrics, DiversityMonitor, DiversityOutcome, MonitorOptions};
pub use error::{Error, ErrorCode, Result};
pub use persona::PersonaRecord;
pub use registry::{DimensionRegistry, TraitFamily};
