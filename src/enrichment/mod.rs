//! Summary enrichment for saved highlights

mod coordinator;

pub use coordinator::{
    EnrichmentCoordinator, EnrichmentError, EnrichmentOutcome, EnrichmentState,
};
