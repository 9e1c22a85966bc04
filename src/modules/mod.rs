// Catalog integrations and the resolution pipeline built on them

pub mod integrations;
pub mod lookup;
