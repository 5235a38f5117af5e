//! Card data: resources, effects, definitions and the catalog.
//!
//! ## Key Types
//!
//! - `Resource`, `ResourceCounts`, `JointResource`: what cards cost and produce
//! - `Cost`, `Passive`: parsed cost and per-turn grant
//! - `Effect`, `VictoryPoints`, `WonderSpecial`, `TokenEffect`: what happens
//!   on construction and at scoring
//! - `Card`, `Wonder`, `Token`, and the `Constructable` trait shared by the
//!   first two
//! - `Catalog`: validated, immutable collection of all of the above

pub mod catalog;
pub mod definition;
pub mod effects;
pub mod resources;

pub use catalog::{CardRecord, Catalog, TokenRecord, WonderRecord};
pub use definition::{
    AgePool, Card, CardId, Category, Constructable, GrantPool, Kind, Token, TokenId, Wonder,
    WonderId,
};
pub use effects::{Effect, Scope, Tally, TokenEffect, VictoryPoints, WonderSpecial};
pub use resources::{
    Cost, JointCounts, JointResource, Passive, Resource, ResourceCounts, ScienceCounts,
    ScienceSymbol,
};
