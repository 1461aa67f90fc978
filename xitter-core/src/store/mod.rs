/*
    mod.rs - Post storage

    The canonical post arena and its secondary indices. The
    distribution engine is the only writer; feed aggregation reads.
*/

pub mod post_store;

pub use post_store::PostStore;
