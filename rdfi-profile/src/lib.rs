//! Prefix and term maps for rdfi
//!
//! - [`PrefixMap`]: `prefix` <-> namespace IRI, used for CURIEs (`foaf:name`)
//! - [`TermMap`]: bare term <-> IRI, with an optional default vocabulary
//! - [`Profile`]: both maps behind a single `resolve`
//!
//! Both maps are one-to-one. Binding a key or an IRI that is already in use
//! replaces the old pair, so the most recent `set` always wins.

mod bimap;
mod prefix_map;
mod profile;
mod term_map;

pub use bimap::OneToOneMap;
pub use prefix_map::PrefixMap;
pub use profile::Profile;
pub use term_map::TermMap;
