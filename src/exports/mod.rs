//! Machine-facing exports: the XML sitemap and the AI crawler JSON endpoints.
//!
//! All renderers read the shared canonical field map in [`canon`] instead of
//! re-deriving titles and dates from raw records, so the formats cannot
//! silently drift apart. Every renderer must survive a record with nothing
//! but an id and a name.

pub mod ai;
pub mod canon;
pub mod sitemap;
