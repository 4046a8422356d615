// Manuscript: chapters, the local store that persists them, and the API-key
// setting that lives alongside them.

pub mod handlers;
pub mod models;
pub mod store;
