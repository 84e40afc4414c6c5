pub mod filter;
pub mod pipeline;
pub mod prompt;

pub use filter::{apply_filters, extract_filters, Filters, CATEGORY_KEYWORDS};
pub use pipeline::{ChatOutcome, Recommender};
pub use prompt::{build_prompt, HISTORY_WINDOW, MAX_CANDIDATES, MAX_RECOMMENDATIONS};
